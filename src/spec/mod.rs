//! Specific-object model and Path Item synthesis.

mod build;
mod types;

pub use build::*;
pub use types::*;
