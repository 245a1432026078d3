//! # operon
//!
//! **operon** derives OpenAPI 3.0 "Path Item" documentation from metadata
//! attached to handler groups, without invoking the handlers or inspecting
//! their bodies.
//!
//! ## Overview
//!
//! Each URL path is described by a [`HandlerGroup`]: one optional dispatcher
//! slot plus the eight fixed HTTP-method slots. Slots carry [`Annotations`],
//! an ordered list of specific objects ([`Parameter`], [`Response`],
//! [`RequestBody`]) and at most one declaration mapping of literal Operation
//! fields (`summary`, `tags`, …). Synthesis merges all of it into a nested
//! `serde_json` tree that embeds verbatim as an OpenAPI `paths.<route>`
//! value.
//!
//! Dispatcher annotations are shared: its parameters become path-level
//! `parameters`, its responses and request bodies are replayed into every
//! present method. Method annotations layer on top, with method-level
//! responses overriding shared ones at the same status code.
//!
//! ## Architecture
//!
//! - **[`spec`]** - specific-object model and the Path Item synthesizer
//! - **[`annotations`]** - per-slot metadata (specific objects + declaration)
//! - **[`handlers`]** - the HTTP-method enum and the handler-group slot table
//! - **[`schema`]** - lazy schema-compiler boundary ([`SchemaRef`])
//! - **[`document`]** - whole-document assembly and JSON/YAML serialization
//! - **[`error`]** - the crate error type
//!
//! ## Quick Start
//!
//! ```
//! use operon::{Annotations, HandlerGroup, MediaType, Parameter, RequestBody, Response};
//! use serde_json::json;
//!
//! let books = HandlerGroup::new()
//!     .get(
//!         Annotations::new()
//!             .specify(Parameter::query("paging").schema(json!({ "type": "integer" })))
//!             .specify(Response::new(200).description("A page of books"))
//!             .declare([("summary", "List books")])?,
//!     )
//!     .post(
//!         Annotations::new()
//!             .specify(Response::new(201))
//!             .specify(
//!                 RequestBody::new()
//!                     .content("application/json", MediaType::with_schema(json!({ "type": "object" })))
//!                     .required(true),
//!             ),
//!     );
//!
//! let tree = books.path_item()?;
//! assert!(tree.contains_key("get"));
//! assert!(tree.contains_key("post"));
//! # Ok::<(), operon::Error>(())
//! ```
//!
//! Schemas attach through [`SchemaRef`]: a literal `serde_json` value, a
//! closure, or any [`SchemaSource`] implementation. Compilation is deferred
//! to synthesis time, so sources may be refined after attachment.

pub mod annotations;
pub mod document;
pub mod error;
pub mod handlers;
pub mod schema;
pub mod spec;

pub use annotations::Annotations;
pub use document::{Document, Info};
pub use error::{BoxError, Error};
pub use handlers::{HandlerGroup, HttpMethod};
pub use schema::{SchemaRef, SchemaSource};
pub use spec::{
    build_path_item, MediaType, Parameter, ParameterLocation, RequestBody, Response,
    SpecificObject,
};
