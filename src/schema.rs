use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::BoxError;

/// Source of a compiled JSON-Schema-like value
///
/// Implemented by whatever turns a validation schema into the mapping that
/// lands at `schema` positions in the output tree. The crate never inspects
/// the result; it is inserted verbatim. Compilation happens lazily at
/// synthesis time, not when the schema is attached, so a source may refine
/// its backing data up until [`build_path_item`](crate::spec::build_path_item)
/// runs. A source shared across several handler slots is compiled once per
/// position it appears in per synthesis call.
pub trait SchemaSource {
    /// Compile this source into a JSON-Schema-like value.
    ///
    /// Failures propagate to the synthesis caller as
    /// [`Error::Schema`](crate::Error::Schema) with this error as the source.
    fn compile(&self) -> Result<Value, BoxError>;
}

/// A literal value is its own compiled form.
impl SchemaSource for Value {
    fn compile(&self) -> Result<Value, BoxError> {
        Ok(self.clone())
    }
}

struct FnSource<F>(F);

impl<F> SchemaSource for FnSource<F>
where
    F: Fn() -> Result<Value, BoxError>,
{
    fn compile(&self) -> Result<Value, BoxError> {
        (self.0)()
    }
}

/// Shared handle to a schema source
///
/// Cheap to clone; the same handle may be attached to any number of
/// parameters and media types. Construct one from a literal
/// [`Value`](serde_json::Value), a closure, or any [`SchemaSource`]
/// implementation:
///
/// ```
/// use operon::SchemaRef;
/// use serde_json::json;
///
/// let literal = SchemaRef::from(json!({ "type": "string" }));
/// let lazy = SchemaRef::from_fn(|| Ok(json!({ "type": "integer" })));
/// # let _ = (literal, lazy);
/// ```
#[derive(Clone)]
pub struct SchemaRef(Arc<dyn SchemaSource + Send + Sync>);

impl SchemaRef {
    /// Wrap any schema source in a shared handle.
    pub fn from_source<S>(source: S) -> Self
    where
        S: SchemaSource + Send + Sync + 'static,
    {
        SchemaRef(Arc::new(source))
    }

    /// Build a schema source from a closure evaluated at synthesis time.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn() -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        SchemaRef(Arc::new(FnSource(f)))
    }

    /// Compile the underlying source.
    pub fn compile(&self) -> Result<Value, BoxError> {
        self.0.compile()
    }
}

impl From<Value> for SchemaRef {
    fn from(value: Value) -> Self {
        SchemaRef::from_source(value)
    }
}

// Sources are arbitrary trait objects, so print presence rather than contents.
impl fmt::Debug for SchemaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaRef").finish_non_exhaustive()
    }
}
