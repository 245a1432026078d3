use serde_json::{Map, Value};
use tracing::warn;

use crate::annotations::Annotations;
use crate::error::Error;

/// HTTP method slot recognized by synthesis
///
/// Variant order is the canonical synthesis order; [`HttpMethod::ALL`]
/// exposes it for callers iterating methods themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
    Trace,
}

impl HttpMethod {
    /// Every method slot, in the order synthesis visits them.
    pub const ALL: [HttpMethod; 8] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
        HttpMethod::Head,
        HttpMethod::Options,
        HttpMethod::Trace,
    ];

    /// The lowercase Path Item key for this method.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
            HttpMethod::Patch => "patch",
            HttpMethod::Head => "head",
            HttpMethod::Options => "options",
            HttpMethod::Trace => "trace",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for HttpMethod {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "get" => Ok(Self::Get),
            "post" => Ok(Self::Post),
            "put" => Ok(Self::Put),
            "delete" => Ok(Self::Delete),
            "patch" => Ok(Self::Patch),
            "head" => Ok(Self::Head),
            "options" => Ok(Self::Options),
            "trace" => Ok(Self::Trace),
            other => Err(format!("unknown HTTP method: {other}")),
        }
    }
}

/// Annotated handler slots for one URL path
///
/// One optional dispatcher slot plus a fixed table of the eight HTTP-method
/// slots. Dispatcher annotations are shared across every present method:
/// its parameters land in the path-level `parameters` array, its responses
/// and request bodies are replayed into each method. Any subset of slots
/// may be populated.
///
/// ```
/// use operon::{Annotations, HandlerGroup, Parameter, Response};
///
/// let group = HandlerGroup::new()
///     .dispatch(Annotations::new().specify(Parameter::path("id")))
///     .get(Annotations::new().specify(Response::new(200).description("OK")));
/// let tree = group.path_item()?;
/// # let _ = tree;
/// # Ok::<(), operon::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct HandlerGroup {
    dispatch: Option<Annotations>,
    methods: [Option<Annotations>; 8],
}

impl HandlerGroup {
    /// A group with every slot empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill the dispatcher slot.
    #[must_use]
    pub fn dispatch(mut self, meta: Annotations) -> Self {
        self.set_dispatch(meta);
        self
    }

    /// Fill the `get` slot.
    #[must_use]
    pub fn get(self, meta: Annotations) -> Self {
        self.operation(HttpMethod::Get, meta)
    }

    /// Fill the `post` slot.
    #[must_use]
    pub fn post(self, meta: Annotations) -> Self {
        self.operation(HttpMethod::Post, meta)
    }

    /// Fill the `put` slot.
    #[must_use]
    pub fn put(self, meta: Annotations) -> Self {
        self.operation(HttpMethod::Put, meta)
    }

    /// Fill the `delete` slot.
    #[must_use]
    pub fn delete(self, meta: Annotations) -> Self {
        self.operation(HttpMethod::Delete, meta)
    }

    /// Fill the `patch` slot.
    #[must_use]
    pub fn patch(self, meta: Annotations) -> Self {
        self.operation(HttpMethod::Patch, meta)
    }

    /// Fill the `head` slot.
    #[must_use]
    pub fn head(self, meta: Annotations) -> Self {
        self.operation(HttpMethod::Head, meta)
    }

    /// Fill the `options` slot.
    #[must_use]
    pub fn options(self, meta: Annotations) -> Self {
        self.operation(HttpMethod::Options, meta)
    }

    /// Fill the `trace` slot.
    #[must_use]
    pub fn trace(self, meta: Annotations) -> Self {
        self.operation(HttpMethod::Trace, meta)
    }

    /// Fill an arbitrary method slot.
    #[must_use]
    pub fn operation(mut self, method: HttpMethod, meta: Annotations) -> Self {
        self.set_operation(method, meta);
        self
    }

    /// Replace the dispatcher slot in place.
    pub fn set_dispatch(&mut self, meta: Annotations) {
        if self.dispatch.is_some() {
            warn!("Replaced existing dispatcher annotations");
        }
        self.dispatch = Some(meta);
    }

    /// Replace a method slot in place.
    pub fn set_operation(&mut self, method: HttpMethod, meta: Annotations) {
        let slot = &mut self.methods[method.index()];
        if slot.is_some() {
            warn!(method = %method, "Replaced existing handler annotations");
        }
        *slot = Some(meta);
    }

    /// The dispatcher slot's annotations, if filled.
    #[must_use]
    pub fn dispatcher(&self) -> Option<&Annotations> {
        self.dispatch.as_ref()
    }

    /// A method slot's annotations, if filled.
    #[must_use]
    pub fn get_operation(&self, method: HttpMethod) -> Option<&Annotations> {
        self.methods[method.index()].as_ref()
    }

    /// Present method slots, in canonical order.
    pub fn operations(&self) -> impl Iterator<Item = (HttpMethod, &Annotations)> {
        HttpMethod::ALL
            .into_iter()
            .filter_map(move |method| self.get_operation(method).map(|meta| (method, meta)))
    }

    /// Synthesize this group's Path Item tree.
    ///
    /// Convenience for [`build_path_item`](crate::spec::build_path_item).
    pub fn path_item(&self) -> Result<Map<String, Value>, Error> {
        crate::spec::build_path_item(self)
    }
}
