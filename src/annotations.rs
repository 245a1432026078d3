use serde_json::{Map, Value};

use crate::error::Error;
use crate::spec::SpecificObject;

/// Documentation metadata for one handler slot
///
/// Holds an ordered list of specific objects (parameters, responses, request
/// bodies) plus at most one declaration mapping of literal Operation fields
/// (`summary`, `tags`, …). Assembled with chained calls, then stored in a
/// [`HandlerGroup`](crate::HandlerGroup) slot and only read from there:
///
/// ```
/// use operon::{Annotations, Parameter, Response};
///
/// let meta = Annotations::new()
///     .specify(Parameter::query("paging"))
///     .specify(Response::new(200).description("OK"))
///     .declare([("summary", "List books")])?;
/// # Ok::<(), operon::Error>(())
/// ```
///
/// The specific-object list keeps application order: the first `specify`
/// call appears first. Synthesis traverses the list in reverse, which is
/// what makes earlier-specified objects win keyed merges (see
/// [`build_path_item`](crate::spec::build_path_item)).
#[derive(Debug, Clone, Default)]
pub struct Annotations {
    specifics: Vec<SpecificObject>,
    declaration: Option<Map<String, Value>>,
}

impl Annotations {
    /// An empty annotation set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a specific object. Pure append; never deduplicates.
    #[must_use]
    pub fn specify(mut self, object: impl Into<SpecificObject>) -> Self {
        self.specifics.push(object.into());
        self
    }

    /// Attach the slot's declaration mapping.
    ///
    /// Declaration keys are shallow-merged into the operation node last,
    /// overwriting any synthesized key of the same name. A slot accepts at
    /// most one declaration; a second call fails fast with
    /// [`Error::DuplicateDeclaration`] before any synthesis runs.
    pub fn declare<I, K, V>(mut self, fields: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        if self.declaration.is_some() {
            return Err(Error::DuplicateDeclaration);
        }
        let mapping = fields
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        self.declaration = Some(mapping);
        Ok(self)
    }

    /// The attached specific objects, in application order.
    #[must_use]
    pub fn specifics(&self) -> &[SpecificObject] {
        &self.specifics
    }

    /// The declaration mapping, if one was attached.
    #[must_use]
    pub fn declaration(&self) -> Option<&Map<String, Value>> {
        self.declaration.as_ref()
    }

    /// Whether this set carries neither specifics nor a declaration.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specifics.is_empty() && self.declaration.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{Parameter, RequestBody, Response};
    use serde_json::json;

    #[test]
    fn specify_keeps_application_order() {
        let meta = Annotations::new()
            .specify(Parameter::query("first"))
            .specify(Parameter::query("second"))
            .specify(Response::new(200));
        assert_eq!(meta.specifics().len(), 3);
        assert!(matches!(meta.specifics()[0], SpecificObject::Parameter(_)));
        assert!(matches!(meta.specifics()[2], SpecificObject::Response(_)));
    }

    #[test]
    fn declare_attaches_mapping() {
        let meta = Annotations::new()
            .declare([("summary", json!("List books")), ("deprecated", json!(true))])
            .unwrap();
        let declaration = meta.declaration().unwrap();
        assert_eq!(declaration.get("summary"), Some(&json!("List books")));
        assert_eq!(declaration.get("deprecated"), Some(&json!(true)));
    }

    #[test]
    fn second_declare_is_rejected() {
        let meta = Annotations::new().declare([("summary", "one")]).unwrap();
        let err = meta.declare([("summary", "two")]).unwrap_err();
        assert!(matches!(err, Error::DuplicateDeclaration));
    }

    #[test]
    fn duplicate_specifics_are_kept() {
        let meta = Annotations::new()
            .specify(RequestBody::new())
            .specify(RequestBody::new());
        assert_eq!(meta.specifics().len(), 2);
    }

    #[test]
    fn empty_set_reports_empty() {
        assert!(Annotations::new().is_empty());
        assert!(!Annotations::new().specify(Response::new(200)).is_empty());
        let declared = Annotations::new().declare([("summary", "s")]).unwrap();
        assert!(!declared.is_empty());
    }
}
