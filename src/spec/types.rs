use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::Error;
use crate::schema::SchemaRef;

/// Where a parameter is carried on the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterLocation {
    Query,
    Path,
    Header,
    Cookie,
}

impl ParameterLocation {
    /// The OpenAPI `in` field value for this location.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Query => "query",
            ParameterLocation::Path => "path",
            ParameterLocation::Header => "header",
            ParameterLocation::Cookie => "cookie",
        }
    }
}

impl std::fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One OpenAPI Parameter Object attached to a handler slot
///
/// Attached to a method slot it lands in that operation's `parameters`
/// array; attached to the dispatcher it lands in the path-level array shared
/// by every operation. Names should be unique within the list they end up
/// in; the crate appends without deduplicating.
#[derive(Debug, Clone)]
pub struct Parameter {
    name: String,
    location: ParameterLocation,
    required: bool,
    schema: Option<SchemaRef>,
    description: Option<String>,
}

impl Parameter {
    /// Create a parameter with an explicit location. `required` starts false.
    pub fn new(name: impl Into<String>, location: ParameterLocation) -> Self {
        Self {
            name: name.into(),
            location,
            required: false,
            schema: None,
            description: None,
        }
    }

    /// Create a query parameter.
    pub fn query(name: impl Into<String>) -> Self {
        Self::new(name, ParameterLocation::Query)
    }

    /// Create a path parameter.
    ///
    /// OpenAPI requires path parameters to be marked required, so this
    /// constructor sets the flag. Callers constructing path parameters via
    /// [`Parameter::new`] are responsible for setting it themselves.
    pub fn path(name: impl Into<String>) -> Self {
        Self::new(name, ParameterLocation::Path).required(true)
    }

    /// Create a header parameter.
    pub fn header(name: impl Into<String>) -> Self {
        Self::new(name, ParameterLocation::Header)
    }

    /// Create a cookie parameter.
    pub fn cookie(name: impl Into<String>) -> Self {
        Self::new(name, ParameterLocation::Cookie)
    }

    /// Mark the parameter required (or not).
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Attach a schema reference, compiled lazily at synthesis time.
    #[must_use]
    pub fn schema(mut self, schema: impl Into<SchemaRef>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Attach a human-readable description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Build this parameter's Parameter Object mapping.
    ///
    /// Emits `name` and `in` always, `schema` when a reference is attached
    /// (compiling it now), `required` only when true, and `description`
    /// when present.
    pub fn spec(&self) -> Result<Map<String, Value>, Error> {
        let mut rv = Map::new();
        rv.insert("name".to_string(), Value::String(self.name.clone()));
        rv.insert("in".to_string(), Value::String(self.location.as_str().to_string()));
        if let Some(schema) = &self.schema {
            let compiled = schema.compile().map_err(Error::Schema)?;
            rv.insert("schema".to_string(), compiled);
        }
        if self.required {
            rv.insert("required".to_string(), Value::Bool(true));
        }
        if let Some(description) = &self.description {
            rv.insert("description".to_string(), Value::String(description.clone()));
        }
        Ok(rv)
    }
}

/// One OpenAPI Media Type Object: an optional schema for a content type.
#[derive(Debug, Clone, Default)]
pub struct MediaType {
    schema: Option<SchemaRef>,
}

impl MediaType {
    /// A media type with no schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A media type carrying a schema reference.
    pub fn with_schema(schema: impl Into<SchemaRef>) -> Self {
        Self {
            schema: Some(schema.into()),
        }
    }

    /// Build this media type's mapping: empty, or `{"schema": …}`.
    pub fn spec(&self) -> Result<Map<String, Value>, Error> {
        let mut rv = Map::new();
        if let Some(schema) = &self.schema {
            let compiled = schema.compile().map_err(Error::Schema)?;
            rv.insert("schema".to_string(), compiled);
        }
        Ok(rv)
    }
}

/// One OpenAPI Response Object keyed by its status code
///
/// In the output tree responses are keyed by status as a string; a later
/// response processed for the same status replaces the earlier one.
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    content: BTreeMap<String, MediaType>,
    description: Option<String>,
}

impl Response {
    /// Create a response for a status code.
    #[must_use]
    pub fn new(status: u16) -> Self {
        Self {
            status,
            content: BTreeMap::new(),
            description: None,
        }
    }

    /// The status code this response documents.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Attach a description, replacing the reason-phrase default.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach a media type under a content type. Repeated calls accumulate.
    #[must_use]
    pub fn content(mut self, content_type: impl Into<String>, media_type: MediaType) -> Self {
        self.content.insert(content_type.into(), media_type);
        self
    }

    /// Build this response's Response Object mapping.
    ///
    /// `description` is always present: the explicit one, else the standard
    /// reason phrase for the status, else the bare status number. `content`
    /// appears only when at least one media type is attached.
    pub fn spec(&self) -> Result<Map<String, Value>, Error> {
        let description = match &self.description {
            Some(text) => text.clone(),
            None => reason_phrase(self.status),
        };
        let mut rv = Map::new();
        rv.insert("description".to_string(), Value::String(description));
        if !self.content.is_empty() {
            rv.insert("content".to_string(), content_spec(&self.content)?);
        }
        Ok(rv)
    }
}

/// One OpenAPI Request Body Object
///
/// At most one applies per operation; a later request body processed for the
/// same method replaces the earlier one.
#[derive(Debug, Clone, Default)]
pub struct RequestBody {
    content: BTreeMap<String, MediaType>,
    description: Option<String>,
    required: bool,
}

impl RequestBody {
    /// Create an empty request body. `required` starts false.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a media type under a content type. Repeated calls accumulate.
    #[must_use]
    pub fn content(mut self, content_type: impl Into<String>, media_type: MediaType) -> Self {
        self.content.insert(content_type.into(), media_type);
        self
    }

    /// Attach a human-readable description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark the body required (or not).
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Build this request body's mapping.
    ///
    /// `content` is always present (even when empty), `description` when
    /// set, and `required` only when true.
    pub fn spec(&self) -> Result<Map<String, Value>, Error> {
        let mut rv = Map::new();
        rv.insert("content".to_string(), content_spec(&self.content)?);
        if let Some(description) = &self.description {
            rv.insert("description".to_string(), Value::String(description.clone()));
        }
        if self.required {
            rv.insert("required".to_string(), Value::Bool(true));
        }
        Ok(rv)
    }
}

/// A unit of documentation metadata attached to one handler slot
///
/// Closed over the three fragment kinds the synthesizer understands, so the
/// merge match is exhaustive by construction. Constructed via the `From`
/// impls; [`Annotations::specify`](crate::Annotations::specify) accepts any
/// of the three directly.
#[derive(Debug, Clone)]
pub enum SpecificObject {
    Parameter(Parameter),
    Response(Response),
    RequestBody(RequestBody),
}

impl From<Parameter> for SpecificObject {
    fn from(parameter: Parameter) -> Self {
        SpecificObject::Parameter(parameter)
    }
}

impl From<Response> for SpecificObject {
    fn from(response: Response) -> Self {
        SpecificObject::Response(response)
    }
}

impl From<RequestBody> for SpecificObject {
    fn from(body: RequestBody) -> Self {
        SpecificObject::RequestBody(body)
    }
}

fn content_spec(content: &BTreeMap<String, MediaType>) -> Result<Value, Error> {
    let mut rv = Map::new();
    for (content_type, media_type) in content {
        rv.insert(content_type.clone(), Value::Object(media_type.spec()?));
    }
    Ok(Value::Object(rv))
}

fn reason_phrase(status: u16) -> String {
    http::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .map(str::to_string)
        .unwrap_or_else(|| status.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parameter_spec_minimal() {
        let spec = Parameter::query("id").spec().unwrap();
        assert_eq!(Value::Object(spec), json!({ "name": "id", "in": "query" }));
    }

    #[test]
    fn parameter_spec_full() {
        let spec = Parameter::path("book_id")
            .schema(json!({ "type": "string" }))
            .description("Book identifier")
            .spec()
            .unwrap();
        assert_eq!(
            Value::Object(spec),
            json!({
                "name": "book_id",
                "in": "path",
                "schema": { "type": "string" },
                "required": true,
                "description": "Book identifier",
            })
        );
    }

    #[test]
    fn parameter_required_false_is_omitted() {
        let spec = Parameter::query("page").required(false).spec().unwrap();
        assert!(!spec.contains_key("required"));
    }

    #[test]
    fn path_constructor_defaults_required() {
        let spec = Parameter::path("id").spec().unwrap();
        assert_eq!(spec.get("required"), Some(&json!(true)));
    }

    #[test]
    fn response_description_defaults_to_reason_phrase() {
        let spec = Response::new(404).spec().unwrap();
        assert_eq!(Value::Object(spec), json!({ "description": "Not Found" }));
    }

    #[test]
    fn response_unknown_status_falls_back_to_number() {
        let spec = Response::new(599).spec().unwrap();
        assert_eq!(spec.get("description"), Some(&json!("599")));
    }

    #[test]
    fn response_empty_content_is_omitted() {
        let spec = Response::new(204).spec().unwrap();
        assert!(!spec.contains_key("content"));
    }

    #[test]
    fn response_content_carries_media_types() {
        let spec = Response::new(200)
            .description("OK")
            .content(
                "application/json",
                MediaType::with_schema(json!({ "type": "object" })),
            )
            .spec()
            .unwrap();
        assert_eq!(
            Value::Object(spec),
            json!({
                "description": "OK",
                "content": {
                    "application/json": { "schema": { "type": "object" } },
                },
            })
        );
    }

    #[test]
    fn request_body_content_always_present() {
        let spec = RequestBody::new().spec().unwrap();
        assert_eq!(Value::Object(spec), json!({ "content": {} }));
    }

    #[test]
    fn request_body_required_false_is_omitted() {
        let spec = RequestBody::new()
            .content("application/json", MediaType::new())
            .spec()
            .unwrap();
        assert_eq!(
            Value::Object(spec),
            json!({ "content": { "application/json": {} } })
        );
    }

    #[test]
    fn request_body_full() {
        let spec = RequestBody::new()
            .content(
                "application/json",
                MediaType::with_schema(json!({ "type": "object" })),
            )
            .description("New book payload")
            .required(true)
            .spec()
            .unwrap();
        assert_eq!(
            Value::Object(spec),
            json!({
                "content": {
                    "application/json": { "schema": { "type": "object" } },
                },
                "description": "New book payload",
                "required": true,
            })
        );
    }

    #[test]
    fn media_type_without_schema_is_empty() {
        let spec = MediaType::new().spec().unwrap();
        assert!(spec.is_empty());
    }

    #[test]
    fn schema_failure_propagates_from_parameter() {
        let schema = crate::SchemaRef::from_fn(|| Err("no compiler".into()));
        let err = Parameter::query("q").schema(schema).spec().unwrap_err();
        assert!(matches!(err, Error::Schema(_)));
    }

    #[test]
    fn location_strings() {
        assert_eq!(ParameterLocation::Query.as_str(), "query");
        assert_eq!(ParameterLocation::Path.as_str(), "path");
        assert_eq!(ParameterLocation::Header.as_str(), "header");
        assert_eq!(ParameterLocation::Cookie.as_str(), "cookie");
    }
}
