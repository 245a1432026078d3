use serde_json::{Map, Value};
use tracing::debug;

use crate::annotations::Annotations;
use crate::error::Error;
use crate::handlers::{HandlerGroup, HttpMethod};
use crate::spec::types::SpecificObject;

/// Synthesize an OpenAPI 3.0 Path Item tree from a handler group
///
/// Reads the group's dispatcher and method slots and merges their
/// annotations into one nested mapping, ready to embed as the value of a
/// `paths.<route>` entry. Handlers are never invoked; synthesis is a pure
/// function of the group's current state, so re-running it on an unmodified
/// group yields a structurally equal tree.
///
/// The merge runs in two phases. The dispatcher's specific objects are
/// traversed in reverse: parameters go to the path-level `parameters` array
/// (shared by every operation), responses and request bodies are deferred
/// into a method-common list. Then each present method slot, visited in
/// [`HttpMethod::ALL`] order, processes the common list followed by its own
/// objects in reverse: parameters append to the operation's `parameters`,
/// responses key into `responses` by status string with later entries
/// overwriting earlier ones, a request body overwrites any prior
/// `requestBody`. A declaration mapping merges into the operation node
/// last, key by key.
///
/// Note on precedence: because each slot's list is traversed in reverse and
/// keyed merges are last-write-wins, the *first* object attached to a
/// method beats both later attachments and any dispatcher-level object at
/// the same key. Method-level overrides of shared responses rely on this.
///
/// Schema references encountered along the way are compiled at this point;
/// the first compiler failure aborts synthesis with [`Error::Schema`].
/// Absent slots simply contribute nothing.
pub fn build_path_item(group: &HandlerGroup) -> Result<Map<String, Value>, Error> {
    let mut tree = Map::new();
    let mut method_common: Vec<&SpecificObject> = Vec::new();

    if let Some(dispatch) = group.dispatcher() {
        let mut shared_params = Vec::new();
        for object in dispatch.specifics().iter().rev() {
            match object {
                SpecificObject::Parameter(parameter) => {
                    shared_params.push(Value::Object(parameter.spec()?));
                }
                deferred => method_common.push(deferred),
            }
        }
        debug!(
            shared_parameters = shared_params.len(),
            deferred = method_common.len(),
            "Processed dispatcher annotations"
        );
        if !shared_params.is_empty() {
            tree.insert("parameters".to_string(), Value::Array(shared_params));
        }
        // Declarations only apply to operation nodes; the dispatcher has none.
        if dispatch.declaration().is_some() {
            debug!("Ignoring declaration on dispatcher slot");
        }
    }

    for method in HttpMethod::ALL {
        let Some(meta) = group.get_operation(method) else {
            continue;
        };
        let node = build_operation(method, meta, &method_common)?;
        if !node.is_empty() {
            tree.insert(method.as_str().to_string(), Value::Object(node));
        }
    }

    Ok(tree)
}

fn build_operation(
    method: HttpMethod,
    meta: &Annotations,
    method_common: &[&SpecificObject],
) -> Result<Map<String, Value>, Error> {
    let mut parameters = Vec::new();
    let mut responses = Map::new();
    let mut request_body = None;

    let combined = method_common
        .iter()
        .copied()
        .chain(meta.specifics().iter().rev());
    for object in combined {
        match object {
            SpecificObject::Parameter(parameter) => {
                parameters.push(Value::Object(parameter.spec()?));
            }
            SpecificObject::Response(response) => {
                // Last processed for a status code wins.
                responses.insert(
                    response.status().to_string(),
                    Value::Object(response.spec()?),
                );
            }
            SpecificObject::RequestBody(body) => {
                request_body = Some(body.spec()?);
            }
        }
    }

    let mut node = Map::new();
    if !parameters.is_empty() {
        node.insert("parameters".to_string(), Value::Array(parameters));
    }
    if !responses.is_empty() {
        node.insert("responses".to_string(), Value::Object(responses));
    }
    if let Some(body) = request_body {
        node.insert("requestBody".to_string(), Value::Object(body));
    }
    if let Some(declaration) = meta.declaration() {
        for (key, value) in declaration {
            node.insert(key.clone(), value.clone());
        }
    }

    debug!(method = %method, keys = node.len(), "Built operation node");
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{MediaType, Parameter, RequestBody, Response};
    use serde_json::json;

    fn tree(group: &HandlerGroup) -> Value {
        Value::Object(build_path_item(group).unwrap())
    }

    #[test]
    fn empty_group_yields_empty_tree() {
        let group = HandlerGroup::new();
        assert_eq!(tree(&group), json!({}));
    }

    #[test]
    fn single_method_with_parameter_and_response() {
        let group = HandlerGroup::new().get(
            Annotations::new()
                .specify(Parameter::query("id"))
                .specify(Response::new(200).description("OK")),
        );
        assert_eq!(
            tree(&group),
            json!({
                "get": {
                    "parameters": [{ "name": "id", "in": "query" }],
                    "responses": { "200": { "description": "OK" } },
                }
            })
        );
    }

    #[test]
    fn dispatcher_parameters_stay_at_path_level() {
        let group = HandlerGroup::new()
            .dispatch(Annotations::new().specify(Parameter::path("id")))
            .get(Annotations::new().specify(Response::new(200).description("OK")));
        assert_eq!(
            tree(&group),
            json!({
                "parameters": [{ "name": "id", "in": "path", "required": true }],
                "get": {
                    "responses": { "200": { "description": "OK" } },
                }
            })
        );
    }

    #[test]
    fn dispatcher_responses_replay_into_each_method() {
        let group = HandlerGroup::new()
            .dispatch(Annotations::new().specify(Response::new(404)))
            .get(Annotations::new().specify(Response::new(200).description("OK")))
            .post(Annotations::new());
        let built = tree(&group);
        assert_eq!(
            built["get"]["responses"],
            json!({
                "200": { "description": "OK" },
                "404": { "description": "Not Found" },
            })
        );
        // A bare slot still picks up the shared response.
        assert_eq!(
            built["post"]["responses"],
            json!({ "404": { "description": "Not Found" } })
        );
    }

    #[test]
    fn first_specified_response_wins_the_status_key() {
        let group = HandlerGroup::new().get(
            Annotations::new()
                .specify(Response::new(200).description("first"))
                .specify(Response::new(200).description("second")),
        );
        // Reverse traversal processes "second" then "first"; last write wins.
        assert_eq!(
            tree(&group)["get"]["responses"]["200"],
            json!({ "description": "first" })
        );
    }

    #[test]
    fn method_response_overrides_dispatcher_response() {
        let group = HandlerGroup::new()
            .dispatch(Annotations::new().specify(Response::new(404).description("shared")))
            .get(Annotations::new().specify(Response::new(404).description("own")));
        assert_eq!(
            tree(&group)["get"]["responses"]["404"],
            json!({ "description": "own" })
        );
    }

    #[test]
    fn earlier_request_body_replaces_later_one() {
        let group = HandlerGroup::new().post(
            Annotations::new()
                .specify(RequestBody::new().description("first"))
                .specify(RequestBody::new().description("second")),
        );
        assert_eq!(
            tree(&group)["post"]["requestBody"],
            json!({ "content": {}, "description": "first" })
        );
    }

    #[test]
    fn declaration_merges_over_built_keys() {
        let group = HandlerGroup::new().get(
            Annotations::new()
                .specify(Response::new(200))
                .declare([
                    ("summary", json!("List books")),
                    ("responses", json!("overridden")),
                ])
                .unwrap(),
        );
        let node = &tree(&group)["get"];
        assert_eq!(node["summary"], json!("List books"));
        assert_eq!(node["responses"], json!("overridden"));
    }

    #[test]
    fn declaration_alone_forms_the_node() {
        let group = HandlerGroup::new().put(
            Annotations::new()
                .declare([("summary", "Replace a book")])
                .unwrap(),
        );
        assert_eq!(
            tree(&group),
            json!({ "put": { "summary": "Replace a book" } })
        );
    }

    #[test]
    fn empty_method_slot_contributes_nothing() {
        let group = HandlerGroup::new()
            .get(Annotations::new())
            .post(Annotations::new().specify(Response::new(201)));
        let built = tree(&group);
        assert!(built.get("get").is_none());
        assert!(built.get("post").is_some());
    }

    #[test]
    fn dispatcher_declaration_is_ignored() {
        let group = HandlerGroup::new()
            .dispatch(
                Annotations::new()
                    .specify(Parameter::path("id"))
                    .declare([("summary", "never lands")])
                    .unwrap(),
            )
            .get(Annotations::new().specify(Response::new(200)));
        let built = tree(&group);
        assert!(built.get("summary").is_none());
        assert!(built["get"].get("summary").is_none());
    }

    #[test]
    fn parameters_append_in_reverse_specify_order() {
        let group = HandlerGroup::new().get(
            Annotations::new()
                .specify(Parameter::query("first"))
                .specify(Parameter::query("second")),
        );
        assert_eq!(
            tree(&group)["get"]["parameters"],
            json!([
                { "name": "second", "in": "query" },
                { "name": "first", "in": "query" },
            ])
        );
    }

    #[test]
    fn request_body_content_carries_schema() {
        let group = HandlerGroup::new().post(
            Annotations::new().specify(
                RequestBody::new()
                    .content(
                        "application/json",
                        MediaType::with_schema(json!({ "type": "object" })),
                    )
                    .required(true),
            ),
        );
        assert_eq!(
            tree(&group)["post"]["requestBody"],
            json!({
                "content": { "application/json": { "schema": { "type": "object" } } },
                "required": true,
            })
        );
    }

    #[test]
    fn schema_failure_aborts_synthesis() {
        let schema = crate::SchemaRef::from_fn(|| Err("boom".into()));
        let group = HandlerGroup::new()
            .get(Annotations::new().specify(Parameter::query("q").schema(schema)));
        let err = build_path_item(&group).unwrap_err();
        assert!(matches!(err, Error::Schema(_)));
    }
}
