//! Bookstore demo: annotate two handler groups and print the assembled
//! OpenAPI document as YAML.
//!
//! Run with `cargo run --example bookstore`. Set `RUST_LOG=debug` to watch
//! synthesis progress.

use anyhow::Result;
use operon::{
    Annotations, Document, HandlerGroup, MediaType, Parameter, RequestBody, Response,
};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

fn book_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "id": { "type": "integer" },
            "name": { "type": "string" },
            "author": { "type": "string" },
        },
        "required": ["id", "name", "author"],
    })
}

fn new_book_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "name": { "type": "string" },
            "author": { "type": "string" },
        },
        "required": ["name", "author"],
    })
}

fn paging_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "page": { "type": "integer", "minimum": 1 },
            "page_size": { "type": "integer", "minimum": 1 },
        },
        "required": ["page", "page_size"],
    })
}

fn book_page_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "items": { "type": "array", "items": book_schema() },
            "count": { "type": "integer" },
        },
        "required": ["items", "count"],
    })
}

/// `/books`: list and create.
fn book_list() -> Result<HandlerGroup> {
    let get = Annotations::new()
        .specify(
            Parameter::query("paging")
                .schema(paging_schema())
                .description("Paging parameters"),
        )
        .specify(
            Response::new(200)
                .content("application/json", MediaType::with_schema(book_page_schema())),
        )
        .declare([("summary", "Get book list")])?;
    let post = Annotations::new()
        .specify(
            Response::new(201).content("application/json", MediaType::with_schema(book_schema())),
        )
        .specify(
            RequestBody::new()
                .content("application/json", MediaType::with_schema(new_book_schema()))
                .description("Book information")
                .required(true),
        );
    Ok(HandlerGroup::new().get(get).post(post))
}

/// `/books/{id}`: the dispatcher carries the path parameter and the shared
/// 404, so every method documents them without repeating itself.
fn book_detail() -> HandlerGroup {
    HandlerGroup::new()
        .dispatch(
            Annotations::new()
                .specify(Parameter::path("id").schema(json!({ "type": "integer" })))
                .specify(Response::new(404).description("Book is not found")),
        )
        .get(
            Annotations::new().specify(
                Response::new(200)
                    .content("application/json", MediaType::with_schema(book_schema())),
            ),
        )
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let doc = Document::new("Bookstore API", "0.1")
        .path("/books", &book_list()?)?
        .path("/books/{id}", &book_detail())?;
    println!("{}", doc.to_yaml_string()?);
    Ok(())
}
