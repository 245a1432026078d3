use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::{info, warn};

use crate::error::Error;
use crate::handlers::HandlerGroup;

/// OpenAPI version stamped on every document.
const OPENAPI_VERSION: &str = "3.0.3";

/// OpenAPI Info Object carried in the document header.
#[derive(Debug, Clone, Serialize)]
pub struct Info {
    pub title: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A complete OpenAPI 3.0 document assembled from handler groups
///
/// Wraps synthesized Path Item trees under `paths` with the standard
/// `openapi`/`info` header, for callers that want a whole document rather
/// than embedding fragments into their own pipeline.
///
/// ```
/// use operon::{Annotations, Document, HandlerGroup, Response};
///
/// let health = HandlerGroup::new()
///     .get(Annotations::new().specify(Response::new(200).description("alive")));
/// let doc = Document::new("Status API", "1.0.0").path("/health", &health)?;
/// let yaml = doc.to_yaml_string()?;
/// # let _ = yaml;
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    info: Info,
    paths: Map<String, Value>,
}

impl Document {
    /// Start a document with the mandatory Info fields.
    #[must_use]
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            info: Info {
                title: title.into(),
                version: version.into(),
                description: None,
            },
            paths: Map::new(),
        }
    }

    /// Attach a description to the Info Object.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.info.description = Some(description.into());
        self
    }

    /// Synthesize a handler group and store its tree under `paths.<route>`.
    ///
    /// Synthesis runs eagerly here; schema compilation failures surface
    /// immediately rather than at serialization time. Adding the same route
    /// twice replaces the stored tree.
    pub fn path(mut self, route: impl Into<String>, group: &HandlerGroup) -> Result<Self, Error> {
        let route = route.into();
        let tree = Value::Object(group.path_item()?);
        if self.paths.contains_key(&route) {
            warn!(route = %route, "Replaced existing path entry");
        }
        self.paths.insert(route, tree);
        Ok(self)
    }

    /// The full document tree.
    #[must_use]
    pub fn spec(&self) -> Value {
        json!({
            "openapi": OPENAPI_VERSION,
            "info": self.info,
            "paths": self.paths,
        })
    }

    /// Render the document as pretty-printed JSON.
    pub fn to_json_string(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(&self.spec()).context("serialize OpenAPI document to JSON")
    }

    /// Render the document as YAML.
    pub fn to_yaml_string(&self) -> anyhow::Result<String> {
        serde_yaml::to_string(&self.spec()).context("serialize OpenAPI document to YAML")
    }

    /// Write the document to disk.
    ///
    /// `.yaml` and `.yml` paths get YAML; anything else gets JSON.
    pub fn write(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let is_yaml = path
            .extension()
            .is_some_and(|ext| ext == "yaml" || ext == "yml");
        let rendered = if is_yaml {
            self.to_yaml_string()?
        } else {
            self.to_json_string()?
        };
        std::fs::write(path, rendered)
            .with_context(|| format!("write OpenAPI document to {}", path.display()))?;
        info!(path = %path.display(), "Wrote OpenAPI document");
        Ok(())
    }
}
