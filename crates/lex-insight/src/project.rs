//! Project metadata read from a YAML file.
//!
//! ```yaml
//! Project: LaLiga player statistics
//! Docker:
//!   Docker_Imges:
//!     - python:3.11-slim
//! ```
//!
//! The `Docker_Imges` key is spelled the way existing config files spell it.

use crate::error::{InsightError, Result, ResultExt};
use serde::Deserialize;
use serde_yaml::Value;
use std::path::Path;
use tracing::debug;

pub const UNKNOWN_PROJECT: &str = "Unknown Project";
pub const NO_DOCKER_IMAGES: &str = "No Docker Images specified";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectConfig {
    #[serde(rename = "Project", default)]
    project: Option<Value>,

    #[serde(rename = "Docker", default)]
    docker: Option<DockerSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct DockerSection {
    #[serde(rename = "Docker_Imges", default)]
    images: Option<Value>,
}

impl ProjectConfig {
    /// Read and parse a YAML project file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(InsightError::from)
            .context(format!("Reading {}", path.display()))?;
        debug!("Loaded project config from {}", path.display());
        Self::from_yaml(&content)
    }

    /// Parse YAML text. An empty document yields the defaults.
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str::<Option<Self>>(content)?.unwrap_or_default())
    }

    pub fn project_name(&self) -> String {
        self.project
            .as_ref()
            .and_then(render_value)
            .unwrap_or_else(|| UNKNOWN_PROJECT.to_string())
    }

    /// Docker images as one line; a list is joined with `, `.
    pub fn docker_images(&self) -> String {
        self.docker
            .as_ref()
            .and_then(|d| d.images.as_ref())
            .and_then(render_value)
            .unwrap_or_else(|| NO_DOCKER_IMAGES.to_string())
    }
}

/// Scalars and flat sequences as text; `null` counts as absent.
fn render_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Sequence(items) => Some(
            items
                .iter()
                .filter_map(render_value)
                .collect::<Vec<_>>()
                .join(", "),
        ),
        other => serde_yaml::to_string(other)
            .ok()
            .map(|s| s.trim_end().to_string()),
    }
}
