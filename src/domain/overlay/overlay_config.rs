//! Overlay document model and parser (`config.yaml`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::AppError;

/// Execution context assignments keyed by dotted component path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Overlay {
    /// Context for everything not covered by a path entry.
    #[serde(default)]
    pub default_model: Option<String>,
    #[serde(default)]
    pub components: BTreeMap<String, ComponentOverlay>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentOverlay {
    #[serde(default)]
    pub model: Option<String>,
}

impl Overlay {
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = Some(model.into());
        self
    }

    pub fn with_model(mut self, path: impl Into<String>, model: impl Into<String>) -> Self {
        self.components.insert(path.into(), ComponentOverlay { model: Some(model.into()) });
        self
    }

    /// Explicit model for `path`, if the overlay sets one.
    pub fn model_for(&self, path: &str) -> Option<&str> {
        self.components.get(path).and_then(|entry| entry.model.as_deref())
    }
}

/// Parse overlay content. Empty content is an empty overlay.
pub fn parse_overlay_content(content: &str) -> Result<Overlay, AppError> {
    if content.trim().is_empty() {
        return Ok(Overlay::default());
    }
    serde_yaml::from_str(content)
        .map_err(|e| AppError::ParseError { what: "overlay".into(), details: e.to_string() })
}
