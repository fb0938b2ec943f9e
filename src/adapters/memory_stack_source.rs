use std::collections::BTreeMap;

use crate::domain::{AppError, StackError, StackLocation};
use crate::ports::StackSource;

/// In-memory stack source keyed by document name.
///
/// References are matched against document names after stripping a leading `./` and
/// trailing `/`; the namespace is flat, so `from` plays no part in resolution.
#[derive(Debug, Clone, Default)]
pub struct MemoryStackSource {
    documents: BTreeMap<String, String>,
}

impl MemoryStackSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a YAML document.
    pub fn with_document(mut self, name: &str, yaml: &str) -> Self {
        self.documents.insert(normalize(name).to_string(), yaml.to_string());
        self
    }
}

fn normalize(reference: &str) -> &str {
    let trimmed = reference.trim_end_matches('/');
    trimmed.strip_prefix("./").unwrap_or(trimmed)
}

impl StackSource for MemoryStackSource {
    fn resolve(
        &self,
        reference: &str,
        _from: Option<&StackLocation>,
    ) -> Result<StackLocation, AppError> {
        let name = normalize(reference);
        if self.documents.contains_key(name) {
            Ok(StackLocation::new(name))
        } else {
            Err(StackError::DocumentNotFound {
                reference: reference.to_string(),
                searched: format!("in-memory document '{}'", name),
            }
            .into())
        }
    }

    fn fetch(&self, location: &StackLocation) -> Result<serde_yaml::Value, AppError> {
        let content = self.documents.get(location.as_str()).ok_or_else(|| {
            StackError::DocumentNotFound {
                reference: location.to_string(),
                searched: format!("in-memory document '{}'", location),
            }
        })?;
        serde_yaml::from_str(content)
            .map_err(|e| StackError::malformed(location, e.to_string()).into())
    }
}
