use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{AppError, StackError, StackLocation};
use crate::ports::StackSource;

/// File name looked up when a reference names a directory.
pub const STACK_FILE: &str = "stack.yaml";

/// Overlay file looked up next to the root stack document.
pub const OVERLAY_FILE: &str = "config.yaml";

/// Filesystem-based stack source reading YAML documents.
///
/// Relative references are resolved against the directory of the document that declared
/// them; the root reference against `base_dir`. Locations are canonical file paths.
#[derive(Debug, Clone)]
pub struct FilesystemStackSource {
    base_dir: PathBuf,
}

impl FilesystemStackSource {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// The `config.yaml` sitting next to a resolved stack document, if any.
    pub fn overlay_beside(location: &StackLocation) -> Option<PathBuf> {
        let candidate = Path::new(location.as_str()).parent()?.join(OVERLAY_FILE);
        candidate.is_file().then_some(candidate)
    }
}

impl StackSource for FilesystemStackSource {
    fn resolve(
        &self,
        reference: &str,
        from: Option<&StackLocation>,
    ) -> Result<StackLocation, AppError> {
        let base = match from {
            Some(location) => {
                Path::new(location.as_str()).parent().map(Path::to_path_buf).unwrap_or_default()
            }
            None => self.base_dir.clone(),
        };

        let mut candidate = base.join(reference);
        if candidate.is_dir() {
            candidate = candidate.join(STACK_FILE);
        }
        if !candidate.is_file() {
            return Err(StackError::DocumentNotFound {
                reference: reference.to_string(),
                searched: candidate.display().to_string(),
            }
            .into());
        }

        let canonical = fs::canonicalize(&candidate)?;
        Ok(StackLocation::new(canonical.display().to_string()))
    }

    fn fetch(&self, location: &StackLocation) -> Result<serde_yaml::Value, AppError> {
        let content = fs::read_to_string(location.as_str())?;
        serde_yaml::from_str(&content)
            .map_err(|e| StackError::malformed(location, e.to_string()).into())
    }
}
