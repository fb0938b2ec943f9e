use std::io;

use thiserror::Error;

use crate::domain::stack::StackError;

/// Library-wide error type for stack operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Stack resolution failed. Always fatal to the pass that raised it.
    #[error(transparent)]
    Stack(#[from] StackError),

    /// Component name is invalid.
    #[error(
        "Invalid component name '{0}': must be lowercase letters, digits and single hyphens, start with a letter, and never use 's' as a hyphen-separated part"
    )]
    InvalidComponentName(String),

    /// Instance name is invalid.
    #[error(
        "Invalid instance name '{0}': must be lowercase letters, digits and single hyphens, start with a letter, and never use 's' as a hyphen-separated part"
    )]
    InvalidInstanceName(String),

    /// No instance with this name has been recorded.
    #[error("Instance '{0}' not found")]
    InstanceNotFound(String),

    /// An instance with this name was already deployed from a different plan.
    #[error(
        "Instance '{name}' already exists with a different plan (recorded fingerprint {fingerprint})"
    )]
    InstanceExists { name: String, fingerprint: String },

    /// Parse error.
    #[error("Failed to parse {what}: {details}")]
    ParseError { what: String, details: String },

    /// Serialization error.
    #[error("Failed to serialize {what}: {details}")]
    Serialization { what: String, details: String },

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// Provide an `io::ErrorKind`-like view for callers that map errors onto exit codes.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Stack(StackError::DocumentNotFound { .. }) | AppError::InstanceNotFound(_) => {
                io::ErrorKind::NotFound
            }
            AppError::Stack(_)
            | AppError::Configuration(_)
            | AppError::InvalidComponentName(_)
            | AppError::InvalidInstanceName(_)
            | AppError::ParseError { .. }
            | AppError::TomlParseError(_) => io::ErrorKind::InvalidInput,
            AppError::InstanceExists { .. } => io::ErrorKind::AlreadyExists,
            AppError::Serialization { .. } => io::ErrorKind::Other,
        }
    }

    /// Borrow the resolution error, if this is one.
    pub fn as_stack_error(&self) -> Option<&StackError> {
        match self {
            AppError::Stack(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_document_maps_to_not_found() {
        let err = AppError::from(StackError::DocumentNotFound {
            reference: "./wp".into(),
            searched: "/tmp/wp/stack.yaml".into(),
        });
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn resolution_errors_are_invalid_input() {
        let err = AppError::from(StackError::UnknownOverlayPath { path: "lma.nope".into() });
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(err.to_string().contains("lma.nope"));
    }
}
