/// Stack resolution error.
///
/// Every variant represents invalid input rather than a transient condition, so none
/// of them is retried and no partial plan is produced once one is raised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StackError {
    #[error("Malformed stack specification at {location}: {reason}")]
    MalformedSpec { location: String, reason: String },

    #[error("Stack document '{reference}' not found (looked for {searched})")]
    DocumentNotFound { reference: String, searched: String },

    #[error("Cyclic stack inclusion at '{path}': {cycle}")]
    CyclicInclusion { path: String, cycle: String },

    #[error("Overlay references unknown component path '{path}'")]
    UnknownOverlayPath { path: String },

    #[error("Cyclic endpoint forward: {chain}")]
    CyclicForward { chain: String },

    #[error("Dangling endpoint forward {chain}: {reason}")]
    DanglingForward { chain: String, reason: String },

    #[error("Unresolvable relation endpoint '{endpoint}' declared in '{node}': {reason}")]
    UnresolvableRelationEndpoint { node: String, endpoint: String, reason: String },
}

impl StackError {
    pub(crate) fn malformed(location: impl std::fmt::Display, reason: impl Into<String>) -> Self {
        StackError::MalformedSpec { location: location.to_string(), reason: reason.into() }
    }
}
