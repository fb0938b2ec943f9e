//! Stack document source port.
//!
//! Resolves the references written in `stack:` component entries to documents and hands
//! them to the loader as generic YAML trees. Loading never writes through this port.

use crate::domain::{AppError, StackLocation};

pub trait StackSource {
    /// Resolve `reference` as written in the document at `from` (or as given by the caller
    /// for the root, when `from` is `None`).
    ///
    /// Fails with `StackError::DocumentNotFound` when nothing exists at the reference.
    fn resolve(&self, reference: &str, from: Option<&StackLocation>)
    -> Result<StackLocation, AppError>;

    /// Fetch and parse the document at a resolved location.
    fn fetch(&self, location: &StackLocation) -> Result<serde_yaml::Value, AppError>;
}
