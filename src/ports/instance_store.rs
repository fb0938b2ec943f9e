//! Instance registry port.

use crate::domain::{AppError, InstanceRecord};

/// Trait for recording deployed stack instances.
pub trait InstanceStore {
    /// All recorded instances sorted by name.
    fn list(&self) -> Result<Vec<InstanceRecord>, AppError>;

    fn get(&self, name: &str) -> Result<Option<InstanceRecord>, AppError>;

    /// Insert or replace the record with the same name.
    fn save(&self, record: InstanceRecord) -> Result<(), AppError>;

    /// Remove and return a record. `None` if absent.
    fn remove(&self, name: &str) -> Result<Option<InstanceRecord>, AppError>;
}
