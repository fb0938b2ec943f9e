use std::sync::Mutex;

use crate::domain::{AppError, InstanceRecord, InstanceRegistry};
use crate::ports::InstanceStore;

/// In-memory instance store for testing.
#[derive(Debug, Default)]
pub struct MockInstanceStore {
    registry: Mutex<InstanceRegistry>,
}

impl MockInstanceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InstanceStore for MockInstanceStore {
    fn list(&self) -> Result<Vec<InstanceRecord>, AppError> {
        Ok(self.registry.lock().unwrap().instances.clone())
    }

    fn get(&self, name: &str) -> Result<Option<InstanceRecord>, AppError> {
        Ok(self.registry.lock().unwrap().get(name).cloned())
    }

    fn save(&self, record: InstanceRecord) -> Result<(), AppError> {
        self.registry.lock().unwrap().upsert(record);
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<Option<InstanceRecord>, AppError> {
        Ok(self.registry.lock().unwrap().remove(name))
    }
}
