use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::instance::{InstanceRegistry, parse_registry_content};
use crate::domain::{AppError, InstanceRecord};
use crate::ports::InstanceStore;

/// Filesystem-based instance store backed by a single YAML registry file.
#[derive(Debug, Clone)]
pub struct YamlInstanceStore {
    path: PathBuf,
}

impl YamlInstanceStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<InstanceRegistry, AppError> {
        if !self.path.exists() {
            return Ok(InstanceRegistry::default());
        }
        let content = fs::read_to_string(&self.path)?;
        parse_registry_content(&content)
    }

    fn store(&self, registry: &InstanceRegistry) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(registry).map_err(|e| AppError::Serialization {
            what: "instances.yaml".into(),
            details: e.to_string(),
        })?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl InstanceStore for YamlInstanceStore {
    fn list(&self) -> Result<Vec<InstanceRecord>, AppError> {
        Ok(self.load()?.instances)
    }

    fn get(&self, name: &str) -> Result<Option<InstanceRecord>, AppError> {
        Ok(self.load()?.get(name).cloned())
    }

    fn save(&self, record: InstanceRecord) -> Result<(), AppError> {
        let mut registry = self.load()?;
        registry.upsert(record);
        self.store(&registry)
    }

    fn remove(&self, name: &str) -> Result<Option<InstanceRecord>, AppError> {
        let mut registry = self.load()?;
        let removed = registry.remove(name);
        if removed.is_some() {
            self.store(&registry)?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DeploymentPlan, InstanceName};
    use tempfile::tempdir;

    fn record(name: &str) -> InstanceRecord {
        let plan = DeploymentPlan { stack: "site".into(), units: vec![], relations: vec![] };
        InstanceRecord::new(&InstanceName::new(name).unwrap(), plan).unwrap()
    }

    #[test]
    fn missing_file_is_empty_registry() {
        let temp = tempdir().unwrap();
        let store = YamlInstanceStore::new(temp.path().join("instances.yaml"));

        assert!(store.list().unwrap().is_empty());
        assert!(store.get("prod").unwrap().is_none());
    }

    #[test]
    fn save_creates_parent_directories_and_round_trips() {
        let temp = tempdir().unwrap();
        let store = YamlInstanceStore::new(temp.path().join("nested/data/instances.yaml"));

        store.save(record("prod")).unwrap();
        store.save(record("dev")).unwrap();

        assert!(store.path().exists());
        let names: Vec<_> = store.list().unwrap().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["dev", "prod"]);
        assert_eq!(store.get("prod").unwrap().unwrap().stack, "site");
    }

    #[test]
    fn remove_returns_record_once() {
        let temp = tempdir().unwrap();
        let store = YamlInstanceStore::new(temp.path().join("instances.yaml"));
        store.save(record("prod")).unwrap();

        assert!(store.remove("prod").unwrap().is_some());
        assert!(store.remove("prod").unwrap().is_none());
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn corrupt_registry_is_parse_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("instances.yaml");
        fs::write(&path, "instances: {not: [a, list\n").unwrap();
        let store = YamlInstanceStore::new(path);

        assert!(matches!(store.list(), Err(AppError::ParseError { .. })));
    }
}
