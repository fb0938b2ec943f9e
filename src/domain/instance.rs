//! Deployed instance records.

use serde::{Deserialize, Serialize};

use crate::domain::plan::DeploymentPlan;
use crate::domain::{AppError, InstanceName};

/// A stack instance recorded at deploy time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct InstanceRecord {
    pub name: String,
    /// Name of the root stack the instance was deployed from.
    pub stack: String,
    /// RFC 3339 timestamp.
    pub deployed_at: String,
    pub fingerprint: String,
    pub plan: DeploymentPlan,
}

impl InstanceRecord {
    /// Record `plan` under `name`, stamped with the current time.
    pub fn new(name: &InstanceName, plan: DeploymentPlan) -> Result<Self, AppError> {
        let fingerprint = plan.fingerprint()?;
        Ok(Self {
            name: name.to_string(),
            stack: plan.stack.clone(),
            deployed_at: chrono::Utc::now().to_rfc3339(),
            fingerprint,
            plan,
        })
    }
}

/// On-disk shape of the instance registry (`instances.yaml`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstanceRegistry {
    #[serde(default)]
    pub instances: Vec<InstanceRecord>,
}

impl InstanceRegistry {
    pub fn get(&self, name: &str) -> Option<&InstanceRecord> {
        self.instances.iter().find(|record| record.name == name)
    }

    /// Insert or replace the record with the same name, keeping the list sorted by name.
    pub fn upsert(&mut self, record: InstanceRecord) {
        self.instances.retain(|existing| existing.name != record.name);
        self.instances.push(record);
        self.instances.sort_by(|a, b| a.name.cmp(&b.name));
    }

    pub fn remove(&mut self, name: &str) -> Option<InstanceRecord> {
        let index = self.instances.iter().position(|record| record.name == name)?;
        Some(self.instances.remove(index))
    }
}

/// Parse registry content. Empty content is an empty registry.
pub fn parse_registry_content(content: &str) -> Result<InstanceRegistry, AppError> {
    if content.trim().is_empty() {
        return Ok(InstanceRegistry::default());
    }
    serde_yaml::from_str(content)
        .map_err(|e| AppError::ParseError { what: "instances.yaml".into(), details: e.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(stack: &str) -> DeploymentPlan {
        DeploymentPlan { stack: stack.into(), units: vec![], relations: vec![] }
    }

    fn record(name: &str) -> InstanceRecord {
        InstanceRecord::new(&InstanceName::new(name).unwrap(), plan("site")).unwrap()
    }

    #[test]
    fn new_record_carries_fingerprint() {
        let record = record("prod");
        assert_eq!(record.stack, "site");
        assert_eq!(record.fingerprint, plan("site").fingerprint().unwrap());
        assert!(chrono::DateTime::parse_from_rfc3339(&record.deployed_at).is_ok());
    }

    #[test]
    fn upsert_replaces_and_sorts() {
        let mut registry = InstanceRegistry::default();
        registry.upsert(record("zeta"));
        registry.upsert(record("alpha"));
        registry.upsert(record("zeta"));

        let names: Vec<_> = registry.instances.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn remove_returns_record() {
        let mut registry = InstanceRegistry::default();
        registry.upsert(record("alpha"));

        assert!(registry.remove("alpha").is_some());
        assert!(registry.remove("alpha").is_none());
        assert!(registry.get("alpha").is_none());
    }

    #[test]
    fn empty_content_parses() {
        assert_eq!(parse_registry_content("").unwrap(), InstanceRegistry::default());
    }

    #[test]
    fn garbage_content_fails() {
        assert!(matches!(
            parse_registry_content("instances: 3"),
            Err(AppError::ParseError { what, .. }) if what == "instances.yaml"
        ));
    }
}
