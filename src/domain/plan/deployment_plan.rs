//! The flat deployment plan handed to a deployment controller.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::AppError;

/// One deployable leaf unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LeafUnit {
    /// Dotted path of the charm component from the root stack.
    pub name: String,
    pub charm: String,
    pub model: String,
    pub units: u32,
    pub trust: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub config: BTreeMap<String, serde_yaml::Value>,
}

/// `unit:endpoint` on a leaf unit. Serialized as that string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlanEndpoint {
    pub unit: String,
    pub endpoint: String,
}

impl PlanEndpoint {
    pub fn new(unit: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self { unit: unit.into(), endpoint: endpoint.into() }
    }
}

impl fmt::Display for PlanEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.unit, self.endpoint)
    }
}

impl TryFrom<String> for PlanEndpoint {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.split_once(':') {
            Some((unit, endpoint)) if !unit.is_empty() && !endpoint.is_empty() => {
                Ok(Self::new(unit, endpoint))
            }
            _ => Err(format!("'{}' is not of the form unit:endpoint", value)),
        }
    }
}

impl From<PlanEndpoint> for String {
    fn from(value: PlanEndpoint) -> Self {
        value.to_string()
    }
}

/// A relation between two leaf unit endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResolvedRelation {
    pub provider: PlanEndpoint,
    pub requirer: PlanEndpoint,
    /// The two units live in different models.
    #[serde(default)]
    pub cross_model: bool,
}

impl ResolvedRelation {
    /// Order-independent identity: `{A, B}` and `{B, A}` share a key.
    pub fn unordered_key(&self) -> (&PlanEndpoint, &PlanEndpoint) {
        if self.provider <= self.requirer {
            (&self.provider, &self.requirer)
        } else {
            (&self.requirer, &self.provider)
        }
    }
}

impl fmt::Display for ResolvedRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <- {}", self.provider, self.requirer)
    }
}

/// The flattened, resolved output. Independent of the stack tree it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DeploymentPlan {
    /// Name of the root stack.
    pub stack: String,
    pub units: Vec<LeafUnit>,
    #[serde(default)]
    pub relations: Vec<ResolvedRelation>,
}

impl DeploymentPlan {
    pub fn unit(&self, name: &str) -> Option<&LeafUnit> {
        self.units.iter().find(|unit| unit.name == name)
    }

    pub fn models(&self) -> Vec<&str> {
        let mut models: Vec<&str> = self.units.iter().map(|unit| unit.model.as_str()).collect();
        models.sort_unstable();
        models.dedup();
        models
    }

    pub fn to_yaml(&self) -> Result<String, AppError> {
        serde_yaml::to_string(self).map_err(|e| AppError::Serialization {
            what: "deployment plan".into(),
            details: e.to_string(),
        })
    }

    pub fn to_json(&self) -> Result<String, AppError> {
        serde_json::to_string_pretty(self).map_err(|e| AppError::Serialization {
            what: "deployment plan".into(),
            details: e.to_string(),
        })
    }

    /// SHA-256 of the YAML rendering, hex encoded.
    pub fn fingerprint(&self) -> Result<String, AppError> {
        let mut hasher = Sha256::new();
        hasher.update(self.to_yaml()?.as_bytes());
        Ok(format!("{:x}", hasher.finalize()))
    }
}
