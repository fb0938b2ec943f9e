//! Stack specification document model (`stack.yaml`).
//!
//! Documents arrive as generic YAML trees from a [`StackSource`](crate::ports::StackSource);
//! these types give them shape before the loader validates them into [`StackNode`]s.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::domain::stack::StackError;

/// Top-level stack document.
#[derive(Debug, Clone, Deserialize)]
pub struct StackDocument {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Kept as a mapping so declaration order survives.
    pub components: serde_yaml::Mapping,
    #[serde(default)]
    pub provides: BTreeMap<String, ForwardEntry>,
    #[serde(default)]
    pub requires: BTreeMap<String, ForwardEntry>,
    #[serde(default)]
    pub relations: Vec<RelationEntry>,
}

/// `provides`/`requires` entry, in long (`{forward: a:b}`) or short (`a:b`) form.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ForwardEntry {
    Short(String),
    Long(LongForward),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LongForward {
    pub forward: String,
}

impl ForwardEntry {
    pub fn target(&self) -> &str {
        match self {
            ForwardEntry::Short(target) | ForwardEntry::Long(LongForward { forward: target }) => {
                target
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelationEntry {
    pub provider: String,
    pub requirer: String,
}

/// One entry of the `components` mapping, before the charm/stack decision.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentEntry {
    #[serde(default)]
    pub charm: Option<String>,
    #[serde(default)]
    pub stack: Option<String>,
    #[serde(default)]
    pub units: Option<u32>,
    #[serde(default)]
    pub trust: Option<bool>,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub config: Option<BTreeMap<String, serde_yaml::Value>>,
}

/// Component entry after the charm/stack decision.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentKind {
    Charm { charm: String },
    Stack { reference: String },
}

impl ComponentEntry {
    /// Decide the component variant, rejecting ambiguous or charm-only fields on stacks.
    ///
    /// The error is a human-readable reason.
    pub fn kind(&self) -> Result<ComponentKind, String> {
        match (&self.charm, &self.stack) {
            (Some(_), Some(_)) => {
                Err("exactly one of `charm` or `stack` must be set, found both".into())
            }
            (None, None) => {
                Err("exactly one of `charm` or `stack` must be set, found neither".into())
            }
            (Some(charm), None) => {
                if charm.trim().is_empty() {
                    return Err("`charm` must not be empty".into());
                }
                if let Some(config) = &self.config
                    && let Some((key, _)) = config.iter().find(|(_, value)| !is_scalar(value))
                {
                    return Err(format!("config value for '{}' must be a scalar", key));
                }
                Ok(ComponentKind::Charm { charm: charm.clone() })
            }
            (None, Some(reference)) => {
                if reference.trim().is_empty() {
                    return Err("`stack` must not be empty".into());
                }
                let charm_only: Vec<&str> = [
                    ("units", self.units.is_some()),
                    ("trust", self.trust.is_some()),
                    ("channel", self.channel.is_some()),
                    ("config", self.config.is_some()),
                ]
                .into_iter()
                .filter_map(|(field, present)| present.then_some(field))
                .collect();
                if !charm_only.is_empty() {
                    return Err(format!(
                        "charm-only field(s) {} not allowed on a stack component",
                        charm_only.join(", ")
                    ));
                }
                Ok(ComponentKind::Stack { reference: reference.clone() })
            }
        }
    }
}

fn is_scalar(value: &serde_yaml::Value) -> bool {
    matches!(
        value,
        serde_yaml::Value::Bool(_) | serde_yaml::Value::Number(_) | serde_yaml::Value::String(_)
    )
}

/// Shape a generic YAML tree into a [`StackDocument`].
pub fn parse_stack_document(
    location: &str,
    value: serde_yaml::Value,
) -> Result<StackDocument, StackError> {
    if value.is_null() {
        return Err(StackError::malformed(location, "document is empty"));
    }
    serde_yaml::from_value(value).map_err(|e| StackError::malformed(location, e.to_string()))
}

/// Shape one component entry.
pub fn parse_component_entry(
    location: &str,
    component: &str,
    value: serde_yaml::Value,
) -> Result<ComponentEntry, StackError> {
    serde_yaml::from_value(value).map_err(|e| {
        StackError::malformed(location, format!("component '{}': {}", component, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(yaml: &str) -> serde_yaml::Value {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn parses_long_and_short_forwards() {
        let doc = parse_stack_document(
            "wp",
            value(
                "name: wp\ncomponents:\n  wordpress:\n    charm: ch:wordpress\n\
                 requires:\n  db:\n    forward: wordpress:db\nprovides:\n  website: wordpress:website\n",
            ),
        )
        .unwrap();

        assert_eq!(doc.requires["db"].target(), "wordpress:db");
        assert_eq!(doc.provides["website"].target(), "wordpress:website");
        assert!(doc.relations.is_empty());
    }

    #[test]
    fn unknown_key_in_long_forward_is_malformed() {
        let err = parse_stack_document(
            "wp",
            value(
                "name: wp\ncomponents:\n  wordpress:\n    charm: ch:wordpress\n\
                 requires:\n  db:\n    forward: wordpress:db\n    typo: x\n",
            ),
        )
        .unwrap_err();
        assert!(matches!(err, StackError::MalformedSpec { .. }));
    }

    #[test]
    fn missing_name_is_malformed() {
        let err = parse_stack_document("x", value("components: {}\n")).unwrap_err();
        assert!(matches!(err, StackError::MalformedSpec { reason, .. } if reason.contains("name")));
    }

    #[test]
    fn empty_document_is_malformed() {
        let err = parse_stack_document("x", serde_yaml::Value::Null).unwrap_err();
        assert!(matches!(err, StackError::MalformedSpec { .. }));
    }

    #[test]
    fn component_kind_charm() {
        let entry = parse_component_entry("x", "db", value("charm: ch:mysql\nunits: 3\n")).unwrap();
        assert_eq!(entry.kind().unwrap(), ComponentKind::Charm { charm: "ch:mysql".into() });
        assert_eq!(entry.units, Some(3));
    }

    #[test]
    fn component_requires_exactly_one_kind() {
        let both = parse_component_entry("x", "a", value("charm: a\nstack: ./b\n")).unwrap();
        assert!(both.kind().unwrap_err().contains("found both"));

        let neither = parse_component_entry("x", "a", value("units: 2\n")).unwrap();
        assert!(neither.kind().unwrap_err().contains("found neither"));
    }

    #[test]
    fn charm_only_fields_rejected_on_stack() {
        let entry =
            parse_component_entry("x", "lma", value("stack: ./lma\nunits: 2\ntrust: true\n"))
                .unwrap();
        let reason = entry.kind().unwrap_err();
        assert!(reason.contains("units, trust"));
    }

    #[test]
    fn nested_config_value_rejected() {
        let entry =
            parse_component_entry("x", "db", value("charm: ch:mysql\nconfig:\n  a:\n    b: 1\n"))
                .unwrap();
        assert!(entry.kind().unwrap_err().contains("'a'"));
    }

    #[test]
    fn unknown_component_field_is_malformed() {
        let err =
            parse_component_entry("x", "db", value("charm: ch:mysql\nscale: 3\n")).unwrap_err();
        assert!(matches!(err, StackError::MalformedSpec { reason, .. } if reason.contains("db")));
    }

    #[test]
    fn negative_units_are_malformed() {
        assert!(parse_component_entry("x", "db", value("charm: ch:mysql\nunits: -1\n")).is_err());
    }
}
