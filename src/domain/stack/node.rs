//! Stack nodes and their components.

use std::collections::BTreeMap;
use std::fmt;

use crate::domain::ComponentName;
use crate::domain::stack::endpoint::{EndpointTable, RelationDecl};

/// Identity of a loaded stack document, as assigned by the stack source.
///
/// Two references that resolve to the same document must yield equal locations;
/// cyclic inclusion is detected on this identity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StackLocation(String);

impl StackLocation {
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StackLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A leaf deployable unit.
#[derive(Debug, Clone, PartialEq)]
pub struct CharmSpec {
    /// Charm path or store name (`ch:mysql`, `./charms/foo`).
    pub charm: String,
    pub units: u32,
    pub trust: bool,
    pub channel: Option<String>,
    /// Flat key to scalar value mapping.
    pub config: BTreeMap<String, serde_yaml::Value>,
}

impl CharmSpec {
    pub fn new(charm: impl Into<String>) -> Self {
        Self { charm: charm.into(), units: 1, trust: false, channel: None, config: BTreeMap::new() }
    }
}

/// A nested stack, already loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct StackComponent {
    /// The reference as written in the parent document.
    pub reference: String,
    pub location: StackLocation,
    pub node: StackNode,
}

/// A component entry: either a leaf charm or a nested stack.
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    Charm(CharmSpec),
    Stack(Box<StackComponent>),
}

/// One stack specification with every nested stack component loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct StackNode {
    pub name: String,
    pub description: Option<String>,
    components: Vec<(ComponentName, Component)>,
    pub endpoints: EndpointTable,
    pub relations: Vec<RelationDecl>,
}

impl StackNode {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description,
            components: Vec::new(),
            endpoints: EndpointTable::new(),
            relations: Vec::new(),
        }
    }

    /// Append a component, preserving declaration order.
    ///
    /// Returns the rejected name when a component with the same name already exists.
    pub fn add_component(
        &mut self,
        name: ComponentName,
        component: Component,
    ) -> Result<(), ComponentName> {
        if self.component(&name).is_some() {
            return Err(name);
        }
        self.components.push((name, component));
        Ok(())
    }

    pub fn component(&self, name: &str) -> Option<&Component> {
        self.components.iter().find(|(n, _)| n.as_str() == name).map(|(_, c)| c)
    }

    /// Components in declaration order.
    pub fn components(&self) -> impl Iterator<Item = (&ComponentName, &Component)> {
        self.components.iter().map(|(name, component)| (name, component))
    }

    pub fn component_names(&self) -> Vec<&str> {
        self.components.iter().map(|(name, _)| name.as_str()).collect()
    }
}
