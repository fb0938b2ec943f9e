//! Endpoint references, forwards and the per-stack endpoint table.

use std::collections::BTreeMap;
use std::fmt;

use crate::domain::ComponentName;
use crate::domain::identifiers::validation::validate_endpoint_name;

/// Which side of a relation an endpoint serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Provides,
    Requires,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Provides, Direction::Requires];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Provides => "provides",
            Direction::Requires => "requires",
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Provides => Direction::Requires,
            Direction::Requires => Direction::Provides,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `component:endpoint` reference local to one stack node.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EndpointRef {
    pub component: ComponentName,
    pub endpoint: String,
}

impl EndpointRef {
    /// Parse `component:endpoint`. The error is a human-readable reason.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let (component, endpoint) = raw
            .split_once(':')
            .ok_or_else(|| format!("'{}' is not of the form component:endpoint", raw))?;
        let component = ComponentName::new(component.trim()).map_err(|e| e.to_string())?;
        let endpoint = endpoint.trim();
        if !validate_endpoint_name(endpoint) {
            return Err(format!("'{}' has an invalid endpoint name '{}'", raw, endpoint));
        }
        Ok(Self { component, endpoint: endpoint.to_string() })
    }
}

impl fmt::Display for EndpointRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.component, self.endpoint)
    }
}

/// Alias from a stack's own endpoint to one of its components' endpoints.
pub type Forward = EndpointRef;

/// A stack's declared `provides` and `requires` endpoints with their forwarding targets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointTable {
    provides: BTreeMap<String, Forward>,
    requires: BTreeMap<String, Forward>,
}

impl EndpointTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn side(&self, direction: Direction) -> &BTreeMap<String, Forward> {
        match direction {
            Direction::Provides => &self.provides,
            Direction::Requires => &self.requires,
        }
    }

    /// Declare `name` on `direction`, returning the forward it replaced, if any.
    pub fn insert(
        &mut self,
        direction: Direction,
        name: String,
        forward: Forward,
    ) -> Option<Forward> {
        match direction {
            Direction::Provides => self.provides.insert(name, forward),
            Direction::Requires => self.requires.insert(name, forward),
        }
    }

    pub fn get(&self, direction: Direction, name: &str) -> Option<&Forward> {
        self.side(direction).get(name)
    }

    pub fn declares(&self, direction: Direction, name: &str) -> bool {
        self.side(direction).contains_key(name)
    }

    /// Declared endpoints on one side, sorted by name.
    pub fn declared(&self, direction: Direction) -> impl Iterator<Item = (&str, &Forward)> {
        self.side(direction).iter().map(|(name, forward)| (name.as_str(), forward))
    }
}

/// A relation declared at one stack node, still in terms of that node's components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationDecl {
    pub provider: EndpointRef,
    pub requirer: EndpointRef,
}
