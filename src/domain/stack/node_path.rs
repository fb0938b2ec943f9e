//! Dotted paths identifying nodes of a stack tree.

use std::fmt;

use crate::domain::ComponentName;

/// Separator between component names in a dotted path.
pub const PATH_SEPARATOR: char = '.';

/// The identity of a node during resolution: the component names leading to it from the root.
///
/// The root node has the empty path. Because component names never contain `.`,
/// the dotted rendering is unique per node.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodePath(Vec<ComponentName>);

impl NodePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Path of the component `name` nested directly under this node.
    pub fn child(&self, name: &ComponentName) -> Self {
        let mut segments = self.0.clone();
        segments.push(name.clone());
        Self(segments)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[ComponentName] {
        &self.0
    }

    /// The dotted rendering used for leaf naming and overlay matching (`lma.prometheus`).
    ///
    /// Empty for the root.
    pub fn qualified(&self) -> String {
        let separator = PATH_SEPARATOR.to_string();
        self.0.iter().map(ComponentName::as_str).collect::<Vec<_>>().join(&separator)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() { write!(f, "<root>") } else { write!(f, "{}", self.qualified()) }
    }
}
