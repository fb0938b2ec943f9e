//! The fully loaded stack tree.

use crate::domain::stack::node::{CharmSpec, Component, StackLocation, StackNode};
use crate::domain::stack::node_path::NodePath;

/// Borrowed view of a tree node addressed by its dotted path.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Stack(&'a StackNode),
    Charm(&'a CharmSpec),
}

/// The stack node graph rooted at the deployment target.
///
/// Built once per resolution run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct StackTree {
    root: StackNode,
    location: StackLocation,
}

impl StackTree {
    pub fn new(root: StackNode, location: StackLocation) -> Self {
        Self { root, location }
    }

    pub fn root(&self) -> &StackNode {
        &self.root
    }

    /// Location of the root document.
    pub fn location(&self) -> &StackLocation {
        &self.location
    }

    /// Depth-first, pre-order walk over every node, root first, components in declaration order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&NodePath, NodeRef<'a>)) {
        fn descend<'a>(
            path: &NodePath,
            node: &'a StackNode,
            visit: &mut impl FnMut(&NodePath, NodeRef<'a>),
        ) {
            visit(path, NodeRef::Stack(node));
            for (name, component) in node.components() {
                let child = path.child(name);
                match component {
                    Component::Charm(charm) => visit(&child, NodeRef::Charm(charm)),
                    Component::Stack(stack) => descend(&child, &stack.node, visit),
                }
            }
        }

        descend(&NodePath::root(), &self.root, visit);
    }

    /// Every stack node with its path, in walk order.
    pub fn stacks(&self) -> Vec<(NodePath, &StackNode)> {
        let mut stacks = Vec::new();
        self.walk(&mut |path, node| {
            if let NodeRef::Stack(stack) = node {
                stacks.push((path.clone(), stack));
            }
        });
        stacks
    }

    /// Every leaf charm with its path, in walk order.
    pub fn charms(&self) -> Vec<(NodePath, &CharmSpec)> {
        let mut charms = Vec::new();
        self.walk(&mut |path, node| {
            if let NodeRef::Charm(charm) = node {
                charms.push((path.clone(), charm));
            }
        });
        charms
    }

    pub fn lookup(&self, path: &NodePath) -> Option<NodeRef<'_>> {
        let mut current = NodeRef::Stack(&self.root);
        for segment in path.segments() {
            let NodeRef::Stack(node) = current else {
                return None;
            };
            current = match node.component(segment)? {
                Component::Charm(charm) => NodeRef::Charm(charm),
                Component::Stack(stack) => NodeRef::Stack(&stack.node),
            };
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ComponentName;
    use crate::domain::stack::node::StackComponent;

    fn name(s: &str) -> ComponentName {
        ComponentName::new(s).unwrap()
    }

    fn sample_tree() -> StackTree {
        let mut wp = StackNode::new("wp", None);
        wp.add_component(name("wordpress"), Component::Charm(CharmSpec::new("ch:wordpress")))
            .unwrap();

        let mut root = StackNode::new("site", None);
        root.add_component(name("db"), Component::Charm(CharmSpec::new("ch:mysql"))).unwrap();
        root.add_component(
            name("app"),
            Component::Stack(Box::new(StackComponent {
                reference: "./wp".into(),
                location: StackLocation::new("wp"),
                node: wp,
            })),
        )
        .unwrap();

        StackTree::new(root, StackLocation::new("site"))
    }

    #[test]
    fn charms_in_walk_order() {
        let tree = sample_tree();
        let names: Vec<_> = tree.charms().iter().map(|(path, _)| path.qualified()).collect();
        assert_eq!(names, vec!["db", "app.wordpress"]);
    }

    #[test]
    fn stacks_include_root() {
        let tree = sample_tree();
        let names: Vec<_> =
            tree.stacks().iter().map(|(path, node)| (path.qualified(), node.name.clone())).collect();
        assert_eq!(
            names,
            vec![("".to_string(), "site".to_string()), ("app".to_string(), "wp".to_string())]
        );
    }

    #[test]
    fn lookup_by_path() {
        let tree = sample_tree();
        let path = NodePath::root().child(&name("app")).child(&name("wordpress"));

        assert!(matches!(tree.lookup(&path), Some(NodeRef::Charm(c)) if c.charm == "ch:wordpress"));
        assert!(matches!(tree.lookup(&NodePath::root()), Some(NodeRef::Stack(_))));
        assert!(tree.lookup(&NodePath::root().child(&name("missing"))).is_none());
        assert!(tree.lookup(&NodePath::root().child(&name("db")).child(&name("x"))).is_none());
    }
}
