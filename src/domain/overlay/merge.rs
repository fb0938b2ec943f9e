//! Config overlay merging.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::overlay::{ExecutionContext, Overlay};
use crate::domain::stack::{Component, NodePath, StackError, StackNode, StackTree};

/// Effective execution context of every node in a tree, intermediate stacks included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextAssignment(BTreeMap<NodePath, ExecutionContext>);

impl ContextAssignment {
    pub fn get(&self, path: &NodePath) -> Option<&ExecutionContext> {
        self.0.get(path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Domain logic for applying an overlay to a stack tree.
pub struct OverlayMerger;

impl OverlayMerger {
    /// Assign an execution context to every node.
    ///
    /// A node's own explicit entry always wins; otherwise it inherits from its parent,
    /// and the root inherits the overlay default (or the ambient sentinel).
    pub fn merge(tree: &StackTree, overlay: &Overlay) -> Result<ContextAssignment, StackError> {
        let mut known: BTreeSet<String> = BTreeSet::new();
        tree.walk(&mut |path, _| {
            if !path.is_root() {
                known.insert(path.qualified());
            }
        });
        if let Some(unknown) = overlay.components.keys().find(|path| !known.contains(*path)) {
            return Err(StackError::UnknownOverlayPath { path: unknown.clone() });
        }

        let root_context = match &overlay.default_model {
            Some(model) => ExecutionContext::Model(model.clone()),
            None => ExecutionContext::Ambient,
        };

        let mut assigned = BTreeMap::new();
        let root = NodePath::root();
        assigned.insert(root.clone(), root_context.clone());
        Self::assign_children(tree.root(), &root, &root_context, overlay, &mut assigned);

        Ok(ContextAssignment(assigned))
    }

    fn assign_children(
        node: &StackNode,
        path: &NodePath,
        inherited: &ExecutionContext,
        overlay: &Overlay,
        assigned: &mut BTreeMap<NodePath, ExecutionContext>,
    ) {
        for (name, component) in node.components() {
            let child = path.child(name);
            let context = match overlay.model_for(&child.qualified()) {
                Some(model) => ExecutionContext::Model(model.to_string()),
                None => inherited.clone(),
            };
            if let Component::Stack(stack) = component {
                Self::assign_children(&stack.node, &child, &context, overlay, assigned);
            }
            assigned.insert(child, context);
        }
    }
}
