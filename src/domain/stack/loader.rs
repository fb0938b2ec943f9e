//! Stack tree loading.
//!
//! Recursively replaces every stack component with the node parsed from the document it
//! references, validating each node's structure on the way down.

use tracing::debug;

use crate::domain::stack::document::{
    ComponentKind, ForwardEntry, StackDocument, parse_component_entry, parse_stack_document,
};
use crate::domain::stack::endpoint::{Direction, EndpointRef, RelationDecl};
use crate::domain::stack::node::{CharmSpec, Component, StackComponent, StackLocation, StackNode};
use crate::domain::stack::node_path::NodePath;
use crate::domain::stack::tree::StackTree;
use crate::domain::stack::StackError;
use crate::domain::{AppError, ComponentName};
use crate::ports::StackSource;

/// Domain logic for building a [`StackTree`] from a root document reference.
pub struct StackTreeLoader;

impl StackTreeLoader {
    /// Load the tree rooted at `reference`.
    ///
    /// Fails on the first structural violation, missing document or cyclic inclusion.
    pub fn load<S: StackSource>(source: &S, reference: &str) -> Result<StackTree, AppError> {
        let location = source.resolve(reference, None)?;
        let mut ancestors: Vec<StackLocation> = Vec::new();
        let root = Self::load_node(source, &location, &NodePath::root(), &mut ancestors)?;
        Ok(StackTree::new(root, location))
    }

    fn load_node<S: StackSource>(
        source: &S,
        location: &StackLocation,
        path: &NodePath,
        ancestors: &mut Vec<StackLocation>,
    ) -> Result<StackNode, AppError> {
        if let Some(start) = ancestors.iter().position(|ancestor| ancestor == location) {
            let cycle = ancestors[start..]
                .iter()
                .chain(std::iter::once(location))
                .map(StackLocation::as_str)
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(StackError::CyclicInclusion { path: path.to_string(), cycle }.into());
        }

        ancestors.push(location.clone());
        let value = source.fetch(location)?;
        debug!(path = %path, location = %location, "loaded stack document");

        let document = parse_stack_document(location.as_str(), value)?;
        let node = Self::build_node(source, location, path, document, ancestors)?;

        ancestors.pop();
        Ok(node)
    }

    fn build_node<S: StackSource>(
        source: &S,
        location: &StackLocation,
        path: &NodePath,
        document: StackDocument,
        ancestors: &mut Vec<StackLocation>,
    ) -> Result<StackNode, AppError> {
        let mut node = StackNode::new(document.name, document.description);

        for (key, value) in document.components {
            let key = key.as_str().ok_or_else(|| {
                StackError::malformed(location, "component names must be strings")
            })?;
            let name = ComponentName::new(key)
                .map_err(|e| StackError::malformed(location, e.to_string()))?;
            let entry = parse_component_entry(location.as_str(), key, value)?;
            let kind = entry.kind().map_err(|reason| {
                StackError::malformed(location, format!("component '{}': {}", key, reason))
            })?;

            let component = match kind {
                ComponentKind::Charm { charm } => Component::Charm(CharmSpec {
                    charm,
                    units: entry.units.unwrap_or(1),
                    trust: entry.trust.unwrap_or(false),
                    channel: entry.channel,
                    config: entry.config.unwrap_or_default(),
                }),
                ComponentKind::Stack { reference } => {
                    let child_location = source.resolve(&reference, Some(location))?;
                    let child_path = path.child(&name);
                    let child = Self::load_node(source, &child_location, &child_path, ancestors)?;
                    Component::Stack(Box::new(StackComponent {
                        reference,
                        location: child_location,
                        node: child,
                    }))
                }
            };

            node.add_component(name, component).map_err(|duplicate| {
                StackError::malformed(location, format!("duplicate component name '{}'", duplicate))
            })?;
        }

        Self::load_forwards(location, path, &mut node, Direction::Provides, document.provides)?;
        Self::load_forwards(location, path, &mut node, Direction::Requires, document.requires)?;

        for relation in document.relations {
            let provider = Self::relation_side(location, path, &node, &relation.provider)?;
            let requirer = Self::relation_side(location, path, &node, &relation.requirer)?;
            node.relations.push(RelationDecl { provider, requirer });
        }

        Ok(node)
    }

    fn load_forwards(
        location: &StackLocation,
        path: &NodePath,
        node: &mut StackNode,
        direction: Direction,
        entries: impl IntoIterator<Item = (String, ForwardEntry)>,
    ) -> Result<(), StackError> {
        for (name, entry) in entries {
            let forward = EndpointRef::parse(entry.target()).map_err(|reason| {
                StackError::malformed(location, format!("{} '{}': {}", direction, name, reason))
            })?;
            if node.component(&forward.component).is_none() {
                return Err(StackError::DanglingForward {
                    chain: format!("{}:{}", path, name),
                    reason: format!(
                        "{} forward targets '{}' but '{}' declares no component '{}'",
                        direction, forward, path, forward.component
                    ),
                });
            }
            node.endpoints.insert(direction, name, forward);
        }
        Ok(())
    }

    fn relation_side(
        location: &StackLocation,
        path: &NodePath,
        node: &StackNode,
        raw: &str,
    ) -> Result<EndpointRef, StackError> {
        let side = EndpointRef::parse(raw)
            .map_err(|reason| StackError::malformed(location, format!("relation: {}", reason)))?;
        if node.component(&side.component).is_none() {
            return Err(StackError::UnresolvableRelationEndpoint {
                node: path.to_string(),
                endpoint: side.to_string(),
                reason: format!("no component named '{}'", side.component),
            });
        }
        Ok(side)
    }
}
