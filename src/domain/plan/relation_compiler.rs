//! Relation compilation: rewrites relations declared at every level into leaf-to-leaf relations.

use crate::domain::plan::endpoint_resolver::{ResolvedEndpoint, ResolvedEndpoints};
use crate::domain::stack::{
    Component, Direction, EndpointRef, NodePath, StackError, StackNode, StackTree,
};

/// A relation between two leaf endpoints, with the node that declared it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledRelation {
    pub provider: ResolvedEndpoint,
    pub requirer: ResolvedEndpoint,
    pub declared_at: NodePath,
}

/// Domain logic for compiling relation declarations.
pub struct RelationCompiler;

impl RelationCompiler {
    /// Compile every relation of every node, in tree walk order then declaration order.
    pub fn compile(
        tree: &StackTree,
        endpoints: &ResolvedEndpoints,
    ) -> Result<Vec<CompiledRelation>, StackError> {
        let mut compiled = Vec::new();
        for (path, node) in tree.stacks() {
            for relation in &node.relations {
                let provider = Self::leaf_endpoint(
                    &path,
                    node,
                    &relation.provider,
                    Direction::Provides,
                    endpoints,
                )?;
                let requirer = Self::leaf_endpoint(
                    &path,
                    node,
                    &relation.requirer,
                    Direction::Requires,
                    endpoints,
                )?;
                compiled.push(CompiledRelation { provider, requirer, declared_at: path.clone() });
            }
        }
        Ok(compiled)
    }

    /// Resolve one relation side named at `node`.
    ///
    /// A charm side is used literally. A stack side must name one of the child's declared
    /// endpoints; the side's own direction is looked up first, then the opposite one, since a
    /// relation joins the same two endpoints whichever way round it is written.
    fn leaf_endpoint(
        path: &NodePath,
        node: &StackNode,
        side: &EndpointRef,
        direction: Direction,
        endpoints: &ResolvedEndpoints,
    ) -> Result<ResolvedEndpoint, StackError> {
        let unresolvable = |reason: String| StackError::UnresolvableRelationEndpoint {
            node: path.to_string(),
            endpoint: side.to_string(),
            reason,
        };

        let child = path.child(&side.component);
        match node.component(&side.component) {
            None => Err(unresolvable(format!("no component named '{}'", side.component))),
            Some(Component::Charm(_)) => {
                Ok(ResolvedEndpoint { leaf: child, endpoint: side.endpoint.clone() })
            }
            Some(Component::Stack(_)) => endpoints
                .get(&child, &side.endpoint, direction)
                .or_else(|| endpoints.get(&child, &side.endpoint, direction.opposite()))
                .cloned()
                .ok_or_else(|| {
                    unresolvable(format!(
                        "stack component '{}' declares no provides or requires endpoint '{}'",
                        child, side.endpoint
                    ))
                }),
        }
    }
}
