//! Endpoint forward resolution.
//!
//! A stack's `provides`/`requires` entries are aliases that may point at a nested stack's
//! own aliases. Resolution follows each chain down to a charm endpoint, lazily and memoized.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use tracing::debug;

use crate::domain::stack::{Component, Direction, NodePath, StackError, StackNode, StackTree};

/// Terminal result of forward resolution: a leaf charm path and its raw endpoint name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResolvedEndpoint {
    pub leaf: NodePath,
    pub endpoint: String,
}

impl fmt::Display for ResolvedEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.leaf, self.endpoint)
    }
}

/// Key of one declared endpoint: the stack declaring it, its name and its direction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EndpointKey {
    pub node: NodePath,
    pub endpoint: String,
    pub direction: Direction,
}

impl fmt::Display for EndpointKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} ({})", self.node, self.endpoint, self.direction)
    }
}

/// Resolution of every declared endpoint in a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedEndpoints(BTreeMap<EndpointKey, ResolvedEndpoint>);

impl ResolvedEndpoints {
    pub fn get(
        &self,
        node: &NodePath,
        endpoint: &str,
        direction: Direction,
    ) -> Option<&ResolvedEndpoint> {
        self.0.get(&EndpointKey { node: node.clone(), endpoint: endpoint.to_string(), direction })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Domain logic for resolving endpoint forward chains.
pub struct EndpointResolver {
    memo: BTreeMap<EndpointKey, ResolvedEndpoint>,
}

impl EndpointResolver {
    /// Resolve every `provides`/`requires` entry at every node of `tree`.
    pub fn resolve(tree: &StackTree) -> Result<ResolvedEndpoints, StackError> {
        let mut resolver = Self { memo: BTreeMap::new() };

        for (path, node) in tree.stacks() {
            for direction in Direction::ALL {
                for (name, _) in node.endpoints.declared(direction) {
                    let mut visited = BTreeSet::new();
                    let mut chain = Vec::new();
                    resolver.follow(&path, node, name, direction, &mut visited, &mut chain)?;
                }
            }
        }

        Ok(ResolvedEndpoints(resolver.memo))
    }

    fn follow(
        &mut self,
        path: &NodePath,
        node: &StackNode,
        name: &str,
        direction: Direction,
        visited: &mut BTreeSet<EndpointKey>,
        chain: &mut Vec<String>,
    ) -> Result<ResolvedEndpoint, StackError> {
        let key = EndpointKey { node: path.clone(), endpoint: name.to_string(), direction };
        if let Some(resolved) = self.memo.get(&key) {
            return Ok(resolved.clone());
        }

        chain.push(format!("{}:{}", path, name));
        if !visited.insert(key.clone()) {
            return Err(StackError::CyclicForward { chain: chain.join(" -> ") });
        }

        let forward =
            node.endpoints.get(direction, name).ok_or_else(|| StackError::DanglingForward {
                chain: chain.join(" -> "),
                reason: format!("'{}' declares no {} endpoint named '{}'", path, direction, name),
            })?;

        let target = path.child(&forward.component);
        let resolved = match node.component(&forward.component) {
            None => {
                return Err(StackError::DanglingForward {
                    chain: chain.join(" -> "),
                    reason: format!("'{}' declares no component '{}'", path, forward.component),
                });
            }
            Some(Component::Charm(_)) => {
                ResolvedEndpoint { leaf: target, endpoint: forward.endpoint.clone() }
            }
            Some(Component::Stack(stack)) => {
                self.follow(&target, &stack.node, &forward.endpoint, direction, visited, chain)?
            }
        };

        debug!(endpoint = %key, resolved = %resolved, "resolved endpoint forward");
        self.memo.insert(key, resolved.clone());
        Ok(resolved)
    }
}
