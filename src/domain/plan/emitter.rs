//! Deployment plan emission.

use std::collections::BTreeSet;

use crate::domain::overlay::{ContextAssignment, ExecutionContext};
use crate::domain::plan::deployment_plan::{
    DeploymentPlan, LeafUnit, PlanEndpoint, ResolvedRelation,
};
use crate::domain::plan::endpoint_resolver::ResolvedEndpoint;
use crate::domain::plan::relation_compiler::CompiledRelation;
use crate::domain::stack::{NodePath, StackTree};

/// Domain logic for assembling the flat plan.
pub struct PlanEmitter;

impl PlanEmitter {
    /// Emit one unit per charm in walk order and the relations with duplicates removed.
    ///
    /// The ambient sentinel is resolved to `ambient_model` here and nowhere earlier.
    pub fn emit(
        tree: &StackTree,
        contexts: &ContextAssignment,
        relations: &[CompiledRelation],
        ambient_model: &str,
    ) -> DeploymentPlan {
        let model_of = |path: &NodePath| -> String {
            match contexts.get(path) {
                Some(context) => context.resolve(ambient_model),
                None => ExecutionContext::Ambient.resolve(ambient_model),
            }
        };

        let units = tree
            .charms()
            .into_iter()
            .map(|(path, charm)| LeafUnit {
                name: path.qualified(),
                charm: charm.charm.clone(),
                model: model_of(&path),
                units: charm.units,
                trust: charm.trust,
                channel: charm.channel.clone(),
                config: charm.config.clone(),
            })
            .collect();

        let mut seen: BTreeSet<(PlanEndpoint, PlanEndpoint)> = BTreeSet::new();
        let mut resolved = Vec::new();
        for relation in relations {
            let candidate = ResolvedRelation {
                provider: plan_endpoint(&relation.provider),
                requirer: plan_endpoint(&relation.requirer),
                cross_model: model_of(&relation.provider.leaf) != model_of(&relation.requirer.leaf),
            };
            let (first, second) = candidate.unordered_key();
            if seen.insert((first.clone(), second.clone())) {
                resolved.push(candidate);
            }
        }

        DeploymentPlan { stack: tree.root().name.clone(), units, relations: resolved }
    }
}

fn plan_endpoint(endpoint: &ResolvedEndpoint) -> PlanEndpoint {
    PlanEndpoint::new(endpoint.leaf.qualified(), endpoint.endpoint.clone())
}
