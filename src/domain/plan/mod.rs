//! Plan domain: endpoint resolution, relation compilation and plan emission.

pub mod deployment_plan;
pub mod emitter;
pub mod endpoint_resolver;
pub mod relation_compiler;

pub use deployment_plan::{DeploymentPlan, LeafUnit, PlanEndpoint, ResolvedRelation};
pub use emitter::PlanEmitter;
pub use endpoint_resolver::{EndpointKey, EndpointResolver, ResolvedEndpoint, ResolvedEndpoints};
pub use relation_compiler::{CompiledRelation, RelationCompiler};

use tracing::{debug, info};

use crate::domain::AppError;
use crate::domain::overlay::{Overlay, OverlayMerger};
use crate::domain::stack::{StackError, StackTree, StackTreeLoader};
use crate::ports::StackSource;

/// Load the stack rooted at `reference` and compile it into a plan.
pub fn compile_plan<S: StackSource>(
    source: &S,
    reference: &str,
    overlay: &Overlay,
    ambient_model: &str,
) -> Result<DeploymentPlan, AppError> {
    let tree = StackTreeLoader::load(source, reference)?;
    Ok(plan_tree(&tree, overlay, ambient_model)?)
}

/// Run the resolution passes over an already loaded tree.
///
/// The overlay merge and the endpoint resolution read the same tree independently;
/// relation compilation needs the endpoint table, emission needs both.
pub fn plan_tree(
    tree: &StackTree,
    overlay: &Overlay,
    ambient_model: &str,
) -> Result<DeploymentPlan, StackError> {
    let contexts = OverlayMerger::merge(tree, overlay)?;
    let endpoints = EndpointResolver::resolve(tree)?;
    debug!(nodes = contexts.len(), endpoints = endpoints.len(), "resolution tables built");
    let relations = RelationCompiler::compile(tree, &endpoints)?;
    let plan = PlanEmitter::emit(tree, &contexts, &relations, ambient_model);

    info!(
        stack = %plan.stack,
        location = %tree.location(),
        units = plan.units.len(),
        relations = plan.relations.len(),
        "compiled deployment plan"
    );
    Ok(plan)
}
