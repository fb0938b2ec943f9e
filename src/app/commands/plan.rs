//! Plan command: compile a stack into a deployment plan without recording anything.

use crate::app::AppContext;
use crate::domain::{AppError, DeploymentPlan, Overlay, compile_plan};
use crate::ports::{InstanceStore, StackSource};

/// Serialization used when printing a plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlanFormat {
    #[default]
    Yaml,
    Json,
}

impl PlanFormat {
    pub fn render(self, plan: &DeploymentPlan) -> Result<String, AppError> {
        match self {
            PlanFormat::Yaml => plan.to_yaml(),
            PlanFormat::Json => plan.to_json(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PlanOptions {
    /// Reference to the root stack document.
    pub spec: String,
    pub overlay: Overlay,
    /// Ambient model chosen on the command line or environment.
    pub model: Option<String>,
}

/// Execute the plan command.
pub fn execute<S, I>(
    ctx: &AppContext<S, I>,
    options: &PlanOptions,
) -> Result<DeploymentPlan, AppError>
where
    S: StackSource,
    I: InstanceStore,
{
    let ambient = ctx.settings().ambient_model(options.model.as_deref());
    compile_plan(ctx.source(), &options.spec, &options.overlay, &ambient)
}
