//! Deploy command: record a stack instance and render the commands that create it.

use tracing::{debug, info};

use crate::adapters::{Command, JujuScript};
use crate::app::AppContext;
use crate::app::commands::plan::{self, PlanOptions};
use crate::domain::{AppError, InstanceName, InstanceRecord};
use crate::ports::{InstanceStore, StackSource};

#[derive(Debug, Clone, Default)]
pub struct DeployOptions {
    pub plan: PlanOptions,
    pub instance: String,
}

#[derive(Debug)]
pub enum DeployOutcome {
    /// A new instance was recorded; `commands` create it.
    Deployed { record: InstanceRecord, commands: Vec<Command> },
    /// The instance already exists with an identical plan.
    Unchanged { record: InstanceRecord },
}

impl DeployOutcome {
    pub fn record(&self) -> &InstanceRecord {
        match self {
            DeployOutcome::Deployed { record, .. } | DeployOutcome::Unchanged { record } => record,
        }
    }
}

/// Execute the deploy command.
pub fn execute<S, I>(
    ctx: &AppContext<S, I>,
    options: &DeployOptions,
) -> Result<DeployOutcome, AppError>
where
    S: StackSource,
    I: InstanceStore,
{
    let name = InstanceName::new(&options.instance)?;
    let plan = plan::execute(ctx, &options.plan)?;
    let fingerprint = plan.fingerprint()?;

    if let Some(existing) = ctx.instances().get(name.as_str())? {
        if existing.fingerprint == fingerprint {
            debug!(instance = %name, "plan unchanged");
            return Ok(DeployOutcome::Unchanged { record: existing });
        }
        return Err(AppError::InstanceExists {
            name: name.to_string(),
            fingerprint: existing.fingerprint,
        });
    }

    let record = InstanceRecord::new(&name, plan)?;
    let commands = JujuScript::render(&name, &record.plan);
    ctx.instances().save(record.clone())?;

    info!(
        instance = %name,
        stack = %record.stack,
        models = ?record.plan.models(),
        commands = commands.len(),
        "recorded instance"
    );
    Ok(DeployOutcome::Deployed { record, commands })
}
