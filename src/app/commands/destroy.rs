//! Destroy command: forget a recorded instance and render its teardown.

use tracing::info;

use crate::adapters::{Command, JujuScript};
use crate::app::AppContext;
use crate::domain::{AppError, InstanceName, InstanceRecord};
use crate::ports::{InstanceStore, StackSource};

#[derive(Debug)]
pub struct DestroyOutcome {
    pub record: InstanceRecord,
    pub commands: Vec<Command>,
}

/// Execute the destroy command.
pub fn execute<S, I>(ctx: &AppContext<S, I>, instance: &str) -> Result<DestroyOutcome, AppError>
where
    S: StackSource,
    I: InstanceStore,
{
    let name = InstanceName::new(instance)?;
    let record = ctx
        .instances()
        .remove(name.as_str())?
        .ok_or_else(|| AppError::InstanceNotFound(name.to_string()))?;
    let commands = JujuScript::teardown(&name, &record.plan);

    info!(instance = %name, "removed instance record");
    Ok(DestroyOutcome { record, commands })
}
