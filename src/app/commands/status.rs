use crate::app::AppContext;
use crate::domain::{AppError, InstanceRecord};
use crate::ports::{InstanceStore, StackSource};

/// Execute the status command: look up the recorded instance.
pub fn execute<S, I>(ctx: &AppContext<S, I>, instance: &str) -> Result<InstanceRecord, AppError>
where
    S: StackSource,
    I: InstanceStore,
{
    ctx.instances().get(instance)?.ok_or_else(|| AppError::InstanceNotFound(instance.to_string()))
}
