use crate::app::AppContext;
use crate::domain::{AppError, InstanceRecord};
use crate::ports::{InstanceStore, StackSource};

/// Execute the list command: all recorded instances, sorted by name.
pub fn execute<S, I>(ctx: &AppContext<S, I>) -> Result<Vec<InstanceRecord>, AppError>
where
    S: StackSource,
    I: InstanceStore,
{
    ctx.instances().list()
}
