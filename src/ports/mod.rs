mod instance_store;
mod stack_source;

pub use instance_store::InstanceStore;
pub use stack_source::StackSource;
