use crate::domain::Settings;
use crate::ports::{InstanceStore, StackSource};

/// Application context holding dependencies for command execution.
pub struct AppContext<S: StackSource, I: InstanceStore> {
    source: S,
    instances: I,
    settings: Settings,
}

impl<S: StackSource, I: InstanceStore> AppContext<S, I> {
    /// Create a new application context.
    pub fn new(source: S, instances: I, settings: Settings) -> Self {
        Self { source, instances, settings }
    }

    /// Get a reference to the stack document source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get a reference to the instance registry.
    pub fn instances(&self) -> &I {
        &self.instances
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
