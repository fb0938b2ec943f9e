use std::fmt;

/// The execution context (model) a node resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExecutionContext {
    /// Use the caller's ambient model at plan-emission time.
    Ambient,
    Model(String),
}

impl ExecutionContext {
    /// Resolve the ambient sentinel against `ambient`. Only the plan emitter calls this.
    pub fn resolve(&self, ambient: &str) -> String {
        match self {
            ExecutionContext::Ambient => ambient.to_string(),
            ExecutionContext::Model(model) => model.clone(),
        }
    }
}

impl fmt::Display for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionContext::Ambient => f.write_str("<current>"),
            ExecutionContext::Model(model) => f.write_str(model),
        }
    }
}
