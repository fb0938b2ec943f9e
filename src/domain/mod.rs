pub mod error;
pub mod identifiers;
pub mod instance;
pub mod overlay;
pub mod plan;
pub mod settings;
pub mod stack;

pub use error::AppError;
pub use identifiers::{ComponentName, InstanceName};
pub use instance::{InstanceRecord, InstanceRegistry};
pub use overlay::{ExecutionContext, Overlay};
pub use plan::{DeploymentPlan, LeafUnit, PlanEndpoint, ResolvedRelation, compile_plan};
pub use settings::Settings;
pub use stack::{StackError, StackLocation, StackTree};
