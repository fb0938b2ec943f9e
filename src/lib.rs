//! stack: compose charms into nested, reusable stacks and compile them into flat
//! deployment plans.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{PlanFormat, deploy, destroy, list, plan, status};
pub use domain::{AppError, DeploymentPlan, InstanceRecord, Overlay, compile_plan};
