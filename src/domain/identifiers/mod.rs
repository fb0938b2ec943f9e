pub mod component_name;
pub mod instance_name;
pub mod validation;

pub use component_name::ComponentName;
pub use instance_name::InstanceName;
