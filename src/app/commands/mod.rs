pub mod deploy;
pub mod destroy;
pub mod list;
pub mod plan;
pub mod status;
