pub mod instance_filesystem;
pub mod juju_script;
pub mod memory_stack_source;
pub mod stack_filesystem;

pub use instance_filesystem::YamlInstanceStore;
pub use juju_script::{Command, JujuScript, STACK_SEPARATOR};
pub use memory_stack_source::MemoryStackSource;
pub use stack_filesystem::{FilesystemStackSource, OVERLAY_FILE, STACK_FILE};
