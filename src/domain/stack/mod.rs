//! Stack domain: specification documents, the loaded stack tree and its loader.

pub mod document;
pub mod endpoint;
pub mod error;
pub mod loader;
pub mod node;
pub mod node_path;
pub mod tree;

pub use endpoint::{Direction, EndpointRef, EndpointTable, Forward, RelationDecl};
pub use error::StackError;
pub use loader::StackTreeLoader;
pub use node::{CharmSpec, Component, StackComponent, StackLocation, StackNode};
pub use node_path::{NodePath, PATH_SEPARATOR};
pub use tree::{NodeRef, StackTree};
