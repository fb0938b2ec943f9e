//! Config overlay: per-path execution context assignment with inheritance.

pub mod execution_context;
pub mod merge;
pub mod overlay_config;

pub use execution_context::ExecutionContext;
pub use merge::{ContextAssignment, OverlayMerger};
pub use overlay_config::{ComponentOverlay, Overlay, parse_overlay_content};
