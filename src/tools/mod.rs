//! Tools module - functions the model may call during a turn
//!
//! The career agent exposes two lead-capture tools that forward to the
//! configured [`Notifier`](crate::notify::Notifier).

pub mod record;
pub mod registry;
pub mod types;

use std::sync::Arc;

use crate::notify::Notifier;

pub use record::{RecordUnknownQuestionTool, RecordUserDetailsTool};
pub use registry::ToolRegistry;
pub use types::Tool;

/// Build the registry of tools offered to the model.
pub fn persona_tools(notifier: Arc<dyn Notifier>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(RecordUserDetailsTool::new(notifier.clone())));
    registry.register(Box::new(RecordUnknownQuestionTool::new(notifier)));
    registry
}
