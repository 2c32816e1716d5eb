//! Tool registry for Vitae
//!
//! This module provides the `ToolRegistry` struct for managing and executing tools.

use std::collections::BTreeMap;
use std::time::Instant;

use serde_json::{json, Value};
use tracing::{error, info};

use crate::error::Result;
use crate::providers::ToolDefinition;

use super::Tool;

/// A registry that holds and manages tools.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use vitae::notify::LogNotifier;
/// use vitae::tools::{RecordUnknownQuestionTool, ToolRegistry};
/// use serde_json::json;
///
/// # tokio_test::block_on(async {
/// let mut registry = ToolRegistry::new();
/// registry.register(Box::new(RecordUnknownQuestionTool::new(Arc::new(LogNotifier))));
///
/// assert!(registry.has("record_unknown_question"));
///
/// let result = registry
///     .execute("record_unknown_question", json!({"question": "Do you speak Rust?"}))
///     .await;
/// assert!(result.is_ok());
/// # });
/// ```
pub struct ToolRegistry {
    tools: BTreeMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a new empty tool registry.
    pub fn new() -> Self {
        Self {
            tools: BTreeMap::new(),
        }
    }

    /// Register a tool, replacing any tool with the same name.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        info!(tool = %name, "Registering tool");
        self.tools.insert(name, tool);
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    /// Execute a tool by name.
    ///
    /// An unknown tool name is reported back to the model as an error
    /// payload rather than failing the turn.
    pub async fn execute(&self, name: &str, args: Value) -> Result<String> {
        let tool = match self.tools.get(name) {
            Some(t) => t,
            None => {
                return Ok(json!({ "error": format!("Tool not found: {}", name) }).to_string());
            }
        };

        let start = Instant::now();

        match tool.execute(args).await {
            Ok(output) => {
                info!(
                    tool = name,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Tool executed successfully"
                );
                Ok(output)
            }
            Err(e) => {
                error!(
                    tool = name,
                    error = %e,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Tool execution failed"
                );
                Err(e)
            }
        }
    }

    /// Get all tool definitions, sorted by name.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .values()
            .map(|t| ToolDefinition::new(t.name(), t.description(), t.parameters()))
            .collect()
    }

    /// Get the names of all registered tools, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    /// Check if a tool exists in the registry.
    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
