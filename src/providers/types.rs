//! Provider types for Vitae
//!
//! This module defines the [`ModelService`] trait the turn handler calls, its
//! request and reply types, and the tool definitions sent alongside.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::session::ContinuationToken;

/// Definition of a tool that can be called by the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// The name of the tool (must be unique)
    pub name: String,
    /// Human-readable description of what the tool does
    pub description: String,
    /// JSON Schema describing the tool's parameters
    pub parameters: serde_json::Value,
}

impl ToolDefinition {
    pub fn new(name: &str, description: &str, parameters: serde_json::Value) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            parameters,
        }
    }
}

/// One turn's worth of input to the model service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRequest {
    /// Full instruction text for the agent
    pub instructions: String,
    /// The visitor's message
    pub message: String,
    /// Token from the client's previous turn; `None` starts a fresh context
    pub previous: Option<ContinuationToken>,
}

impl ModelRequest {
    pub fn new(instructions: &str, message: &str) -> Self {
        Self {
            instructions: instructions.to_string(),
            message: message.to_string(),
            previous: None,
        }
    }

    /// Resume from a prior turn.
    pub fn with_previous(mut self, previous: Option<ContinuationToken>) -> Self {
        self.previous = previous;
        self
    }
}

/// The model's answer and the token that continues from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelReply {
    /// Final reply text shown to the visitor
    pub text: String,
    /// Token to pass as `previous` on the client's next turn
    pub continuation: ContinuationToken,
}

impl ModelReply {
    pub fn new(text: &str, continuation: &str) -> Self {
        Self {
            text: text.to_string(),
            continuation: ContinuationToken::new(continuation),
        }
    }
}

/// The external "submit message, get reply" service.
///
/// The only call in a turn expected to take noticeable time; any timeout is
/// the implementation's own.
#[async_trait]
pub trait ModelService: Send + Sync {
    /// Run one turn and return the reply with its continuation token.
    async fn respond(&self, request: ModelRequest) -> Result<ModelReply>;

    /// Get the provider name.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_builder() {
        let request = ModelRequest::new("be nice", "hello");
        assert!(request.previous.is_none());

        let resumed = request.with_previous(Some(ContinuationToken::from("tok-1")));
        assert_eq!(resumed.previous.unwrap().as_str(), "tok-1");
    }

    #[test]
    fn test_reply_new() {
        let reply = ModelReply::new("hi", "resp_1");
        assert_eq!(reply.text, "hi");
        assert_eq!(reply.continuation, ContinuationToken::from("resp_1"));
    }

    #[test]
    fn test_tool_definition_serializes() {
        let def = ToolDefinition::new("record", "Record a thing", json!({"type": "object"}));
        let value = serde_json::to_value(&def).unwrap();
        assert_eq!(value["name"], "record");
        assert_eq!(value["parameters"]["type"], "object");
    }
}
