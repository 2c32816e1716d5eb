//! OpenAI Responses API Provider
//!
//! This module implements the [`ModelService`] trait on top of OpenAI's
//! Responses API. Conversation state lives server-side: each reply carries a
//! response id that the next turn passes back as `previous_response_id`.
//!
//! When the model calls one of the registered tools, the provider runs the
//! tool, submits its output chained to the response that asked for it, and
//! repeats until the model answers in plain text.
//!
//! # Example
//!
//! ```rust,ignore
//! use vitae::providers::{ModelRequest, ModelService, OpenAIResponsesProvider};
//!
//! async fn example() {
//!     let provider = OpenAIResponsesProvider::new("your-api-key").with_model("gpt-5-mini");
//!     let reply = provider
//!         .respond(ModelRequest::new("You are helpful.", "Hello!"))
//!         .await
//!         .unwrap();
//!     println!("{}", reply.text);
//! }
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::ProviderConfig;
use crate::error::{Result, VitaeError};
use crate::session::ContinuationToken;
use crate::tools::ToolRegistry;

use super::{parse_provider_error, ModelReply, ModelRequest, ModelService, ToolDefinition};

/// The OpenAI API endpoint URL.
const OPENAI_API_URL: &str = "https://api.openai.com/v1";

/// The default model to use.
const DEFAULT_MODEL: &str = "gpt-5-mini";

/// Default cap on tool round-trips within one turn.
const DEFAULT_MAX_TOOL_ITERATIONS: u32 = 10;

// ============================================================================
// Responses API Request Types
// ============================================================================

/// Responses API request body.
#[derive(Debug, Serialize)]
struct ResponsesRequest {
    model: String,
    instructions: String,
    input: ResponsesInput,
    #[serde(skip_serializing_if = "Option::is_none")]
    previous_response_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<ResponsesTool>,
}

/// Either the visitor's text or the outputs of requested function calls.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ResponsesInput {
    Text(String),
    Items(Vec<FunctionCallOutput>),
}

/// Output of one function call, sent back to the model.
#[derive(Debug, Serialize)]
struct FunctionCallOutput {
    /// Always "function_call_output"
    r#type: &'static str,
    call_id: String,
    output: String,
}

/// Responses API function tool (flat, unlike Chat Completions).
#[derive(Debug, Serialize)]
struct ResponsesTool {
    /// Always "function"
    r#type: &'static str,
    name: String,
    description: String,
    parameters: Value,
}

// ============================================================================
// Responses API Response Types
// ============================================================================

/// Responses API response body.
#[derive(Debug, Deserialize)]
struct ResponsesResponse {
    id: String,
    #[serde(default)]
    output: Vec<OutputItem>,
}

/// One item of model output.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum OutputItem {
    Message {
        #[serde(default)]
        content: Vec<ContentPart>,
    },
    FunctionCall {
        call_id: String,
        name: String,
        #[serde(default)]
        arguments: String,
    },
    #[serde(other)]
    Other,
}

/// One part of a message item.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    OutputText {
        text: String,
    },
    #[serde(other)]
    Other,
}

/// OpenAI API error response.
#[derive(Debug, Deserialize)]
struct OpenAIErrorResponse {
    error: OpenAIError,
}

/// OpenAI API error details.
#[derive(Debug, Deserialize)]
struct OpenAIError {
    message: String,
}

/// A function call requested by the model.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FunctionCall {
    call_id: String,
    name: String,
    arguments: String,
}

/// A parsed response: its id, the text it produced, and any calls it made.
#[derive(Debug)]
struct ParsedResponse {
    id: String,
    text: String,
    calls: Vec<FunctionCall>,
}

// ============================================================================
// OpenAI Responses Provider
// ============================================================================

/// Model service backed by the OpenAI Responses API.
pub struct OpenAIResponsesProvider {
    /// API key for authentication
    api_key: String,
    /// API base URL
    api_base: String,
    /// Model identifier
    model: String,
    /// Tools offered to the model
    tools: Option<Arc<ToolRegistry>>,
    /// Maximum tool round-trips per turn
    max_tool_iterations: u32,
    /// HTTP client for making requests
    client: Client,
}

impl OpenAIResponsesProvider {
    /// Create a new provider with the given API key.
    ///
    /// # Example
    /// ```
    /// use vitae::providers::{ModelService, OpenAIResponsesProvider};
    ///
    /// let provider = OpenAIResponsesProvider::new("sk-xxx");
    /// assert_eq!(provider.name(), "openai");
    /// ```
    pub fn new(api_key: &str) -> Self {
        Self::with_client(api_key, OPENAI_API_URL, Client::new())
    }

    /// Create a provider against an OpenAI-compatible base URL.
    ///
    /// A trailing slash is removed.
    pub fn with_base_url(api_key: &str, api_base: &str) -> Self {
        Self::with_client(api_key, api_base, Client::new())
    }

    /// Create a provider with a custom HTTP client.
    pub fn with_client(api_key: &str, api_base: &str, client: Client) -> Self {
        Self {
            api_key: api_key.to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
            model: DEFAULT_MODEL.to_string(),
            tools: None,
            max_tool_iterations: DEFAULT_MAX_TOOL_ITERATIONS,
            client,
        }
    }

    /// Build from configuration. Fails when no API key is set.
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                VitaeError::Config(
                    "No OpenAI API key configured (set OPENAI_API_KEY or provider.api_key)".into(),
                )
            })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| VitaeError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(api_key, &config.api_base, client)
            .with_model(&config.model)
            .with_max_tool_iterations(config.max_tool_iterations))
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Offer these tools to the model on every request.
    pub fn with_tools(mut self, tools: Arc<ToolRegistry>) -> Self {
        self.tools = Some(tools);
        self
    }

    pub fn with_max_tool_iterations(mut self, max: u32) -> Self {
        self.max_tool_iterations = max;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .as_ref()
            .map(|t| t.definitions())
            .unwrap_or_default()
    }

    /// Send one request and parse the reply.
    async fn send(&self, request: &ResponsesRequest) -> Result<ParsedResponse> {
        debug!(model = %request.model, chained = request.previous_response_id.is_some(), "OpenAI responses request");

        let response = self
            .client
            .post(format!("{}/responses", self.api_base))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| VitaeError::Provider(format!("OpenAI request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<OpenAIErrorResponse>(&error_text)
                .map(|e| e.error.message)
                .unwrap_or(error_text);
            return Err(parse_provider_error(status.as_u16(), &detail).into());
        }

        let body: ResponsesResponse = response
            .json()
            .await
            .map_err(|e| VitaeError::Provider(format!("Failed to parse OpenAI response: {}", e)))?;

        Ok(convert_response(body))
    }

    /// Run every requested call and collect the outputs.
    async fn run_calls(&self, calls: &[FunctionCall]) -> Vec<FunctionCallOutput> {
        let mut outputs = Vec::with_capacity(calls.len());
        for call in calls {
            info!(tool = %call.name, call_id = %call.call_id, "Executing tool");

            let args: Value = match serde_json::from_str(&call.arguments) {
                Ok(v) => v,
                Err(e) => {
                    warn!(tool = %call.name, error = %e, "Invalid JSON in tool arguments");
                    serde_json::json!({})
                }
            };

            let output = match &self.tools {
                Some(registry) => match registry.execute(&call.name, args).await {
                    Ok(out) => out,
                    Err(e) => format!("Error: {}", e),
                },
                None => format!("Error: Tool not found: {}", call.name),
            };

            outputs.push(FunctionCallOutput {
                r#type: "function_call_output",
                call_id: call.call_id.clone(),
                output,
            });
        }
        outputs
    }
}

// ============================================================================
// Conversion Functions
// ============================================================================

fn convert_tools(tools: Vec<ToolDefinition>) -> Vec<ResponsesTool> {
    tools
        .into_iter()
        .map(|t| ResponsesTool {
            r#type: "function",
            name: t.name,
            description: t.description,
            parameters: t.parameters,
        })
        .collect()
}

/// Flatten output items into reply text and function calls.
fn convert_response(response: ResponsesResponse) -> ParsedResponse {
    let mut text = String::new();
    let mut calls = Vec::new();

    for item in response.output {
        match item {
            OutputItem::Message { content } => {
                for part in content {
                    if let ContentPart::OutputText { text: t } = part {
                        text.push_str(&t);
                    }
                }
            }
            OutputItem::FunctionCall {
                call_id,
                name,
                arguments,
            } => calls.push(FunctionCall {
                call_id,
                name,
                arguments,
            }),
            OutputItem::Other => {}
        }
    }

    ParsedResponse {
        id: response.id,
        text,
        calls,
    }
}

// ============================================================================
// ModelService Implementation
// ============================================================================

#[async_trait]
impl ModelService for OpenAIResponsesProvider {
    async fn respond(&self, request: ModelRequest) -> Result<ModelReply> {
        let mut response = self
            .send(&ResponsesRequest {
                model: self.model.clone(),
                instructions: request.instructions.clone(),
                input: ResponsesInput::Text(request.message),
                previous_response_id: request.previous.map(|t| t.as_str().to_string()),
                tools: convert_tools(self.tool_definitions()),
            })
            .await?;

        let mut iteration = 0;
        while !response.calls.is_empty() {
            if iteration >= self.max_tool_iterations {
                // The last response still awaits tool output and cannot be resumed.
                return Err(VitaeError::Provider(format!(
                    "Tool loop exceeded {} iterations",
                    self.max_tool_iterations
                )));
            }
            iteration += 1;
            debug!("Tool iteration {} of {}", iteration, self.max_tool_iterations);

            let outputs = self.run_calls(&response.calls).await;
            response = self
                .send(&ResponsesRequest {
                    model: self.model.clone(),
                    instructions: request.instructions.clone(),
                    input: ResponsesInput::Items(outputs),
                    previous_response_id: Some(response.id.clone()),
                    tools: convert_tools(self.tool_definitions()),
                })
                .await?;
        }

        info!(response_id = %response.id, tool_iterations = iteration, "OpenAI response received");

        Ok(ModelReply {
            text: response.text,
            continuation: ContinuationToken::new(response.id),
        })
    }

    fn name(&self) -> &str {
        "openai"
    }
}

// ============================================================================
// Tests
// ============================================================================
