//! Providers module - the external model service
//!
//! This module defines the [`ModelService`] trait consumed by the turn
//! handler and a thin OpenAI Responses API adapter implementing it.
//!
//! # Example
//!
//! ```rust,ignore
//! use vitae::providers::{ModelRequest, ModelService, OpenAIResponsesProvider};
//!
//! async fn example() {
//!     let provider = OpenAIResponsesProvider::new("your-api-key");
//!     let request = ModelRequest::new("You are helpful.", "Hello!");
//!
//!     let reply = provider.respond(request).await.unwrap();
//!     println!("{} (continue with {})", reply.text, reply.continuation);
//! }
//! ```

pub mod openai;
mod types;

use crate::error::ProviderError;

pub use openai::OpenAIResponsesProvider;
pub use types::{ModelReply, ModelRequest, ModelService, ToolDefinition};

/// Parse an HTTP status code and response body into a structured [`ProviderError`].
pub fn parse_provider_error(status: u16, body: &str) -> ProviderError {
    match status {
        401 | 403 => ProviderError::Auth(body.to_string()),
        402 => ProviderError::Billing(body.to_string()),
        404 => ProviderError::ModelNotFound(body.to_string()),
        408 | 504 => ProviderError::Timeout(body.to_string()),
        429 => ProviderError::RateLimit(body.to_string()),
        400 => ProviderError::InvalidRequest(body.to_string()),
        500..=599 => ProviderError::ServerError(body.to_string()),
        _ => ProviderError::Unknown(format!("HTTP {}: {}", status, body)),
    }
}
