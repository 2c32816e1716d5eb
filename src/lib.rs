//! Vitae - single-persona career conversation agent
//!
//! Keeps a profile summary fresh from a live web page (with file and
//! compiled-in fallbacks), chains each visitor's turns through an external
//! model service, and sends side-channel notifications.

pub mod agent;
pub mod config;
pub mod error;
pub mod knowledge;
pub mod notify;
pub mod providers;
pub mod session;
pub mod tools;
pub mod utils;

pub use agent::{Agent, PromptComposer, TurnHandler};
pub use config::Config;
pub use error::{Result, VitaeError};
pub use knowledge::{FallbackTier, KnowledgePipeline, KnowledgeStore, RefreshScheduler};
pub use notify::Notifier;
pub use providers::{ModelReply, ModelRequest, ModelService, OpenAIResponsesProvider};
pub use session::{ClientIdentity, ContinuationToken, SessionRegistry};
pub use tools::{Tool, ToolRegistry};
