//! Agent module - persona definition, instruction composition and turns
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌────────────────┐     ┌──────────────┐
//! │  Knowledge   │────>│ PromptComposer │────>│    Agent     │
//! │    Store     │     │                │     │ instructions │
//! └──────────────┘     └────────────────┘     └──────────────┘
//!                                                    │
//!                                                    ▼
//! ┌──────────────┐     ┌────────────────┐     ┌──────────────┐
//! │   Session    │<───>│  TurnHandler   │────>│ ModelService │
//! │   Registry   │     │                │     │              │
//! └──────────────┘     └────────────────┘     └──────────────┘
//!                             │
//!                             ▼
//!                      ┌────────────────┐
//!                      │    Notifier    │
//!                      └────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vitae::agent::{Agent, PromptComposer, TurnHandler};
//! use vitae::knowledge::KnowledgeStore;
//! use vitae::notify::LogNotifier;
//! use vitae::providers::OpenAIResponsesProvider;
//! use vitae::session::{ClientIdentity, SessionRegistry};
//!
//! async fn run(store: KnowledgeStore) {
//!     let handler = TurnHandler::new(
//!         Arc::new(Agent::new("Career Conversation Agent", "gpt-5-mini", "")),
//!         PromptComposer::new("Ada Lovelace", store),
//!         SessionRegistry::new(),
//!         Arc::new(OpenAIResponsesProvider::new("sk-...")),
//!         Arc::new(LogNotifier),
//!     );
//!     let reply = handler
//!         .handle(&ClientIdentity::from("203.0.113.5"), "What are your skills?")
//!         .await
//!         .unwrap();
//!     println!("{}", reply);
//! }
//! ```

mod definition;
mod prompt;
mod turn;

pub use definition::Agent;
pub use prompt::PromptComposer;
pub use turn::TurnHandler;
