//! Knowledge module - the persona's profile text and how it stays fresh
//!
//! - `extract`: HTML to single-line text
//! - `pipeline`: ordered fallback chain (live page, backup file, built-in default)
//! - `store`: shared cell holding the current text
//! - `refresh`: bootstrap and periodic background refresh
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use vitae::knowledge::{FallbackTier, KnowledgePipeline, KnowledgeStore, RefreshScheduler};
//!
//! # tokio_test::block_on(async {
//! let store = KnowledgeStore::new();
//! let scheduler = RefreshScheduler::new(
//!     KnowledgePipeline::new(),
//!     store.clone(),
//!     Duration::from_secs(3600),
//! );
//!
//! let tier = scheduler.bootstrap().await;
//! assert_eq!(tier, FallbackTier::HardcodedDefault);
//! assert!(!store.get().is_empty());
//! # });
//! ```

pub mod extract;
pub mod pipeline;
pub mod refresh;
pub mod store;

pub use extract::{collapse_whitespace, extract_profile_text};
pub use pipeline::{
    Acquired, FallbackTier, KnowledgePipeline, KnowledgeSource, LiveFetchSource, LocalFileSource,
    DEFAULT_PROFILE,
};
pub use refresh::{RefreshResult, RefreshScheduler};
pub use store::KnowledgeStore;
