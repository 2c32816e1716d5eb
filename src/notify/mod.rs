//! Notify module - best-effort side-channel notifications
//!
//! Notifications never fail the caller: implementations swallow and log
//! their own errors and report delivery as a `bool`.

pub mod pushover;

pub use pushover::PushoverNotifier;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::config::NotifyConfig;

/// Sink for short plain-text notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `text`. Returns whether delivery succeeded.
    async fn notify(&self, text: &str) -> bool;
}

/// Writes notifications to the log only.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, text: &str) -> bool {
        info!(component = "notify", "{}", text);
        true
    }
}

/// Build the configured notifier.
pub fn from_config(config: &NotifyConfig) -> Arc<dyn Notifier> {
    if config.enabled {
        Arc::new(PushoverNotifier::from_config(config))
    } else {
        Arc::new(LogNotifier)
    }
}
