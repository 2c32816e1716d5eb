//! Session module - per-client conversation continuity
//!
//! The registry maps a [`ClientIdentity`] to the latest [`ContinuationToken`]
//! issued by the model service. Only the token is kept; the service holds the
//! conversation itself.
//!
//! # Example
//!
//! ```
//! use vitae::session::{ClientIdentity, ContinuationToken, SessionRegistry};
//!
//! # tokio_test::block_on(async {
//! let registry = SessionRegistry::new();
//! let visitor = ClientIdentity::from("203.0.113.5");
//!
//! assert!(registry.get(&visitor).await.is_none());
//! registry.put(&visitor, ContinuationToken::from("tok-1")).await;
//! assert_eq!(registry.get(&visitor).await, Some(ContinuationToken::from("tok-1")));
//! # });
//! ```

pub mod types;

pub use types::{ClientIdentity, ContinuationToken, UNKNOWN_IDENTITY};

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::debug;

use crate::config::SessionsConfig;

#[derive(Debug, Clone)]
struct Entry {
    token: ContinuationToken,
    written_at: Instant,
}

impl Entry {
    fn is_expired(&self, ttl: Option<Duration>, now: Instant) -> bool {
        ttl.is_some_and(|ttl| now.duration_since(self.written_at) >= ttl)
    }
}

/// Latest continuation token per client.
///
/// # Thread Safety
///
/// Cloning shares the same map. The internal lock is held only for the map
/// operation itself, never while a model call is in flight, so turns from
/// different clients do not wait on each other.
///
/// # Bounds
///
/// Unbounded by default: entries live as long as the process. A `ttl` makes
/// entries older than the limit read as absent; `max_entries` evicts the
/// oldest-written entry when a new client would exceed the cap.
///
/// Two overlapping turns from the same client both write on success and the
/// later write wins; the earlier reply's context is then dropped from the
/// chain.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    entries: Arc<RwLock<HashMap<ClientIdentity, Entry>>>,
    ttl: Option<Duration>,
    max_entries: Option<usize>,
}

impl SessionRegistry {
    /// Create an unbounded registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the configured bounds.
    pub fn from_config(config: &SessionsConfig) -> Self {
        let mut registry = Self::new();
        if let Some(secs) = config.ttl_secs {
            registry = registry.with_ttl(Duration::from_secs(secs));
        }
        if let Some(max) = config.max_entries {
            registry = registry.with_max_entries(max);
        }
        registry
    }

    /// Forget tokens this long after they were written.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Track at most `max` clients (at least one).
    pub fn with_max_entries(mut self, max: usize) -> Self {
        self.max_entries = Some(max.max(1));
        self
    }

    /// Latest token for `identity`, if one is known and not expired.
    pub async fn get(&self, identity: &ClientIdentity) -> Option<ContinuationToken> {
        let entries = self.entries.read().await;
        let entry = entries.get(identity)?;
        if entry.is_expired(self.ttl, Instant::now()) {
            return None;
        }
        Some(entry.token.clone())
    }

    /// Store `token` for `identity`, replacing any previous one.
    pub async fn put(&self, identity: &ClientIdentity, token: ContinuationToken) {
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        if self.ttl.is_some() {
            entries.retain(|_, entry| !entry.is_expired(self.ttl, now));
        }

        if let Some(max) = self.max_entries {
            while entries.len() >= max && !entries.contains_key(identity) {
                let oldest = entries
                    .iter()
                    .min_by_key(|(_, entry)| entry.written_at)
                    .map(|(key, _)| key.clone());
                match oldest {
                    Some(key) => {
                        debug!(identity = %key, "Evicting oldest session");
                        entries.remove(&key);
                    }
                    None => break,
                }
            }
        }

        entries.insert(
            identity.clone(),
            Entry {
                token,
                written_at: now,
            },
        );
    }

    /// Drop expired entries now rather than on the next write.
    ///
    /// Returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        if self.ttl.is_none() {
            return 0;
        }
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(self.ttl, now));
        before - entries.len()
    }

    /// Number of stored entries, expired ones included until purged.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
