//! Background knowledge refresh.
//!
//! [`RefreshScheduler::bootstrap`] fills the store once before traffic is
//! accepted; [`RefreshScheduler::start`] then re-runs the pipeline on a fixed
//! interval for the life of the process.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use serde::Serialize;
use tokio::sync::RwLock;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

use crate::error::Result;
use crate::utils::string::preview;

use super::pipeline::{FallbackTier, KnowledgePipeline};
use super::store::KnowledgeStore;

const MIN_INTERVAL: Duration = Duration::from_millis(10);
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Outcome of one refresh cycle.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshResult {
    /// When the cycle finished.
    pub timestamp: DateTime<Local>,
    /// Tier that produced the new text, if the cycle published one.
    pub tier: Option<FallbackTier>,
    /// Why the cycle failed, if it did.
    pub error: Option<String>,
}

impl RefreshResult {
    fn ok(tier: FallbackTier) -> Self {
        Self {
            timestamp: Local::now(),
            tier: Some(tier),
            error: None,
        }
    }

    fn err(msg: &str) -> Self {
        Self {
            timestamp: Local::now(),
            tier: None,
            error: Some(msg.to_string()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Periodically re-derives the knowledge text and publishes it to the store.
pub struct RefreshScheduler {
    pipeline: Arc<KnowledgePipeline>,
    store: KnowledgeStore,
    interval: Duration,
    running: Arc<RwLock<bool>>,
    /// Bumped by every `start` and `stop`; a loop exits once it is stale.
    generation: Arc<AtomicU64>,
    /// Count of consecutive failed cycles.
    consecutive_failures: Arc<AtomicU32>,
    /// Threshold before warning about repeated failures.
    failure_alert_threshold: u32,
}

impl RefreshScheduler {
    /// Create a scheduler that refreshes `store` every `interval`.
    pub fn new(pipeline: KnowledgePipeline, store: KnowledgeStore, interval: Duration) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            store,
            interval: interval.max(MIN_INTERVAL),
            running: Arc::new(RwLock::new(false)),
            generation: Arc::new(AtomicU64::new(0)),
            consecutive_failures: Arc::new(AtomicU32::new(0)),
            failure_alert_threshold: 3,
        }
    }

    /// The store this scheduler writes to.
    pub fn store(&self) -> &KnowledgeStore {
        &self.store
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run the pipeline once and publish the result.
    ///
    /// Await this before accepting traffic: when it returns the store holds a
    /// non-empty value, the compiled-in default at worst.
    pub async fn bootstrap(&self) -> FallbackTier {
        let acquired = self.pipeline.acquire().await;
        let tier = acquired.tier;
        info!(
            tier = %tier,
            summary = %preview(&acquired.text, 100),
            "Knowledge bootstrapped"
        );
        self.store.publish(acquired);
        tier
    }

    /// Start the refresh loop in the background.
    ///
    /// The first refresh happens one interval after this call. The task is
    /// never joined; it ends with the runtime.
    pub async fn start(&self) -> Result<()> {
        let generation = {
            let mut running = self.running.write().await;
            if *running {
                warn!("Refresh scheduler already running");
                return Ok(());
            }
            *running = true;
            self.generation.fetch_add(1, Ordering::SeqCst) + 1
        };
        let current_generation = Arc::clone(&self.generation);

        let pipeline = Arc::clone(&self.pipeline);
        let store = self.store.clone();
        let interval_duration = self.interval;
        let running = Arc::clone(&self.running);
        let consecutive_failures = Arc::clone(&self.consecutive_failures);
        let failure_threshold = self.failure_alert_threshold;

        info!(
            "Refresh scheduler started (interval={}s)",
            interval_duration.as_secs()
        );

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval_duration);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.tick().await;

            loop {
                ticker.tick().await;

                if !*running.read().await
                    || current_generation.load(Ordering::SeqCst) != generation
                {
                    crate::log_component!(info, "refresh", "Refresh scheduler stopped");
                    break;
                }

                let result = Self::cycle(&pipeline, &store).await;

                if result.is_ok() {
                    consecutive_failures.store(0, Ordering::Relaxed);
                } else {
                    let count = consecutive_failures.fetch_add(1, Ordering::Relaxed) + 1;
                    if count >= failure_threshold {
                        warn!(
                            consecutive_failures = count,
                            "Refresh: {} consecutive failures, knowledge may be stale", count
                        );
                    }
                }
            }
        });

        Ok(())
    }

    /// Stop the refresh loop after its current wait.
    ///
    /// A cycle already in progress finishes; a later `start` spawns a fresh
    /// loop and the stopped one never runs another cycle.
    pub async fn stop(&self) {
        let mut running = self.running.write().await;
        *running = false;
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Returns whether the loop is running.
    pub async fn is_running(&self) -> bool {
        *self.running.read().await
    }

    /// Run one refresh cycle immediately.
    pub async fn refresh_now(&self) -> RefreshResult {
        Self::cycle(&self.pipeline, &self.store).await
    }

    /// Returns the current count of consecutive failed cycles.
    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures.load(Ordering::Relaxed)
    }

    /// Returns true while failures stay below the alert threshold.
    pub fn is_healthy(&self) -> bool {
        self.consecutive_failures() < self.failure_alert_threshold
    }

    /// One guarded refresh: the pipeline runs in its own task so a panic in a
    /// source is reported here instead of killing the loop. The store is only
    /// written on success.
    async fn cycle(pipeline: &Arc<KnowledgePipeline>, store: &KnowledgeStore) -> RefreshResult {
        let pipeline = Arc::clone(pipeline);
        let handle = tokio::spawn(async move { pipeline.acquire().await });

        match handle.await {
            Ok(acquired) => {
                let tier = acquired.tier;
                store.publish(acquired);
                info!(
                    tier = %tier,
                    "Refreshed knowledge at {}",
                    Local::now().format(TIMESTAMP_FORMAT)
                );
                RefreshResult::ok(tier)
            }
            Err(e) => {
                error!(
                    error = %e,
                    "Failed to refresh knowledge at {}",
                    Local::now().format(TIMESTAMP_FORMAT)
                );
                RefreshResult::err(&e.to_string())
            }
        }
    }
}
