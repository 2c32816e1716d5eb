//! Shared knowledge cell.
//!
//! Written by the refresh scheduler, read by prompt composition on every
//! turn. A single mutex guards the slot; it is never held across an await.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Local};

use super::pipeline::{Acquired, FallbackTier};

#[derive(Debug, Default)]
struct Slot {
    text: String,
    tier: Option<FallbackTier>,
    updated_at: Option<DateTime<Local>>,
}

/// Last-writer-wins holder of the current knowledge text.
///
/// Cloning shares the same slot.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeStore {
    slot: Arc<Mutex<Slot>>,
}

impl KnowledgeStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        // Writers replace the slot in one assignment, so a poisoned guard
        // still holds a whole value.
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the stored text.
    pub fn set(&self, text: impl Into<String>) {
        let text = text.into();
        let mut slot = self.lock();
        *slot = Slot {
            text,
            tier: None,
            updated_at: Some(Local::now()),
        };
    }

    /// Replace the stored text with a pipeline result, keeping its tier.
    pub fn publish(&self, acquired: Acquired) {
        let mut slot = self.lock();
        *slot = Slot {
            text: acquired.text,
            tier: Some(acquired.tier),
            updated_at: Some(Local::now()),
        };
    }

    /// Snapshot of the current text.
    pub fn get(&self) -> String {
        self.lock().text.clone()
    }

    /// Tier of the last published result, if it came from the pipeline.
    pub fn tier(&self) -> Option<FallbackTier> {
        self.lock().tier
    }

    /// When the text was last replaced.
    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.lock().updated_at
    }

    pub fn is_empty(&self) -> bool {
        self.lock().text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_is_empty() {
        let store = KnowledgeStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get(), "");
        assert!(store.tier().is_none());
        assert!(store.last_updated().is_none());
    }

    #[test]
    fn test_set_replaces_value() {
        let store = KnowledgeStore::new();
        store.set("first");
        store.set("second");
        assert_eq!(store.get(), "second");
        assert!(store.last_updated().is_some());
        assert!(store.tier().is_none());
    }

    #[test]
    fn test_publish_records_tier() {
        let store = KnowledgeStore::new();
        store.publish(Acquired {
            tier: FallbackTier::LocalFile,
            text: "from file".into(),
        });
        assert_eq!(store.get(), "from file");
        assert_eq!(store.tier(), Some(FallbackTier::LocalFile));
    }

    #[test]
    fn test_clones_share_slot() {
        let store = KnowledgeStore::new();
        let reader = store.clone();
        store.set("shared");
        assert_eq!(reader.get(), "shared");
    }

    #[test]
    fn test_readers_never_see_partial_values() {
        let store = KnowledgeStore::new();
        let a = "a".repeat(10_000);
        let b = "b".repeat(20_000);
        store.set(a.clone());

        let writer = {
            let store = store.clone();
            let (a, b) = (a.clone(), b.clone());
            std::thread::spawn(move || {
                for i in 0..200 {
                    store.set(if i % 2 == 0 { b.clone() } else { a.clone() });
                }
            })
        };

        for _ in 0..200 {
            let seen = store.get();
            assert!(seen == a || seen == b);
        }
        writer.join().unwrap();
    }
}
