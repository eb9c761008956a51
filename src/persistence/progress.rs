//! Per-topic progress store
//!
//! Progress is stored as two JSON blobs per topic:
//! - `finance_completed_<topic>`: array of completed problem indices
//! - `finance_missed_<topic>`: object keyed by problem id with miss statistics

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;

use super::backend::StorageBackend;
use crate::consts::STORAGE_NAMESPACE;
use crate::problem::Difficulty;

/// Statistics for a problem answered incorrectly since it was last answered correctly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissedEntry {
    pub topic: String,
    pub difficulty: Difficulty,
    /// Incorrect attempts accumulated across sessions
    pub attempts: u32,
}

/// Durable projection of a session's progress
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedProgress {
    pub completed: BTreeSet<usize>,
    pub missed: BTreeMap<String, MissedEntry>,
}

impl PersistedProgress {
    pub fn is_empty(&self) -> bool {
        self.completed.is_empty() && self.missed.is_empty()
    }
}

/// Loads and saves progress through a key-value backend
#[derive(Debug, Clone)]
pub struct ProgressStore<B> {
    backend: B,
    namespace: String,
}

impl<B: StorageBackend> ProgressStore<B> {
    pub fn new(backend: B) -> Self {
        Self::with_namespace(backend, STORAGE_NAMESPACE)
    }

    /// Use a custom key prefix instead of the default namespace
    pub fn with_namespace(backend: B, namespace: impl Into<String>) -> Self {
        Self {
            backend,
            namespace: namespace.into(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn completed_key(&self, topic_key: &str) -> String {
        format!("{}completed_{}", self.namespace, topic_key)
    }

    pub fn missed_key(&self, topic_key: &str) -> String {
        format!("{}missed_{}", self.namespace, topic_key)
    }

    /// Load progress for a topic
    ///
    /// Each blob is read independently; a missing, unreadable or corrupt blob
    /// yields its empty default.
    pub fn load(&self, topic_key: &str) -> PersistedProgress {
        let completed: BTreeSet<usize> = self.read_json(&self.completed_key(topic_key));
        let missed: BTreeMap<String, MissedEntry> = self.read_json(&self.missed_key(topic_key));

        if completed.is_empty() && missed.is_empty() {
            log::info!("No saved progress for '{}', starting fresh", topic_key);
        } else {
            log::info!(
                "Loaded progress for '{}': {} completed, {} missed",
                topic_key,
                completed.len(),
                missed.len()
            );
        }

        PersistedProgress { completed, missed }
    }

    /// Save progress for a topic
    ///
    /// Failures (quota, unavailable store) are logged and otherwise ignored.
    pub fn save(
        &mut self,
        topic_key: &str,
        completed: &BTreeSet<usize>,
        missed: &BTreeMap<String, MissedEntry>,
    ) {
        let completed_key = self.completed_key(topic_key);
        let missed_key = self.missed_key(topic_key);
        self.write_json(&completed_key, completed);
        self.write_json(&missed_key, missed);
    }

    fn read_json<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let raw = match self.backend.get_item(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return T::default(),
            Err(e) => {
                log::warn!("Could not read '{}': {}", key, e);
                return T::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Discarding corrupt data in '{}': {}", key, e);
                T::default()
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not serialize '{}': {}", key, e);
                return;
            }
        };

        match self.backend.set_item(key, &json) {
            Ok(()) => log::debug!("Saved '{}' ({} bytes)", key, json.len()),
            Err(e) => log::warn!("Progress not saved to '{}': {}", key, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    fn missed(topic: &str, attempts: u32) -> MissedEntry {
        MissedEntry {
            topic: topic.to_string(),
            difficulty: Difficulty::Hard,
            attempts,
        }
    }

    #[test]
    fn test_keys_are_namespaced_by_topic() {
        let store = ProgressStore::new(MemoryStorage::new());
        assert_eq!(store.completed_key("tvm"), "finance_completed_tvm");
        assert_eq!(store.missed_key("bonds"), "finance_missed_bonds");
    }

    #[test]
    fn test_save_then_load() {
        let mut store = ProgressStore::new(MemoryStorage::new());
        let completed: BTreeSet<usize> = [2, 0].into_iter().collect();
        let mut missed_map = BTreeMap::new();
        missed_map.insert("npv-3".to_string(), missed("NPV", 2));

        store.save("tvm", &completed, &missed_map);

        assert_eq!(store.backend().get("finance_completed_tvm"), Some("[0,2]"));
        assert_eq!(
            store.backend().get("finance_missed_tvm"),
            Some(r#"{"npv-3":{"topic":"NPV","difficulty":"hard","attempts":2}}"#)
        );

        let loaded = store.load("tvm");
        assert_eq!(loaded.completed, completed);
        assert_eq!(loaded.missed, missed_map);
    }

    #[test]
    fn test_topics_do_not_collide() {
        let mut store = ProgressStore::new(MemoryStorage::new());
        let completed: BTreeSet<usize> = [1].into_iter().collect();
        store.save("tvm", &completed, &BTreeMap::new());

        assert!(store.load("bonds").is_empty());
        assert_eq!(store.load("tvm").completed, completed);
    }

    #[test]
    fn test_missing_data_loads_empty() {
        let store = ProgressStore::new(MemoryStorage::new());
        assert!(store.load("tvm").is_empty());
    }

    #[test]
    fn test_corrupt_data_loads_empty() {
        let mut backend = MemoryStorage::new();
        backend.insert("finance_completed_tvm", "{not json");
        backend.insert("finance_missed_tvm", "[1, 2, 3]");
        let store = ProgressStore::new(backend);

        assert_eq!(store.load("tvm"), PersistedProgress::default());
    }

    #[test]
    fn test_corrupt_blob_does_not_discard_the_other() {
        let mut backend = MemoryStorage::new();
        backend.insert("finance_completed_tvm", "[3, 1]");
        backend.insert("finance_missed_tvm", r#"{"x": {"topic": 5}}"#);
        let store = ProgressStore::new(backend);

        let loaded = store.load("tvm");
        assert_eq!(loaded.completed, [1, 3].into_iter().collect::<BTreeSet<usize>>());
        assert!(loaded.missed.is_empty());
    }

    #[test]
    fn test_unavailable_storage_is_silent() {
        let mut store = ProgressStore::new(MemoryStorage::unavailable());
        store.save("tvm", &[0].into_iter().collect::<BTreeSet<usize>>(), &BTreeMap::new());
        assert!(store.load("tvm").is_empty());
    }

    #[test]
    fn test_quota_exceeded_is_silent() {
        let mut store = ProgressStore::new(MemoryStorage::with_quota(4));
        store.save("tvm", &[0, 1, 2].into_iter().collect::<BTreeSet<usize>>(), &BTreeMap::new());
        assert_eq!(store.backend().get("finance_completed_tvm"), None);
    }
}
