//! Key-value storage backends

use std::collections::HashMap;

use thiserror::Error;

/// Errors surfaced by storage backends
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,

    #[error("storage quota exceeded")]
    QuotaExceeded,

    #[error("storage error: {0}")]
    Backend(String),
}

/// A durable string key-value store
pub trait StorageBackend {
    /// Read a value, `Ok(None)` if the key is absent
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory backend for native runs and tests
///
/// Can simulate an unavailable store or a byte quota to exercise failure paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
    available: bool,
    /// Maximum total bytes of keys plus values
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
            available: true,
            quota: None,
        }
    }

    /// A store that rejects every read and write
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// A store that rejects writes once `bytes` would be exceeded
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            quota: Some(bytes),
            ..Self::new()
        }
    }

    /// Seed a raw value directly, bypassing availability and quota
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.items.insert(key.into(), value.into());
    }

    /// Raw value for a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.items
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        if !self.available {
            return Err(StorageError::Unavailable);
        }
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if !self.available {
            return Err(StorageError::Unavailable);
        }
        if let Some(quota) = self.quota {
            if self.used_bytes_without(key) + key.len() + value.len() > quota {
                return Err(StorageError::QuotaExceeded);
            }
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_round_trip() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get_item("k"), Ok(None));
        storage.set_item("k", "v").unwrap();
        assert_eq!(storage.get_item("k"), Ok(Some("v".to_string())));
    }

    #[test]
    fn test_unavailable_rejects_everything() {
        let mut storage = MemoryStorage::unavailable();
        assert_eq!(storage.get_item("k"), Err(StorageError::Unavailable));
        assert_eq!(storage.set_item("k", "v"), Err(StorageError::Unavailable));
    }

    #[test]
    fn test_quota_counts_replaced_value_once() {
        let mut storage = MemoryStorage::with_quota(8);
        storage.set_item("ab", "cdef").unwrap();
        // Replacing "ab" frees its old bytes first
        storage.set_item("ab", "cdefgh").unwrap();
        assert_eq!(storage.set_item("x", "yy"), Err(StorageError::QuotaExceeded));
        assert_eq!(storage.get("x"), None);
    }
}
