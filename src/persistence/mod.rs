//! Progress persistence
//!
//! Features:
//! - Pluggable key-value backend (LocalStorage in the browser, memory elsewhere)
//! - Two JSON blobs per topic: completed problem indices and missed-problem stats
//! - Best-effort: absent or corrupt data loads as empty, failed writes are dropped

pub mod backend;
pub mod progress;

pub use backend::{MemoryStorage, StorageBackend, StorageError};
pub use progress::{MissedEntry, PersistedProgress, ProgressStore};
