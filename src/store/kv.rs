//! Asynchronous key-value storage collaborator.
//!
//! All persistence goes through the [`KeyValueStore`] trait: string keys to
//! string documents, with every operation fallible. The engine never assumes
//! a write succeeded; callers persist first and only then advance their
//! in-memory state.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::EngineResult;

/// The storage backend the engine persists its collections through.
///
/// Implementations must be cheap to share across tasks; the engine holds
/// one behind an `Arc` and calls it from request handlers concurrently.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the document stored at `key`, or `None` if the key is absent.
    async fn get(&self, key: &str) -> EngineResult<Option<String>>;

    /// Writes `value` at `key`, replacing any previous document.
    async fn set(&self, key: &str, value: &str) -> EngineResult<()>;

    /// Removes the document at `key`. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> EngineResult<()>;
}

/// In-memory key-value store.
///
/// Thread-safe storage over `RwLock<HashMap>`; documents are lost when the
/// process exits. Suitable for tests and single-process embedding. A
/// deployment wanting durability supplies its own [`KeyValueStore`].
///
/// # Example
///
/// ```
/// use attend_engine::store::{KeyValueStore, MemoryKvStore};
///
/// # async fn demo() {
/// let store = MemoryKvStore::new();
/// store.set("greeting", "hello").await.unwrap();
/// assert_eq!(store.get("greeting").await.unwrap().as_deref(), Some("hello"));
/// # }
/// ```
#[derive(Clone, Default)]
pub struct MemoryKvStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryKvStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        MemoryKvStore {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// The number of keys currently stored.
    pub async fn key_count(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKvStore {
    async fn get(&self, key: &str) -> EngineResult<Option<String>> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> EngineResult<()> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> EngineResult<()> {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        Ok(())
    }
}
