//! Concurrent id-keyed stores
//!
//! A `Registry` maps string ids to live game objects (engines, rooms). The
//! map supports concurrent insert/get/remove; each stored value sits behind
//! its own mutex, so once a handle is obtained, mutations on it serialize
//! and never interleave with other operations on the same value.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Shared handle to a registered value
pub type Handle<T> = Arc<Mutex<T>>;

/// Ephemeral id → value store
///
/// Values live for the process lifetime unless explicitly removed; there is
/// no persistence.
#[derive(Debug)]
pub struct Registry<T> {
    entries: RwLock<HashMap<String, Handle<T>>>,
}

impl<T> Registry<T> {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Insert a value, returning its handle
    ///
    /// An existing value under the same id is replaced.
    pub async fn insert(&self, id: impl Into<String>, value: T) -> Handle<T> {
        let handle = Arc::new(Mutex::new(value));
        self.entries
            .write()
            .await
            .insert(id.into(), Arc::clone(&handle));
        handle
    }

    /// Look up a handle by id
    pub async fn get(&self, id: &str) -> Option<Handle<T>> {
        self.entries.read().await.get(id).cloned()
    }

    /// Remove a value, returning its handle if it existed
    ///
    /// In-flight operations holding the handle complete normally.
    pub async fn remove(&self, id: &str) -> Option<Handle<T>> {
        self.entries.write().await.remove(id)
    }

    /// Number of registered values
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the registry is empty
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}
