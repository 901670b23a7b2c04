//! SharedHashTable: one mutex around a whole `HashTable`, for callers that
//! need the table from several threads.

use crate::config::TableConfig;
use crate::error::{ConfigError, TableError};
use crate::hash_table::{HashTable, TableStats};
use parking_lot::Mutex;
use std::sync::Arc;

/// Clone to get another handle onto the same table.
pub struct SharedHashTable<V> {
    inner: Arc<Mutex<HashTable<V>>>,
}

impl<V> Clone for SharedHashTable<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> SharedHashTable<V> {
    pub fn new() -> Self {
        Self::from_table(HashTable::new())
    }

    pub fn with_config(config: TableConfig) -> Result<Self, ConfigError> {
        Ok(Self::from_table(HashTable::with_config(config)?))
    }

    pub fn from_table(table: HashTable<V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(table)),
        }
    }

    pub fn contains_key(&self, key: impl AsRef<[u8]>) -> bool {
        self.inner.lock().contains_key(key)
    }

    /// Run `f` on the value for `key` while the lock is held.
    pub fn with_value<R>(&self, key: impl AsRef<[u8]>, f: impl FnOnce(&V) -> R) -> Option<R> {
        self.inner.lock().get(key).map(f)
    }

    pub fn put(&self, key: impl AsRef<[u8]>, value: V) -> Result<Option<V>, TableError> {
        self.inner.lock().put(key, value)
    }

    pub fn remove(&self, key: impl AsRef<[u8]>) -> Option<V> {
        self.inner.lock().remove(key)
    }

    pub fn clear(&self) {
        self.inner.lock().clear()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn stats(&self) -> TableStats {
        self.inner.lock().stats()
    }

    /// Hold the lock across several operations.
    pub fn lock(&self) -> parking_lot::MutexGuard<'_, HashTable<V>> {
        self.inner.lock()
    }
}

impl<V: Clone> SharedHashTable<V> {
    /// Copy of the value for `key`; the lock is released on return.
    pub fn get(&self, key: impl AsRef<[u8]>) -> Option<V> {
        self.inner.lock().get(key).cloned()
    }
}

impl<V> Default for SharedHashTable<V> {
    fn default() -> Self {
        Self::new()
    }
}
