//! HashTable: fixed bucket array with separate chaining over a slot arena.
//!
//! Entries live in a `SlotMap`; each bucket head and each entry's `next`
//! link is a generational slot key, so a chain is a singly linked list
//! threaded through the arena. New entries are pushed at the head of their
//! chain. Updates replace the value in place and never move an entry.

use crate::config::TableConfig;
use crate::error::{ConfigError, TableError};
use crate::hash::bucket_index;
use crate::key::{significant, BoundedKey};
use core::fmt;
use log::{debug, trace};
use slotmap::{DefaultKey, SlotMap};

/// Stable reference to one entry. Survives value updates; resolves to
/// `None` once the entry is removed, even if its slot is reused.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Handle(DefaultKey);

impl Handle {
    pub(crate) fn new(k: DefaultKey) -> Self {
        Handle(k)
    }
    pub(crate) fn raw_handle(&self) -> DefaultKey {
        self.0
    }

    pub fn key<'a, V>(&self, table: &'a HashTable<V>) -> Option<&'a BoundedKey> {
        table.slots.get(self.0).map(|e| &e.key)
    }

    pub fn value<'a, V>(&self, table: &'a HashTable<V>) -> Option<&'a V> {
        table.slots.get(self.0).map(|e| &e.value)
    }

    pub fn value_mut<'a, V>(&self, table: &'a mut HashTable<V>) -> Option<&'a mut V> {
        table.slots.get_mut(self.0).map(|e| &mut e.value)
    }
}

#[derive(Debug)]
struct Entry<V> {
    key: BoundedKey,
    value: V,
    next: Option<DefaultKey>,
}

/// Occupancy summary. Computing it walks every bucket.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct TableStats {
    pub len: usize,
    pub bucket_count: usize,
    pub occupied_buckets: usize,
    pub longest_chain: usize,
}

pub struct HashTable<V> {
    config: TableConfig,
    buckets: Box<[Option<DefaultKey>]>,
    slots: SlotMap<DefaultKey, Entry<V>>, // live count is slots.len()
}

/// Walks one bucket's chain from its head.
struct Chain<'a, V> {
    slots: &'a SlotMap<DefaultKey, Entry<V>>,
    cur: Option<DefaultKey>,
}

impl<'a, V> Iterator for Chain<'a, V> {
    type Item = (DefaultKey, &'a Entry<V>);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let k = self.cur?;
        let e = self.slots.get(k)?;
        self.cur = e.next;
        Some((k, e))
    }
}

impl<V> HashTable<V> {
    /// Table with 65537 buckets, truncating keys, no entry limit.
    pub fn new() -> Self {
        Self::from_valid_config(TableConfig::default())
    }

    pub fn with_config(config: TableConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: TableConfig) -> Self {
        debug!(
            "new hash table: {} buckets, key policy {:?}, entry limit {:?}",
            config.bucket_count, config.key_policy, config.max_entries
        );
        Self {
            buckets: vec![None; config.bucket_count].into_boxed_slice(),
            slots: SlotMap::with_key(),
            config,
        }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / self.bucket_count() as f64
    }

    #[inline]
    fn bucket_of(&self, key: &[u8]) -> usize {
        bucket_index(significant(key), self.buckets.len())
    }

    fn chain(&self, bucket: usize) -> Chain<'_, V> {
        Chain {
            slots: &self.slots,
            cur: self.buckets.get(bucket).copied().flatten(),
        }
    }

    /// Scan `bucket` for `key`, returning `(previous, matching)` slots.
    fn locate(&self, bucket: usize, key: &[u8]) -> Option<(Option<DefaultKey>, DefaultKey)> {
        let mut prev = None;
        for (k, e) in self.chain(bucket) {
            if e.key.matches(key) {
                return Some((prev, k));
            }
            prev = Some(k);
        }
        None
    }

    fn find_slot(&self, key: &[u8]) -> Option<DefaultKey> {
        self.locate(self.bucket_of(key), key).map(|(_, k)| k)
    }

    /// Unlink `target` from `bucket` given its predecessor, then free it.
    fn detach(
        &mut self,
        bucket: usize,
        prev: Option<DefaultKey>,
        target: DefaultKey,
    ) -> Option<Entry<V>> {
        let next = self.slots.get(target)?.next;
        match prev {
            Some(p) => self.slots.get_mut(p)?.next = next,
            None => self.buckets[bucket] = next,
        }
        self.slots.remove(target)
    }

    pub fn find(&self, key: impl AsRef<[u8]>) -> Option<Handle> {
        self.find_slot(key.as_ref()).map(Handle::new)
    }

    pub fn contains_key(&self, key: impl AsRef<[u8]>) -> bool {
        self.find_slot(key.as_ref()).is_some()
    }

    pub fn get(&self, key: impl AsRef<[u8]>) -> Option<&V> {
        let k = self.find_slot(key.as_ref())?;
        self.slots.get(k).map(|e| &e.value)
    }

    pub fn get_mut(&mut self, key: impl AsRef<[u8]>) -> Option<&mut V> {
        let k = self.find_slot(key.as_ref())?;
        self.slots.get_mut(k).map(|e| &mut e.value)
    }

    /// Associate `value` with `key`, returning the value it replaced.
    ///
    /// A present key keeps its entry (and any `Handle` to it); only the
    /// value changes. An absent key gets a new entry at the head of its
    /// bucket chain. Fails only on an overlong key under
    /// `KeyPolicy::Reject`, or on a new key once `max_entries` is reached.
    pub fn put(&mut self, key: impl AsRef<[u8]>, value: V) -> Result<Option<V>, TableError> {
        let key = BoundedKey::with_policy(key.as_ref(), self.config.key_policy)?;
        let bucket = self.bucket_of(key.as_bytes());

        if let Some((_, k)) = self.locate(bucket, key.as_bytes()) {
            if let Some(entry) = self.slots.get_mut(k) {
                trace!("update {:?} in bucket {}", key, bucket);
                return Ok(Some(core::mem::replace(&mut entry.value, value)));
            }
        }

        if let Some(limit) = self.config.max_entries {
            if self.slots.len() >= limit {
                return Err(TableError::CapacityExhausted { limit });
            }
        }

        let next = self.buckets[bucket];
        let k = self.slots.insert(Entry { key, value, next });
        self.buckets[bucket] = Some(k);
        trace!("insert {:?} into bucket {}", key, bucket);
        Ok(None)
    }

    /// Remove `key`, handing its value back to the caller.
    pub fn remove(&mut self, key: impl AsRef<[u8]>) -> Option<V> {
        let key = key.as_ref();
        let bucket = self.bucket_of(key);
        let (prev, k) = self.locate(bucket, key)?;
        let entry = self.detach(bucket, prev, k)?;
        trace!("remove {:?} from bucket {}", entry.key, bucket);
        Some(entry.value)
    }

    /// Remove the entry `handle` refers to. `None` if it is already gone.
    pub fn remove_handle(&mut self, handle: Handle) -> Option<(BoundedKey, V)> {
        let target = handle.raw_handle();
        let key = self.slots.get(target)?.key;
        let bucket = self.bucket_of(key.as_bytes());
        let prev = self
            .chain(bucket)
            .take_while(|&(k, _)| k != target)
            .last()
            .map(|(k, _)| k);
        let entry = self.detach(bucket, prev, target)?;
        trace!("remove {:?} from bucket {} by handle", entry.key, bucket);
        Some((entry.key, entry.value))
    }

    /// Drop every entry and reset every bucket head.
    pub fn clear(&mut self) {
        debug!("clearing {} entries", self.slots.len());
        self.slots.clear();
        self.buckets.fill(None);
    }

    /// Number of entries chained in bucket `index` (0 if out of range).
    pub fn bucket_len(&self, index: usize) -> usize {
        self.chain(index).count()
    }

    pub fn stats(&self) -> TableStats {
        let mut stats = TableStats {
            len: self.len(),
            bucket_count: self.bucket_count(),
            ..TableStats::default()
        };
        for i in 0..self.buckets.len() {
            let n = self.bucket_len(i);
            if n > 0 {
                stats.occupied_buckets += 1;
                stats.longest_chain = stats.longest_chain.max(n);
            }
        }
        stats
    }

    /// Structural check used by tests: every chained entry hashes to its
    /// bucket, keys are unique, and the chains hold exactly `len()` entries.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        let mut seen = std::collections::HashSet::new();
        let mut reachable = 0usize;
        for i in 0..self.buckets.len() {
            for (_, e) in self.chain(i) {
                assert_eq!(self.bucket_of(e.key.as_bytes()), i, "{:?} in wrong bucket", e.key);
                assert!(seen.insert(e.key), "duplicate key {:?}", e.key);
                reachable += 1;
            }
        }
        assert_eq!(reachable, self.len(), "live count disagrees with chains");
    }
}

impl<V> Default for HashTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for HashTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashTable")
            .field("len", &self.len())
            .field("bucket_count", &self.bucket_count())
            .field("key_policy", &self.config.key_policy)
            .finish()
    }
}
