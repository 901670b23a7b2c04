//! pjw-hashtable: a fixed-capacity, separate-chaining hash table mapping
//! short byte-string keys to caller-chosen values.
//!
//! Internal Design:
//!
//! Summary
//! - One hash function (`hash::hashpjw`, the Dragon Book PJW hash) and one
//!   chain-search routine serve every operation.
//! - Layers:
//!   - `BoundedKey`: at most `KEY_SIZE` (32) significant bytes stored
//!     inline; bytes past the bound are ignored for hashing and comparison.
//!   - `HashTable<V>`: a fixed, prime-sized array of bucket heads; each
//!     bucket is a singly linked chain of entries threaded through a
//!     `SlotMap` arena. Newest entries sit at the head of their chain.
//!   - `SharedHashTable<V>`: the same table behind one mutex for use from
//!     several threads.
//!
//! Constraints
//! - No resizing. The bucket count (65537 unless configured) is fixed at
//!   construction.
//! - `HashTable` itself does no locking; mutation takes `&mut self`.
//! - No enumeration of entries.
//! - Any number of tables may coexist; there is no global instance.
//!
//! Keys and values
//! - Keys are anything `AsRef<[u8]>`. Overlong keys are truncated on `put`
//!   (with a `log::warn!`) or rejected, per `KeyPolicy`.
//! - Values are generic and never inspected. `put` returns the value it
//!   replaced and `remove` returns the removed value, so ownership goes
//!   back to the caller. Store references or handles if the table must not
//!   own the data.
//!
//! Failure semantics
//! - A missing key is `None`, never an error.
//! - `put` is the only fallible operation: `TableError::KeyTooLong` under
//!   `KeyPolicy::Reject`, `TableError::CapacityExhausted` when a configured
//!   entry limit is reached.
//!
//! Handles
//! - `find` returns a `Handle` (a generational slot key). A handle survives
//!   value updates and stops resolving once its entry is removed; it never
//!   aliases a later entry that reuses the slot.

pub mod config;
pub mod error;
pub mod hash;
pub mod hash_table;
mod hash_table_proptest;
pub mod key;
pub mod shared;
#[cfg(test)]
mod testing;

// Public surface
pub use config::{TableConfig, TableConfigBuilder};
pub use error::{ConfigError, TableError};
pub use hash::{bucket_index, hashpjw, DEFAULT_BUCKET_COUNT};
pub use hash_table::{Handle, HashTable, TableStats};
pub use key::{BoundedKey, KeyPolicy, KEY_SIZE};
pub use shared::SharedHashTable;
