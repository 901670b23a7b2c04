//! Bounded keys: at most `KEY_SIZE` significant bytes, stored inline.

use crate::error::TableError;
use core::fmt;
use log::warn;

/// Number of significant key bytes. Bytes past this bound take no part in
/// hashing, comparison or storage.
pub const KEY_SIZE: usize = 32;

/// What `put` does with a key longer than `KEY_SIZE`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum KeyPolicy {
    /// Keep the first `KEY_SIZE` bytes. Two keys sharing that prefix become
    /// the same key.
    #[default]
    Truncate,
    /// Refuse the insert with `TableError::KeyTooLong`.
    Reject,
}

/// The significant prefix of `bytes`.
#[inline]
pub(crate) fn significant(bytes: &[u8]) -> &[u8] {
    &bytes[..bytes.len().min(KEY_SIZE)]
}

/// A key of at most `KEY_SIZE` bytes with inline storage.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct BoundedKey {
    bytes: [u8; KEY_SIZE],
    len: u8,
}

impl BoundedKey {
    /// Build a key, failing if `key` is longer than `KEY_SIZE` bytes.
    pub fn new(key: impl AsRef<[u8]>) -> Result<Self, TableError> {
        let key = key.as_ref();
        if key.len() > KEY_SIZE {
            return Err(TableError::KeyTooLong {
                len: key.len(),
                max: KEY_SIZE,
            });
        }
        Ok(Self::from_significant(key))
    }

    /// Build a key from the first `KEY_SIZE` bytes of `key`.
    pub fn truncating(key: impl AsRef<[u8]>) -> Self {
        Self::from_significant(significant(key.as_ref()))
    }

    pub(crate) fn with_policy(key: &[u8], policy: KeyPolicy) -> Result<Self, TableError> {
        match policy {
            KeyPolicy::Reject => Self::new(key),
            KeyPolicy::Truncate => {
                if key.len() > KEY_SIZE {
                    warn!(
                        "truncating {}-byte key to {} bytes: {:?}",
                        key.len(),
                        KEY_SIZE,
                        String::from_utf8_lossy(significant(key))
                    );
                }
                Ok(Self::truncating(key))
            }
        }
    }

    fn from_significant(key: &[u8]) -> Self {
        debug_assert!(key.len() <= KEY_SIZE);
        let mut bytes = [0u8; KEY_SIZE];
        bytes[..key.len()].copy_from_slice(key);
        Self {
            bytes,
            len: key.len() as u8,
        }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True if this key is `other` once `other` is cut to `KEY_SIZE` bytes.
    #[inline]
    pub(crate) fn matches(&self, other: &[u8]) -> bool {
        self.as_bytes() == significant(other)
    }
}

impl AsRef<[u8]> for BoundedKey {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for BoundedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&String::from_utf8_lossy(self.as_bytes()), f)
    }
}

impl fmt::Display for BoundedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_keys_round_trip_bytes() {
        let k = BoundedKey::new("alpha").unwrap();
        assert_eq!(k.as_bytes(), b"alpha");
        assert_eq!(k.len(), 5);
        assert!(!k.is_empty());
        assert!(BoundedKey::new("").unwrap().is_empty());
    }

    #[test]
    fn exact_bound_is_accepted() {
        let s = "x".repeat(KEY_SIZE);
        let k = BoundedKey::new(&s).unwrap();
        assert_eq!(k.len(), KEY_SIZE);
    }

    #[test]
    fn overlong_key_is_rejected_by_new() {
        let s = "x".repeat(KEY_SIZE + 1);
        assert_eq!(
            BoundedKey::new(&s),
            Err(TableError::KeyTooLong {
                len: KEY_SIZE + 1,
                max: KEY_SIZE
            })
        );
    }

    #[test]
    fn truncating_keeps_prefix() {
        let long = format!("{}tail", "p".repeat(KEY_SIZE));
        let k = BoundedKey::truncating(&long);
        assert_eq!(k.as_bytes(), "p".repeat(KEY_SIZE).as_bytes());
        assert!(k.matches(long.as_bytes()));
        assert!(k.matches("p".repeat(KEY_SIZE).as_bytes()));
        assert!(!k.matches(b"p"));
    }

    // Inline storage is zero-padded, but the length still separates a key
    // from the same key with trailing NULs.
    #[test]
    fn trailing_nul_is_significant() {
        let a = BoundedKey::new(b"ab").unwrap();
        let b = BoundedKey::new(b"ab\0").unwrap();
        assert_ne!(a, b);
        assert!(!a.matches(b"ab\0"));
    }

    #[test]
    fn policy_dispatch() {
        let long = "q".repeat(40);
        assert!(BoundedKey::with_policy(long.as_bytes(), KeyPolicy::Reject).is_err());
        let k = BoundedKey::with_policy(long.as_bytes(), KeyPolicy::Truncate).unwrap();
        assert_eq!(k.len(), KEY_SIZE);
        assert_eq!(KeyPolicy::default(), KeyPolicy::Truncate);
    }

    #[test]
    fn debug_and_display_are_textual() {
        let k = BoundedKey::new("beta").unwrap();
        assert_eq!(format!("{:?}", k), "\"beta\"");
        assert_eq!(k.to_string(), "beta");
    }
}
