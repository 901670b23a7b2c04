//! Error types. Absence of a key is never an error; these cover the
//! conditions `put` and configuration can actually fail on.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("key is {len} bytes, longer than the {max}-byte limit")]
    KeyTooLong { len: usize, max: usize },
    #[error("table is full: entry limit of {limit} reached")]
    CapacityExhausted { limit: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("bucket count must be non-zero")]
    ZeroBuckets,
    #[error("bucket count {0} is not prime")]
    NotPrime(usize),
    #[error("entry limit must be non-zero when set")]
    ZeroEntryLimit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_numbers() {
        let e = TableError::KeyTooLong { len: 40, max: 32 };
        assert_eq!(
            e.to_string(),
            "key is 40 bytes, longer than the 32-byte limit"
        );
        let e = TableError::CapacityExhausted { limit: 3 };
        assert_eq!(e.to_string(), "table is full: entry limit of 3 reached");
        assert_eq!(
            ConfigError::NotPrime(100).to_string(),
            "bucket count 100 is not prime"
        );
    }
}
