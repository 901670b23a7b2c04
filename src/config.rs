//! Table configuration and its builder.

use crate::error::ConfigError;
use crate::hash::DEFAULT_BUCKET_COUNT;
use crate::key::KeyPolicy;

/// Construction-time settings for a `HashTable`. The bucket count is fixed
/// for the life of the table; there is no rehash.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TableConfig {
    pub bucket_count: usize,
    pub key_policy: KeyPolicy,
    /// Upper bound on live entries. `None` means unbounded.
    pub max_entries: Option<usize>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            bucket_count: DEFAULT_BUCKET_COUNT,
            key_policy: KeyPolicy::Truncate,
            max_entries: None,
        }
    }
}

impl TableConfig {
    pub fn builder() -> TableConfigBuilder {
        TableConfigBuilder::default()
    }

    /// Check a config that did not come through the builder, e.g. one
    /// deserialized from a file.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bucket_count == 0 {
            return Err(ConfigError::ZeroBuckets);
        }
        if !is_prime(self.bucket_count) {
            return Err(ConfigError::NotPrime(self.bucket_count));
        }
        if self.max_entries == Some(0) {
            return Err(ConfigError::ZeroEntryLimit);
        }
        Ok(())
    }
}

/// Chained setters ending in a validating `build()`.
#[derive(Clone, Debug, Default)]
pub struct TableConfigBuilder {
    config: TableConfig,
}

impl TableConfigBuilder {
    pub fn bucket_count(mut self, n: usize) -> Self {
        self.config.bucket_count = n;
        self
    }

    pub fn key_policy(mut self, policy: KeyPolicy) -> Self {
        self.config.key_policy = policy;
        self
    }

    pub fn max_entries(mut self, limit: usize) -> Self {
        self.config.max_entries = Some(limit);
        self
    }

    pub fn build(self) -> Result<TableConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Trial division; bucket counts are small enough that this is instant.
pub(crate) fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut d = 3usize;
    while d.saturating_mul(d) <= n {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}
