//! Cache configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for a [`crate::TtlCache`]
///
/// # Examples
///
/// ```
/// use regulus_cache::CacheConfig;
///
/// let config = CacheConfig::default();
/// assert_eq!(config.max_entries, 500);
/// assert_eq!(config.default_ttl_secs, 300);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Size cap; inserting a new key beyond this evicts the oldest entries
    /// Default: 500
    pub max_entries: usize,

    /// TTL applied by `set` when the caller does not supply one (in seconds)
    /// Default: 300 (5 minutes)
    pub default_ttl_secs: u64,

    /// How often the background sweep runs (in seconds)
    /// Default: 300 (5 minutes)
    pub sweep_interval_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 500,
            default_ttl_secs: 300,
            sweep_interval_secs: 300,
        }
    }
}

impl CacheConfig {
    /// Get the default TTL as a Duration
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_secs)
    }

    /// Get the sweep interval as a Duration
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    /// How many entries a pressure eviction removes (a tenth of the cap,
    /// at least one)
    pub fn eviction_batch(&self) -> usize {
        (self.max_entries / 10).max(1)
    }
}
