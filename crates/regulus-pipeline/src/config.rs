//! Configuration for quality pass orchestration

use regulus_quality::QualityConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for [`crate::QualityPass`] and [`crate::PassWorker`]
///
/// # Examples
///
/// ```
/// use regulus_pipeline::PassConfig;
///
/// // Default: hourly passes, report-only
/// let config = PassConfig::default();
/// assert_eq!(config.pass_interval_minutes, 60);
/// assert!(!config.apply_remediation);
///
/// // Aggressive: frequent passes with remediation applied
/// let config = PassConfig::aggressive();
/// assert!(config.apply_remediation);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassConfig {
    /// Quality engine thresholds and caps
    pub quality: QualityConfig,

    /// How often the background worker runs a pass (in minutes)
    /// Default: 60 (hourly)
    pub pass_interval_minutes: u64,

    /// TTL for reports served through the cache (in seconds)
    /// Default: 300 (5 minutes)
    pub report_ttl_secs: u64,

    /// Whether the worker applies remediation after each pass
    /// Default: false (report-only)
    #[serde(default)]
    pub apply_remediation: bool,

    /// Dry-run mode: log what remediation would change without writing
    /// Default: false
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for PassConfig {
    fn default() -> Self {
        Self {
            quality: QualityConfig::default(),
            pass_interval_minutes: 60,
            report_ttl_secs: 300,
            apply_remediation: false,
            dry_run: false,
        }
    }
}

impl PassConfig {
    /// Frequent passes with strict thresholds and remediation applied
    ///
    /// Suitable once a tenant's ingestion feeds are trusted enough to act on
    /// findings automatically.
    pub fn aggressive() -> Self {
        Self {
            quality: QualityConfig::strict(),
            pass_interval_minutes: 15,
            report_ttl_secs: 60,
            apply_remediation: true,
            dry_run: false,
        }
    }

    /// Infrequent, permissive, report-only passes
    pub fn lenient() -> Self {
        Self {
            quality: QualityConfig::permissive(),
            pass_interval_minutes: 240,
            report_ttl_secs: 1800,
            apply_remediation: false,
            dry_run: false,
        }
    }

    /// Get the pass interval as a Duration
    pub fn pass_interval(&self) -> Duration {
        Duration::from_secs(self.pass_interval_minutes * 60)
    }

    /// Get the report TTL as a Duration
    pub fn report_ttl(&self) -> Duration {
        Duration::from_secs(self.report_ttl_secs)
    }
}
