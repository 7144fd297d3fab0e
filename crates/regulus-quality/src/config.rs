//! Quality engine configuration

use serde::{Deserialize, Serialize};

/// Which record of a duplicate group survives remediation
///
/// The other members of the group become removal candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetentionPolicy {
    /// Keep the record that entered the group first (input order)
    #[default]
    FirstSeen,

    /// Keep the record with the most recent parsable publication date;
    /// records without one lose ties
    MostRecent,

    /// Keep the record with the highest validation score
    HighestScore,
}

/// Configuration for duplicate detection and report generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityConfig {
    /// Minimum normalized title similarity for a fuzzy match (0.0-1.0)
    pub fuzzy_threshold: f64,

    /// Minimum content similarity for a corroborating semantic match (0.0-1.0)
    pub content_threshold: f64,

    /// Minimum similarity for a match to join a duplicate group (0.0-1.0)
    pub grouping_threshold: f64,

    /// Cap on per-record validation results embedded in a report payload
    pub max_validation_results: usize,

    /// Cap on the flat duplicate match list embedded in a report payload
    pub max_duplicate_matches: usize,

    /// Which group member survives remediation
    #[serde(default)]
    pub retention: RetentionPolicy,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: 0.85,
            content_threshold: 0.90,
            grouping_threshold: 0.80,
            max_validation_results: 50,
            max_duplicate_matches: 100,
            retention: RetentionPolicy::FirstSeen,
        }
    }
}

impl QualityConfig {
    /// Strict configuration: lower thresholds, catches more near-duplicates
    pub fn strict() -> Self {
        Self {
            fuzzy_threshold: 0.75,
            content_threshold: 0.85,
            grouping_threshold: 0.70,
            ..Self::default()
        }
    }

    /// Permissive configuration: only near-exact matches count as duplicates
    pub fn permissive() -> Self {
        Self {
            fuzzy_threshold: 0.95,
            content_threshold: 0.97,
            grouping_threshold: 0.90,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = QualityConfig::default();
        assert_eq!(config.fuzzy_threshold, 0.85);
        assert_eq!(config.content_threshold, 0.90);
        assert_eq!(config.grouping_threshold, 0.80);
        assert_eq!(config.max_validation_results, 50);
        assert_eq!(config.max_duplicate_matches, 100);
        assert_eq!(config.retention, RetentionPolicy::FirstSeen);
    }

    #[test]
    fn test_strict_config() {
        let config = QualityConfig::strict();
        assert!(config.fuzzy_threshold < QualityConfig::default().fuzzy_threshold);
        assert!(config.grouping_threshold < QualityConfig::default().grouping_threshold);
    }

    #[test]
    fn test_permissive_config() {
        let config = QualityConfig::permissive();
        assert!(config.fuzzy_threshold > QualityConfig::default().fuzzy_threshold);
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = QualityConfig {
            retention: RetentionPolicy::MostRecent,
            ..QualityConfig::default()
        };
        let serialized = serde_json::to_string(&config).unwrap();
        let deserialized: QualityConfig = serde_json::from_str(&serialized).unwrap();

        assert_eq!(deserialized.fuzzy_threshold, config.fuzzy_threshold);
        assert_eq!(deserialized.retention, RetentionPolicy::MostRecent);
    }
}
