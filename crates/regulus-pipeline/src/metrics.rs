//! Metrics collection for quality pass operations

use regulus_quality::QualityReport;

use crate::RemediationSummary;

/// Counters accumulated across quality passes
///
/// Tracks what the passes saw and what remediation changed, for operator
/// visibility and for tests.
#[derive(Debug, Clone, Default)]
pub struct PassMetrics {
    /// Passes completed
    pub passes_run: usize,

    /// Records examined across all passes
    pub records_scanned: usize,

    /// Removal candidates found across all passes
    pub duplicates_found: usize,

    /// Validation errors found across all passes
    pub validation_errors: usize,

    /// Duplicate records deleted by remediation
    pub records_removed: usize,

    /// Records rewritten with standardized fields
    pub records_standardized: usize,

    /// Total runtime in seconds
    pub total_runtime_secs: u64,
}

impl PassMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed pass
    pub fn record_pass(&mut self, report: &QualityReport) {
        self.passes_run += 1;
        self.records_scanned += report.total_records;
        self.duplicates_found += report.duplicate_count;
        self.validation_errors += report
            .total_records
            .saturating_sub(report.valid_records);
    }

    /// Record an applied remediation
    pub fn record_remediation(&mut self, summary: &RemediationSummary) {
        self.records_removed += summary.removed;
        self.records_standardized += summary.standardized;
    }

    /// Reset all counters
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let lines = vec![
            "Quality Pass Metrics Summary".to_string(),
            "============================".to_string(),
            format!("Passes run: {}", self.passes_run),
            format!("Records scanned: {}", self.records_scanned),
            format!("Duplicates found: {}", self.duplicates_found),
            format!("Records with errors: {}", self.validation_errors),
            format!("Removed by remediation: {}", self.records_removed),
            format!("Standardized by remediation: {}", self.records_standardized),
            format!("Total runtime: {}s", self.total_runtime_secs),
        ];

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regulus_quality::QualityReport;

    #[test]
    fn test_metrics_creation() {
        let metrics = PassMetrics::new();
        assert_eq!(metrics.passes_run, 0);
        assert_eq!(metrics.records_scanned, 0);
    }

    #[test]
    fn test_record_pass() {
        let mut metrics = PassMetrics::new();
        let mut report = QualityReport::empty();
        report.total_records = 10;
        report.valid_records = 8;
        report.duplicate_count = 2;

        metrics.record_pass(&report);
        metrics.record_pass(&report);

        assert_eq!(metrics.passes_run, 2);
        assert_eq!(metrics.records_scanned, 20);
        assert_eq!(metrics.duplicates_found, 4);
        assert_eq!(metrics.validation_errors, 4);
    }

    #[test]
    fn test_record_remediation() {
        let mut metrics = PassMetrics::new();
        metrics.record_remediation(&RemediationSummary {
            removed: 2,
            standardized: 5,
        });

        assert_eq!(metrics.records_removed, 2);
        assert_eq!(metrics.records_standardized, 5);
    }

    #[test]
    fn test_reset() {
        let mut metrics = PassMetrics::new();
        let mut report = QualityReport::empty();
        report.total_records = 3;
        metrics.record_pass(&report);

        metrics.reset();

        assert_eq!(metrics.passes_run, 0);
        assert_eq!(metrics.records_scanned, 0);
    }

    #[test]
    fn test_summary() {
        let mut metrics = PassMetrics::new();
        let mut report = QualityReport::empty();
        report.total_records = 5;
        report.valid_records = 5;
        metrics.record_pass(&report);
        metrics.total_runtime_secs = 12;

        let summary = metrics.summary();
        assert!(summary.contains("Passes run: 1"));
        assert!(summary.contains("Records scanned: 5"));
        assert!(summary.contains("Total runtime: 12s"));
    }
}
