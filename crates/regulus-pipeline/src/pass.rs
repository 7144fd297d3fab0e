//! Quality pass orchestration
//!
//! A pass fetches the full record collection from the store, hands it to the
//! quality engine, and optionally applies accepted remediation back to the
//! store. Composition with the cache happens here; the engine and the cache
//! stay unaware of each other.

use regulus_cache::TtlCache;
use regulus_domain::RecordStore;
use regulus_quality::{
    generate_report, group_duplicates, removal_candidates, standardize, QualityReport,
};
use serde::{Deserialize, Serialize};

use crate::{PassConfig, PipelineError};

/// Outcome of an applied remediation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RemediationSummary {
    /// Duplicate records deleted
    pub removed: usize,

    /// Records rewritten with standardized fields
    pub standardized: usize,
}

/// One data-quality pass over a record collection
///
/// # Examples
///
/// ```no_run
/// use regulus_pipeline::{PassConfig, QualityPass};
/// # struct SomeStore;
/// # impl regulus_domain::RecordStore for SomeStore {
/// #     type Error = String;
/// #     fn get_all(&self) -> Result<Vec<regulus_domain::Record>, String> { Ok(vec![]) }
/// #     fn get(&self, _: regulus_domain::RecordId) -> Result<Option<regulus_domain::Record>, String> { Ok(None) }
/// #     fn update(&mut self, _: regulus_domain::Record) -> Result<(), String> { Ok(()) }
/// #     fn delete(&mut self, _: regulus_domain::RecordId) -> Result<(), String> { Ok(()) }
/// # }
///
/// let store = SomeStore;
/// let pass = QualityPass::new(PassConfig::default());
///
/// let report = pass.run(&store);
/// println!("{} duplicates", report.duplicate_count);
/// ```
pub struct QualityPass {
    config: PassConfig,
}

impl QualityPass {
    /// Create a pass with the given configuration
    pub fn new(config: PassConfig) -> Self {
        Self { config }
    }

    /// Create a pass with default configuration
    pub fn default_config() -> Self {
        Self::new(PassConfig::default())
    }

    /// Get the pass configuration
    pub fn config(&self) -> &PassConfig {
        &self.config
    }

    /// Run a pass and produce a report
    ///
    /// A storage failure is logged and degrades to an empty report - a
    /// quality pass must never crash its caller. Whether and when to retry
    /// is the caller's decision.
    pub fn run<S: RecordStore>(&self, store: &S) -> QualityReport
    where
        S::Error: std::fmt::Display,
    {
        match store.get_all() {
            Ok(records) => generate_report(&records, &self.config.quality),
            Err(e) => {
                tracing::error!("Quality pass degraded to empty report: {}", e);
                QualityReport::empty()
            }
        }
    }

    /// Run a pass through the cache
    ///
    /// Repeated calls under the same key within the configured report TTL
    /// are served from the cache without recomputation. Tenant isolation, if
    /// needed, is the caller's key to encode.
    pub fn run_cached<S: RecordStore>(
        &self,
        store: &S,
        cache: &TtlCache<QualityReport>,
        key: &str,
    ) -> QualityReport
    where
        S::Error: std::fmt::Display,
    {
        let report: Result<QualityReport, std::convert::Infallible> =
            cache.cached(key, Some(self.config.report_ttl()), || Ok(self.run(store)));
        match report {
            Ok(report) => report,
            Err(never) => match never {},
        }
    }

    /// Apply remediation: delete duplicate removal candidates per the
    /// configured retention policy and write standardized fields back
    ///
    /// Unlike [`QualityPass::run`], store errors propagate here - a
    /// half-applied mutation must surface, not degrade.
    pub fn remediate<S: RecordStore>(
        &self,
        store: &mut S,
    ) -> Result<RemediationSummary, PipelineError>
    where
        S::Error: std::fmt::Display,
    {
        let records = store
            .get_all()
            .map_err(|e| PipelineError::Store(e.to_string()))?;

        let groups = group_duplicates(&records, &self.config.quality);
        let candidates = removal_candidates(&records, &groups, self.config.quality.retention);

        let mut summary = RemediationSummary::default();

        if self.config.dry_run {
            tracing::info!(
                "DRY RUN: would delete {} duplicate records",
                candidates.len()
            );
        } else {
            for id in &candidates {
                store
                    .delete(*id)
                    .map_err(|e| PipelineError::Store(e.to_string()))?;
                summary.removed += 1;
            }
        }

        for record in &records {
            if candidates.contains(&record.id) {
                continue;
            }

            let standardized = standardize(record);
            let mut updated = record.clone();
            if let Some(region) = standardized.region {
                updated.region = Some(region);
            }
            if let Some(category) = standardized.category {
                updated.category = Some(category);
            }
            updated.title = standardized.title;
            if let Some(published) = standardized.published_at {
                updated.published_at = Some(published.to_rfc3339());
            }

            if updated == *record {
                continue;
            }

            if self.config.dry_run {
                tracing::info!("DRY RUN: would standardize record {}", record.id);
            } else {
                store
                    .update(updated)
                    .map_err(|e| PipelineError::Store(e.to_string()))?;
                summary.standardized += 1;
            }
        }

        tracing::info!(
            "Remediation removed {} and standardized {} records",
            summary.removed,
            summary.standardized
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regulus_domain::{Record, RecordId};

    // Mock store for testing
    struct MockStore {
        records: Vec<Record>,
        fail: bool,
    }

    impl MockStore {
        fn new(records: Vec<Record>) -> Self {
            Self {
                records,
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                records: Vec::new(),
                fail: true,
            }
        }
    }

    impl RecordStore for MockStore {
        type Error = String;

        fn get_all(&self) -> Result<Vec<Record>, Self::Error> {
            if self.fail {
                return Err("connection refused".to_string());
            }
            Ok(self.records.clone())
        }

        fn get(&self, id: RecordId) -> Result<Option<Record>, Self::Error> {
            Ok(self.records.iter().find(|r| r.id == id).cloned())
        }

        fn update(&mut self, record: Record) -> Result<(), Self::Error> {
            match self.records.iter_mut().find(|r| r.id == record.id) {
                Some(existing) => {
                    *existing = record;
                    Ok(())
                }
                None => Err(format!("no record {}", record.id)),
            }
        }

        fn delete(&mut self, id: RecordId) -> Result<(), Self::Error> {
            let before = self.records.len();
            self.records.retain(|r| r.id != id);
            if self.records.len() == before {
                return Err(format!("no record {}", id));
            }
            Ok(())
        }
    }

    fn record(id: u128, title: &str) -> Record {
        Record::new(RecordId::from_value(id), title, "")
    }

    #[test]
    fn test_run_produces_report() {
        let store = MockStore::new(vec![
            record(1, "FDA Recall of Pumps"),
            record(2, "FDA  Recall of Pumps"),
            record(3, "Unrelated Update"),
        ]);
        let pass = QualityPass::default_config();

        let report = pass.run(&store);

        assert_eq!(report.total_records, 3);
        assert_eq!(report.duplicate_count, 1);
    }

    #[test]
    fn test_run_degrades_on_store_failure() {
        let store = MockStore::failing();
        let pass = QualityPass::default_config();

        let report = pass.run(&store);

        assert_eq!(report, QualityReport::empty());
    }

    #[test]
    fn test_remediate_deletes_duplicates() {
        let mut store = MockStore::new(vec![
            record(1, "FDA Recall of Pumps"),
            record(2, "FDA  Recall of Pumps"),
            record(3, "Unrelated Update"),
        ]);
        let pass = QualityPass::default_config();

        let summary = pass.remediate(&mut store).unwrap();

        assert_eq!(summary.removed, 1);
        assert_eq!(store.records.len(), 2);
        assert!(store.get(RecordId::from_value(2)).unwrap().is_none());
        assert!(store.get(RecordId::from_value(1)).unwrap().is_some());
    }

    #[test]
    fn test_remediate_standardizes_fields() {
        let mut messy = record(1, " FDA  Recall:  Pumps! ");
        messy.region = Some("United States".to_string());
        messy.category = Some("Class I recall".to_string());
        let mut store = MockStore::new(vec![messy]);
        let pass = QualityPass::default_config();

        let summary = pass.remediate(&mut store).unwrap();

        assert_eq!(summary.standardized, 1);
        let updated = store.get(RecordId::from_value(1)).unwrap().unwrap();
        assert_eq!(updated.title, "FDA Recall: Pumps");
        assert_eq!(updated.region.as_deref(), Some("US"));
        assert_eq!(updated.category.as_deref(), Some("Safety Recall"));
    }

    #[test]
    fn test_remediate_is_idempotent() {
        let mut clean = record(1, "FDA Recall of Pumps");
        clean.region = Some("US".to_string());
        let mut store = MockStore::new(vec![clean]);
        let pass = QualityPass::default_config();

        let summary = pass.remediate(&mut store).unwrap();

        assert_eq!(summary.removed, 0);
        assert_eq!(summary.standardized, 0);
    }

    #[test]
    fn test_remediate_dry_run_leaves_store_untouched() {
        let mut messy = record(1, " FDA  Recall:  Pumps! ");
        messy.region = Some("United States".to_string());
        let duplicate = record(2, " FDA  Recall:  Pumps! ");
        let mut store = MockStore::new(vec![messy, duplicate]);

        let config = PassConfig {
            dry_run: true,
            ..PassConfig::default()
        };
        let pass = QualityPass::new(config);

        let summary = pass.remediate(&mut store).unwrap();

        assert_eq!(summary.removed, 0);
        assert_eq!(summary.standardized, 0);
        assert_eq!(store.records.len(), 2);
        assert_eq!(store.records[0].title, " FDA  Recall:  Pumps! ");
    }

    #[test]
    fn test_remediate_propagates_store_errors() {
        let mut store = MockStore::failing();
        let pass = QualityPass::default_config();

        let result = pass.remediate(&mut store);

        assert!(matches!(result, Err(PipelineError::Store(_))));
    }
}
