//! Aggregate quality reporting over a full record collection

use regulus_domain::{Record, RecordId};
use serde::{Deserialize, Serialize};

use crate::config::QualityConfig;
use crate::duplicates::{self, group_key, SimilarityMatch};
use crate::validate::{validate_record, ValidationResult};

/// Validation outcome for one record, as embedded in a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordValidation {
    /// Record the result belongs to
    pub record_id: RecordId,

    /// The validation outcome
    pub validation: ValidationResult,
}

/// Coarse duplicate cluster keyed by title prefix
///
/// Deliberately weaker than the scan's own grouping: records cluster on the
/// lowercased first 50 characters of their title, tolerating drift further
/// out. Meant as a second, display-oriented view, not as remediation input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleCluster {
    /// Shared title prefix
    pub key: String,

    /// Members, in match order
    pub record_ids: Vec<RecordId>,
}

/// Terminal artifact of a quality pass
///
/// Created fresh on every pass and never persisted as a mutable entity;
/// callers may cache one but it is not an update target. Aggregate counts
/// are computed over the full record set; only the embedded per-record lists
/// are capped for payload size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    /// Number of records examined
    pub total_records: usize,

    /// Records with no validation errors
    pub valid_records: usize,

    /// Records with at least one error
    pub records_with_errors: usize,

    /// Records with at least one warning
    pub records_with_warnings: usize,

    /// Arithmetic mean of per-record scores (0.0 for an empty collection)
    pub average_quality_score: f64,

    /// Number of removal candidates across all duplicate groups
    pub duplicate_count: usize,

    /// Coarse title-keyed duplicate clusters
    pub duplicate_groups: Vec<TitleCluster>,

    /// Flat duplicate match list, capped at `max_duplicate_matches`
    pub duplicates: Vec<SimilarityMatch>,

    /// Per-record validation results, capped at `max_validation_results`
    pub validations: Vec<RecordValidation>,

    /// Advisory, human-readable findings
    pub recommendations: Vec<String>,
}

impl QualityReport {
    /// Zero-finding report, used when a pass degrades on collaborator failure
    pub fn empty() -> Self {
        Self {
            total_records: 0,
            valid_records: 0,
            records_with_errors: 0,
            records_with_warnings: 0,
            average_quality_score: 0.0,
            duplicate_count: 0,
            duplicate_groups: Vec::new(),
            duplicates: Vec::new(),
            validations: Vec::new(),
            recommendations: Vec::new(),
        }
    }
}

/// Run validation and duplicate detection over `records` and aggregate the
/// findings into one report
pub fn generate_report(records: &[Record], config: &QualityConfig) -> QualityReport {
    let mut validations: Vec<RecordValidation> = records
        .iter()
        .map(|record| RecordValidation {
            record_id: record.id,
            validation: validate_record(record),
        })
        .collect();

    let mut matches = duplicates::find_matches(records, config);
    let groups = duplicates::group_duplicates(records, config);

    let total_records = records.len();
    let valid_records = validations.iter().filter(|v| v.validation.is_valid).count();
    let records_with_errors = validations
        .iter()
        .filter(|v| !v.validation.errors.is_empty())
        .count();
    let records_with_warnings = validations
        .iter()
        .filter(|v| !v.validation.warnings.is_empty())
        .count();
    let average_quality_score = if total_records == 0 {
        0.0
    } else {
        validations
            .iter()
            .map(|v| v.validation.score as f64)
            .sum::<f64>()
            / total_records as f64
    };

    let duplicate_count: usize = groups.iter().map(|g| g.records.len() - 1).sum();
    let error_count: usize = validations.iter().map(|v| v.validation.errors.len()).sum();
    let low_quality = validations
        .iter()
        .filter(|v| v.validation.score < 60)
        .count();

    let recommendations = build_recommendations(
        total_records,
        valid_records,
        average_quality_score,
        duplicate_count,
        error_count,
        low_quality,
    );

    let duplicate_groups = cluster_by_title(&matches);

    matches.truncate(config.max_duplicate_matches);
    validations.truncate(config.max_validation_results);

    QualityReport {
        total_records,
        valid_records,
        records_with_errors,
        records_with_warnings,
        average_quality_score,
        duplicate_count,
        duplicate_groups,
        duplicates: matches,
        validations,
        recommendations,
    }
}

fn build_recommendations(
    total: usize,
    valid: usize,
    average: f64,
    duplicate_count: usize,
    error_count: usize,
    low_quality: usize,
) -> Vec<String> {
    let mut recommendations = Vec::new();
    if total == 0 {
        return recommendations;
    }

    if average < 70.0 {
        recommendations.push(format!(
            "Average quality score {:.0} is below the acceptable threshold of 70",
            average
        ));
    }
    if duplicate_count as f64 > total as f64 * 0.10 {
        recommendations.push(
            "High duplicate rate detected; review ingestion sources for overlapping feeds"
                .to_string(),
        );
    }
    if error_count > 0 {
        recommendations.push(format!(
            "{} validation errors found; affected records should be corrected or re-ingested",
            error_count
        ));
    }
    if low_quality > 0 {
        recommendations.push(format!(
            "{} low-quality records scored below 60; consider enrichment or removal",
            low_quality
        ));
    }
    if (valid as f64) < total as f64 * 0.95 {
        recommendations
            .push("Less than 95% of records pass validation; strengthen validation at ingestion".to_string());
    }

    recommendations
}

fn cluster_by_title(matches: &[SimilarityMatch]) -> Vec<TitleCluster> {
    let mut clusters: Vec<TitleCluster> = Vec::new();

    for m in matches {
        let key = group_key(&m.title);
        match clusters.iter_mut().find(|c| c.key == key) {
            Some(cluster) => {
                if !cluster.record_ids.contains(&m.id) {
                    cluster.record_ids.push(m.id);
                }
            }
            None => clusters.push(TitleCluster {
                key,
                record_ids: vec![m.id],
            }),
        }
    }

    clusters.retain(|c| c.record_ids.len() > 1);
    clusters
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_record(id: u128, title: &str) -> Record {
        // Content varies with the title so unrelated fixtures never share a
        // body verbatim
        let mut record = Record::new(
            RecordId::from_value(id),
            title,
            format!(
                "The agency published an update titled {} describing new \
                 expectations for manufacturers in this area.",
                title
            ),
        );
        record.region = Some("US".to_string());
        record.source = Some("FDA MedWatch".to_string());
        record.authority = Some("FDA".to_string());
        record.published_at = Some("2024-03-20".to_string());
        record
    }

    #[test]
    fn test_empty_collection() {
        let report = generate_report(&[], &QualityConfig::default());

        assert_eq!(report.total_records, 0);
        assert_eq!(report.average_quality_score, 0.0);
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn test_aggregation_scenario() {
        // Ten records: two duplicate pairs (one fuzzy, one exact), six unique
        let mut records = vec![
            complete_record(1, "FDA Recall of Pumps"),
            complete_record(2, "FDA  Recall of Pumps"),
            complete_record(3, "EMA Guidance on Clinical Evaluation"),
            complete_record(4, "EMA Guidance on Clinical Evaluation"),
        ];
        for (i, title) in [
            "WHO Publishes Health Indicators",
            "Swissmedic Fee Schedule Revision",
            "MHRA Post-Market Surveillance Update",
            "TGA Reclassifies Surgical Meshes",
            "Health Canada Licence Renewals",
            "PMDA English Guidance Published",
        ]
        .iter()
        .enumerate()
        {
            records.push(complete_record(5 + i as u128, title));
        }

        let report = generate_report(&records, &QualityConfig::default());

        assert_eq!(report.total_records, 10);
        // Two pairs, one removal candidate each
        assert_eq!(report.duplicate_count, 2);
        // All records are complete, so the below-threshold recommendation
        // must not appear
        assert!(report.average_quality_score >= 70.0);
        assert!(report
            .recommendations
            .iter()
            .all(|r| !r.contains("below the acceptable threshold")));
        // 2 candidates out of 10 records is above the 10% duplicate-rate bar
        assert!(report
            .recommendations
            .iter()
            .any(|r| r.contains("High duplicate rate")));
    }

    #[test]
    fn test_counts_and_average() {
        let good = complete_record(1, "FDA Recall of Infusion Pumps");
        let mut bad = complete_record(2, "EMA Guidance on Clinical Evaluation");
        bad.content = String::new();
        bad.region = None;

        let report = generate_report(&[good, bad], &QualityConfig::default());

        assert_eq!(report.total_records, 2);
        assert_eq!(report.valid_records, 1);
        assert_eq!(report.records_with_errors, 1);
        assert_eq!(report.records_with_warnings, 1);
        // (100 + 75) / 2
        assert!((report.average_quality_score - 87.5).abs() < 1e-9);
        assert!(report
            .recommendations
            .iter()
            .any(|r| r.contains("1 validation errors found")));
        // 1 of 2 valid: below the 95% bar
        assert!(report
            .recommendations
            .iter()
            .any(|r| r.contains("strengthen validation at ingestion")));
    }

    #[test]
    fn test_title_clusters_group_exact_pairs() {
        let records = vec![
            complete_record(1, "EMA Guidance on Clinical Evaluation"),
            complete_record(2, "EMA Guidance on Clinical Evaluation"),
            complete_record(3, "WHO Publishes Health Indicators"),
        ];
        let report = generate_report(&records, &QualityConfig::default());

        assert_eq!(report.duplicate_groups.len(), 1);
        assert_eq!(report.duplicate_groups[0].key, "ema guidance on clinical evaluation");
        assert_eq!(report.duplicate_groups[0].record_ids.len(), 2);
    }

    #[test]
    fn test_payload_caps_do_not_affect_counts() {
        // Sixty sparse records; many of the numbered titles also fuzzy-match
        // each other, which is fine - the caps must bite while the counts
        // still cover the full set.
        let records: Vec<Record> = (0..60)
            .map(|i| {
                let mut r = Record::new(
                    RecordId::from_value(i + 1),
                    format!("Update number {}", i),
                    "",
                );
                r.region = Some("US".to_string());
                r
            })
            .collect();

        let report = generate_report(&records, &QualityConfig::default());

        assert_eq!(report.total_records, 60);
        assert_eq!(report.records_with_errors, 60);
        assert_eq!(report.validations.len(), 50);
        assert!(report.duplicates.len() <= 100);
    }

    #[test]
    fn test_low_quality_recommendation() {
        // Empty title and content score 100 - 20 - 15 - 30 = 35
        let mut record = Record::new(RecordId::from_value(1), "", "");
        record.priority = Some("low".to_string());

        let report = generate_report(&[record], &QualityConfig::default());

        assert!(report.average_quality_score < 70.0);
        assert!(report
            .recommendations
            .iter()
            .any(|r| r.contains("below the acceptable threshold")));
        assert!(report
            .recommendations
            .iter()
            .any(|r| r.contains("1 low-quality records")));
    }

    #[test]
    fn test_report_serializes_to_json() {
        let records = vec![
            complete_record(1, "FDA Recall of Pumps"),
            complete_record(2, "FDA  Recall of Pumps"),
        ];
        let report = generate_report(&records, &QualityConfig::default());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["total_records"], 2);
        assert_eq!(json["duplicate_count"], 1);
        assert_eq!(json["duplicates"][0]["match_type"], "exact");
        assert_eq!(json["duplicates"][1]["match_type"], "fuzzy");
    }
}
