//! Regulus Quality Engine
//!
//! Pure functions over in-memory record collections: similarity scoring,
//! duplicate detection and grouping, rule-based validation, field
//! standardization, and aggregate quality reporting.
//!
//! The engine performs no I/O and holds no state. Callers fetch a record
//! collection from storage, hand it in, and decide what to do with the
//! derived artifacts (reports, duplicate groups, standardized values). The
//! cache layer is a separate crate; composing the two is the caller's job.
//!
//! Duplicate detection is O(N² · L) in record count and average text length.
//! That is acceptable for a single tenant's dataset (low thousands of
//! records); callers feeding larger collections are responsible for bounding
//! N per pass.
//!
//! # Examples
//!
//! ```
//! use regulus_domain::{Record, RecordId};
//! use regulus_quality::{generate_report, QualityConfig};
//!
//! let records = vec![
//!     Record::new(RecordId::from_value(1), "FDA Recall of Pumps", ""),
//!     Record::new(RecordId::from_value(2), "FDA  Recall of Pumps", ""),
//! ];
//!
//! let report = generate_report(&records, &QualityConfig::default());
//! assert_eq!(report.duplicate_count, 1);
//! ```

#![warn(missing_docs)]

mod config;
mod duplicates;
mod report;
mod similarity;
mod standardize;
mod validate;

pub use config::{QualityConfig, RetentionPolicy};
pub use duplicates::{
    find_matches, group_duplicates, removal_candidates, DuplicateGroup, MatchType, SimilarityMatch,
};
pub use report::{generate_report, QualityReport, RecordValidation, TitleCluster};
pub use similarity::similarity;
pub use standardize::{
    clean_title, parse_published_at, standardize, standardize_category, standardize_region,
    DataStandardization,
};
pub use validate::{validate_record, ValidationResult};
