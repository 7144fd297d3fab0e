//! Rule-based validation and scoring of individual records
//!
//! Every rule subtracts a fixed penalty from a starting score of 100; rules
//! trigger independently and the score floors at 0. The rule table and its
//! thresholds are part of the compatibility contract of this engine - change
//! them and every stored score shifts.

use std::collections::HashSet;

use chrono::Utc;
use regulus_domain::{Priority, Record};
use serde::{Deserialize, Serialize};

use crate::standardize::parse_published_at;

/// Tokens that mark obviously unfinished or mocked content
const PLACEHOLDER_TOKENS: &[&str] =
    &["lorem ipsum", "placeholder", "todo", "coming soon", "mock data"];

/// 2000-01-01T00:00:00Z as a Unix timestamp; regulatory records claiming to
/// predate this are suspect
const MIN_PLAUSIBLE_TIMESTAMP: i64 = 946_684_800;

/// Result of validating a single record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True iff no errors were found (warnings do not invalidate)
    pub is_valid: bool,

    /// Defects that make the record unfit for display
    pub errors: Vec<String>,

    /// Defects that degrade, but do not block, the record
    pub warnings: Vec<String>,

    /// Quality score (0-100)
    pub score: u8,
}

/// Validate a record against the fixed rule table
///
/// # Examples
///
/// ```
/// use regulus_domain::{Record, RecordId};
/// use regulus_quality::validate_record;
///
/// let record = Record::new(RecordId::from_value(1), "FDA Recall of Pumps", "");
/// let result = validate_record(&record);
///
/// assert!(!result.is_valid);
/// assert!(result.errors.contains(&"Content is required".to_string()));
/// ```
pub fn validate_record(record: &Record) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut score: i32 = 100;

    if record.title.trim().is_empty() {
        errors.push("Title is required".to_string());
        score -= 20;
    } else if record.title.chars().count() < 10 {
        warnings.push("Title is shorter than 10 characters".to_string());
        score -= 5;
    }

    if record.content.trim().is_empty() {
        errors.push("Content is required".to_string());
        score -= 15;
    } else if record.content.chars().count() < 50 {
        warnings.push("Content is shorter than 50 characters".to_string());
        score -= 5;
    }

    if is_blank(&record.source) {
        warnings.push("Source is missing".to_string());
        score -= 10;
    }
    if is_blank(&record.authority) {
        warnings.push("Authority is missing".to_string());
        score -= 10;
    }
    if is_blank(&record.region) {
        warnings.push("Region is missing".to_string());
        score -= 10;
    }

    if let Some(raw) = record.published_at.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        match parse_published_at(raw) {
            None => {
                errors.push("Published date is not parsable".to_string());
                score -= 10;
            }
            Some(published) => {
                if published > Utc::now() {
                    warnings.push("Published date is in the future".to_string());
                    score -= 5;
                }
                if published.timestamp() < MIN_PLAUSIBLE_TIMESTAMP {
                    warnings.push("Published date is before 2000-01-01".to_string());
                    score -= 5;
                }
            }
        }
    }

    if let Some(raw) = record.priority.as_deref() {
        if Priority::parse(raw).is_none() {
            errors.push("Invalid priority value".to_string());
            score -= 5;
        }
    }

    for (key, value) in &record.metadata {
        let key_lower = key.to_lowercase();
        if !key_lower.contains("url") && !key_lower.contains("link") {
            continue;
        }
        if value.trim().is_empty() {
            continue;
        }
        if url::Url::parse(value).is_err() {
            warnings.push(format!("Metadata field '{}' is not a valid URL", key));
            score -= 3;
        }
    }

    let content_lower = record.content.to_lowercase();
    if PLACEHOLDER_TOKENS.iter().any(|t| content_lower.contains(t)) {
        warnings.push("Content contains placeholder text".to_string());
        score -= 10;
    }

    let words: Vec<&str> = content_lower.split_whitespace().collect();
    if words.len() >= 20 {
        let unique: HashSet<&str> = words.iter().copied().collect();
        if (unique.len() as f64) / (words.len() as f64) < 0.3 {
            warnings.push("Content is highly repetitive".to_string());
            score -= 5;
        }
    }

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
        warnings,
        score: score.clamp(0, 100) as u8,
    }
}

fn is_blank(field: &Option<String>) -> bool {
    field.as_deref().map_or(true, |s| s.trim().is_empty())
}
