//! Field standardization via ordered lookup tables
//!
//! Region and category mapping are dictionary lookups, nothing more. The
//! tables are ordered slices evaluated front to back so that "first match
//! wins" is explicit and testable; the category table is ordered so that
//! every canonical label maps back to itself.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use regulus_domain::Record;
use serde::{Deserialize, Serialize};

/// Region aliases in evaluation order, matched case-insensitively against
/// the whole trimmed input
const REGION_ALIASES: &[(&[&str], &str)] = &[
    (
        &["usa", "united states", "united states of america", "america", "u.s.", "u.s.a."],
        "US",
    ),
    (&["uk", "united kingdom", "britain", "great britain"], "GB"),
    (&["deutschland", "germany"], "DE"),
    (&["schweiz", "switzerland", "suisse", "svizzera"], "CH"),
    (&["european union", "europe"], "EU"),
    (&["france"], "FR"),
    (&["italia", "italy"], "IT"),
    (&["espana", "españa", "spain"], "ES"),
    (&["nederland", "the netherlands", "netherlands", "holland"], "NL"),
    (&["canada"], "CA"),
    (&["australia"], "AU"),
    (&["japan", "nippon"], "JP"),
    (&["china"], "CN"),
];

/// Category rules in evaluation order; first substring match on the
/// lowercased input wins
const CATEGORY_RULES: &[(&str, &str)] = &[
    ("510(k)", "FDA 510(k) Clearance"),
    ("510k", "FDA 510(k) Clearance"),
    ("pma", "FDA PMA Approval"),
    ("de novo", "FDA De Novo Classification"),
    ("ce mark", "CE Marking"),
    ("recall", "Safety Recall"),
    ("alert", "Safety Alert"),
    ("warning", "Safety Warning"),
    ("guidance", "Regulatory Guidance"),
    ("guideline", "Regulatory Guidance"),
    ("iso", "ISO Standard"),
    ("iec", "IEC Standard"),
    ("clinical trial", "Clinical Trial Update"),
    ("safety", "Safety Notice"),
];

/// Datetime formats tried after RFC 3339 and RFC 2822
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Date-only formats, interpreted as midnight UTC
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d.%m.%Y", "%B %d, %Y"];

/// Normalized rendering of a record's free-text fields
///
/// A sibling value, never a mutation of the input record; callers decide
/// whether and how to merge it back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataStandardization {
    /// Region mapped to its short code, if the record carried one
    pub region: Option<String>,

    /// Category mapped to its canonical label, if the record carried one
    pub category: Option<String>,

    /// Cleaned title
    pub title: String,

    /// Publication timestamp, when the raw value parsed; unparsable values
    /// stay unset so validation can flag them
    pub published_at: Option<DateTime<Utc>>,
}

/// Map a region or country name to its short code
///
/// Unmapped inputs pass through unchanged.
///
/// # Examples
///
/// ```
/// use regulus_quality::standardize_region;
///
/// assert_eq!(standardize_region("United States"), "US");
/// assert_eq!(standardize_region("Schweiz"), "CH");
/// assert_eq!(standardize_region("Mars"), "Mars");
/// ```
pub fn standardize_region(region: &str) -> String {
    let needle = region.trim().to_lowercase();
    for (aliases, code) in REGION_ALIASES {
        if aliases.iter().any(|alias| needle == *alias) {
            return (*code).to_string();
        }
    }
    region.to_string()
}

/// Map a free-text type/category label to its canonical form
///
/// Unmapped inputs pass through unchanged.
pub fn standardize_category(category: &str) -> String {
    let needle = category.to_lowercase();
    for (token, canonical) in CATEGORY_RULES {
        if needle.contains(token) {
            return (*canonical).to_string();
        }
    }
    category.to_string()
}

/// Clean a title: strip characters outside word/whitespace/`-():,.`,
/// collapse whitespace runs, trim
pub fn clean_title(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| {
            c.is_alphanumeric()
                || *c == '_'
                || c.is_whitespace()
                || matches!(c, '-' | '(' | ')' | ':' | ',' | '.')
        })
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse a raw publication timestamp into UTC
///
/// Formats are tried in a fixed order; anything unparsable yields `None`
/// rather than an error - a bad date is a data-quality signal, not an
/// exception.
pub fn parse_published_at(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
        }
    }

    None
}

/// Produce the standardized rendering of a record
///
/// Absent optional fields stay absent; present fields are mapped through the
/// tables above.
pub fn standardize(record: &Record) -> DataStandardization {
    DataStandardization {
        region: record.region.as_deref().map(standardize_region),
        category: record.category.as_deref().map(standardize_category),
        title: clean_title(&record.title),
        published_at: record.published_at.as_deref().and_then(parse_published_at),
    }
}
