//! Pairwise duplicate detection and grouping
//!
//! A scan is O(N²) over the input, in input order, with no external index.
//! Results are deterministic for a given record order; the order is never
//! re-sorted.

use std::collections::HashSet;

use regulus_domain::{Record, RecordId};
use serde::{Deserialize, Serialize};

use crate::config::{QualityConfig, RetentionPolicy};
use crate::similarity::similarity;
use crate::standardize::parse_published_at;
use crate::validate::validate_record;

/// How a record was judged similar to another
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Raw titles are identical (or this is a group anchor's self entry)
    Exact,

    /// Normalized title similarity reached the fuzzy threshold
    Fuzzy,

    /// Content similarity reached the corroboration threshold
    Semantic,
}

/// A single similarity judgement produced by a duplicate scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMatch {
    /// Record this judgement refers to
    pub id: RecordId,

    /// Raw title of that record
    pub title: String,

    /// Similarity score in [0.0, 1.0]
    pub similarity: f64,

    /// How the similarity was established
    pub match_type: MatchType,
}

/// A cluster of records judged to represent the same underlying fact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    /// Lowercased first-50-characters of the anchor title
    pub key: String,

    /// Anchor first, then the matched records in scan order
    pub records: Vec<SimilarityMatch>,

    /// Minimum similarity observed within the group
    pub confidence: f64,
}

/// Group key: lowercased first 50 characters of a title
pub(crate) fn group_key(title: &str) -> String {
    title.to_lowercase().chars().take(50).collect()
}

/// One scan block: a record's self entry followed by everything it matched.
///
/// Greedy and non-overlapping - once a record lands in a block, it is
/// skipped by every later outer iteration.
fn scan(records: &[Record], config: &QualityConfig) -> Vec<Vec<SimilarityMatch>> {
    let mut processed: HashSet<RecordId> = HashSet::new();
    let mut blocks = Vec::new();

    for (i, record) in records.iter().enumerate() {
        if processed.contains(&record.id) {
            continue;
        }

        let mut matches: Vec<SimilarityMatch> = Vec::new();
        for other in records.iter().skip(i + 1) {
            if processed.contains(&other.id) {
                continue;
            }

            if record.title == other.title {
                matches.push(SimilarityMatch {
                    id: other.id,
                    title: other.title.clone(),
                    similarity: 1.0,
                    match_type: MatchType::Exact,
                });
                // Raw equality settles the pair; no fuzzy or content checks
                continue;
            }

            let title_sim = similarity(&record.title, &other.title);
            if title_sim < config.fuzzy_threshold {
                continue;
            }

            // Titles that collapse to the same normalized string score
            // exactly 1.0 and count as exact, not fuzzy
            let match_type = if title_sim == 1.0 {
                MatchType::Exact
            } else {
                MatchType::Fuzzy
            };
            matches.push(SimilarityMatch {
                id: other.id,
                title: other.title.clone(),
                similarity: title_sim,
                match_type,
            });

            // Content similarity corroborates a pair whose titles already
            // matched; the same pair can contribute a second match record.
            // It never matches on its own - regulatory feeds are full of
            // boilerplate bodies that would otherwise merge unrelated
            // records.
            if !record.content.is_empty() && !other.content.is_empty() {
                let content_sim = similarity(&record.content, &other.content);
                if content_sim >= config.content_threshold {
                    matches.push(SimilarityMatch {
                        id: other.id,
                        title: other.title.clone(),
                        similarity: content_sim,
                        match_type: MatchType::Semantic,
                    });
                }
            }
        }

        if matches.is_empty() {
            continue;
        }

        processed.insert(record.id);
        for m in &matches {
            processed.insert(m.id);
        }

        let mut block = Vec::with_capacity(matches.len() + 1);
        block.push(SimilarityMatch {
            id: record.id,
            title: record.title.clone(),
            similarity: 1.0,
            match_type: MatchType::Exact,
        });
        block.append(&mut matches);
        blocks.push(block);
    }

    blocks
}

/// Find all pairwise duplicate matches in `records`
///
/// Returns a flat list in scan order: each matched record's block starts
/// with its own self entry (similarity 1.0, exact) followed by the records
/// it matched. Records with no matches do not appear.
pub fn find_matches(records: &[Record], config: &QualityConfig) -> Vec<SimilarityMatch> {
    scan(records, config).into_iter().flatten().collect()
}

/// Cluster duplicate matches into non-overlapping groups
///
/// Each scan block becomes at most one group: the anchor opens it and the
/// block's matches with similarity at or above the grouping threshold
/// attach. A repeated id (a pair that matched on both title and content)
/// folds its similarity into the group confidence without duplicating the
/// member. Blocks that shrink to a single member yield no group.
pub fn group_duplicates(records: &[Record], config: &QualityConfig) -> Vec<DuplicateGroup> {
    let mut groups = Vec::new();

    for block in scan(records, config) {
        let mut members: Vec<SimilarityMatch> = Vec::new();
        let mut confidence: f64 = 1.0;

        for m in block {
            if m.similarity < config.grouping_threshold {
                continue;
            }
            confidence = confidence.min(m.similarity);
            if members.iter().any(|existing| existing.id == m.id) {
                continue;
            }
            members.push(m);
        }

        if members.len() > 1 {
            let key = group_key(&members[0].title);
            groups.push(DuplicateGroup {
                key,
                records: members,
                confidence,
            });
        }
    }

    groups
}

/// Removal candidates across all groups: every member except the keeper
///
/// The keeper is chosen per the retention policy; ties always keep the
/// earliest group position.
pub fn removal_candidates(
    records: &[Record],
    groups: &[DuplicateGroup],
    policy: RetentionPolicy,
) -> Vec<RecordId> {
    let mut candidates = Vec::new();

    for group in groups {
        let keeper = select_keeper(records, group, policy);
        for m in &group.records {
            if m.id != keeper {
                candidates.push(m.id);
            }
        }
    }

    candidates
}

fn select_keeper(records: &[Record], group: &DuplicateGroup, policy: RetentionPolicy) -> RecordId {
    let members: Vec<&Record> = group
        .records
        .iter()
        .filter_map(|m| records.iter().find(|r| r.id == m.id))
        .collect();

    // Group members come out of a scan over `records`, so the lookup only
    // misses if the caller passed a different collection; keep the anchor.
    let Some(first) = members.first().copied() else {
        return group.records[0].id;
    };

    match policy {
        RetentionPolicy::FirstSeen => first.id,
        RetentionPolicy::MostRecent => {
            let mut keeper = first;
            let mut best = keeper.published_at.as_deref().and_then(parse_published_at);
            for record in members.iter().skip(1).copied() {
                let published = record.published_at.as_deref().and_then(parse_published_at);
                let newer = match (&best, &published) {
                    (None, Some(_)) => true,
                    (Some(b), Some(p)) => p > b,
                    _ => false,
                };
                if newer {
                    keeper = record;
                    best = published;
                }
            }
            keeper.id
        }
        RetentionPolicy::HighestScore => {
            let mut keeper = first;
            let mut best = validate_record(keeper).score;
            for record in members.iter().skip(1).copied() {
                let score = validate_record(record).score;
                if score > best {
                    keeper = record;
                    best = score;
                }
            }
            keeper.id
        }
    }
}
