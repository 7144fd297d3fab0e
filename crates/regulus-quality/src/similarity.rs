//! Normalized string similarity scoring

/// Normalize a string for comparison: lowercase, keep only word characters
/// and whitespace, trim.
pub(crate) fn normalize(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Similarity of two strings in [0.0, 1.0]
///
/// Strings that are equal after normalization score exactly 1.0 (this is the
/// "exact" short-circuit, and also covers two strings that are both empty
/// once normalized). Otherwise the score is the Levenshtein ratio
/// `(max_len - distance) / max_len` over the normalized strings, with
/// lengths counted in characters.
///
/// Symmetric: `similarity(a, b) == similarity(b, a)` for all inputs.
///
/// # Examples
///
/// ```
/// use regulus_quality::similarity;
///
/// assert_eq!(similarity("FDA Recall!", "fda recall"), 1.0);
/// assert!(similarity("FDA Recall of Pumps", "FDA Recal of Pumps") > 0.9);
/// assert!(similarity("FDA Recall", "Unrelated Update") < 0.5);
/// ```
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);

    if a == b {
        return 1.0;
    }

    let max_len = a.chars().count().max(b.chars().count());
    let distance = strsim::levenshtein(&a, &b);

    (max_len - distance) as f64 / max_len as f64
}
