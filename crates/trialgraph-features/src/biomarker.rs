//! Biomarker mentions in trial titles

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

/// Symbols recognized as biomarkers (case-sensitive)
pub const BIOMARKERS: [&str; 9] = [
    "BRCA1", "BRCA2", "PD-1", "PD-L1", "HER2", "EGFR", "TP53", "AKT1", "PIK3CA",
];

static PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives: Vec<String> = BIOMARKERS.iter().map(|b| regex::escape(b)).collect();
    Regex::new(&format!(r"\b(?:{})\b", alternatives.join("|"))).expect("invalid biomarker pattern")
});

/// Distinct biomarkers named in `title`, sorted.
pub fn extract_biomarkers(title: &str) -> BTreeSet<String> {
    PATTERN
        .find_iter(title)
        .map(|m| m.as_str().to_string())
        .collect()
}
