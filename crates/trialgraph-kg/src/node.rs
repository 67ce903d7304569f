//! Heuristic node kinds for graph display

use std::fmt;

const KNOWN_GENES: [&str; 10] = [
    "PD-1", "PD-L1", "BRCA1", "BRCA2", "VEGF", "HER2", "EGFR", "TP53", "AKT1", "PIK3CA",
];
const SPONSOR_MARKERS: [&str; 3] = ["university", "center", "institute"];
const DRUG_MARKERS: [&str; 6] = ["umab", "limab", "tinib", "drug", "ol", "inib"];

/// Kind of a graph node, guessed from its text alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeKind {
    Trial,
    Gene,
    Sponsor,
    Drug,
    Biomarker,
    Other,
}

impl NodeKind {
    /// First matching rule wins:
    /// NCT prefix, known gene, sponsor word, drug-like fragment, short uppercase token.
    pub fn infer(node: &str) -> Self {
        let node = node.trim();
        let lower = node.to_lowercase();

        if node.starts_with("NCT") {
            Self::Trial
        } else if KNOWN_GENES.contains(&node.to_uppercase().as_str()) {
            Self::Gene
        } else if SPONSOR_MARKERS.iter().any(|m| lower.contains(m)) {
            Self::Sponsor
        } else if DRUG_MARKERS.iter().any(|m| lower.contains(m)) {
            Self::Drug
        } else if node.chars().count() < 12 && is_upper(node) {
            Self::Biomarker
        } else {
            Self::Other
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Trial => "TRIAL",
            Self::Gene => "GENE",
            Self::Sponsor => "SPONSOR",
            Self::Drug => "DRUG",
            Self::Biomarker => "BIOMARKER",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// At least one cased letter and no lowercase ones.
fn is_upper(s: &str) -> bool {
    s.chars().any(char::is_uppercase) && !s.chars().any(char::is_lowercase)
}
