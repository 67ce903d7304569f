//! Static domain knowledge: drug targets, trial-type keywords, disease synonyms

use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// Canonical token for triple-negative breast cancer
pub const CANONICAL_DISEASE: &str = "TNBC";

const DISEASE_SYNONYMS: [&str; 3] = [
    "tnbc",
    "triple negative breast cancer",
    "triple-negative breast cancer",
];

/// Gene symbols scanned for in trial summaries
pub const GENE_VOCABULARY: [&str; 11] = [
    "BRCA1", "BRCA2", "PD-1", "PD-L1", "HER2", "EGFR", "TP53", "AKT1", "PIK3CA", "CDK4", "CDK6",
];

/// Therapy category of a trial.
///
/// Variants are declared alphabetically so `Ord` sorts by label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TrialType {
    Chemo,
    Immuno,
    Targeted,
}

impl TrialType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Chemo => "CHEMO",
            Self::Immuno => "IMMUNO",
            Self::Targeted => "TARGETED",
        }
    }

    fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Immuno => &["pembrolizumab", "nivolumab", "atezolizumab", "pd-1", "pd-l1"],
            Self::Chemo => &["paclitaxel", "carboplatin", "cisplatin", "doxorubicin"],
            Self::Targeted => &["olaparib", "trastuzumab", "bevacizumab", "brca", "her2"],
        }
    }
}

/// Genes a drug is known to act on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrugTarget {
    pub drug: String,
    pub genes: Vec<String>,
}

impl DrugTarget {
    fn new(drug: &str, genes: &[&str]) -> Self {
        Self {
            drug: drug.to_string(),
            genes: genes.iter().map(|g| g.to_string()).collect(),
        }
    }
}

/// Read-only lookup tables shared by the enrichers.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    drug_targets: Vec<DrugTarget>,
    synonyms: HashSet<&'static str>,
    keywords: Vec<(TrialType, HashSet<&'static str>)>,
}

static BUILTIN: LazyLock<KnowledgeBase> = LazyLock::new(|| {
    KnowledgeBase::from_drug_targets(vec![
        DrugTarget::new("Pembrolizumab", &["PD-1"]),
        DrugTarget::new("Nivolumab", &["PD-1"]),
        DrugTarget::new("Atezolizumab", &["PD-L1"]),
        DrugTarget::new("Olaparib", &["BRCA1", "BRCA2"]),
    ])
});

impl KnowledgeBase {
    /// The builtin tables, built on first use.
    pub fn builtin() -> &'static KnowledgeBase {
        &BUILTIN
    }

    /// Builtin keyword and synonym tables with a custom drug→gene map.
    pub fn from_drug_targets(drug_targets: Vec<DrugTarget>) -> Self {
        let keywords = [TrialType::Immuno, TrialType::Chemo, TrialType::Targeted]
            .into_iter()
            .map(|ty| (ty, ty.keywords().iter().copied().collect()))
            .collect();
        Self {
            drug_targets,
            synonyms: DISEASE_SYNONYMS.into_iter().collect(),
            keywords,
        }
    }

    /// Drug→gene map in declaration order
    pub fn drug_targets(&self) -> &[DrugTarget] {
        &self.drug_targets
    }

    /// Whether `value` names TNBC (case and surrounding whitespace ignored).
    pub fn is_disease_synonym(&self, value: &str) -> bool {
        self.synonyms.contains(value.trim().to_lowercase().as_str())
    }

    /// Categories whose keyword set contains `value` exactly (case-insensitive).
    pub fn trial_types(&self, value: &str) -> BTreeSet<TrialType> {
        let value = value.trim().to_lowercase();
        self.keywords
            .iter()
            .filter(|(_, words)| words.contains(value.as_str()))
            .map(|(ty, _)| *ty)
            .collect()
    }

    pub fn gene_vocabulary(&self) -> &'static [&'static str] {
        &GENE_VOCABULARY
    }
}
