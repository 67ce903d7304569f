use std::collections::BTreeSet;

use anyhow::{Context, Result};
use regex::Regex;
use trialgraph_registry::TrialRecord;

use super::Enricher;
use crate::triplet::{Triplet, TripletTable, relation};

/// Emits `mentions_gene` edges for gene symbols found in trial summaries.
pub struct GeneMentionEnricher {
    pattern: Regex,
}

impl GeneMentionEnricher {
    pub fn new(vocabulary: &[&str]) -> Result<Self> {
        let alternatives: Vec<String> = vocabulary.iter().map(|g| regex::escape(g)).collect();
        let pattern = Regex::new(&format!(r"(?i)\b(?:{})\b", alternatives.join("|")))
            .context("invalid gene vocabulary pattern")?;
        Ok(Self { pattern })
    }

    /// Distinct genes named in `text`, uppercased and sorted.
    pub fn mentions(&self, text: &str) -> BTreeSet<String> {
        self.pattern
            .find_iter(text)
            .map(|m| m.as_str().to_uppercase())
            .collect()
    }
}

impl Enricher for GeneMentionEnricher {
    fn name(&self) -> &'static str {
        "gene_mentions"
    }

    fn enrich(&self, table: &TripletTable, trials: &[TrialRecord]) -> TripletTable {
        let edges = trials.iter().flat_map(|trial| {
            self.mentions(&trial.summary)
                .into_iter()
                .map(|gene| Triplet::new(trial.trial_id.as_str(), relation::MENTIONS_GENE, gene))
        });
        table.appended(edges)
    }
}
