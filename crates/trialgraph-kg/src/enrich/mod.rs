//! Enrichment passes over a triplet table
//!
//! Every pass reads a table and returns a new one; the input is never
//! modified. [`enrich_all`] runs the passes in their fixed order.

mod gene_mentions;
mod gene_targets;
mod synonyms;
mod trial_type;

pub use gene_mentions::GeneMentionEnricher;
pub use gene_targets::GeneTargetEnricher;
pub use synonyms::SynonymNormalizer;
pub use trial_type::TrialTypeClassifier;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use trialgraph_registry::TrialRecord;

use crate::knowledge::KnowledgeBase;
use crate::triplet::TripletTable;

/// One enrichment pass.
pub trait Enricher {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Produce a new table from `table`, optionally consulting the trial corpus.
    fn enrich(&self, table: &TripletTable, trials: &[TrialRecord]) -> TripletTable;
}

/// Which drugs receive `targets_gene` edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneTargetScope {
    /// Drugs that some trial in the table `tests`
    #[default]
    Referenced,
    /// Every drug in the map, whether or not it occurs
    All,
}

impl std::fmt::Display for GeneTargetScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Referenced => "referenced",
            Self::All => "all",
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichOptions {
    pub gene_scope: GeneTargetScope,
    /// Also scan trial summaries for gene symbols
    pub gene_mentions: bool,
}

/// Run the enrichment passes over a freshly generated base table.
///
/// Order: synonyms, gene targets, trial types, then gene mentions when enabled.
pub fn enrich_all(
    base: &TripletTable,
    trials: &[TrialRecord],
    kb: &KnowledgeBase,
    options: EnrichOptions,
) -> Result<TripletTable> {
    let mut passes: Vec<Box<dyn Enricher + '_>> = vec![
        Box::new(SynonymNormalizer::new(kb)),
        Box::new(GeneTargetEnricher::new(kb, options.gene_scope)),
        Box::new(TrialTypeClassifier::new(kb)),
    ];
    if options.gene_mentions {
        passes.push(Box::new(GeneMentionEnricher::new(kb.gene_vocabulary())?));
    }

    let mut table = base.clone();
    for pass in &passes {
        let before = table.len();
        table = pass.enrich(&table, trials);
        log::debug!(
            "{}: {} -> {} triplets",
            pass.name(),
            before,
            table.len()
        );
    }
    log::info!(
        "Enriched {} base triplets to {}",
        base.len(),
        table.len()
    );
    Ok(table)
}
