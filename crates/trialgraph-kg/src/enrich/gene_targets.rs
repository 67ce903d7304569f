use std::collections::HashSet;

use trialgraph_registry::TrialRecord;

use super::{Enricher, GeneTargetScope};
use crate::knowledge::KnowledgeBase;
use crate::triplet::{Triplet, TripletTable, relation};

/// Appends `targets_gene` edges from the static drug→gene map.
///
/// Not idempotent: every application appends the edges again.
pub struct GeneTargetEnricher<'a> {
    kb: &'a KnowledgeBase,
    scope: GeneTargetScope,
}

impl<'a> GeneTargetEnricher<'a> {
    pub fn new(kb: &'a KnowledgeBase, scope: GeneTargetScope) -> Self {
        Self { kb, scope }
    }

    fn edges(&self, table: &TripletTable) -> Vec<Triplet> {
        let tested: HashSet<String> = match self.scope {
            GeneTargetScope::All => HashSet::new(),
            GeneTargetScope::Referenced => table
                .with_relation(relation::TESTS)
                .map(|t| t.tail.trim().to_lowercase())
                .collect(),
        };

        self.kb
            .drug_targets()
            .iter()
            .filter(|target| {
                self.scope == GeneTargetScope::All
                    || tested.contains(&target.drug.trim().to_lowercase())
            })
            .flat_map(|target| {
                target
                    .genes
                    .iter()
                    .map(|gene| Triplet::new(target.drug.as_str(), relation::TARGETS_GENE, gene.as_str()))
            })
            .collect()
    }
}

impl Enricher for GeneTargetEnricher<'_> {
    fn name(&self) -> &'static str {
        "gene_targets"
    }

    fn enrich(&self, table: &TripletTable, _trials: &[TrialRecord]) -> TripletTable {
        table.appended(self.edges(table))
    }
}
