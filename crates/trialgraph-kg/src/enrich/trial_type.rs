use std::collections::{BTreeSet, HashMap};

use trialgraph_registry::TrialRecord;

use super::Enricher;
use crate::knowledge::{KnowledgeBase, TrialType};
use crate::triplet::{Triplet, TripletTable, relation};

/// Derives one `has_trial_type` edge per head from keyword matches on its tails.
pub struct TrialTypeClassifier<'a> {
    kb: &'a KnowledgeBase,
}

impl<'a> TrialTypeClassifier<'a> {
    pub fn new(kb: &'a KnowledgeBase) -> Self {
        Self { kb }
    }

    /// Matched categories per head, heads in order of their first match.
    fn classify<'t>(&self, table: &'t TripletTable) -> Vec<(&'t str, BTreeSet<TrialType>)> {
        let mut order: Vec<(&str, BTreeSet<TrialType>)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for t in table {
            let types = self.kb.trial_types(&t.tail);
            if types.is_empty() {
                continue;
            }
            let slot = *index.entry(t.head.as_str()).or_insert_with(|| {
                order.push((t.head.as_str(), BTreeSet::new()));
                order.len() - 1
            });
            order[slot].1.extend(types);
        }
        order
    }
}

/// `"IMMUNO, TARGETED"` style label for a category set.
pub fn type_label(types: &BTreeSet<TrialType>) -> String {
    types
        .iter()
        .map(|t| t.label())
        .collect::<Vec<_>>()
        .join(", ")
}

impl Enricher for TrialTypeClassifier<'_> {
    fn name(&self) -> &'static str {
        "trial_type"
    }

    fn enrich(&self, table: &TripletTable, _trials: &[TrialRecord]) -> TripletTable {
        let edges: Vec<Triplet> = self
            .classify(table)
            .into_iter()
            .map(|(head, types)| Triplet::new(head, relation::HAS_TRIAL_TYPE, type_label(&types)))
            .collect();
        table.appended(edges)
    }
}
