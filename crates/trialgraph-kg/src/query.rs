//! Filtering and summarizing a triplet table for exploration

use std::collections::{BTreeMap, BTreeSet};

use crate::node::NodeKind;
use crate::triplet::{Triplet, TripletTable};

/// Row filter: relation whitelist plus a case-insensitive search on head/tail.
///
/// An empty relation list accepts every relation.
#[derive(Debug, Clone, Default)]
pub struct TripletFilter {
    pub relations: Vec<String>,
    pub search: Option<String>,
}

impl TripletFilter {
    pub fn matches(&self, triplet: &Triplet) -> bool {
        if !self.relations.is_empty() && !self.relations.iter().any(|r| *r == triplet.relation) {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                triplet.head.to_lowercase().contains(&term)
                    || triplet.tail.to_lowercase().contains(&term)
            }
        }
    }

    pub fn apply(&self, table: &TripletTable) -> TripletTable {
        table.iter().filter(|t| self.matches(t)).cloned().collect()
    }
}

/// Row and node counts of a triplet table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphSummary {
    pub triplets: usize,
    pub relations: BTreeMap<String, usize>,
    /// Distinct non-empty heads and tails, by inferred kind
    pub nodes: BTreeMap<NodeKind, usize>,
}

impl GraphSummary {
    pub fn node_count(&self) -> usize {
        self.nodes.values().sum()
    }
}

pub fn summarize(table: &TripletTable) -> GraphSummary {
    let relations = table
        .relation_counts()
        .into_iter()
        .map(|(r, n)| (r.to_string(), n))
        .collect();

    let distinct: BTreeSet<&str> = table
        .iter()
        .flat_map(|t| [t.head.trim(), t.tail.trim()])
        .filter(|n| !n.is_empty())
        .collect();
    let mut nodes = BTreeMap::new();
    for node in distinct {
        *nodes.entry(NodeKind::infer(node)).or_insert(0) += 1;
    }

    GraphSummary {
        triplets: table.len(),
        relations,
        nodes,
    }
}
