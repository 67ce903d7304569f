//! Triplets and the append-only triplet table

use std::collections::BTreeMap;

/// Relation names emitted by the generator and enrichers.
///
/// The vocabulary is open: tables read from disk may carry others.
pub mod relation {
    pub const HAS_TITLE: &str = "has_title";
    pub const HAS_STATUS: &str = "has_status";
    pub const HAS_PHASE: &str = "has_phase";
    pub const SPONSORED_BY: &str = "sponsored_by";
    pub const TESTS: &str = "tests";
    pub const HAS_TYPE: &str = "has_type";
    pub const TARGETS_GENE: &str = "targets_gene";
    pub const HAS_TRIAL_TYPE: &str = "has_trial_type";
    pub const MENTIONS_GENE: &str = "mentions_gene";
}

/// One `(head, relation, tail)` fact
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triplet {
    pub head: String,
    pub relation: String,
    pub tail: String,
}

impl Triplet {
    pub fn new(head: impl Into<String>, relation: &str, tail: impl Into<String>) -> Self {
        Self {
            head: head.into(),
            relation: relation.to_string(),
            tail: tail.into(),
        }
    }
}

/// Ordered triplet rows. Duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripletTable {
    rows: Vec<Triplet>,
}

impl TripletTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Triplet] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Triplet> {
        self.rows.iter()
    }

    pub fn into_rows(self) -> Vec<Triplet> {
        self.rows
    }

    /// A new table holding these rows followed by `extra`.
    pub fn appended(&self, extra: impl IntoIterator<Item = Triplet>) -> Self {
        let mut rows = self.rows.clone();
        rows.extend(extra);
        Self { rows }
    }

    /// Rows with the given relation
    pub fn with_relation<'a>(&'a self, relation: &'a str) -> impl Iterator<Item = &'a Triplet> {
        self.rows.iter().filter(move |t| t.relation == relation)
    }

    pub fn count_relation(&self, relation: &str) -> usize {
        self.with_relation(relation).count()
    }

    /// Row count per relation, sorted by relation name.
    pub fn relation_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for t in &self.rows {
            *counts.entry(t.relation.as_str()).or_insert(0) += 1;
        }
        counts
    }
}

impl From<Vec<Triplet>> for TripletTable {
    fn from(rows: Vec<Triplet>) -> Self {
        Self { rows }
    }
}

impl FromIterator<Triplet> for TripletTable {
    fn from_iter<I: IntoIterator<Item = Triplet>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TripletTable {
    type Item = &'a Triplet;
    type IntoIter = std::slice::Iter<'a, Triplet>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appended_leaves_original_untouched() {
        let base = TripletTable::from(vec![Triplet::new("NCT1", relation::TESTS, "Olaparib")]);
        let grown = base.appended([Triplet::new("Olaparib", relation::TARGETS_GENE, "BRCA1")]);
        assert_eq!(base.len(), 1);
        assert_eq!(grown.len(), 2);
        assert_eq!(grown.rows()[0], base.rows()[0]);
    }

    #[test]
    fn relation_counts_sorted() {
        let table: TripletTable = [
            Triplet::new("NCT1", relation::TESTS, "A"),
            Triplet::new("NCT1", relation::HAS_STATUS, "COMPLETED"),
            Triplet::new("NCT2", relation::TESTS, "A"),
        ]
        .into_iter()
        .collect();
        let counts: Vec<_> = table.relation_counts().into_iter().collect();
        assert_eq!(counts, vec![("has_status", 1), ("tests", 2)]);
        assert_eq!(table.count_relation(relation::TESTS), 2);
    }
}
