use trialgraph_registry::TrialRecord;

use super::Enricher;
use crate::knowledge::{CANONICAL_DISEASE, KnowledgeBase};
use crate::triplet::{Triplet, TripletTable};

/// Rewrites TNBC spellings in the tail column to the canonical token.
pub struct SynonymNormalizer<'a> {
    kb: &'a KnowledgeBase,
}

impl<'a> SynonymNormalizer<'a> {
    pub fn new(kb: &'a KnowledgeBase) -> Self {
        Self { kb }
    }
}

impl Enricher for SynonymNormalizer<'_> {
    fn name(&self) -> &'static str {
        "synonyms"
    }

    fn enrich(&self, table: &TripletTable, _trials: &[TrialRecord]) -> TripletTable {
        table
            .iter()
            .map(|t| {
                if self.kb.is_disease_synonym(&t.tail) {
                    Triplet {
                        tail: CANONICAL_DISEASE.to_string(),
                        ..t.clone()
                    }
                } else {
                    t.clone()
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triplet::relation;

    fn table() -> TripletTable {
        TripletTable::from(vec![
            Triplet::new("NCT1", relation::HAS_TITLE, " Triple-Negative Breast Cancer "),
            Triplet::new("tnbc", relation::HAS_STATUS, "tnbc"),
            Triplet::new("NCT1", relation::SPONSORED_BY, "TNBC Foundation"),
        ])
    }

    #[test]
    fn rewrites_only_tails() {
        let out = SynonymNormalizer::new(KnowledgeBase::builtin()).enrich(&table(), &[]);
        assert_eq!(out.rows()[0].tail, "TNBC");
        assert_eq!(out.rows()[1].head, "tnbc");
        assert_eq!(out.rows()[1].tail, "TNBC");
        assert_eq!(out.rows()[2].tail, "TNBC Foundation");
    }

    #[test]
    fn idempotent() {
        let pass = SynonymNormalizer::new(KnowledgeBase::builtin());
        let once = pass.enrich(&table(), &[]);
        let twice = pass.enrich(&once, &[]);
        assert_eq!(once, twice);
    }

    #[test]
    fn input_is_untouched() {
        let input = table();
        let _ = SynonymNormalizer::new(KnowledgeBase::builtin()).enrich(&input, &[]);
        assert_eq!(input, table());
    }
}
