//! Trial record → base triplets

use trialgraph_registry::TrialRecord;

use crate::triplet::{Triplet, TripletTable, relation};

/// Titles are cut to this many characters in `has_title` triplets
pub const TITLE_LIMIT: usize = 100;

/// Base facts for one trial.
///
/// Four fixed facts (title, status, phase, sponsor), then a `tests` and a
/// `has_type` edge per intervention whose trimmed name is non-empty.
/// Names and types are paired by position, stopping at the shorter list.
pub fn trial_triplets(record: &TrialRecord) -> Vec<Triplet> {
    let id = record.trial_id.as_str();
    let title: String = record.title.chars().take(TITLE_LIMIT).collect();

    let mut triplets = vec![
        Triplet::new(id, relation::HAS_TITLE, title),
        Triplet::new(id, relation::HAS_STATUS, record.status.as_str()),
        Triplet::new(id, relation::HAS_PHASE, record.phase.as_str()),
        Triplet::new(id, relation::SPONSORED_BY, record.sponsor.as_str()),
    ];

    for (name, kind) in record.interventions() {
        let drug = name.trim();
        if drug.is_empty() {
            continue;
        }
        triplets.push(Triplet::new(id, relation::TESTS, drug));
        triplets.push(Triplet::new(drug, relation::HAS_TYPE, kind.trim()));
    }
    triplets
}

/// Base table for a corpus, trials in order.
pub fn generate_triplets<'a>(records: impl IntoIterator<Item = &'a TrialRecord>) -> TripletTable {
    records.into_iter().flat_map(trial_triplets).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(names: &str, types: &str) -> TrialRecord {
        TrialRecord {
            trial_id: "NCT01234567".into(),
            title: "T".repeat(150),
            intervention_name: names.into(),
            intervention_type: types.into(),
            phase: "PHASE2".into(),
            status: "COMPLETED".into(),
            summary: String::new(),
            sponsor: "XYZ Institute".into(),
        }
    }

    #[test]
    fn fixed_facts_come_first() {
        let triplets = trial_triplets(&record("", ""));
        let relations: Vec<_> = triplets.iter().map(|t| t.relation.as_str()).collect();
        assert_eq!(
            relations,
            vec!["has_title", "has_status", "has_phase", "sponsored_by"]
        );
        assert_eq!(triplets[0].tail.chars().count(), TITLE_LIMIT);
        assert_eq!(triplets[3].tail, "XYZ Institute");
    }

    #[test]
    fn title_truncation_counts_characters() {
        let mut r = record("", "");
        r.title = "é".repeat(120);
        let title = &trial_triplets(&r)[0].tail;
        assert_eq!(title.chars().count(), TITLE_LIMIT);
    }

    #[test]
    fn intervention_edges() {
        let triplets = trial_triplets(&record("Olaparib; Paclitaxel", "Drug; Drug"));
        assert_eq!(triplets.len(), 8);
        assert_eq!(triplets[4], Triplet::new("NCT01234567", "tests", "Olaparib"));
        assert_eq!(triplets[5], Triplet::new("Olaparib", "has_type", "Drug"));
        assert_eq!(triplets[7], Triplet::new("Paclitaxel", "has_type", "Drug"));
    }

    #[test]
    fn misaligned_lists_truncate_to_shorter() {
        let table = generate_triplets([&record("A; B; C", "Drug; Biological")]);
        assert_eq!(table.count_relation(relation::TESTS), 2);

        let table = generate_triplets([&record("A", "Drug; Biological")]);
        assert_eq!(table.count_relation(relation::TESTS), 1);
    }

    #[test]
    fn blank_names_are_skipped() {
        // leading separator gives an empty name; trailing "; " leaves a lone space
        let table = generate_triplets([&record("; Olaparib;  ", "Drug; Drug; Drug")]);
        let drugs: Vec<_> = table
            .with_relation(relation::TESTS)
            .map(|t| t.tail.as_str())
            .collect();
        assert_eq!(drugs, vec!["Olaparib"]);
    }

    #[test]
    fn tests_count_matches_min_of_lists() {
        let cases = [
            ("A; B", "Drug; Drug"),
            ("A; B; C", "Drug"),
            ("A", "Drug; Drug; Drug"),
            ("A;  ; C", "Drug; Drug; Drug"),
        ];
        for (names, types) in cases {
            let r = record(names, types);
            let expected = names
                .split("; ")
                .zip(types.split("; "))
                .filter(|(n, _)| !n.trim().is_empty())
                .count();
            let table = generate_triplets([&r]);
            assert_eq!(table.count_relation(relation::TESTS), expected, "{names} / {types}");
        }
    }
}
