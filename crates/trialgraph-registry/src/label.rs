//! Outcome labels derived from a trial's overall status

use crate::record::TrialRecord;

/// Binary trial outcome used as the classifier label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Stopped early: terminated, withdrawn or suspended
    Failure,
    /// Completed, or active and no longer recruiting
    Success,
}

impl Outcome {
    /// Label a status string. Unrecognized, empty or absent statuses have no label.
    pub fn from_status(status: Option<&str>) -> Option<Self> {
        match status?.trim().to_uppercase().as_str() {
            "COMPLETED" | "ACTIVE_NOT_RECRUITING" => Some(Self::Success),
            "TERMINATED" | "WITHDRAWN" | "SUSPENDED" => Some(Self::Failure),
            _ => None,
        }
    }

    /// Parse the persisted 0/1 form.
    pub fn from_value(value: i32) -> Option<Self> {
        match value {
            1 => Some(Self::Success),
            0 => Some(Self::Failure),
            _ => None,
        }
    }

    /// Persisted 0/1 form
    pub fn value(self) -> i32 {
        match self {
            Self::Success => 1,
            Self::Failure => 0,
        }
    }
}

/// A trial record that survived labeling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledTrial {
    pub record: TrialRecord,
    pub outcome: Outcome,
}

/// Label every record and drop those without a label.
pub fn label_all(records: Vec<TrialRecord>) -> Vec<LabeledTrial> {
    let total = records.len();
    let labeled: Vec<LabeledTrial> = records
        .into_iter()
        .filter_map(|record| {
            let outcome = Outcome::from_status(Some(&record.status))?;
            Some(LabeledTrial { record, outcome })
        })
        .collect();
    log::info!(
        "Labeled {} of {total} trials ({} without a usable status dropped)",
        labeled.len(),
        total - labeled.len()
    );
    labeled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_labels() {
        assert_eq!(Outcome::from_status(Some("completed")), Some(Outcome::Success));
        assert_eq!(
            Outcome::from_status(Some(" ACTIVE_NOT_RECRUITING ")),
            Some(Outcome::Success)
        );
        assert_eq!(Outcome::from_status(Some("Withdrawn")), Some(Outcome::Failure));
        assert_eq!(Outcome::from_status(Some("TERMINATED")), Some(Outcome::Failure));
        assert_eq!(Outcome::from_status(Some("suspended")), Some(Outcome::Failure));
    }

    #[test]
    fn unknown_statuses_have_no_label() {
        assert_eq!(Outcome::from_status(Some("Recruiting")), None);
        assert_eq!(Outcome::from_status(Some("UNKNOWN")), None);
        assert_eq!(Outcome::from_status(Some("")), None);
        assert_eq!(Outcome::from_status(None), None);
    }

    #[test]
    fn value_round_trip() {
        assert_eq!(Outcome::Success.value(), 1);
        assert_eq!(Outcome::Failure.value(), 0);
        assert_eq!(Outcome::from_value(1), Some(Outcome::Success));
        assert_eq!(Outcome::from_value(2), None);
    }

    #[test]
    fn label_all_drops_unlabeled() {
        let record = |id: &str, status: &str| TrialRecord {
            trial_id: id.into(),
            status: status.into(),
            ..Default::default()
        };
        let labeled = label_all(vec![
            record("NCT1", "COMPLETED"),
            record("NCT2", "RECRUITING"),
            record("NCT3", "WITHDRAWN"),
            record("NCT4", ""),
        ]);
        let ids: Vec<_> = labeled.iter().map(|t| t.record.trial_id.as_str()).collect();
        assert_eq!(ids, vec!["NCT1", "NCT3"]);
        assert_eq!(labeled[1].outcome, Outcome::Failure);
    }
}
