//! Flatten raw registry studies into fixed-field trial records

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::RawTrial;

/// Separator used for the joined intervention lists
pub const LIST_SEPARATOR: &str = "; ";

const NCT_ID: &str = "/protocolSection/identificationModule/nctId";
const OFFICIAL_TITLE: &str = "/protocolSection/identificationModule/officialTitle";
const INTERVENTIONS: &str = "/protocolSection/armsInterventionsModule/interventions";
const PHASES: &str = "/protocolSection/designModule/phases";
const LEGACY_PHASES: &str = "/protocolSection/designModule/phaseList/phases";
const OVERALL_STATUS: &str = "/protocolSection/statusModule/overallStatus";
const BRIEF_SUMMARY: &str = "/protocolSection/descriptionModule/briefSummary";
const LEAD_SPONSOR: &str = "/protocolSection/sponsorCollaboratorsModule/leadSponsor/name";

/// One trial, flattened. Missing source fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialRecord {
    /// NCT identifier (unvalidated)
    pub trial_id: String,
    pub title: String,
    /// Intervention names joined with `"; "`
    pub intervention_name: String,
    /// Intervention types joined with `"; "`, positionally aligned with names
    pub intervention_type: String,
    pub phase: String,
    pub status: String,
    pub summary: String,
    pub sponsor: String,
}

impl TrialRecord {
    /// `(name, type)` pairs in list order.
    ///
    /// Both lists are split on `"; "` and zipped, so a length mismatch
    /// silently stops at the shorter list. Values are untrimmed.
    pub fn interventions(&self) -> impl Iterator<Item = (&str, &str)> {
        self.intervention_name
            .split(LIST_SEPARATOR)
            .zip(self.intervention_type.split(LIST_SEPARATOR))
    }

    /// Whether the joined name and type lists have different lengths.
    pub fn has_misaligned_interventions(&self) -> bool {
        self.intervention_name.split(LIST_SEPARATOR).count()
            != self.intervention_type.split(LIST_SEPARATOR).count()
    }
}

fn field<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("")
}

/// Flatten one raw study. Never fails; absent data becomes `""`.
pub fn normalize(raw: &RawTrial) -> TrialRecord {
    let interventions = raw.list(INTERVENTIONS);
    let join = |key: &str| {
        interventions
            .iter()
            .map(|i| field(i, key))
            .collect::<Vec<_>>()
            .join(LIST_SEPARATOR)
    };

    let phases = match raw.list(PHASES) {
        [] => raw.list(LEGACY_PHASES),
        phases => phases,
    };
    let phase = phases.first().and_then(Value::as_str).unwrap_or("");

    TrialRecord {
        trial_id: raw.text(NCT_ID).to_string(),
        title: raw.text(OFFICIAL_TITLE).to_string(),
        intervention_name: join("name"),
        intervention_type: join("type"),
        phase: phase.to_string(),
        status: raw.text(OVERALL_STATUS).to_string(),
        summary: raw.text(BRIEF_SUMMARY).to_string(),
        sponsor: raw.text(LEAD_SPONSOR).to_string(),
    }
}

/// Flatten every raw study, preserving order.
pub fn normalize_all(raw: &[RawTrial]) -> Vec<TrialRecord> {
    let records: Vec<TrialRecord> = raw.iter().map(normalize).collect();
    let misaligned = records
        .iter()
        .filter(|r| r.has_misaligned_interventions())
        .count();
    if misaligned > 0 {
        log::debug!("{misaligned} trials have misaligned intervention name/type lists");
    }
    records
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample() -> RawTrial {
        RawTrial(json!({
            "protocolSection": {
                "identificationModule": {
                    "nctId": "NCT01234567",
                    "officialTitle": "A Phase II Study of Olaparib in TNBC"
                },
                "armsInterventionsModule": {
                    "interventions": [
                        {"name": "Olaparib", "type": "DRUG"},
                        {"name": "Paclitaxel", "type": "DRUG"}
                    ]
                },
                "designModule": {"phases": ["PHASE2", "PHASE3"]},
                "statusModule": {"overallStatus": "COMPLETED"},
                "descriptionModule": {"briefSummary": "BRCA1 carriers."},
                "sponsorCollaboratorsModule": {"leadSponsor": {"name": "XYZ Institute"}}
            }
        }))
    }

    #[test]
    fn normalize_full_record() {
        let record = normalize(&sample());
        assert_eq!(record.trial_id, "NCT01234567");
        assert_eq!(record.title, "A Phase II Study of Olaparib in TNBC");
        assert_eq!(record.intervention_name, "Olaparib; Paclitaxel");
        assert_eq!(record.intervention_type, "DRUG; DRUG");
        assert_eq!(record.phase, "PHASE2");
        assert_eq!(record.status, "COMPLETED");
        assert_eq!(record.summary, "BRCA1 carriers.");
        assert_eq!(record.sponsor, "XYZ Institute");
    }

    #[test]
    fn normalize_empty_object() {
        let record = normalize(&RawTrial(json!({})));
        assert_eq!(record, TrialRecord::default());
    }

    #[test]
    fn normalize_non_object() {
        assert_eq!(normalize(&RawTrial(json!(null))), TrialRecord::default());
        assert_eq!(normalize(&RawTrial(json!([1, 2]))), TrialRecord::default());
    }

    #[test]
    fn legacy_phase_list_is_used_as_fallback() {
        let raw = RawTrial(json!({
            "protocolSection": {"designModule": {"phaseList": {"phases": ["PHASE1"]}}}
        }));
        assert_eq!(normalize(&raw).phase, "PHASE1");
    }

    #[test]
    fn empty_phase_list_gives_empty_phase() {
        let raw = RawTrial(json!({"protocolSection": {"designModule": {"phases": []}}}));
        assert_eq!(normalize(&raw).phase, "");
    }

    #[test]
    fn intervention_missing_type_keeps_position() {
        let raw = RawTrial(json!({
            "protocolSection": {"armsInterventionsModule": {"interventions": [
                {"name": "Olaparib"},
                {"name": "Radiation", "type": "RADIATION"}
            ]}}
        }));
        let record = normalize(&raw);
        assert_eq!(record.intervention_name, "Olaparib; Radiation");
        assert_eq!(record.intervention_type, "; RADIATION");
        let pairs: Vec<_> = record.interventions().collect();
        assert_eq!(pairs, vec![("Olaparib", ""), ("Radiation", "RADIATION")]);
    }

    #[test]
    fn interventions_truncate_to_shorter_list() {
        let record = TrialRecord {
            intervention_name: "A; B; C".into(),
            intervention_type: "Drug; Drug".into(),
            ..Default::default()
        };
        assert!(record.has_misaligned_interventions());
        assert_eq!(record.interventions().count(), 2);
    }

    #[test]
    fn normalize_all_preserves_order() {
        let records = normalize_all(&[sample(), RawTrial(json!({}))]);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].trial_id, "NCT01234567");
        assert_eq!(records[1].trial_id, "");
    }
}
