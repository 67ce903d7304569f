//! Labeled trials ⇄ Arrow RecordBatch

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Int32Array, RecordBatch, StringArray};
use arrow::datatypes::SchemaRef;
use arrow::error::ArrowError;
use trialgraph_core::{Accumulator, int32_column, read_table, string_column, string_value};

use crate::label::{LabeledTrial, Outcome};
use crate::record::TrialRecord;
use crate::schema;

/// Column-wise buffer of labeled trials
pub struct TrialAccumulator {
    schema: &'static SchemaRef,
    trial_id: Vec<String>,
    title: Vec<String>,
    intervention_name: Vec<String>,
    intervention_type: Vec<String>,
    phase: Vec<String>,
    status: Vec<String>,
    summary: Vec<String>,
    sponsor: Vec<String>,
    outcome: Vec<i32>,
}

impl Default for TrialAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl TrialAccumulator {
    pub fn new() -> Self {
        Self {
            schema: schema::labeled_trials(),
            trial_id: Vec::new(),
            title: Vec::new(),
            intervention_name: Vec::new(),
            intervention_type: Vec::new(),
            phase: Vec::new(),
            status: Vec::new(),
            summary: Vec::new(),
            sponsor: Vec::new(),
            outcome: Vec::new(),
        }
    }
}

fn utf8(values: &mut Vec<String>) -> ArrayRef {
    Arc::new(StringArray::from(std::mem::take(values)))
}

impl Accumulator for TrialAccumulator {
    type Row = LabeledTrial;

    fn push(&mut self, row: LabeledTrial) {
        let LabeledTrial { record, outcome } = row;
        self.trial_id.push(record.trial_id);
        self.title.push(record.title);
        self.intervention_name.push(record.intervention_name);
        self.intervention_type.push(record.intervention_type);
        self.phase.push(record.phase);
        self.status.push(record.status);
        self.summary.push(record.summary);
        self.sponsor.push(record.sponsor);
        self.outcome.push(outcome.value());
    }

    fn len(&self) -> usize {
        self.trial_id.len()
    }

    fn take_batch(&mut self) -> Result<RecordBatch, ArrowError> {
        let columns: Vec<ArrayRef> = vec![
            utf8(&mut self.trial_id),
            utf8(&mut self.title),
            utf8(&mut self.intervention_name),
            utf8(&mut self.intervention_type),
            utf8(&mut self.phase),
            utf8(&mut self.status),
            utf8(&mut self.summary),
            utf8(&mut self.sponsor),
            Arc::new(Int32Array::from(std::mem::take(&mut self.outcome))),
        ];
        RecordBatch::try_new(self.schema.clone(), columns)
    }
}

/// Decode labeled trials from record batches.
///
/// Rows whose outcome is not 0/1 are skipped with a warning.
pub fn trials_from_batches(batches: &[RecordBatch]) -> Result<Vec<LabeledTrial>> {
    let mut trials = Vec::new();
    for batch in batches {
        let col = |name: &str| string_column(batch, name);
        let (trial_id, title, name, kind) = (
            col("trial_id")?,
            col("title")?,
            col("intervention_name")?,
            col("intervention_type")?,
        );
        let (phase, status, summary, sponsor) =
            (col("phase")?, col("status")?, col("summary")?, col("sponsor")?);
        let outcome = int32_column(batch, "outcome")?;

        for i in 0..batch.num_rows() {
            let Some(label) = Outcome::from_value(outcome.value(i)) else {
                log::warn!(
                    "skipping {}: outcome {} is not 0/1",
                    string_value(trial_id, i),
                    outcome.value(i)
                );
                continue;
            };
            trials.push(LabeledTrial {
                record: TrialRecord {
                    trial_id: string_value(trial_id, i).to_string(),
                    title: string_value(title, i).to_string(),
                    intervention_name: string_value(name, i).to_string(),
                    intervention_type: string_value(kind, i).to_string(),
                    phase: string_value(phase, i).to_string(),
                    status: string_value(status, i).to_string(),
                    summary: string_value(summary, i).to_string(),
                    sponsor: string_value(sponsor, i).to_string(),
                },
                outcome: label,
            });
        }
    }
    Ok(trials)
}

/// Load a labeled-trials artifact (CSV or Parquet).
pub fn read_labeled_trials(path: &Path) -> Result<Vec<LabeledTrial>> {
    let batches = read_table(path, schema::labeled_trials().clone())
        .with_context(|| format!("failed to read trials table {}", path.display()))?;
    let trials = trials_from_batches(&batches)
        .with_context(|| format!("malformed trials table {}", path.display()))?;
    log::info!("Loaded {} labeled trials from {}", trials.len(), path.display());
    Ok(trials)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trial(id: &str, outcome: Outcome) -> LabeledTrial {
        LabeledTrial {
            record: TrialRecord {
                trial_id: id.into(),
                title: "A study, with commas".into(),
                intervention_name: "Olaparib; Placebo".into(),
                intervention_type: "DRUG; OTHER".into(),
                phase: "PHASE2".into(),
                status: "COMPLETED".into(),
                summary: String::new(),
                sponsor: "XYZ Institute".into(),
            },
            outcome,
        }
    }

    #[test]
    fn accumulator_batch() {
        let mut acc = TrialAccumulator::new();
        acc.push(trial("NCT1", Outcome::Success));
        acc.push(trial("NCT2", Outcome::Failure));
        assert_eq!(acc.len(), 2);

        let batch = acc.take_batch().unwrap();
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.num_columns(), 9);
        assert!(acc.is_empty());
    }

    #[test]
    fn batches_decode_to_same_trials() {
        let mut acc = TrialAccumulator::new();
        let trials = vec![trial("NCT1", Outcome::Success), trial("NCT2", Outcome::Failure)];
        for t in trials.clone() {
            acc.push(t);
        }
        let batch = acc.take_batch().unwrap();
        assert_eq!(trials_from_batches(&[batch]).unwrap(), trials);
    }
}
