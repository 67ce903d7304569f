//! Feature matrix encoding and persistence

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Int32Array, RecordBatch, StringArray};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::error::ArrowError;
use trialgraph_core::{TableSink, WrittenTable, fmt_num};
use trialgraph_registry::{LabeledTrial, TrialRecord};

use crate::biomarker::extract_biomarkers;

/// Table name (file stem) of the feature artifact
pub const FEATURES_TABLE: &str = "tnbc_ml_features";

const PHASE_DEFAULT: &str = "Not Reported";
const UNKNOWN: &str = "Unknown";

/// Categorical values of one trial after defaulting.
struct Categories {
    phase: String,
    sponsor: String,
    intervention_type: String,
}

impl Categories {
    fn of(record: &TrialRecord) -> Self {
        let or = |value: &str, default: &str| {
            if value.is_empty() {
                default.to_string()
            } else {
                value.to_string()
            }
        };
        Self {
            phase: or(&record.phase, PHASE_DEFAULT).to_uppercase(),
            sponsor: or(&record.sponsor, UNKNOWN),
            intervention_type: or(&record.intervention_type, UNKNOWN),
        }
    }

    fn columns(&self) -> [String; 3] {
        [
            format!("phase_{}", self.phase),
            format!("sponsor_{}", self.sponsor),
            format!("intervention_type_{}", self.intervention_type),
        ]
    }
}

/// Dense 0/1 features, one row per labeled trial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureMatrix {
    pub trial_ids: Vec<String>,
    /// Feature names in column order
    pub columns: Vec<String>,
    /// `values[row][col]`
    pub values: Vec<Vec<u8>>,
    /// Outcome per row
    pub labels: Vec<i32>,
}

impl FeatureMatrix {
    pub fn rows(&self) -> usize {
        self.trial_ids.len()
    }

    /// Values of the named feature column
    pub fn column(&self, name: &str) -> Option<Vec<u8>> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(self.values.iter().map(|row| row[idx]).collect())
    }

    /// `trial_id`, every feature, then `outcome`.
    pub fn schema(&self) -> SchemaRef {
        let mut fields = Vec::with_capacity(self.columns.len() + 2);
        fields.push(Field::new("trial_id", DataType::Utf8, true));
        fields.extend(
            self.columns
                .iter()
                .map(|c| Field::new(c.as_str(), DataType::Int32, false)),
        );
        fields.push(Field::new("outcome", DataType::Int32, false));
        Arc::new(Schema::new(fields))
    }

    pub fn to_record_batch(&self) -> Result<RecordBatch, ArrowError> {
        let mut columns: Vec<ArrayRef> = Vec::with_capacity(self.columns.len() + 2);
        columns.push(Arc::new(StringArray::from(self.trial_ids.clone())));
        for idx in 0..self.columns.len() {
            let values: Int32Array = self.values.iter().map(|row| Some(i32::from(row[idx]))).collect();
            columns.push(Arc::new(values));
        }
        columns.push(Arc::new(Int32Array::from(self.labels.clone())));
        RecordBatch::try_new(self.schema(), columns)
    }
}

/// Build the feature matrix for a labeled corpus.
///
/// Columns: `phase_*`, `sponsor_*`, `intervention_type_*` (each group sorted
/// by value), then biomarker symbols (sorted).
pub fn extract_features(trials: &[LabeledTrial]) -> FeatureMatrix {
    let categories: Vec<Categories> = trials.iter().map(|t| Categories::of(&t.record)).collect();
    let biomarkers: Vec<BTreeSet<String>> = trials
        .iter()
        .map(|t| extract_biomarkers(&t.record.title))
        .collect();

    let phases: BTreeSet<&str> = categories.iter().map(|c| c.phase.as_str()).collect();
    let sponsors: BTreeSet<&str> = categories.iter().map(|c| c.sponsor.as_str()).collect();
    let kinds: BTreeSet<&str> = categories
        .iter()
        .map(|c| c.intervention_type.as_str())
        .collect();
    let markers: BTreeSet<&str> = biomarkers.iter().flatten().map(String::as_str).collect();

    let columns: Vec<String> = phases
        .iter()
        .map(|v| format!("phase_{v}"))
        .chain(sponsors.iter().map(|v| format!("sponsor_{v}")))
        .chain(kinds.iter().map(|v| format!("intervention_type_{v}")))
        .chain(markers.iter().map(|m| m.to_string()))
        .collect();
    let index: HashMap<&str, usize> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| (c.as_str(), i))
        .collect();

    let values = categories
        .iter()
        .zip(&biomarkers)
        .map(|(cats, found)| {
            let mut row = vec![0u8; columns.len()];
            for name in cats.columns().iter().chain(found) {
                if let Some(&i) = index.get(name.as_str()) {
                    row[i] = 1;
                }
            }
            row
        })
        .collect();

    log::info!(
        "Encoded {} trials into {} features",
        fmt_num(trials.len()),
        columns.len()
    );
    FeatureMatrix {
        trial_ids: trials.iter().map(|t| t.record.trial_id.clone()).collect(),
        columns,
        values,
        labels: trials.iter().map(|t| t.outcome.value()).collect(),
    }
}

/// Encode one trial against an existing column list.
///
/// Title biomarkers and `extra_biomarkers` both set their columns; names
/// absent from `feature_names` are ignored and unmatched columns stay 0.
pub fn encode_trial(
    trial: &TrialRecord,
    extra_biomarkers: &[&str],
    feature_names: &[String],
) -> Vec<u8> {
    let mut present: BTreeSet<String> = Categories::of(trial).columns().into_iter().collect();
    present.extend(extract_biomarkers(&trial.title));
    present.extend(extra_biomarkers.iter().map(|b| b.to_string()));

    feature_names
        .iter()
        .map(|name| u8::from(present.contains(name)))
        .collect()
}

/// Persist the matrix as `tnbc_ml_features.<ext>`.
pub fn write_features(matrix: &FeatureMatrix, mut sink: TableSink) -> Result<WrittenTable> {
    if matrix.rows() > 0 {
        let batch = matrix
            .to_record_batch()
            .context("Failed to build feature batch")?;
        sink.write_batch(&batch).context("Failed to write features")?;
    }
    let written = sink.finalize().context("Failed to finalize feature table")?;
    log::info!(
        "Wrote {} feature rows to {}",
        fmt_num(written.rows),
        written.path.display()
    );
    Ok(written)
}
