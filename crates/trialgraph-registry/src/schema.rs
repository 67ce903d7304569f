//! Arrow schema of the labeled-trials table

use std::sync::{Arc, LazyLock};

use arrow::datatypes::{DataType, Field, Schema, SchemaRef};

/// Table name (file stem) of the labeled-trials artifact
pub const TRIALS_TABLE: &str = "tnbc_trials_labeled";

/// tnbc_trials_labeled: one row per labeled trial
///
/// Text columns are nullable so empty CSV cells read back cleanly.
pub fn labeled_trials() -> &'static SchemaRef {
    static SCHEMA: LazyLock<SchemaRef> = LazyLock::new(|| {
        Arc::new(Schema::new(vec![
            Field::new("trial_id", DataType::Utf8, true), // e.g., "NCT01234567"
            Field::new("title", DataType::Utf8, true),
            Field::new("intervention_name", DataType::Utf8, true), // "; "-joined
            Field::new("intervention_type", DataType::Utf8, true), // aligned with names
            Field::new("phase", DataType::Utf8, true),
            Field::new("status", DataType::Utf8, true),
            Field::new("summary", DataType::Utf8, true),
            Field::new("sponsor", DataType::Utf8, true),
            Field::new("outcome", DataType::Int32, false), // 0 or 1
        ]))
    });
    &SCHEMA
}
