//! Arrow schema of the triplet table

use std::sync::{Arc, LazyLock};

use arrow::datatypes::{DataType, Field, Schema, SchemaRef};

/// Table name (file stem) of the enriched triplet artifact
pub const TRIPLETS_TABLE: &str = "tnbc_kg_triplets";

/// tnbc_kg_triplets: one row per fact, duplicates kept
pub fn triplets() -> &'static SchemaRef {
    static SCHEMA: LazyLock<SchemaRef> = LazyLock::new(|| {
        Arc::new(Schema::new(vec![
            Field::new("head", DataType::Utf8, true),
            Field::new("relation", DataType::Utf8, true),
            Field::new("tail", DataType::Utf8, true), // may be empty (e.g. missing title)
        ]))
    });
    &SCHEMA
}
