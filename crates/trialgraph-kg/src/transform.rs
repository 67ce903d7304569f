//! Triplets ⇄ Arrow RecordBatch

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, RecordBatch, StringArray};
use arrow::datatypes::SchemaRef;
use arrow::error::ArrowError;
use trialgraph_core::{Accumulator, read_table, string_column, string_value};

use crate::schema;
use crate::triplet::{Triplet, TripletTable};

pub struct TripletAccumulator {
    schema: &'static SchemaRef,
    head: Vec<String>,
    relation: Vec<String>,
    tail: Vec<String>,
}

impl Default for TripletAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl TripletAccumulator {
    pub fn new() -> Self {
        Self {
            schema: schema::triplets(),
            head: Vec::new(),
            relation: Vec::new(),
            tail: Vec::new(),
        }
    }
}

impl Accumulator for TripletAccumulator {
    type Row = Triplet;

    fn push(&mut self, row: Triplet) {
        self.head.push(row.head);
        self.relation.push(row.relation);
        self.tail.push(row.tail);
    }

    fn len(&self) -> usize {
        self.head.len()
    }

    fn take_batch(&mut self) -> Result<RecordBatch, ArrowError> {
        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from(std::mem::take(&mut self.head))),
            Arc::new(StringArray::from(std::mem::take(&mut self.relation))),
            Arc::new(StringArray::from(std::mem::take(&mut self.tail))),
        ];
        RecordBatch::try_new(self.schema.clone(), columns)
    }
}

pub fn triplets_from_batches(batches: &[RecordBatch]) -> Result<TripletTable> {
    let mut rows = Vec::new();
    for batch in batches {
        let head = string_column(batch, "head")?;
        let relation = string_column(batch, "relation")?;
        let tail = string_column(batch, "tail")?;
        for i in 0..batch.num_rows() {
            rows.push(Triplet {
                head: string_value(head, i).to_string(),
                relation: string_value(relation, i).to_string(),
                tail: string_value(tail, i).to_string(),
            });
        }
    }
    Ok(TripletTable::from(rows))
}

/// Load a triplet artifact (CSV or Parquet).
pub fn read_triplets(path: &Path) -> Result<TripletTable> {
    let batches = read_table(path, schema::triplets().clone())
        .with_context(|| format!("failed to read triplet table {}", path.display()))?;
    let table = triplets_from_batches(&batches)
        .with_context(|| format!("malformed triplet table {}", path.display()))?;
    log::info!("Loaded {} triplets from {}", table.len(), path.display());
    Ok(table)
}
