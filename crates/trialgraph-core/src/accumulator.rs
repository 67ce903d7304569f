//! Batch accumulator trait and a generic row-to-sink writer

use arrow::array::RecordBatch;
use arrow::error::ArrowError;

use crate::sink::TableSink;

/// Default batch size for flushing accumulated rows into a `RecordBatch`.
pub const DEFAULT_BATCH_SIZE: usize = 8192;

/// Accumulator trait for batching typed rows into Arrow `RecordBatch`es.
pub trait Accumulator {
    type Row;

    /// Push a row into the accumulator
    fn push(&mut self, row: Self::Row);

    /// Number of rows currently buffered
    fn len(&self) -> usize;

    /// Check if buffer is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if buffer is full and should be flushed
    fn is_full(&self) -> bool {
        self.len() >= DEFAULT_BATCH_SIZE
    }

    /// Take buffered rows as a RecordBatch, resetting internal state
    fn take_batch(&mut self) -> Result<RecordBatch, ArrowError>;
}

/// Push every row through `acc`, flushing full batches into `sink`.
///
/// Returns the number of rows written. The sink is not finalized.
pub fn write_rows<A: Accumulator>(
    acc: &mut A,
    rows: impl IntoIterator<Item = A::Row>,
    sink: &mut TableSink,
) -> std::io::Result<usize> {
    let mut written = 0usize;
    for row in rows {
        acc.push(row);
        written += 1;
        if acc.is_full() {
            sink.write_batch(&acc.take_batch().map_err(std::io::Error::other)?)?;
        }
    }
    if !acc.is_empty() {
        sink.write_batch(&acc.take_batch().map_err(std::io::Error::other)?)?;
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::array::{ArrayRef, Int64Array};
    use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
    use tempfile::TempDir;

    use super::*;
    use crate::sink::TableFormat;

    struct CountAcc {
        schema: SchemaRef,
        values: Vec<i64>,
    }

    impl Accumulator for CountAcc {
        type Row = i64;

        fn push(&mut self, row: i64) {
            self.values.push(row);
        }

        fn len(&self) -> usize {
            self.values.len()
        }

        fn take_batch(&mut self) -> Result<RecordBatch, ArrowError> {
            let values = std::mem::take(&mut self.values);
            let column: ArrayRef = Arc::new(Int64Array::from(values));
            RecordBatch::try_new(self.schema.clone(), vec![column])
        }
    }

    #[test]
    fn write_rows_flushes_across_batches() {
        let dir = TempDir::new().unwrap();
        let schema = Arc::new(Schema::new(vec![Field::new("n", DataType::Int64, false)]));
        let mut acc = CountAcc {
            schema: schema.clone(),
            values: Vec::new(),
        };
        let mut sink =
            TableSink::new("numbers", dir.path(), &schema, TableFormat::Parquet, 3).unwrap();

        let total = DEFAULT_BATCH_SIZE as i64 + 10;
        let written = write_rows(&mut acc, 0..total, &mut sink).unwrap();
        let output = sink.finalize().unwrap();

        assert_eq!(written, total as usize);
        assert_eq!(output.rows, total as usize);
        assert!(acc.is_empty());
    }
}
