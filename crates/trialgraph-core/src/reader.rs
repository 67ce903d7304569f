//! Read persisted tables back into Arrow batches

use std::fs::File;
use std::io;
use std::path::Path;

use arrow::array::{Array, Int32Array, RecordBatch, StringArray};
use arrow::datatypes::SchemaRef;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::sink::TableFormat;

/// Read a CSV or Parquet table, chosen by file extension.
///
/// `schema` drives CSV parsing; Parquet files carry their own schema.
/// Empty CSV cells come back as nulls; use [`string_value`] to read them as `""`.
pub fn read_table(path: &Path, schema: SchemaRef) -> io::Result<Vec<RecordBatch>> {
    let format = TableFormat::from_path(path).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("unrecognized table extension: {}", path.display()),
        )
    })?;
    let file = File::open(path)?;

    match format {
        TableFormat::Csv => arrow::csv::ReaderBuilder::new(schema)
            .with_header(true)
            .build(file)
            .map_err(io::Error::other)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(io::Error::other),
        TableFormat::Parquet => ParquetRecordBatchReaderBuilder::try_new(file)
            .map_err(io::Error::other)?
            .build()
            .map_err(io::Error::other)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(io::Error::other),
    }
}

fn missing_column(name: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("missing or mistyped column: {name}"),
    )
}

/// Look up a Utf8 column by name
pub fn string_column<'a>(batch: &'a RecordBatch, name: &str) -> io::Result<&'a StringArray> {
    batch
        .column_by_name(name)
        .and_then(|c| c.as_any().downcast_ref::<StringArray>())
        .ok_or_else(|| missing_column(name))
}

/// Look up an Int32 column by name
pub fn int32_column<'a>(batch: &'a RecordBatch, name: &str) -> io::Result<&'a Int32Array> {
    batch
        .column_by_name(name)
        .and_then(|c| c.as_any().downcast_ref::<Int32Array>())
        .ok_or_else(|| missing_column(name))
}

/// Value at `i`, with null read as the empty string
pub fn string_value(array: &StringArray, i: usize) -> &str {
    if array.is_null(i) {
        ""
    } else {
        array.value(i)
    }
}
