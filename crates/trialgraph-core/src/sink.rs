//! Table sinks: CSV or Parquet writer with atomic tmp→rename

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use arrow::array::RecordBatch;
use arrow::datatypes::SchemaRef;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, ZstdLevel};
use parquet::file::properties::WriterProperties;
use serde::{Deserialize, Serialize};

/// On-disk format of a persisted table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableFormat {
    /// Comma-delimited text with a header row
    #[default]
    Csv,
    /// Zstd-compressed Parquet
    Parquet,
}

impl TableFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Parquet => "parquet",
        }
    }

    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("csv") {
            Some(Self::Csv)
        } else if ext.eq_ignore_ascii_case("parquet") {
            Some(Self::Parquet)
        } else {
            None
        }
    }
}

impl std::fmt::Display for TableFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

enum Writer {
    Csv(arrow::csv::Writer<File>),
    Parquet(ArrowWriter<File>),
}

/// A finalized table on disk
#[derive(Debug, Clone)]
pub struct WrittenTable {
    pub path: PathBuf,
    pub rows: usize,
}

/// Buffered table writer; the final file only appears after [`TableSink::finalize`].
pub struct TableSink {
    writer: Writer,
    schema: SchemaRef,
    tmp_path: PathBuf,
    final_path: PathBuf,
    row_count: usize,
}

impl std::fmt::Debug for TableSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableSink")
            .field("final_path", &self.final_path)
            .field("row_count", &self.row_count)
            .finish_non_exhaustive()
    }
}

impl TableSink {
    /// Create a sink writing `<output_dir>/<name>.<ext>` through a `.tmp` file
    pub fn new(
        name: &str,
        output_dir: &Path,
        schema: &SchemaRef,
        format: TableFormat,
        zstd_level: i32,
    ) -> io::Result<Self> {
        let filename = format!("{name}.{}", format.extension());
        let final_path = output_dir.join(&filename);
        let tmp_path = output_dir.join(format!("{filename}.tmp"));

        if tmp_path.exists() {
            fs::remove_file(&tmp_path)?;
        }

        let file = File::create(&tmp_path)?;
        let writer = match format {
            TableFormat::Csv => Writer::Csv(arrow::csv::WriterBuilder::new().with_header(true).build(file)),
            TableFormat::Parquet => {
                let level = ZstdLevel::try_new(zstd_level)
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
                let props = WriterProperties::builder()
                    .set_compression(Compression::ZSTD(level))
                    .build();
                Writer::Parquet(
                    ArrowWriter::try_new(file, schema.clone(), Some(props)).map_err(io::Error::other)?,
                )
            }
        };

        Ok(Self {
            writer,
            schema: schema.clone(),
            tmp_path,
            final_path,
            row_count: 0,
        })
    }

    /// Path the table will have once finalized
    pub fn path(&self) -> &Path {
        &self.final_path
    }

    /// Write a record batch
    pub fn write_batch(&mut self, batch: &RecordBatch) -> io::Result<()> {
        self.row_count += batch.num_rows();
        match &mut self.writer {
            Writer::Csv(w) => w.write(batch).map_err(io::Error::other),
            Writer::Parquet(w) => w.write(batch).map_err(io::Error::other),
        }
    }

    /// Flush, close and atomically rename tmp → final.
    ///
    /// An empty CSV table still gets its header row.
    pub fn finalize(mut self) -> io::Result<WrittenTable> {
        if self.row_count == 0 {
            if let Writer::Csv(w) = &mut self.writer {
                w.write(&RecordBatch::new_empty(self.schema.clone()))
                    .map_err(io::Error::other)?;
            }
        }
        match self.writer {
            Writer::Csv(w) => w.into_inner().sync_all()?,
            Writer::Parquet(w) => {
                w.close().map_err(io::Error::other)?;
            }
        }
        fs::rename(&self.tmp_path, &self.final_path)?;
        log::debug!(
            "wrote {} rows to {}",
            self.row_count,
            self.final_path.display()
        );
        Ok(WrittenTable {
            path: self.final_path,
            rows: self.row_count,
        })
    }
}

/// Remove stale .tmp files left in the output directory by an interrupted run
pub fn cleanup_tmp_files(output_dir: &Path) -> io::Result<()> {
    for entry in fs::read_dir(output_dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "tmp") {
            log::warn!("Removing stale tmp file: {}", path.display());
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::array::{ArrayRef, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use tempfile::TempDir;

    use super::*;

    fn schema() -> SchemaRef {
        Arc::new(Schema::new(vec![
            Field::new("head", DataType::Utf8, true),
            Field::new("tail", DataType::Utf8, true),
        ]))
    }

    fn batch(heads: Vec<&str>, tails: Vec<&str>) -> RecordBatch {
        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from(heads)),
            Arc::new(StringArray::from(tails)),
        ];
        RecordBatch::try_new(schema(), columns).unwrap()
    }

    #[test]
    fn format_from_path() {
        assert_eq!(TableFormat::from_path(Path::new("a/b.csv")), Some(TableFormat::Csv));
        assert_eq!(
            TableFormat::from_path(Path::new("t.PARQUET")),
            Some(TableFormat::Parquet)
        );
        assert_eq!(TableFormat::from_path(Path::new("t.json")), None);
        assert_eq!(TableFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn csv_sink_quotes_and_renames() {
        let dir = TempDir::new().unwrap();
        let mut sink = TableSink::new("edges", dir.path(), &schema(), TableFormat::Csv, 3).unwrap();
        sink.write_batch(&batch(vec!["NCT1"], vec!["A, B"])).unwrap();
        let out = sink.finalize().unwrap();

        assert_eq!(out.rows, 1);
        assert_eq!(out.path, dir.path().join("edges.csv"));
        assert!(!dir.path().join("edges.csv.tmp").exists());
        let text = std::fs::read_to_string(&out.path).unwrap();
        assert_eq!(text, "head,tail\nNCT1,\"A, B\"\n");
    }

    #[test]
    fn empty_csv_keeps_header() {
        let dir = TempDir::new().unwrap();
        let sink = TableSink::new("empty", dir.path(), &schema(), TableFormat::Csv, 3).unwrap();
        let out = sink.finalize().unwrap();
        assert_eq!(out.rows, 0);
        assert_eq!(std::fs::read_to_string(out.path).unwrap(), "head,tail\n");
    }

    #[test]
    fn parquet_sink_rejects_bad_zstd_level() {
        let dir = TempDir::new().unwrap();
        let err = TableSink::new("t", dir.path(), &schema(), TableFormat::Parquet, 99).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn cleanup_tmp_files_removes_only_tmp() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.csv.tmp"), b"stale").unwrap();
        std::fs::write(dir.path().join("b.csv"), b"keep").unwrap();

        cleanup_tmp_files(dir.path()).unwrap();

        assert!(!dir.path().join("a.csv.tmp").exists());
        assert!(dir.path().join("b.csv").exists());
    }
}
