//! Trialgraph Core - shared plumbing for the trial knowledge-graph pipeline
//!
//! HTTP access to the registry, retry policy, Arrow batch accumulation,
//! CSV/Parquet table sinks and readers, run manifests, logging and progress.

pub mod accumulator;
pub mod http;
pub mod logging;
pub mod manifest;
pub mod progress;
pub mod reader;
pub mod retry;
pub mod sink;

// Re-exports for convenience
pub use accumulator::{Accumulator, write_rows};
pub use http::{HttpError, SHARED_RUNTIME, get_json, get_text, http_client};
pub use logging::init_logging;
pub use manifest::{RunManifest, hash_file};
pub use progress::{ProgressContext, fmt_num};
pub use reader::{int32_column, read_table, string_column, string_value};
pub use retry::{backoff_duration, retry_with_backoff};
pub use sink::{TableFormat, TableSink, WrittenTable, cleanup_tmp_files};
