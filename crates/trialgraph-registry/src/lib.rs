//! Trialgraph Registry - ClinicalTrials.gov ingestion
//!
//! Pages through the v2 `studies` endpoint, flattens each study into a
//! [`TrialRecord`] and labels trial outcomes from their overall status.
//!
//! # Example
//!
//! ```ignore
//! use trialgraph_registry::{Config, RegistryClient, fetch_all, label_all, normalize_all};
//!
//! let config = Config::default();
//! let mut client = RegistryClient::new(&config);
//! let raw = fetch_all(&mut client, config.max_trials, &indicatif::ProgressBar::hidden());
//! let labeled = label_all(normalize_all(&raw));
//! ```

pub mod api;
pub mod config;
pub mod label;
pub mod record;
pub mod schema;
pub mod transform;

// Re-exports
pub use api::{Page, PageSource, RawTrial, RegistryClient, fetch_all};
pub use config::Config;
pub use label::{LabeledTrial, Outcome, label_all};
pub use record::{TrialRecord, normalize, normalize_all};
pub use transform::{TrialAccumulator, read_labeled_trials};
