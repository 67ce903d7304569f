//! Integration tests for trialgraph-registry
//!
//! Network tests are marked #[ignore].
//! Run with: cargo test -p trialgraph-registry --test integration -- --ignored

use indicatif::ProgressBar;
use serde_json::json;
use tempfile::TempDir;
use trialgraph_core::{Accumulator, TableFormat, TableSink, write_rows};
use trialgraph_registry::schema::{TRIALS_TABLE, labeled_trials};
use trialgraph_registry::{
    Config, Outcome, RawTrial, RegistryClient, TrialAccumulator, fetch_all, label_all,
    normalize_all, read_labeled_trials,
};

fn raw(id: &str, status: &str, interventions: serde_json::Value) -> RawTrial {
    RawTrial(json!({
        "protocolSection": {
            "identificationModule": {"nctId": id, "officialTitle": format!("Trial {id}")},
            "armsInterventionsModule": {"interventions": interventions},
            "statusModule": {"overallStatus": status}
        }
    }))
}

fn write_and_read(format: TableFormat) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let raws = vec![
        raw("NCT1", "COMPLETED", json!([{"name": "Olaparib", "type": "DRUG"}])),
        raw("NCT2", "RECRUITING", json!([])),
        raw("NCT3", "TERMINATED", json!([])),
    ];
    let labeled = label_all(normalize_all(&raws));
    assert_eq!(labeled.len(), 2);

    let mut sink = TableSink::new(TRIALS_TABLE, dir.path(), labeled_trials(), format, 3).unwrap();
    let mut acc = TrialAccumulator::new();
    write_rows(&mut acc, labeled.clone(), &mut sink).unwrap();
    assert!(acc.is_empty());
    let written = sink.finalize().unwrap();
    assert_eq!(written.rows, 2);

    let loaded = read_labeled_trials(&written.path).unwrap();
    assert_eq!(loaded, labeled);
    assert_eq!(loaded[0].outcome, Outcome::Success);
    assert_eq!(loaded[1].record.intervention_name, "");
}

#[test]
fn labeled_trials_csv_round_trip() {
    write_and_read(TableFormat::Csv);
}

#[test]
fn labeled_trials_parquet_round_trip() {
    write_and_read(TableFormat::Parquet);
}

#[test]
fn csv_header_matches_contract() {
    let dir = TempDir::new().unwrap();
    let sink = TableSink::new(TRIALS_TABLE, dir.path(), labeled_trials(), TableFormat::Csv, 3)
        .unwrap();
    let written = sink.finalize().unwrap();
    let text = std::fs::read_to_string(written.path).unwrap();
    assert_eq!(
        text.trim_end(),
        "trial_id,title,intervention_name,intervention_type,phase,status,summary,sponsor,outcome"
    );
}

/// Fetch two small pages from the live registry
/// Run with: cargo test -p trialgraph-registry --test integration -- --ignored fetch_live_pages
#[test]
#[ignore]
fn fetch_live_pages() {
    let config = Config {
        max_trials: 20,
        page_size: 10,
        ..Default::default()
    };
    let mut client = RegistryClient::new(&config);
    let raws = fetch_all(&mut client, config.max_trials, &ProgressBar::hidden());
    assert_eq!(raws.len(), 20);

    let records = normalize_all(&raws);
    assert!(records.iter().all(|r| r.trial_id.starts_with("NCT")));
}
