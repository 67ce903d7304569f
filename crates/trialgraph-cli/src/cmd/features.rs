//! `trialgraph features` - outcome-model feature matrix from labeled trials

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use trialgraph_core::{TableSink, fmt_num};
use trialgraph_features::{BIOMARKERS, FEATURES_TABLE, extract_features, write_features};
use trialgraph_registry::read_labeled_trials;

use super::{OutputArgs, print_summary};
use crate::config::Config;

#[derive(Args, Debug)]
pub struct FeaturesArgs {
    /// Labeled trials table (.csv or .parquet)
    pub trials: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

pub fn run(args: FeaturesArgs, config: &Config) -> Result<()> {
    let trials = read_labeled_trials(&args.trials)?;
    let output = args.output.resolve(config);
    output.prepare()?;

    let matrix = extract_features(&trials);
    let sink = TableSink::new(
        FEATURES_TABLE,
        &output.dir,
        &matrix.schema(),
        output.format,
        output.zstd_level,
    )
    .with_context(|| format!("Failed to open {FEATURES_TABLE} in {}", output.dir.display()))?;
    let written = write_features(&matrix, sink)?;

    let biomarkers = matrix
        .columns
        .iter()
        .filter(|c| BIOMARKERS.contains(&c.as_str()))
        .count();
    let successes = matrix.labels.iter().filter(|&&l| l == 1).count();

    print_summary(
        "Features",
        &[
            ("Trials", fmt_num(matrix.rows())),
            (
                "Features",
                format!("{} ({biomarkers} biomarkers)", matrix.columns.len()),
            ),
            (
                "Outcomes",
                format!("{} success, {} failure", successes, matrix.rows() - successes),
            ),
            ("Feature table", written.path.display().to_string()),
        ],
    );
    Ok(())
}
