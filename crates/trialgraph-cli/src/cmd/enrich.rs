//! `trialgraph enrich` - rebuild the triplet table from a labeled-trials artifact
//!
//! Triplets are regenerated from the trials, so enrichment never stacks on a
//! previously enriched table.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use trialgraph_core::fmt_num;
use trialgraph_kg::pipeline::{finish_manifest, graph_manifest};
use trialgraph_kg::{build_graph, write_triplets};
use trialgraph_registry::read_labeled_trials;

use super::{EnrichFlags, OutputArgs, print_summary};
use crate::config::Config;

#[derive(Args, Debug)]
pub struct EnrichArgs {
    /// Labeled trials table (.csv or .parquet)
    pub trials: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub enrich: EnrichFlags,
}

pub fn run(args: EnrichArgs, config: &Config) -> Result<()> {
    let trials = read_labeled_trials(&args.trials)?;
    let output = args.output.resolve(config);
    let options = args.enrich.resolve(config);
    output.prepare()?;

    let table = build_graph(&trials, &config.knowledge_base(), options)?;
    let written = write_triplets(&table, &output)?;

    let mut manifest = graph_manifest(&output, options, trials.len(), &table);
    manifest.setting("source", args.trials.display());
    let manifest_path = finish_manifest(manifest, &output.dir, &[written.path.as_path()])?;

    let mut rows = vec![
        ("Trials", fmt_num(trials.len())),
        ("Triplets", fmt_num(table.len())),
    ];
    rows.extend(
        table
            .relation_counts()
            .into_iter()
            .map(|(relation, n)| (relation, fmt_num(n))),
    );
    rows.push(("Triplet table", written.path.display().to_string()));
    rows.push(("Manifest", manifest_path.display().to_string()));
    print_summary("Enrich", &rows);
    Ok(())
}
