//! `trialgraph run` - full pipeline against the live registry

use anyhow::Result;
use clap::Args;
use trialgraph_core::{ProgressContext, fmt_num};
use trialgraph_kg::PipelineConfig;
use trialgraph_registry::RegistryClient;

use super::{EnrichFlags, OutputArgs, print_summary};
use crate::config::Config;

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub enrich: EnrichFlags,

    /// Registry search phrase
    #[arg(long)]
    pub search: Option<String>,

    /// Stop after this many trials
    #[arg(short = 'l', long)]
    pub max_trials: Option<usize>,
}

pub fn run(
    args: RunArgs,
    config: &Config,
    max_retries: Option<u32>,
    progress: &ProgressContext,
) -> Result<()> {
    let mut registry = config.registry(max_retries);
    if let Some(search) = args.search {
        registry.search_term = search;
    }
    if let Some(max_trials) = args.max_trials {
        registry.max_trials = max_trials;
    }

    let pipeline = PipelineConfig {
        output: args.output.resolve(config),
        search_term: registry.search_term.clone(),
        max_trials: registry.max_trials,
        enrich: args.enrich.resolve(config),
    };

    log::info!("Running pipeline for \"{}\"", pipeline.search_term);
    log::info!("  Output: {}", pipeline.output.dir.display());
    log::info!("  Gene scope: {}", pipeline.enrich.gene_scope);

    let kb = config.knowledge_base();
    let mut client = RegistryClient::new(&registry);
    let summary = trialgraph_kg::run(&mut client, &pipeline, &kb, progress)?;

    let mut rows = vec![
        (
            "Trials",
            format!(
                "{} fetched, {} labeled ({} dropped)",
                fmt_num(summary.fetched),
                fmt_num(summary.labeled),
                fmt_num(summary.dropped())
            ),
        ),
        ("Triplets", fmt_num(summary.triplets)),
    ];
    rows.extend(
        summary
            .relation_counts
            .iter()
            .map(|(relation, n)| (relation.as_str(), fmt_num(*n))),
    );
    rows.push(("Trials table", summary.trials_path.display().to_string()));
    rows.push(("Triplet table", summary.triplets_path.display().to_string()));
    rows.push(("Manifest", summary.manifest_path.display().to_string()));
    rows.push(("Time", format!("{:.1}s", summary.elapsed.as_secs_f64())));
    print_summary("Pipeline", &rows);

    Ok(())
}
