//! `trialgraph fetch` - fetch, normalize and label; writes only the trials table

use std::time::Instant;

use anyhow::Result;
use clap::Args;
use trialgraph_core::{ProgressContext, fmt_num};
use trialgraph_kg::{collect_trials, write_trials};
use trialgraph_registry::RegistryClient;

use super::{OutputArgs, print_summary};
use crate::config::Config;

#[derive(Args, Debug)]
pub struct FetchArgs {
    #[command(flatten)]
    pub output: OutputArgs,

    /// Registry search phrase
    #[arg(long)]
    pub search: Option<String>,

    /// Stop after this many trials
    #[arg(short = 'l', long)]
    pub max_trials: Option<usize>,
}

pub fn run(
    args: FetchArgs,
    config: &Config,
    max_retries: Option<u32>,
    progress: &ProgressContext,
) -> Result<()> {
    let start = Instant::now();
    let mut registry = config.registry(max_retries);
    if let Some(search) = args.search {
        registry.search_term = search;
    }
    if let Some(max_trials) = args.max_trials {
        registry.max_trials = max_trials;
    }
    let output = args.output.resolve(config);
    output.prepare()?;

    log::info!("Fetching trials for \"{}\"", registry.search_term);
    let mut client = RegistryClient::new(&registry);
    let (fetched, trials) = collect_trials(&mut client, registry.max_trials, progress);
    let written = write_trials(&trials, &output)?;

    print_summary(
        "Fetch",
        &[
            ("Fetched", fmt_num(fetched)),
            ("Labeled", fmt_num(trials.len())),
            ("Dropped", fmt_num(fetched - trials.len())),
            ("Trials table", written.path.display().to_string()),
            ("Time", format!("{:.1}s", start.elapsed().as_secs_f64())),
        ],
    );
    Ok(())
}
