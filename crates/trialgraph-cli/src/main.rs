//! trialgraph - TNBC clinical-trial knowledge-graph pipeline
//!
//! Fetches trials from ClinicalTrials.gov, labels outcomes, derives an
//! enriched triplet table and the outcome-model feature matrix.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "trialgraph")]
#[command(about = "TNBC clinical-trial knowledge-graph pipeline")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file path (default: ./trialgraph.toml or ~/.config/trialgraph/config.toml)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Maximum retry attempts per registry page
    #[arg(long, global = true)]
    max_retries: Option<u32>,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch, label, build and enrich the triplet graph, persist everything
    Run(cmd::run::RunArgs),
    /// Fetch and label trials only
    Fetch(cmd::fetch::FetchArgs),
    /// Rebuild the enriched triplet table from a labeled-trials file
    Enrich(cmd::enrich::EnrichArgs),
    /// Build the outcome-model feature matrix from a labeled-trials file
    Features(cmd::features::FeaturesArgs),
    /// Filter and summarize a triplet table
    Query(cmd::query::QueryArgs),
    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let progress = trialgraph_core::ProgressContext::new();

    // Logging:
    //   TTY:     quiet (warn) unless --debug; spinners show activity
    //   non-TTY: info unless --debug
    let is_tty = progress.is_tty();
    let multi = if is_tty { Some(progress.multi()) } else { None };
    let quiet = is_tty && !cli.debug;
    trialgraph_core::init_logging(quiet, cli.debug, multi);

    let config = if let Some(path) = cli.config {
        Config::from_file(&path)?
    } else {
        Config::load()?
    };

    match cli.command {
        Command::Run(args) => cmd::run::run(args, &config, cli.max_retries, &progress),
        Command::Fetch(args) => cmd::fetch::run(args, &config, cli.max_retries, &progress),
        Command::Enrich(args) => cmd::enrich::run(args, &config),
        Command::Features(args) => cmd::features::run(args, &config),
        Command::Query(args) => cmd::query::run(args),
        Command::Config => {
            use comfy_table::{
                Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL,
            };

            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_header(vec![
                    Cell::new("Setting").fg(Color::Cyan),
                    Cell::new("Value").fg(Color::Cyan),
                ]);

            let registry = config.registry(cli.max_retries);
            let drugs: Vec<String> = config
                .knowledge_base()
                .drug_targets()
                .iter()
                .map(|t| format!("{} → {}", t.drug, t.genes.join(", ")))
                .collect();

            table.add_row(vec![
                "Output directory",
                &config.output.default_dir.display().to_string(),
            ]);
            table.add_row(vec!["Format", &config.output.format.to_string()]);
            table.add_row(vec![
                "Compression level",
                &config.output.compression_level.to_string(),
            ]);
            table.add_row(vec!["Registry URL", &registry.base_url]);
            table.add_row(vec!["Search term", &registry.search_term]);
            table.add_row(vec![
                "Max trials",
                &format!("{} (page size {})", registry.max_trials, registry.page_size),
            ]);
            table.add_row(vec!["Max retries", &registry.max_retries.to_string()]);
            table.add_row(vec!["Gene scope", &config.enrich.gene_scope.to_string()]);
            table.add_row(vec![
                "Gene mentions",
                if config.enrich.gene_mentions {
                    "enabled"
                } else {
                    "disabled"
                },
            ]);
            table.add_row(vec!["Drug targets", &drugs.join("\n")]);

            eprintln!("\n{table}");
            Ok(())
        }
    }
}
