pub mod enrich;
pub mod features;
pub mod fetch;
pub mod query;
pub mod run;

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};
use trialgraph_core::TableFormat;
use trialgraph_kg::{EnrichOptions, GeneTargetScope, OutputOptions};

use crate::config::Config;

#[derive(Clone, Copy, ValueEnum, Debug)]
pub enum FormatArg {
    Csv,
    Parquet,
}

impl From<FormatArg> for TableFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Csv => TableFormat::Csv,
            FormatArg::Parquet => TableFormat::Parquet,
        }
    }
}

#[derive(Clone, Copy, ValueEnum, Debug)]
pub enum ScopeArg {
    /// Only drugs some trial tests
    Referenced,
    /// Every drug in the map
    All,
}

impl From<ScopeArg> for GeneTargetScope {
    fn from(s: ScopeArg) -> Self {
        match s {
            ScopeArg::Referenced => GeneTargetScope::Referenced,
            ScopeArg::All => GeneTargetScope::All,
        }
    }
}

/// Where artifacts go; falls back to the `[output]` config section
#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Output directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Table format
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Zstd compression level for Parquet (1-22)
    #[arg(short, long)]
    pub zstd_level: Option<i32>,
}

impl OutputArgs {
    pub fn resolve(self, config: &Config) -> OutputOptions {
        OutputOptions {
            dir: self
                .output
                .unwrap_or_else(|| config.output.default_dir.clone()),
            format: self.format.map_or(config.output.format, Into::into),
            zstd_level: self.zstd_level.unwrap_or(config.output.compression_level),
        }
    }
}

/// Enrichment switches; fall back to the `[enrich]` config section
#[derive(Args, Debug)]
pub struct EnrichFlags {
    /// Which drugs get `targets_gene` edges
    #[arg(long, value_enum)]
    pub gene_scope: Option<ScopeArg>,

    /// Also emit `mentions_gene` edges from trial summaries
    #[arg(long)]
    pub gene_mentions: bool,
}

impl EnrichFlags {
    pub fn resolve(self, config: &Config) -> EnrichOptions {
        EnrichOptions {
            gene_scope: self.gene_scope.map_or(config.enrich.gene_scope, Into::into),
            gene_mentions: self.gene_mentions || config.enrich.gene_mentions,
        }
    }
}

/// Print a key-value summary table on stderr
pub fn print_summary(title: &str, rows: &[(&str, String)]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new(title).fg(Color::Cyan),
            Cell::new("Value").fg(Color::Cyan),
        ]);
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    eprintln!("\n{table}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_args_fall_back_to_config() {
        let config = Config::default();
        let args = OutputArgs {
            output: None,
            format: Some(FormatArg::Parquet),
            zstd_level: None,
        };
        let out = args.resolve(&config);
        assert_eq!(out.dir, PathBuf::from("./data"));
        assert_eq!(out.format, TableFormat::Parquet);
        assert_eq!(out.zstd_level, 3);
    }

    #[test]
    fn enrich_args_override_config() {
        let mut config = Config::default();
        config.enrich.gene_mentions = true;
        let args = EnrichFlags {
            gene_scope: Some(ScopeArg::All),
            gene_mentions: false,
        };
        let options = args.resolve(&config);
        assert_eq!(options.gene_scope, GeneTargetScope::All);
        assert!(options.gene_mentions);
    }
}
