//! End-to-end orchestration: fetch → normalize → label → triplets → enrich → persist

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use trialgraph_core::{
    ProgressContext, RunManifest, TableFormat, TableSink, WrittenTable, cleanup_tmp_files,
    fmt_num, write_rows,
};
use trialgraph_registry::schema::{TRIALS_TABLE, labeled_trials};
use trialgraph_registry::{
    LabeledTrial, PageSource, TrialAccumulator, TrialRecord, fetch_all, label_all, normalize_all,
};

use crate::enrich::{EnrichOptions, enrich_all};
use crate::generate::generate_triplets;
use crate::knowledge::KnowledgeBase;
use crate::schema::{TRIPLETS_TABLE, triplets};
use crate::transform::TripletAccumulator;
use crate::triplet::TripletTable;

/// Where and how artifacts are written
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub dir: PathBuf,
    pub format: TableFormat,
    /// Zstd level for Parquet output
    pub zstd_level: i32,
}

impl OutputOptions {
    /// Create the directory and clear `.tmp` leftovers from an interrupted run.
    pub fn prepare(&self) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create output dir: {}", self.dir.display()))?;
        cleanup_tmp_files(&self.dir)
            .with_context(|| format!("Failed to clean {}", self.dir.display()))?;
        Ok(())
    }

    fn sink(&self, name: &str, schema: &arrow::datatypes::SchemaRef) -> Result<TableSink> {
        TableSink::new(name, &self.dir, schema, self.format, self.zstd_level)
            .with_context(|| format!("Failed to open {name} in {}", self.dir.display()))
    }
}

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub output: OutputOptions,
    pub search_term: String,
    pub max_trials: usize,
    pub enrich: EnrichOptions,
}

/// Pipeline execution summary
#[derive(Debug)]
pub struct Summary {
    pub fetched: usize,
    pub labeled: usize,
    pub triplets: usize,
    pub relation_counts: BTreeMap<String, usize>,
    pub trials_path: PathBuf,
    pub triplets_path: PathBuf,
    pub manifest_path: PathBuf,
    pub elapsed: Duration,
}

impl Summary {
    /// Trials fetched but dropped for lack of a usable status
    pub fn dropped(&self) -> usize {
        self.fetched - self.labeled
    }
}

/// Fetch, normalize and label. Returns the raw count and the labeled trials.
pub fn collect_trials<S: PageSource + ?Sized>(
    source: &mut S,
    max_trials: usize,
    progress: &ProgressContext,
) -> (usize, Vec<LabeledTrial>) {
    let pb = progress.stage_line("fetch");
    let raw = fetch_all(source, max_trials, &pb);
    pb.finish_with_message(format!("{} trials", fmt_num(raw.len())));

    let records = normalize_all(&raw);
    (raw.len(), label_all(records))
}

/// Base triplets of the labeled trials, then every enrichment pass.
pub fn build_graph(
    trials: &[LabeledTrial],
    kb: &KnowledgeBase,
    options: EnrichOptions,
) -> Result<TripletTable> {
    let records: Vec<TrialRecord> = trials.iter().map(|t| t.record.clone()).collect();
    let base = generate_triplets(&records);
    log::info!("Generated {} base triplets", fmt_num(base.len()));
    enrich_all(&base, &records, kb, options)
}

/// Persist the labeled-trials table.
pub fn write_trials(trials: &[LabeledTrial], output: &OutputOptions) -> Result<WrittenTable> {
    let mut sink = output.sink(TRIALS_TABLE, labeled_trials())?;
    let mut acc = TrialAccumulator::new();
    write_rows(&mut acc, trials.iter().cloned(), &mut sink).context("Failed to write trials")?;
    let written = sink.finalize().context("Failed to finalize trials table")?;
    log::info!("Wrote {} trials to {}", fmt_num(written.rows), written.path.display());
    Ok(written)
}

/// Persist the triplet table.
pub fn write_triplets(table: &TripletTable, output: &OutputOptions) -> Result<WrittenTable> {
    let mut sink = output.sink(TRIPLETS_TABLE, triplets())?;
    let mut acc = TripletAccumulator::new();
    write_rows(&mut acc, table.iter().cloned(), &mut sink).context("Failed to write triplets")?;
    let written = sink.finalize().context("Failed to finalize triplet table")?;
    log::info!("Wrote {} triplets to {}", fmt_num(written.rows), written.path.display());
    Ok(written)
}

/// Manifest skeleton carrying the enrichment settings and graph counts.
pub fn graph_manifest(
    output: &OutputOptions,
    options: EnrichOptions,
    trials: usize,
    table: &TripletTable,
) -> RunManifest {
    let mut manifest = RunManifest::new();
    manifest.setting("format", output.format);
    manifest.setting("gene_scope", options.gene_scope);
    manifest.setting("gene_mentions", options.gene_mentions);
    manifest.count("labeled", trials);
    manifest.count("triplets", table.len());
    for (relation, n) in table.relation_counts() {
        manifest.count(&format!("relation.{relation}"), n);
    }
    manifest
}

/// Hash the artifacts into `manifest` and write it next to them.
pub fn finish_manifest(mut manifest: RunManifest, dir: &Path, files: &[&Path]) -> Result<PathBuf> {
    for file in files {
        manifest.record_file(file)?;
    }
    manifest.write_to(dir)
}

/// Run the whole pipeline against `source`.
///
/// A failed page only shortens the trial list. Enrichment always starts from
/// the freshly generated base table.
pub fn run<S: PageSource + ?Sized>(
    source: &mut S,
    config: &PipelineConfig,
    kb: &KnowledgeBase,
    progress: &ProgressContext,
) -> Result<Summary> {
    let start = Instant::now();
    config.output.prepare()?;

    let (fetched, trials) = collect_trials(source, config.max_trials, progress);
    if trials.is_empty() {
        log::warn!("No labeled trials; writing empty artifacts");
    }

    let pb = progress.stage_line("graph");
    let table = build_graph(&trials, kb, config.enrich)?;
    pb.finish_with_message(format!("{} triplets", fmt_num(table.len())));

    let pb = progress.stage_line("write");
    let trials_out = write_trials(&trials, &config.output)?;
    let triplets_out = write_triplets(&table, &config.output)?;

    let mut manifest = graph_manifest(&config.output, config.enrich, trials.len(), &table);
    manifest.setting("search_term", &config.search_term);
    manifest.setting("max_trials", config.max_trials);
    manifest.count("fetched", fetched);
    manifest.count("dropped", fetched - trials.len());
    let manifest_path = finish_manifest(
        manifest,
        &config.output.dir,
        &[trials_out.path.as_path(), triplets_out.path.as_path()],
    )?;
    pb.finish_with_message(config.output.dir.display().to_string());

    let summary = Summary {
        fetched,
        labeled: trials.len(),
        triplets: table.len(),
        relation_counts: table
            .relation_counts()
            .into_iter()
            .map(|(r, n)| (r.to_string(), n))
            .collect(),
        trials_path: trials_out.path,
        triplets_path: triplets_out.path,
        manifest_path,
        elapsed: start.elapsed(),
    };

    log::info!("=== Pipeline Summary ===");
    log::info!(
        "Trials: {} fetched, {} labeled ({} dropped)",
        fmt_num(summary.fetched),
        fmt_num(summary.labeled),
        fmt_num(summary.dropped())
    );
    log::info!("Triplets: {}", fmt_num(summary.triplets));
    log::info!("Time: {:.1}s", summary.elapsed.as_secs_f64());

    Ok(summary)
}
