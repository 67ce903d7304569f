//! `trialgraph query` - browse a triplet table with inferred node kinds

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};
use trialgraph_core::fmt_num;
use trialgraph_kg::{NodeKind, TripletFilter, read_triplets, summarize};

use super::print_summary;

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Triplet table (.csv or .parquet)
    pub triplets: PathBuf,

    /// Keep only these relations (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub relation: Vec<String>,

    /// Case-insensitive substring of head or tail
    #[arg(short, long)]
    pub search: Option<String>,

    /// Maximum rows to print
    #[arg(short = 'l', long, default_value_t = 200)]
    pub limit: usize,

    /// Print relation and node-kind counts instead of rows
    #[arg(long)]
    pub summary: bool,
}

pub fn run(args: QueryArgs) -> Result<()> {
    let table = read_triplets(&args.triplets)?;
    let filter = TripletFilter {
        relations: args.relation,
        search: args.search,
    };
    let matched = filter.apply(&table);

    if args.summary {
        let summary = summarize(&matched);
        let mut rows = vec![
            ("Triplets", fmt_num(summary.triplets)),
            ("Nodes", fmt_num(summary.node_count())),
        ];
        rows.extend(
            summary
                .relations
                .iter()
                .map(|(relation, n)| (relation.as_str(), fmt_num(*n))),
        );
        rows.extend(
            summary
                .nodes
                .iter()
                .map(|(kind, n)| (kind.label(), fmt_num(*n))),
        );
        print_summary("Graph", &rows);
        return Ok(());
    }

    let mut out = Table::new();
    out.load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(
            ["Head", "Kind", "Relation", "Tail", "Kind"]
                .into_iter()
                .map(|h| Cell::new(h).fg(Color::Cyan)),
        );
    for t in matched.iter().take(args.limit) {
        out.add_row(vec![
            Cell::new(&t.head),
            Cell::new(NodeKind::infer(&t.head)),
            Cell::new(&t.relation),
            Cell::new(&t.tail),
            Cell::new(NodeKind::infer(&t.tail)),
        ]);
    }
    println!("{out}");
    if matched.len() > args.limit {
        log::info!(
            "Showing {} of {} matching triplets",
            fmt_num(args.limit),
            fmt_num(matched.len())
        );
    }
    Ok(())
}
