//! Trialgraph KG - trial knowledge-graph triplets
//!
//! Turns labeled trials into `(head, relation, tail)` triplets, enriches them
//! from a static knowledge base and runs the end-to-end pipeline.
//!
//! # Example
//!
//! ```ignore
//! use trialgraph_kg::{KnowledgeBase, EnrichOptions, build_graph};
//!
//! let graph = build_graph(&labeled_trials, KnowledgeBase::builtin(), EnrichOptions::default())?;
//! println!("{} triplets", graph.len());
//! ```

pub mod enrich;
pub mod generate;
pub mod knowledge;
pub mod node;
pub mod pipeline;
pub mod query;
pub mod schema;
pub mod transform;
pub mod triplet;

// Re-exports
pub use enrich::{EnrichOptions, Enricher, GeneTargetScope, enrich_all};
pub use generate::{generate_triplets, trial_triplets};
pub use knowledge::{DrugTarget, KnowledgeBase, TrialType};
pub use node::NodeKind;
pub use pipeline::{
    OutputOptions, PipelineConfig, Summary, build_graph, collect_trials, run, write_trials,
    write_triplets,
};
pub use query::{GraphSummary, TripletFilter, summarize};
pub use transform::{TripletAccumulator, read_triplets};
pub use triplet::{Triplet, TripletTable, relation};
