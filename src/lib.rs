//! # Polyglex
//!
//! Multi-language word-list ingestion, merging and sharded dictionary
//! building, with BK-tree fuzzy lookup over the result.
//!
//! ## Features
//!
//! - Hunspell and plain word-list ingestion with chunked parallel parsing
//! - Folding of accented and language-specific letters to canonical ASCII
//! - Provenance-preserving merge of words across sources and languages
//! - Per-language and filtered cross-language shards, written in parallel
//! - Exact fuzzy search by Levenshtein distance

pub mod build;
pub mod cli;
pub mod error;
pub mod ingest;
pub mod lexicon;
pub mod merge;
pub mod normalize;
pub mod pipeline;
pub mod similarity;
pub mod util;

pub mod prelude {
    pub use crate::build::{DictionaryBuilder, ParallelBuildConfig, SynthesisBuilder, SynthesisConfig};
    pub use crate::error::{PolyglexError, Result};
    pub use crate::ingest::{CacheDirFetcher, IngestConfig, IngestResult, SourceFetcher};
    pub use crate::lexicon::{Shard, Word, WordSource};
    pub use crate::merge::WordFilter;
    pub use crate::normalize::{AsciiFolder, Normalizer};
    pub use crate::pipeline::{Pipeline, PipelineConfig, PipelineReport};
    pub use crate::similarity::{BkTree, SimilarityHit};
    pub use crate::util::cancel::CancellationToken;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
