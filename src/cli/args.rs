//! Command line argument parsing for the Polyglex CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::pipeline::PipelineConfig;
use crate::similarity::LoadOptions;

/// Polyglex - multi-language word lists, merged, sharded and fuzzy-searchable
#[derive(Parser, Debug, Clone)]
#[command(name = "polyglex")]
#[command(about = "Build normalized multi-language dictionaries and search them fuzzily")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct PolyglexArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl PolyglexArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Ingest sources and build per-language and synthesis shards
    Build(BuildArgs),

    /// Find words within an edit distance of a query
    Fuzzy(FuzzyArgs),
}

/// Arguments for building dictionaries
#[derive(Parser, Debug, Clone)]
pub struct BuildArgs {
    /// Languages to ingest (comma-separated)
    #[arg(short, long, value_delimiter = ',', default_value = "en,tr")]
    pub languages: Vec<String>,

    /// Minimum word length
    #[arg(long, default_value = "3")]
    pub min_length: usize,

    /// Maximum word length
    #[arg(long, default_value = "10")]
    pub max_length: usize,

    /// Output directory for shards
    #[arg(short, long, default_value = "output/dicts")]
    pub output_dir: PathBuf,

    /// Directory holding `<lang>/<lang>.dic` sources
    #[arg(long, default_value = "sources")]
    pub cache_dir: PathBuf,

    /// Worker threads (default: number of CPUs, at most 8)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Disable parallel ingest and shard writing
    #[arg(long)]
    pub no_parallel: bool,

    /// Lines per parse chunk
    #[arg(long, default_value = "1000")]
    pub chunk_size: usize,

    /// Include curse-word lists
    #[arg(long)]
    pub cursewords: bool,

    /// Name of the synthesis (default: <langs>_standard)
    #[arg(short, long)]
    pub synthesis: Option<String>,

    /// Don't split the synthesis by first letter
    #[arg(long)]
    pub no_split: bool,
}

impl BuildArgs {
    /// Pipeline configuration described by these arguments.
    pub fn to_config(&self) -> PipelineConfig {
        let mut config = PipelineConfig::new(self.languages.iter().cloned())
            .with_lengths(self.min_length, self.max_length)
            .with_output_dir(&self.output_dir)
            .with_cache_dir(&self.cache_dir)
            .with_parallel(!self.no_parallel, !self.no_parallel)
            .with_chunk_size(self.chunk_size)
            .with_cursewords(self.cursewords)
            .with_split_by_letter(!self.no_split);

        if let Some(workers) = self.workers {
            config = config.with_workers(workers);
        }
        if let Some(name) = &self.synthesis {
            config = config.with_synthesis_name(name.as_str());
        }
        config
    }
}

/// Arguments for fuzzy search
#[derive(Parser, Debug, Clone)]
pub struct FuzzyArgs {
    /// Word to search for
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Directory containing dictionary shards
    #[arg(short, long, default_value = "output/dicts")]
    pub dict_dir: PathBuf,

    /// Maximum edit distance
    #[arg(short = 'n', long, default_value = "2")]
    pub distance: usize,

    /// Maximum results to show (0 = unlimited)
    #[arg(short, long, default_value = "10")]
    pub limit: usize,

    /// Only search shards of this language (synthesis shards are always searched)
    #[arg(short = 'L', long)]
    pub language: Option<String>,

    /// Only search shards of this word type, e.g. "5-c"
    #[arg(short = 't', long = "type")]
    pub word_type: Option<String>,
}

impl FuzzyArgs {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            language: self.language.clone(),
            word_type: self.word_type.clone(),
        }
    }
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
