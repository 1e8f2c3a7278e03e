//! Ingestion of raw word-list sources.
//!
//! A source is a sequence of lines. Each content line yields at most one
//! token, which is normalized, validated and length-filtered before a
//! [`Word`](crate::lexicon::Word) is created for it. Occurrences of the same
//! normalized form within one source are folded into one word.
//!
//! Parsing can run sequentially ([`ingest_file`]) or over line chunks in
//! parallel ([`parallel_ingest_file`]); both produce the same words and
//! counters. [`ingest_languages`] fetches and ingests several languages on a
//! bounded pool.

pub mod config;
pub mod fetch;
pub mod languages;
pub mod parallel_parse;
pub mod parser;

use std::path::PathBuf;

use crate::lexicon::Word;

pub use config::{CURSEWORD_CATEGORY, IngestConfig, ParseConfig, STANDARD_CATEGORY, SourceFormat};
pub use fetch::{CacheDirFetcher, SourceFetcher};
pub use languages::{IngestSummary, LanguageIngestOptions, LanguageResult, ingest_languages};
pub use parallel_parse::{parallel_ingest_file, parallel_ingest_str};
pub use parser::{ingest_file, ingest_str};

/// Words and counters produced from one source.
#[derive(Debug, Clone)]
pub struct IngestResult {
    /// One entry per distinct normalized form, sorted by it.
    pub words: Vec<Word>,
    pub source_path: PathBuf,
    pub dict_name: String,
    pub language: String,
    pub category: String,
    /// Non-empty content lines.
    pub total_raw: usize,
    /// Distinct normalized forms kept.
    pub total_valid: usize,
    /// Kept occurrences whose normalized form had already been seen.
    pub total_duplicates: usize,
}
