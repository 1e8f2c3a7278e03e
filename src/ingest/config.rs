//! Configuration for source ingestion.

use serde::{Deserialize, Serialize};

/// Category assigned to ordinary dictionary words.
pub const STANDARD_CATEGORY: &str = "standard";

/// Category and tag assigned to words from curse-word lists.
pub const CURSEWORD_CATEGORY: &str = "curseword";

/// Line format of a raw source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    /// Hunspell `.dic`: optional count header, `word/AFFIXES` lines.
    Hunspell,
    /// One word per line, `#` comments.
    PlainList,
}

impl SourceFormat {
    /// Prefix of the dictionary name recorded in provenance.
    pub fn dict_prefix(&self) -> &'static str {
        match self {
            SourceFormat::Hunspell => "hunspell",
            SourceFormat::PlainList => "cursewords",
        }
    }

    /// Dictionary name for a language, e.g. `hunspell_en`.
    pub fn dict_name(&self, language: &str) -> String {
        format!("{}_{language}", self.dict_prefix())
    }

    pub(crate) fn has_count_header(&self) -> bool {
        matches!(self, SourceFormat::Hunspell)
    }

    pub(crate) fn strips_affixes(&self) -> bool {
        matches!(self, SourceFormat::Hunspell)
    }

    pub(crate) fn has_comments(&self) -> bool {
        matches!(self, SourceFormat::PlainList)
    }
}

/// How one source is parsed and which words it keeps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Language code recorded on every source.
    pub language: String,

    /// Category recorded on every source.
    pub category: String,

    /// Minimum normalized length (inclusive).
    pub min_length: usize,

    /// Maximum normalized length (inclusive).
    pub max_length: usize,

    /// Line format of the source.
    pub format: SourceFormat,

    /// Tag attached to every word produced, if any.
    pub tag: Option<String>,
}

impl IngestConfig {
    /// Hunspell dictionary defaults for `language`.
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            category: STANDARD_CATEGORY.to_string(),
            min_length: 3,
            max_length: 10,
            format: SourceFormat::Hunspell,
            tag: None,
        }
    }

    /// Curse-word list defaults for `language`.
    pub fn cursewords(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            category: CURSEWORD_CATEGORY.to_string(),
            min_length: 3,
            max_length: 15,
            format: SourceFormat::PlainList,
            tag: Some(CURSEWORD_CATEGORY.to_string()),
        }
    }

    pub fn with_lengths(mut self, min_length: usize, max_length: usize) -> Self {
        self.min_length = min_length;
        self.max_length = max_length;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Dictionary name recorded in provenance.
    pub fn dict_name(&self) -> String {
        self.format.dict_name(&self.language)
    }
}

/// Options for chunked parallel parsing of a single source.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ParseConfig {
    /// Number of parsing workers. `<= 1` means sequential.
    pub workers: usize,

    /// Lines per chunk. `0` derives it from the line count and worker count.
    pub chunk_size: usize,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            chunk_size: 1000,
        }
    }
}

impl ParseConfig {
    pub fn new(workers: usize, chunk_size: usize) -> Self {
        Self {
            workers,
            chunk_size,
        }
    }

    /// Chunk size to use for `line_count` content lines.
    pub(crate) fn effective_chunk_size(&self, line_count: usize) -> usize {
        if self.chunk_size > 0 {
            self.chunk_size
        } else {
            (line_count / self.workers.max(1)).max(100)
        }
    }
}
