//! Run-wide pipeline configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::build::{ParallelBuildConfig, SynthesisConfig};
use crate::error::{PolyglexError, Result};
use crate::ingest::STANDARD_CATEGORY;
use crate::merge::WordFilter;

/// Everything one pipeline run needs.
///
/// Built once by the entry point and handed to [`Pipeline`](crate::pipeline::Pipeline);
/// stage configurations are derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Language codes to ingest.
    pub languages: Vec<String>,

    /// Minimum word length (inclusive).
    pub min_length: usize,

    /// Maximum word length (inclusive).
    pub max_length: usize,

    /// Root of the generated shards.
    pub output_dir: PathBuf,

    /// Directory the source fetcher resolves raw sources from.
    pub cache_dir: PathBuf,

    /// Worker count for every parallel stage.
    pub workers: usize,

    /// Ingest several languages at once, or chunk a single language's source.
    pub parallel_ingest: bool,

    /// Write shards across `workers` threads.
    pub parallel_build: bool,

    /// Lines per parse chunk.
    pub chunk_size: usize,

    /// Also ingest curse-word lists.
    pub include_cursewords: bool,

    /// Split synthesis shards by first letter.
    pub split_by_letter: bool,

    /// Synthesis name; derived from the languages when unset.
    pub synthesis_name: Option<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            languages: vec!["en".to_string(), "tr".to_string()],
            min_length: 3,
            max_length: 10,
            output_dir: PathBuf::from("output/dicts"),
            cache_dir: PathBuf::from("sources"),
            workers: num_cpus::get().min(8),
            parallel_ingest: true,
            parallel_build: true,
            chunk_size: 1000,
            include_cursewords: false,
            split_by_letter: true,
            synthesis_name: None,
        }
    }
}

impl PipelineConfig {
    pub fn new<I, S>(languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PipelineConfig {
            languages: languages.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_lengths(mut self, min_length: usize, max_length: usize) -> Self {
        self.min_length = min_length;
        self.max_length = max_length;
        self
    }

    pub fn with_output_dir<P: AsRef<Path>>(mut self, output_dir: P) -> Self {
        self.output_dir = output_dir.as_ref().to_path_buf();
        self
    }

    pub fn with_cache_dir<P: AsRef<Path>>(mut self, cache_dir: P) -> Self {
        self.cache_dir = cache_dir.as_ref().to_path_buf();
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_parallel(mut self, parallel_ingest: bool, parallel_build: bool) -> Self {
        self.parallel_ingest = parallel_ingest;
        self.parallel_build = parallel_build;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_cursewords(mut self, include_cursewords: bool) -> Self {
        self.include_cursewords = include_cursewords;
        self
    }

    pub fn with_split_by_letter(mut self, split_by_letter: bool) -> Self {
        self.split_by_letter = split_by_letter;
        self
    }

    pub fn with_synthesis_name(mut self, name: impl Into<String>) -> Self {
        self.synthesis_name = Some(name.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.languages.is_empty() {
            return Err(PolyglexError::invalid_config("no languages configured"));
        }
        if self.min_length == 0 {
            return Err(PolyglexError::invalid_config("min_length must be at least 1"));
        }
        if self.min_length > self.max_length {
            return Err(PolyglexError::invalid_config(format!(
                "min_length {} exceeds max_length {}",
                self.min_length, self.max_length
            )));
        }
        if self.chunk_size == 0 {
            return Err(PolyglexError::invalid_config("chunk_size must be at least 1"));
        }
        for language in &self.languages {
            if !is_path_component(language) {
                return Err(PolyglexError::invalid_config(format!(
                    "invalid language code: {language:?}"
                )));
            }
        }
        self.synthesis_config().validate()
    }

    /// Worker count, never below one.
    pub fn effective_workers(&self) -> usize {
        self.workers.max(1)
    }

    /// The configured synthesis name, or the sorted languages joined by `_`
    /// with a `_standard` suffix.
    pub fn effective_synthesis_name(&self) -> String {
        match &self.synthesis_name {
            Some(name) => name.clone(),
            None => {
                let mut languages = self.languages.clone();
                languages.sort();
                format!("{}_{STANDARD_CATEGORY}", languages.join("_"))
            }
        }
    }

    /// Shard writing configuration for the build stages.
    pub fn build_config(&self) -> ParallelBuildConfig {
        let workers = if self.parallel_build {
            self.effective_workers()
        } else {
            1
        };
        ParallelBuildConfig::new(workers)
    }

    /// The standard synthesis over the configured languages.
    pub fn synthesis_config(&self) -> SynthesisConfig {
        let filter = WordFilter::new(self.min_length, self.max_length)
            .with_include_languages(self.languages.iter().cloned())
            .with_include_categories([STANDARD_CATEGORY]);

        SynthesisConfig::new(self.effective_synthesis_name())
            .with_filter(filter)
            .with_split_by_letter(self.split_by_letter)
    }
}

/// Language codes name output directories, so each must be a single
/// path component.
fn is_path_component(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}
