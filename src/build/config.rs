//! Build stage configuration.

use serde::{Deserialize, Serialize};

use crate::error::{PolyglexError, Result};
use crate::merge::WordFilter;

/// Configuration for parallel shard writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParallelBuildConfig {
    /// Number of writer threads. Values of 0 or 1 write on the calling thread.
    pub workers: usize,
}

impl Default for ParallelBuildConfig {
    fn default() -> Self {
        ParallelBuildConfig {
            workers: num_cpus::get().min(8),
        }
    }
}

impl ParallelBuildConfig {
    pub fn new(workers: usize) -> Self {
        ParallelBuildConfig { workers }
    }
}

/// Configuration of one synthesis output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// Name of the synthesis; also its directory under `synthesis/`.
    pub name: String,

    /// Words must pass this filter to be included.
    pub filter: WordFilter,

    /// Write one shard per (length, first letter) instead of one per length.
    pub split_by_letter: bool,
}

impl SynthesisConfig {
    pub fn new(name: impl Into<String>) -> Self {
        SynthesisConfig {
            name: name.into(),
            filter: WordFilter::default(),
            split_by_letter: true,
        }
    }

    pub fn with_filter(mut self, filter: WordFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_split_by_letter(mut self, split_by_letter: bool) -> Self {
        self.split_by_letter = split_by_letter;
        self
    }

    /// The name must be usable as a single directory component.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty()
            || self.name == "."
            || self.name == ".."
            || self.name.contains(['/', '\\'])
        {
            return Err(PolyglexError::invalid_config(format!(
                "invalid synthesis name: {:?}",
                self.name
            )));
        }
        if self.filter.min_length > self.filter.max_length {
            return Err(PolyglexError::invalid_config(format!(
                "synthesis min_length {} exceeds max_length {}",
                self.filter.min_length, self.filter.max_length
            )));
        }
        Ok(())
    }
}
