//! Build statistics.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use serde::Serialize;

use crate::lexicon::Word;

/// Statistics from building per-language dictionaries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    /// Words across all written buckets.
    pub total_words: usize,

    /// Word count per length.
    pub by_length: BTreeMap<usize, usize>,

    /// Word count per language.
    pub by_language: BTreeMap<String, usize>,

    /// Number of words carrying each category.
    pub by_category: BTreeMap<String, usize>,

    /// Shards successfully written.
    pub files_written: Vec<PathBuf>,
}

impl BuildStats {
    pub(crate) fn record(&mut self, language: &str, word: &Word) {
        self.total_words += 1;
        *self.by_length.entry(word.length).or_default() += 1;
        *self.by_language.entry(language.to_string()).or_default() += 1;
        for category in &word.categories {
            *self.by_category.entry(category.clone()).or_default() += 1;
        }
    }
}

/// Statistics from building one synthesis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SynthesisStats {
    pub config_name: String,
    pub total_words: usize,
    pub by_length: BTreeMap<usize, usize>,
    pub by_letter: BTreeMap<String, usize>,
    pub languages_included: BTreeSet<String>,
    pub categories_included: BTreeSet<String>,

    /// Shards successfully written, the metadata shard first.
    pub files_written: Vec<PathBuf>,
}

impl SynthesisStats {
    pub(crate) fn new(config_name: impl Into<String>) -> Self {
        SynthesisStats {
            config_name: config_name.into(),
            ..Default::default()
        }
    }

    pub(crate) fn record(&mut self, word: &Word) {
        self.total_words += 1;
        *self.by_length.entry(word.length).or_default() += 1;
        *self
            .by_letter
            .entry(word.first_letter().to_string())
            .or_default() += 1;
        self.languages_included
            .extend(word.languages.iter().cloned());
        self.categories_included
            .extend(word.categories.iter().cloned());
    }
}
