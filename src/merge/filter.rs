//! Predicate applied to pooled words before building a synthesis.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::lexicon::Word;

/// Selects words by length, language and category.
///
/// Empty include sets accept everything. A word with any language or
/// category in the corresponding exclude set is rejected even if it also
/// matches an include set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordFilter {
    pub min_length: usize,
    pub max_length: usize,
    #[serde(default)]
    pub include_languages: BTreeSet<String>,
    #[serde(default)]
    pub exclude_languages: BTreeSet<String>,
    #[serde(default)]
    pub include_categories: BTreeSet<String>,
    #[serde(default)]
    pub exclude_categories: BTreeSet<String>,
}

impl Default for WordFilter {
    fn default() -> Self {
        Self {
            min_length: 3,
            max_length: 10,
            include_languages: BTreeSet::new(),
            exclude_languages: BTreeSet::new(),
            include_categories: BTreeSet::new(),
            exclude_categories: BTreeSet::new(),
        }
    }
}

fn to_set<I, S>(items: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

impl WordFilter {
    pub fn new(min_length: usize, max_length: usize) -> Self {
        Self {
            min_length,
            max_length,
            ..Default::default()
        }
    }

    pub fn with_include_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_languages = to_set(languages);
        self
    }

    pub fn with_exclude_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_languages = to_set(languages);
        self
    }

    pub fn with_include_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_categories = to_set(categories);
        self
    }

    pub fn with_exclude_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_categories = to_set(categories);
        self
    }

    /// Whether `word` passes every criterion.
    pub fn matches(&self, word: &Word) -> bool {
        if word.length < self.min_length || word.length > self.max_length {
            return false;
        }

        if !self.exclude_languages.is_disjoint(&word.languages)
            || !self.exclude_categories.is_disjoint(&word.categories)
        {
            return false;
        }

        (self.include_languages.is_empty() || !self.include_languages.is_disjoint(&word.languages))
            && (self.include_categories.is_empty()
                || !self.include_categories.is_disjoint(&word.categories))
    }
}
