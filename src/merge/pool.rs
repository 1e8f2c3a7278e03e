//! Per-language and cross-language word pools.

use std::collections::BTreeMap;
use std::collections::hash_map::Entry;

use ahash::AHashMap;

use crate::lexicon::Word;

/// Insert `word`, or merge it into the entity already stored under its key.
///
/// Returns `true` if an existing entity absorbed the word.
fn merge_into(bucket: &mut AHashMap<String, Word>, word: Word) -> bool {
    match bucket.entry(word.normalized.clone()) {
        Entry::Occupied(mut entry) => {
            entry.get_mut().merge(word);
            true
        }
        Entry::Vacant(entry) => {
            entry.insert(word);
            false
        }
    }
}

/// Words bucketed by language, then by length.
///
/// Words whose length lies outside `[min_length, max_length]` are ignored.
#[derive(Debug, Clone)]
pub struct LanguagePool {
    min_length: usize,
    max_length: usize,
    buckets: BTreeMap<String, BTreeMap<usize, AHashMap<String, Word>>>,
}

impl LanguagePool {
    pub fn new(min_length: usize, max_length: usize) -> Self {
        Self {
            min_length,
            max_length,
            buckets: BTreeMap::new(),
        }
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Add words under `language`. Returns how many were merged into existing entities.
    pub fn add_words<I>(&mut self, words: I, language: &str) -> usize
    where
        I: IntoIterator<Item = Word>,
    {
        let lengths = self.buckets.entry(language.to_string()).or_default();
        let mut merged = 0;

        for word in words {
            if word.length < self.min_length || word.length > self.max_length {
                continue;
            }
            let bucket = lengths.entry(word.length).or_default();
            if merge_into(bucket, word) {
                merged += 1;
            }
        }

        merged
    }

    pub fn get(&self, language: &str, normalized: &str) -> Option<&Word> {
        let length = normalized.chars().count();
        self.buckets.get(language)?.get(&length)?.get(normalized)
    }

    /// Languages present, in sorted order.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    /// Non-empty `(language, length, words)` buckets in sorted order.
    pub fn buckets(&self) -> impl Iterator<Item = (&str, usize, &AHashMap<String, Word>)> {
        self.buckets.iter().flat_map(|(language, lengths)| {
            lengths
                .iter()
                .filter(|(_, words)| !words.is_empty())
                .map(move |(length, words)| (language.as_str(), *length, words))
        })
    }

    /// Total number of entities across all buckets.
    pub fn len(&self) -> usize {
        self.buckets().map(|(_, _, words)| words.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A flat cross-language pool keyed only by normalized form.
#[derive(Debug, Clone, Default)]
pub struct SynthesisPool {
    words: AHashMap<String, Word>,
}

impl SynthesisPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add words. Returns how many were merged into existing entities.
    pub fn add_words<I>(&mut self, words: I) -> usize
    where
        I: IntoIterator<Item = Word>,
    {
        let mut merged = 0;
        for word in words {
            if merge_into(&mut self.words, word) {
                merged += 1;
            }
        }
        merged
    }

    pub fn get(&self, normalized: &str) -> Option<&Word> {
        self.words.get(normalized)
    }

    /// All entities, in no particular order.
    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.words.values()
    }

    /// Normalized forms, in no particular order.
    pub fn normalized_forms(&self) -> impl Iterator<Item = &str> {
        self.words.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
