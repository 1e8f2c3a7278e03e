//! The canonical word entity.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{PolyglexError, Result};
use crate::lexicon::source::WordSource;
use crate::normalize::is_canonical;

/// Label of the length bucket a word belongs to, e.g. `"5-c"`.
pub fn word_type_label(length: usize) -> String {
    format!("{length}-c")
}

/// A normalized word together with all the evidence for it.
///
/// `sources` is append-only and never de-duplicated. `categories` and
/// `languages` are always the union of the corresponding field over
/// `sources`; `tags` only grows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredWord")]
pub struct Word {
    pub normalized: String,
    pub length: usize,
    #[serde(rename = "type")]
    pub word_type: String,
    pub sources: Vec<WordSource>,
    #[serde(default)]
    pub categories: BTreeSet<String>,
    #[serde(default)]
    pub languages: BTreeSet<String>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Phonetic annotation slot, filled by an outer enrichment step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipa: Option<String>,
}

impl Word {
    /// Create a word with no sources yet.
    ///
    /// Fails if `normalized` is not a canonical form.
    pub fn new(normalized: impl Into<String>) -> Result<Self> {
        let normalized = normalized.into();
        if !is_canonical(&normalized) {
            return Err(PolyglexError::ingest(format!(
                "not a canonical form: {normalized:?}"
            )));
        }

        let length = normalized.chars().count();
        Ok(Self {
            word_type: word_type_label(length),
            normalized,
            length,
            sources: Vec::new(),
            categories: BTreeSet::new(),
            languages: BTreeSet::new(),
            tags: BTreeSet::new(),
            ipa: None,
        })
    }

    /// Create a word from its first occurrence.
    pub fn with_source(normalized: impl Into<String>, source: WordSource) -> Result<Self> {
        let mut word = Self::new(normalized)?;
        word.add_source(source);
        Ok(word)
    }

    /// Append a source and fold its category and language into the derived sets.
    pub fn add_source(&mut self, source: WordSource) {
        self.categories.insert(source.category.clone());
        self.languages.insert(source.language.clone());
        self.sources.push(source);
    }

    /// Add a free-form tag.
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        self.tags.insert(tag.into());
    }

    /// Fold another occurrence of the same normalized form into this one.
    ///
    /// All of `other`'s sources are appended (even exact repeats) and its tags
    /// are unioned in. The derived sets converge regardless of merge order.
    pub fn merge(&mut self, other: Word) {
        debug_assert_eq!(self.normalized, other.normalized);
        for source in other.sources {
            self.add_source(source);
        }
        self.tags.extend(other.tags);
        if self.ipa.is_none() {
            self.ipa = other.ipa;
        }
    }

    /// Names of the dictionaries this word was seen in, one per source.
    pub fn source_dicts(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(|s| s.dict_name.as_str())
    }

    /// First letter of the normalized form.
    pub fn first_letter(&self) -> char {
        // Canonical forms are non-empty by construction.
        self.normalized.chars().next().unwrap_or('_')
    }
}

/// A word as read from disk, before its form is checked.
#[derive(Deserialize)]
struct StoredWord {
    normalized: String,
    length: usize,
    #[serde(rename = "type")]
    word_type: String,
    sources: Vec<WordSource>,
    #[serde(default)]
    categories: BTreeSet<String>,
    #[serde(default)]
    languages: BTreeSet<String>,
    #[serde(default)]
    tags: BTreeSet<String>,
    #[serde(default)]
    ipa: Option<String>,
}

impl TryFrom<StoredWord> for Word {
    type Error = PolyglexError;

    fn try_from(stored: StoredWord) -> Result<Self> {
        let mut word = Word::new(stored.normalized)?;
        if stored.length != word.length || stored.word_type != word.word_type {
            return Err(PolyglexError::ingest(format!(
                "length {} / type {:?} do not match {:?}",
                stored.length, stored.word_type, word.normalized
            )));
        }
        word.sources = stored.sources;
        word.categories = stored.categories;
        word.languages = stored.languages;
        word.tags = stored.tags;
        word.ipa = stored.ipa;
        Ok(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(language: &str, category: &str, line: usize) -> WordSource {
        WordSource::new(
            format!("hunspell_{language}"),
            format!("/tmp/{language}.dic"),
            language,
            "care",
            category,
        )
        .with_line_number(line)
    }

    #[test]
    fn test_new_rejects_non_canonical() {
        assert!(Word::new("care").is_ok());
        assert!(Word::new("Care").is_err());
        assert!(Word::new("").is_err());
        assert!(Word::new("c4re").is_err());
    }

    #[test]
    fn test_derived_fields() {
        let word = Word::with_source("care", source("en", "standard", 7)).unwrap();
        assert_eq!(word.length, 4);
        assert_eq!(word.word_type, "4-c");
        assert_eq!(word.sources.len(), 1);
        assert_eq!(word.sources[0].line_number, Some(7));
        assert!(word.languages.contains("en"));
        assert!(word.categories.contains("standard"));
    }

    #[test]
    fn test_merge_across_languages() {
        let mut en = Word::with_source("care", source("en", "standard", 1)).unwrap();
        let tr = Word::with_source("care", source("tr", "standard", 2)).unwrap();

        en.merge(tr);

        assert_eq!(en.sources.len(), 2);
        let languages: Vec<&str> = en.languages.iter().map(String::as_str).collect();
        assert_eq!(languages, vec!["en", "tr"]);
    }

    #[test]
    fn test_merge_idempotent_on_sets_additive_on_sources() {
        let mut incoming = Word::with_source("care", source("tr", "curseword", 3)).unwrap();
        incoming.add_tag("curseword");

        let mut once = Word::with_source("care", source("en", "standard", 1)).unwrap();
        once.merge(incoming.clone());

        let mut twice = Word::with_source("care", source("en", "standard", 1)).unwrap();
        twice.merge(incoming.clone());
        twice.merge(incoming.clone());

        assert_eq!(once.categories, twice.categories);
        assert_eq!(once.languages, twice.languages);
        assert_eq!(once.tags, twice.tags);
        assert_eq!(once.sources.len(), 2);
        assert_eq!(twice.sources.len(), 3);
    }

    #[test]
    fn test_serialized_shape() {
        let mut word = Word::with_source("care", source("en", "standard", 1)).unwrap();
        word.add_tag("common");
        let value = serde_json::to_value(&word).unwrap();

        assert_eq!(value["normalized"], "care");
        assert_eq!(value["type"], "4-c");
        assert_eq!(value["languages"], serde_json::json!(["en"]));
        assert_eq!(value["tags"], serde_json::json!(["common"]));
        assert_eq!(value["sources"][0]["line_number"], 1);
        assert!(value.get("ipa").is_none());
    }

    #[test]
    fn test_deserialize_checks_form() {
        let word = Word::with_source("care", source("en", "standard", 1)).unwrap();
        let mut value = serde_json::to_value(&word).unwrap();
        let back: Word = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(back, word);

        value["normalized"] = serde_json::json!("ca re");
        assert!(serde_json::from_value::<Word>(value.clone()).is_err());

        value["normalized"] = serde_json::json!("cares");
        assert!(serde_json::from_value::<Word>(value).is_err());
    }
}
