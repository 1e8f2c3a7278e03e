//! Persisted dictionary shards.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::{PolyglexError, Result};
use crate::lexicon::word::Word;

/// Version stamped into every shard written by this crate.
pub const SHARD_SCHEMA_VERSION: u32 = 1;

fn current_schema_version() -> u32 {
    SHARD_SCHEMA_VERSION
}

/// Current UTC time in RFC 3339 form, second precision.
pub fn generation_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// A named, self-contained collection of words for one output bucket.
///
/// Scoped either to one `(language, length)` pair or to one
/// `(synthesis name, length[, letter])` bucket. Words are keyed by their
/// normalized form, so serialization order is stable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shard {
    #[serde(default = "current_schema_version")]
    schema_version: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default)]
    languages: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_type: Option<String>,
    pub generated_at: String,
    #[serde(default)]
    source_dicts: BTreeSet<String>,
    #[serde(default)]
    word_count: usize,
    #[serde(default)]
    words: BTreeMap<String, Word>,
}

impl Shard {
    /// Create an empty shard stamped with the current time.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema_version: SHARD_SCHEMA_VERSION,
            name: name.into(),
            language: None,
            languages: BTreeSet::new(),
            word_type: None,
            generated_at: generation_timestamp(),
            source_dicts: BTreeSet::new(),
            word_count: 0,
            words: BTreeMap::new(),
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_word_type(mut self, word_type: impl Into<String>) -> Self {
        self.word_type = Some(word_type.into());
        self
    }

    /// Add a word, merging it into an existing entry with the same key.
    pub fn add_word(&mut self, word: Word) {
        self.languages.extend(word.languages.iter().cloned());
        self.source_dicts
            .extend(word.source_dicts().map(str::to_string));

        match self.words.get_mut(&word.normalized) {
            Some(existing) => existing.merge(word),
            None => {
                self.words.insert(word.normalized.clone(), word);
            }
        }
        self.word_count = self.words.len();
    }

    pub fn schema_version(&self) -> u32 {
        self.schema_version
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, normalized: &str) -> Option<&Word> {
        self.words.get(normalized)
    }

    /// Words in normalized-key order.
    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.words.values()
    }

    pub fn languages(&self) -> &BTreeSet<String> {
        &self.languages
    }

    pub fn source_dicts(&self) -> &BTreeSet<String> {
        &self.source_dicts
    }

    /// Write the shard as pretty JSON, atomically replacing `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_json_atomic(path.as_ref(), self)
    }

    /// Read a shard written by [`Shard::save`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read(path)?;
        let shard: Shard = serde_json::from_slice(&data)?;
        if let Some(key) = shard
            .words
            .iter()
            .find_map(|(key, word)| (*key != word.normalized).then_some(key))
        {
            return Err(PolyglexError::ingest(format!(
                "shard {:?} stores a word under mismatched key {key:?}",
                shard.name
            )));
        }
        Ok(shard)
    }
}

/// Serialize `value` into a temporary file next to `path` and move it into
/// place, so readers never observe a partially written file.
pub(crate) fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut temp_file = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(temp_file.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }
    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}
