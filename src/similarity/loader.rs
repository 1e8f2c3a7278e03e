//! Loading vocabularies from persisted shards.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use ahash::AHashSet;
use serde::Deserialize;
use walkdir::WalkDir;

use crate::build::SYNTHESIS_DIR;
use crate::error::{PolyglexError, Result};

/// Which shards to read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Only read `<language>/...` shards (synthesis shards are always read).
    pub language: Option<String>,

    /// Only read shards of this length bucket, e.g. `"5-c"`: either
    /// `5-c.json` or any shard inside a `5-c/` directory.
    pub word_type: Option<String>,
}

impl LoadOptions {
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_word_type(mut self, word_type: impl Into<String>) -> Self {
        self.word_type = Some(word_type.into());
        self
    }
}

#[derive(Debug, Deserialize)]
struct WordRecord {
    #[serde(default)]
    normalized: String,
}

/// Accepted layouts of a shard's `words` field.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WordsShape {
    /// `{"word": {"normalized": "word", ...}}`, written by this crate.
    Map(BTreeMap<String, WordRecord>),
    /// `[{"normalized": "word", ...}]`
    Records(Vec<WordRecord>),
    /// `["word", ...]`
    Plain(Vec<String>),
}

impl WordsShape {
    fn into_words(self) -> Vec<String> {
        match self {
            WordsShape::Map(map) => map
                .into_iter()
                .map(|(key, record)| {
                    if record.normalized.is_empty() {
                        key
                    } else {
                        record.normalized
                    }
                })
                .collect(),
            WordsShape::Records(records) => records
                .into_iter()
                .map(|record| record.normalized)
                .filter(|word| !word.is_empty())
                .collect(),
            WordsShape::Plain(words) => words.into_iter().filter(|w| !w.is_empty()).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ShardWords {
    words: WordsShape,
}

fn read_shard_words(path: &Path) -> Result<Vec<String>> {
    let data = fs::read(path)?;
    let shard: ShardWords = serde_json::from_slice(&data)?;
    Ok(shard.words.into_words())
}

fn is_word_type(path: &Path, word_type: &str) -> bool {
    let stem_matches = path.file_stem().is_some_and(|stem| stem == word_type);
    let dir_matches = path
        .parent()
        .and_then(Path::file_name)
        .is_some_and(|dir| dir == word_type);
    stem_matches || dir_matches
}

/// Collect the distinct words of every matching shard under `dir`.
///
/// Files whose name starts with `_` are metadata and are skipped, as are
/// files that cannot be read or decoded. Words are returned in first-seen
/// order, walking the tree in file-name order.
pub fn load_vocabulary<P: AsRef<Path>>(dir: P, options: &LoadOptions) -> Result<Vec<String>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(PolyglexError::index(format!(
            "Dictionary directory not found: {}",
            dir.display()
        )));
    }

    let mut seen = AHashSet::new();
    let mut words = Vec::new();
    let mut files = 0;

    let walker = WalkDir::new(dir).sort_by_file_name().into_iter();
    for entry in walker.filter_map(|e| e.ok()) {
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "json") {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if name.starts_with('_') {
            continue;
        }
        if let Some(word_type) = &options.word_type
            && !is_word_type(path, word_type)
        {
            continue;
        }
        if let Some(language) = &options.language {
            let relative = path.strip_prefix(dir).unwrap_or(path);
            if !relative.starts_with(language) && !relative.starts_with(SYNTHESIS_DIR) {
                continue;
            }
        }

        match read_shard_words(path) {
            Ok(shard_words) => {
                files += 1;
                for word in shard_words {
                    if seen.insert(word.clone()) {
                        words.push(word);
                    }
                }
            }
            Err(e) => log::warn!("Skipping {}: {e}", path.display()),
        }
    }

    log::debug!(
        "Loaded {} distinct words from {files} shards under {}",
        words.len(),
        dir.display()
    );
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(
            root,
            "en/5-c.json",
            r#"{"name":"en_5-c","words":{"hello":{"normalized":"hello"},"world":{"normalized":"world"}}}"#,
        );
        write(
            root,
            "de/5-c.json",
            r#"{"words":[{"normalized":"hallo"},{"normalized":"hello"}]}"#,
        );
        write(root, "de/4-c.json", r#"{"words":["hund"]}"#);
        write(
            root,
            "synthesis/std/5-c/h.json",
            r#"{"words":{"hello":{"normalized":"hello"}}}"#,
        );
        write(root, "synthesis/std/_config.json", r#"{"config":{}}"#);
        write(root, "en/broken.json", "{not json");
        write(root, "en/notes.txt", "ignored");
        dir
    }

    #[test]
    fn test_load_all_shapes() {
        let dir = fixture();
        let mut words = load_vocabulary(dir.path(), &LoadOptions::default()).unwrap();
        words.sort();
        assert_eq!(words, vec!["hallo", "hello", "hund", "world"]);
    }

    #[test]
    fn test_filter_by_word_type() {
        let dir = fixture();
        let options = LoadOptions::default().with_word_type("4-c");
        assert_eq!(load_vocabulary(dir.path(), &options).unwrap(), vec!["hund"]);
    }

    #[test]
    fn test_word_type_matches_split_synthesis() {
        let dir = fixture();
        write(
            dir.path(),
            "en/15-c.json",
            r#"{"words":{"abcdefghijklmno":{"normalized":"abcdefghijklmno"}}}"#,
        );
        let options = LoadOptions::default().with_word_type("5-c");
        let mut words = load_vocabulary(dir.path(), &options).unwrap();
        words.sort();
        assert_eq!(words, vec!["hallo", "hello", "world"]);
    }

    #[test]
    fn test_filter_by_language_keeps_synthesis() {
        let dir = fixture();
        let options = LoadOptions::default().with_language("en");
        let mut words = load_vocabulary(dir.path(), &options).unwrap();
        words.sort();
        assert_eq!(words, vec!["hello", "world"]);

        let options = LoadOptions::default().with_language("fr");
        assert_eq!(load_vocabulary(dir.path(), &options).unwrap(), vec!["hello"]);
    }

    #[test]
    fn test_missing_directory() {
        let result = load_vocabulary("/definitely/not/a/dir", &LoadOptions::default());
        assert!(result.is_err());
    }
}
