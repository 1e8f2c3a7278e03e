//! Sequential line parsing.
//!
//! Every ingestion path, sequential or chunked, funnels lines through
//! [`LineProcessor::process`] so both produce the same words and counters.

use std::collections::hash_map::Entry;
use std::fs;
use std::path::{Path, PathBuf};

use ahash::AHashMap;

use crate::error::Result;
use crate::ingest::IngestResult;
use crate::ingest::config::IngestConfig;
use crate::lexicon::{Word, WordSource};
use crate::normalize::Normalizer;

/// Read a source file as text. Invalid UTF-8 is replaced rather than rejected.
pub(crate) fn read_source(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub(crate) fn absolute_path(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Index of the first content line: 1 if the source starts with a count header.
pub(crate) fn content_start(lines: &[&str], config: &IngestConfig) -> usize {
    match lines.first() {
        Some(first)
            if config.format.has_count_header()
                && first.trim().chars().all(|c| c.is_ascii_digit()) =>
        {
            1
        }
        _ => 0,
    }
}

/// Words and counters produced from a run of lines.
#[derive(Debug, Default)]
pub(crate) struct ParsedLines {
    pub words: AHashMap<String, Word>,
    pub raw: usize,
    pub duplicates: usize,
}

impl ParsedLines {
    pub(crate) fn into_result(self, config: &IngestConfig, source_path: PathBuf) -> IngestResult {
        let mut words: Vec<Word> = self.words.into_values().collect();
        words.sort_by(|a, b| a.normalized.cmp(&b.normalized));

        IngestResult {
            total_valid: words.len(),
            total_raw: self.raw,
            total_duplicates: self.duplicates,
            words,
            source_path,
            dict_name: config.dict_name(),
            language: config.language.clone(),
            category: config.category.clone(),
        }
    }
}

/// Turns raw lines of one source into validated word occurrences.
pub(crate) struct LineProcessor<'a> {
    config: &'a IngestConfig,
    normalizer: &'a dyn Normalizer,
    dict_name: String,
    source_path: &'a Path,
}

impl<'a> LineProcessor<'a> {
    pub(crate) fn new(
        config: &'a IngestConfig,
        normalizer: &'a dyn Normalizer,
        source_path: &'a Path,
    ) -> Self {
        Self {
            config,
            normalizer,
            dict_name: config.dict_name(),
            source_path,
        }
    }

    /// Process `lines`, the first of which is physical line `first_line_number` (1-based).
    pub(crate) fn process(&self, lines: &[&str], first_line_number: usize) -> ParsedLines {
        let mut parsed = ParsedLines::default();
        for (offset, line) in lines.iter().enumerate() {
            self.process_line(line, first_line_number + offset, &mut parsed);
        }
        parsed
    }

    fn process_line(&self, line: &str, line_number: usize, parsed: &mut ParsedLines) {
        let line = line.trim();
        if line.is_empty() || (self.config.format.has_comments() && line.starts_with('#')) {
            return;
        }
        parsed.raw += 1;

        let token = if self.config.format.strips_affixes() {
            line.split('/').next().unwrap_or_default().trim()
        } else {
            line
        };
        if token.is_empty() {
            return;
        }

        let Some(normalized) = self.normalizer.normalize(token) else {
            return;
        };
        let length = normalized.chars().count();
        if length < self.config.min_length || length > self.config.max_length {
            return;
        }

        let source = WordSource::new(
            self.dict_name.as_str(),
            self.source_path,
            self.config.language.as_str(),
            token,
            self.config.category.as_str(),
        )
        .with_line_number(line_number);

        match parsed.words.entry(normalized) {
            Entry::Occupied(mut entry) => {
                entry.get_mut().add_source(source);
                parsed.duplicates += 1;
            }
            Entry::Vacant(entry) => {
                let Ok(mut word) = Word::with_source(entry.key().clone(), source) else {
                    return;
                };
                if let Some(tag) = &self.config.tag {
                    word.add_tag(tag.clone());
                }
                entry.insert(word);
            }
        }
    }
}

/// Parse in-memory source text sequentially.
pub fn ingest_str(
    text: &str,
    source_path: &Path,
    config: &IngestConfig,
    normalizer: &dyn Normalizer,
) -> IngestResult {
    let source_path = absolute_path(source_path);
    let lines: Vec<&str> = text.lines().collect();
    let start = content_start(&lines, config);

    let processor = LineProcessor::new(config, normalizer, &source_path);
    let parsed = processor.process(&lines[start..], start + 1);
    parsed.into_result(config, source_path)
}

/// Parse a source file sequentially.
///
/// Fails only if the file cannot be read; malformed lines are skipped.
pub fn ingest_file<P: AsRef<Path>>(
    path: P,
    config: &IngestConfig,
    normalizer: &dyn Normalizer,
) -> Result<IngestResult> {
    let path = path.as_ref();
    let text = read_source(path)?;
    log::debug!("[{}] parsing {} sequentially", config.language, path.display());
    Ok(ingest_str(&text, path, config, normalizer))
}
