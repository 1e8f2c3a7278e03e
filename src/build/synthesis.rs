//! Cross-language synthesis shards.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::build::config::{ParallelBuildConfig, SynthesisConfig};
use crate::build::shard_writer::{ShardJob, write_parallel, write_sequential};
use crate::build::stats::SynthesisStats;
use crate::error::Result;
use crate::lexicon::shard::{generation_timestamp, write_json_atomic};
use crate::lexicon::{Shard, Word, word_type_label};
use crate::merge::SynthesisPool;
use crate::util::cancel::CancellationToken;

/// Directory under the output root that holds every synthesis.
pub const SYNTHESIS_DIR: &str = "synthesis";

/// File name of the per-synthesis metadata shard.
pub const SYNTHESIS_METADATA_FILE: &str = "_config.json";

fn sorted_or_null(set: &BTreeSet<String>) -> Option<Vec<String>> {
    (!set.is_empty()).then(|| set.iter().cloned().collect())
}

#[derive(Debug, Serialize)]
struct MetadataConfig {
    name: String,
    include_languages: Option<Vec<String>>,
    exclude_languages: Option<Vec<String>>,
    include_categories: Option<Vec<String>>,
    exclude_categories: Option<Vec<String>>,
    min_length: usize,
    max_length: usize,
    split_by_letter: bool,
}

#[derive(Debug, Serialize)]
struct MetadataStats {
    total_words: usize,
    by_length: BTreeMap<usize, usize>,
    languages: Vec<String>,
    categories: Vec<String>,
}

/// Contents of `_config.json`.
#[derive(Debug, Serialize)]
struct SynthesisMetadata {
    config: MetadataConfig,
    generated_at: String,
    stats: MetadataStats,
}

impl SynthesisMetadata {
    fn new(config: &SynthesisConfig, stats: &SynthesisStats) -> Self {
        let filter = &config.filter;
        SynthesisMetadata {
            config: MetadataConfig {
                name: config.name.clone(),
                include_languages: sorted_or_null(&filter.include_languages),
                exclude_languages: sorted_or_null(&filter.exclude_languages),
                include_categories: sorted_or_null(&filter.include_categories),
                exclude_categories: sorted_or_null(&filter.exclude_categories),
                min_length: filter.min_length,
                max_length: filter.max_length,
                split_by_letter: config.split_by_letter,
            },
            generated_at: generation_timestamp(),
            stats: MetadataStats {
                total_words: stats.total_words,
                by_length: stats.by_length.clone(),
                languages: stats.languages_included.iter().cloned().collect(),
                categories: stats.categories_included.iter().cloned().collect(),
            },
        }
    }
}

/// Filtered words grouped by length, then by first letter.
type Buckets<'a> = BTreeMap<usize, BTreeMap<char, Vec<&'a Word>>>;

/// Builds filtered cross-language shards from a [`SynthesisPool`].
///
/// Output lives under `<output_dir>/synthesis/<name>/`:
/// `_config.json`, then either `<length>-c/<letter>.json` or `<length>-c.json`.
#[derive(Debug, Clone)]
pub struct SynthesisBuilder {
    output_dir: PathBuf,
    pool: SynthesisPool,
}

impl SynthesisBuilder {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        SynthesisBuilder {
            output_dir: output_dir.as_ref().join(SYNTHESIS_DIR),
            pool: SynthesisPool::new(),
        }
    }

    pub fn add_words<I>(&mut self, words: I) -> usize
    where
        I: IntoIterator<Item = Word>,
    {
        self.pool.add_words(words)
    }

    pub fn pool(&self) -> &SynthesisPool {
        &self.pool
    }

    /// Directory holding every synthesis, i.e. `<output_dir>/synthesis`.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn synthesis_dir(&self, config: &SynthesisConfig) -> PathBuf {
        self.output_dir.join(&config.name)
    }

    fn bucket<'a>(&'a self, config: &SynthesisConfig, stats: &mut SynthesisStats) -> Buckets<'a> {
        let mut buckets = Buckets::new();
        for word in self.pool.words() {
            if !config.filter.matches(word) {
                continue;
            }
            stats.record(word);
            buckets
                .entry(word.length)
                .or_default()
                .entry(word.first_letter())
                .or_default()
                .push(word);
        }
        buckets
    }

    /// Filter and bucket the pool into jobs and accumulate statistics.
    fn plan(&self, config: &SynthesisConfig) -> (SynthesisStats, Vec<ShardJob>) {
        let mut stats = SynthesisStats::new(&config.name);
        let buckets = self.bucket(config, &mut stats);
        let dir = self.synthesis_dir(config);
        let mut jobs = Vec::new();

        for (length, letters) in buckets {
            let word_type = word_type_label(length);

            if config.split_by_letter {
                for (letter, words) in letters {
                    let mut shard = Shard::new(format!("{}_{word_type}_{letter}", config.name))
                        .with_word_type(word_type.as_str());
                    for word in words {
                        shard.add_word(word.clone());
                    }
                    let path = dir.join(&word_type).join(format!("{letter}.json"));
                    jobs.push(ShardJob::new(path, shard));
                }
            } else {
                let mut shard = Shard::new(format!("{}_{word_type}", config.name))
                    .with_word_type(word_type.as_str());
                for word in letters.into_values().flatten() {
                    shard.add_word(word.clone());
                }
                jobs.push(ShardJob::new(dir.join(format!("{word_type}.json")), shard));
            }
        }

        (stats, jobs)
    }

    /// Write the metadata shard. Always runs on the calling thread, before
    /// any bucket shard is written.
    fn write_metadata(&self, config: &SynthesisConfig, stats: &mut SynthesisStats) {
        let path = self.synthesis_dir(config).join(SYNTHESIS_METADATA_FILE);
        let metadata = SynthesisMetadata::new(config, stats);
        match write_json_atomic(&path, &metadata) {
            Ok(()) => stats.files_written.push(path),
            Err(e) => log::warn!("Failed to write {}: {e}", path.display()),
        }
    }

    /// Build a synthesis on the calling thread.
    pub fn build(&self, config: &SynthesisConfig) -> Result<SynthesisStats> {
        config.validate()?;

        let (mut stats, jobs) = self.plan(config);
        log::info!(
            "Building synthesis {:?}: {} shards ({} words)",
            config.name,
            jobs.len(),
            stats.total_words
        );
        self.write_metadata(config, &mut stats);
        stats.files_written.extend(write_sequential(jobs));
        Ok(stats)
    }

    /// Build a synthesis with bucket shards written across `parallel.workers` threads.
    ///
    /// Cancellation behaves as in
    /// [`DictionaryBuilder::parallel_build`](crate::build::DictionaryBuilder::parallel_build);
    /// the metadata shard is written whenever planning took place.
    pub fn parallel_build(
        &self,
        config: &SynthesisConfig,
        parallel: &ParallelBuildConfig,
        cancel: &CancellationToken,
    ) -> Result<SynthesisStats> {
        config.validate()?;

        if cancel.is_cancelled() {
            log::info!("Synthesis {:?} cancelled before start", config.name);
            return Ok(SynthesisStats::new(&config.name));
        }
        if parallel.workers <= 1 {
            return self.build(config);
        }

        let (mut stats, jobs) = self.plan(config);
        log::info!(
            "Building synthesis {:?}: {} shards ({} words) with {} workers",
            config.name,
            jobs.len(),
            stats.total_words,
            parallel.workers
        );
        self.write_metadata(config, &mut stats);
        let written = write_parallel(jobs, parallel.workers, cancel)?;
        stats.files_written.extend(written);
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::WordSource;
    use crate::merge::WordFilter;
    use tempfile::TempDir;

    fn word(form: &str, language: &str, category: &str) -> Word {
        let source = WordSource::new(
            format!("{category}_{language}"),
            format!("/src/{language}"),
            language,
            form,
            category,
        );
        Word::with_source(form, source).unwrap()
    }

    fn builder(dir: &Path) -> SynthesisBuilder {
        let mut builder = SynthesisBuilder::new(dir);
        builder.add_words(vec![
            word("care", "en", "standard"),
            word("cat", "en", "standard"),
            word("dog", "en", "standard"),
            word("darn", "en", "curseword"),
        ]);
        builder.add_words(vec![
            word("care", "tr", "standard"),
            word("cay", "tr", "standard"),
            word("hund", "de", "standard"),
        ]);
        builder
    }

    fn standard_config() -> SynthesisConfig {
        SynthesisConfig::new("en_tr_standard").with_filter(
            WordFilter::new(3, 10)
                .with_include_languages(["en", "tr"])
                .with_include_categories(["standard"]),
        )
    }

    #[test]
    fn test_split_by_letter_layout() {
        let dir = TempDir::new().unwrap();
        let builder = builder(dir.path());
        let stats = builder.build(&standard_config()).unwrap();

        // care (en+tr), cat, dog, cay; hund is German, darn is a curse word.
        assert_eq!(stats.total_words, 4);
        assert_eq!(stats.by_length[&3], 3);
        assert_eq!(stats.by_length[&4], 1);
        assert_eq!(stats.by_letter["c"], 3);
        assert_eq!(stats.by_letter["d"], 1);
        let languages: Vec<&str> = stats.languages_included.iter().map(String::as_str).collect();
        assert_eq!(languages, vec!["en", "tr"]);

        let root = dir.path().join("synthesis").join("en_tr_standard");
        assert_eq!(stats.files_written[0], root.join("_config.json"));
        assert_eq!(stats.files_written.len(), 4);

        let shard = Shard::load(root.join("3-c").join("c.json")).unwrap();
        assert_eq!(shard.name, "en_tr_standard_3-c_c");
        assert!(shard.language.is_none());
        let forms: Vec<&str> = shard.words().map(|w| w.normalized.as_str()).collect();
        assert_eq!(forms, vec!["cat", "cay"]);

        let care = Shard::load(root.join("4-c").join("c.json")).unwrap();
        assert_eq!(care.get("care").unwrap().sources.len(), 2);
    }

    #[test]
    fn test_unsplit_layout_and_metadata() {
        let dir = TempDir::new().unwrap();
        let config = standard_config().with_split_by_letter(false);
        let stats = builder(dir.path()).build(&config).unwrap();

        let root = dir.path().join("synthesis").join("en_tr_standard");
        assert_eq!(stats.files_written.len(), 3);
        let shard = Shard::load(root.join("3-c.json")).unwrap();
        assert_eq!(shard.word_count(), 3);

        let metadata: serde_json::Value =
            serde_json::from_slice(&std::fs::read(root.join("_config.json")).unwrap()).unwrap();
        assert_eq!(metadata["config"]["name"], "en_tr_standard");
        assert_eq!(metadata["config"]["include_languages"], serde_json::json!(["en", "tr"]));
        assert!(metadata["config"]["exclude_categories"].is_null());
        assert_eq!(metadata["config"]["split_by_letter"], false);
        assert_eq!(metadata["stats"]["total_words"], 4);
        assert_eq!(metadata["stats"]["by_length"]["3"], 3);
        assert_eq!(metadata["stats"]["categories"], serde_json::json!(["standard"]));
    }

    #[test]
    fn test_parallel_build_matches_sequential() {
        let dir = TempDir::new().unwrap();
        let builder = builder(dir.path());
        let sequential = builder.build(&standard_config()).unwrap();
        let parallel = builder
            .parallel_build(
                &standard_config(),
                &ParallelBuildConfig::new(4),
                &CancellationToken::new(),
            )
            .unwrap();

        assert_eq!(sequential.total_words, parallel.total_words);
        assert_eq!(sequential.by_letter, parallel.by_letter);
        assert_eq!(parallel.files_written[0], sequential.files_written[0]);
        let mut expected = sequential.files_written.clone();
        expected.sort();
        let mut actual = parallel.files_written.clone();
        actual.sort();
        assert_eq!(expected, actual);
    }

    #[test]
    fn test_pre_cancelled_parallel_build() {
        let dir = TempDir::new().unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let stats = builder(dir.path())
            .parallel_build(&standard_config(), &ParallelBuildConfig::new(4), &cancel)
            .unwrap();

        assert_eq!(stats.config_name, "en_tr_standard");
        assert_eq!(stats.total_words, 0);
        assert!(stats.files_written.is_empty());
        assert!(!dir.path().join("synthesis").exists());
    }

    #[test]
    fn test_curse_words_excluded() {
        let dir = TempDir::new().unwrap();
        let mut builder = builder(dir.path());
        builder.add_words(vec![word("care", "en", "curseword")]);

        let config = SynthesisConfig::new("clean").with_filter(
            WordFilter::new(3, 10)
                .with_include_categories(["standard"])
                .with_exclude_categories(["curseword"]),
        );
        let stats = builder.build(&config).unwrap();

        assert_eq!(stats.total_words, 4);
        assert!(!stats.categories_included.contains("curseword"));
    }

    #[test]
    fn test_invalid_name_rejected() {
        let dir = TempDir::new().unwrap();
        assert!(builder(dir.path()).build(&SynthesisConfig::new("../x")).is_err());
    }
}
