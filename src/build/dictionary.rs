//! Per-language dictionary shards.

use std::path::{Path, PathBuf};

use crate::build::config::ParallelBuildConfig;
use crate::build::shard_writer::{ShardJob, write_parallel, write_sequential};
use crate::build::stats::BuildStats;
use crate::error::Result;
use crate::lexicon::{Shard, Word, word_type_label};
use crate::merge::LanguagePool;
use crate::util::cancel::CancellationToken;

/// Builds one shard per non-empty `(language, length)` bucket.
///
/// Shards are written to `<output_dir>/<language>/<length>-c.json`.
#[derive(Debug, Clone)]
pub struct DictionaryBuilder {
    output_dir: PathBuf,
    pool: LanguagePool,
}

impl DictionaryBuilder {
    pub fn new<P: AsRef<Path>>(output_dir: P, min_length: usize, max_length: usize) -> Self {
        DictionaryBuilder {
            output_dir: output_dir.as_ref().to_path_buf(),
            pool: LanguagePool::new(min_length, max_length),
        }
    }

    /// Add words under `language`, merging repeats. Out-of-range lengths are ignored.
    pub fn add_words<I>(&mut self, words: I, language: &str) -> usize
    where
        I: IntoIterator<Item = Word>,
    {
        self.pool.add_words(words, language)
    }

    pub fn pool(&self) -> &LanguagePool {
        &self.pool
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path of the shard for one bucket.
    pub fn shard_path(&self, language: &str, length: usize) -> PathBuf {
        self.output_dir
            .join(language)
            .join(format!("{}.json", word_type_label(length)))
    }

    /// Bucket the pool into jobs and accumulate statistics.
    fn plan(&self) -> (BuildStats, Vec<ShardJob>) {
        let mut stats = BuildStats::default();
        let mut jobs = Vec::new();

        for (language, length, words) in self.pool.buckets() {
            let word_type = word_type_label(length);
            let mut shard = Shard::new(format!("{language}_{word_type}"))
                .with_language(language)
                .with_word_type(word_type);

            for word in words.values() {
                stats.record(language, word);
                shard.add_word(word.clone());
            }

            jobs.push(ShardJob::new(self.shard_path(language, length), shard));
        }

        (stats, jobs)
    }

    /// Write every shard on the calling thread.
    pub fn build(&self) -> BuildStats {
        let (mut stats, jobs) = self.plan();
        log::info!(
            "Building {} dictionary shards ({} words)",
            jobs.len(),
            stats.total_words
        );
        stats.files_written = write_sequential(jobs);
        stats
    }

    /// Write shards across `config.workers` threads.
    ///
    /// Falls back to [`build`](Self::build) for a single worker. If `cancel`
    /// is already set nothing is planned and empty statistics are returned;
    /// if it is set during writing, the statistics cover every planned word
    /// but `files_written` only lists the shards that were actually written.
    pub fn parallel_build(
        &self,
        config: &ParallelBuildConfig,
        cancel: &CancellationToken,
    ) -> Result<BuildStats> {
        if cancel.is_cancelled() {
            log::info!("Dictionary build cancelled before start");
            return Ok(BuildStats::default());
        }
        if config.workers <= 1 {
            return Ok(self.build());
        }

        let (mut stats, jobs) = self.plan();
        log::info!(
            "Building {} dictionary shards ({} words) with {} workers",
            jobs.len(),
            stats.total_words,
            config.workers
        );
        stats.files_written = write_parallel(jobs, config.workers, cancel)?;
        Ok(stats)
    }
}
