//! Fetch and ingest several languages on a bounded worker pool.

use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use serde::Serialize;

use crate::error::{PolyglexError, Result};
use crate::ingest::IngestResult;
use crate::ingest::config::{IngestConfig, ParseConfig, SourceFormat};
use crate::ingest::fetch::SourceFetcher;
use crate::ingest::parallel_parse::parallel_ingest_file;
use crate::normalize::Normalizer;

/// Options shared by every language in one ingest run.
#[derive(Debug, Clone)]
pub struct LanguageIngestOptions {
    /// Languages processed concurrently. `<= 1` means one at a time.
    pub workers: usize,

    pub format: SourceFormat,

    pub min_length: usize,

    pub max_length: usize,

    /// Chunked parsing within each file.
    pub parse: ParseConfig,
}

impl LanguageIngestOptions {
    pub fn new(format: SourceFormat, min_length: usize, max_length: usize) -> Self {
        Self {
            workers: 1,
            format,
            min_length,
            max_length,
            parse: ParseConfig::new(1, 0),
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_parse_config(mut self, parse: ParseConfig) -> Self {
        self.parse = parse;
        self
    }

    fn ingest_config(&self, language: &str) -> IngestConfig {
        let config = match self.format {
            SourceFormat::Hunspell => IngestConfig::new(language),
            SourceFormat::PlainList => IngestConfig::cursewords(language),
        };
        config.with_lengths(self.min_length, self.max_length)
    }
}

/// Outcome for one language. A failed fetch or read leaves `result` as `Err`.
#[derive(Debug)]
pub struct LanguageResult {
    pub language: String,
    pub result: Result<IngestResult>,
}

impl LanguageResult {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Totals over a set of language results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    pub total_languages: usize,
    pub successful: usize,
    pub failed: usize,
    pub total_raw: usize,
    pub total_valid: usize,
    pub total_duplicates: usize,
}

impl IngestSummary {
    pub fn aggregate(results: &[LanguageResult]) -> Self {
        let mut summary = IngestSummary {
            total_languages: results.len(),
            ..Default::default()
        };

        for language in results {
            match &language.result {
                Ok(result) => {
                    summary.successful += 1;
                    summary.total_raw += result.total_raw;
                    summary.total_valid += result.total_valid;
                    summary.total_duplicates += result.total_duplicates;
                }
                Err(_) => summary.failed += 1,
            }
        }

        summary
    }
}

fn ingest_language(
    language: &str,
    fetcher: &dyn SourceFetcher,
    normalizer: &dyn Normalizer,
    options: &LanguageIngestOptions,
) -> LanguageResult {
    let config = options.ingest_config(language);
    let result = fetcher
        .fetch(language, options.format)
        .and_then(|path| parallel_ingest_file(&path, &config, &options.parse, normalizer));

    if let Err(e) = &result {
        log::warn!("[{language}] skipped: {e}");
    }

    LanguageResult {
        language: language.to_string(),
        result,
    }
}

/// Fetch and ingest every language, returning results in input order.
///
/// `on_done` is called once per language as soon as it finishes, possibly
/// from a worker thread. Failures never abort the other languages.
pub fn ingest_languages<F>(
    languages: &[String],
    fetcher: &dyn SourceFetcher,
    normalizer: &dyn Normalizer,
    options: &LanguageIngestOptions,
    on_done: F,
) -> Result<Vec<LanguageResult>>
where
    F: Fn(&LanguageResult) + Sync,
{
    let run_one = |language: &String| {
        let result = ingest_language(language, fetcher, normalizer, options);
        on_done(&result);
        result
    };

    if options.workers <= 1 || languages.len() <= 1 {
        return Ok(languages.iter().map(run_one).collect());
    }

    let pool = ThreadPoolBuilder::new()
        .num_threads(options.workers.min(languages.len()))
        .thread_name(|i| format!("ingest-lang-{i}"))
        .build()
        .map_err(|e| PolyglexError::internal(format!("Failed to create thread pool: {e}")))?;

    Ok(pool.install(|| languages.par_iter().map(run_one).collect()))
}
