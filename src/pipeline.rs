//! Staged orchestration of a full run.
//!
//! Stages run strictly one after another: ingest every language (and
//! optionally the curse-word lists), build per-language shards, then build
//! the standard synthesis. Each stage owns its own worker pool.

pub mod config;

use std::time::Instant;

use serde::Serialize;

use crate::build::{BuildStats, DictionaryBuilder, SynthesisBuilder, SynthesisStats};
use crate::error::Result;
use crate::ingest::{
    IngestSummary, LanguageIngestOptions, LanguageResult, ParseConfig, SourceFetcher,
    SourceFormat, ingest_languages,
};
use crate::normalize::Normalizer;
use crate::util::cancel::CancellationToken;

pub use config::PipelineConfig;

/// Outcome of one [`Pipeline::run`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineReport {
    pub ingest: IngestSummary,
    /// Present when curse-word lists were requested.
    pub cursewords: Option<IngestSummary>,
    /// Languages whose standard source could not be fetched or read.
    pub failed_languages: Vec<String>,
    pub dictionary: BuildStats,
    pub synthesis: SynthesisStats,
    /// Set if cancellation cut the run short.
    pub cancelled: bool,
    pub elapsed_ms: u64,
}

impl PipelineReport {
    /// Every shard written by either build stage.
    pub fn files_written(&self) -> usize {
        self.dictionary.files_written.len() + self.synthesis.files_written.len()
    }
}

/// Runs ingest, build and synthesis for one [`PipelineConfig`].
pub struct Pipeline {
    config: PipelineConfig,
    fetcher: Box<dyn SourceFetcher>,
    normalizer: Box<dyn Normalizer>,
}

impl Pipeline {
    /// Create a pipeline. Fails if `config` does not validate.
    pub fn new(
        config: PipelineConfig,
        fetcher: Box<dyn SourceFetcher>,
        normalizer: Box<dyn Normalizer>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Pipeline {
            config,
            fetcher,
            normalizer,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    fn ingest_options(&self, format: SourceFormat) -> LanguageIngestOptions {
        let config = &self.config;
        let options = LanguageIngestOptions::new(format, config.min_length, config.max_length);
        if !config.parallel_ingest {
            return options;
        }

        if config.languages.len() > 1 {
            options.with_workers(config.effective_workers())
        } else {
            options.with_parse_config(ParseConfig::new(
                config.effective_workers(),
                config.chunk_size,
            ))
        }
    }

    fn ingest(&self, format: SourceFormat) -> Result<Vec<LanguageResult>> {
        let options = self.ingest_options(format);
        ingest_languages(
            &self.config.languages,
            self.fetcher.as_ref(),
            self.normalizer.as_ref(),
            &options,
            |language| {
                if let Ok(result) = &language.result {
                    log::info!(
                        "[{}] {}: {} words ({} raw, {} duplicates)",
                        language.language,
                        result.dict_name,
                        result.total_valid,
                        result.total_raw,
                        result.total_duplicates
                    );
                }
            },
        )
    }

    /// Execute every stage.
    ///
    /// Per-language failures are reported, not returned. Cancellation is
    /// checked between stages and at each shard dispatch; a cancelled run
    /// returns the partial report with `cancelled` set.
    pub fn run(&self, cancel: &CancellationToken) -> Result<PipelineReport> {
        let started = Instant::now();
        let config = &self.config;
        let mut report = PipelineReport::default();

        let mut dictionary =
            DictionaryBuilder::new(&config.output_dir, config.min_length, config.max_length);
        let mut synthesis = SynthesisBuilder::new(&config.output_dir);

        log::info!(
            "Stage 1/3: ingesting {} languages",
            config.languages.len()
        );
        let results = self.ingest(SourceFormat::Hunspell)?;
        report.ingest = IngestSummary::aggregate(&results);
        for language in results {
            match language.result {
                Ok(result) => {
                    dictionary.add_words(result.words.clone(), &language.language);
                    synthesis.add_words(result.words);
                }
                Err(_) => report.failed_languages.push(language.language),
            }
        }

        if config.include_cursewords {
            log::info!("Stage 1/3: ingesting curse-word lists");
            let results = self.ingest(SourceFormat::PlainList)?;
            report.cursewords = Some(IngestSummary::aggregate(&results));
            for language in results {
                if let Ok(result) = language.result {
                    dictionary.add_words(result.words.clone(), &language.language);
                    synthesis.add_words(result.words);
                }
            }
        }

        if cancel.is_cancelled() {
            log::info!("Run cancelled after ingest");
            report.cancelled = true;
            report.elapsed_ms = started.elapsed().as_millis() as u64;
            return Ok(report);
        }

        log::info!("Stage 2/3: building dictionaries");
        let build_config = config.build_config();
        report.dictionary = dictionary.parallel_build(&build_config, cancel)?;
        log::info!(
            "Wrote {} words in {} files",
            report.dictionary.total_words,
            report.dictionary.files_written.len()
        );

        if cancel.is_cancelled() {
            log::info!("Run cancelled after dictionary build");
            report.cancelled = true;
            report.elapsed_ms = started.elapsed().as_millis() as u64;
            return Ok(report);
        }

        let synthesis_config = config.synthesis_config();
        log::info!("Stage 3/3: building synthesis {}", synthesis_config.name);
        report.synthesis = synthesis.parallel_build(&synthesis_config, &build_config, cancel)?;
        log::info!(
            "Synthesis {}: {} unique words in {} files",
            synthesis_config.name,
            report.synthesis.total_words,
            report.synthesis.files_written.len()
        );

        report.cancelled = cancel.is_cancelled();
        report.elapsed_ms = started.elapsed().as_millis() as u64;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PolyglexError;
    use crate::ingest::CacheDirFetcher;
    use crate::normalize::AsciiFolder;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_source(cache: &Path, relative: &str, contents: &str) {
        let path = cache.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn pipeline(root: &Path, config: PipelineConfig) -> Pipeline {
        let config = config
            .with_cache_dir(root.join("sources"))
            .with_output_dir(root.join("dicts"));
        Pipeline::new(
            config,
            Box::new(CacheDirFetcher::new(root.join("sources"))),
            Box::new(AsciiFolder::new()),
        )
        .unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = Pipeline::new(
            PipelineConfig::new(["en"]).with_lengths(5, 3),
            Box::new(CacheDirFetcher::new("sources")),
            Box::new(AsciiFolder::new()),
        );
        assert!(matches!(result, Err(PolyglexError::InvalidConfig(_))));
    }

    #[test]
    fn test_path_like_language_rejected_before_any_write() {
        let dir = TempDir::new().unwrap();
        write_source(&dir.path().join("sources"), "en/en.dic", "1
hello
");

        let config = PipelineConfig::new(["en", "x/y"])
            .with_cache_dir(dir.path().join("sources"))
            .with_output_dir(dir.path().join("dicts"));
        let result = Pipeline::new(
            config,
            Box::new(CacheDirFetcher::new(dir.path().join("sources"))),
            Box::new(AsciiFolder::new()),
        );

        assert!(matches!(result, Err(PolyglexError::InvalidConfig(_))));
        assert!(!dir.path().join("dicts").exists());
    }

    #[test]
    fn test_missing_language_is_reported() {
        let dir = TempDir::new().unwrap();
        write_source(&dir.path().join("sources"), "en/en.dic", "2\ncare\nhello\n");

        let report = pipeline(dir.path(), PipelineConfig::new(["en", "xx"]).with_workers(2))
            .run(&CancellationToken::new())
            .unwrap();

        assert_eq!(report.ingest.successful, 1);
        assert_eq!(report.failed_languages, vec!["xx"]);
        assert_eq!(report.dictionary.total_words, 2);
        assert_eq!(report.synthesis.config_name, "en_xx_standard");
        assert!(!report.cancelled);
    }

    #[test]
    fn test_pre_cancelled_run_writes_nothing() {
        let dir = TempDir::new().unwrap();
        write_source(&dir.path().join("sources"), "en/en.dic", "1\nhello\n");

        let cancel = CancellationToken::new();
        cancel.cancel();
        let report = pipeline(dir.path(), PipelineConfig::new(["en"]))
            .run(&cancel)
            .unwrap();

        assert!(report.cancelled);
        assert_eq!(report.ingest.total_valid, 1);
        assert_eq!(report.files_written(), 0);
        assert!(!dir.path().join("dicts").exists());
    }
}
