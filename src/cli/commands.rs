//! Command implementations for the Polyglex CLI.

use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::Result;
use crate::ingest::CacheDirFetcher;
use crate::normalize::AsciiFolder;
use crate::pipeline::Pipeline;
use crate::similarity::{BkTree, load_vocabulary, rank_hits};
use crate::util::cancel::CancellationToken;

/// Execute a CLI command.
pub fn execute_command(args: PolyglexArgs) -> Result<()> {
    match &args.command {
        Command::Build(build_args) => build_dictionaries(build_args, &args),
        Command::Fuzzy(fuzzy_args) => fuzzy_search(fuzzy_args, &args),
    }
}

/// Run the full pipeline.
fn build_dictionaries(args: &BuildArgs, cli_args: &PolyglexArgs) -> Result<()> {
    let config = args.to_config();
    log::info!(
        "Building {} into {} (lengths {}..={}, {} workers)",
        config.languages.join(","),
        config.output_dir.display(),
        config.min_length,
        config.max_length,
        config.effective_workers()
    );

    let fetcher = CacheDirFetcher::new(&config.cache_dir);
    let pipeline = Pipeline::new(config, Box::new(fetcher), Box::new(AsciiFolder::new()))?;
    let report = pipeline.run(&CancellationToken::new())?;

    output_build_report(&report, cli_args)
}

/// Load shards, index them and print the nearest words to the query.
fn fuzzy_search(args: &FuzzyArgs, cli_args: &PolyglexArgs) -> Result<()> {
    let query = AsciiFolder::new().fold_word(args.query.trim());

    let words = load_vocabulary(&args.dict_dir, &args.load_options())?;
    if words.is_empty() {
        log::warn!("No words found under {}", args.dict_dir.display());
    }

    let tree: BkTree = words.iter().collect();
    log::debug!("Indexed {} words", tree.len());

    let results = rank_hits(tree.search(&query, args.distance), args.limit);
    let results = FuzzyResults {
        query,
        max_distance: args.distance,
        vocabulary_size: tree.len(),
        count: results.len(),
        results,
    };

    output_fuzzy_results(&results, cli_args)
}
