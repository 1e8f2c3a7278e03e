//! Chunked parallel parsing of a single source.
//!
//! Content lines are split into contiguous chunks. Each worker parses one
//! chunk into a private map, keeping the exact physical line numbers, and
//! the maps are unioned on the calling thread once every chunk is done.

use std::collections::hash_map::Entry;
use std::path::Path;

use ahash::AHashMap;
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;

use crate::error::{PolyglexError, Result};
use crate::ingest::IngestResult;
use crate::ingest::config::{IngestConfig, ParseConfig};
use crate::ingest::parser::{
    LineProcessor, ParsedLines, absolute_path, content_start, ingest_str, read_source,
};
use crate::normalize::Normalizer;

/// A contiguous run of content lines.
struct LineChunk<'t> {
    lines: &'t [&'t str],
    /// Physical (1-based) number of `lines[0]`.
    first_line_number: usize,
}

/// Parse in-memory source text, splitting the work across `parse_config.workers`.
///
/// Falls back to sequential parsing when there is a single worker or fewer
/// than two chunks' worth of lines.
pub fn parallel_ingest_str(
    text: &str,
    source_path: &Path,
    config: &IngestConfig,
    parse_config: &ParseConfig,
    normalizer: &dyn Normalizer,
) -> Result<IngestResult> {
    let lines: Vec<&str> = text.lines().collect();
    let start = content_start(&lines, config);
    let content = &lines[start..];
    let chunk_size = parse_config.effective_chunk_size(content.len());

    if parse_config.workers <= 1 || content.len() < chunk_size * 2 {
        log::debug!(
            "[{}] {} lines, parsing sequentially",
            config.language,
            content.len()
        );
        return Ok(ingest_str(text, source_path, config, normalizer));
    }

    let chunks: Vec<LineChunk<'_>> = content
        .chunks(chunk_size)
        .enumerate()
        .map(|(i, lines)| LineChunk {
            lines,
            first_line_number: start + i * chunk_size + 1,
        })
        .collect();

    log::debug!(
        "[{}] parsing {} lines in {} chunks with {} workers",
        config.language,
        content.len(),
        chunks.len(),
        parse_config.workers
    );

    let pool = ThreadPoolBuilder::new()
        .num_threads(parse_config.workers)
        .thread_name(|i| format!("ingest-parse-{i}"))
        .build()
        .map_err(|e| PolyglexError::internal(format!("Failed to create thread pool: {e}")))?;

    let source_path = absolute_path(source_path);
    let processor = LineProcessor::new(config, normalizer, &source_path);

    let partials: Vec<ParsedLines> = pool.install(|| {
        chunks
            .par_iter()
            .map(|chunk| processor.process(chunk.lines, chunk.first_line_number))
            .collect()
    });

    Ok(merge_partials(partials).into_result(config, source_path))
}

/// Parse a source file with chunked parallel workers.
pub fn parallel_ingest_file<P: AsRef<Path>>(
    path: P,
    config: &IngestConfig,
    parse_config: &ParseConfig,
    normalizer: &dyn Normalizer,
) -> Result<IngestResult> {
    let path = path.as_ref();
    let text = read_source(path)?;
    parallel_ingest_str(&text, path, config, parse_config, normalizer)
}

/// Union per-chunk maps. A key seen in an earlier chunk counts as a duplicate.
fn merge_partials(partials: Vec<ParsedLines>) -> ParsedLines {
    let capacity = partials.iter().map(|p| p.words.len()).max().unwrap_or(0);
    let mut merged = ParsedLines {
        words: AHashMap::with_capacity(capacity),
        raw: 0,
        duplicates: 0,
    };

    for partial in partials {
        merged.raw += partial.raw;
        merged.duplicates += partial.duplicates;

        for (normalized, word) in partial.words {
            match merged.words.entry(normalized) {
                Entry::Occupied(mut entry) => {
                    let duplicates_in_chunk = word.sources.len();
                    entry.get_mut().merge(word);
                    merged.duplicates += duplicates_in_chunk;
                }
                Entry::Vacant(entry) => {
                    entry.insert(word);
                }
            }
        }
    }

    merged
}
