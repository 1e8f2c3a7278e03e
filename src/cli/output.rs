//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, PolyglexArgs};
use crate::error::Result;
use crate::pipeline::PipelineReport;
use crate::similarity::SimilarityHit;

/// Result structure for fuzzy search.
#[derive(Debug, Serialize, Deserialize)]
pub struct FuzzyResults {
    pub query: String,
    pub max_distance: usize,
    pub vocabulary_size: usize,
    pub count: usize,
    pub results: Vec<SimilarityHit>,
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &PolyglexArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Print the outcome of a build run.
pub fn output_build_report(report: &PipelineReport, args: &PolyglexArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => output_json(report, args),
        OutputFormat::Human => {
            for line in format_build_report(report) {
                println!("{line}");
            }
            Ok(())
        }
    }
}

/// Print fuzzy search hits.
pub fn output_fuzzy_results(results: &FuzzyResults, args: &PolyglexArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => output_json(results, args),
        OutputFormat::Human => {
            for line in format_fuzzy_results(results) {
                println!("{line}");
            }
            Ok(())
        }
    }
}

fn format_build_report(report: &PipelineReport) -> Vec<String> {
    let ingest = &report.ingest;
    let mut lines = vec![format!(
        "Ingested {}/{} languages: {} valid words from {} raw lines ({} duplicates)",
        ingest.successful,
        ingest.total_languages,
        ingest.total_valid,
        ingest.total_raw,
        ingest.total_duplicates
    )];

    if !report.failed_languages.is_empty() {
        lines.push(format!(
            "Failed languages: {}",
            report.failed_languages.join(", ")
        ));
    }
    if let Some(cursewords) = &report.cursewords {
        lines.push(format!(
            "Curse-word lists: {}/{} languages, {} words",
            cursewords.successful, cursewords.total_languages, cursewords.total_valid
        ));
    }

    lines.push(format!(
        "Dictionaries: {} words in {} files",
        report.dictionary.total_words,
        report.dictionary.files_written.len()
    ));
    for (length, count) in &report.dictionary.by_length {
        lines.push(format!("  {length}-c: {count}"));
    }

    lines.push(format!(
        "Synthesis {}: {} unique words in {} files",
        report.synthesis.config_name,
        report.synthesis.total_words,
        report.synthesis.files_written.len()
    ));

    if report.cancelled {
        lines.push("Run was cancelled; output is partial".to_string());
    }
    lines.push(format!("Finished in {}", format_duration_ms(report.elapsed_ms)));
    lines
}

fn format_fuzzy_results(results: &FuzzyResults) -> Vec<String> {
    if results.results.is_empty() {
        return vec![format!(
            "No matches found for {:?} within distance {}",
            results.query, results.max_distance
        )];
    }

    let mut lines = vec![
        format!(
            "Fuzzy matches for {:?} (max distance: {}):",
            results.query, results.max_distance
        ),
        String::new(),
    ];
    for hit in &results.results {
        lines.push(format!("  {} (distance: {})", hit.word, hit.distance));
    }
    lines.push(String::new());
    lines.push(format!("{} result(s) found", results.count));
    lines
}

/// Format milliseconds for display.
fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{ms} ms")
    } else {
        format!("{:.2} s", ms as f64 / 1000.0)
    }
}
