//! Implementation of `schemaprobe compare <reference> <candidate>`.
//!
//! Loads both schema documents, scores the candidate against the reference
//! and prints the comparison report. `--report FILE` additionally writes the
//! report JSON. A low score is not an error: the exit code is 0 whenever
//! both inputs parse.
use std::path::Path;

use schemaprobe_core::{CompareConfig, compare_with};
use tracing::info;

use crate::OutputFormat;
use crate::cmd::{emit, emit_json};
use crate::error::CliError;
use crate::format::write_comparison;
use crate::io::{read_schema, write_json};

/// Arguments of the `compare` command.
pub struct CompareArgs<'a> {
    /// Reference schema path.
    pub reference: &'a Path,
    /// Candidate schema path.
    pub candidate: &'a Path,
    /// Match threshold.
    pub threshold: f64,
    /// Optional report output path.
    pub report: Option<&'a Path>,
}

/// Runs the `compare` command.
///
/// # Errors
///
/// Returns [`CliError`] with exit code 2 if either schema cannot be read or
/// parsed, or the report cannot be written.
pub fn run(args: &CompareArgs<'_>, max_file_size: u64, format: &OutputFormat) -> Result<(), CliError> {
    let reference = read_schema(args.reference, max_file_size)?;
    let candidate = read_schema(args.candidate, max_file_size)?;

    let config = CompareConfig {
        threshold: args.threshold,
    };
    let result = compare_with(&reference, &candidate, &config);
    info!(
        accuracy = result.accuracy,
        node_matches = result.node_matches.len(),
        edge_matches = result.edge_matches.len(),
        "comparison complete"
    );

    if let Some(path) = args.report {
        write_json(path, &result)?;
        info!(file = %path.display(), "wrote comparison report");
    }

    match format {
        OutputFormat::Human => emit(|out| {
            write_comparison(
                out,
                &result,
                &file_label(args.reference),
                &file_label(args.candidate),
            )
        }),
        OutputFormat::Json => emit_json(&result),
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}
