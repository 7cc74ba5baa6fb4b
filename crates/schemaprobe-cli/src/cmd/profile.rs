//! Implementation of `schemaprobe profile <folder>`.
//!
//! Prints the context report that the oracle would receive. In `--format
//! json` mode the report text is wrapped in an object with the graph totals.
use std::io::Write as _;
use std::path::Path;

use schemaprobe_core::{ProfileConfig, context_report};
use serde::Serialize;

use crate::OutputFormat;
use crate::cmd::{emit, emit_json, load_graph};
use crate::error::CliError;

#[derive(Serialize)]
struct ProfileOutput<'a> {
    total_nodes: usize,
    total_edges: usize,
    report: &'a str,
}

/// Runs the `profile` command.
///
/// # Errors
///
/// Returns [`CliError::IoError`] if stdout cannot be written.
pub fn run(folder: &Path, seed: Option<u64>, format: &OutputFormat) -> Result<(), CliError> {
    let (graph, _) = load_graph(folder);
    let config = ProfileConfig {
        seed,
        ..ProfileConfig::default()
    };
    let report = context_report(&graph, &config);

    match format {
        OutputFormat::Human => emit(|out| out.write_all(report.as_bytes())),
        OutputFormat::Json => emit_json(&ProfileOutput {
            total_nodes: graph.node_count(),
            total_edges: graph.edge_count(),
            report: &report,
        }),
    }
}
