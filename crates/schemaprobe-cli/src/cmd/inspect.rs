//! Implementation of `schemaprobe inspect <folder>`.
//!
//! Builds the graph and prints:
//! - node count by type
//! - edge count by type
//! - files loaded, ignored and skipped
//!
//! In `--format json` mode a single JSON object is emitted to stdout.
//! In human mode, aligned key/value lines are printed.
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use schemaprobe_core::{ElementKind, TypedGraph};
use schemaprobe_csv::BuildReport;
use serde::Serialize;

use crate::OutputFormat;
use crate::cmd::{emit, emit_json, load_graph};
use crate::error::CliError;

/// A file left out of the graph, with the reason.
#[derive(Debug, Serialize)]
pub struct SkippedEntry {
    /// File path.
    pub file: String,
    /// Error message.
    pub error: String,
}

/// Statistics gathered from a built graph.
#[derive(Debug, Serialize)]
pub struct InspectStats {
    /// Total number of nodes, placeholders included.
    pub node_count: usize,
    /// Node count grouped by type.
    pub node_counts: BTreeMap<String, usize>,
    /// Total number of edges.
    pub edge_count: usize,
    /// Edge count grouped by type.
    pub edge_counts: BTreeMap<String, usize>,
    /// Node and edge files that were loaded.
    pub files_loaded: usize,
    /// Files whose header matched no role.
    pub files_ignored: usize,
    /// Files that could not be read.
    pub skipped: Vec<SkippedEntry>,
    /// Folder-level warnings.
    pub warnings: Vec<String>,
}

impl InspectStats {
    /// Computes statistics from a graph and the report of its build.
    pub fn from_build(graph: &TypedGraph, report: &BuildReport) -> Self {
        Self {
            node_count: graph.node_count(),
            node_counts: type_counts(graph, graph.node_types(), ElementKind::Node),
            edge_count: graph.edge_count(),
            edge_counts: type_counts(graph, graph.edge_types(), ElementKind::Edge),
            files_loaded: report.node_files.len() + report.edge_files.len(),
            files_ignored: report.unknown_files.len(),
            skipped: report
                .skipped
                .iter()
                .map(|s| SkippedEntry {
                    file: s.path.display().to_string(),
                    error: s.error.to_string(),
                })
                .collect(),
            warnings: report.warnings.iter().map(ToString::to_string).collect(),
        }
    }
}

fn type_counts<'g>(
    graph: &TypedGraph,
    names: impl Iterator<Item = &'g str>,
    kind: ElementKind,
) -> BTreeMap<String, usize> {
    names
        .map(|name| (name.to_owned(), graph.type_count(name, kind)))
        .collect()
}

/// Runs the `inspect` command.
///
/// # Errors
///
/// Returns [`CliError::IoError`] if stdout cannot be written.
pub fn run(folder: &Path, format: &OutputFormat) -> Result<(), CliError> {
    let (graph, report) = load_graph(folder);
    let stats = InspectStats::from_build(&graph, &report);
    match format {
        OutputFormat::Human => emit(|out| print_human(out, &stats)),
        OutputFormat::Json => emit_json(&stats),
    }
}

/// Writes inspect statistics in human-readable aligned format.
fn print_human<W: Write>(w: &mut W, stats: &InspectStats) -> std::io::Result<()> {
    writeln!(w, "nodes:          {}", stats.node_count)?;
    for (name, count) in &stats.node_counts {
        writeln!(w, "  {name}: {count}")?;
    }
    writeln!(w, "edges:          {}", stats.edge_count)?;
    for (name, count) in &stats.edge_counts {
        writeln!(w, "  {name}: {count}")?;
    }
    writeln!(w, "files loaded:   {}", stats.files_loaded)?;
    writeln!(w, "files ignored:  {}", stats.files_ignored)?;
    if !stats.skipped.is_empty() {
        writeln!(w, "files skipped:  {}", stats.skipped.len())?;
        for s in &stats.skipped {
            writeln!(w, "  {}: {}", s.file, s.error)?;
        }
    }
    for warning in &stats.warnings {
        writeln!(w, "warning: {warning}")?;
    }
    Ok(())
}
