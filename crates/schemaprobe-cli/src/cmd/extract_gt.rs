//! Implementation of `schemaprobe extract-gt <folder>`.
//!
//! Converts a folder of strict schema exports into a reference schema and
//! writes it to `<output>/golden_truth_<dataset>.json`, where `<dataset>` is
//! the folder name.
use std::io::Write as _;
use std::path::Path;

use schemaprobe_csv::{dataset_name, extract_reference, reference_file_name};
use serde::Serialize;
use tracing::info;

use crate::OutputFormat;
use crate::cmd::{emit, emit_json};
use crate::error::CliError;
use crate::io::write_json;

#[derive(Serialize)]
struct ExtractOutput<'a> {
    dataset_name: &'a str,
    output: String,
    node_types: usize,
    edge_types: usize,
}

/// Runs the `extract-gt` command.
///
/// # Errors
///
/// Returns [`CliError`] with exit code 2 if the exports are missing or
/// unreadable, or the output cannot be written.
pub fn run(folder: &Path, output_dir: &Path, format: &OutputFormat) -> Result<(), CliError> {
    let schema = extract_reference(folder)?;
    let dataset = dataset_name(folder);
    let path = output_dir.join(reference_file_name(&dataset));
    write_json(&path, &schema)?;
    info!(file = %path.display(), "wrote reference schema");

    let summary = ExtractOutput {
        dataset_name: &dataset,
        output: path.display().to_string(),
        node_types: schema.node_types.len(),
        edge_types: schema.edge_types.len(),
    };
    match format {
        OutputFormat::Human => emit(|out| {
            writeln!(out, "dataset:     {}", summary.dataset_name)?;
            writeln!(out, "node types:  {}", summary.node_types)?;
            writeln!(out, "edge types:  {}", summary.edge_types)?;
            writeln!(out, "written:     {}", summary.output)
        }),
        OutputFormat::Json => emit_json(&summary),
    }
}
