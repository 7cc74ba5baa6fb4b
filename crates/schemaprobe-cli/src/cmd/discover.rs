//! Implementation of `schemaprobe discover <folder>`.
//!
//! Builds the graph, renders its context report, synthesizes a schema and
//! writes `<output>/inferred_schema.json`:
//! - with an API key (and no `--mock`), the report is sent to the oracle;
//! - otherwise the schema is derived locally from the graph.
//!
//! Nothing is written when the graph is empty or synthesis fails.
//!
//! Exit codes: 0 = success, 1 = empty graph or oracle failure, 2 = output
//! not writable.
use std::io::Write as _;
use std::path::{Path, PathBuf};

use schemaprobe_core::{DeriveConfig, ProfileConfig, Strategy, context_report, synthesize};
use serde::Serialize;
use tracing::{info, warn};

use crate::OutputFormat;
use crate::cli::OracleArgs;
use crate::cmd::{emit, emit_json, load_graph};
use crate::error::CliError;
use crate::io::write_json;
use crate::oracle::{GeminiOracle, OracleConfig};

/// File name of the inferred schema inside the output directory.
pub const INFERRED_SCHEMA_FILE: &str = "inferred_schema.json";

/// Arguments of the `discover` command.
pub struct DiscoverArgs<'a> {
    /// Input CSV folder.
    pub folder: &'a Path,
    /// Output directory.
    pub output: &'a Path,
    /// Oracle selection.
    pub oracle: &'a OracleArgs,
    /// Node sampling seed.
    pub seed: Option<u64>,
}

#[derive(Serialize)]
struct DiscoverOutput {
    strategy: &'static str,
    output: String,
    node_types: usize,
    edge_types: usize,
}

/// Runs the `discover` command.
///
/// # Errors
///
/// Returns [`CliError::EmptyGraph`] when no node was loaded, oracle errors
/// with exit code 1, and I/O errors with exit code 2.
pub fn run(args: &DiscoverArgs<'_>, format: &OutputFormat) -> Result<(), CliError> {
    let (graph, build) = load_graph(args.folder);
    if !build.skipped.is_empty() {
        warn!(files = build.skipped.len(), "some files were skipped");
    }

    let profile_config = ProfileConfig {
        seed: args.seed,
        ..ProfileConfig::default()
    };
    let report = if graph.is_empty() {
        String::new()
    } else {
        context_report(&graph, &profile_config)
    };

    let oracle;
    let (strategy, strategy_name) = match OracleConfig::from_args(args.oracle) {
        Some(config) => {
            oracle = GeminiOracle::new(config).map_err(|e| CliError::OracleFailed {
                detail: e.to_string(),
            })?;
            (Strategy::Oracle(&oracle), "oracle")
        }
        None => {
            info!("no oracle configured, deriving schema from the graph");
            (Strategy::Derive(DeriveConfig::default()), "derive")
        }
    };

    let schema = synthesize(&graph, &report, &strategy)
        .map_err(|e| CliError::from_synthesis(&e, PathBuf::from(args.folder)))?;

    let path = args.output.join(INFERRED_SCHEMA_FILE);
    write_json(&path, &schema)?;
    info!(file = %path.display(), "wrote inferred schema");

    let summary = DiscoverOutput {
        strategy: strategy_name,
        output: path.display().to_string(),
        node_types: schema.node_types.len(),
        edge_types: schema.edge_types.len(),
    };
    match format {
        OutputFormat::Human => emit(|out| {
            writeln!(out, "strategy:    {}", summary.strategy)?;
            writeln!(out, "node types:  {}", summary.node_types)?;
            writeln!(out, "edge types:  {}", summary.edge_types)?;
            writeln!(out, "written:     {}", summary.output)
        }),
        OutputFormat::Json => emit_json(&summary),
    }
}
