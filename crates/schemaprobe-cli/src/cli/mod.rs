//! Clap CLI definition: root struct, subcommands, and shared argument types.
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Default Generative Language API base URL.
pub const DEFAULT_ORACLE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Output format for CLI commands.
///
/// `Human` emits aligned text to stdout. `Json` emits a single JSON object.
#[derive(Clone, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default).
    Human,
    /// Structured JSON output.
    Json,
}

/// Node sampling options shared by commands that profile a graph.
#[derive(Args, Clone, Debug)]
pub struct SamplingArgs {
    /// Seed for node sampling; omit for a fresh random sample each run.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Oracle selection and connection settings.
#[derive(Args, Clone, Debug)]
pub struct OracleArgs {
    /// API key for the schema oracle. Without a key the schema is derived
    /// locally.
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Derive the schema locally even when an API key is configured.
    #[arg(long)]
    pub mock: bool,

    /// Model name sent to the oracle.
    #[arg(long, env = "SCHEMAPROBE_MODEL", default_value = "gemini-2.5-flash")]
    pub model: String,

    /// Base URL of the oracle API.
    #[arg(long, env = "SCHEMAPROBE_ORACLE_URL", default_value = DEFAULT_ORACLE_URL)]
    pub oracle_url: String,

    /// Seconds to wait for the oracle before giving up.
    #[arg(long, default_value = "120", value_parser = clap::value_parser!(u64).range(1..))]
    pub oracle_timeout: u64,
}

/// All top-level subcommands exposed by the `schemaprobe` binary.
#[derive(Subcommand)]
pub enum Command {
    /// Build a graph from a CSV folder and write its inferred schema.
    Discover {
        /// Folder of node and edge CSV exports.
        #[arg(value_name = "FOLDER")]
        folder: PathBuf,
        /// Directory that receives `inferred_schema.json`.
        #[arg(long, short = 'o', value_name = "DIR", default_value = ".")]
        output: PathBuf,
        #[command(flatten)]
        oracle: OracleArgs,
        #[command(flatten)]
        sampling: SamplingArgs,
    },

    /// Score a candidate schema against a reference schema.
    Compare {
        /// Reference (ground-truth) schema JSON.
        #[arg(value_name = "REFERENCE")]
        reference: PathBuf,
        /// Candidate (inferred) schema JSON.
        #[arg(value_name = "CANDIDATE")]
        candidate: PathBuf,
        /// Minimum name similarity for a type match (exclusive), in `0..=1`.
        #[arg(long, default_value = "0.8", value_parser = parse_threshold)]
        threshold: f64,
        /// Also write the comparison report JSON to this file.
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,
    },

    /// Print the profile report of a CSV folder.
    Profile {
        /// Folder of node and edge CSV exports.
        #[arg(value_name = "FOLDER")]
        folder: PathBuf,
        #[command(flatten)]
        sampling: SamplingArgs,
    },

    /// Print node and edge counts by type for a CSV folder.
    Inspect {
        /// Folder of node and edge CSV exports.
        #[arg(value_name = "FOLDER")]
        folder: PathBuf,
    },

    /// Convert strict ground-truth exports into a reference schema.
    #[command(name = "extract-gt")]
    ExtractGt {
        /// Folder holding `*_node_types_strict.json` and
        /// `*_edge_types_strict.json`.
        #[arg(value_name = "FOLDER")]
        folder: PathBuf,
        /// Directory that receives `golden_truth_<dataset>.json`.
        #[arg(long, short = 'o', value_name = "DIR", default_value = ".")]
        output: PathBuf,
    },
}

/// Root CLI struct for the `schemaprobe` binary.
///
/// All global flags are marked `global = true` so that clap propagates them
/// to every subcommand.
#[derive(Parser)]
#[command(
    name = "schemaprobe",
    version,
    about = "Property-graph schema discovery and evaluation",
    long_about = "Builds a typed property graph from a folder of CSV exports,\n\
                  infers its schema, and scores inferred schemas against\n\
                  ground truth."
)]
pub struct Cli {
    /// Active subcommand.
    #[command(subcommand)]
    pub command: Command,

    /// Output format: human (default) or json.
    #[arg(long, short = 'f', default_value = "human", global = true)]
    pub format: OutputFormat,

    /// Only log errors (incompatible with `--verbose`).
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log per-file and per-row detail (incompatible with `--quiet`).
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Maximum size in bytes of a schema JSON input.
    ///
    /// Can also be set via the `SCHEMAPROBE_MAX_FILE_SIZE` environment
    /// variable. Default: 268435456 (256 MB).
    #[arg(
        long,
        global = true,
        env = "SCHEMAPROBE_MAX_FILE_SIZE",
        default_value = "268435456"
    )]
    pub max_file_size: u64,
}

/// Parses a similarity threshold: a finite number between 0 and 1.
fn parse_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{s} is not between 0 and 1"))
    }
}
