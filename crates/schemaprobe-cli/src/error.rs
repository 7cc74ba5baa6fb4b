/// CLI error types with associated exit codes.
///
/// [`CliError`] is the top-level error type for the `schemaprobe` binary.
/// Every variant maps to a stable exit code via [`CliError::exit_code`]:
///
/// - Exit code **2**: input failure. The tool could not read or parse an
///   input at all.
/// - Exit code **1**: logical failure. The inputs were read but the run has
///   a well-defined failed outcome (empty graph, oracle failure, unusable
///   oracle response).
use std::fmt;
use std::path::PathBuf;

use schemaprobe_core::{SchemaLoadError, SynthesisError};
use schemaprobe_csv::ReferenceError;

/// All error conditions that the `schemaprobe` CLI can produce.
#[derive(Debug)]
pub enum CliError {
    // --- Exit code 2: input failures ---
    /// A file argument could not be found on the filesystem.
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// The process lacks permission to read or write a file.
    PermissionDenied {
        /// The path that could not be accessed.
        path: PathBuf,
    },

    /// The input exceeds the configured `--max-file-size` limit.
    FileTooLarge {
        /// The input path.
        source: String,
        /// The configured size limit in bytes.
        limit: u64,
        /// The actual size in bytes.
        actual: u64,
    },

    /// The input bytes are not valid UTF-8.
    InvalidUtf8 {
        /// The input path.
        source: String,
        /// The byte offset of the first invalid byte sequence.
        byte_offset: usize,
    },

    /// A generic I/O error not covered by the more specific variants above.
    IoError {
        /// The file or stream involved.
        source: String,
        /// The underlying I/O error message.
        detail: String,
    },

    /// A schema JSON input could not be parsed.
    ParseFailed {
        /// The input path.
        source: String,
        /// Parser message with location.
        detail: String,
    },

    /// Ground-truth exports could not be turned into a reference schema.
    GroundTruth {
        /// The underlying extraction error message.
        detail: String,
    },

    // --- Exit code 1: logical failures ---
    /// No node was ingested from the input folder.
    EmptyGraph {
        /// The input folder.
        folder: PathBuf,
    },

    /// The oracle call failed or timed out.
    OracleFailed {
        /// The underlying oracle error message.
        detail: String,
    },

    /// The oracle answered with something that is not a schema.
    OracleResponseInvalid {
        /// The underlying parse error message.
        detail: String,
    },
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. }
            | Self::PermissionDenied { .. }
            | Self::FileTooLarge { .. }
            | Self::InvalidUtf8 { .. }
            | Self::IoError { .. }
            | Self::ParseFailed { .. }
            | Self::GroundTruth { .. } => 2,

            Self::EmptyGraph { .. }
            | Self::OracleFailed { .. }
            | Self::OracleResponseInvalid { .. } => 1,
        }
    }

    /// Returns a human-readable error message suitable for printing to stderr.
    pub fn message(&self) -> String {
        match self {
            Self::FileNotFound { path } => {
                format!("error: file not found: {}", path.display())
            }
            Self::PermissionDenied { path } => {
                format!("error: permission denied: {}", path.display())
            }
            Self::FileTooLarge {
                source,
                limit,
                actual,
            } => {
                format!("error: file too large: {source} is {actual} bytes, limit is {limit} bytes")
            }
            Self::InvalidUtf8 {
                source,
                byte_offset,
            } => {
                format!(
                    "error: invalid UTF-8 in {source}: first invalid byte at offset {byte_offset}"
                )
            }
            Self::IoError { source, detail } => {
                format!("error: I/O error on {source}: {detail}")
            }
            Self::ParseFailed { source, detail } => {
                format!("error: cannot parse {source}: {detail}")
            }
            Self::GroundTruth { detail } => {
                format!("error: ground-truth extraction failed: {detail}")
            }
            Self::EmptyGraph { folder } => {
                format!(
                    "error: no nodes were loaded from {}; no schema was written",
                    folder.display()
                )
            }
            Self::OracleFailed { detail } => format!("error: {detail}"),
            Self::OracleResponseInvalid { detail } => format!("error: {detail}"),
        }
    }

    /// Maps a synthesis failure for the graph built from `folder`.
    pub fn from_synthesis(err: &SynthesisError, folder: PathBuf) -> Self {
        match err {
            SynthesisError::EmptyGraph => Self::EmptyGraph { folder },
            SynthesisError::Oracle(_) => Self::OracleFailed {
                detail: err.to_string(),
            },
            SynthesisError::Parse(_) => Self::OracleResponseInvalid {
                detail: err.to_string(),
            },
        }
    }

    /// Maps a schema parse failure for the input at `source`.
    pub fn from_schema_load(err: &SchemaLoadError, source: &str) -> Self {
        Self::ParseFailed {
            source: source.to_owned(),
            detail: err.to_string(),
        }
    }
}

impl From<ReferenceError> for CliError {
    fn from(err: ReferenceError) -> Self {
        match err {
            ReferenceError::FolderNotFound { path } => Self::FileNotFound { path },
            ReferenceError::MissingInput { .. }
            | ReferenceError::Io { .. }
            | ReferenceError::Json { .. }
            | ReferenceError::Csv { .. } => Self::GroundTruth {
                detail: err.to_string(),
            },
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for CliError {}
