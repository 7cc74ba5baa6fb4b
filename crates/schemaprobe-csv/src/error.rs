/// Errors produced while reading CSV folders and ground-truth exports.
use std::path::PathBuf;

/// Failure to ingest one CSV file.
///
/// The graph builder never propagates these: the affected file is skipped
/// and the error is recorded in [`crate::BuildReport::skipped`].
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The file could not be opened or read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not well-formed CSV (bad quoting, ragged rows, bad UTF-8).
    #[error("malformed CSV in {}: {source}", path.display())]
    Csv {
        /// File being parsed.
        path: PathBuf,
        /// Underlying parser error.
        #[source]
        source: csv::Error,
    },
}

impl BuildError {
    /// Wraps a `csv` error, unwrapping plain I/O failures into [`BuildError::Io`].
    pub(crate) fn from_csv(path: PathBuf, err: csv::Error) -> Self {
        if !err.is_io_error() {
            return Self::Csv { path, source: err };
        }
        let kind = err.into_kind();
        let source = if let csv::ErrorKind::Io(source) = kind {
            source
        } else {
            std::io::Error::other(format!("{kind:?}"))
        };
        Self::Io { path, source }
    }
}

/// Failure to extract a reference schema from a ground-truth export folder.
#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    /// The folder does not exist or is not a directory.
    #[error("ground-truth folder not found: {}", path.display())]
    FolderNotFound {
        /// Folder that was searched.
        path: PathBuf,
    },

    /// A required export file is absent from the folder.
    #[error("no file matching *{suffix} in {}", folder.display())]
    MissingInput {
        /// Folder that was searched.
        folder: PathBuf,
        /// Required file name suffix.
        suffix: &'static str,
    },

    /// An export file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A strict JSON export is not valid JSON or has an unexpected shape.
    #[error("invalid ground-truth JSON in {}: {source}", path.display())]
    Json {
        /// File being parsed.
        path: PathBuf,
        /// Underlying parser error.
        #[source]
        source: serde_json::Error,
    },

    /// The topology CSV is malformed.
    #[error("invalid topology CSV in {}: {source}", path.display())]
    Csv {
        /// File being parsed.
        path: PathBuf,
        /// Underlying parser error.
        #[source]
        source: csv::Error,
    },
}
