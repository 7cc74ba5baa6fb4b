/// Command module for the `schemaprobe` CLI.
///
/// Each submodule implements one subcommand. The `run` function in each
/// module takes the parsed arguments and returns `Ok(())` on success or a
/// [`crate::error::CliError`] on failure.
pub mod compare;
pub mod discover;
pub mod extract_gt;
pub mod inspect;
pub mod profile;

use std::io::{StdoutLock, Write};
use std::path::Path;

use schemaprobe_core::TypedGraph;
use schemaprobe_csv::{BuildConfig, BuildReport, build_graph};

use crate::error::CliError;

/// Builds the graph for `folder` with default ingestion settings.
pub(crate) fn load_graph(folder: &Path) -> (TypedGraph, BuildReport) {
    build_graph(folder, &BuildConfig::default())
}

/// Runs `write` against a locked stdout and flushes it.
pub(crate) fn emit<F>(write: F) -> Result<(), CliError>
where
    F: FnOnce(&mut StdoutLock<'static>) -> std::io::Result<()>,
{
    let mut out = std::io::stdout().lock();
    write(&mut out)
        .and_then(|()| out.flush())
        .map_err(|e| CliError::IoError {
            source: "stdout".to_owned(),
            detail: e.to_string(),
        })
}

/// Writes `value` to stdout as pretty JSON followed by a newline.
pub(crate) fn emit_json<T: serde::Serialize>(value: &T) -> Result<(), CliError> {
    emit(|out| {
        serde_json::to_writer_pretty(&mut *out, value).map_err(std::io::Error::from)?;
        writeln!(out)
    })
}
