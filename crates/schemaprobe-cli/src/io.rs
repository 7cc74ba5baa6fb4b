/// File reading with size enforcement, and whole-document JSON writes.
///
/// `schemaprobe-core` never touches the filesystem; schema documents are read
/// and written here.
///
/// Key behaviours:
/// - Size checked via `std::fs::metadata` before any read.
/// - UTF-8 validation with byte-offset reporting.
/// - Outputs are serialized in full before the target file is created, so a
///   failed run never leaves a partial document behind.
/// - All I/O errors are converted to [`CliError`] variants with exit code 2.
use std::io::ErrorKind;
use std::path::Path;

use schemaprobe_core::Schema;
use serde::Serialize;

use crate::error::CliError;

/// Reads the entire contents of `path` into a `String`.
///
/// # Errors
///
/// Returns [`CliError`] (exit code 2) for a missing or unreadable file, a
/// file larger than `max_size`, or invalid UTF-8.
pub fn read_input(path: &Path, max_size: u64) -> Result<String, CliError> {
    let file_size = std::fs::metadata(path)
        .map_err(|e| io_error_to_cli(&e, path))?
        .len();
    if file_size > max_size {
        return Err(CliError::FileTooLarge {
            source: path.display().to_string(),
            limit: max_size,
            actual: file_size,
        });
    }

    let bytes = std::fs::read(path).map_err(|e| io_error_to_cli(&e, path))?;
    String::from_utf8(bytes).map_err(|e| CliError::InvalidUtf8 {
        source: path.display().to_string(),
        byte_offset: e.utf8_error().valid_up_to(),
    })
}

/// Reads and parses a schema document.
///
/// # Errors
///
/// Returns the errors of [`read_input`], or [`CliError::ParseFailed`] when
/// the document is not a schema.
pub fn read_schema(path: &Path, max_size: u64) -> Result<Schema, CliError> {
    let content = read_input(path, max_size)?;
    Schema::from_json(&content)
        .map_err(|e| CliError::from_schema_load(&e, &path.display().to_string()))
}

/// Serializes `value` as pretty JSON and writes it to `path`, creating the
/// parent directory if needed.
///
/// # Errors
///
/// Returns [`CliError::IoError`] or [`CliError::PermissionDenied`] when the
/// file cannot be written.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), CliError> {
    let mut body = serde_json::to_string_pretty(value).map_err(|e| CliError::IoError {
        source: path.display().to_string(),
        detail: e.to_string(),
    })?;
    body.push('\n');

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_error_to_cli(&e, parent))?;
    }
    std::fs::write(path, body).map_err(|e| io_error_to_cli(&e, path))
}

fn io_error_to_cli(e: &std::io::Error, path: &Path) -> CliError {
    if e.kind() == ErrorKind::NotFound {
        return CliError::FileNotFound {
            path: path.to_path_buf(),
        };
    }
    if e.kind() == ErrorKind::PermissionDenied {
        return CliError::PermissionDenied {
            path: path.to_path_buf(),
        };
    }
    CliError::IoError {
        source: path.display().to_string(),
        detail: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = read_input(&dir.path().join("absent.json"), 1024).expect_err("missing");
        assert!(matches!(err, CliError::FileNotFound { .. }));
    }

    #[test]
    fn oversized_file_is_rejected_before_reading() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("big.json");
        std::fs::write(&path, "x".repeat(64)).expect("write");
        let err = read_input(&path, 16).expect_err("too large");
        assert!(matches!(
            err,
            CliError::FileTooLarge {
                limit: 16,
                actual: 64,
                ..
            }
        ));
    }

    #[test]
    fn invalid_utf8_reports_offset() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bad.json");
        std::fs::write(&path, [b'{', b'a', 0xFF, b'}']).expect("write");
        let err = read_input(&path, 1024).expect_err("bad utf-8");
        assert!(matches!(err, CliError::InvalidUtf8 { byte_offset: 2, .. }));
    }

    #[test]
    fn schema_parse_errors_are_input_failures() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("schema.json");
        std::fs::write(&path, "not json").expect("write");
        let err = read_schema(&path, 1024).expect_err("parse");
        assert!(matches!(err, CliError::ParseFailed { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn write_json_creates_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested/out/schema.json");
        write_json(&path, &Schema::default()).expect("write");

        let back = read_schema(&path, 1024).expect("read back");
        assert_eq!(back, Schema::default());
    }
}
