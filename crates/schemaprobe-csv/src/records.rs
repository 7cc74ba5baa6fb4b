/// Shared helpers for reading CSV files into attribute rows.
use std::fs::File;
use std::path::Path;

use csv::{Reader, ReaderBuilder, StringRecord};
use schemaprobe_core::{AttributeMap, ScalarValue};

use crate::error::BuildError;

/// Opens `path` as a headered CSV reader.
pub(crate) fn open(path: &Path) -> Result<Reader<File>, BuildError> {
    ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| BuildError::from_csv(path.to_path_buf(), e))
}

/// Reads only the header row of `path`.
pub(crate) fn read_header(path: &Path) -> Result<Vec<String>, BuildError> {
    let mut reader = open(path)?;
    let headers = reader
        .headers()
        .map_err(|e| BuildError::from_csv(path.to_path_buf(), e))?;
    Ok(headers.iter().map(str::to_owned).collect())
}

/// Reads every data row of `path`.
///
/// The whole file is read before anything is returned, so a malformed row
/// anywhere fails the file as a unit.
pub(crate) fn read_rows(path: &Path) -> Result<(Vec<String>, Vec<StringRecord>), BuildError> {
    let mut reader = open(path)?;
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| BuildError::from_csv(path.to_path_buf(), e))?
        .iter()
        .map(str::to_owned)
        .collect();
    let rows = reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| BuildError::from_csv(path.to_path_buf(), e))?;
    Ok((headers, rows))
}

/// Converts one row into attributes.
///
/// Columns listed in `identifier_columns` are kept verbatim as strings; other
/// cells are parsed with [`ScalarValue::parse_cell`] and empty cells are
/// dropped.
pub(crate) fn row_attributes(
    headers: &[String],
    row: &StringRecord,
    identifier_columns: &[usize],
) -> AttributeMap {
    let mut attrs = AttributeMap::new();
    for (idx, (name, cell)) in headers.iter().zip(row.iter()).enumerate() {
        let value = if identifier_columns.contains(&idx) {
            Some(ScalarValue::String(cell.trim().to_owned())).filter(|v| v.as_str() != Some(""))
        } else {
            ScalarValue::parse_cell(cell)
        };
        if let Some(value) = value {
            attrs.insert(name.clone(), value);
        }
    }
    attrs
}

/// Returns the trimmed cell at `idx`, or `None` when absent or blank.
pub(crate) fn identifier(row: &StringRecord, idx: usize) -> Option<&str> {
    row.get(idx).map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn identifier_columns_stay_strings() {
        let h = headers(&[":ID(Neuron)", "size", "status"]);
        let row = StringRecord::from(vec!["42", "17", ""]);
        let attrs = row_attributes(&h, &row, &[0]);

        assert_eq!(attrs.get(":ID(Neuron)"), Some(&ScalarValue::from("42")));
        assert_eq!(attrs.get("size"), Some(&ScalarValue::Integer(17)));
        assert!(!attrs.contains_key("status"), "empty cells are absent");
    }

    #[test]
    fn blank_identifiers_are_missing() {
        let row = StringRecord::from(vec!["  ", "7"]);
        assert_eq!(identifier(&row, 0), None);
        assert_eq!(identifier(&row, 1), Some("7"));
        assert_eq!(identifier(&row, 5), None);
    }
}
