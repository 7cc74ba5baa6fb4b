/// Header-based role detection and file-name type naming.
///
/// A CSV file is classified from its header row alone:
///
/// | Role | Rule |
/// |---|---|
/// | edge | a column containing `:START_ID` or `source` (any case) **and** a column containing `:END_ID` or `target` (any case) |
/// | node | otherwise, a column containing `:ID`, or containing `id` (any case) when no start column exists |
/// | unknown | everything else |
///
/// Edge detection wins over node detection: relationship exports often carry
/// an incidental id column.
use std::path::Path;

/// The role a CSV file plays in graph construction, with the columns that
/// carry identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileRole {
    /// One node per row.
    Node {
        /// Index of the identifier column.
        id: usize,
    },
    /// One edge per row.
    Edge {
        /// Index of the source identifier column.
        start: usize,
        /// Index of the target identifier column.
        end: usize,
    },
    /// Not part of the graph.
    Unknown,
}

impl FileRole {
    /// Short lowercase role name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Node { .. } => "node",
            Self::Edge { .. } => "edge",
            Self::Unknown => "unknown",
        }
    }
}

/// Classifies a header row.
pub fn classify_header<S: AsRef<str>>(columns: &[S]) -> FileRole {
    let position = |pred: &dyn Fn(&str) -> bool| columns.iter().position(|c| pred(c.as_ref()));

    let start = position(&|c| c.contains(":START_ID") || c.to_lowercase().contains("source"));
    let end = position(&|c| c.contains(":END_ID") || c.to_lowercase().contains("target"));
    if let (Some(start), Some(end)) = (start, end) {
        return FileRole::Edge { start, end };
    }

    let id = position(&|c| c.contains(":ID") || (start.is_none() && c.to_lowercase().contains("id")));
    match id {
        Some(id) => FileRole::Node { id },
        None => FileRole::Unknown,
    }
}

/// Decorations removed from file stems by default.
pub const DEFAULT_TYPE_NAME_DECORATIONS: [&str; 4] = ["Neuprint_", "_fib25", "_hemibrain", "_strict"];

/// Derives a type name from a file path.
///
/// Takes the file stem and removes every occurrence of each decoration,
/// ignoring ASCII case, in the order given.
pub fn derive_type_name<S: AsRef<str>>(path: &Path, decorations: &[S]) -> String {
    let mut name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    for decoration in decorations {
        name = strip_all_ignore_case(&name, decoration.as_ref());
    }
    name
}

fn strip_all_ignore_case(haystack: &str, needle: &str) -> String {
    if needle.is_empty() {
        return haystack.to_owned();
    }
    let lower_hay = haystack.to_ascii_lowercase();
    let lower_needle = needle.to_ascii_lowercase();
    let mut out = String::with_capacity(haystack.len());
    let mut cursor = 0;
    while let Some(offset) = lower_hay[cursor..].find(&lower_needle) {
        let at = cursor + offset;
        out.push_str(&haystack[cursor..at]);
        cursor = at + needle.len();
    }
    out.push_str(&haystack[cursor..]);
    out
}
