/// Reference-schema extraction from strict ground-truth exports.
///
/// A ground-truth folder holds a database's own schema report:
///
/// | File | Content |
/// |---|---|
/// | `*_node_types_strict.json` | array of `{nodeType, nodeLabels, properties: [{name, types, mandatory}]}` (required) |
/// | `*_edge_types_strict.json` | array of `{relType, properties: [...]}` (required) |
/// | `*_edge_types.csv` | rows of `relType, sources, targets` with bracketed, comma-separated label lists (optional) |
///
/// When several files match a pattern, the first in name order is used.
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use schemaprobe_core::{EdgeTypeDef, NodeTypeDef, PropertyDef, PropertyType, Schema, TopologyConstraint};

use crate::error::ReferenceError;

const NODE_SUFFIX: &str = "_node_types_strict.json";
const EDGE_SUFFIX: &str = "_edge_types_strict.json";
const TOPOLOGY_SUFFIX: &str = "_edge_types.csv";

#[derive(Debug, Deserialize)]
struct StrictNodeType {
    #[serde(rename = "nodeType", default)]
    node_type: Option<String>,
    #[serde(rename = "nodeLabels", default)]
    node_labels: Vec<String>,
    #[serde(default)]
    properties: Vec<StrictProperty>,
}

#[derive(Debug, Deserialize)]
struct StrictEdgeType {
    #[serde(rename = "relType", default)]
    rel_type: Option<String>,
    #[serde(default)]
    properties: Vec<StrictProperty>,
}

#[derive(Debug, Deserialize)]
struct StrictProperty {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    types: Vec<String>,
    #[serde(default)]
    mandatory: bool,
}

impl StrictProperty {
    fn into_def(self) -> PropertyDef {
        let property_type = self
            .types
            .first()
            .map_or(PropertyType::Other("Unknown".to_owned()), |t| {
                PropertyType::from(t.as_str())
            });
        PropertyDef {
            name: self.name,
            property_type,
            mandatory: self.mandatory,
            extra: serde_json::Map::new(),
        }
    }
}

/// Removes a leading `:` and every backtick from an exported label.
pub fn clean_label(raw: &str) -> String {
    raw.trim_start_matches(':').replace('`', "")
}

/// Returns the dataset name of a ground-truth folder: the last component of
/// its resolved path.
pub fn dataset_name(folder: &Path) -> String {
    let resolved = folder
        .canonicalize()
        .unwrap_or_else(|_| folder.to_path_buf());
    resolved
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Returns the conventional output file name for a dataset's reference
/// schema.
pub fn reference_file_name(dataset: &str) -> String {
    format!("golden_truth_{dataset}.json")
}

/// Builds a reference [`Schema`] from a ground-truth folder.
///
/// The schema carries `dataset_name` as an extra top-level field. Node
/// entries carry `raw_type_string` (the cleaned `nodeType`). Edge properties
/// without a name are dropped.
///
/// # Errors
///
/// Returns [`ReferenceError::MissingInput`] when either strict JSON file is
/// absent, and I/O or parse errors for unreadable files.
pub fn extract_reference(folder: &Path) -> Result<Schema, ReferenceError> {
    if !folder.is_dir() {
        return Err(ReferenceError::FolderNotFound {
            path: folder.to_path_buf(),
        });
    }
    let files = sorted_files(folder)?;
    let node_file = find_required(&files, folder, NODE_SUFFIX)?;
    let edge_file = find_required(&files, folder, EDGE_SUFFIX)?;
    let topology_file = find(&files, TOPOLOGY_SUFFIX);

    info!(
        nodes = %node_file.display(),
        edges = %edge_file.display(),
        "extracting reference schema"
    );

    let node_types = read_json::<Vec<StrictNodeType>>(node_file)?
        .into_iter()
        .map(node_def)
        .collect();

    let mut edge_types = edge_defs(read_json::<Vec<StrictEdgeType>>(edge_file)?);
    if let Some(path) = topology_file {
        attach_topology(path, &mut edge_types)?;
    }

    let mut extra = serde_json::Map::new();
    extra.insert("dataset_name".to_owned(), Value::String(dataset_name(folder)));
    Ok(Schema {
        node_types,
        edge_types,
        extra,
    })
}

fn node_def(entry: StrictNodeType) -> NodeTypeDef {
    let mut extra = serde_json::Map::new();
    extra.insert(
        "raw_type_string".to_owned(),
        Value::String(clean_label(entry.node_type.as_deref().unwrap_or(""))),
    );
    NodeTypeDef {
        name: None,
        labels: entry.node_labels,
        properties: entry
            .properties
            .into_iter()
            .map(StrictProperty::into_def)
            .collect(),
        extra,
    }
}

/// Converts edge entries, keyed by cleaned relationship type. A repeated type
/// replaces the earlier entry in place.
fn edge_defs(entries: Vec<StrictEdgeType>) -> Vec<EdgeTypeDef> {
    let mut defs: Vec<EdgeTypeDef> = Vec::with_capacity(entries.len());
    let mut slots: HashMap<String, usize> = HashMap::new();
    for entry in entries {
        let rel_type = clean_label(entry.rel_type.as_deref().unwrap_or(""));
        let def = EdgeTypeDef {
            edge_type: Some(rel_type.clone()),
            name: None,
            properties: entry
                .properties
                .into_iter()
                .filter(|p| p.name.is_some())
                .map(StrictProperty::into_def)
                .collect(),
            topology: Vec::new(),
            extra: serde_json::Map::new(),
        };
        match slots.get(&rel_type) {
            Some(&slot) => defs[slot] = def,
            None => {
                slots.insert(rel_type, defs.len());
                defs.push(def);
            }
        }
    }
    defs
}

fn attach_topology(path: &Path, edge_types: &mut [EdgeTypeDef]) -> Result<(), ReferenceError> {
    let csv_err = |source| ReferenceError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(csv_err)?;
    let headers = reader.headers().map_err(csv_err)?.clone();
    let column = |name: &str| headers.iter().position(|h| h.trim_start_matches('\u{feff}') == name);
    let Some(rel_col) = column("relType") else {
        debug!(file = %path.display(), "topology file has no relType column");
        return Ok(());
    };
    let src_col = column("sources");
    let tgt_col = column("targets");

    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        let Some(rel_type) = record.get(rel_col).map(clean_label) else {
            continue;
        };
        let rel_type = rel_type.trim();
        let Some(def) = edge_types
            .iter_mut()
            .find(|d| d.edge_type.as_deref() == Some(rel_type))
        else {
            continue;
        };
        let list = |col: Option<usize>| {
            col.and_then(|c| record.get(c))
                .map(parse_label_list)
                .unwrap_or_default()
        };
        def.topology.push(TopologyConstraint {
            allowed_sources: list(src_col),
            allowed_targets: list(tgt_col),
        });
    }
    Ok(())
}

/// Parses `"[A, B]"` into `["A", "B"]`.
fn parse_label_list(raw: &str) -> Vec<String> {
    raw.trim()
        .trim_matches(|c| c == '[' || c == ']')
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

fn sorted_files(folder: &Path) -> Result<Vec<PathBuf>, ReferenceError> {
    let entries = std::fs::read_dir(folder).map_err(|source| ReferenceError::Io {
        path: folder.to_path_buf(),
        source,
    })?;
    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();
    files.sort();
    Ok(files)
}

fn find<'a>(files: &'a [PathBuf], suffix: &str) -> Option<&'a Path> {
    files
        .iter()
        .find(|p| {
            p.file_name()
                .is_some_and(|n| n.to_string_lossy().ends_with(suffix))
        })
        .map(PathBuf::as_path)
}

fn find_required<'a>(
    files: &'a [PathBuf],
    folder: &Path,
    suffix: &'static str,
) -> Result<&'a Path, ReferenceError> {
    find(files, suffix).ok_or_else(|| ReferenceError::MissingInput {
        folder: folder.to_path_buf(),
        suffix,
    })
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ReferenceError> {
    let text = std::fs::read_to_string(path).map_err(|source| ReferenceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let body = text.strip_prefix('\u{feff}').unwrap_or(&text);
    serde_json::from_str(body).map_err(|source| ReferenceError::Json {
        path: path.to_path_buf(),
        source,
    })
}
