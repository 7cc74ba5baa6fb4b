/// Folder-to-graph ingestion.
///
/// [`build_graph`] never fails: a missing or empty folder yields an empty
/// graph with a [`BuildWarning`], and any file that cannot be read is skipped
/// and listed in [`BuildReport::skipped`].
///
/// # Two-pass build
///
/// 1. Every `*.csv` file is classified from its header.
/// 2. Node files are loaded, in file-name order.
/// 3. Edge files are loaded, in file-name order, against the complete node
///    set. Undeclared endpoints become `Inferred` placeholder nodes.
use std::fmt;
use std::path::{Path, PathBuf};

use schemaprobe_core::{EdgePass, GraphBuilder, TypedGraph};
use tracing::{debug, info, warn};

use crate::classify::{DEFAULT_TYPE_NAME_DECORATIONS, FileRole, classify_header, derive_type_name};
use crate::error::BuildError;
use crate::records::{identifier, read_header, read_rows, row_attributes};

/// Node id given to an edge endpoint whose cell is blank. Such endpoints all
/// share one `Inferred` placeholder.
pub const BLANK_ENDPOINT_ID: &str = "";

/// Settings for [`build_graph`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Substrings removed (ignoring ASCII case) from file stems to form type
    /// names.
    pub type_name_decorations: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            type_name_decorations: DEFAULT_TYPE_NAME_DECORATIONS
                .iter()
                .map(|s| (*s).to_owned())
                .collect(),
        }
    }
}

/// A file that contributed to the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFile {
    /// Path of the CSV file.
    pub path: PathBuf,
    /// Type name derived from the file name.
    pub type_name: String,
    /// Rows turned into nodes or edges.
    pub rows: usize,
    /// Rows with a blank identifier cell. Node rows are dropped; edge rows
    /// are kept and the blank endpoint resolves to [`BLANK_ENDPOINT_ID`].
    pub rows_without_id: usize,
}

/// A file left out of the graph because it could not be read.
#[derive(Debug)]
pub struct SkippedFile {
    /// Path of the CSV file.
    pub path: PathBuf,
    /// Why it was skipped.
    pub error: BuildError,
}

/// Non-fatal conditions about the input folder as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildWarning {
    /// The folder does not exist or is not a directory.
    FolderMissing(PathBuf),
    /// The folder holds no `*.csv` files.
    FolderEmpty(PathBuf),
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FolderMissing(p) => write!(f, "input folder does not exist: {}", p.display()),
            Self::FolderEmpty(p) => write!(f, "no CSV files found in {}", p.display()),
        }
    }
}

/// What happened while building a graph.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Node files loaded, in load order.
    pub node_files: Vec<LoadedFile>,
    /// Edge files loaded, in load order.
    pub edge_files: Vec<LoadedFile>,
    /// Files whose header matched neither role.
    pub unknown_files: Vec<PathBuf>,
    /// Files skipped because of read or parse errors.
    pub skipped: Vec<SkippedFile>,
    /// Folder-level warnings.
    pub warnings: Vec<BuildWarning>,
}

/// Builds a typed graph from every `*.csv` file directly inside `folder`.
pub fn build_graph(folder: &Path, config: &BuildConfig) -> (TypedGraph, BuildReport) {
    let mut report = BuildReport::default();
    info!(folder = %folder.display(), "building graph");

    let files = match list_csv_files(folder) {
        Ok(files) => files,
        Err(warning) => {
            warn!("{warning}");
            report.warnings.push(warning);
            return (GraphBuilder::new().into_edge_pass().finish(), report);
        }
    };

    let mut node_files = Vec::new();
    let mut edge_files = Vec::new();
    for path in files {
        match read_header(&path) {
            Ok(header) => match classify_header(&header) {
                FileRole::Node { id } => node_files.push((path, id)),
                FileRole::Edge { start, end } => edge_files.push((path, start, end)),
                FileRole::Unknown => {
                    debug!(file = %path.display(), "no node or edge columns, ignoring");
                    report.unknown_files.push(path);
                }
            },
            Err(error) => skip(&mut report, path, error),
        }
    }

    let mut nodes = GraphBuilder::new();
    for (path, id) in node_files {
        let type_name = derive_type_name(&path, config.type_name_decorations.as_slice());
        info!("processing nodes: {} -> '{type_name}'", display_name(&path));
        match load_nodes(&mut nodes, &path, id, &type_name) {
            Ok((rows, rows_without_id)) => report.node_files.push(LoadedFile {
                path,
                type_name,
                rows,
                rows_without_id,
            }),
            Err(error) => skip(&mut report, path, error),
        }
    }

    let mut edges = nodes.into_edge_pass();
    for (path, start, end) in edge_files {
        let type_name = derive_type_name(&path, config.type_name_decorations.as_slice());
        info!("processing edges: {} -> '{type_name}'", display_name(&path));
        match load_edges(&mut edges, &path, start, end, &type_name) {
            Ok((rows, rows_without_id)) => report.edge_files.push(LoadedFile {
                path,
                type_name,
                rows,
                rows_without_id,
            }),
            Err(error) => skip(&mut report, path, error),
        }
    }

    let graph = edges.finish();
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        skipped = report.skipped.len(),
        "graph built"
    );
    (graph, report)
}

fn list_csv_files(folder: &Path) -> Result<Vec<PathBuf>, BuildWarning> {
    let Ok(entries) = std::fs::read_dir(folder) else {
        return Err(BuildWarning::FolderMissing(folder.to_path_buf()));
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .filter(|p| {
            p.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
        })
        .collect();
    if files.is_empty() {
        return Err(BuildWarning::FolderEmpty(folder.to_path_buf()));
    }
    files.sort();
    Ok(files)
}

fn load_nodes(
    builder: &mut GraphBuilder,
    path: &Path,
    id: usize,
    type_name: &str,
) -> Result<(usize, usize), BuildError> {
    let (headers, rows) = read_rows(path)?;
    let mut loaded = 0;
    let mut missing = 0;
    for row in &rows {
        let Some(node_id) = identifier(row, id) else {
            missing += 1;
            continue;
        };
        builder.add_node(node_id, type_name, row_attributes(&headers, row, &[id]));
        loaded += 1;
    }
    if missing > 0 {
        warn!(file = %path.display(), rows = missing, "rows without an identifier were dropped");
    }
    Ok((loaded, missing))
}

fn load_edges(
    pass: &mut EdgePass,
    path: &Path,
    start: usize,
    end: usize,
    type_name: &str,
) -> Result<(usize, usize), BuildError> {
    let (headers, rows) = read_rows(path)?;
    let mut loaded = 0;
    let mut missing = 0;
    for row in &rows {
        let source = identifier(row, start);
        let target = identifier(row, end);
        if source.is_none() || target.is_none() {
            missing += 1;
        }
        pass.add_edge(
            source.unwrap_or(BLANK_ENDPOINT_ID),
            target.unwrap_or(BLANK_ENDPOINT_ID),
            type_name,
            row_attributes(&headers, row, &[start, end]),
        );
        loaded += 1;
    }
    if missing > 0 {
        warn!(file = %path.display(), rows = missing, "rows with a blank endpoint attached to a placeholder node");
    }
    Ok((loaded, missing))
}

fn skip(report: &mut BuildReport, path: PathBuf, error: BuildError) {
    warn!(file = %path.display(), "skipping file: {error}");
    report.skipped.push(SkippedFile { path, error });
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
