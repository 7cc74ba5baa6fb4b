/// CSV folder ingestion and ground-truth extraction for schemaprobe.
///
/// Turns a folder of graph-database CSV exports into a
/// [`schemaprobe_core::TypedGraph`], and a folder of strict schema exports
/// into a reference [`schemaprobe_core::Schema`].
///
/// # File roles
///
/// | Header contains | Role | Type name |
/// |---|---|---|
/// | `:START_ID`/`source` and `:END_ID`/`target` | edge file | file stem, decorations removed |
/// | `:ID` (or `id` without a start column) | node file | file stem, decorations removed |
/// | neither | ignored | |
///
/// # Two-pass build
///
/// All node files are loaded before any edge file, so an edge that names a
/// node declared in a later file still finds it. Endpoints declared nowhere
/// become `Inferred` placeholder nodes.
///
/// Per-file failures never abort a build; they are collected in
/// [`BuildReport`].
mod builder;
mod classify;
pub mod error;
mod records;
mod reference;

pub use builder::{
    BLANK_ENDPOINT_ID, BuildConfig, BuildReport, BuildWarning, LoadedFile, SkippedFile, build_graph,
};
pub use classify::{DEFAULT_TYPE_NAME_DECORATIONS, FileRole, classify_header, derive_type_name};
pub use error::{BuildError, ReferenceError};
pub use reference::{clean_label, dataset_name, extract_reference, reference_file_name};
