#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod compare;
pub mod graph;
pub mod profile;
pub mod schema;
pub mod synthesize;
pub mod value;

pub use compare::{
    CompareConfig, EdgePropertyDetail, MatchSet, NodePropertyDetail, PropertyDiff, TypeMatch,
    compare, compare_with, name_similarity,
};
pub use graph::{
    EDGE_TYPE_KEY, EdgePass, EdgeWeight, ElementKind, GraphBuilder, INFERRED_NODE_TYPE,
    NODE_TYPE_KEY, NodeWeight, TypedGraph,
};
pub use profile::{
    ProfileConfig, PropertyProfile, TopologyEntry, TypeProfile, context_report, profile,
    profile_type,
};
pub use schema::{
    EdgeTypeDef, NodeTypeDef, PropertyDef, PropertyType, Schema, SchemaLoadError,
    TopologyConstraint,
};
pub use synthesize::{
    DeriveConfig, ExtractError, OracleError, SchemaOracle, Strategy, SynthesisError, build_prompt,
    derive_schema, extract_json, parse_schema, synthesize,
};
pub use value::{AttributeMap, ScalarKind, ScalarValue};

/// Returns the current version of the schemaprobe-core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
