use serde::{Deserialize, Serialize};

/// Settings for [`super::compare`].
#[derive(Debug, Clone, PartialEq)]
pub struct CompareConfig {
    /// Similarity a candidate name must strictly exceed to match.
    pub threshold: f64,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self { threshold: 0.8 }
    }
}

/// A reference type paired with the candidate type it matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMatch {
    /// Canonical name in the reference schema.
    pub gt: String,
    /// Canonical name in the candidate schema.
    pub inferred: String,
}

/// Property-name partition for one matched pair. Each list is sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDiff {
    /// Names on both sides.
    pub correct: Vec<String>,
    /// Names only in the reference.
    pub missing: Vec<String>,
    /// Names only in the candidate.
    pub extra: Vec<String>,
}

/// Property partition of a matched node type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodePropertyDetail {
    /// Reference node type name.
    pub node: String,
    /// The partition.
    #[serde(flatten)]
    pub diff: PropertyDiff,
}

/// Property partition of a matched edge type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgePropertyDetail {
    /// Reference edge type name.
    pub edge: String,
    /// The partition.
    #[serde(flatten)]
    pub diff: PropertyDiff,
}

/// Result of comparing a candidate schema against a reference schema.
///
/// `accuracy` covers node types only; edge property partitions are reported
/// in `edge_property_details` but never enter the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSet {
    /// `matched_properties / total_properties * 100`, two decimals; `0.0`
    /// when `total_properties` is zero.
    pub accuracy: f64,
    /// Matched node types, in reference order.
    pub node_matches: Vec<TypeMatch>,
    /// Matched edge types, in reference order.
    pub edge_matches: Vec<TypeMatch>,
    /// One partition per node match.
    pub property_details: Vec<NodePropertyDetail>,
    /// One partition per edge match.
    #[serde(default)]
    pub edge_property_details: Vec<EdgePropertyDetail>,
    /// Reference node types with no candidate above the threshold.
    #[serde(default)]
    pub missed_nodes: Vec<String>,
    /// Reference edge types with no candidate above the threshold.
    #[serde(default)]
    pub missed_edges: Vec<String>,
    /// Reference property count summed over matched node types.
    pub total_properties: usize,
    /// Correct property count summed over matched node types.
    pub matched_properties: usize,
}
