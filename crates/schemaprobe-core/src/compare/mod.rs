/// Fuzzy comparison of a candidate schema against a reference schema.
///
/// # Type matching
///
/// Each schema is indexed by canonical type name ([`NodeTypeDef::canonical_name`],
/// [`EdgeTypeDef::canonical_name`]); duplicate names keep the last entry. For
/// every reference name the candidate with the highest
/// [`name_similarity`] strictly above [`CompareConfig::threshold`] is chosen.
/// Reference types with no such candidate are reported as missed. Candidates
/// are not reserved once matched. Node and edge types are matched separately.
///
/// # Property comparison
///
/// Within a matched pair, property names are compared as exact,
/// case-sensitive sets and partitioned into `correct`, `missing` and `extra`.
///
/// # Accuracy
///
/// `accuracy` is the number of correct node properties over the number of
/// reference node properties, summed across matched node types. Edge
/// partitions are reported but do not contribute.
///
/// [`NodeTypeDef::canonical_name`]: crate::schema::NodeTypeDef::canonical_name
/// [`EdgeTypeDef::canonical_name`]: crate::schema::EdgeTypeDef::canonical_name
pub mod engine;
pub mod similarity;
pub mod types;

mod matching;


pub use engine::{compare, compare_with};
pub use similarity::name_similarity;
pub use types::{
    CompareConfig, EdgePropertyDetail, MatchSet, NodePropertyDetail, PropertyDiff, TypeMatch,
};
