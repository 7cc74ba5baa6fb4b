use super::matching::{NameIndex, best_match, diff_properties};
use super::types::{
    CompareConfig, EdgePropertyDetail, MatchSet, NodePropertyDetail, TypeMatch,
};
use crate::schema::{EdgeTypeDef, NodeTypeDef, Schema};

/// Compares `candidate` against `reference` with the default configuration.
pub fn compare(reference: &Schema, candidate: &Schema) -> MatchSet {
    compare_with(reference, candidate, &CompareConfig::default())
}

/// Compares `candidate` against `reference`.
///
/// Every reference type is matched independently against all candidate types
/// of the same kind, so one candidate may satisfy several reference types.
pub fn compare_with(reference: &Schema, candidate: &Schema, config: &CompareConfig) -> MatchSet {
    let ref_nodes = NameIndex::build(&reference.node_types, NodeTypeDef::canonical_name);
    let cand_nodes = NameIndex::build(&candidate.node_types, NodeTypeDef::canonical_name);
    let ref_edges = NameIndex::build(&reference.edge_types, EdgeTypeDef::canonical_name);
    let cand_edges = NameIndex::build(&candidate.edge_types, EdgeTypeDef::canonical_name);

    let mut node_matches = Vec::new();
    let mut property_details = Vec::new();
    let mut missed_nodes = Vec::new();
    let mut total_properties = 0;
    let mut matched_properties = 0;

    for (gt_name, gt_def) in ref_nodes.iter() {
        let Some((inf_name, inf_def)) = resolve(gt_name, &cand_nodes, config) else {
            missed_nodes.push(gt_name.to_owned());
            continue;
        };
        let diff = diff_properties(&gt_def.properties, &inf_def.properties);
        total_properties += gt_def.properties.len();
        matched_properties += diff.correct.len();
        node_matches.push(TypeMatch {
            gt: gt_name.to_owned(),
            inferred: inf_name.to_owned(),
        });
        property_details.push(NodePropertyDetail {
            node: gt_name.to_owned(),
            diff,
        });
    }

    let mut edge_matches = Vec::new();
    let mut edge_property_details = Vec::new();
    let mut missed_edges = Vec::new();

    for (gt_name, gt_def) in ref_edges.iter() {
        let Some((inf_name, inf_def)) = resolve(gt_name, &cand_edges, config) else {
            missed_edges.push(gt_name.to_owned());
            continue;
        };
        edge_matches.push(TypeMatch {
            gt: gt_name.to_owned(),
            inferred: inf_name.to_owned(),
        });
        edge_property_details.push(EdgePropertyDetail {
            edge: gt_name.to_owned(),
            diff: diff_properties(&gt_def.properties, &inf_def.properties),
        });
    }

    MatchSet {
        accuracy: accuracy(matched_properties, total_properties),
        node_matches,
        edge_matches,
        property_details,
        edge_property_details,
        missed_nodes,
        missed_edges,
        total_properties,
        matched_properties,
    }
}

fn resolve<'a, T>(
    name: &str,
    candidates: &NameIndex<'a, T>,
    config: &CompareConfig,
) -> Option<(&'a str, &'a T)> {
    let matched = best_match(name, candidates.names(), config.threshold)?;
    candidates.get(matched).map(|def| (matched, def))
}

/// Percentage rounded to two decimals; `0.0` for an empty denominator.
fn accuracy(matched: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = matched as f64 / total as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accuracy_rounds_to_two_decimals() {
        assert!((accuracy(2, 3) - 66.67).abs() < 1e-9);
        assert!((accuracy(1, 3) - 33.33).abs() < 1e-9);
        assert!((accuracy(3, 3) - 100.0).abs() < 1e-9);
        assert!(accuracy(0, 0).abs() < f64::EPSILON);
    }
}
