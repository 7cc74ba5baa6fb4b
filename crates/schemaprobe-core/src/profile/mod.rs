/// Per-type population statistics over a [`TypedGraph`].
///
/// A [`TypeProfile`] summarises one node or edge type: its population size,
/// the properties observed on it with presence counts, a scalar kind and a
/// few example values, and for edge types the most frequent
/// `source type -> target type` pairings.
///
/// Profiles are bounded so that very large graphs stay cheap to describe:
///
/// - Node types: attribute keys are collected from a uniform random sample of
///   at most [`ProfileConfig::node_sample_limit`] members; presence and
///   examples are then computed over the full population.
/// - Edge types: the topology histogram covers the first
///   [`ProfileConfig::topology_window`] edges, and attribute keys come from
///   the first [`ProfileConfig::edge_key_window`] edges.
///
/// A property's kind is the kind of its first observed value. Columns with
/// mixed representations report only that first kind.
///
/// Rendering to the text consumed by the synthesis prompt lives in
/// [`report`].
pub mod report;


pub use report::{context_report, profile};

use std::collections::{BTreeSet, HashMap};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::graph::{EDGE_TYPE_KEY, ElementKind, NODE_TYPE_KEY, TypedGraph};
use crate::value::{AttributeMap, ScalarKind};

/// Sampling bounds for profiling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileConfig {
    /// Maximum number of nodes sampled to discover attribute keys.
    pub node_sample_limit: usize,
    /// Number of leading occurrences inspected for example values.
    pub example_window: usize,
    /// Maximum number of distinct example values kept per property.
    pub example_limit: usize,
    /// Number of leading edges inspected for the topology histogram.
    pub topology_window: usize,
    /// Number of most frequent topology pairs kept.
    pub topology_limit: usize,
    /// Number of leading edges inspected to discover attribute keys.
    pub edge_key_window: usize,
    /// Seed for the node sample. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            node_sample_limit: 1000,
            example_window: 20,
            example_limit: 5,
            topology_window: 50,
            topology_limit: 5,
            edge_key_window: 100,
            seed: None,
        }
    }
}

impl ProfileConfig {
    /// Builds the random source for one profiling run.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Statistics for one property of one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyProfile {
    /// Attribute key.
    pub name: String,
    /// Kind of the first observed value.
    pub kind: ScalarKind,
    /// Number of members carrying the key.
    pub present: usize,
    /// Distinct stringified values, in first-seen order.
    pub examples: Vec<String>,
}

/// One `(source type, target type)` pairing and how often it was seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopologyEntry {
    /// Node type at the edge source.
    pub source_type: String,
    /// Node type at the edge target.
    pub target_type: String,
    /// Occurrences within the inspected window.
    pub count: usize,
}

/// Statistics for one node or edge type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeProfile {
    /// Type name.
    pub type_name: String,
    /// Whether this is a node or edge type.
    pub kind: ElementKind,
    /// Population size.
    pub count: usize,
    /// Observed properties, sorted by name.
    pub properties: Vec<PropertyProfile>,
    /// Most frequent endpoint pairings, highest first. Empty for node types.
    pub topology: Vec<TopologyEntry>,
}

impl PropertyProfile {
    /// Fraction of the population carrying this property.
    pub fn presence_ratio(&self, count: usize) -> f64 {
        if count == 0 {
            0.0
        } else {
            self.present as f64 / count as f64
        }
    }
}

/// Computes the profile of `type_name`, or `None` if the type has no members.
pub fn profile_type(
    graph: &TypedGraph,
    type_name: &str,
    kind: ElementKind,
    config: &ProfileConfig,
    rng: &mut StdRng,
) -> Option<TypeProfile> {
    let members = graph.attributes_of_type(type_name, kind);
    if members.is_empty() {
        return None;
    }

    let (keys, topology) = match kind {
        ElementKind::Node => {
            let sample: Vec<&&AttributeMap> = if members.len() <= config.node_sample_limit {
                members.iter().collect()
            } else {
                members
                    .choose_multiple(rng, config.node_sample_limit)
                    .collect()
            };
            (
                collect_keys(sample.into_iter().copied(), NODE_TYPE_KEY),
                Vec::new(),
            )
        }
        ElementKind::Edge => (
            collect_keys(
                members.iter().take(config.edge_key_window).copied(),
                EDGE_TYPE_KEY,
            ),
            edge_topology(graph, type_name, config),
        ),
    };

    let properties = keys
        .into_iter()
        .filter_map(|key| property_profile(&members, key, config))
        .collect();

    Some(TypeProfile {
        type_name: type_name.to_owned(),
        kind,
        count: members.len(),
        properties,
        topology,
    })
}

fn collect_keys<'a>(
    sample: impl Iterator<Item = &'a AttributeMap>,
    reserved: &str,
) -> BTreeSet<&'a str> {
    let mut keys = BTreeSet::new();
    for attrs in sample {
        keys.extend(attrs.keys().map(String::as_str));
    }
    keys.remove(reserved);
    keys
}

fn property_profile(
    members: &[&AttributeMap],
    key: &str,
    config: &ProfileConfig,
) -> Option<PropertyProfile> {
    let mut values = members.iter().filter_map(|attrs| attrs.get(key));
    let first = values.next()?;

    let mut present = 1;
    let mut examples = vec![first.to_string()];
    let mut window = 1;
    for value in values {
        present += 1;
        if window < config.example_window {
            window += 1;
            let text = value.to_string();
            if !examples.contains(&text) {
                examples.push(text);
            }
        }
    }
    examples.truncate(config.example_limit);

    Some(PropertyProfile {
        name: key.to_owned(),
        kind: first.kind(),
        present,
        examples,
    })
}

fn edge_topology(graph: &TypedGraph, type_name: &str, config: &ProfileConfig) -> Vec<TopologyEntry> {
    let mut order: Vec<TopologyEntry> = Vec::new();
    let mut slots: HashMap<(String, String), usize> = HashMap::new();

    for &idx in graph
        .edges_of_type(type_name)
        .iter()
        .take(config.topology_window)
    {
        let Some((src, tgt)) = graph.edge_endpoints(idx) else {
            continue;
        };
        let key = (src.node_type.clone(), tgt.node_type.clone());
        match slots.get(&key) {
            Some(&slot) => order[slot].count += 1,
            None => {
                slots.insert(key.clone(), order.len());
                order.push(TopologyEntry {
                    source_type: key.0,
                    target_type: key.1,
                    count: 1,
                });
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts.
    order.sort_by(|a, b| b.count.cmp(&a.count));
    order.truncate(config.topology_limit);
    order
}
