/// Deterministic schema derivation straight from graph structure.
///
/// For every node and edge type the first member is taken as representative.
/// Each of its attribute keys becomes a property whose type follows the
/// runtime value kind, and which is mandatory when at least
/// [`DeriveConfig::mandatory_ratio`] of the type's population carries it.
/// With the default ratio, 9 carriers out of 10 is mandatory and 8 is not.
use crate::graph::{EDGE_TYPE_KEY, ElementKind, NODE_TYPE_KEY, TypedGraph};
use crate::schema::{EdgeTypeDef, NodeTypeDef, PropertyDef, PropertyType, Schema};
use crate::value::AttributeMap;

/// Settings for [`derive_schema`].
#[derive(Debug, Clone, PartialEq)]
pub struct DeriveConfig {
    /// Presence ratio a property must reach to be mandatory.
    pub mandatory_ratio: f64,
}

impl Default for DeriveConfig {
    fn default() -> Self {
        Self {
            mandatory_ratio: 0.9,
        }
    }
}

/// Derives a schema from the observed node and edge types of `graph`.
///
/// Types are emitted in name order. Placeholder `Inferred` nodes form a type
/// like any other.
pub fn derive_schema(graph: &TypedGraph, config: &DeriveConfig) -> Schema {
    let node_types = graph
        .node_types()
        .map(|name| {
            let members = graph.attributes_of_type(name, ElementKind::Node);
            NodeTypeDef {
                name: Some(name.to_owned()),
                labels: vec![name.to_owned()],
                properties: derive_properties(&members, NODE_TYPE_KEY, config),
                extra: serde_json::Map::new(),
            }
        })
        .collect();

    let edge_types = graph
        .edge_types()
        .map(|name| {
            let members = graph.attributes_of_type(name, ElementKind::Edge);
            EdgeTypeDef {
                edge_type: Some(name.to_owned()),
                name: Some(name.to_owned()),
                properties: derive_properties(&members, EDGE_TYPE_KEY, config),
                topology: Vec::new(),
                extra: serde_json::Map::new(),
            }
        })
        .collect();

    Schema {
        node_types,
        edge_types,
        extra: serde_json::Map::new(),
    }
}

fn derive_properties(
    members: &[&AttributeMap],
    reserved: &str,
    config: &DeriveConfig,
) -> Vec<PropertyDef> {
    let Some(representative) = members.first() else {
        return Vec::new();
    };
    let population = members.len() as f64;

    representative
        .iter()
        .filter(|(key, _)| key.as_str() != reserved)
        .map(|(key, value)| {
            let carriers = members.iter().filter(|m| m.contains_key(key)).count();
            let mandatory = carriers as f64 / population >= config.mandatory_ratio;
            PropertyDef::new(key.clone(), PropertyType::from(value.kind()), mandatory)
        })
        .collect()
}
