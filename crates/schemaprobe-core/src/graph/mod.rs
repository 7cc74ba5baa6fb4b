/// Typed property graph built from tabular node and edge records.
///
/// Wraps a `petgraph` [`StableDiGraph`] whose node and edge weights carry a
/// type tag plus an open [`AttributeMap`]. Lookup tables give O(1) access to
/// nodes by identifier and to the members of each node or edge type.
///
/// # Two-Pass Construction
///
/// Graphs are assembled through [`GraphBuilder`], which enforces the ingestion
/// order in its types:
/// 1. **Node pass** ([`GraphBuilder::add_node`]): declared nodes are inserted
///    or merged by identifier.
/// 2. **Edge pass** ([`EdgePass::add_edge`]): reached through
///    [`GraphBuilder::into_edge_pass`]; endpoints are resolved against the
///    complete node set, and unknown endpoints become placeholder nodes typed
///    [`INFERRED_NODE_TYPE`].
///
/// [`EdgePass::finish`] yields an immutable [`TypedGraph`].
pub mod builder;

pub use builder::{EdgePass, GraphBuilder};

use std::collections::{BTreeMap, HashMap};

use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};

use crate::value::AttributeMap;

/// Type tag given to nodes synthesized for edge endpoints that no node file
/// declared.
pub const INFERRED_NODE_TYPE: &str = "Inferred";

/// Attribute key under which the node type tag is reported.
///
/// Attributes with this key are never treated as node properties.
pub const NODE_TYPE_KEY: &str = "node_type";

/// Attribute key under which the edge type tag is reported.
///
/// Attributes with this key are never treated as edge properties.
pub const EDGE_TYPE_KEY: &str = "type";

/// Weight stored on each petgraph node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeWeight {
    /// Unique node identifier (the stringified id column).
    pub id: String,
    /// Node type tag derived from the source file name.
    pub node_type: String,
    /// Row attributes, one entry per non-empty CSV cell.
    pub attributes: AttributeMap,
}

/// Weight stored on each petgraph edge.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeWeight {
    /// Edge type tag derived from the source file name.
    pub edge_type: String,
    /// Row attributes, one entry per non-empty CSV cell.
    pub attributes: AttributeMap,
}

/// Whether a type name refers to a node population or an edge population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A node type.
    Node,
    /// An edge type.
    Edge,
}

/// A directed property graph with typed nodes and edges.
///
/// Edges are unique per `(source, target, edge_type)`; a repeated triple
/// merges its attributes into the existing edge instead of adding a parallel
/// one. Edges of different types between the same pair coexist.
///
/// Construct with [`GraphBuilder`].
#[derive(Debug, Default)]
pub struct TypedGraph {
    graph: StableDiGraph<NodeWeight, EdgeWeight>,
    id_to_index: HashMap<String, NodeIndex>,
    edge_keys: HashMap<(NodeIndex, NodeIndex, String), EdgeIndex>,
    nodes_by_type: BTreeMap<String, Vec<NodeIndex>>,
    edges_by_type: BTreeMap<String, Vec<EdgeIndex>>,
}

impl TypedGraph {
    /// Returns the number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns `true` when the graph holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Looks up the [`NodeIndex`] for a node identifier.
    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.id_to_index.get(id).copied()
    }

    /// Returns the node with the given identifier.
    pub fn node_by_id(&self, id: &str) -> Option<&NodeWeight> {
        self.node_index(id).and_then(|idx| self.graph.node_weight(idx))
    }

    /// Returns the [`NodeWeight`] at `idx`.
    pub fn node(&self, idx: NodeIndex) -> Option<&NodeWeight> {
        self.graph.node_weight(idx)
    }

    /// Returns the [`EdgeWeight`] at `idx`.
    pub fn edge(&self, idx: EdgeIndex) -> Option<&EdgeWeight> {
        self.graph.edge_weight(idx)
    }

    /// Returns the source and target node weights of an edge.
    pub fn edge_endpoints(&self, idx: EdgeIndex) -> Option<(&NodeWeight, &NodeWeight)> {
        let (s, t) = self.graph.edge_endpoints(idx)?;
        Some((self.graph.node_weight(s)?, self.graph.node_weight(t)?))
    }

    /// Returns the edge of `edge_type` from `source` to `target`, if present.
    pub fn find_edge(&self, source: &str, target: &str, edge_type: &str) -> Option<&EdgeWeight> {
        let s = self.node_index(source)?;
        let t = self.node_index(target)?;
        let idx = self.edge_keys.get(&(s, t, edge_type.to_owned()))?;
        self.graph.edge_weight(*idx)
    }

    /// Returns a reference to the underlying [`StableDiGraph`].
    pub fn graph(&self) -> &StableDiGraph<NodeWeight, EdgeWeight> {
        &self.graph
    }

    /// Iterates over the distinct node type names in sorted order.
    pub fn node_types(&self) -> impl Iterator<Item = &str> {
        self.nodes_by_type.keys().map(String::as_str)
    }

    /// Iterates over the distinct edge type names in sorted order.
    pub fn edge_types(&self) -> impl Iterator<Item = &str> {
        self.edges_by_type.keys().map(String::as_str)
    }

    /// Returns the indices of all nodes of `node_type`, in insertion order.
    ///
    /// Returns an empty slice if no nodes of that type exist.
    pub fn nodes_of_type(&self, node_type: &str) -> &[NodeIndex] {
        self.nodes_by_type
            .get(node_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns the indices of all edges of `edge_type`, in insertion order.
    ///
    /// Returns an empty slice if no edges of that type exist.
    pub fn edges_of_type(&self, edge_type: &str) -> &[EdgeIndex] {
        self.edges_by_type
            .get(edge_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns the population size of a node or edge type.
    pub fn type_count(&self, type_name: &str, kind: ElementKind) -> usize {
        match kind {
            ElementKind::Node => self.nodes_of_type(type_name).len(),
            ElementKind::Edge => self.edges_of_type(type_name).len(),
        }
    }

    /// Returns the attribute map of every member of a type, in insertion order.
    pub fn attributes_of_type(&self, type_name: &str, kind: ElementKind) -> Vec<&AttributeMap> {
        match kind {
            ElementKind::Node => self
                .nodes_of_type(type_name)
                .iter()
                .filter_map(|&idx| self.graph.node_weight(idx))
                .map(|w| &w.attributes)
                .collect(),
            ElementKind::Edge => self
                .edges_of_type(type_name)
                .iter()
                .filter_map(|&idx| self.graph.edge_weight(idx))
                .map(|w| &w.attributes)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;
    use crate::value::ScalarValue;

    fn attrs(pairs: &[(&str, ScalarValue)]) -> AttributeMap {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.clone()))
            .collect()
    }

    /// An empty builder produces an empty graph.
    #[test]
    fn test_empty_builder_yields_empty_graph() {
        let g = GraphBuilder::new().into_edge_pass().finish();
        assert!(g.is_empty());
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.node_types().count(), 0);
    }

    /// Simple graph: counts and type indices line up.
    #[test]
    fn test_simple_graph_counts_and_type_index() {
        let mut b = GraphBuilder::new();
        b.add_node("1", "Neuron", AttributeMap::new());
        b.add_node("2", "Neuron", AttributeMap::new());
        b.add_node("s1", "Synapse", AttributeMap::new());
        let mut e = b.into_edge_pass();
        e.add_edge("1", "2", "ConnectsTo", AttributeMap::new());
        e.add_edge("1", "s1", "Contains", AttributeMap::new());
        let g = e.finish();

        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.nodes_of_type("Neuron").len(), 2);
        assert_eq!(g.nodes_of_type("Synapse").len(), 1);
        assert_eq!(g.edges_of_type("ConnectsTo").len(), 1);
        assert_eq!(
            g.node_types().collect::<Vec<_>>(),
            vec!["Neuron", "Synapse"]
        );
        assert_eq!(
            g.edge_types().collect::<Vec<_>>(),
            vec!["Contains", "ConnectsTo"]
        );
    }

    /// Unknown endpoints become `Inferred` placeholder nodes with no attributes.
    #[test]
    fn test_dangling_endpoints_become_inferred_nodes() {
        let mut b = GraphBuilder::new();
        b.add_node("1", "Neuron", AttributeMap::new());
        let mut e = b.into_edge_pass();
        e.add_edge("1", "ghost", "ConnectsTo", AttributeMap::new());
        e.add_edge("phantom", "ghost", "ConnectsTo", AttributeMap::new());
        let g = e.finish();

        assert_eq!(g.edge_count(), 2);
        for id in ["ghost", "phantom"] {
            let n = g.node_by_id(id).expect("placeholder must exist");
            assert_eq!(n.node_type, INFERRED_NODE_TYPE);
            assert!(n.attributes.is_empty());
        }
        assert_eq!(g.nodes_of_type(INFERRED_NODE_TYPE).len(), 2);
    }

    /// Re-declaring a node merges attributes with later values winning.
    #[test]
    fn test_redeclared_node_merges_attributes() {
        let mut b = GraphBuilder::new();
        b.add_node(
            "7",
            "Neuron",
            attrs(&[
                ("a", ScalarValue::Integer(1)),
                ("b", ScalarValue::from("x")),
            ]),
        );
        b.add_node(
            "7",
            "Neuron",
            attrs(&[
                ("b", ScalarValue::from("y")),
                ("c", ScalarValue::Boolean(true)),
            ]),
        );
        let g = b.into_edge_pass().finish();

        assert_eq!(g.node_count(), 1);
        let n = g.node_by_id("7").expect("node 7");
        assert_eq!(n.attributes.get("a"), Some(&ScalarValue::Integer(1)));
        assert_eq!(n.attributes.get("b"), Some(&ScalarValue::from("y")));
        assert_eq!(n.attributes.get("c"), Some(&ScalarValue::Boolean(true)));
        assert_eq!(g.nodes_of_type("Neuron").len(), 1);
    }

    /// A later file declaring the same id under a new type moves the node.
    #[test]
    fn test_redeclared_node_with_new_type_moves_type_index() {
        let mut b = GraphBuilder::new();
        b.add_node("1", "A", AttributeMap::new());
        b.add_node("2", "B", AttributeMap::new());
        b.add_node("1", "B", AttributeMap::new());
        let g = b.into_edge_pass().finish();

        assert!(g.nodes_of_type("A").is_empty());
        assert_eq!(g.node_types().collect::<Vec<_>>(), vec!["B"]);
        let ids: Vec<&str> = g
            .nodes_of_type("B")
            .iter()
            .map(|&i| g.node(i).expect("weight").id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "2"], "insertion order must be kept");
    }

    /// A node re-declared back under its first type is listed once.
    #[test]
    fn test_node_retyped_back_and_forth_is_listed_once() {
        let mut b = GraphBuilder::new();
        for id in ["1", "2", "3"] {
            b.add_node(id, "A", AttributeMap::new());
        }
        b.add_node("2", "B", AttributeMap::new());
        b.add_node("2", "A", AttributeMap::new());
        b.add_node("3", "B", AttributeMap::new());
        let g = b.into_edge_pass().finish();

        fn ids<'g>(g: &'g TypedGraph, t: &str) -> Vec<&'g str> {
            g.nodes_of_type(t)
                .iter()
                .map(|&i| g.node(i).expect("weight").id.as_str())
                .collect()
        }
        assert_eq!(ids(&g, "A"), vec!["1", "2"]);
        assert_eq!(ids(&g, "B"), vec!["3"]);
        assert_eq!(g.type_count("A", ElementKind::Node), 2);
    }

    /// Same-type edges between the same pair collapse; other types coexist.
    #[test]
    fn test_parallel_edges_collapse_per_type() {
        let mut b = GraphBuilder::new();
        b.add_node("1", "N", AttributeMap::new());
        b.add_node("2", "N", AttributeMap::new());
        let mut e = b.into_edge_pass();
        e.add_edge("1", "2", "R", attrs(&[("w", ScalarValue::Integer(1))]));
        e.add_edge("1", "2", "R", attrs(&[("w", ScalarValue::Integer(5))]));
        e.add_edge("1", "2", "S", AttributeMap::new());
        let g = e.finish();

        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.edges_of_type("R").len(), 1);
        let r = g.find_edge("1", "2", "R").expect("R edge");
        assert_eq!(r.attributes.get("w"), Some(&ScalarValue::Integer(5)));
        assert!(g.find_edge("1", "2", "S").is_some());
        assert!(g.find_edge("2", "1", "R").is_none());
    }

    /// Endpoint lookups resolve to the right node types.
    #[test]
    fn test_edge_endpoints_resolve_node_types() {
        let mut b = GraphBuilder::new();
        b.add_node("n", "Neuron", AttributeMap::new());
        b.add_node("s", "SynapseSet", AttributeMap::new());
        let mut e = b.into_edge_pass();
        let idx = e.add_edge("n", "s", "Contains", AttributeMap::new());
        let g = e.finish();

        let (src, tgt) = g.edge_endpoints(idx).expect("endpoints");
        assert_eq!(src.node_type, "Neuron");
        assert_eq!(tgt.node_type, "SynapseSet");
    }

    /// `attributes_of_type` returns one map per member.
    #[test]
    fn test_attributes_of_type_per_kind() {
        let mut b = GraphBuilder::new();
        b.add_node("1", "N", attrs(&[("p", ScalarValue::Integer(1))]));
        b.add_node("2", "N", AttributeMap::new());
        let mut e = b.into_edge_pass();
        e.add_edge("1", "2", "R", attrs(&[("w", ScalarValue::Float(0.5))]));
        let g = e.finish();

        assert_eq!(g.attributes_of_type("N", ElementKind::Node).len(), 2);
        assert_eq!(g.attributes_of_type("R", ElementKind::Edge).len(), 1);
        assert_eq!(g.type_count("N", ElementKind::Node), 2);
        assert_eq!(g.type_count("missing", ElementKind::Edge), 0);
    }
}
