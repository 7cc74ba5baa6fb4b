/// Two-phase construction of a [`TypedGraph`].
///
/// [`GraphBuilder`] accepts nodes only. Converting it into an [`EdgePass`]
/// freezes the declared node set, so every endpoint lookup during the edge
/// pass sees the complete set of node files.
use petgraph::stable_graph::{EdgeIndex, NodeIndex};

use super::{EdgeWeight, INFERRED_NODE_TYPE, NodeWeight, TypedGraph};
use crate::value::AttributeMap;

/// Node pass of graph construction.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    inner: TypedGraph,
    /// Set once a node changed type; its old bucket entry is then stale.
    stale_buckets: bool,
}

impl GraphBuilder {
    /// Creates a builder for an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node or merges into an existing node with the same `id`.
    ///
    /// Merging keeps earlier attributes and overwrites them key by key with
    /// `attributes`. The node type is replaced by `node_type`.
    pub fn add_node(&mut self, id: &str, node_type: &str, attributes: AttributeMap) -> NodeIndex {
        let g = &mut self.inner;
        if let Some(&idx) = g.id_to_index.get(id) {
            let mut previous_type = None;
            if let Some(weight) = g.graph.node_weight_mut(idx) {
                weight.attributes.extend(attributes);
                if weight.node_type != node_type {
                    previous_type = Some(std::mem::replace(
                        &mut weight.node_type,
                        node_type.to_owned(),
                    ));
                }
            }
            if previous_type.is_some() {
                g.nodes_by_type
                    .entry(node_type.to_owned())
                    .or_default()
                    .push(idx);
                self.stale_buckets = true;
            }
            return idx;
        }

        let idx = g.graph.add_node(NodeWeight {
            id: id.to_owned(),
            node_type: node_type.to_owned(),
            attributes,
        });
        g.id_to_index.insert(id.to_owned(), idx);
        g.nodes_by_type
            .entry(node_type.to_owned())
            .or_default()
            .push(idx);
        idx
    }

    /// Returns the number of nodes declared so far.
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Ends the node pass.
    pub fn into_edge_pass(mut self) -> EdgePass {
        if self.stale_buckets {
            compact_node_buckets(&mut self.inner);
        }
        EdgePass { inner: self.inner }
    }
}

/// Edge pass of graph construction.
#[derive(Debug)]
pub struct EdgePass {
    inner: TypedGraph,
}

impl EdgePass {
    /// Inserts an edge of `edge_type` from `source` to `target`.
    ///
    /// Endpoints that were never declared are created as attribute-less
    /// [`INFERRED_NODE_TYPE`] nodes. If an edge with the same
    /// `(source, target, edge_type)` already exists, `attributes` are merged
    /// into it and its index is returned.
    pub fn add_edge(
        &mut self,
        source: &str,
        target: &str,
        edge_type: &str,
        attributes: AttributeMap,
    ) -> EdgeIndex {
        let s = self.ensure_node(source);
        let t = self.ensure_node(target);
        let g = &mut self.inner;

        let key = (s, t, edge_type.to_owned());
        if let Some(&existing) = g.edge_keys.get(&key) {
            if let Some(weight) = g.graph.edge_weight_mut(existing) {
                weight.attributes.extend(attributes);
            }
            return existing;
        }

        let idx = g.graph.add_edge(
            s,
            t,
            EdgeWeight {
                edge_type: edge_type.to_owned(),
                attributes,
            },
        );
        g.edge_keys.insert(key, idx);
        g.edges_by_type
            .entry(edge_type.to_owned())
            .or_default()
            .push(idx);
        idx
    }

    /// Returns the number of distinct edges inserted so far.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Completes construction.
    pub fn finish(self) -> TypedGraph {
        self.inner
    }

    fn ensure_node(&mut self, id: &str) -> NodeIndex {
        let g = &mut self.inner;
        if let Some(&idx) = g.id_to_index.get(id) {
            return idx;
        }
        let idx = g.graph.add_node(NodeWeight {
            id: id.to_owned(),
            node_type: INFERRED_NODE_TYPE.to_owned(),
            attributes: AttributeMap::new(),
        });
        g.id_to_index.insert(id.to_owned(), idx);
        g.nodes_by_type
            .entry(INFERRED_NODE_TYPE.to_owned())
            .or_default()
            .push(idx);
        idx
    }
}

/// Drops bucket entries whose node has since changed type and restores
/// insertion order, in one pass over all buckets.
fn compact_node_buckets(g: &mut TypedGraph) {
    let graph = &g.graph;
    for (type_name, bucket) in &mut g.nodes_by_type {
        bucket.retain(|&i| graph.node_weight(i).is_some_and(|n| n.node_type == *type_name));
        bucket.sort_unstable();
        bucket.dedup();
    }
    g.nodes_by_type.retain(|_, bucket| !bucket.is_empty());
}
