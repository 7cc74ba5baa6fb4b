/// Text rendering of profiles.
///
/// The rendered text is the context handed to the schema oracle, so its line
/// shapes stay fixed:
///
/// ```text
///   Node Type: 'Neuron' (Count: 120)
///     - Property 'status': Found in 118/120 nodes. Type: 'str'. Examples: ['Traced', 'Orphan']
///
///   Edge Type: 'ConnectsTo' (Count: 900)
///     - Top Connections: [('Neuron->Neuron', 50)]
///     - Property 'weight': Found in 900/900 edges. Type: int.
/// ```
use std::fmt;

use rand::rngs::StdRng;

use super::{ProfileConfig, TypeProfile, profile_type};
use crate::graph::{ElementKind, TypedGraph};

impl fmt::Display for TypeProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ElementKind::Node => {
                write!(
                    f,
                    "\n  Node Type: '{}' (Count: {})\n",
                    self.type_name, self.count
                )?;
                for p in &self.properties {
                    writeln!(
                        f,
                        "    - Property '{}': Found in {}/{} nodes. Type: '{}'. Examples: {}",
                        p.name,
                        p.present,
                        self.count,
                        p.kind,
                        py_list(p.examples.iter().map(|e| quoted(e)))
                    )?;
                }
            }
            ElementKind::Edge => {
                write!(
                    f,
                    "\n  Edge Type: '{}' (Count: {})\n",
                    self.type_name, self.count
                )?;
                let pairs = self.topology.iter().map(|t| {
                    format!(
                        "({}, {})",
                        quoted(&format!("{}->{}", t.source_type, t.target_type)),
                        t.count
                    )
                });
                writeln!(f, "    - Top Connections: {}", py_list(pairs))?;
                for p in &self.properties {
                    writeln!(
                        f,
                        "    - Property '{}': Found in {}/{} edges. Type: {}.",
                        p.name, p.present, self.count, p.kind
                    )?;
                }
            }
        }
        Ok(())
    }
}

/// Renders the profile of one type as report text.
///
/// Returns an empty string when the type has no members.
pub fn profile(
    graph: &TypedGraph,
    type_name: &str,
    kind: ElementKind,
    config: &ProfileConfig,
) -> String {
    let mut rng = config.rng();
    render_one(graph, type_name, kind, config, &mut rng)
}

/// Renders the whole-graph context report: node and edge totals followed by
/// every node type profile, then every edge type profile.
pub fn context_report(graph: &TypedGraph, config: &ProfileConfig) -> String {
    let mut rng = config.rng();
    let mut out = format!(
        "Total Nodes: {}\nTotal Edges: {}\n",
        graph.node_count(),
        graph.edge_count()
    );
    for node_type in graph.node_types() {
        out.push_str(&render_one(graph, node_type, ElementKind::Node, config, &mut rng));
    }
    for edge_type in graph.edge_types() {
        out.push_str(&render_one(graph, edge_type, ElementKind::Edge, config, &mut rng));
    }
    out
}

fn render_one(
    graph: &TypedGraph,
    type_name: &str,
    kind: ElementKind,
    config: &ProfileConfig,
    rng: &mut StdRng,
) -> String {
    profile_type(graph, type_name, kind, config, rng)
        .map(|p| p.to_string())
        .unwrap_or_default()
}

fn py_list(items: impl Iterator<Item = String>) -> String {
    let mut out = String::from("[");
    for (i, item) in items.enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&item);
    }
    out.push(']');
    out
}

/// Quotes a string literal, preferring single quotes.
fn quoted(s: &str) -> String {
    let delim = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(delim);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            c if c == delim => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(delim);
    out
}
