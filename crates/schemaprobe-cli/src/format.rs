/// Human-readable rendering of comparison reports and graph summaries.
///
/// JSON output is produced directly from the serializable report types; this
/// module only covers `--format human`.
use std::io::Write;

use schemaprobe_core::MatchSet;

/// Writes a comparison report in sections: node matches, per-node property
/// partitions, edge matches, and the final score.
pub fn write_comparison<W: Write>(
    w: &mut W,
    report: &MatchSet,
    reference: &str,
    candidate: &str,
) -> std::io::Result<()> {
    writeln!(w, "reference: {reference}")?;
    writeln!(w, "candidate: {candidate}")?;

    writeln!(w)?;
    writeln!(w, "node types:")?;
    for m in &report.node_matches {
        writeln!(w, "  match:  {} <-> {}", m.gt, m.inferred)?;
    }
    for name in &report.missed_nodes {
        writeln!(w, "  missed: {name}")?;
    }

    writeln!(w)?;
    writeln!(w, "node properties:")?;
    for detail in &report.property_details {
        writeln!(w, "  {}:", detail.node)?;
        write_partition(w, &detail.diff)?;
    }

    writeln!(w)?;
    writeln!(w, "edge types:")?;
    for m in &report.edge_matches {
        writeln!(w, "  match:  {} <-> {}", m.gt, m.inferred)?;
    }
    for detail in &report.edge_property_details {
        if !detail.diff.missing.is_empty() {
            writeln!(
                w,
                "  {} missing properties: {}",
                detail.edge,
                detail.diff.missing.join(", ")
            )?;
        }
    }
    for name in &report.missed_edges {
        writeln!(w, "  missed: {name}")?;
    }

    writeln!(w)?;
    writeln!(
        w,
        "property score: {:.2}% ({}/{})",
        report.accuracy, report.matched_properties, report.total_properties
    )
}

fn write_partition<W: Write>(w: &mut W, diff: &schemaprobe_core::PropertyDiff) -> std::io::Result<()> {
    if !diff.correct.is_empty() {
        writeln!(w, "    correct: {}", diff.correct.len())?;
    }
    if !diff.missing.is_empty() {
        writeln!(w, "    missing: {}", diff.missing.join(", "))?;
    }
    if !diff.extra.is_empty() {
        writeln!(w, "    extra:   {}", diff.extra.join(", "))?;
    }
    Ok(())
}
