/// Instruction template sent to the schema oracle.
///
/// The template is a fixed artifact: the profile report is embedded verbatim
/// under `DATA PROFILE:` and the response is requested as a single JSON object
/// with `node_types` and `edge_types` arrays.
const TEMPLATE_HEAD: &str = "
    You are a Data Architect. Reverse-engineer the schema from this profile.

    DATA PROFILE:
    ";

const TEMPLATE_TAIL: &str = "

    INSTRUCTIONS:
    1. Identify Node Types and Edge Types.
    2. Infer properties and valid data types (String, Long, Double, Boolean).
    3. Determine 'mandatory' (true if property found in >90% of nodes/edges).
    4. Generalize names (e.g. 'Neuron_Connections' -> 'CONNECTS_TO').
    5. 'roiInfo' is a JSON String.

    OUTPUT JSON:
    { \"node_types\": [...], \"edge_types\": [...] }
    ";

/// Embeds a profile report into the oracle instruction template.
pub fn build_prompt(report: &str) -> String {
    let mut prompt = String::with_capacity(TEMPLATE_HEAD.len() + report.len() + TEMPLATE_TAIL.len());
    prompt.push_str(TEMPLATE_HEAD);
    prompt.push_str(report);
    prompt.push_str(TEMPLATE_TAIL);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_report_and_output_contract() {
        let p = build_prompt("Total Nodes: 3\nTotal Edges: 1\n");
        assert!(p.contains("DATA PROFILE:\n    Total Nodes: 3\nTotal Edges: 1\n"));
        assert!(p.contains(r#"{ "node_types": [...], "edge_types": [...] }"#));
        assert!(p.contains("(String, Long, Double, Boolean)"));
    }
}
