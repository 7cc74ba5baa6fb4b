//! Integration tests for `schemaprobe compare`.
#![allow(clippy::expect_used)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Path to the compiled `schemaprobe` binary.
fn schemaprobe_bin() -> PathBuf {
    let mut path = std::env::current_exe().expect("current exe");
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.push("schemaprobe");
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(schemaprobe_bin())
        .args(args)
        .env_remove("SCHEMAPROBE_MAX_FILE_SIZE")
        .output()
        .expect("run schemaprobe")
}

fn path_str(p: &Path) -> &str {
    p.to_str().expect("utf-8 path")
}

const REFERENCE: &str = r#"{
  "dataset_name": "fib25",
  "node_types": [
    {"labels": ["Neuron"], "raw_type_string": "Neuron", "properties": [
      {"name": "a", "type": "String", "mandatory": true},
      {"name": "b", "type": "Long", "mandatory": false},
      {"name": "c", "type": "Double", "mandatory": false}]},
    {"labels": ["Meta"], "properties": [{"name": "x", "type": "String", "mandatory": false}]}
  ],
  "edge_types": [
    {"type": "ConnectsTo", "properties": [{"name": "weight", "type": "Long", "mandatory": true}],
     "topology": [{"allowed_sources": ["Neuron"], "allowed_targets": ["Neuron"]}]}
  ]
}"#;

const CANDIDATE: &str = r#"{
  "node_types": [
    {"name": "Neurons", "labels": ["Neurons"], "properties": [
      {"name": "a", "type": "String", "mandatory": true},
      {"name": "b", "type": "Long", "mandatory": true},
      {"name": "d", "type": "String", "mandatory": false}]}
  ],
  "edge_types": [
    {"type": "Connects_To", "name": "Connects_To", "properties": [], "topology": []}
  ]
}"#;

fn fixture_pair() -> (tempfile::TempDir, PathBuf, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let reference = dir.path().join("golden_truth_fib25.json");
    let candidate = dir.path().join("inferred_schema.json");
    std::fs::write(&reference, REFERENCE).expect("write reference");
    std::fs::write(&candidate, CANDIDATE).expect("write candidate");
    (dir, reference, candidate)
}

#[test]
fn compare_json_report() {
    let (_dir, reference, candidate) = fixture_pair();
    let out = run(&[
        "compare",
        path_str(&reference),
        path_str(&candidate),
        "--format",
        "json",
    ]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let report: serde_json::Value = serde_json::from_slice(&out.stdout).expect("stdout JSON");
    assert_eq!(report["accuracy"], 66.67);
    assert_eq!(report["node_matches"][0]["gt"], "Neuron");
    assert_eq!(report["node_matches"][0]["inferred"], "Neurons");
    assert_eq!(report["missed_nodes"][0], "Meta");
    assert_eq!(report["property_details"][0]["missing"][0], "c");
    assert_eq!(report["property_details"][0]["extra"][0], "d");
    assert_eq!(report["total_properties"], 3);
    assert_eq!(report["matched_properties"], 2);
    assert_eq!(report["edge_matches"][0]["inferred"], "Connects_To");
    assert_eq!(report["edge_property_details"][0]["missing"][0], "weight");
}

#[test]
fn compare_human_report() {
    let (_dir, reference, candidate) = fixture_pair();
    let out = run(&["compare", path_str(&reference), path_str(&candidate)]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("reference: golden_truth_fib25.json"), "stdout: {stdout}");
    assert!(stdout.contains("match:  Neuron <-> Neurons"), "stdout: {stdout}");
    assert!(stdout.contains("property score: 66.67% (2/3)"), "stdout: {stdout}");
}

#[test]
fn compare_writes_report_file() {
    let (dir, reference, candidate) = fixture_pair();
    let report_path = dir.path().join("reports/comparison.json");
    let out = run(&[
        "compare",
        path_str(&reference),
        path_str(&candidate),
        "--report",
        path_str(&report_path),
    ]);
    assert!(out.status.success());
    let text = std::fs::read_to_string(&report_path).expect("report written");
    let report: serde_json::Value = serde_json::from_str(&text).expect("report JSON");
    assert_eq!(report["accuracy"], 66.67);
}

#[test]
fn compare_stricter_threshold_misses_everything() {
    let (_dir, reference, candidate) = fixture_pair();
    let out = run(&[
        "compare",
        path_str(&reference),
        path_str(&candidate),
        "--threshold",
        "0.99",
        "--format",
        "json",
    ]);
    assert!(out.status.success());
    let report: serde_json::Value = serde_json::from_slice(&out.stdout).expect("stdout JSON");
    assert_eq!(report["accuracy"], 0.0);
    assert_eq!(report["missed_nodes"].as_array().map(Vec::len), Some(2));
}

#[test]
fn compare_missing_file_exits_2() {
    let (dir, reference, _) = fixture_pair();
    let out = run(&[
        "compare",
        path_str(&reference),
        path_str(&dir.path().join("absent.json")),
    ]);
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("file not found"), "stderr: {stderr}");
}

#[test]
fn compare_invalid_json_exits_2() {
    let (dir, reference, _) = fixture_pair();
    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, "{ not json").expect("write");
    let out = run(&["compare", path_str(&reference), path_str(&bad)]);
    assert_eq!(out.status.code(), Some(2));
    assert!(out.stdout.is_empty());
}

#[test]
fn compare_respects_max_file_size() {
    let (_dir, reference, candidate) = fixture_pair();
    let out = run(&[
        "compare",
        path_str(&reference),
        path_str(&candidate),
        "--max-file-size",
        "16",
    ]);
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("file too large"), "stderr: {stderr}");
}
