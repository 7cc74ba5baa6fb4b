//! Integration tests for `schemaprobe discover`.
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
        .env_remove("GOOGLE_API_KEY")
        .env_remove("RUST_LOG")
        .output()
        .expect("run schemaprobe")
}

fn path_str(p: &Path) -> &str {
    p.to_str().expect("utf-8 path")
}

fn write_neuron_folder(dir: &Path) {
    std::fs::write(
        dir.join("Neuprint_Neurons_fib25.csv"),
        ":ID(Body-ID),bodyId:long,status\n1,1,Traced\n2,2,Traced\n3,3,\n",
    )
    .expect("write nodes");
    std::fs::write(
        dir.join("Neuprint_Neuron_Connections_fib25.csv"),
        ":START_ID(Body-ID),weight:int,:END_ID(Body-ID)\n1,4,2\n2,1,3\n",
    )
    .expect("write edges");
}

fn read_json(path: &Path) -> serde_json::Value {
    let text = std::fs::read_to_string(path).expect("read output");
    serde_json::from_str(&text).expect("output is JSON")
}

#[test]
fn discover_mock_writes_inferred_schema() {
    let input = tempfile::tempdir().expect("tempdir");
    let output = tempfile::tempdir().expect("tempdir");
    write_neuron_folder(input.path());

    let out = run(&[
        "discover",
        path_str(input.path()),
        "--mock",
        "--seed",
        "1",
        "-o",
        path_str(output.path()),
    ]);
    assert!(
        out.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );

    let schema = read_json(&output.path().join("inferred_schema.json"));
    let nodes = schema["node_types"].as_array().expect("node_types");
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0]["name"], "Neurons");
    assert_eq!(nodes[0]["labels"][0], "Neurons");
    let edges = schema["edge_types"].as_array().expect("edge_types");
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0]["type"], "Neuron_Connections");

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("strategy:    derive"), "stdout: {stdout}");
}

#[test]
fn discover_json_summary() {
    let input = tempfile::tempdir().expect("tempdir");
    let output = tempfile::tempdir().expect("tempdir");
    write_neuron_folder(input.path());

    let out = run(&[
        "discover",
        path_str(input.path()),
        "--mock",
        "-o",
        path_str(output.path()),
        "--format",
        "json",
    ]);
    assert!(out.status.success());
    let summary: serde_json::Value = serde_json::from_slice(&out.stdout).expect("stdout JSON");
    assert_eq!(summary["strategy"], "derive");
    assert_eq!(summary["node_types"], 1);
    assert_eq!(summary["edge_types"], 1);
}

#[test]
fn discover_empty_folder_exits_1_without_output() {
    let input = tempfile::tempdir().expect("tempdir");
    let output = tempfile::tempdir().expect("tempdir");

    let out = run(&[
        "discover",
        path_str(input.path()),
        "--mock",
        "-o",
        path_str(output.path()),
    ]);
    assert_eq!(out.status.code(), Some(1));
    assert!(!output.path().join("inferred_schema.json").exists());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("no nodes were loaded"), "stderr: {stderr}");
}

#[test]
fn discover_missing_folder_exits_1() {
    let output = tempfile::tempdir().expect("tempdir");
    let missing = output.path().join("does-not-exist");

    let out = run(&[
        "discover",
        path_str(&missing),
        "--mock",
        "-o",
        path_str(output.path()),
    ]);
    assert_eq!(out.status.code(), Some(1));
    assert!(!output.path().join("inferred_schema.json").exists());
}

#[test]
fn discover_without_api_key_derives_locally() {
    let input = tempfile::tempdir().expect("tempdir");
    let output = tempfile::tempdir().expect("tempdir");
    write_neuron_folder(input.path());

    let out = run(&["discover", path_str(input.path()), "-o", path_str(output.path())]);
    assert!(out.status.success());
    assert!(output.path().join("inferred_schema.json").exists());
}

#[test]
fn derived_schema_compares_to_itself_at_100() {
    let input = tempfile::tempdir().expect("tempdir");
    let output = tempfile::tempdir().expect("tempdir");
    write_neuron_folder(input.path());

    let out = run(&[
        "discover",
        path_str(input.path()),
        "--mock",
        "-o",
        path_str(output.path()),
    ]);
    assert!(out.status.success());

    let schema = output.path().join("inferred_schema.json");
    let out = run(&[
        "compare",
        path_str(&schema),
        path_str(&schema),
        "--format",
        "json",
    ]);
    assert!(out.status.success());
    let report: serde_json::Value = serde_json::from_slice(&out.stdout).expect("stdout JSON");
    assert_eq!(report["accuracy"], 100.0);
}
