use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

#[test]
fn cli_translates_fixture_file_to_golden_diagram() {
    let root = repo_root();
    let fixture = root.join("fixtures").join("word-count.txt");
    assert!(fixture.exists(), "fixture missing: {}", fixture.display());

    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("word-count.mmd");

    let exe = assert_cmd::cargo_bin!("topomaid-cli");
    Command::new(exe)
        .current_dir(&root)
        .args([
            "--sequential-colors",
            "--out",
            out.to_string_lossy().as_ref(),
            fixture.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let golden = fs::read_to_string(root.join("fixtures").join("word-count.mmd")).expect("golden");
    let written = fs::read_to_string(&out).expect("read output");
    assert_eq!(written, golden);
}

#[test]
fn cli_reads_stdin_and_prints_header_for_unrecognized_input() {
    let exe = assert_cmd::cargo_bin!("topomaid-cli");
    assert_cmd::Command::new(exe)
        .arg("-")
        .write_stdin("Topologies:\n")
        .assert()
        .success()
        .stdout("graph TD\n");
}

#[test]
fn cli_json_output_carries_sub_topology_ids() {
    let exe = assert_cmd::cargo_bin!("topomaid-cli");
    let assert = assert_cmd::Command::new(exe)
        .args(["--json", "--sequential-colors"])
        .write_stdin("Sub-topology: 0\nSub-topology: 1\n")
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf-8 stdout");
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(value["subTopologies"], serde_json::json!(["0", "1"]));
    let diagram = value["mermaid"].as_str().expect("mermaid string");
    assert!(diagram.starts_with("graph TD"));
    assert!(diagram.contains("subgraph topology1 [Sub-Topology: 1]"));
}

#[test]
fn cli_rejects_unknown_flags_with_usage_exit_code() {
    let exe = assert_cmd::cargo_bin!("topomaid-cli");
    Command::new(exe)
        .arg("--bogus")
        .assert()
        .failure()
        .code(2);
}

#[test]
fn cli_rejects_pretty_without_json() {
    let exe = assert_cmd::cargo_bin!("topomaid-cli");
    Command::new(exe)
        .arg("--pretty")
        .assert()
        .failure()
        .code(2);
}
