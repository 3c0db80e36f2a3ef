use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};

const FAMILY: &str = r#"{
    "first_year": 2020,
    "children_tree": [
        {"A": {"children": ["X", "Y"]}, "B": {"children": ["Y"], "title": "Resp"}},
        {"X": {"children": []}, "Y": {"children": []}}
    ]
}"#;

fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

fn cli() -> Command {
    Command::new(assert_cmd::cargo_bin!("lignee-cli"))
}

#[test]
fn cli_prints_dot_by_default() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = write_fixture(tmp.path(), "family.json", FAMILY);

    let assert = cli().arg(&input).assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();

    assert!(stdout.starts_with("digraph {\n"), "{stdout}");
    assert!(stdout.contains("1ère génération</B> (2020 - 2025)"));
    assert!(stdout.contains("\"A_0\" -> \"X_1\" [weight=1000]"));
    assert!(stdout.contains("\"B_0\" -> \"Y_1\" [weight=1000]"));
}

#[test]
fn cli_writes_dot_to_out_path() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = write_fixture(tmp.path(), "family.json", FAMILY);
    let out = tmp.path().join("family.dot");

    cli()
        .args(["dot", "--debug", "--nodesep", "0.8", "--out"])
        .arg(&out)
        .arg(&input)
        .assert()
        .success();

    let dot = fs::read_to_string(&out).expect("read dot");
    assert!(dot.contains("\tnodesep=0.8\n"));
    assert!(dot.contains("<br/>joins: "));
}

#[test]
fn cli_reads_stdin_and_config() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = write_fixture(tmp.path(), "config.json", r##"{"palette": ["#000000"]}"##);

    let assert = cli()
        .arg("--config")
        .arg(&config)
        .arg("-")
        .write_stdin(FAMILY)
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    assert!(stdout.contains("fillcolor=\"#000000\" fontcolor=white"));
}

#[test]
fn cli_layout_prints_json_summary() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = write_fixture(tmp.path(), "family.json", FAMILY);

    let assert = cli()
        .args(["layout", "--pretty"])
        .arg(&input)
        .assert()
        .success();
    let json: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("layout JSON");

    assert_eq!(json["first_year"], 2020);
    assert_eq!(json["generations"], 2);
    // A, B, X, Y and the spacers of X and Y.
    assert_eq!(json["people"].as_array().map(Vec::len), Some(6));
    assert_eq!(json["lineages"][0]["tree_id"], 0);
}

#[test]
fn cli_validate_reports_dangling_children() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let good = write_fixture(tmp.path(), "good.json", FAMILY);
    let bad = write_fixture(
        tmp.path(),
        "bad.json",
        r#"{"first_year": 2020, "children_tree": [{"A": {"children": ["Z"]}}, {"X": {"children": []}}]}"#,
    );

    let assert = cli().arg("validate").arg(&good).assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    assert!(stdout.starts_with("ok: 2 generation(s), 4 people"), "{stdout}");

    let assert = cli().arg("validate").arg(&bad).assert().code(1);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert!(stderr.contains("`Z`"), "{stderr}");
}

#[test]
fn cli_rejects_unknown_flags_with_usage() {
    let assert = cli().arg("--bogus").assert().code(2);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert!(stderr.contains("USAGE:"));

    cli().args(["--nodesep", "wide"]).assert().code(2);
}

#[test]
fn cli_reports_invalid_palette() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = write_fixture(tmp.path(), "family.json", FAMILY);
    let config = write_fixture(tmp.path(), "config.json", r#"{"palette": ["teal"]}"#);

    let assert = cli()
        .arg("--config")
        .arg(&config)
        .arg(&input)
        .assert()
        .code(1);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert!(stderr.contains("teal"), "{stderr}");
}

#[test]
fn cli_handles_extreme_first_years() {
    let max_year = r#"{"first_year": 9223372036854775807, "children_tree": [{"A": {"children": []}}]}"#;
    let assert = cli().arg("-").write_stdin(max_year).assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    assert!(stdout.contains("(9223372036854775807 - 9223372036854775807)"), "{stdout}");

    let huge = r#"{"first_year": 1e20, "children_tree": [{"A": {"children": []}}]}"#;
    let assert = cli().arg("-").write_stdin(huge).assert().code(1);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert!(stderr.contains("out of range"), "{stderr}");
}
