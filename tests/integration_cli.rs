//! Runs the `pv-sizing` binary against presets and project files.

use std::fs;
use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pv-sizing"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("pv-sizing process should run")
}

fn stdout_of(args: &[&str]) -> String {
    let output = run(args);
    assert!(
        output.status.success(),
        "pv-sizing {args:?} failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout should be valid UTF-8")
}

#[test]
fn default_preset_prints_every_section() {
    let stdout = stdout_of(&[]);
    assert!(stdout.contains("--- DC system ---"));
    assert!(stdout.contains("--- Inverter groups ---"));
    assert!(stdout.contains("--- Main switchboard ---"));
    assert!(stdout.contains("--- Bill of materials ---"));
    assert!(stdout.contains("400AF / 350AT"));
}

#[test]
fn project_file_matches_preset() {
    let from_file = stdout_of(&["--project", "projects/large_plant.toml"]);
    let from_preset = stdout_of(&["--preset", "large_plant"]);
    assert_eq!(from_file, from_preset);
    assert!(from_file.contains("ACB (Custom > 1600A)"));
    assert!(from_file.contains("--- Warnings ---"));
}

#[test]
fn json_output_parses() {
    let stdout = stdout_of(&["--project", "projects/default.toml", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(value["input"]["string_count"], 24);
    assert_eq!(value["report"]["dc"]["total_wire_count"], 48);
    assert_eq!(value["report"]["main"]["breaker"]["kind"], "catalog");
    assert_eq!(
        value["report"]["inverters"]
            .as_array()
            .map(Vec::len),
        Some(1)
    );
    assert_eq!(value["bom"].as_array().map(Vec::len), Some(16));
}

#[test]
fn bom_exported_to_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("bom.tsv");
    let path_arg = path.to_str().expect("utf-8 temp path");
    stdout_of(&["--bom-out", path_arg, "--bom-format", "tsv"]);

    let written = fs::read_to_string(&path).expect("bom file written");
    let mut lines = written.lines();
    assert_eq!(
        lines.next(),
        Some("No.\tDescription\tSpecification\tUnit\tQty\tRemarks")
    );
    assert_eq!(lines.count(), 16);
}

#[test]
fn unknown_preset_fails() {
    let output = run(&["--preset", "nope"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown preset"), "stderr={stderr}");
}

#[test]
fn project_and_preset_are_exclusive() {
    let output = run(&["--project", "projects/default.toml", "--preset", "default"]);
    assert!(!output.status.success());
}

#[test]
fn invalid_project_reports_every_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("bad.toml");
    fs::write(
        &path,
        r#"
[system]
grid_voltage = -380.0

[[inverters]]
id = "a"

[[inverters]]
id = "a"
"#,
    )
    .expect("write project");

    let output = run(&["--project", path.to_str().expect("utf-8 temp path")]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("system.grid_voltage"), "stderr={stderr}");
    assert!(stderr.contains("duplicate id"), "stderr={stderr}");
}

#[test]
fn unreadable_catalog_fails() {
    let output = run(&["--catalog", "does/not/exist.toml"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn catalog_file_replaces_builtin_tables() {
    let builtin = stdout_of(&["--preset", "large_plant"]);
    let from_file = stdout_of(&[
        "--preset",
        "large_plant",
        "--catalog",
        "catalogs/standard.toml",
    ]);
    assert_eq!(builtin, from_file);
}
