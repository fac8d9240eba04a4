use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::tempdir;

fn wire_cell() -> Command {
    let mut cmd = Command::cargo_bin("wire-cell").expect("binary is built");
    cmd.env_remove("WIRECELL_PATH")
        .env_remove("WIRECELL_PLUGIN_PATH")
        .env("WIRECELL_LOG", "info");
    cmd
}

fn write_json(path: &Path, value: &Value) {
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_help_lists_options() -> Result<(), Box<dyn std::error::Error>> {
    wire_cell()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("--plugin"))
        .stdout(predicate::str::contains("--app"));
    Ok(())
}

#[test]
fn test_no_arguments_is_a_successful_no_op() {
    wire_cell().assert().success();
}

#[test]
fn test_config_dumper_end_to_end() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("dump.json");
    let cfg = dir.path().join("app.json");
    write_json(
        &cfg,
        &json!([{
            "type": "ConfigDumper",
            "data": {"filename": out.to_str().unwrap(), "components": ["TypeDumper"]}
        }]),
    );

    wire_cell()
        .args(["-p", "WireCellApps", "-a", "ConfigDumper", "-c"])
        .arg(&cfg)
        .assert()
        .success()
        .stderr(predicate::str::contains("Executing app: ConfigDumper"));

    assert_eq!(
        read_json(&out),
        json!([{"type": "TypeDumper", "name": "", "data": {"filename": "-", "types": []}}])
    );
}

#[test]
fn test_stdout_dump() {
    let dir = tempdir().unwrap();
    let cfg = dir.path().join("types.json");
    write_json(&cfg, &json!({"type": "TypeDumper", "data": {"types": ["ConfigDumper"]}}));

    let output = wire_cell()
        .args(["-p", "WireCellApps", "-a", "TypeDumper", "-c"])
        .arg(&cfg)
        .output()
        .unwrap();
    assert!(output.status.success());
    let written: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        written,
        json!([{"type": "ConfigDumper", "capabilities": ["Configurable", "Application"]}])
    );
}

#[test]
fn test_entry_without_type_exits_with_config_code() {
    let dir = tempdir().unwrap();
    let cfg = dir.path().join("bad.json");
    write_json(&cfg, &json!([{"name": "x", "data": {}}]));

    wire_cell()
        .arg("-c")
        .arg(&cfg)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("lacks a type"))
        .stderr(predicate::str::contains("Configuring component").not());
}

#[test]
fn test_missing_config_file() {
    wire_cell()
        .args(["-c", "wirecell-surely-missing.json"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("wirecell-surely-missing.json"));
}

#[test]
fn test_unconstructed_app_exits_with_registry_code() {
    wire_cell()
        .args(["-p", "WireCellApps", "-a", "Baz:b2"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Baz:b2"))
        .stderr(predicate::str::contains("Executing app").not());
}

#[test]
fn test_unknown_plugin_exits_with_plugin_code() {
    wire_cell()
        .args(["-p", "WireCellSurelyNotInstalled"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("WireCellSurelyNotInstalled"));
}

#[test]
fn test_list_types() {
    wire_cell()
        .args(["-p", "WireCellApps", "--list-types"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ConfigDumper"))
        .stdout(predicate::str::contains("TypeDumper"));
}

#[test]
fn test_reserved_entry_requests_plugins_and_apps() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("types.json");
    let cfg = dir.path().join("reserved.json");
    write_json(
        &cfg,
        &json!([
            {"type": "wire-cell", "data": {"plugins": ["WireCellApps"], "apps": ["TypeDumper"]}},
            {"type": "TypeDumper", "data": {"filename": out.to_str().unwrap()}},
        ]),
    );

    wire_cell().arg("-c").arg(&cfg).assert().success();

    let records = read_json(&out);
    assert_eq!(records.as_array().map(Vec::len), Some(2));
    assert_eq!(records[0]["type"], json!("ConfigDumper"));
}

#[test]
fn test_dump_default() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("defaults.json");

    wire_cell()
        .args(["-p", "WireCellApps", "-D", "ConfigDumper", "--dump-file"])
        .arg(&out)
        .assert()
        .success();

    assert_eq!(
        read_json(&out),
        json!([{
            "type": "ConfigDumper",
            "name": "",
            "data": {"filename": "-", "components": ["ConfigDumper"]}
        }])
    );
}

#[test]
fn test_output_config_is_merged_over_defaults() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("applied.json");
    let cfg = dir.path().join("app.json");
    write_json(
        &cfg,
        &json!([
            {"type": "wire-cell", "data": {"plugins": ["WireCellApps"]}},
            {"type": "TypeDumper", "name": "t", "data": {"types": ["TypeDumper"]}},
        ]),
    );

    wire_cell()
        .arg("-c")
        .arg(&cfg)
        .arg("-C")
        .arg(&out)
        .assert()
        .success();

    assert_eq!(
        read_json(&out),
        json!([{"type": "TypeDumper", "name": "t", "data": {"filename": "-", "types": ["TypeDumper"]}}])
    );
}

#[test]
fn test_yaml_config_found_on_search_path() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("dump.json");
    fs::write(
        dir.path().join("app.yaml"),
        format!(
            "- type: ConfigDumper\n  data:\n    filename: {}\n    components: [TypeDumper]\n",
            serde_json::to_string(out.to_str().unwrap()).unwrap()
        ),
    )
    .unwrap();

    wire_cell()
        .args(["-p", "WireCellApps", "-a", "ConfigDumper", "-c", "app.yaml", "-P"])
        .arg(dir.path())
        .assert()
        .success();

    assert_eq!(read_json(&out)[0]["type"], json!("TypeDumper"));
}
