use std::fs;
use tempfile::tempdir;

use serde_json::{json, Value};
use wirecell_core::{Application, ComponentKey, Configurable, ExecutionContext};

use super::registry_with_apps;
use crate::type_dumper::{TypeDumper, TypeRecord};

fn record(type_name: &str) -> TypeRecord {
    TypeRecord {
        type_name: type_name.to_string(),
        capabilities: vec!["Configurable".to_string(), "Application".to_string()],
    }
}

#[test]
fn test_all_known_types_by_default() {
    let registry = registry_with_apps();
    let dumper = TypeDumper::default();
    assert_eq!(
        dumper.records(&registry),
        vec![record("ConfigDumper"), record("TypeDumper")]
    );
    assert_eq!(registry.instance_count(), 0);
}

#[test]
fn test_selected_types_skip_unknown() {
    let registry = registry_with_apps();
    let dumper = TypeDumper::default();
    dumper
        .configure(&json!({"filename": "-", "types": ["TypeDumper", "NoSuchType"]}))
        .unwrap();
    assert_eq!(dumper.records(&registry), vec![record("TypeDumper")]);
}

#[test]
fn test_execute_writes_records() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("types.json");
    let registry = registry_with_apps();

    let dumper = TypeDumper::default();
    dumper
        .configure(&json!({"filename": out.to_str().unwrap(), "types": ["ConfigDumper"]}))
        .unwrap();
    let key = ComponentKey::new("TypeDumper", "");
    dumper
        .execute(&ExecutionContext::new(&registry, &key))
        .unwrap();

    let written: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(
        written,
        json!([{"type": "ConfigDumper", "capabilities": ["Configurable", "Application"]}])
    );
}
