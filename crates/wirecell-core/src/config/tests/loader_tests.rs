use std::fs;
use std::path::Path;
use tempfile::tempdir;

use serde_json::json;

use crate::config::error::ConfigError;
use crate::config::format::ConfigFormat;
use crate::config::loader::ConfigLoader;

#[test]
fn test_format_from_path() {
    assert_eq!(ConfigFormat::from_path(Path::new("a.json")), Some(ConfigFormat::Json));
    assert_eq!(ConfigFormat::from_path(Path::new("a.JSON")), Some(ConfigFormat::Json));
    assert_eq!(ConfigFormat::from_path(Path::new("a.jsonnet")), None);
    assert_eq!(ConfigFormat::from_path(Path::new("noext")), None);
    #[cfg(feature = "yaml-config")]
    assert_eq!(ConfigFormat::from_path(Path::new("a.yml")), Some(ConfigFormat::Yaml));
    #[cfg(feature = "toml-config")]
    assert_eq!(ConfigFormat::from_path(Path::new("a.toml")), Some(ConfigFormat::Toml));
}

#[test]
fn test_load_json_from_search_path() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("app.json"),
        r#"[{"type": "Foo", "data": {"x": 1}}, {"type": "Bar", "name": "b"}]"#,
    )
    .unwrap();

    let mut loader = ConfigLoader::new();
    loader.add_path(dir.path());
    let seq = loader.load("app.json").unwrap();
    assert_eq!(seq.len(), 2);
    assert_eq!(seq.index("Bar"), Some(1));
}

#[test]
fn test_search_path_order() {
    let first = tempdir().unwrap();
    let second = tempdir().unwrap();
    fs::write(first.path().join("c.json"), r#"{"type": "First"}"#).unwrap();
    fs::write(second.path().join("c.json"), r#"{"type": "Second"}"#).unwrap();

    let mut loader = ConfigLoader::new();
    loader.add_path(first.path()).add_path(second.path());
    assert_eq!(loader.search_path().len(), 2);
    assert_eq!(loader.resolve("c.json").unwrap(), first.path().join("c.json"));
    assert_eq!(loader.load("c.json").unwrap().index("First"), Some(0));
}

#[test]
fn test_missing_file() {
    let dir = tempdir().unwrap();
    let mut loader = ConfigLoader::new();
    loader.add_path(dir.path());
    match loader.load("wirecell-surely-missing-config.json") {
        Err(ConfigError::FileNotFound { name, searched }) => {
            assert_eq!(name, "wirecell-surely-missing-config.json");
            assert_eq!(searched.first(), Some(&dir.path().to_path_buf()));
        }
        other => panic!("Expected FileNotFound, got {:?}", other),
    }
}

#[test]
fn test_unsupported_and_malformed() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("c.jsonnet"), "{}").unwrap();
    fs::write(dir.path().join("bad.json"), "[{").unwrap();

    let mut loader = ConfigLoader::new();
    loader.add_path(dir.path());
    assert!(matches!(
        loader.load("c.jsonnet"),
        Err(ConfigError::UnsupportedFormat(_))
    ));
    assert!(matches!(
        loader.load("bad.json"),
        Err(ConfigError::Parse { format: "JSON", .. })
    ));
}

#[cfg(feature = "yaml-config")]
#[test]
fn test_load_yaml() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("c.yaml"),
        "- type: Foo\n  data:\n    angles: [60, -60]\n- type: Bar\n",
    )
    .unwrap();
    let mut loader = ConfigLoader::new();
    loader.add_path(dir.path());
    let seq = loader.load("c.yaml").unwrap();
    assert_eq!(
        seq.to_value(),
        json!([{"type": "Foo", "data": {"angles": [60, -60]}}, {"type": "Bar"}])
    );
}

#[cfg(feature = "toml-config")]
#[test]
fn test_load_toml_entries_table() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("c.toml"),
        "[[entries]]\ntype = \"Foo\"\n[entries.data]\npitch = 5\n\n[[entries]]\ntype = \"Bar\"\nname = \"b\"\n",
    )
    .unwrap();
    fs::write(dir.path().join("one.toml"), "type = \"Solo\"\n").unwrap();

    let mut loader = ConfigLoader::new();
    loader.add_path(dir.path());
    let seq = loader.load("c.toml").unwrap();
    assert_eq!(
        seq.to_value(),
        json!([{"type": "Foo", "data": {"pitch": 5}}, {"type": "Bar", "name": "b"}])
    );
    let seq = loader.load("one.toml").unwrap();
    assert_eq!(seq.to_value(), json!([{"type": "Solo"}]));
}
