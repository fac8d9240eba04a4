use crate::plugin_system::entry::entry_symbol;
use crate::plugin_system::error::PluginLoadError;
use crate::plugin_system::spec::PluginSpec;

#[test]
fn test_parse_name_only() {
    let spec = PluginSpec::parse("WireCellGen").unwrap();
    assert_eq!(spec, PluginSpec::new("WireCellGen"));
    assert_eq!(spec.to_string(), "WireCellGen");
    assert_eq!(spec.entry_symbol(), "register_WireCellGen_Factory");
}

#[test]
fn test_parse_with_library() {
    let spec: PluginSpec = "WireCellGen:/opt/lib/libWireCellGen.so".parse().unwrap();
    assert_eq!(spec.name, "WireCellGen");
    assert_eq!(spec.library.as_deref(), Some("/opt/lib/libWireCellGen.so"));
    assert_eq!(spec.library_file_name(), "/opt/lib/libWireCellGen.so");
    assert_eq!(spec.to_string(), "WireCellGen:/opt/lib/libWireCellGen.so");
}

#[test]
fn test_empty_library_part_is_absent() {
    let spec = PluginSpec::parse("Foo:").unwrap();
    assert!(spec.library.is_none());
}

#[test]
fn test_empty_name_is_invalid() {
    assert!(matches!(
        PluginSpec::parse(""),
        Err(PluginLoadError::InvalidReference(_))
    ));
    assert!(matches!(
        PluginSpec::parse(":libFoo.so"),
        Err(PluginLoadError::InvalidReference(_))
    ));
}

#[test]
fn test_library_file_name_derivation() {
    let derived = PluginSpec::new("WireCellGen").library_file_name();
    assert_eq!(
        derived,
        libloading::library_filename("WireCellGen").to_string_lossy()
    );
    assert!(derived.contains("WireCellGen"));

    // A bare library name gets the platform decoration too, a file name does not.
    let bare = PluginSpec::with_library("Gen", "WireCellGen").library_file_name();
    assert_eq!(bare, derived);
    let file = PluginSpec::with_library("Gen", "custom.so").library_file_name();
    assert_eq!(file, "custom.so");
}

#[test]
fn test_entry_symbol_for_types() {
    assert_eq!(entry_symbol("ConfigDumper"), "register_ConfigDumper_Factory");
}
