pub mod type_dumper_tests;

use wirecell_core::ComponentRegistry;

use crate::register;

pub(crate) fn registry_with_apps() -> ComponentRegistry {
    let mut registry = ComponentRegistry::new();
    register(&mut registry).expect("registration succeeds");
    registry
}

#[test]
fn test_register_is_idempotent() {
    let mut registry = registry_with_apps();
    register(&mut registry).expect("identical re-registration is a no-op");
    assert_eq!(registry.known_types(), vec!["ConfigDumper", "TypeDumper"]);
}
