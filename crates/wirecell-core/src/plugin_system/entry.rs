//! # Entry Points
//!
//! A plugin library exports `register_<Name>_Factory` with the signature of
//! [`EntryPointFn`]. The host passes a pointer to its registry; the entry
//! point registers constructors and returns nothing. Failures it cannot
//! return are recorded on the registry with
//! [`record_rejection`](crate::component::FactoryRegistry::record_rejection)
//! and picked up by the loader after the call.
use std::ffi::c_void;

use crate::component::error::RegistryError;
use crate::component::registry::ComponentRegistry;

/// Signature of an exported entry point. The argument is a
/// `*mut ComponentRegistry`.
pub type EntryPointFn = unsafe extern "C-unwind" fn(registry: *mut c_void);

/// Registration function of a statically linked plugin.
pub type RegisterFn = fn(&mut ComponentRegistry) -> Result<(), RegistryError>;

/// Symbol exported for the plugin or component type `name`.
pub fn entry_symbol(name: &str) -> String {
    format!("register_{}_Factory", name)
}

/// Run `register` against the registry behind `registry`.
///
/// Used by the code the export macros generate.
///
/// # Safety
///
/// `registry` must be null or point to a live `ComponentRegistry` built by
/// the same `wirecell-core` this plugin was compiled against, with no other
/// reference to it active for the duration of the call.
pub unsafe fn invoke_registration<F>(registry: *mut c_void, register: F)
where
    F: FnOnce(&mut ComponentRegistry) -> Result<(), RegistryError>,
{
    let Some(registry) = (unsafe { registry.cast::<ComponentRegistry>().as_mut() }) else {
        log::error!("Entry point called with a null registry");
        return;
    };
    if let Err(e) = register(registry) {
        log::error!("Registration failed: {}", e);
        registry.record_rejection(e);
    }
}

/// Export the plugin entry point `register_<Name>_Factory`, calling a
/// [`RegisterFn`].
///
/// ```ignore
/// fn register(registry: &mut ComponentRegistry) -> Result<(), RegistryError> {
///     registry.register_constructor("ConfigDumper", make_config_dumper)
/// }
/// wirecell_core::wirecell_plugin!(WireCellApps, register);
/// ```
#[macro_export]
macro_rules! wirecell_plugin {
    ($name:ident, $register:path) => {
        const _: () = {
            #[unsafe(export_name = concat!("register_", stringify!($name), "_Factory"))]
            pub unsafe extern "C-unwind" fn __wirecell_plugin_entry(registry: *mut ::std::ffi::c_void) {
                unsafe { $crate::plugin_system::entry::invoke_registration(registry, $register) }
            }
        };
    };
}

/// Export the per-type entry point `register_<Type>_Factory`, registering a
/// single constructor under the type's name.
#[macro_export]
macro_rules! wirecell_factory {
    ($type_name:ident, $ctor:path) => {
        const _: () = {
            #[unsafe(export_name = concat!("register_", stringify!($type_name), "_Factory"))]
            pub unsafe extern "C-unwind" fn __wirecell_factory_entry(registry: *mut ::std::ffi::c_void) {
                unsafe {
                    $crate::plugin_system::entry::invoke_registration(registry, |r| {
                        r.register_constructor(stringify!($type_name), $ctor)
                    })
                }
            }
        };
    };
}
