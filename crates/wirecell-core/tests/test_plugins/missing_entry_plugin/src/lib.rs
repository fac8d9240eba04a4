// A loadable library that exports a symbol, just not a registration entry point.

#[unsafe(no_mangle)]
pub extern "C" fn missing_entry_plugin_marker() -> u32 {
    42
}
