/// Application name
pub const APP_NAME: &str = "wire-cell";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Type of the reserved configuration entry carrying plugin and app lists
pub const RESERVED_ENTRY_TYPE: &str = "wire-cell";

/// Search path for configuration files
pub const CONFIG_PATH_ENV: &str = "WIRECELL_PATH";

/// Search path for plugin libraries
pub const PLUGIN_PATH_ENV: &str = "WIRECELL_PLUGIN_PATH";

/// Log filter for the front end
pub const LOG_ENV: &str = "WIRECELL_LOG";

/// Default log filter
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Output targets meaning standard output
pub const STDOUT_TARGETS: &[&str] = &["-", "/dev/stdout"];

/// Origin recorded for entry points run from the static table
pub const STATIC_PLUGIN_ORIGIN: &str = "<static>";
