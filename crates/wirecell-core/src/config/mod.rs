//! # Configuration Sequences
//!
//! A configuration is an ordered sequence of entries, each naming a component
//! by `type` and optional `name` and carrying a `data` document for it. The
//! order matters: components are constructed and configured in it.
//!
//! - **[`sequence`]**: [`ConfigSequence`], the ordered raw entries, with the
//!   reserved-entry extraction used by the orchestrator.
//! - **[`entry`]**: [`ConfigEntry`] and validation of one raw entry.
//! - **[`merge`]**: [`merge_patch`], overlaying entry data on component defaults.
//! - **[`format`]** and **[`loader`]**: reading configuration files (JSON, and YAML
//!   or TOML when enabled) found through a search path.
//! - **[`persist`]**: writing documents back out.
pub mod entry;
pub mod error;
pub mod format;
pub mod loader;
pub mod merge;
pub mod persist;
pub mod sequence;

pub use entry::ConfigEntry;
pub use error::ConfigError;
pub use format::ConfigFormat;
pub use loader::ConfigLoader;
pub use merge::merge_patch;
pub use sequence::ConfigSequence;

#[cfg(test)]
mod tests;
