//! # Plugin Loading Errors
use std::path::PathBuf;

use crate::component::error::RegistryError;

#[derive(Debug, thiserror::Error)]
pub enum PluginLoadError {
    #[error("Plugin '{plugin}' not found: cannot open library '{}': {source}", library.display())]
    NotFound {
        plugin: String,
        library: PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error("Plugin '{plugin}': library '{}' has no entry point '{symbol}'", library.display())]
    MissingEntryPoint {
        plugin: String,
        library: PathBuf,
        symbol: String,
        #[source]
        source: libloading::Error,
    },

    #[error("Entry point '{symbol}' of plugin '{plugin}' panicked: {message}")]
    EntryPointPanicked {
        plugin: String,
        symbol: String,
        message: String,
    },

    #[error("Plugin '{plugin}' registration rejected: {source}")]
    RegistrationRejected {
        plugin: String,
        #[source]
        source: RegistryError,
    },

    #[error("Invalid plugin reference '{0}'")]
    InvalidReference(String),
}

impl PluginLoadError {
    /// Name of the plugin the error is about, when there is one.
    pub fn plugin(&self) -> Option<&str> {
        match self {
            PluginLoadError::NotFound { plugin, .. }
            | PluginLoadError::MissingEntryPoint { plugin, .. }
            | PluginLoadError::EntryPointPanicked { plugin, .. }
            | PluginLoadError::RegistrationRejected { plugin, .. } => Some(plugin),
            PluginLoadError::InvalidReference(_) => None,
        }
    }
}
