//! # Kernel Errors
//!
//! [`Error`] is what the orchestrator returns. It wraps the subsystem errors
//! and adds the failures that only make sense with a component key attached.
use std::fmt;

use thiserror::Error as ThisError;

use crate::component::error::{ComponentError, RegistryError};
use crate::component::key::ComponentKey;
use crate::config::error::ConfigError;
use crate::kernel::orchestrator::OrchestratorState;
use crate::plugin_system::error::PluginLoadError;

/// Orchestration phase an internal fault was detected in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Construction,
    Configuration,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Construction => "construction",
            Phase::Configuration => "configuration",
        };
        f.write_str(name)
    }
}

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("Plugin error: {0}")]
    Plugin(#[from] PluginLoadError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Failed to construct '{key}': {source}")]
    Construct {
        key: ComponentKey,
        #[source]
        source: RegistryError,
    },

    #[error("Failed to configure '{key}': {source}")]
    Configure {
        key: ComponentKey,
        #[source]
        source: ComponentError,
    },

    #[error("Application '{key}' failed: {source}")]
    Execute {
        key: ComponentKey,
        #[source]
        source: ComponentError,
    },

    /// The runtime's own bookkeeping disagrees with itself.
    #[error("Internal inconsistency during {phase}: {message}")]
    Inconsistent { phase: Phase, message: String },

    #[error("Cannot {operation} while the orchestrator is {state}")]
    InvalidState {
        operation: &'static str,
        state: OrchestratorState,
    },
}

impl Error {
    /// Process exit code for this failure. Never zero.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Plugin(_) => 2,
            Error::Config(_) => 3,
            Error::Registry(_) | Error::Construct { .. } => 4,
            Error::Configure { .. } => 5,
            Error::Execute { .. } => 6,
            Error::Inconsistent { .. } | Error::InvalidState { .. } => 70,
        }
    }

    /// Key of the component the failure is about, if any.
    pub fn component(&self) -> Option<&ComponentKey> {
        match self {
            Error::Construct { key, .. }
            | Error::Configure { key, .. }
            | Error::Execute { key, .. } => Some(key),
            Error::Registry(RegistryError::NotConstructed { key })
            | Error::Registry(RegistryError::MissingCapability { key, .. }) => Some(key),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
