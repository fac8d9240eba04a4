//! # Component Errors
//!
//! [`RegistryError`] covers lookups and registrations against the
//! [`FactoryRegistry`](super::FactoryRegistry). [`ComponentError`] is what a
//! component returns when it rejects a configuration or fails to execute.
use crate::component::key::ComponentKey;
use crate::config::error::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("no constructor registered for component type '{type_name}'")]
    UnknownType { type_name: String },

    #[error("component '{key}' has not been constructed")]
    NotConstructed { key: ComponentKey },

    #[error("component type '{type_name}' already has a different constructor registered")]
    ConflictingConstructor { type_name: String },

    #[error("component '{key}' does not provide the {capability} capability")]
    MissingCapability {
        key: ComponentKey,
        capability: &'static str,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ComponentError {
    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    #[error("execution failed: {message}")]
    ExecutionFailed { message: String },

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ComponentError {
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        ComponentError::InvalidConfiguration {
            message: message.into(),
            source: None,
        }
    }

    pub fn execution(message: impl Into<String>) -> Self {
        ComponentError::ExecutionFailed {
            message: message.into(),
        }
    }
}

/// A configuration document that does not deserialize into the component's settings.
impl From<serde_json::Error> for ComponentError {
    fn from(err: serde_json::Error) -> Self {
        ComponentError::InvalidConfiguration {
            message: err.to_string(),
            source: Some(err),
        }
    }
}
