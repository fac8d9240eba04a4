use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::component::error::RegistryError;
use crate::component::key::ComponentKey;
use crate::component::registry::ComponentRegistry;
use crate::component::traits::{Application, Configurable, ExecutionContext};
use crate::config::entry::ConfigEntry;
use crate::config::error::ConfigError;
use crate::config::merge::merge_patch;
use crate::config::sequence::ConfigSequence;
use crate::kernel::constants::RESERVED_ENTRY_TYPE;
use crate::kernel::error::{Error, Phase, Result};
use crate::plugin_system::loader::PluginLoader;
use crate::plugin_system::spec::PluginSpec;

/// Lifecycle of an [`Orchestrator`]. `Finished` and `Aborted` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrchestratorState {
    Uninitialized,
    Initialized,
    Running,
    Finished,
    Aborted,
}

impl fmt::Display for OrchestratorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrchestratorState::Uninitialized => "uninitialized",
            OrchestratorState::Initialized => "initialized",
            OrchestratorState::Running => "running",
            OrchestratorState::Finished => "finished",
            OrchestratorState::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

/// Data of the reserved `wire-cell` entry.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ReservedData {
    plugins: Vec<String>,
    apps: Vec<String>,
}

/// Drives one run against a host-owned registry and plugin loader.
///
/// [`initialize`](Self::initialize) loads the plugins, constructs every
/// configured component and then configures them, in configuration order.
/// [`run`](Self::run) executes the applications in the order they were
/// requested. The first failure stops everything and nothing is undone.
pub struct Orchestrator<'h> {
    registry: &'h mut ComponentRegistry,
    loader: &'h mut PluginLoader,
    config: ConfigSequence,
    plugins: Vec<String>,
    apps: Vec<String>,
    configured: Vec<ConfigEntry>,
    state: OrchestratorState,
}

impl<'h> Orchestrator<'h> {
    pub fn new(registry: &'h mut ComponentRegistry, loader: &'h mut PluginLoader) -> Self {
        Self {
            registry,
            loader,
            config: ConfigSequence::new(),
            plugins: Vec::new(),
            apps: Vec::new(),
            configured: Vec::new(),
            state: OrchestratorState::Uninitialized,
        }
    }

    /// Request a plugin, `"<name>"` or `"<name>:<library>"`.
    pub fn add_plugin(&mut self, reference: impl Into<String>) {
        self.plugins.push(reference.into());
    }

    /// Request an application, `"<type>"` or `"<type>:<name>"`.
    pub fn add_app(&mut self, reference: impl Into<String>) {
        self.apps.push(reference.into());
    }

    /// Append configuration entries.
    pub fn add_config(&mut self, sequence: ConfigSequence) {
        self.config.extend(sequence);
    }

    pub fn config(&self) -> &ConfigSequence {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ConfigSequence {
        &mut self.config
    }

    pub fn plugins(&self) -> &[String] {
        &self.plugins
    }

    pub fn apps(&self) -> &[String] {
        &self.apps
    }

    pub fn state(&self) -> OrchestratorState {
        self.state
    }

    pub fn registry(&self) -> &ComponentRegistry {
        self.registry
    }

    pub fn loader(&self) -> &PluginLoader {
        self.loader
    }

    /// Entries as they were configured, data merged over defaults and the
    /// reserved entry left out.
    pub fn configured_sequence(&self) -> ConfigSequence {
        self.configured.iter().map(ConfigEntry::to_value).collect()
    }

    pub fn initialize(&mut self) -> Result<()> {
        self.require(OrchestratorState::Uninitialized, "initialize")?;
        let outcome = self.initialize_inner();
        self.state = match outcome {
            Ok(()) => OrchestratorState::Initialized,
            Err(_) => OrchestratorState::Aborted,
        };
        outcome
    }

    pub fn run(&mut self) -> Result<()> {
        self.require(OrchestratorState::Initialized, "run")?;
        self.state = OrchestratorState::Running;
        let outcome = self.run_inner();
        self.state = match outcome {
            Ok(()) => OrchestratorState::Finished,
            Err(_) => OrchestratorState::Aborted,
        };
        outcome
    }

    fn require(&self, expected: OrchestratorState, operation: &'static str) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(Error::InvalidState {
                operation,
                state: self.state,
            })
        }
    }

    fn initialize_inner(&mut self) -> Result<()> {
        self.take_reserved()?;
        log::info!("Plugins: {:?}", self.plugins);
        log::info!("Apps: {:?}", self.apps);

        self.load_plugins()?;
        let entries = self.construct_all()?;
        self.configure_all(entries)
    }

    /// Move the reserved entry's plugin and app lists ahead of the ones added
    /// explicitly.
    fn take_reserved(&mut self) -> Result<()> {
        let Some(entry) = self.config.pop_reserved(RESERVED_ENTRY_TYPE) else {
            return Ok(());
        };
        let reserved = match entry.data {
            Value::Null => ReservedData::default(),
            data => serde_json::from_value::<ReservedData>(data).map_err(|e| {
                ConfigError::InvalidReserved {
                    sentinel: RESERVED_ENTRY_TYPE.to_string(),
                    reason: e.to_string(),
                }
            })?,
        };
        log::debug!(
            "Reserved entry requests plugins {:?} and apps {:?}",
            reserved.plugins,
            reserved.apps
        );
        let mut plugins = reserved.plugins;
        plugins.append(&mut self.plugins);
        self.plugins = plugins;
        let mut apps = reserved.apps;
        apps.append(&mut self.apps);
        self.apps = apps;
        Ok(())
    }

    fn load_plugins(&mut self) -> Result<()> {
        for reference in &self.plugins {
            let spec = PluginSpec::parse(reference)?;
            log::info!("Loading plugin: {}", spec);
            self.loader.load(&spec, self.registry)?;
        }
        Ok(())
    }

    fn construct_all(&mut self) -> Result<Vec<ConfigEntry>> {
        let mut entries = Vec::new();
        let mut seen = HashSet::new();
        for (index, raw) in self.config.iter().enumerate() {
            let Some(entry) = ConfigEntry::from_value(index, raw)? else {
                log::debug!("Skipping empty configuration entry #{}", index);
                continue;
            };
            let key = entry.key();
            if !seen.insert(key.clone()) {
                log::warn!(
                    "Component '{}' appears more than once; it will be configured again from its defaults",
                    key
                );
            }
            log::info!("Construct component: {}", key);
            construct_configurable(self.loader, self.registry, &key)?;
            entries.push(entry);
        }
        Ok(entries)
    }

    fn configure_all(&mut self, entries: Vec<ConfigEntry>) -> Result<()> {
        for entry in entries {
            let key = entry.key();
            let configurable = self
                .registry
                .find_as::<dyn Configurable>(&key.type_name, &key.name)
                .map_err(|e| match e {
                    RegistryError::NotConstructed { key } => Error::Inconsistent {
                        phase: Phase::Configuration,
                        message: format!("'{}' was constructed but is missing from the registry", key),
                    },
                    other => Error::Registry(other),
                })?;

            let merged = merge_patch(configurable.default_configuration(), &entry.data);
            log::info!("Configuring component: {}", key);
            configurable
                .configure(&merged)
                .map_err(|source| Error::Configure {
                    key: key.clone(),
                    source,
                })?;
            self.configured
                .push(ConfigEntry::new(entry.type_name, entry.name, merged));
        }
        Ok(())
    }

    fn run_inner(&mut self) -> Result<()> {
        // Resolve every app first so a bad reference fails before anything runs.
        let mut apps: Vec<(ComponentKey, Arc<dyn Application>)> = Vec::with_capacity(self.apps.len());
        for reference in &self.apps {
            let key = ComponentKey::parse(reference);
            let app = self
                .registry
                .find_as::<dyn Application>(&key.type_name, &key.name)?;
            apps.push((key, app));
        }

        let registry: &ComponentRegistry = self.registry;
        for (key, app) in &apps {
            log::info!("Executing app: {}", key);
            app.execute(&ExecutionContext::new(registry, key))
                .map_err(|source| Error::Execute {
                    key: key.clone(),
                    source,
                })?;
        }
        Ok(())
    }
}

/// Construct `key` and require it to be configurable, asking the loader for a
/// per-type entry point when the type is not known yet.
fn construct_configurable(
    loader: &mut PluginLoader,
    registry: &mut ComponentRegistry,
    key: &ComponentKey,
) -> Result<()> {
    let construct_error = |source: RegistryError| Error::Construct {
        key: key.clone(),
        source,
    };
    match registry.construct_as::<dyn Configurable>(&key.type_name, &key.name) {
        Ok(_) => Ok(()),
        Err(RegistryError::UnknownType { type_name }) => {
            if !loader.resolve_component(&type_name, registry)? {
                log::error!("No constructor for component type '{}'", type_name);
                return Err(construct_error(RegistryError::UnknownType { type_name }));
            }
            match registry.construct_as::<dyn Configurable>(&key.type_name, &key.name) {
                Ok(_) => Ok(()),
                Err(RegistryError::UnknownType { .. }) => Err(Error::Inconsistent {
                    phase: Phase::Construction,
                    message: format!("'{}' resolved but has no constructor", type_name),
                }),
                Err(e) => Err(construct_error(e)),
            }
        }
        Err(e) => Err(construct_error(e)),
    }
}
