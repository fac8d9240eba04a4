use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::component::error::RegistryError;
use crate::component::key::ComponentKey;
use crate::component::traits::{Capability, Component, Configurable};

/// Constructor registered for a component type.
pub type Constructor<T> = fn() -> T;

/// Registry the host process builds once and hands to the plugin loader and
/// the orchestrator.
pub type ComponentRegistry = FactoryRegistry<Component>;

/// Table of constructors keyed by type and of live instances keyed by
/// [`ComponentKey`].
///
/// Instances are created at most once per key and are never replaced or
/// removed. `T` is a cheap handle (an `Arc` or a [`Component`]) so that every
/// lookup of a key hands out the same underlying object.
pub struct FactoryRegistry<T> {
    constructors: BTreeMap<String, Constructor<T>>,
    instances: HashMap<ComponentKey, T>,
    construction_order: Vec<ComponentKey>,
    rejections: Vec<RegistryError>,
}

// Manual Debug implementation, the handles themselves need not be Debug.
impl<T> fmt::Debug for FactoryRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let types: Vec<&String> = self.constructors.keys().collect();
        f.debug_struct("FactoryRegistry")
            .field("types", &types)
            .field("instances", &self.construction_order)
            .finish()
    }
}

impl<T: Clone> FactoryRegistry<T> {
    pub fn new() -> Self {
        Self {
            constructors: BTreeMap::new(),
            instances: HashMap::new(),
            construction_order: Vec::new(),
            rejections: Vec::new(),
        }
    }

    /// Register the constructor for `type_name`.
    ///
    /// Registering the same constructor again is a no-op. A different
    /// constructor for a type that already has one is rejected and the
    /// existing one is kept.
    pub fn register_constructor(
        &mut self,
        type_name: impl Into<String>,
        ctor: Constructor<T>,
    ) -> Result<(), RegistryError> {
        let type_name = type_name.into();
        match self.constructors.get(&type_name) {
            Some(existing) if std::ptr::fn_addr_eq(*existing, ctor) => {
                log::debug!("Constructor for '{}' already registered", type_name);
                Ok(())
            }
            Some(_) => {
                log::error!(
                    "Refusing to replace the registered constructor for component type '{}'",
                    type_name
                );
                Err(RegistryError::ConflictingConstructor { type_name })
            }
            None => {
                log::debug!("Registered constructor for '{}'", type_name);
                self.constructors.insert(type_name, ctor);
                Ok(())
            }
        }
    }

    /// Constructor registered for `type_name`, if any. Never instantiates.
    pub fn lookup_factory(&self, type_name: &str) -> Option<Constructor<T>> {
        self.constructors.get(type_name).copied()
    }

    /// Get-or-create the instance for `(type_name, name)`.
    ///
    /// An existing instance is returned unchanged.
    pub fn construct(&mut self, type_name: &str, name: &str) -> Result<T, RegistryError> {
        let key = ComponentKey::new(type_name, name);
        if let Some(existing) = self.instances.get(&key) {
            return Ok(existing.clone());
        }
        let ctor = self
            .lookup_factory(type_name)
            .ok_or_else(|| RegistryError::UnknownType {
                type_name: type_name.to_string(),
            })?;
        let instance = ctor();
        log::debug!("Constructed component '{}'", key);
        self.instances.insert(key.clone(), instance.clone());
        self.construction_order.push(key);
        Ok(instance)
    }

    /// Existing instance for `(type_name, name)`. Never constructs.
    pub fn find(&self, type_name: &str, name: &str) -> Result<T, RegistryError> {
        let key = ComponentKey::new(type_name, name);
        match self.instances.get(&key) {
            Some(instance) => Ok(instance.clone()),
            None => Err(RegistryError::NotConstructed { key }),
        }
    }

    pub fn contains(&self, key: &ComponentKey) -> bool {
        self.instances.contains_key(key)
    }

    /// Every registered type, sorted.
    pub fn known_types(&self) -> Vec<String> {
        self.constructors.keys().cloned().collect()
    }

    /// Keys of all live instances in the order they were constructed.
    pub fn constructed(&self) -> &[ComponentKey] {
        &self.construction_order
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Keep a registration failure that happened where it could not be returned,
    /// inside a plugin entry point.
    pub fn record_rejection(&mut self, error: RegistryError) {
        self.rejections.push(error);
    }

    /// Drain the failures recorded by [`record_rejection`](Self::record_rejection).
    pub fn take_rejections(&mut self) -> Vec<RegistryError> {
        std::mem::take(&mut self.rejections)
    }
}

impl<T: Clone> Default for FactoryRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Capability-typed access on the host registry.
impl FactoryRegistry<Component> {
    /// [`construct`](Self::construct) and require capability `C`.
    pub fn construct_as<C>(&mut self, type_name: &str, name: &str) -> Result<Arc<C>, RegistryError>
    where
        C: Capability + ?Sized,
    {
        let component = self.construct(type_name, name)?;
        Self::view::<C>(&component, type_name, name)
    }

    /// [`find`](Self::find) and require capability `C`.
    pub fn find_as<C>(&self, type_name: &str, name: &str) -> Result<Arc<C>, RegistryError>
    where
        C: Capability + ?Sized,
    {
        let component = self.find(type_name, name)?;
        Self::view::<C>(&component, type_name, name)
    }

    /// Default configuration of `type_name` from a throwaway instance that is
    /// not stored in the registry.
    pub fn default_configuration(&self, type_name: &str) -> Result<Value, RegistryError> {
        let ctor = self
            .lookup_factory(type_name)
            .ok_or_else(|| RegistryError::UnknownType {
                type_name: type_name.to_string(),
            })?;
        let scratch = ctor();
        let configurable = Self::view::<dyn Configurable>(&scratch, type_name, "")?;
        Ok(configurable.default_configuration())
    }

    fn view<C>(component: &Component, type_name: &str, name: &str) -> Result<Arc<C>, RegistryError>
    where
        C: Capability + ?Sized,
    {
        C::view(component).ok_or_else(|| RegistryError::MissingCapability {
            key: ComponentKey::new(type_name, name),
            capability: C::NAME,
        })
    }
}
