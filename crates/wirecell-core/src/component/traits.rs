use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::component::error::ComponentError;
use crate::component::key::ComponentKey;
use crate::component::registry::ComponentRegistry;

/// A component that accepts a configuration document.
///
/// `configure` is called once per configuration entry with the entry's data
/// merged over [`default_configuration`](Configurable::default_configuration).
/// Instances are shared, so implementations keep their state behind interior
/// mutability.
pub trait Configurable: Send + Sync {
    /// The hard-coded configuration this component starts from.
    fn default_configuration(&self) -> Value;

    fn configure(&self, config: &Value) -> Result<(), ComponentError>;
}

/// A component the orchestrator executes during the run phase.
pub trait Application: Send + Sync {
    fn execute(&self, context: &ExecutionContext<'_>) -> Result<(), ComponentError>;
}

/// What an application sees while it executes: its own key and a read-only
/// view of the registry.
pub struct ExecutionContext<'a> {
    registry: &'a ComponentRegistry,
    key: &'a ComponentKey,
}

impl<'a> ExecutionContext<'a> {
    pub fn new(registry: &'a ComponentRegistry, key: &'a ComponentKey) -> Self {
        Self { registry, key }
    }

    pub fn registry(&self) -> &'a ComponentRegistry {
        self.registry
    }

    /// Key of the application being executed.
    pub fn key(&self) -> &'a ComponentKey {
        self.key
    }
}

/// Handle to one component object and the capability views it provides.
///
/// Clones share the same object, so a component registered as both
/// [`Configurable`] and [`Application`] is configured and executed as one
/// instance.
#[derive(Clone)]
pub struct Component {
    object: Arc<dyn Any + Send + Sync>,
    type_label: &'static str,
    configurable: Option<Arc<dyn Configurable>>,
    application: Option<Arc<dyn Application>>,
}

impl Component {
    /// Start building a handle around `object`; capabilities are opted into on the builder.
    pub fn builder<C: Send + Sync + 'static>(object: C) -> ComponentBuilder<C> {
        ComponentBuilder {
            object: Arc::new(object),
            configurable: None,
            application: None,
        }
    }

    pub fn as_configurable(&self) -> Option<&Arc<dyn Configurable>> {
        self.configurable.as_ref()
    }

    pub fn as_application(&self) -> Option<&Arc<dyn Application>> {
        self.application.as_ref()
    }

    /// Recover the concrete object.
    pub fn downcast<C: Send + Sync + 'static>(&self) -> Option<Arc<C>> {
        Arc::downcast::<C>(self.object.clone()).ok()
    }

    /// Whether both handles point at the same underlying object.
    pub fn same_instance(&self, other: &Component) -> bool {
        Arc::ptr_eq(&self.object, &other.object)
    }

    /// Names of the capabilities this component provides.
    pub fn capabilities(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.configurable.is_some() {
            names.push(<dyn Configurable as Capability>::NAME);
        }
        if self.application.is_some() {
            names.push(<dyn Application as Capability>::NAME);
        }
        names
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("object", &self.type_label)
            .field("capabilities", &self.capabilities())
            .finish()
    }
}

/// Builder returned by [`Component::builder`].
pub struct ComponentBuilder<C> {
    object: Arc<C>,
    configurable: Option<Arc<dyn Configurable>>,
    application: Option<Arc<dyn Application>>,
}

impl<C: Send + Sync + 'static> ComponentBuilder<C> {
    pub fn configurable(mut self) -> Self
    where
        C: Configurable,
    {
        self.configurable = Some(self.object.clone() as Arc<dyn Configurable>);
        self
    }

    pub fn application(mut self) -> Self
    where
        C: Application,
    {
        self.application = Some(self.object.clone() as Arc<dyn Application>);
        self
    }

    pub fn build(self) -> Component {
        Component {
            object: self.object,
            type_label: std::any::type_name::<C>(),
            configurable: self.configurable,
            application: self.application,
        }
    }
}

/// A capability view that can be taken out of a [`Component`].
pub trait Capability: 'static {
    /// Name used in logs and errors.
    const NAME: &'static str;

    fn view(component: &Component) -> Option<Arc<Self>>;
}

impl Capability for dyn Configurable {
    const NAME: &'static str = "Configurable";

    fn view(component: &Component) -> Option<Arc<Self>> {
        component.configurable.clone()
    }
}

impl Capability for dyn Application {
    const NAME: &'static str = "Application";

    fn view(component: &Component) -> Option<Arc<Self>> {
        component.application.clone()
    }
}
