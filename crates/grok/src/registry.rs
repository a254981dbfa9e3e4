//! The component registry the scanner talks to, and an in-memory implementation.

use crate::components::ComponentFactory;
use crate::error::GrokError;
use crate::events::{EventDispatcher, Handler, Subject};
use crate::factory::Instance;
use fxhash::FxHashMap;
use grok_domain::interface::{Interface, TypeRef};
use grok_domain::permission::Permission;
use parking_lot::RwLock;
use std::borrow::Cow;
use std::fmt::Debug;
use std::sync::Arc;

/// Registration sink for adapters, utilities and event handlers.
///
/// Implementations decide how duplicates are treated; the scanner never deduplicates.
pub trait ComponentRegistry: Debug + Send + Sync {
    /// Registers `factory` for the required types in `adapts`, providing `provides` under `name`.
    ///
    /// # Errors
    /// Implementation specific.
    fn provide_adapter(
        &self,
        factory: ComponentFactory,
        adapts: Vec<TypeRef>,
        provides: Interface,
        name: &str,
    ) -> Result<(), GrokError>;

    /// # Errors
    /// Implementation specific.
    fn provide_utility(&self, instance: Instance, provides: Interface, name: &str) -> Result<(), GrokError>;

    /// # Errors
    /// Implementation specific.
    fn provide_handler(&self, handler: Handler, adapts: Vec<TypeRef>) -> Result<(), GrokError>;
}

/// Access rules attached to a registered component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Checker {
    /// The component is trusted and never proxied.
    NoProxy,
    /// The listed attributes require `permission`.
    Names { names: Vec<Cow<'static, str>>, permission: Permission },
}

pub trait SecurityChecker: Debug + Send + Sync {
    /// # Errors
    /// Implementation specific.
    fn define_checker(&self, component: &ComponentFactory, checker: Checker) -> Result<(), GrokError>;
}

/// A snapshot of one adapter registration.
#[derive(Debug, Clone)]
pub struct AdapterRegistration {
    pub factory: ComponentFactory,
    pub adapts: Vec<TypeRef>,
    pub provides: Interface,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct AdapterKey {
    adapts: Vec<TypeRef>,
    provides: Interface,
    name: String,
}

#[derive(Debug, Default)]
struct RegistryState {
    adapters: FxHashMap<AdapterKey, ComponentFactory>,
    utilities: FxHashMap<(Interface, String), Instance>,
    checkers: FxHashMap<String, Checker>,
}

/// In-memory registry. Later registrations for the same key replace earlier ones.
///
/// Cloning is cheap and clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistry {
    state: Arc<RwLock<RegistryState>>,
    events: Arc<EventDispatcher>,
}

impl MemoryRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn lookup_adapter(&self, adapts: &[TypeRef], provides: &Interface, name: &str) -> Option<ComponentFactory> {
        let key = AdapterKey { adapts: adapts.to_vec(), provides: provides.clone(), name: name.to_owned() };
        self.state.read().adapters.get(&key).cloned()
    }

    /// Every adapter registration, ordered by name, then provided interface.
    #[must_use]
    pub fn adapters(&self) -> Vec<AdapterRegistration> {
        let mut all: Vec<_> = self
            .state
            .read()
            .adapters
            .iter()
            .map(|(key, factory)| AdapterRegistration {
                factory: factory.clone(),
                adapts: key.adapts.clone(),
                provides: key.provides.clone(),
                name: key.name.clone(),
            })
            .collect();
        all.sort_by(|a, b| (&a.name, &a.provides, &a.adapts).cmp(&(&b.name, &b.provides, &b.adapts)));
        all
    }

    #[must_use]
    pub fn utility(&self, provides: &Interface, name: &str) -> Option<Instance> {
        self.state.read().utilities.get(&(provides.clone(), name.to_owned())).cloned()
    }

    #[must_use]
    pub fn checker(&self, component_id: &str) -> Option<Checker> {
        self.state.read().checkers.get(component_id).cloned()
    }

    /// Raises `event` for `subject`; returns how many handlers ran.
    ///
    /// # Errors
    /// The first failing handler's error.
    pub fn notify(&self, subject: &dyn Subject, event: &Interface) -> Result<usize, GrokError> {
        self.events.notify(subject, event)
    }

    #[must_use]
    pub fn adapter_count(&self) -> usize {
        self.state.read().adapters.len()
    }

    #[must_use]
    pub fn utility_count(&self) -> usize {
        self.state.read().utilities.len()
    }

    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.events.len()
    }
}

impl ComponentRegistry for MemoryRegistry {
    fn provide_adapter(
        &self,
        factory: ComponentFactory,
        adapts: Vec<TypeRef>,
        provides: Interface,
        name: &str,
    ) -> Result<(), GrokError> {
        let key = AdapterKey { adapts, provides, name: name.to_owned() };
        self.state.write().adapters.insert(key, factory);
        Ok(())
    }

    fn provide_utility(&self, instance: Instance, provides: Interface, name: &str) -> Result<(), GrokError> {
        self.state.write().utilities.insert((provides, name.to_owned()), instance);
        Ok(())
    }

    fn provide_handler(&self, handler: Handler, adapts: Vec<TypeRef>) -> Result<(), GrokError> {
        self.events.subscribe(handler, adapts);
        Ok(())
    }
}

impl SecurityChecker for MemoryRegistry {
    fn define_checker(&self, component: &ComponentFactory, checker: Checker) -> Result<(), GrokError> {
        self.state.write().checkers.insert(component.id(), checker);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_registration_wins() {
        let registry = MemoryRegistry::new();
        let adapts = vec![TypeRef::class("app.Page")];
        registry
            .provide_adapter(ComponentFactory::Value("first".into()), adapts.clone(), Interface::BASE, "x")
            .unwrap();
        registry
            .provide_adapter(ComponentFactory::Value("second".into()), adapts.clone(), Interface::BASE, "x")
            .unwrap();

        assert_eq!(registry.adapter_count(), 1);
        let found = registry.lookup_adapter(&adapts, &Interface::BASE, "x").unwrap();
        assert!(matches!(found, ComponentFactory::Value(v) if v == "second"));
        assert!(registry.lookup_adapter(&adapts, &Interface::BASE, "y").is_none());
    }

    #[test]
    fn test_clones_share_state() {
        let registry = MemoryRegistry::new();
        let view = registry.clone();
        registry.provide_utility(Arc::new(7_u8), Interface::new("ISeven"), "").unwrap();
        let seven = view.utility(&Interface::new("ISeven"), "").unwrap();
        assert_eq!(seven.downcast_ref::<u8>(), Some(&7));

        let component = ComponentFactory::Value("v".into());
        registry.define_checker(&component, Checker::NoProxy).unwrap();
        assert_eq!(view.checker(&component.id()), Some(Checker::NoProxy));
    }
}
