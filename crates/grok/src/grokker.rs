//! Grokkers: the rules that turn module members into registrations.

use crate::components::ComponentFactory;
use crate::error::GrokError;
use crate::events::Handler;
use crate::factory::{Factory, Instance};
use crate::module::ModuleInfo;
use crate::registry::{Checker, ComponentRegistry, SecurityChecker};
use crate::resources::ResourceProvider;
use crate::scan::ScanReport;
use crate::template::{PageTemplate, TemplateRegistry};
use grok_domain::config::ScanConfig;
use grok_domain::context::Context;
use grok_domain::interface::{Interface, TypeRef};
use grok_domain::markers::Markers;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::debug;

/// Everything a grokker sees while a module is scanned.
#[derive(Debug)]
pub struct ScanContext<'a> {
    pub module: &'a ModuleInfo,
    /// The module-level context, which may still be a sentinel.
    pub context: Context,
    pub templates: TemplateRegistry,
    pub registry: &'a dyn ComponentRegistry,
    pub checker: &'a dyn SecurityChecker,
    pub resources: &'a dyn ResourceProvider,
    pub config: &'a ScanConfig,
    pub report: ScanReport,
}

impl ScanContext<'_> {
    /// # Errors
    /// Whatever the registry returns.
    pub fn provide_adapter(
        &mut self,
        factory: ComponentFactory,
        adapts: Vec<TypeRef>,
        provides: Interface,
        name: &str,
    ) -> Result<(), GrokError> {
        debug!(
            factory = %factory.id(),
            adapts = ?adapts.iter().map(TypeRef::name).collect::<Vec<_>>(),
            provides = %provides,
            name,
            "Registering adapter"
        );
        self.registry.provide_adapter(factory, adapts, provides, name)?;
        self.report.adapters += 1;
        Ok(())
    }

    /// # Errors
    /// Whatever the registry returns.
    pub fn provide_utility(&mut self, instance: Instance, provides: Interface, name: &str) -> Result<(), GrokError> {
        debug!(provides = %provides, name, "Registering utility");
        self.registry.provide_utility(instance, provides, name)?;
        self.report.utilities += 1;
        Ok(())
    }

    /// # Errors
    /// Whatever the registry returns.
    pub fn provide_handler(&mut self, handler: Handler, adapts: Vec<TypeRef>) -> Result<(), GrokError> {
        debug!(adapts = ?adapts.iter().map(TypeRef::name).collect::<Vec<_>>(), "Registering handler");
        self.registry.provide_handler(handler, adapts)?;
        self.report.handlers += 1;
        Ok(())
    }

    /// # Errors
    /// Whatever the security checker returns.
    pub fn define_checker(&mut self, component: &ComponentFactory, checker: Checker) -> Result<(), GrokError> {
        self.checker.define_checker(component, checker)?;
        self.report.checkers += 1;
        Ok(())
    }
}

/// Handles factories carrying a marker.
pub trait ClassGrokker: Debug + Send + Sync {
    fn marker(&self) -> Markers;

    /// # Errors
    /// Configuration and conflict errors abort the module scan.
    fn grok(&self, cx: &mut ScanContext<'_>, name: &str, factory: &Arc<Factory>) -> Result<(), GrokError>;
}

/// Handles template instances bound in the module namespace.
pub trait InstanceGrokker: Debug + Send + Sync {
    /// # Errors
    /// Configuration and conflict errors abort the module scan.
    fn grok(&self, cx: &mut ScanContext<'_>, name: &str, template: &Arc<PageTemplate>) -> Result<(), GrokError>;
}

/// Runs once per module.
pub trait ModuleGrokker: Debug + Send + Sync {
    /// # Errors
    /// Configuration and conflict errors abort the module scan.
    fn grok(&self, cx: &mut ScanContext<'_>) -> Result<(), GrokError>;
}

#[derive(Debug)]
pub enum GrokkerKind {
    Class(Box<dyn ClassGrokker>),
    Instance(Box<dyn InstanceGrokker>),
    Module(Box<dyn ModuleGrokker>),
}

/// A grokker with its scheduling attributes.
#[derive(Debug)]
pub struct Grokker {
    pub name: &'static str,
    /// Higher runs first.
    pub priority: i32,
    /// Leave a matched member available to later grokkers.
    pub continue_scanning: bool,
    pub kind: GrokkerKind,
}

impl Grokker {
    pub fn class(name: &'static str, grokker: impl ClassGrokker + 'static) -> Self {
        Self { name, priority: 0, continue_scanning: false, kind: GrokkerKind::Class(Box::new(grokker)) }
    }

    pub fn instance(name: &'static str, grokker: impl InstanceGrokker + 'static) -> Self {
        Self { name, priority: 0, continue_scanning: false, kind: GrokkerKind::Instance(Box::new(grokker)) }
    }

    pub fn module(name: &'static str, grokker: impl ModuleGrokker + 'static) -> Self {
        Self { name, priority: 0, continue_scanning: false, kind: GrokkerKind::Module(Box::new(grokker)) }
    }

    #[must_use]
    pub const fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub const fn continue_scanning(mut self) -> Self {
        self.continue_scanning = true;
        self
    }
}

/// The ordered set of grokkers a scan runs.
#[derive(Debug)]
pub struct GrokkerRegistry {
    grokkers: Vec<Grokker>,
}

impl GrokkerRegistry {
    /// An empty registry; see [`GrokkerRegistry::with_defaults`] for the standard rules.
    #[must_use]
    pub const fn empty() -> Self {
        Self { grokkers: Vec::new() }
    }

    #[must_use]
    pub fn with_defaults() -> Self {
        Self { grokkers: crate::handlers::default_grokkers() }
    }

    pub fn register(&mut self, grokker: Grokker) {
        self.grokkers.push(grokker);
    }

    /// Grokkers by descending priority; equal priorities keep registration order.
    #[must_use]
    pub fn ordered(&self) -> Vec<&Grokker> {
        let mut ordered: Vec<_> = self.grokkers.iter().collect();
        ordered.sort_by_key(|g| std::cmp::Reverse(g.priority));
        ordered
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.grokkers.len()
    }
}

impl Default for GrokkerRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Noop;

    impl ModuleGrokker for Noop {
        fn grok(&self, _cx: &mut ScanContext<'_>) -> Result<(), GrokError> {
            Ok(())
        }
    }

    #[test]
    fn test_ordering_is_stable_by_priority() {
        let mut registry = GrokkerRegistry::empty();
        registry.register(Grokker::module("first", Noop));
        registry.register(Grokker::module("high", Noop).priority(10));
        registry.register(Grokker::module("second", Noop));
        registry.register(Grokker::module("low", Noop).priority(-1));

        let names: Vec<_> = registry.ordered().iter().map(|g| g.name).collect();
        assert_eq!(names, vec!["high", "first", "second", "low"]);
    }

    #[test]
    fn test_defaults_put_templates_first() {
        let registry = GrokkerRegistry::with_defaults();
        let ordered = registry.ordered();
        assert_eq!(ordered[0].priority, 1000);
        assert_eq!(ordered[1].priority, 999);
        assert_eq!(ordered[2].priority, 500);
        assert!(ordered[2].continue_scanning);
    }
}
