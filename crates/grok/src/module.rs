//! Module descriptors and the catalog modules are resolved from.

use crate::error::GrokError;
use crate::events::Handler;
use crate::factory::{Constructor, Factory};
use crate::template::PageTemplate;
use fxhash::FxHashMap;
use grok_domain::interface::{Interface, TypeRef};
use grok_domain::permission::Permission;
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use typed_builder::TypedBuilder;

/// A value bound to a name in a module namespace.
#[derive(Debug, Clone)]
pub enum MemberValue {
    Factory(Arc<Factory>),
    Template(Arc<PageTemplate>),
    /// Anything else, imported or not. Only the defining module matters.
    Other { module: String },
}

impl MemberValue {
    /// Dotted name of the module the value was defined in.
    #[must_use]
    pub fn defining_module(&self) -> &str {
        match self {
            Self::Factory(factory) => &factory.module,
            Self::Template(template) => template.module(),
            Self::Other { module } => module,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Member {
    pub name: String,
    pub value: MemberValue,
}

impl Member {
    /// A factory bound under its own class name.
    #[must_use]
    pub fn factory(factory: Factory) -> Self {
        Self { name: factory.name.clone(), value: MemberValue::Factory(Arc::new(factory)) }
    }

    /// A factory bound under another name (an alias or an import).
    pub fn alias(name: impl Into<String>, factory: Arc<Factory>) -> Self {
        Self { name: name.into(), value: MemberValue::Factory(factory) }
    }

    pub fn template(name: impl Into<String>, template: PageTemplate) -> Self {
        Self { name: name.into(), value: MemberValue::Template(Arc::new(template)) }
    }

    pub fn other(name: impl Into<String>, module: impl Into<String>) -> Self {
        Self { name: name.into(), value: MemberValue::Other { module: module.into() } }
    }
}

/// An event handler declared with the module-level `subscribe` annotation.
#[derive(Debug, Clone)]
pub struct SubscriberInfo {
    pub handler: Handler,
    pub adapts: Vec<TypeRef>,
}

/// A utility declared with the module-level `global_utility` annotation.
#[derive(Debug, Clone, TypedBuilder)]
pub struct GlobalUtilityInfo {
    pub constructor: Constructor,
    #[builder(setter(into))]
    pub provides: Interface,
    #[builder(default, setter(into))]
    pub name: String,
}

/// Module-level annotations.
#[derive(Debug, Clone, Default, TypedBuilder)]
pub struct ModuleSettings {
    #[builder(default, setter(strip_option, into))]
    pub context: Option<TypeRef>,
    /// Resource directory searched for templates instead of the module's short name.
    #[builder(default, setter(strip_option, into))]
    pub resources: Option<String>,
    #[builder(default)]
    pub subscribers: Vec<SubscriberInfo>,
    #[builder(default)]
    pub global_utilities: Vec<GlobalUtilityInfo>,
    #[builder(default)]
    pub permissions: Vec<Permission>,
}

/// A loaded module: its namespace, annotations and place on disk.
#[derive(Debug, TypedBuilder)]
pub struct ModuleInfo {
    #[builder(setter(into))]
    dotted_name: String,
    #[builder(default)]
    package: bool,
    /// Directory resources are resolved against. For a package, the package directory.
    #[builder(default, setter(strip_option, into))]
    directory: Option<PathBuf>,
    #[builder(default)]
    settings: ModuleSettings,
    #[builder(default)]
    members: Vec<Member>,
    #[builder(default)]
    submodules: Vec<Arc<ModuleInfo>>,
}

impl ModuleInfo {
    #[must_use]
    pub fn dotted_name(&self) -> &str {
        &self.dotted_name
    }

    /// Last segment of the dotted name.
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.dotted_name.rsplit('.').next().unwrap_or(&self.dotted_name)
    }

    #[must_use]
    pub const fn is_package(&self) -> bool {
        self.package
    }

    #[must_use]
    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    #[must_use]
    pub const fn settings(&self) -> &ModuleSettings {
        &self.settings
    }

    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    #[must_use]
    pub fn submodules(&self) -> &[Arc<Self>] {
        &self.submodules
    }

    /// Finds a direct submodule by its short name.
    #[must_use]
    pub fn submodule(&self, short_name: &str) -> Option<&Arc<Self>> {
        self.submodules.iter().find(|m| m.short_name() == short_name)
    }

    /// Members defined in this module (imports are skipped), sorted by binding name.
    #[must_use]
    pub fn local_members(&self) -> Vec<&Member> {
        let mut local: Vec<_> = self
            .members
            .iter()
            .filter(|m| m.value.defining_module() == self.dotted_name)
            .collect();
        local.sort_by(|a, b| a.name.cmp(&b.name));
        local
    }
}

/// Resolves dotted names to loaded modules.
pub trait ModuleLoader: Send + Sync {
    /// # Errors
    /// [`GrokError::Import`] when no module carries the name.
    fn resolve(&self, dotted_name: &str) -> Result<Arc<ModuleInfo>, GrokError>;
}

/// In-memory [`ModuleLoader`] holding every module it was given, submodules included.
#[derive(Debug, Default)]
pub struct ModuleCatalog {
    modules: RwLock<FxHashMap<String, Arc<ModuleInfo>>>,
}

impl ModuleCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, module: Arc<ModuleInfo>) {
        let mut modules = self.modules.write();
        let mut pending = vec![module];
        while let Some(module) = pending.pop() {
            pending.extend(module.submodules().iter().cloned());
            modules.insert(module.dotted_name().to_owned(), module);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.read().len()
    }
}

impl ModuleLoader for ModuleCatalog {
    fn resolve(&self, dotted_name: &str) -> Result<Arc<ModuleInfo>, GrokError> {
        self.modules
            .read()
            .get(dotted_name)
            .cloned()
            .ok_or_else(|| GrokError::import(format!("No module named '{dotted_name}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grok_domain::markers::FactoryKind;

    fn model(name: &str, module: &str) -> Arc<Factory> {
        Arc::new(Factory::builder().name(name).module(module).kind(FactoryKind::Model).build())
    }

    #[test]
    fn test_local_members_skip_imports_and_sort() {
        let module = ModuleInfo::builder()
            .dotted_name("app.blog")
            .members(vec![
                Member::alias("Zed", model("Zed", "app.blog")),
                Member::alias("Imported", model("Imported", "other")),
                Member::alias("Alpha", model("Alpha", "app.blog")),
                Member::other("helper", "app.blog"),
            ])
            .build();

        let names: Vec<_> = module.local_members().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Zed", "helper"]);
        assert_eq!(module.short_name(), "blog");
    }

    #[test]
    fn test_catalog_resolves_submodules() {
        let child = Arc::new(ModuleInfo::builder().dotted_name("app.views").build());
        let root = Arc::new(ModuleInfo::builder().dotted_name("app").package(true).submodules(vec![child]).build());

        let catalog = ModuleCatalog::new();
        catalog.insert(root);
        assert_eq!(catalog.len(), 2);
        assert!(catalog.resolve("app.views").is_ok());

        let err = catalog.resolve("app.missing").unwrap_err();
        assert_eq!(err.kind(), "Import");
    }
}
