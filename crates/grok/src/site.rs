//! Sites and their deferred local utility installation.

use crate::error::GrokError;
use crate::events::{Handler, Notification, Subject};
use crate::factory::{Instance, LocalUtilityInfo};
use crate::registry::{ComponentRegistry, MemoryRegistry};
use grok_domain::constants::DEFAULT_FOLDER;
use grok_domain::interface::TypeRef;
use parking_lot::RwLock;
use std::any::Any;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// A named collection of objects.
#[derive(Debug, Default)]
pub struct Container {
    items: RwLock<BTreeMap<String, Instance>>,
}

impl Container {
    /// `hint` if it is free, otherwise `hint-2`, `hint-3` and so on.
    #[must_use]
    pub fn choose_name(&self, hint: &str) -> String {
        let items = self.items.read();
        if !items.contains_key(hint) {
            return hint.to_owned();
        }
        (2_usize..)
            .map(|n| format!("{hint}-{n}"))
            .find(|candidate| !items.contains_key(candidate))
            .unwrap_or_else(|| hint.to_owned())
    }

    /// # Errors
    /// [`GrokError::Conflict`] if the name is taken.
    pub fn insert(&self, name: impl Into<String>, item: Instance) -> Result<(), GrokError> {
        let name = name.into();
        let mut items = self.items.write();
        if items.contains_key(&name) {
            return Err(GrokError::conflict(format!("The name '{name}' is already used in the container")));
        }
        items.insert(name, item);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Instance> {
        self.items.read().get(name).cloned()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.items.read().contains_key(name)
    }

    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.items.read().keys().cloned().collect()
    }
}

/// A container with its own local component registry.
pub trait Site: Send + Sync {
    /// Visible items of the site.
    fn container(&self) -> &Container;

    /// The site manager's hidden `default` folder.
    fn default_folder(&self) -> &Container;

    fn local_registry(&self) -> &dyn ComponentRegistry;
}

/// A basic site whose local registry lives in memory.
#[derive(Debug)]
pub struct LocalSite {
    class: TypeRef,
    items: Container,
    default_folder: Container,
    registry: MemoryRegistry,
}

impl LocalSite {
    /// A site instance of the class `class` (usually [`Factory::type_ref`](crate::factory::Factory::type_ref)).
    #[must_use]
    pub fn new(class: TypeRef) -> Self {
        Self {
            class,
            items: Container::default(),
            default_folder: Container::default(),
            registry: MemoryRegistry::new(),
        }
    }

    #[must_use]
    pub const fn registry(&self) -> &MemoryRegistry {
        &self.registry
    }

    /// Resolves a path-like name: `default` denotes the site manager folder.
    #[must_use]
    pub fn folder(&self, name: &str) -> Option<&Container> {
        (name == DEFAULT_FOLDER).then_some(&self.default_folder)
    }
}

impl Site for LocalSite {
    fn container(&self) -> &Container {
        &self.items
    }

    fn default_folder(&self) -> &Container {
        &self.default_folder
    }

    fn local_registry(&self) -> &dyn ComponentRegistry {
        &self.registry
    }
}

impl Subject for LocalSite {
    fn type_ref(&self) -> TypeRef {
        self.class.clone()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_site(&self) -> Option<&dyn Site> {
        Some(self)
    }
}

/// Installs a site class's local utilities once an instance is added to a container.
#[derive(Debug, Clone)]
pub struct LocalUtilitySubscriber {
    infos: Arc<[LocalUtilityInfo]>,
}

impl LocalUtilitySubscriber {
    #[must_use]
    pub fn new(infos: &[LocalUtilityInfo]) -> Self {
        Self { infos: Arc::from(infos) }
    }

    /// # Errors
    /// The subject is not a site, a container name is taken, or registration fails.
    pub fn install(&self, notification: &Notification<'_>) -> Result<(), GrokError> {
        let site = notification.subject.as_site().ok_or_else(|| {
            GrokError::configuration(format!(
                "Local utilities can only be installed into a site, not {}",
                notification.subject.type_ref()
            ))
        })?;

        for info in self.infos.iter() {
            let utility = info.constructor.construct();
            let container = if info.hide { site.default_folder() } else { site.container() };
            let name = info
                .name_in_container
                .clone()
                .unwrap_or_else(|| container.choose_name(&info.factory_name));

            container.insert(name.clone(), Arc::clone(&utility))?;
            if let Some(setup) = &info.setup {
                setup.run(&utility);
            }
            site.local_registry().provide_utility(utility, info.provides.clone(), &info.name)?;
            debug!(provides = %info.provides, name = %info.name, container_name = %name, hidden = info.hide, "Installed local utility");
        }
        Ok(())
    }

    #[must_use]
    pub fn into_handler(self) -> Handler {
        Handler::new(move |notification| self.install(notification))
    }
}
