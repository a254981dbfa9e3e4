//! Factory descriptors: the class-like members a module declares.

use crate::error::GrokError;
use grok_domain::interface::{Interface, TypeRef};
use grok_domain::markers::{FactoryKind, Markers};
use grok_domain::permission::Permission;
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use typed_builder::TypedBuilder;

/// A constructed component: a utility, a local utility, an adapter product.
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Produces fresh instances of a factory.
#[derive(Clone)]
pub struct Constructor(Arc<dyn Fn() -> Instance + Send + Sync>);

impl Constructor {
    pub fn new<F, T>(make: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
        T: Any + Send + Sync,
    {
        Self(Arc::new(move || Arc::new(make()) as Instance))
    }

    #[must_use]
    pub fn construct(&self) -> Instance {
        (self.0)()
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Constructor(..)")
    }
}

/// Callback run on a freshly created local utility before it is registered.
#[derive(Clone)]
pub struct Setup(Arc<dyn Fn(&Instance) + Send + Sync>);

impl Setup {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&Instance) + Send + Sync + 'static,
    {
        Self(Arc::new(callback))
    }

    pub fn run(&self, utility: &Instance) {
        (self.0)(utility);
    }
}

impl fmt::Debug for Setup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Setup(..)")
    }
}

/// A local utility a site installs into itself when it is added to a container.
#[derive(Debug, Clone, TypedBuilder)]
pub struct LocalUtilityInfo {
    /// Name hint for the container when no explicit `name_in_container` is given.
    #[builder(setter(into))]
    pub factory_name: String,
    pub constructor: Constructor,
    #[builder(setter(into))]
    pub provides: Interface,
    #[builder(default, setter(into))]
    pub name: String,
    #[builder(default, setter(strip_option, into))]
    pub name_in_container: Option<String>,
    /// Hidden utilities go into the site manager's `default` folder.
    #[builder(default = true)]
    pub hide: bool,
    #[builder(default, setter(strip_option))]
    pub setup: Option<Setup>,
}

/// Class-level annotations.
#[derive(Debug, Clone, Default, TypedBuilder)]
pub struct FactorySettings {
    #[builder(default, setter(strip_option, into))]
    pub context: Option<TypeRef>,
    #[builder(default, setter(strip_option, into))]
    pub name: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub template: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub provides: Option<Interface>,
    #[builder(default, setter(strip_option, into))]
    pub require: Option<Permission>,
    #[builder(default)]
    pub local_utilities: Vec<LocalUtilityInfo>,
}

/// A class-like member of a module, as seen by the scanner.
///
/// ```rust
/// use grok::factory::Factory;
/// use grok_domain::markers::FactoryKind;
///
/// let index = Factory::builder().name("Index").module("app").kind(FactoryKind::View).render(true).build();
/// assert_eq!(index.dotted_name(), "app.Index");
/// ```
#[derive(Debug, TypedBuilder)]
pub struct Factory {
    #[builder(setter(into))]
    pub name: String,
    /// Dotted name of the module the factory is defined in.
    #[builder(setter(into))]
    pub module: String,
    pub kind: FactoryKind,
    /// Also a site: installs its local utilities when added to a container.
    #[builder(default)]
    pub site: bool,
    #[builder(default)]
    pub settings: FactorySettings,
    /// Interfaces the factory declares to implement.
    #[builder(default)]
    pub implements: Vec<Interface>,
    /// What a multi-adapter adapts.
    #[builder(default)]
    pub adapts: Vec<TypeRef>,
    /// Whether the factory defines its own `render` method.
    #[builder(default)]
    pub render: bool,
    #[builder(default)]
    pub methods: Vec<String>,
    #[builder(default, setter(strip_option))]
    pub constructor: Option<Constructor>,
}

impl Factory {
    #[must_use]
    pub fn dotted_name(&self) -> String {
        format!("{}.{}", self.module, self.name)
    }

    #[must_use]
    pub fn type_ref(&self) -> TypeRef {
        TypeRef::class(self.dotted_name())
    }

    #[must_use]
    pub fn markers(&self) -> Markers {
        let markers = self.kind.markers();
        if self.site { markers | Markers::SITE } else { markers }
    }

    /// Methods published over XML-RPC: everything not starting with an underscore.
    pub fn public_methods(&self) -> impl Iterator<Item = &str> {
        self.methods.iter().map(String::as_str).filter(|m| !m.starts_with('_'))
    }

    /// Creates an instance through the factory's constructor.
    ///
    /// # Errors
    /// [`GrokError::Configuration`] if the factory has no constructor.
    pub fn instantiate(&self) -> Result<Instance, GrokError> {
        self.constructor.as_ref().map(Constructor::construct).ok_or_else(|| {
            GrokError::configuration(format!("{self} cannot be instantiated: no constructor given."))
        })
    }
}

impl fmt::Display for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.module, self.name)
    }
}
