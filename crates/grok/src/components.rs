//! What the scanner registers: the factories handed to the component registry.

use crate::factory::Factory;
use crate::template::BoundTemplate;
use std::borrow::Cow;
use std::path::PathBuf;
use std::sync::Arc;

/// How a view produces its output.
#[derive(Debug, Clone)]
pub enum RenderStrategy {
    /// The view's own `render` method.
    Render,
    Template(Arc<BoundTemplate>),
}

/// A browser view: a view class, a form, or a bare template without a class.
#[derive(Debug, Clone)]
pub struct ViewFactory {
    /// `None` for views synthesized from unassociated templates.
    pub factory: Option<Arc<Factory>>,
    pub module: String,
    pub view_name: String,
    pub strategy: RenderStrategy,
}

impl ViewFactory {
    #[must_use]
    pub fn for_class(factory: Arc<Factory>, view_name: String, strategy: RenderStrategy) -> Self {
        let module = factory.module.clone();
        Self { factory: Some(factory), module, view_name, strategy }
    }

    /// A view rendering `template`, registered under the template's name.
    #[must_use]
    pub fn for_template(module: &str, template: Arc<BoundTemplate>) -> Self {
        Self {
            factory: None,
            module: module.to_owned(),
            view_name: template.name.clone(),
            strategy: RenderStrategy::Template(template),
        }
    }

    #[must_use]
    pub fn id(&self) -> String {
        self.factory.as_ref().map_or_else(
            || format!("{}.<template view {}>", self.module, self.view_name),
            |factory| factory.dotted_name(),
        )
    }

    #[must_use]
    pub fn template(&self) -> Option<&Arc<BoundTemplate>> {
        match &self.strategy {
            RenderStrategy::Template(template) => Some(template),
            RenderStrategy::Render => None,
        }
    }
}

/// One method of an XML-RPC class, published as its own view.
#[derive(Debug, Clone)]
pub struct MethodView {
    pub factory: Arc<Factory>,
    pub method: String,
}

impl MethodView {
    #[must_use]
    pub fn id(&self) -> String {
        format!("{}.{}", self.factory.dotted_name(), self.method)
    }
}

/// A package's static resource directory, served under the package's dotted name.
#[derive(Debug, Clone)]
pub struct DirectoryResource {
    pub name: String,
    pub path: PathBuf,
}

/// Anything registered as an adapter.
#[derive(Debug, Clone)]
pub enum ComponentFactory {
    Class(Arc<Factory>),
    View(Arc<ViewFactory>),
    Method(Arc<MethodView>),
    Directory(Arc<DirectoryResource>),
    /// A constant adapter result, such as the default view name.
    Value(Cow<'static, str>),
}

impl ComponentFactory {
    /// Stable identity used to key security checkers.
    #[must_use]
    pub fn id(&self) -> String {
        match self {
            Self::Class(factory) => factory.dotted_name(),
            Self::View(view) => view.id(),
            Self::Method(method) => method.id(),
            Self::Directory(resource) => format!("resource:{}", resource.name),
            Self::Value(value) => format!("value:{value}"),
        }
    }

    #[must_use]
    pub fn as_view(&self) -> Option<&ViewFactory> {
        match self {
            Self::View(view) => Some(view),
            _ => None,
        }
    }
}
