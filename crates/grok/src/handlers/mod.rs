//! The standard grokkers.

mod adapter;
mod model;
mod permission;
mod site;
mod static_resources;
mod subscriber;
mod templates;
mod traverser;
mod utility;
mod view;
mod xmlrpc;

pub use adapter::{AdapterGrokker, MultiAdapterGrokker};
pub use model::ModelGrokker;
pub use permission::PermissionGrokker;
pub use site::SiteGrokker;
pub use static_resources::StaticResourcesGrokker;
pub use subscriber::SubscriberGrokker;
pub use templates::{FilesystemTemplateGrokker, InlineTemplateGrokker};
pub use traverser::TraverserGrokker;
pub use utility::{GlobalUtilityDirectiveGrokker, GlobalUtilityGrokker};
pub use view::ViewGrokker;
pub use xmlrpc::XmlRpcGrokker;

use crate::error::GrokError;
use crate::factory::Factory;
use crate::grokker::Grokker;
use grok_domain::interface::Interface;

pub(crate) const INLINE_TEMPLATE_PRIORITY: i32 = 1000;
pub(crate) const FILESYSTEM_TEMPLATE_PRIORITY: i32 = 999;
pub(crate) const SITE_PRIORITY: i32 = 500;

pub(crate) fn default_grokkers() -> Vec<Grokker> {
    vec![
        Grokker::instance("inline_templates", InlineTemplateGrokker).priority(INLINE_TEMPLATE_PRIORITY),
        Grokker::module("filesystem_templates", FilesystemTemplateGrokker)
            .priority(FILESYSTEM_TEMPLATE_PRIORITY),
        Grokker::class("site", SiteGrokker).priority(SITE_PRIORITY).continue_scanning(),
        Grokker::class("model", ModelGrokker),
        Grokker::class("adapter", AdapterGrokker),
        Grokker::class("multi_adapter", MultiAdapterGrokker),
        Grokker::class("global_utility", GlobalUtilityGrokker),
        Grokker::class("xmlrpc", XmlRpcGrokker),
        Grokker::class("view", ViewGrokker),
        Grokker::class("traverser", TraverserGrokker),
        Grokker::module("subscribers", SubscriberGrokker),
        Grokker::module("static_resources", StaticResourcesGrokker),
        Grokker::module("global_utility_directives", GlobalUtilityDirectiveGrokker),
        Grokker::module("permissions", PermissionGrokker),
    ]
}

/// The `provides` annotation, or the single interface the factory implements.
fn provided_interface(factory: &Factory) -> Result<Interface, GrokError> {
    if let Some(provides) = &factory.settings.provides {
        return Ok(provides.clone());
    }
    match factory.implements.as_slice() {
        [only] => Ok(only.clone()),
        [] => Err(GrokError::configuration(format!(
            "{factory} must implement at least one interface (use the implements annotation)."
        ))),
        _ => Err(GrokError::conflict(format!(
            "{factory} is implementing more than one interface (use the provides annotation to disambiguate)."
        ))),
    }
}

/// The `name` annotation, or `default`.
fn component_name<'a>(factory: &'a Factory, default: &'a str) -> &'a str {
    factory.settings.name.as_deref().unwrap_or(default)
}
