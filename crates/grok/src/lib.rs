//! # Grok
//!
//! Convention-based component scanning. A module declares factories (models,
//! views, adapters, utilities...) with lightweight annotations; the scanner
//! infers what it can from conventions and registers everything with a
//! [`ComponentRegistry`](registry::ComponentRegistry).
//!
//! - The single model defined in a module is the implicit context of its views and adapters.
//! - A view `Index` renders through a template named `index`, inline or in the module's
//!   resource directory, unless it defines its own `render` method.
//! - Templates no view claims become views of their own.
//! - A package's `static` directory is published under the package's dotted name.
//!
//! ## Usage
//! ```rust
//! use grok::prelude::*;
//! use grok::domain::markers::FactoryKind;
//! use std::sync::Arc;
//!
//! let module = ModuleInfo::builder()
//!     .dotted_name("app")
//!     .members(vec![
//!         Member::factory(Factory::builder().name("Page").module("app").kind(FactoryKind::Model).build()),
//!         Member::factory(Factory::builder().name("Index").module("app").kind(FactoryKind::View).render(true).build()),
//!     ])
//!     .build();
//!
//! let registry = MemoryRegistry::new();
//! let engine = ScanEngine::builder()
//!     .registry(Arc::new(registry.clone()))
//!     .checker(Arc::new(registry.clone()))
//!     .resources(Arc::new(MemoryResources::new()))
//!     .build();
//!
//! let report = engine.scan(&module).unwrap();
//! assert_eq!(report.adapters, 1);
//! ```

pub mod components;
pub mod context;
pub mod error;
pub mod events;
pub mod factory;
pub mod grokker;
pub mod handlers;
pub mod module;
pub mod registry;
pub mod resources;
pub mod scan;
pub mod site;
pub mod template;

pub use grok_domain as domain;
pub use scan::setup;

pub mod prelude {
    pub use crate::components::{ComponentFactory, RenderStrategy, ViewFactory};
    pub use crate::error::{GrokError, GrokErrorExt};
    pub use crate::events::{Handler, Notification, Subject};
    pub use crate::factory::{Constructor, Factory, FactorySettings, Instance, LocalUtilityInfo};
    pub use crate::module::{Member, ModuleCatalog, ModuleInfo, ModuleLoader, ModuleSettings};
    pub use crate::registry::{Checker, ComponentRegistry, MemoryRegistry, SecurityChecker};
    pub use crate::resources::{FsResources, MemoryResources, ResourceProvider};
    pub use crate::scan::{ScanEngine, ScanReport};
    pub use crate::site::{LocalSite, Site};
    pub use crate::template::PageTemplate;
}
