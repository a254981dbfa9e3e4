#![allow(dead_code)]

use grok::domain::markers::FactoryKind;
use grok::prelude::*;
use std::sync::Arc;

pub const APP: &str = "app";

/// A factory of `kind` defined in the `app` module.
#[must_use]
pub fn factory(name: &str, kind: FactoryKind) -> Factory {
    Factory::builder().name(name).module(APP).kind(kind).build()
}

#[must_use]
pub fn view(name: &str, render: bool) -> Factory {
    Factory::builder().name(name).module(APP).kind(FactoryKind::View).render(render).build()
}

#[must_use]
pub fn inline(name: &str) -> Member {
    Member::template(name, PageTemplate::new(format!("<p>{name}</p>"), APP))
}

/// An engine over a fresh in-memory registry, reading resources from `resources`.
#[must_use]
pub fn engine_with(resources: Arc<dyn ResourceProvider>) -> (ScanEngine, MemoryRegistry) {
    let registry = MemoryRegistry::new();
    let engine = ScanEngine::builder()
        .registry(Arc::new(registry.clone()))
        .checker(Arc::new(registry.clone()))
        .resources(resources)
        .build();
    (engine, registry)
}

#[must_use]
pub fn engine() -> (ScanEngine, MemoryRegistry) {
    engine_with(Arc::new(MemoryResources::new()))
}

#[must_use]
pub fn module(members: Vec<Member>) -> ModuleInfo {
    ModuleInfo::builder().dotted_name(APP).members(members).build()
}
