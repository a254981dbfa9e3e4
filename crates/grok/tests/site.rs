pub mod fixtures;

use fixtures::*;
use grok::domain::interface::{Interface, TypeRef};
use grok::domain::markers::FactoryKind;
use grok::factory::Setup;
use grok::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
struct Cache;

#[derive(Debug, Default)]
struct Catalog;

fn site_factory(local_utilities: Vec<LocalUtilityInfo>) -> Factory {
    Factory::builder()
        .name("App")
        .module(APP)
        .kind(FactoryKind::Container)
        .site(true)
        .settings(FactorySettings::builder().local_utilities(local_utilities).build())
        .build()
}

#[test]
fn test_local_utilities_install_on_add() {
    let configured = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&configured);

    let cache = LocalUtilityInfo::builder()
        .factory_name("Cache")
        .constructor(Constructor::new(Cache::default))
        .provides("ICache")
        .setup(Setup::new(move |utility| flag.store(utility.is::<Cache>(), Ordering::SeqCst)))
        .build();
    let catalog = LocalUtilityInfo::builder()
        .factory_name("Catalog")
        .constructor(Constructor::new(Catalog::default))
        .provides("ICatalog")
        .name("main")
        .name_in_container("catalog")
        .hide(false)
        .build();

    let (engine, registry) = engine();
    let report = engine.scan(&module(vec![Member::factory(site_factory(vec![cache, catalog]))])).unwrap();
    assert_eq!(report.handlers, 1);
    // App is a model as well as a site.
    assert_eq!(registry.checker("app.App"), Some(Checker::NoProxy));

    let site = LocalSite::new(TypeRef::class("app.App"));
    assert!(site.registry().utility(&Interface::new("ICache"), "").is_none());

    assert_eq!(registry.notify(&site, &Interface::OBJECT_ADDED_EVENT).unwrap(), 1);

    assert!(configured.load(Ordering::SeqCst));
    assert!(site.default_folder().get("Cache").is_some_and(|u| u.is::<Cache>()));
    assert!(site.container().contains("catalog"));
    assert!(!site.container().contains("Cache"));
    assert!(site.registry().utility(&Interface::new("ICache"), "").is_some());
    assert!(site.registry().utility(&Interface::new("ICatalog"), "main").is_some());
}

#[test]
fn test_second_install_picks_fresh_names() {
    let cache = LocalUtilityInfo::builder()
        .factory_name("Cache")
        .constructor(Constructor::new(Cache::default))
        .provides("ICache")
        .build();

    let (engine, registry) = engine();
    engine.scan(&module(vec![Member::factory(site_factory(vec![cache]))])).unwrap();

    let site = LocalSite::new(TypeRef::class("app.App"));
    registry.notify(&site, &Interface::OBJECT_ADDED_EVENT).unwrap();
    registry.notify(&site, &Interface::OBJECT_ADDED_EVENT).unwrap();
    assert_eq!(site.default_folder().names(), vec!["Cache", "Cache-2"]);
}

#[test]
fn test_site_without_local_utilities_subscribes_nothing() {
    let (engine, registry) = engine();
    engine.scan(&module(vec![Member::factory(site_factory(vec![]))])).unwrap();
    assert_eq!(registry.handler_count(), 0);
}

#[test]
fn test_other_classes_do_not_trigger_installation() {
    let cache = LocalUtilityInfo::builder()
        .factory_name("Cache")
        .constructor(Constructor::new(Cache::default))
        .provides("ICache")
        .build();
    let (engine, registry) = engine();
    engine.scan(&module(vec![Member::factory(site_factory(vec![cache]))])).unwrap();

    let other = LocalSite::new(TypeRef::class("app.Other"));
    assert_eq!(registry.notify(&other, &Interface::OBJECT_ADDED_EVENT).unwrap(), 0);
    assert!(other.default_folder().names().is_empty());
}
