pub mod fixtures;

use fixtures::*;
use grok::domain::interface::{Interface, TypeRef};
use grok::domain::markers::FactoryKind;
use grok::prelude::*;
use grok::template::TemplateOrigin;
use std::fs;
use std::path::Path;
use std::sync::Arc;

fn write_template(root: &Path, directory: &str, file: &str, body: &[u8]) {
    let dir = root.join(directory);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(file), body).unwrap();
}

fn app_on_disk(root: &Path, members: Vec<Member>) -> ModuleInfo {
    ModuleInfo::builder().dotted_name(APP).directory(root).members(members).build()
}

#[test]
fn test_filesystem_templates_are_found() {
    let tmp = tempfile::tempdir().unwrap();
    write_template(tmp.path(), "app", "index.pt", b"<h1>index</h1>");
    write_template(tmp.path(), "app", "about.pt", b"<h1>about</h1>");
    write_template(tmp.path(), "app", "notes.txt", b"not a template");

    let (engine, registry) = engine_with(Arc::new(FsResources));
    let app = app_on_disk(
        tmp.path(),
        vec![Member::factory(factory("Page", FactoryKind::Model)), Member::factory(view("Index", false))],
    );

    let report = engine.scan(&app).unwrap();
    assert_eq!(report.templates, 2);
    assert_eq!(report.template_views, 1);

    let adapts = [TypeRef::class("app.Page"), Interface::DEFAULT_BROWSER_LAYER.into()];
    let index = registry.lookup_adapter(&adapts, &Interface::BASE, "index").unwrap();
    let template = index.as_view().unwrap().template().unwrap().clone();
    assert_eq!(template.template.source(), "<h1>index</h1>");
    assert!(matches!(&template.origin, TemplateOrigin::Filesystem { directory, .. } if directory == "app"));

    assert!(registry.lookup_adapter(&adapts, &Interface::BASE, "about").unwrap().as_view().unwrap().factory.is_none());
}

#[test]
fn test_resources_annotation_changes_directory() {
    let tmp = tempfile::tempdir().unwrap();
    write_template(tmp.path(), "skin", "index.pt", b"<p/>");
    write_template(tmp.path(), "app", "ignored.pt", b"<p/>");

    let (engine, registry) = engine_with(Arc::new(FsResources));
    let app = ModuleInfo::builder()
        .dotted_name(APP)
        .directory(tmp.path())
        .settings(ModuleSettings::builder().resources("skin").build())
        .members(vec![Member::factory(factory("Page", FactoryKind::Model)), Member::factory(view("Index", false))])
        .build();

    let report = engine.scan(&app).unwrap();
    assert_eq!(report.templates, 1);
    assert_eq!(registry.adapter_count(), 1);
}

#[test]
fn test_resources_annotation_outside_module_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("app");
    fs::create_dir_all(&root).unwrap();
    write_template(tmp.path(), "outside", "index.pt", b"<p/>");

    let (engine, registry) = engine_with(Arc::new(FsResources));
    let app = ModuleInfo::builder()
        .dotted_name(APP)
        .directory(root.as_path())
        .settings(ModuleSettings::builder().resources("../outside").build())
        .members(vec![Member::factory(factory("Page", FactoryKind::Model)), Member::factory(view("Index", false))])
        .build();

    let err = engine.scan(&app).unwrap_err();
    assert_eq!(err.kind(), "Configuration");
    assert!(err.to_string().contains("'../outside'"));
    assert!(err.to_string().contains("'app'"));
    assert_eq!(registry.adapter_count(), 0);
}

#[test]
fn test_inline_and_file_template_conflict() {
    let tmp = tempfile::tempdir().unwrap();
    write_template(tmp.path(), "app", "index.pt", b"<p/>");

    let (engine, _) = engine_with(Arc::new(FsResources));
    let app = app_on_disk(tmp.path(), vec![Member::factory(factory("Page", FactoryKind::Model)), inline("index")]);

    let err = engine.scan(&app).unwrap_err();
    assert_eq!(err.kind(), "Conflict");
    assert!(err.to_string().contains(
        "Conflicting templates found for name 'index' in module 'app', both inline and in resource directory 'app'."
    ));
}

#[test]
fn test_undecodable_template_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    write_template(tmp.path(), "app", "broken.pt", &[0xc3, 0x28]);

    let (engine, _) = engine_with(Arc::new(FsResources));
    let app = app_on_disk(tmp.path(), vec![Member::factory(factory("Page", FactoryKind::Model))]);

    let err = engine.scan(&app).unwrap_err();
    assert_eq!(err.kind(), "Configuration");
    assert!(err.to_string().contains("app/broken.pt"));
}

#[test]
fn test_missing_template_directory_is_fine() {
    let tmp = tempfile::tempdir().unwrap();
    let (engine, _) = engine_with(Arc::new(FsResources));
    let app = app_on_disk(tmp.path(), vec![Member::factory(factory("Page", FactoryKind::Model))]);

    assert_eq!(engine.scan(&app).unwrap().templates, 0);
}

#[test]
fn test_memory_resources_and_custom_extension() {
    let resources = MemoryResources::new();
    resources.insert(APP, "app/index.html", "<p>html</p>");
    resources.insert(APP, "app/index.pt", "<p>pt</p>");

    let registry = MemoryRegistry::new();
    let mut config = grok::domain::config::ScanConfig::default();
    config.template_extension = "html".to_owned();
    let engine = ScanEngine::builder()
        .registry(Arc::new(registry.clone()))
        .checker(Arc::new(registry.clone()))
        .resources(Arc::new(resources))
        .config(config)
        .build();

    let report = engine.scan(&module(vec![Member::factory(factory("Page", FactoryKind::Model))])).unwrap();
    assert_eq!(report.templates, 1);

    let adapts = [TypeRef::class("app.Page"), Interface::DEFAULT_BROWSER_LAYER.into()];
    let view = registry.lookup_adapter(&adapts, &Interface::BASE, "index").unwrap();
    assert_eq!(view.as_view().unwrap().template().unwrap().template.source(), "<p>html</p>");
}
