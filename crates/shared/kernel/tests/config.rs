use grok_kernel::config::load_grok_config;
use std::fs;

#[test]
fn loads_logging_and_scan_sections_from_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grok.toml");
    fs::write(
        &path,
        "[scan]\nstatic_directory = \"assets\"\n\n[logging]\nlevel = \"debug\"\nconsole = false\n",
    )
    .unwrap();

    let cfg = load_grok_config(Some(&path)).unwrap();
    assert_eq!(cfg.scan.static_directory, "assets");
    assert_eq!(cfg.scan.template_extension, "pt");
    assert_eq!(cfg.logging.level, "debug");
    assert!(!cfg.logging.console);
}

#[test]
fn domain_is_reexported() {
    let cfg = grok_kernel::domain::config::GrokConfig::default();
    assert!(cfg.scan.recursive);
}
