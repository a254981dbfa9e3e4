use grok_domain::config::{GrokConfig, LoggingConfig, ScanConfig};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let scan = ScanConfig::default();
    assert_eq!(scan.template_extension, "pt");
    assert_eq!(scan.static_directory, "static");
    assert_eq!(scan.default_view_name, "index");
    assert!(scan.recursive);

    let logging = LoggingConfig::default();
    assert_eq!(logging.name, "grok");
    assert_eq!(logging.level, "info");
    assert!(logging.console);
    assert!(logging.path.is_none());
}

#[test]
fn grok_config_deserializes_partial_sections() {
    let raw = json!({
        "scan": { "template_extension": "html", "recursive": false },
        "logging": { "level": "debug", "json": true }
    });

    let cfg: GrokConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.scan.template_extension, "html");
    assert!(!cfg.scan.recursive);
    assert_eq!(cfg.scan.static_directory, "static");
    assert_eq!(cfg.logging.level, "debug");
    assert!(cfg.logging.json);
}

#[test]
fn grok_config_is_copy_on_write() {
    let base = GrokConfig::default();
    let mut changed = base.clone();
    changed.scan.default_view_name = "main".to_owned();

    assert_eq!(base.scan.default_view_name, "index");
    assert_eq!(changed.scan.default_view_name, "main");
}
