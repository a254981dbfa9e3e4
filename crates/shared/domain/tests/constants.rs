use grok_domain::constants::{
    DEFAULT_FOLDER, DEFAULT_VIEW_NAME, INVOKE, MODEL_CLASS, PUBLIC_PERMISSION, STATIC_DIRECTORY,
    TEMPLATE_EXTENSION,
};

#[test]
fn constants_match_convention_strings() {
    assert_eq!(DEFAULT_VIEW_NAME, "index");
    assert_eq!(STATIC_DIRECTORY, "static");
    assert_eq!(TEMPLATE_EXTENSION, "pt");
    assert_eq!(PUBLIC_PERMISSION, "grok.Public");
    assert_eq!(INVOKE, "call");
    assert_eq!(DEFAULT_FOLDER, "default");
    assert_eq!(MODEL_CLASS, "grok.Model");
}
