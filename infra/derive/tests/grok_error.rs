#[test]
fn grok_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/grok_error_pass.rs");
}
