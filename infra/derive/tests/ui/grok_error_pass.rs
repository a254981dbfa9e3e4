use grok_derive::grok_error;
use std::borrow::Cow;

#[grok_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Conflict{}: {message}", format_context(.context))]
    Conflict { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<(), DemoError> {
    Err(std::io::Error::other("boom")).context("reading templates")
}

fn main() {
    let err = read().unwrap_err();
    assert_eq!(err.kind(), "Io");
    assert_eq!(err.to_string(), "IO error (reading templates): boom");

    let internal: DemoError = "oops".into();
    assert_eq!(internal.kind(), "Internal");

    let conflict: Result<(), DemoError> =
        Err(DemoError::Conflict { message: "duplicate".into(), context: None });
    let conflict = conflict.context("index.pt").unwrap_err();
    assert_eq!(conflict.to_string(), "Conflict (index.pt): duplicate");
}
