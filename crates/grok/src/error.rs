use std::borrow::Cow;

/// Errors raised while scanning a module.
///
/// Every variant aborts the scan of the current module. Registrations issued
/// before the failure are not rolled back.
#[grok_derive::grok_error]
pub enum GrokError {
    /// Missing or ambiguous context, missing or conflicting rendering strategy,
    /// invalid annotation values.
    #[error("Configuration error{}: {message}", format_context(.context))]
    Configuration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Duplicate template names, colliding resource names, ambiguous interface inference.
    #[error("Conflict{}: {message}", format_context(.context))]
    Conflict { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A dotted name that does not resolve to a known module.
    #[error("Import error{}: {message}", format_context(.context))]
    Import { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Resource I/O failure{}: {source}", format_context(.context))]
    Resource { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl GrokError {
    pub(crate) fn configuration(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Configuration { message: message.into(), context: None }
    }

    pub(crate) fn conflict(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Conflict { message: message.into(), context: None }
    }

    pub(crate) fn import(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Import { message: message.into(), context: None }
    }
}
