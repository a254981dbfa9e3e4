use crate::constants::{DEFAULT_VIEW_NAME, STATIC_DIRECTORY, TEMPLATE_EXTENSION};
use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level configuration shared by the scanner and its infrastructure.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GrokConfigInner {
    pub scan: ScanConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct GrokConfig {
    #[serde(flatten, default)]
    inner: Arc<GrokConfigInner>,
}

impl Deref for GrokConfig {
    type Target = GrokConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for GrokConfig {
    fn deref_mut(&mut self) -> &mut GrokConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Scanner conventions.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// File extension (without the dot) of templates in resource directories.
    pub template_extension: String,
    /// Resource subdirectory served for package modules.
    pub static_directory: String,
    /// View name a model falls back to when published without one.
    pub default_view_name: String,
    /// Whether submodules of a package are scanned as well.
    pub recursive: bool,
}

/// Logging sink configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub name: String,
    pub level: String,
    pub console: bool,
    pub path: Option<PathBuf>,
    pub json: bool,
    pub env_filter: Option<String>,
}

// --- Default ---

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            template_extension: TEMPLATE_EXTENSION.to_owned(),
            static_directory: STATIC_DIRECTORY.to_owned(),
            default_view_name: DEFAULT_VIEW_NAME.to_owned(),
            recursive: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            name: "grok".to_owned(),
            level: "info".to_owned(),
            console: true,
            path: None,
            json: false,
            env_filter: None,
        }
    }
}
