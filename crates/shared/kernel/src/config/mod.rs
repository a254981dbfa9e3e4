use config::{Config, Environment, File};
use grok_domain::config::GrokConfig;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

const DEFAULT_CONFIG_FILE: &str = "grok";
const ENV_PREFIX: &str = "GROK";

/// Custom error type for config loading.
#[grok_derive::grok_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// A reusable configuration loader that combines file-based settings with environment overrides.
///
/// Layers, lowest priority first:
/// 1. **Base File**: Loads settings from a file (e.g., `grok.toml`). If no path is provided, it
///    looks for an optional `grok` file in the current working directory.
/// 2. **Environment Overrides**: Overlays values from environment variables prefixed with `GROK__`.
///    Nested structures are accessed using double underscores (e.g., `GROK__SCAN__RECURSIVE`
///    maps to `scan.recursive`).
///
/// An explicitly supplied file is required; the implicit default file is not.
///
/// # Errors
/// This function will return an error if:
/// * An explicitly specified configuration file cannot be found.
/// * The content of the file or the environment does not match the structure of type `T`.
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let (effective_path, required) = path.map_or_else(
        || (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        |p| (p.as_ref().to_path_buf(), true),
    );

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(required))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .convert_case(config::Case::Snake),
        );

    info!(path = %effective_path.display(), required, "Loading config");

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}

/// Loads the scanner configuration, falling back to defaults for absent keys.
///
/// # Errors
/// See [`load_config`].
pub fn load_grok_config(path: Option<impl AsRef<Path>>) -> Result<GrokConfig, ConfigError> {
    load_config::<GrokConfig>(path)
}
