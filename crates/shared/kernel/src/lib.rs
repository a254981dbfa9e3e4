//! Kernel utilities shared across the workspace.
//! Keep this crate lightweight; it re-exports the domain model and loads configuration.
//!
//! ## Config loading
//! ```rust,ignore
//! use grok_kernel::config::load_grok_config;
//!
//! let cfg = load_grok_config(Some("grok.toml")).unwrap();
//! assert_eq!(cfg.scan.template_extension, "pt");
//! ```
pub mod config;

pub use grok_domain as domain;
