//! # Domain Models
//!
//! Pure grok types with minimal dependencies (`serde`, `bitflags`, `strum`).
//! Keep it lean: no I/O and no scanning logic, just data and simple helpers.

pub mod config;
pub mod constants;
pub mod context;
pub mod interface;
pub mod markers;
pub mod permission;
