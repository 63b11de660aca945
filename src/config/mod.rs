//! Configuration module
//!
//! Handles user configuration (`config.toml` in the platform config directory)
//! that selects settings-file parsing and writing policies.

mod settings;

pub use settings::*;
