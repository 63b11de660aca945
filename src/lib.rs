//! typed-settings - a typed settings store over flat text files
//!
//! Settings are kept as raw text and read back as integers, floats, strings
//! or vectors of those. The first typed read of a setting converts its text
//! once, caches the result and commits the setting to that type; later reads
//! of the same type are cache hits, reads of another type are mismatches.
//!
//! # Modules
//!
//! - [`settings`] - The store, its conversions and the flat file codec
//! - [`lookup`] - Data index interface and single-value lookup
//! - [`config`] - Tool configuration
//! - [`error`] - Error types

pub mod config;
pub mod error;
pub mod lookup;
pub mod settings;

pub use config::Config;
pub use error::{Error, Result};
pub use settings::{FileCodec, SettingType, SettingValue, SettingsStore, TypedValue};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
