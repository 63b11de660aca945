//! Error types for typed-settings
//!
//! Uses `thiserror` for ergonomic error definitions with automatic `Display` and `Error` impls.

use std::path::PathBuf;

use thiserror::Error;

use crate::settings::SettingType;

/// Top-level error type for typed-settings
#[derive(Error, Debug)]
pub enum Error {
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Settings file error: {0}")]
    Codec(#[from] CodecError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Typed access errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettingsError {
    #[error("Setting '{name}' is committed as {committed}, not {requested}")]
    TypeMismatch {
        name: String,
        committed: SettingType,
        requested: SettingType,
    },
}

/// Settings file load/save errors
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("File {path} cannot be opened: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File {path} cannot be opened for writing: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("Failed to save configuration: {0}")]
    SaveFailed(String),

    #[error("Failed to create config directory: {0}")]
    DirectoryCreationFailed(PathBuf),
}

/// Lookup tool errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("No setting named '{0}'")]
    NotFound(String),

    #[error("{index} too large for array")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Not supported for that type.")]
    Unsupported,
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SettingsError::TypeMismatch {
            name: "width".to_string(),
            committed: SettingType::Int,
            requested: SettingType::Float,
        };
        assert_eq!(err.to_string(), "Setting 'width' is committed as int, not float");

        let err = CodecError::Read {
            path: PathBuf::from("/tmp/foo.cfg"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.to_string().contains("/tmp/foo.cfg"));

        let err = LookupError::IndexOutOfRange { index: 3, len: 2 };
        assert_eq!(err.to_string(), "3 too large for array");
    }

    #[test]
    fn test_error_conversion() {
        let lookup_err = LookupError::Unsupported;
        let top_err: Error = lookup_err.into();
        assert!(matches!(top_err, Error::Lookup(LookupError::Unsupported)));

        let config_err = ConfigError::LoadFailed("bad".to_string());
        let _top_err: Error = config_err.into();
    }
}
