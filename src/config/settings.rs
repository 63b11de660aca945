//! Tool configuration
//!
//! Layered configuration: defaults → config file → environment variables

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Error, Result};
use crate::settings::{CommentStyle, DEFAULT_COLUMN_WIDTH, FileCodec, SettingsStore, VectorFormat};

/// Prefix for environment overrides (`TYPED_SETTINGS_COLUMN_WIDTH`, ...)
pub const ENV_PREFIX: &str = "TYPED_SETTINGS_";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Which lines of a settings file are comments
    pub comment_style: CommentStyle,

    /// How vector setters join elements
    pub vector_format: VectorFormat,

    /// Width of the name column when saving
    pub column_width: usize,

    /// Keep committed types of settings overwritten by a load
    pub keep_cached_on_load: bool,

    /// Enable debug logging
    pub debug: bool,

    /// Log file path (if set, logs to file instead of stderr)
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            comment_style: CommentStyle::default(),
            vector_format: VectorFormat::default(),
            column_width: DEFAULT_COLUMN_WIDTH,
            keep_cached_on_load: false,
            debug: false,
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from the default config file and the environment
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load configuration from `path` (if it exists) and the environment
    pub fn load_from(path: &Path) -> Result<Self> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        Ok(config)
    }

    /// Get the configuration file path
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Save current configuration to the default config file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Save current configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|_e| {
                Error::Config(ConfigError::DirectoryCreationFailed(parent.to_path_buf()))
            })?;
        }

        let toml = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        std::fs::write(path, toml).map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        Ok(())
    }

    /// File codec configured by this config
    pub fn codec(&self) -> FileCodec {
        FileCodec::new()
            .with_comment_style(self.comment_style)
            .with_column_width(self.column_width)
            .with_keep_cached_on_load(self.keep_cached_on_load)
    }

    /// Empty store configured by this config
    pub fn store(&self) -> SettingsStore {
        SettingsStore::new().with_vector_format(self.vector_format)
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("com", "typed-settings", "typed-settings").ok_or_else(|| {
            Error::Config(ConfigError::LoadFailed(
                "Could not determine home directory".to_string(),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.comment_style, CommentStyle::LineStart);
        assert_eq!(config.vector_format, VectorFormat::Spaced);
        assert_eq!(config.column_width, 25);
        assert!(!config.keep_cached_on_load);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("comment_style = \"line_start\""));
        assert!(toml.contains("vector_format = \"spaced\""));
    }

    #[test]
    fn test_load_from_file_layers_over_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "comment_style = \"anywhere\"\nvector_format = \"concatenated\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.comment_style, CommentStyle::Anywhere);
        assert_eq!(config.vector_format, VectorFormat::Concatenated);
        assert_eq!(config.column_width, 25);

        let codec = config.codec();
        assert_eq!(codec.comment_style, CommentStyle::Anywhere);
        assert_eq!(config.store().vector_format(), VectorFormat::Concatenated);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let config = Config {
            column_width: 12,
            keep_cached_on_load: true,
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.column_width, 12);
        assert!(loaded.keep_cached_on_load);
    }
}
