//! Catalog configuration.
//!
//! # Responsibility
//! - Load `CatalogConfig` from a JSON file, filling missing fields with
//!   defaults.
//! - Reject values the storage and logging layers cannot use.
//!
//! # Invariants
//! - `db_path` is never empty after `validate()`.
//! - `log_dir`, when set, is absolute.

use crate::logging::{LogLevel, LogSettings};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const DEFAULT_DB_FILE: &str = "catalog.db";

/// Config file read from the working directory when none is named.
pub const DEFAULT_CONFIG_FILE: &str = "catalog.json";

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    InvalidValue {
        field: &'static str,
        message: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to access config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse config `{}`: {source}", path.display())
            }
            Self::InvalidValue { field, message } => {
                write!(f, "invalid config value `{field}`: {message}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::InvalidValue { .. } => None,
        }
    }
}

/// Runtime settings shared by the CLI and embedding applications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// SQLite database file.
    pub db_path: PathBuf,
    pub log_level: LogLevel,
    /// File logging is disabled when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE),
            log_level: LogLevel::default(),
            log_dir: None,
        }
    }
}

impl CatalogConfig {
    /// Reads and validates a JSON config file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`CatalogConfig::load`], but falls back to defaults when the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Writes the config as pretty JSON.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.db_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "db_path",
                message: "cannot be empty".to_string(),
            });
        }
        if let Some(log_dir) = &self.log_dir {
            LogSettings::check_dir(log_dir).map_err(|err| ConfigError::InvalidValue {
                field: "log_dir",
                message: err.to_string(),
            })?;
        }
        Ok(())
    }

    /// File logging settings, `None` when `log_dir` is unset.
    pub fn log_settings(&self) -> Option<LogSettings> {
        self.log_dir
            .as_ref()
            .map(|log_dir| LogSettings::new(self.log_level, log_dir))
    }
}

#[cfg(test)]
mod tests {
    use super::{CatalogConfig, ConfigError};
    use crate::logging::{LogLevel, LogSettings};
    use std::path::PathBuf;

    #[test]
    fn missing_fields_use_defaults() {
        let config = CatalogConfig::from_json(r#"{ "db_path": "/tmp/media.db" }"#)
            .expect("partial config should parse");
        assert_eq!(config.db_path, PathBuf::from("/tmp/media.db"));
        assert_eq!(config.log_level, CatalogConfig::default().log_level);
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn validate_rejects_empty_db_path() {
        let config = CatalogConfig {
            db_path: PathBuf::new(),
            ..CatalogConfig::default()
        };
        let error = config.validate().expect_err("empty db path must fail");
        assert!(matches!(
            error,
            ConfigError::InvalidValue {
                field: "db_path",
                ..
            }
        ));
    }

    #[test]
    fn unknown_level_fails_to_parse() {
        assert!(CatalogConfig::from_json(r#"{ "log_level": "loud" }"#).is_err());
        let config = CatalogConfig::from_json(r#"{ "log_level": "warning" }"#).unwrap();
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn validate_rejects_relative_log_dir() {
        let relative = CatalogConfig {
            log_dir: Some(PathBuf::from("logs")),
            ..CatalogConfig::default()
        };
        assert!(matches!(
            relative.validate(),
            Err(ConfigError::InvalidValue {
                field: "log_dir",
                ..
            })
        ));
    }

    #[test]
    fn save_then_load_keeps_values() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let path = dir.path().join("catalog.json");
        let config = CatalogConfig {
            db_path: dir.path().join("media.db"),
            log_level: LogLevel::Warn,
            log_dir: Some(dir.path().join("logs")),
        };

        config.save(&path).expect("config should be saved");
        let loaded = CatalogConfig::load(&path).expect("saved config should load");
        assert_eq!(loaded, config);
    }

    #[test]
    fn log_settings_follow_log_dir() {
        assert_eq!(CatalogConfig::default().log_settings(), None);
        let config = CatalogConfig {
            log_level: LogLevel::Error,
            log_dir: Some(PathBuf::from("/var/log/catalog")),
            ..CatalogConfig::default()
        };
        assert_eq!(
            config.log_settings(),
            Some(LogSettings::new(LogLevel::Error, "/var/log/catalog"))
        );
    }

    #[test]
    fn load_or_default_falls_back_when_file_is_missing() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let config = CatalogConfig::load_or_default(&dir.path().join("absent.json"))
            .expect("missing file should fall back");
        assert_eq!(config, CatalogConfig::default());
    }

    #[test]
    fn load_reports_parse_errors() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").expect("fixture should be written");
        assert!(matches!(
            CatalogConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
