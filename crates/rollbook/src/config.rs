//! Configuration management for rollbook.
//!
//! Configuration is loaded with figment: defaults, then a TOML config file,
//! then environment variables. Every setting has a default that reproduces
//! the stock behavior, so running with no config file at all is the normal
//! case.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "rollbook";

/// Default data file name.
const DATA_FILE_NAME: &str = "students.json";

/// Default backup directory name, inside the data directory.
const BACKUP_DIR_NAME: &str = "backups";

/// Default CSV export file name, written to the working directory.
const CSV_EXPORT_FILE_NAME: &str = "students_export.csv";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `ROLLBOOK_`, section and key
///    separated by `__`, e.g. `ROLLBOOK_STORAGE__MAX_BACKUPS`)
/// 2. TOML config file at `~/.config/rollbook/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Export configuration.
    pub export: ExportConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the JSON data file.
    /// Defaults to `~/.local/share/rollbook/students.json`
    pub data_file: Option<PathBuf>,

    /// Directory receiving one backup snapshot per save.
    /// Defaults to `~/.local/share/rollbook/backups`
    pub backup_dir: Option<PathBuf>,

    /// Maximum number of backup snapshots to retain.
    /// Set to 0 to keep every snapshot.
    pub max_backups: usize,
}

/// Export-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Destination of the CSV export.
    /// Defaults to `students_export.csv` in the working directory.
    pub csv_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("ROLLBOOK_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured path is empty.
    pub fn validate(&self) -> Result<()> {
        let paths = [
            ("storage.data_file", self.storage.data_file.as_deref()),
            ("storage.backup_dir", self.storage.backup_dir.as_deref()),
            ("export.csv_path", self.export.csv_path.as_deref()),
        ];
        for (key, path) in paths {
            if let Some(path) = path {
                if path.as_os_str().is_empty() {
                    return Err(Error::ConfigValidation {
                        message: format!("{key} must not be empty"),
                    });
                }
            }
        }
        Ok(())
    }

    /// Get the data file path, resolving defaults if not set.
    #[must_use]
    pub fn data_file_path(&self) -> PathBuf {
        self.storage
            .data_file
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATA_FILE_NAME))
    }

    /// Get the backup directory path, resolving defaults if not set.
    #[must_use]
    pub fn backup_dir_path(&self) -> PathBuf {
        self.storage
            .backup_dir
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(BACKUP_DIR_NAME))
    }

    /// Get the CSV export path, resolving defaults if not set.
    #[must_use]
    pub fn csv_export_path(&self) -> PathBuf {
        self.export
            .csv_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(CSV_EXPORT_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.storage.data_file.is_none());
        assert!(config.storage.backup_dir.is_none());
        assert_eq!(config.storage.max_backups, 0);
        assert!(config.export.csv_path.is_none());
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_path() {
        let mut config = Config::default();
        config.storage.data_file = Some(PathBuf::new());

        let result = config.validate();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("storage.data_file"));
    }

    #[test]
    fn test_data_file_path_default() {
        let config = Config::default();
        let path = config.data_file_path();

        assert!(path.to_string_lossy().contains("students.json"));
        assert!(path.to_string_lossy().contains("rollbook"));
    }

    #[test]
    fn test_data_file_path_custom() {
        let mut config = Config::default();
        config.storage.data_file = Some(PathBuf::from("/custom/students.json"));

        assert_eq!(
            config.data_file_path(),
            PathBuf::from("/custom/students.json")
        );
    }

    #[test]
    fn test_backup_dir_path_default() {
        let config = Config::default();
        let path = config.backup_dir_path();

        assert!(path.to_string_lossy().contains("backups"));
    }

    #[test]
    fn test_csv_export_path_default() {
        let config = Config::default();
        assert_eq!(
            config.csv_export_path(),
            PathBuf::from("students_export.csv")
        );
    }

    #[test]
    fn test_csv_export_path_custom() {
        let mut config = Config::default();
        config.export.csv_path = Some(PathBuf::from("/tmp/out.csv"));

        assert_eq!(config.csv_export_path(), PathBuf::from("/tmp/out.csv"));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("rollbook"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        // Loading from a nonexistent path should work (uses defaults)
        let result = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")));
        assert!(result.is_ok());

        let config = result.unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[storage]\nmax_backups = 5\ndata_file = \"/tmp/students.json\"\n",
        )
        .unwrap();

        let config = Config::load_from(Some(path)).unwrap();
        assert_eq!(config.storage.max_backups, 5);
        assert_eq!(
            config.storage.data_file,
            Some(PathBuf::from("/tmp/students.json"))
        );
        // Untouched sections keep their defaults
        assert!(config.export.csv_path.is_none());
    }

    #[test]
    fn test_storage_config_serialize() {
        let storage = StorageConfig::default();
        let json = serde_json::to_string(&storage).unwrap();
        assert!(json.contains("max_backups"));
    }

    #[test]
    fn test_storage_config_deserialize() {
        let json = r#"{"max_backups": 3, "data_file": "/d/students.json"}"#;
        let storage: StorageConfig = serde_json::from_str(json).unwrap();
        assert_eq!(storage.max_backups, 3);
        assert_eq!(storage.data_file, Some(PathBuf::from("/d/students.json")));
    }

    #[test]
    fn test_config_clone() {
        let config = Config::default();
        let cloned = config.clone();
        assert_eq!(config, cloned);
    }
}
