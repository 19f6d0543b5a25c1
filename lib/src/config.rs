use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// SQLite file holding bookmarks and view state
    #[serde(default)]
    pub database_path: Option<PathBuf>,
    /// Directory for exports when no output path is given
    #[serde(default)]
    pub export_dir: Option<PathBuf>,
    /// Output format for listings: colored, plain or json
    #[serde(default = "default_format")]
    pub default_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: None,
            export_dir: None,
            default_format: default_format(),
        }
    }
}

fn default_format() -> String {
    "colored".to_string()
}

impl Config {
    /// Load configuration from a file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from default location (~/.config/mybookmarks/config.yml)
    /// Falls back to default config if file doesn't exist
    pub fn load() -> Self {
        let config_path = Self::default_path();

        if config_path.exists() {
            match Self::load_from_path(&config_path) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!(
                        "Failed to load config from {:?}, using defaults: {}",
                        config_path,
                        e
                    );
                    Self::default()
                }
            }
        } else {
            Self::default()
        }
    }

    pub fn default_path() -> PathBuf {
        crate::utils::get_config_dir().join("config.yml")
    }

    /// Database file from the config, or `bookmarks.db` in the data directory
    pub fn database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(|| crate::utils::get_default_data_dir().join("bookmarks.db"))
    }

    /// Save configuration to a file path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;
        Ok(())
    }

    /// Save configuration to default location
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::default_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.default_format, "colored");
        assert!(config.database_path.is_none());
        assert!(config.database_path().ends_with("bookmarks.db"));
    }

    #[test]
    fn test_save_and_load() {
        let temp_file = NamedTempFile::new().unwrap();
        let config_path = temp_file.path();

        let original = Config {
            database_path: Some(PathBuf::from("/tmp/marks.db")),
            export_dir: Some(PathBuf::from("/tmp/exports")),
            default_format: "plain".to_string(),
        };

        original.save_to_path(config_path).unwrap();
        let loaded = Config::load_from_path(config_path).unwrap();

        assert_eq!(original, loaded);
        assert_eq!(loaded.database_path(), PathBuf::from("/tmp/marks.db"));
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_file = NamedTempFile::new().unwrap();
        let config_path = temp_file.path();

        fs::write(config_path, "invalid: yaml: content:").unwrap();

        let result = Config::load_from_path(config_path);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_partial_config() {
        let temp_file = NamedTempFile::new().unwrap();
        let config_path = temp_file.path();

        fs::write(config_path, "export_dir: /srv/backups\n").unwrap();

        let config = Config::load_from_path(config_path).unwrap();
        assert_eq!(config.export_dir, Some(PathBuf::from("/srv/backups")));
        assert_eq!(config.default_format, default_format());
    }
}
