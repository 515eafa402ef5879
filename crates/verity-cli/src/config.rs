//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use verity_store::StoreConfig;

/// Seed directory used when neither the flag nor the config names one
pub const DEFAULT_SEEDS_DIR: &str = "seeds";

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding `news.json`, `votes.json` and `comments.json`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seeds_dir: Option<PathBuf>,

    /// Directory session data is written to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Store settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Command history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// The `~/.verity` directory.
    pub fn home() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".verity"))
    }

    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::home()?.join("config.toml"))
    }

    /// Load configuration from the default path, or defaults if absent.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from `path`, or defaults if absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.store.validate()?;
        Ok(config)
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Seed directory: the override, else the configured one, else `./seeds`.
    pub fn resolve_seeds_dir(&self, cli_override: Option<PathBuf>) -> PathBuf {
        cli_override
            .or_else(|| self.seeds_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SEEDS_DIR))
    }

    /// Data directory: the override, else the configured one, else `~/.verity/data`.
    pub fn resolve_data_dir(&self, cli_override: Option<PathBuf>) -> Result<PathBuf> {
        match cli_override.or_else(|| self.data_dir.clone()) {
            Some(dir) => Ok(dir),
            None => Ok(Self::home()?.join("data")),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            history_size: 1000,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_history_size() -> usize {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.seeds_dir.is_none());
        assert!(config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Table);
        assert_eq!(config.store, StoreConfig::default());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.settings.history_size, 1000);
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "seeds_dir = \"/srv/seeds\"\n\n[store]\nlist_page_size = 4\n\n[settings]\nformat = \"json\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.seeds_dir, Some(PathBuf::from("/srv/seeds")));
        assert_eq!(config.store.list_page_size, 4);
        assert_eq!(config.store.comments_page_size, 5);
        assert_eq!(config.settings.format, OutputFormat::Json);
        assert!(config.settings.color);
    }

    #[test]
    fn test_invalid_store_section_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[store]\ncomments_page_size = 0\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.data_dir = Some(PathBuf::from("/tmp/verity-data"));
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.data_dir, config.data_dir);
    }

    #[test]
    fn test_overrides_win() {
        let config = Config {
            seeds_dir: Some(PathBuf::from("configured")),
            ..Config::default()
        };
        assert_eq!(config.resolve_seeds_dir(None), PathBuf::from("configured"));
        assert_eq!(config.resolve_seeds_dir(Some("flag".into())), PathBuf::from("flag"));
        assert_eq!(Config::default().resolve_seeds_dir(None), PathBuf::from(DEFAULT_SEEDS_DIR));
        assert_eq!(
            Config::default().resolve_data_dir(Some("d".into())).unwrap(),
            PathBuf::from("d")
        );
    }
}
