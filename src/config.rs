//! Application configuration
//!
//! Read from `{config_dir}/flashdeck/config.toml`. Every field is optional:
//! ```toml
//! [storage]
//! mode = "remote"            # "local" (default) or "remote"
//! data_dir = "/path/to/dir"  # where flashcards.json lives in local mode
//!
//! [remote]
//! base_url = "https://example.mockapi.io/api/flashcards"
//! timeout_secs = 30
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Could not determine {0} directory")]
    DirNotFound(&'static str),

    #[error("Remote mode needs remote.base_url")]
    MissingRemoteUrl,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub remote: RemoteConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub mode: StorageMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    /// Whole collection saved to a JSON file
    #[default]
    Local,
    /// Cards held by a REST resource
    Remote,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AppConfig {
    /// Default location of the config file
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join("flashdeck").join("config.toml"))
            .ok_or(ConfigError::DirNotFound("config"))
    }

    /// Load from `path`; a missing file gives the defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No config file at {:?}, using defaults", path);
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Directory for the local snapshot
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.storage.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_local_dir()
                .map(|p| p.join("flashdeck"))
                .ok_or(ConfigError::DirNotFound("data")),
        }
    }

    /// Remote base URL, required in remote mode
    pub fn remote_url(&self) -> Result<&str> {
        self.remote
            .base_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingRemoteUrl)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.remote.timeout_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.storage.mode, StorageMode::Local);
        assert_eq!(config.remote.timeout_secs, 30);
        assert!(matches!(config.remote_url(), Err(ConfigError::MissingRemoteUrl)));
    }

    #[test]
    fn test_parse_partial_file() {
        let config = AppConfig::parse(
            r#"
            [storage]
            mode = "remote"

            [remote]
            base_url = "https://cards.example.com/api"
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.mode, StorageMode::Remote);
        assert_eq!(config.remote_url().unwrap(), "https://cards.example.com/api");
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_load_missing_and_invalid() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        assert_eq!(AppConfig::load(&path).unwrap(), AppConfig::default());

        fs::write(&path, "[storage]\nmode = \"cloud\"\n").unwrap();
        assert!(matches!(AppConfig::load(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_explicit_data_dir() {
        let mut config = AppConfig::default();
        config.storage.data_dir = Some(PathBuf::from("/tmp/cards"));
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/tmp/cards"));
    }
}
