use std::path::PathBuf;

use anyhow::{Context, Result};

use flashdeck_lib::config::{AppConfig, StorageMode};
use flashdeck_lib::flashcards::{CardId, CollectionStore, Flashcard, JsonFileSnapshot, RestClient};

/// Overrides given on the command line
pub struct Settings {
    pub config_path: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub remote: Option<String>,
}

/// Shared application state for CLI commands
pub struct App {
    pub store: CollectionStore,
}

impl App {
    /// Load configuration, apply overrides and open the collection
    pub async fn open(settings: &Settings) -> Result<Self> {
        let config_path = match &settings.config_path {
            Some(path) => path.clone(),
            None => AppConfig::default_path().context("Failed to get config directory")?,
        };
        let mut config = AppConfig::load(&config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

        if let Some(dir) = &settings.data_dir {
            config.storage.data_dir = Some(dir.clone());
        }
        if let Some(url) = &settings.remote {
            config.storage.mode = StorageMode::Remote;
            config.remote.base_url = Some(url.clone());
        }

        let store = match config.storage.mode {
            StorageMode::Local => {
                let data_dir = config.data_dir().context("Failed to get data directory")?;
                CollectionStore::open_local(JsonFileSnapshot::new(data_dir))
                    .context("Failed to load flashcards")?
            }
            StorageMode::Remote => {
                let url = config.remote_url()?;
                let client = RestClient::new(url, config.timeout())
                    .context("Failed to create REST client")?;
                CollectionStore::open_remote(client)
                    .await
                    .context("Failed to load flashcards")?
            }
        };

        Ok(Self { store })
    }

    /// Find a card by the id typed on the command line
    pub fn find_card(&self, id: &str) -> Result<Flashcard> {
        let id = CardId::parse(id);
        Ok(self.store.get(&id)?.clone())
    }
}
