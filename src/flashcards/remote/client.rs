use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use thiserror::Error;

use super::{sort_newest_first, RemoteCards};
use crate::flashcards::error::PersistenceError;
use crate::flashcards::models::{CardId, CardUpdate, Flashcard, NewCard};

/// HTTP client for a JSON card resource
pub struct RestClient {
    client: Client,
    base_url: String,
    base: Url,
}

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Server error: {status} - {message}")]
    Server { status: u16, message: String },
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl RestClient {
    /// Create a client for the collection endpoint at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RemoteError> {
        // Normalize URL - ensure no trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(RemoteError::InvalidUrl(
                "URL must start with http:// or https://".to_string(),
            ));
        }

        let base = Url::parse(&base_url).map_err(|e| RemoteError::InvalidUrl(e.to_string()))?;

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(30)))
            .build()?;

        Ok(Self { client, base_url, base })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build full URL for a card, or the collection itself.
    /// The id is one percent-encoded path segment.
    fn url(&self, id: Option<&CardId>) -> Result<Url, RemoteError> {
        let mut url = self.base.clone();
        if let Some(id) = id {
            url.path_segments_mut()
                .map_err(|_| RemoteError::InvalidUrl(self.base_url.clone()))?
                .pop_if_empty()
                .push(&id.to_string());
        }
        Ok(url)
    }

    async fn check(response: Response, what: String) -> Result<Response, RemoteError> {
        match response.status() {
            StatusCode::NOT_FOUND => Err(RemoteError::NotFound(what)),
            status if !status.is_success() => Err(RemoteError::Server {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            }),
            _ => Ok(response),
        }
    }

    /// GET / - all cards, newest first
    pub async fn fetch_all(&self) -> Result<Vec<Flashcard>, RemoteError> {
        let response = self.client.get(self.url(None)?).send().await?;
        let response = Self::check(response, self.base_url.clone()).await?;

        let mut cards: Vec<Flashcard> = response.json().await?;
        sort_newest_first(&mut cards);
        Ok(cards)
    }

    /// GET /{id}
    pub async fn fetch(&self, id: &CardId) -> Result<Flashcard, RemoteError> {
        let url = self.url(Some(id))?;
        let response = self.client.get(url.clone()).send().await?;
        let response = Self::check(response, url.to_string()).await?;
        Ok(response.json().await?)
    }

    /// POST / - returns the stored record with its assigned id
    pub async fn post(&self, fields: &NewCard) -> Result<Flashcard, RemoteError> {
        let response = self.client.post(self.url(None)?).json(fields).send().await?;
        let response = Self::check(response, self.base_url.clone()).await?;
        Ok(response.json().await?)
    }

    /// PUT /{id} with only the changed fields
    pub async fn put(&self, id: &CardId, changes: &CardUpdate) -> Result<Flashcard, RemoteError> {
        let url = self.url(Some(id))?;
        let response = self.client.put(url.clone()).json(changes).send().await?;
        let response = Self::check(response, url.to_string()).await?;
        Ok(response.json().await?)
    }

    /// DELETE /{id}
    pub async fn remove(&self, id: &CardId) -> Result<(), RemoteError> {
        let url = self.url(Some(id))?;
        let response = self.client.delete(url.clone()).send().await?;
        Self::check(response, url.to_string()).await?;
        Ok(())
    }
}

fn logged(context: String, err: RemoteError, surfaced: PersistenceError) -> PersistenceError {
    log::error!("{}: {}", context, err);
    surfaced
}

#[async_trait]
impl RemoteCards for RestClient {
    async fn list(&self) -> Result<Vec<Flashcard>, PersistenceError> {
        self.fetch_all()
            .await
            .map_err(|e| logged("Error fetching flashcards".to_string(), e, PersistenceError::Fetch))
    }

    async fn get(&self, id: &CardId) -> Result<Flashcard, PersistenceError> {
        self.fetch(id)
            .await
            .map_err(|e| logged(format!("Error fetching flashcard {}", id), e, PersistenceError::Fetch))
    }

    async fn create(&self, fields: &NewCard) -> Result<Flashcard, PersistenceError> {
        self.post(fields)
            .await
            .map_err(|e| logged("Error creating flashcard".to_string(), e, PersistenceError::Create))
    }

    async fn update(&self, id: &CardId, changes: &CardUpdate) -> Result<Flashcard, PersistenceError> {
        self.put(id, changes)
            .await
            .map_err(|e| logged(format!("Error updating flashcard {}", id), e, PersistenceError::Update))
    }

    async fn delete(&self, id: &CardId) -> Result<(), PersistenceError> {
        self.remove(id)
            .await
            .map_err(|e| logged(format!("Error deleting flashcard {}", id), e, PersistenceError::Delete))
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}
