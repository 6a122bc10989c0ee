//! Remote card store reached through a generic CRUD resource
//!
//! - `GET /` list, `GET /{id}` fetch one
//! - `POST /` create, `PUT /{id}` partial update, `DELETE /{id}` remove

pub mod client;
pub mod memory;

use std::cmp::Reverse;
use std::sync::Arc;

use async_trait::async_trait;

use super::error::PersistenceError;
use super::models::{CardId, CardUpdate, Flashcard, NewCard};

pub use client::{RemoteError, RestClient};
pub use memory::{MemoryRemote, RemoteOp};

/// Port to a remote store that assigns ids and timestamps itself
#[async_trait]
pub trait RemoteCards: Send + Sync {
    /// All cards, newest first where the store reports `createdAt`
    async fn list(&self) -> Result<Vec<Flashcard>, PersistenceError>;

    async fn get(&self, id: &CardId) -> Result<Flashcard, PersistenceError>;

    /// Create a card; the returned record carries the assigned id
    async fn create(&self, fields: &NewCard) -> Result<Flashcard, PersistenceError>;

    /// Send only the changed fields
    async fn update(&self, id: &CardId, changes: &CardUpdate) -> Result<Flashcard, PersistenceError>;

    async fn delete(&self, id: &CardId) -> Result<(), PersistenceError>;

    fn describe(&self) -> String;
}

#[async_trait]
impl<T: RemoteCards + ?Sized> RemoteCards for Arc<T> {
    async fn list(&self) -> Result<Vec<Flashcard>, PersistenceError> {
        (**self).list().await
    }

    async fn get(&self, id: &CardId) -> Result<Flashcard, PersistenceError> {
        (**self).get(id).await
    }

    async fn create(&self, fields: &NewCard) -> Result<Flashcard, PersistenceError> {
        (**self).create(fields).await
    }

    async fn update(&self, id: &CardId, changes: &CardUpdate) -> Result<Flashcard, PersistenceError> {
        (**self).update(id, changes).await
    }

    async fn delete(&self, id: &CardId) -> Result<(), PersistenceError> {
        (**self).delete(id).await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Order cards newest-first by `createdAt`; cards without a timestamp
/// keep their relative order after the dated ones.
pub fn sort_newest_first(cards: &mut [Flashcard]) {
    cards.sort_by_key(|card| Reverse(card.created_at));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_sort_newest_first() {
        let mut cards: Vec<Flashcard> = (1..=4)
            .map(|n| {
                Flashcard::from_fields(
                    CardId::assigned(n.to_string()),
                    NewCard::new("Sets", format!("Term {}", n), "Definition"),
                )
            })
            .collect();
        cards[0].created_at = Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        cards[2].created_at = Some(Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap());

        sort_newest_first(&mut cards);

        let ids: Vec<String> = cards.iter().map(|c| c.id.to_string()).collect();
        assert_eq!(ids, vec!["3", "1", "2", "4"]);
    }
}
