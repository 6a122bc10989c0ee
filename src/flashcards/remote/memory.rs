use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use super::{sort_newest_first, RemoteCards};
use crate::flashcards::error::PersistenceError;
use crate::flashcards::models::{CardId, CardUpdate, Flashcard, NewCard};

/// Requests a remote store receives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteOp {
    List,
    Get,
    Create,
    Update,
    Delete,
}

#[derive(Default)]
struct Inner {
    cards: Vec<Flashcard>,
    failing: Vec<RemoteOp>,
    requests: Vec<RemoteOp>,
    last_created: Option<DateTime<Utc>>,
}

/// In-memory stand-in for the REST resource.
///
/// Assigns uuid ids and `createdAt` timestamps the way a hosted store
/// would, records every request, and can be told to fail chosen ones.
#[derive(Default)]
pub struct MemoryRemote {
    inner: Mutex<Inner>,
}

impl MemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cards(cards: Vec<Flashcard>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                cards,
                ..Default::default()
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Make every later `op` request fail until [`recover`](Self::recover)
    pub fn fail(&self, op: RemoteOp) {
        self.lock().failing.push(op);
    }

    pub fn recover(&self, op: RemoteOp) {
        self.lock().failing.retain(|o| *o != op);
    }

    /// Every request received so far, in order
    pub fn requests(&self) -> Vec<RemoteOp> {
        self.lock().requests.clone()
    }

    /// Cards as the store holds them, unsorted
    pub fn stored(&self) -> Vec<Flashcard> {
        self.lock().cards.clone()
    }

    fn begin(&self, op: RemoteOp, surfaced: PersistenceError) -> Result<MutexGuard<'_, Inner>, PersistenceError> {
        let mut inner = self.lock();
        inner.requests.push(op);
        if inner.failing.contains(&op) {
            log::error!("Remote {:?} request failed: connection refused", op);
            return Err(surfaced);
        }
        Ok(inner)
    }
}

impl Inner {
    fn position(&self, id: &CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id.same_as(id))
    }

    fn next_timestamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        // Strictly increasing so newest-first ordering is well defined
        let stamp = match self.last_created {
            Some(last) if last >= now => last + Duration::milliseconds(1),
            _ => now,
        };
        self.last_created = Some(stamp);
        stamp
    }
}

#[async_trait]
impl RemoteCards for MemoryRemote {
    async fn list(&self) -> Result<Vec<Flashcard>, PersistenceError> {
        let inner = self.begin(RemoteOp::List, PersistenceError::Fetch)?;
        let mut cards = inner.cards.clone();
        sort_newest_first(&mut cards);
        Ok(cards)
    }

    async fn get(&self, id: &CardId) -> Result<Flashcard, PersistenceError> {
        let inner = self.begin(RemoteOp::Get, PersistenceError::Fetch)?;
        let pos = inner.position(id).ok_or(PersistenceError::Fetch)?;
        Ok(inner.cards[pos].clone())
    }

    async fn create(&self, fields: &NewCard) -> Result<Flashcard, PersistenceError> {
        let mut inner = self.begin(RemoteOp::Create, PersistenceError::Create)?;
        let mut card = Flashcard::from_fields(CardId::assigned(Uuid::new_v4().to_string()), fields.clone());
        card.created_at = Some(inner.next_timestamp());
        inner.cards.push(card.clone());
        Ok(card)
    }

    async fn update(&self, id: &CardId, changes: &CardUpdate) -> Result<Flashcard, PersistenceError> {
        let mut inner = self.begin(RemoteOp::Update, PersistenceError::Update)?;
        let pos = inner.position(id).ok_or(PersistenceError::Update)?;
        changes.apply_to(&mut inner.cards[pos]);
        Ok(inner.cards[pos].clone())
    }

    async fn delete(&self, id: &CardId) -> Result<(), PersistenceError> {
        let mut inner = self.begin(RemoteOp::Delete, PersistenceError::Delete)?;
        let pos = inner.position(id).ok_or(PersistenceError::Delete)?;
        inner.cards.remove(pos);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory remote".to_string()
    }
}
