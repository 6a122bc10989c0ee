//! The authoritative flashcard collection
//!
//! `CollectionStore` owns the canonical list of cards and keeps its
//! backing medium in step after every mutation:
//! - local: the in-memory list is mutated first, then the whole list is
//!   saved; a failed save is reported but the mutation stays applied
//! - remote: the affected record is sent to the store, then the full list
//!   is reloaded so store-assigned fields (`id`, `createdAt`) are picked up

use super::error::{CollectionError, PersistenceError, Result};
use super::identity::{IdentityAllocator, LocalIds, StoreAssigned};
use super::models::{CardId, CardUpdate, Flashcard, NewCard};
use super::remote::RemoteCards;
use super::snapshot::{default_deck, SnapshotStore};
use super::view;

/// Medium the collection is synchronized with
enum Backing {
    Local(Box<dyn SnapshotStore>),
    Remote(Box<dyn RemoteCards>),
}

impl Backing {
    fn describe(&self) -> String {
        match self {
            Backing::Local(snapshot) => format!("local snapshot {}", snapshot.describe()),
            Backing::Remote(api) => format!("remote store {}", api.describe()),
        }
    }
}

/// Saved cards, or the default deck when nothing usable was saved
fn load_local(snapshot: &dyn SnapshotStore) -> Result<Vec<Flashcard>> {
    match snapshot.load() {
        Ok(Some(cards)) => Ok(cards),
        Ok(None) => {
            log::info!("No saved flashcards at {}, using default deck", snapshot.describe());
            Ok(default_deck())
        }
        Err(PersistenceError::Json(e)) => {
            log::warn!(
                "Saved flashcards at {} are invalid ({}), using default deck",
                snapshot.describe(),
                e
            );
            Ok(default_deck())
        }
        Err(e) => {
            log::error!("Failed to read flashcards from {}: {}", snapshot.describe(), e);
            Err(e.into())
        }
    }
}

pub struct CollectionStore {
    cards: Vec<Flashcard>,
    backing: Backing,
    allocator: Box<dyn IdentityAllocator>,
}

impl CollectionStore {
    /// Open a locally persisted collection.
    ///
    /// Falls back to the bundled default deck when nothing was saved yet
    /// or the saved data cannot be parsed.
    pub fn open_local(snapshot: impl SnapshotStore + 'static) -> Result<Self> {
        let cards = load_local(&snapshot)?;

        Ok(Self {
            cards,
            backing: Backing::Local(Box::new(snapshot)),
            allocator: Box::new(LocalIds),
        })
    }

    /// Open a collection held by a remote store, loading its current list
    pub async fn open_remote(api: impl RemoteCards + 'static) -> Result<Self> {
        let cards = api.list().await?;
        log::info!("Loaded {} flashcards from {}", cards.len(), api.describe());

        Ok(Self {
            cards,
            backing: Backing::Remote(Box::new(api)),
            allocator: Box::new(StoreAssigned),
        })
    }

    /// Replace the identity strategy chosen by the constructor
    pub fn with_allocator(mut self, allocator: impl IdentityAllocator + 'static) -> Self {
        self.allocator = Box::new(allocator);
        self
    }

    pub fn is_remote(&self) -> bool {
        matches!(self.backing, Backing::Remote(_))
    }

    /// Current snapshot of the collection, in no guaranteed order
    pub fn list(&self) -> Vec<Flashcard> {
        self.cards.clone()
    }

    pub fn cards(&self) -> &[Flashcard] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, id: &CardId) -> Result<&Flashcard> {
        self.position(id)
            .map(|pos| &self.cards[pos])
            .ok_or_else(|| CollectionError::NotFound(id.clone()))
    }

    /// Distinct categories, sorted
    pub fn categories(&self) -> Vec<String> {
        view::categories_sorted(&self.cards)
    }

    fn position(&self, id: &CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id.same_as(id))
    }

    /// Re-read the collection from the backing medium
    pub async fn reload(&mut self) -> Result<()> {
        self.cards = match &self.backing {
            Backing::Local(snapshot) => load_local(snapshot.as_ref())?,
            Backing::Remote(api) => api.list().await?,
        };
        log::debug!("Reloaded {} flashcards from {}", self.cards.len(), self.backing.describe());
        Ok(())
    }

    /// Add a card and return it with its assigned id
    pub async fn create(&mut self, fields: NewCard) -> Result<Flashcard> {
        let missing = fields.missing_fields();
        if !missing.is_empty() {
            return Err(CollectionError::Validation(missing));
        }

        let proposed = self.allocator.propose(&self.cards);

        let card = match &self.backing {
            Backing::Local(_) => {
                let id = self.allocator.settle(proposed, None)?;
                let card = Flashcard::from_fields(id, fields);
                self.cards.push(card.clone());
                self.persist_local()?;
                card
            }
            Backing::Remote(api) => {
                let created = api.create(&fields).await?;
                let id = self.allocator.settle(proposed, Some(created.id.clone()))?;
                self.reload().await?;
                self.get(&id).cloned().unwrap_or(created)
            }
        };

        log::info!(
            "Created flashcard {} \"{}\" ({} ids)",
            card.id,
            card.term,
            self.allocator.name()
        );
        Ok(card)
    }

    /// Merge the supplied fields into an existing card
    pub async fn update(&mut self, id: &CardId, partial: CardUpdate) -> Result<Flashcard> {
        let pos = self
            .position(id)
            .ok_or_else(|| CollectionError::NotFound(id.clone()))?;

        let mut merged = self.cards[pos].clone();
        partial.apply_to(&mut merged);
        let missing = merged.missing_fields();
        if !missing.is_empty() {
            return Err(CollectionError::Validation(missing));
        }

        let card = match &self.backing {
            Backing::Local(_) => {
                self.cards[pos] = merged.clone();
                self.persist_local()?;
                merged
            }
            Backing::Remote(api) => {
                let changes = partial.changes_from(&self.cards[pos]);
                if changes.is_empty() {
                    return Err(CollectionError::NoChange);
                }
                let stored_id = self.cards[pos].id.clone();
                let updated = api.update(&stored_id, &changes).await?;
                self.reload().await?;
                self.get(&stored_id).cloned().unwrap_or(updated)
            }
        };

        log::info!("Updated flashcard {}", card.id);
        Ok(card)
    }

    /// Remove a card. There is no undo.
    pub async fn delete(&mut self, id: &CardId) -> Result<()> {
        let pos = self
            .position(id)
            .ok_or_else(|| CollectionError::NotFound(id.clone()))?;

        match &self.backing {
            Backing::Local(_) => {
                let removed = self.cards.remove(pos);
                log::info!("Deleted flashcard {}", removed.id);
                self.persist_local()?;
            }
            Backing::Remote(api) => {
                let stored_id = self.cards[pos].id.clone();
                api.delete(&stored_id).await?;
                log::info!("Deleted flashcard {}", stored_id);
                self.reload().await?;
            }
        }

        Ok(())
    }

    fn persist_local(&self) -> Result<()> {
        if let Backing::Local(snapshot) = &self.backing {
            if let Err(e) = snapshot.save(&self.cards) {
                log::error!("Failed to save flashcards to {}: {}", snapshot.describe(), e);
                return Err(e.into());
            }
        }
        Ok(())
    }
}
