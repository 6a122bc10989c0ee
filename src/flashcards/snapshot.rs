//! Local persistence for the whole collection
//!
//! The collection is stored as one JSON array under a fixed name:
//! ```text
//! {data_dir}/
//! └── flashcards.json    # Array of all cards
//! ```
//! It is read once at startup and rewritten wholesale after every mutation.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use super::error::PersistenceError;
use super::models::Flashcard;

/// File name of the persisted collection
pub const SNAPSHOT_FILE: &str = "flashcards.json";

const DEFAULT_DECK: &str = include_str!("default_deck.json");

/// The bundled starter deck used when nothing has been saved yet
pub fn default_deck() -> Vec<Flashcard> {
    match serde_json::from_str(DEFAULT_DECK) {
        Ok(cards) => cards,
        Err(e) => {
            log::error!("Bundled default deck is invalid: {}", e);
            Vec::new()
        }
    }
}

/// Port to the medium holding the serialized collection
pub trait SnapshotStore: Send + Sync {
    /// Read the saved collection. `Ok(None)` means nothing was saved yet.
    fn load(&self) -> Result<Option<Vec<Flashcard>>, PersistenceError>;

    /// Replace the saved collection with `cards`.
    fn save(&self, cards: &[Flashcard]) -> Result<(), PersistenceError>;

    fn describe(&self) -> String;
}

impl<T: SnapshotStore + ?Sized> SnapshotStore for Arc<T> {
    fn load(&self) -> Result<Option<Vec<Flashcard>>, PersistenceError> {
        (**self).load()
    }

    fn save(&self, cards: &[Flashcard]) -> Result<(), PersistenceError> {
        (**self).save(cards)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Snapshot kept in a JSON file on disk
pub struct JsonFileSnapshot {
    path: PathBuf,
}

impl JsonFileSnapshot {
    /// Snapshot stored as [`SNAPSHOT_FILE`] inside `data_dir`
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(SNAPSHOT_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonFileSnapshot {
    fn load(&self) -> Result<Option<Vec<Flashcard>>, PersistenceError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let cards: Vec<Flashcard> = serde_json::from_str(&content)?;
        Ok(Some(cards))
    }

    fn save(&self, cards: &[Flashcard]) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(cards)?)?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory snapshot holding the serialized JSON text
#[derive(Default)]
pub struct MemorySnapshot {
    saved: Mutex<Option<String>>,
    fail_writes: AtomicBool,
}

impl MemorySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from raw saved text, which need not be valid JSON
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            saved: Mutex::new(Some(raw.into())),
            fail_writes: AtomicBool::new(false),
        }
    }

    pub fn with_cards(cards: &[Flashcard]) -> Self {
        let raw = serde_json::to_string(cards).unwrap_or_else(|_| "[]".to_string());
        Self::with_raw(raw)
    }

    /// Make subsequent saves fail
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// The cards as last saved
    pub fn saved_cards(&self) -> Option<Vec<Flashcard>> {
        let saved = self.saved.lock().unwrap_or_else(|e| e.into_inner());
        saved.as_deref().and_then(|raw| serde_json::from_str(raw).ok())
    }
}

impl SnapshotStore for MemorySnapshot {
    fn load(&self) -> Result<Option<Vec<Flashcard>>, PersistenceError> {
        let saved = self.saved.lock().unwrap_or_else(|e| e.into_inner());
        match saved.as_deref() {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    fn save(&self, cards: &[Flashcard]) -> Result<(), PersistenceError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PersistenceError::Io(std::io::Error::new(
                ErrorKind::Other,
                "storage quota exceeded",
            )));
        }
        let raw = serde_json::to_string(cards)?;
        *self.saved.lock().unwrap_or_else(|e| e.into_inner()) = Some(raw);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
