pub mod config;
pub mod flashcards;

pub use config::{AppConfig, StorageMode};
pub use flashcards::{CollectionError, CollectionStore, Flashcard, StudyCursor};
