//! Flashcard collection error types

use thiserror::Error;

use super::models::CardId;

/// Failures of the backing medium.
///
/// Remote failures are deliberately coarse; the transport detail is
/// logged where it happens.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to fetch flashcards.")]
    Fetch,

    #[error("Failed to create flashcard.")]
    Create,

    #[error("Failed to update flashcard.")]
    Update,

    #[error("Failed to delete flashcard.")]
    Delete,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors reported by collection operations
#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("Missing required fields: {}", .0.join(", "))]
    Validation(Vec<&'static str>),

    #[error("Flashcard not found: {0}")]
    NotFound(CardId),

    #[error("No changes detected.")]
    NoChange,

    #[error("Identity mismatch: {0}")]
    IdentityMismatch(String),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

pub type Result<T> = std::result::Result<T, CollectionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = CollectionError::Validation(vec!["term", "definition"]);
        assert_eq!(err.to_string(), "Missing required fields: term, definition");

        let err = CollectionError::NotFound(CardId::local(4));
        assert_eq!(err.to_string(), "Flashcard not found: 4");

        let err: CollectionError = PersistenceError::Update.into();
        assert_eq!(err.to_string(), "Failed to update flashcard.");
    }
}
