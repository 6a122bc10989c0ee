//! Flashcard collection management for Flashdeck
//!
//! This module provides:
//! - Card models with opaque ids and partial updates
//! - The collection store, synchronized with a local snapshot or a remote store
//! - Pure filtered, sorted and shuffled views
//! - A study cursor for walking a deck

pub mod cursor;
pub mod error;
pub mod identity;
pub mod models;
pub mod remote;
pub mod snapshot;
pub mod store;
pub mod view;

pub use cursor::{CursorState, Face, StudyCursor};
pub use error::{CollectionError, PersistenceError};
pub use identity::{IdentityAllocator, LocalIds, StoreAssigned};
pub use models::*;
pub use remote::{MemoryRemote, RemoteCards, RestClient};
pub use snapshot::{JsonFileSnapshot, MemorySnapshot, SnapshotStore};
pub use store::CollectionStore;
pub use view::ViewQuery;
