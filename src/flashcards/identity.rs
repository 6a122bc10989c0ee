//! Identity allocation strategies
//!
//! A collection store is configured with exactly one strategy:
//! - [`LocalIds`] hands out `max + 1` integers for locally persisted cards
//! - [`StoreAssigned`] defers to the id the remote store returns

use super::error::{CollectionError, Result};
use super::models::{CardId, Flashcard};

pub trait IdentityAllocator: Send + Sync {
    /// Id to attach to a new card before it reaches the backing medium,
    /// or `None` when the medium assigns it.
    fn propose(&self, existing: &[Flashcard]) -> Option<CardId>;

    /// A fresh id computed locally.
    fn next_id(&self, existing: &[Flashcard]) -> Result<CardId> {
        self.propose(existing).ok_or_else(|| {
            CollectionError::IdentityMismatch(
                "ids are assigned by the backing store".to_string(),
            )
        })
    }

    /// Decide the authoritative id once the medium has accepted the card.
    fn settle(&self, proposed: Option<CardId>, assigned: Option<CardId>) -> Result<CardId>;

    fn name(&self) -> &'static str;
}

/// Sequential integer ids: 1 for an empty collection, otherwise max + 1
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalIds;

impl IdentityAllocator for LocalIds {
    fn propose(&self, existing: &[Flashcard]) -> Option<CardId> {
        let max = existing.iter().filter_map(|c| c.id.integer()).max().unwrap_or(0);
        Some(CardId::local(max + 1))
    }

    fn settle(&self, proposed: Option<CardId>, assigned: Option<CardId>) -> Result<CardId> {
        let proposed = proposed.ok_or_else(|| {
            CollectionError::IdentityMismatch("no local id was allocated".to_string())
        })?;
        match assigned {
            Some(assigned) if !assigned.same_as(&proposed) => {
                Err(CollectionError::IdentityMismatch(format!(
                    "allocated {} but the medium stored {}",
                    proposed, assigned
                )))
            }
            _ => Ok(proposed),
        }
    }

    fn name(&self) -> &'static str {
        "local"
    }
}

/// Pass-through of the id the backing store returns from a create
#[derive(Debug, Default, Clone, Copy)]
pub struct StoreAssigned;

impl IdentityAllocator for StoreAssigned {
    fn propose(&self, _existing: &[Flashcard]) -> Option<CardId> {
        None
    }

    fn settle(&self, proposed: Option<CardId>, assigned: Option<CardId>) -> Result<CardId> {
        let assigned = assigned.ok_or_else(|| {
            CollectionError::IdentityMismatch("the store returned no id".to_string())
        })?;
        match proposed {
            Some(proposed) if !proposed.same_as(&assigned) => {
                Err(CollectionError::IdentityMismatch(format!(
                    "local id {} is not authoritative, the store assigned {}",
                    proposed, assigned
                )))
            }
            _ => Ok(assigned),
        }
    }

    fn name(&self) -> &'static str {
        "store-assigned"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flashcards::models::NewCard;

    fn card(id: CardId) -> Flashcard {
        Flashcard::from_fields(id, NewCard::new("Sets", "Union", "Elements in either set"))
    }

    #[test]
    fn test_local_first_id_is_one() {
        assert_eq!(LocalIds.next_id(&[]).unwrap(), CardId::local(1));
    }

    #[test]
    fn test_local_uses_max_plus_one() {
        let cards = vec![card(CardId::local(3)), card(CardId::local(10)), card(CardId::local(4))];
        assert_eq!(LocalIds.next_id(&cards).unwrap(), CardId::local(11));
    }

    #[test]
    fn test_local_ignores_non_numeric_ids() {
        let cards = vec![card(CardId::assigned("abc")), card(CardId::assigned("2"))];
        assert_eq!(LocalIds.next_id(&cards).unwrap(), CardId::local(3));
    }

    #[test]
    fn test_local_settle_rejects_different_id() {
        let settled = LocalIds.settle(Some(CardId::local(2)), None).unwrap();
        assert_eq!(settled, CardId::local(2));

        let err = LocalIds.settle(Some(CardId::local(2)), Some(CardId::local(5)));
        assert!(matches!(err, Err(CollectionError::IdentityMismatch(_))));
    }

    #[test]
    fn test_store_assigned_has_no_local_ids() {
        assert!(StoreAssigned.propose(&[]).is_none());
        assert!(matches!(
            StoreAssigned.next_id(&[]),
            Err(CollectionError::IdentityMismatch(_))
        ));
    }

    #[test]
    fn test_store_assigned_settle() {
        let id = StoreAssigned.settle(None, Some(CardId::assigned("17"))).unwrap();
        assert_eq!(id, CardId::assigned("17"));

        assert!(StoreAssigned.settle(None, None).is_err());
        assert!(StoreAssigned
            .settle(Some(CardId::local(1)), Some(CardId::assigned("17")))
            .is_err());
    }
}
