//! Position tracking for a study session

use super::models::Flashcard;
use super::view;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// No cards in the deck
    Empty,
    /// At least one card, position in range
    Active,
}

/// Which side of the current card is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Face {
    #[default]
    Term,
    Definition,
}

/// Walks a deck with wraparound in both directions
#[derive(Debug, Clone, Default)]
pub struct StudyCursor {
    deck: Vec<Flashcard>,
    position: usize,
    face: Face,
}

impl StudyCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deck(deck: Vec<Flashcard>) -> Self {
        let mut cursor = Self::new();
        cursor.set_deck(deck);
        cursor
    }

    pub fn state(&self) -> CursorState {
        if self.deck.is_empty() {
            CursorState::Empty
        } else {
            CursorState::Active
        }
    }

    /// Replace the deck and go back to its first card
    pub fn set_deck(&mut self, deck: Vec<Flashcard>) {
        self.deck = deck;
        self.position = 0;
        self.face = Face::Term;
    }

    pub fn next(&mut self) {
        if self.deck.is_empty() {
            return;
        }
        self.position = (self.position + 1) % self.deck.len();
        self.face = Face::Term;
    }

    pub fn previous(&mut self) {
        if self.deck.is_empty() {
            return;
        }
        let len = self.deck.len();
        self.position = (self.position + len - 1) % len;
        self.face = Face::Term;
    }

    /// Reshuffle the current deck. Decks of fewer than two cards are left alone.
    pub fn shuffle(&mut self) {
        if self.deck.len() > 1 {
            let shuffled = view::shuffle(&self.deck);
            self.set_deck(shuffled);
        }
    }

    pub fn flip(&mut self) {
        self.face = match self.face {
            Face::Term => Face::Definition,
            Face::Definition => Face::Term,
        };
    }

    pub fn face(&self) -> Face {
        self.face
    }

    pub fn current(&self) -> Option<&Flashcard> {
        self.deck.get(self.position)
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.deck.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    /// Fraction of the deck reached, `(position + 1) / len`; 0 when empty
    pub fn progress(&self) -> f64 {
        if self.deck.is_empty() {
            0.0
        } else {
            (self.position + 1) as f64 / self.deck.len() as f64
        }
    }

    pub fn progress_percent(&self) -> u8 {
        (self.progress() * 100.0).round() as u8
    }

    /// One-based position and deck length, `(0, 0)` when empty
    pub fn counter(&self) -> (usize, usize) {
        if self.deck.is_empty() {
            (0, 0)
        } else {
            (self.position + 1, self.deck.len())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flashcards::models::{CardId, NewCard};
    use crate::flashcards::view::sort_by_category_then_term;

    fn deck(n: u64) -> Vec<Flashcard> {
        (1..=n)
            .map(|id| {
                Flashcard::from_fields(
                    CardId::local(id),
                    NewCard::new("Sets", format!("Term {}", id), "Definition"),
                )
            })
            .collect()
    }

    #[test]
    fn test_starts_empty() {
        let cursor = StudyCursor::new();
        assert_eq!(cursor.state(), CursorState::Empty);
        assert!(cursor.current().is_none());
        assert_eq!(cursor.progress(), 0.0);
        assert_eq!(cursor.counter(), (0, 0));
    }

    #[test]
    fn test_empty_deck_navigation_is_noop() {
        let mut cursor = StudyCursor::new();
        cursor.set_deck(Vec::new());
        cursor.next();
        cursor.previous();
        assert_eq!(cursor.state(), CursorState::Empty);
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.progress_percent(), 0);
    }

    #[test]
    fn test_next_wraps_after_two_steps() {
        let cards = vec![
            Flashcard::from_fields(CardId::local(1), NewCard::new("A", "X", "d")),
            Flashcard::from_fields(CardId::local(2), NewCard::new("B", "Y", "d")),
        ];
        let sorted = sort_by_category_then_term(&cards);
        assert_eq!(sorted[0].id, CardId::local(1));

        let mut cursor = StudyCursor::new();
        cursor.set_deck(sorted);
        assert_eq!(cursor.state(), CursorState::Active);
        cursor.next();
        assert_eq!(cursor.position(), 1);
        cursor.next();
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_previous_wraps_to_end() {
        let mut cursor = StudyCursor::with_deck(deck(3));
        cursor.previous();
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.current().unwrap().id, CardId::local(3));
        assert_eq!(cursor.progress(), 1.0);
    }

    #[test]
    fn test_progress() {
        let mut cursor = StudyCursor::with_deck(deck(4));
        assert_eq!(cursor.progress(), 0.25);
        cursor.next();
        assert_eq!(cursor.progress(), 0.5);
        assert_eq!(cursor.progress_percent(), 50);
        assert_eq!(cursor.counter(), (2, 4));

        let cursor = StudyCursor::with_deck(deck(3));
        assert_eq!(cursor.progress_percent(), 33);
    }

    #[test]
    fn test_set_deck_resets_position() {
        let mut cursor = StudyCursor::with_deck(deck(5));
        cursor.next();
        cursor.next();
        cursor.set_deck(deck(2));
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.len(), 2);
    }

    #[test]
    fn test_flip_resets_on_move() {
        let mut cursor = StudyCursor::with_deck(deck(2));
        cursor.flip();
        assert_eq!(cursor.face(), Face::Definition);
        cursor.next();
        assert_eq!(cursor.face(), Face::Term);
    }

    #[test]
    fn test_shuffle_keeps_cards() {
        let mut cursor = StudyCursor::with_deck(deck(6));
        cursor.next();
        cursor.shuffle();
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.len(), 6);

        let mut single = StudyCursor::with_deck(deck(1));
        single.flip();
        single.shuffle();
        assert_eq!(single.face(), Face::Definition);
    }
}
