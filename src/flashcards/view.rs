//! Derived views over a collection snapshot
//!
//! Everything here is pure: inputs are borrowed, outputs are fresh vectors,
//! and the same inputs always give the same result (shuffling aside).

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;

use super::models::Flashcard;

/// Keep cards matching an optional category and a search term.
///
/// The search is a case-insensitive substring match on the term or the
/// definition; an empty search matches everything. Input order is kept.
pub fn filter(cards: &[Flashcard], category: Option<&str>, search: &str) -> Vec<Flashcard> {
    let needle = search.to_lowercase();
    cards
        .iter()
        .filter(|card| category.map_or(true, |c| card.category == c))
        .filter(|card| {
            needle.is_empty()
                || card.term.to_lowercase().contains(&needle)
                || card.definition.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Order by category, then term. Stable for equal keys.
pub fn sort_by_category_then_term(cards: &[Flashcard]) -> Vec<Flashcard> {
    let mut sorted = cards.to_vec();
    sorted.sort_by(|a, b| a.category.cmp(&b.category).then_with(|| a.term.cmp(&b.term)));
    sorted
}

/// Random permutation of `cards` using the thread RNG
pub fn shuffle(cards: &[Flashcard]) -> Vec<Flashcard> {
    shuffle_with(cards, &mut rand::thread_rng())
}

pub fn shuffle_with<R: Rng + ?Sized>(cards: &[Flashcard], rng: &mut R) -> Vec<Flashcard> {
    let mut deck = cards.to_vec();
    deck.shuffle(rng);
    deck
}

/// Distinct categories in lexicographic order
pub fn categories_sorted(cards: &[Flashcard]) -> Vec<String> {
    cards
        .iter()
        .map(|card| card.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct categories in order of first appearance
pub fn categories_in_order(cards: &[Flashcard]) -> Vec<String> {
    let mut seen = Vec::new();
    for card in cards {
        if !seen.contains(&card.category) {
            seen.push(card.category.clone());
        }
    }
    seen
}

/// Filter criteria as picked in a list or study screen
#[derive(Debug, Clone, Default)]
pub struct ViewQuery {
    pub category: Option<String>,
    pub search: String,
    pub sorted: bool,
}

impl ViewQuery {
    pub fn apply(&self, cards: &[Flashcard]) -> Vec<Flashcard> {
        let filtered = filter(cards, self.category.as_deref(), &self.search);
        if self.sorted {
            sort_by_category_then_term(&filtered)
        } else {
            filtered
        }
    }
}
