//! Data models for the flashcard collection

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a flashcard.
///
/// Locally-stored cards carry a positive integer, cards held by a remote
/// store carry whatever opaque string the store handed out. Ids only
/// support equality; callers never do arithmetic on them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(IdRepr);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Local(u64),
    Assigned(String),
}

impl CardId {
    pub fn local(value: u64) -> Self {
        Self(IdRepr::Local(value))
    }

    pub fn assigned(value: impl Into<String>) -> Self {
        Self(IdRepr::Assigned(value.into()))
    }

    /// Integer value of the id, if it has one. Store-assigned ids that
    /// happen to be numeric count too.
    pub(crate) fn integer(&self) -> Option<u64> {
        match &self.0 {
            IdRepr::Local(value) => Some(*value),
            IdRepr::Assigned(value) => value.parse().ok(),
        }
    }

    /// Parse an id typed by a user: digits become a local id, anything
    /// else is taken as a store-assigned id.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        match input.parse::<u64>() {
            Ok(value) => Self::local(value),
            Err(_) => Self::assigned(input),
        }
    }

    /// Compare ids by their textual form, so `1` and `"1"` match.
    pub fn same_as(&self, other: &CardId) -> bool {
        self == other || self.to_string() == other.to_string()
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            IdRepr::Local(value) => f.pad(&value.to_string()),
            IdRepr::Assigned(value) => f.pad(value),
        }
    }
}

/// A single study card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub id: CardId,
    pub category: String,
    pub term: String,
    pub definition: String,
    #[serde(default)]
    pub example: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Flashcard {
    pub fn from_fields(id: CardId, fields: NewCard) -> Self {
        Self {
            id,
            category: fields.category,
            term: fields.term,
            definition: fields.definition,
            example: fields.example,
            created_at: None,
        }
    }

    /// Required fields that are blank on this card
    pub fn missing_fields(&self) -> Vec<&'static str> {
        missing(&self.term, &self.definition, &self.category)
    }
}

/// Fields supplied when creating a card
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCard {
    pub category: String,
    pub term: String,
    pub definition: String,
    #[serde(default)]
    pub example: String,
}

impl NewCard {
    pub fn new(
        category: impl Into<String>,
        term: impl Into<String>,
        definition: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            term: term.into(),
            definition: definition.into(),
            example: String::new(),
        }
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = example.into();
        self
    }

    pub fn missing_fields(&self) -> Vec<&'static str> {
        missing(&self.term, &self.definition, &self.category)
    }
}

fn missing(term: &str, definition: &str, category: &str) -> Vec<&'static str> {
    [("term", term), ("definition", definition), ("category", category)]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
}

/// Partial update: only the fields that are `Some` get written
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

impl CardUpdate {
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.term.is_none()
            && self.definition.is_none()
            && self.example.is_none()
    }

    /// Keep only the fields whose value differs from `card`
    pub fn changes_from(&self, card: &Flashcard) -> CardUpdate {
        fn changed(value: &Option<String>, current: &str) -> Option<String> {
            value.as_ref().filter(|v| v.as_str() != current).cloned()
        }

        CardUpdate {
            category: changed(&self.category, &card.category),
            term: changed(&self.term, &card.term),
            definition: changed(&self.definition, &card.definition),
            example: changed(&self.example, &card.example),
        }
    }

    /// Merge the supplied fields into `card`, leaving the rest untouched
    pub fn apply_to(&self, card: &mut Flashcard) {
        if let Some(category) = &self.category {
            card.category = category.clone();
        }
        if let Some(term) = &self.term {
            card.term = term.clone();
        }
        if let Some(definition) = &self.definition {
            card.definition = definition.clone();
        }
        if let Some(example) = &self.example {
            card.example = example.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> Flashcard {
        Flashcard::from_fields(
            CardId::local(7),
            NewCard::new("Trigonometry", "Sine", "Opposite over hypotenuse").with_example("sin(30°) = 0.5"),
        )
    }

    #[test]
    fn test_card_id_json_forms() {
        assert_eq!(serde_json::to_string(&CardId::local(3)).unwrap(), "3");
        assert_eq!(serde_json::to_string(&CardId::assigned("a1")).unwrap(), "\"a1\"");

        let local: CardId = serde_json::from_str("12").unwrap();
        assert_eq!(local, CardId::local(12));
        let assigned: CardId = serde_json::from_str("\"12\"").unwrap();
        assert_eq!(assigned, CardId::assigned("12"));
        assert_ne!(local, assigned);
        assert!(CardId::local(12).same_as(&assigned));
    }

    #[test]
    fn test_card_id_parse() {
        assert_eq!(CardId::parse(" 5 "), CardId::local(5));
        assert_eq!(CardId::parse("abc"), CardId::assigned("abc"));
        assert_eq!(CardId::assigned("42").integer(), Some(42));
        assert_eq!(CardId::assigned("x").integer(), None);
    }

    #[test]
    fn test_flashcard_json_shape() {
        let json = r#"{"id":"9","category":"Limits","term":"Limit","definition":"Approached value","createdAt":"2025-03-19T10:00:00.000Z"}"#;
        let remote: Flashcard = serde_json::from_str(json).unwrap();
        assert_eq!(remote.id, CardId::assigned("9"));
        assert_eq!(remote.example, "");
        assert!(remote.created_at.is_some());

        let local = serde_json::to_value(card()).unwrap();
        assert!(local.get("createdAt").is_none());
        assert_eq!(local["id"], 7);
    }

    #[test]
    fn test_missing_fields() {
        let fields = NewCard::new("  ", "", "ok");
        assert_eq!(fields.missing_fields(), vec!["term", "category"]);
        assert!(NewCard::new("A", "B", "C").missing_fields().is_empty());
    }

    #[test]
    fn test_changes_from_keeps_only_differences() {
        let card = card();
        let update = CardUpdate {
            term: Some("Sine".to_string()),
            definition: Some("Ratio of opposite side to hypotenuse".to_string()),
            ..Default::default()
        };

        let changes = update.changes_from(&card);
        assert_eq!(changes.term, None);
        assert_eq!(changes.definition.as_deref(), Some("Ratio of opposite side to hypotenuse"));
        assert!(!changes.is_empty());

        let same = CardUpdate {
            category: Some(card.category.clone()),
            example: Some(card.example.clone()),
            ..Default::default()
        };
        assert!(same.changes_from(&card).is_empty());
    }

    #[test]
    fn test_apply_to_merges() {
        let mut card = card();
        CardUpdate {
            example: Some(String::new()),
            ..Default::default()
        }
        .apply_to(&mut card);

        assert_eq!(card.example, "");
        assert_eq!(card.term, "Sine");
        assert_eq!(card.category, "Trigonometry");
    }

    #[test]
    fn test_update_serializes_only_present_fields() {
        let update = CardUpdate {
            term: Some("Cosine".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&update).unwrap(), r#"{"term":"Cosine"}"#);
    }

    #[test]
    fn test_id_display_honors_width() {
        assert_eq!(format!("{:>4}", CardId::local(7)), "   7");
        assert_eq!(format!("{:<4}|", CardId::assigned("ab")), "ab  |");
        assert_eq!(CardId::local(12).to_string(), "12");
    }
}
