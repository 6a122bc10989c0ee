use std::io::{BufRead, Write};

use anyhow::Result;

use flashdeck_lib::flashcards::Flashcard;

use crate::app::App;
use crate::OutputFormat;

/// Asks the user before a card is removed
pub trait ConfirmDelete {
    fn confirm(&mut self, card: &Flashcard) -> Result<bool>;
}

/// Prompt on stdin, unless `--yes` was given
pub struct Confirm {
    assume_yes: bool,
}

impl Confirm {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl ConfirmDelete for Confirm {
    fn confirm(&mut self, card: &Flashcard) -> Result<bool> {
        if self.assume_yes {
            return Ok(true);
        }
        let stdin = std::io::stdin();
        ask(card, &mut stdin.lock(), &mut std::io::stderr())
    }
}

fn ask(card: &Flashcard, input: &mut impl BufRead, output: &mut impl Write) -> Result<bool> {
    write!(output, "Delete flashcard \"{}\"? This cannot be undone. [y/N] ", card.term)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

pub async fn run(
    app: &mut App,
    id: &str,
    confirm: &mut dyn ConfirmDelete,
    format: &OutputFormat,
) -> Result<()> {
    let card = app.find_card(id)?;

    let deleted = if confirm.confirm(&card)? {
        app.store.delete(&card.id).await?;
        true
    } else {
        false
    };

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": card.id,
                "deleted": deleted,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if deleted {
                println!("Flashcard deleted successfully!");
            } else {
                println!("Kept flashcard \"{}\"", card.term);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flashdeck_lib::flashcards::{CardId, CollectionStore, MemorySnapshot, NewCard};

    struct Answer(bool);

    impl ConfirmDelete for Answer {
        fn confirm(&mut self, _card: &Flashcard) -> Result<bool> {
            Ok(self.0)
        }
    }

    fn app() -> App {
        let cards = vec![Flashcard::from_fields(CardId::local(1), NewCard::new("A", "X", "d"))];
        App {
            store: CollectionStore::open_local(MemorySnapshot::with_cards(&cards)).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_declined_delete_keeps_card() {
        let mut app = app();
        run(&mut app, "1", &mut Answer(false), &OutputFormat::Plain).await.unwrap();
        assert_eq!(app.store.len(), 1);

        run(&mut app, "1", &mut Answer(true), &OutputFormat::Plain).await.unwrap();
        assert!(app.store.is_empty());
    }

    #[test]
    fn test_ask_reads_answer() {
        let card = Flashcard::from_fields(CardId::local(1), NewCard::new("A", "X", "d"));
        let mut output = Vec::new();
        assert!(ask(&card, &mut "yes\n".as_bytes(), &mut output).unwrap());
        assert!(!ask(&card, &mut "\n".as_bytes(), &mut output).unwrap());
        assert!(String::from_utf8(output).unwrap().contains("[y/N]"));
    }
}
