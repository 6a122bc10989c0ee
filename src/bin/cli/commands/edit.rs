use anyhow::Result;

use flashdeck_lib::flashcards::{CardId, CardUpdate, Flashcard, NewCard};

use crate::app::App;
use crate::render::terminal::render_card;
use crate::OutputFormat;

pub async fn run_add(
    app: &mut App,
    fields: NewCard,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let card = app.store.create(fields).await?;
    print_result(&card, format, use_color, &format!("Flashcard \"{}\" added successfully!", card.term))
}

pub async fn run_edit(
    app: &mut App,
    id: &str,
    changes: CardUpdate,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let card = app.store.update(&CardId::parse(id), changes).await?;
    print_result(&card, format, use_color, "Flashcard updated successfully!")
}

fn print_result(card: &Flashcard, format: &OutputFormat, use_color: bool, message: &str) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(card)?),
        OutputFormat::Plain => {
            println!("{}", message);
            println!("{}", render_card(card, use_color));
        }
    }
    Ok(())
}
