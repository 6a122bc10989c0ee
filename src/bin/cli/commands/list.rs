use anyhow::Result;

use flashdeck_lib::flashcards::ViewQuery;

use crate::app::App;
use crate::render::terminal::render_row;
use crate::OutputFormat;

pub fn run(
    app: &App,
    category: Option<&str>,
    search: &str,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let query = ViewQuery {
        category: category.map(|c| c.to_string()),
        search: search.to_string(),
        sorted: true,
    };
    let cards = query.apply(app.store.cards());

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&cards)?);
        }
        OutputFormat::Plain => {
            if cards.is_empty() {
                match category {
                    Some(c) => println!("No flashcards found in the \"{}\" category.", c),
                    None => println!("No flashcards found."),
                }
                return Ok(());
            }
            println!("Your Flashcards ({})", cards.len());
            for card in &cards {
                println!("{}", render_row(card, use_color));
            }
        }
    }

    Ok(())
}

pub fn run_categories(app: &App, format: &OutputFormat) -> Result<()> {
    let categories = app.store.categories();
    let cards = app.store.cards();

    match format {
        OutputFormat::Json => {
            let output: Vec<_> = categories
                .iter()
                .map(|name| {
                    serde_json::json!({
                        "name": name,
                        "cardCount": cards.iter().filter(|c| &c.category == name).count(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if categories.is_empty() {
                println!("(no categories)");
            }
            for name in &categories {
                let count = cards.iter().filter(|c| &c.category == name).count();
                println!("{} ({} cards)", name, count);
            }
        }
    }

    Ok(())
}
