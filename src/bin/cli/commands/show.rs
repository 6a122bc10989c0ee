use anyhow::Result;

use crate::app::App;
use crate::render::terminal::render_card;
use crate::OutputFormat;

pub fn run(app: &App, id: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let card = app.find_card(id)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&card)?),
        OutputFormat::Plain => println!("{}", render_card(&card, use_color)),
    }

    Ok(())
}
