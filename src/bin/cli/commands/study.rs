use std::io::{BufRead, Write};

use anyhow::Result;

use flashdeck_lib::flashcards::{view, CursorState, StudyCursor};

use crate::app::App;
use crate::render::terminal::{render_face, render_progress};

const HELP: &str = "[Enter/n] next  [p] previous  [f] flip  [s] shuffle  [q] quit";

/// Walk the filtered deck, one command per input line
pub fn run(
    app: &App,
    category: Option<&str>,
    search: &str,
    shuffle: bool,
    input: &mut impl BufRead,
    output: &mut impl Write,
    use_color: bool,
) -> Result<()> {
    let deck = view::filter(app.store.cards(), category, search);
    let mut cursor = StudyCursor::with_deck(deck);
    if shuffle {
        cursor.shuffle();
    }

    if cursor.state() == CursorState::Empty {
        match category {
            Some(c) => writeln!(output, "No flashcards found in the \"{}\" category.", c)?,
            None => writeln!(output, "No flashcards available to study. Add some!")?,
        }
        return Ok(());
    }

    writeln!(output, "{}", HELP)?;
    show(&cursor, output, use_color)?;

    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        match line.trim() {
            "" | "n" => cursor.next(),
            "p" => cursor.previous(),
            "f" => cursor.flip(),
            "s" => cursor.shuffle(),
            "q" => break,
            other => {
                writeln!(output, "Unknown command '{}'. {}", other, HELP)?;
                continue;
            }
        }
        show(&cursor, output, use_color)?;
    }

    Ok(())
}

fn show(cursor: &StudyCursor, output: &mut impl Write, use_color: bool) -> Result<()> {
    let Some(card) = cursor.current() else {
        return Ok(());
    };
    let (position, total) = cursor.counter();

    writeln!(output)?;
    writeln!(
        output,
        "Card {} / {}  {}",
        position,
        total,
        render_progress(cursor.progress_percent(), 20)
    )?;
    writeln!(output, "{}", render_face(card, cursor.face(), use_color))?;
    Ok(())
}
