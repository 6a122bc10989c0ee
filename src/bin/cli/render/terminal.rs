use flashdeck_lib::flashcards::{Face, Flashcard};

/// ANSI color codes
pub struct Color;

impl Color {
    pub const RESET: &'static str = "\x1b[0m";
    pub const BOLD: &'static str = "\x1b[1m";
    pub const DIM: &'static str = "\x1b[2m";
    pub const ITALIC: &'static str = "\x1b[3m";
    pub const CYAN: &'static str = "\x1b[36m";
    pub const GRAY: &'static str = "\x1b[90m";
}

fn paint(text: &str, style: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", style, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// One line per card for list output
pub fn render_row(card: &Flashcard, use_color: bool) -> String {
    format!(
        "{}  {}  {}  {}",
        paint(&format!("{:>6}", card.id), Color::GRAY, use_color),
        paint(&format!("[{}]", card.category), Color::CYAN, use_color),
        paint(&card.term, Color::BOLD, use_color),
        truncate(&card.definition, 60),
    )
}

/// Full card with all fields
pub fn render_card(card: &Flashcard, use_color: bool) -> String {
    let mut lines = vec![
        paint(&card.term, Color::BOLD, use_color),
        paint(&format!("Category: {}", card.category), Color::CYAN, use_color),
        String::new(),
    ];
    lines.extend(wrap_lines(&card.definition, "", 80));
    if !card.example.is_empty() {
        lines.push(String::new());
        let example = wrap_lines(&format!("Example: {}", card.example), "", 80);
        lines.extend(example.into_iter().map(|l| paint(&l, Color::ITALIC, use_color)));
    }
    if let Some(created) = card.created_at {
        lines.push(paint(
            &format!("Created {}", created.format("%Y-%m-%d %H:%M")),
            Color::DIM,
            use_color,
        ));
    }
    lines.push(paint(&format!("ID: {}", card.id), Color::GRAY, use_color));
    lines.join("\n")
}

/// The visible side of a card in a study session
pub fn render_face(card: &Flashcard, face: Face, use_color: bool) -> String {
    match face {
        Face::Term => {
            let mut lines = vec![paint(&format!("[{}]", card.category), Color::CYAN, use_color)];
            lines.push(paint(&card.term, Color::BOLD, use_color));
            lines.join("\n")
        }
        Face::Definition => {
            let mut lines = wrap_lines(&card.definition, "", 80);
            if !card.example.is_empty() {
                lines.push(String::new());
                lines.extend(
                    wrap_lines(&format!("Example: {}", card.example), "", 80)
                        .into_iter()
                        .map(|l| paint(&l, Color::ITALIC, use_color)),
                );
            }
            lines.join("\n")
        }
    }
}

/// Text progress bar, e.g. `[#####-----] 50%`
pub fn render_progress(percent: u8, width: usize) -> String {
    let filled = (percent as usize * width + 50) / 100;
    format!(
        "[{}{}] {}%",
        "#".repeat(filled.min(width)),
        "-".repeat(width - filled.min(width)),
        percent
    )
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

/// Word-wrap text to a given width with a prefix
fn wrap_lines(text: &str, prefix: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let effective_width = width.saturating_sub(prefix.len());

    for paragraph in text.split('\n') {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current_line = String::new();
        for word in paragraph.split_whitespace() {
            if current_line.is_empty() {
                current_line = word.to_string();
            } else if current_line.chars().count() + 1 + word.chars().count() > effective_width {
                lines.push(format!("{}{}", prefix, current_line));
                current_line = word.to_string();
            } else {
                current_line.push(' ');
                current_line.push_str(word);
            }
        }
        if !current_line.is_empty() {
            lines.push(format!("{}{}", prefix, current_line));
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use flashdeck_lib::flashcards::{CardId, NewCard};

    #[test]
    fn test_render_progress() {
        assert_eq!(render_progress(0, 10), "[----------] 0%");
        assert_eq!(render_progress(50, 10), "[#####-----] 50%");
        assert_eq!(render_progress(100, 10), "[##########] 100%");
    }

    #[test]
    fn test_wrap_lines() {
        let lines = wrap_lines("one two three four", "", 9);
        assert_eq!(lines, vec!["one two", "three", "four"]);
    }

    #[test]
    fn test_render_row_plain() {
        let card = Flashcard::from_fields(CardId::local(3), NewCard::new("Limits", "Limit", "Approached value"));
        assert_eq!(render_row(&card, false), "     3  [Limits]  Limit  Approached value");
    }

    #[test]
    fn test_render_row_colored_keeps_id_width() {
        let card = Flashcard::from_fields(CardId::local(42), NewCard::new("Limits", "Limit", "Approached value"));
        let row = render_row(&card, true);
        assert!(row.starts_with(&format!("{}    42{}", Color::GRAY, Color::RESET)));
    }
}
