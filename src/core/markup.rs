//! Inline style markup — turns an annotated string into styled glyphs.
//!
//! Directives are single marker characters that are consumed and never
//! emitted:
//! - `#` toggles bold
//! - `~` toggles italic
//! - `@` toggles colour; when switching on, the next six characters are
//!   taken verbatim as the colour code
//!
//! Bold and italic write the same weight slot, so the most recent toggle
//! wins. Switching colour off returns to white; there is no colour stack.

use std::str::Chars;

use crate::schema::glyph::{Color, StyledGlyph, Weight};

pub const BOLD_MARKER: char = '#';
pub const ITALIC_MARKER: char = '~';
pub const COLOR_MARKER: char = '@';

/// Number of characters in a colour code following `@`.
const COLOR_DIGITS: usize = 6;

#[derive(Debug, Default)]
struct MarkupState {
    bold: bool,
    italic: bool,
    colored: bool,
    weight: Weight,
    color: Color,
}

impl MarkupState {
    fn toggle_bold(&mut self) {
        self.bold = !self.bold;
        self.weight = if self.bold { Weight::Bold } else { Weight::Regular };
    }

    fn toggle_italic(&mut self) {
        self.italic = !self.italic;
        self.weight = if self.italic {
            Weight::Italic
        } else {
            Weight::Regular
        };
    }

    fn toggle_color(&mut self, rest: &mut Chars<'_>) {
        if self.colored {
            self.colored = false;
            self.color = Color::WHITE;
            return;
        }

        self.colored = true;
        let digits: String = rest.by_ref().take(COLOR_DIGITS).collect();
        match Color::from_digits(&digits) {
            Some(color) => self.color = color,
            // Truncated code at end of input: the partial digits are
            // dropped and colour mode stays open.
            None => tracing::debug!("truncated colour code '{}' at end of markup", digits),
        }
    }

    fn glyph(&self, ch: char) -> StyledGlyph {
        StyledGlyph {
            ch,
            weight: self.weight,
            color: self.color,
        }
    }
}

/// Lex `source` into styled glyphs, consuming every directive.
pub fn lex(source: &str) -> Vec<StyledGlyph> {
    let mut state = MarkupState::default();
    let mut glyphs = Vec::with_capacity(source.len());
    let mut chars = source.chars();

    while let Some(ch) = chars.next() {
        match ch {
            BOLD_MARKER => state.toggle_bold(),
            ITALIC_MARKER => state.toggle_italic(),
            COLOR_MARKER => state.toggle_color(&mut chars),
            _ => glyphs.push(state.glyph(ch)),
        }
    }

    glyphs
}

/// The characters of a glyph run with all styling dropped.
pub fn plain_text(glyphs: &[StyledGlyph]) -> String {
    glyphs.iter().map(|g| g.ch).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn magenta() -> Color {
        Color::from_digits("ff00ff").unwrap()
    }

    #[test]
    fn plain_text_passes_through() {
        let glyphs = lex("Hello, world.");
        assert_eq!(plain_text(&glyphs), "Hello, world.");
        assert!(glyphs
            .iter()
            .all(|g| g.weight == Weight::Regular && g.color == Color::WHITE));
    }

    #[test]
    fn bold_span() {
        let glyphs = lex("#Hello#");
        assert_eq!(plain_text(&glyphs), "Hello");
        assert!(glyphs.iter().all(|g| g.weight == Weight::Bold));
    }

    #[test]
    fn bold_closes_back_to_regular() {
        let glyphs = lex("a#b#c");
        let weights: Vec<Weight> = glyphs.iter().map(|g| g.weight).collect();
        assert_eq!(weights, vec![Weight::Regular, Weight::Bold, Weight::Regular]);
    }

    #[test]
    fn italic_span() {
        let glyphs = lex("~so~ it goes");
        assert_eq!(plain_text(&glyphs), "so it goes");
        assert_eq!(glyphs[0].weight, Weight::Italic);
        assert_eq!(glyphs[1].weight, Weight::Italic);
        assert_eq!(glyphs[2].weight, Weight::Regular);
    }

    #[test]
    fn last_weight_toggle_wins() {
        // bold on, italic on (overwrites), bold off (resets to regular
        // even though italic is still flagged), italic off.
        let glyphs = lex("#a~b#c~d");
        let weights: Vec<Weight> = glyphs.iter().map(|g| g.weight).collect();
        assert_eq!(
            weights,
            vec![Weight::Bold, Weight::Italic, Weight::Regular, Weight::Regular]
        );
    }

    #[test]
    fn color_toggle_does_not_restore() {
        let glyphs = lex("@ff00ffHi@there");
        assert_eq!(plain_text(&glyphs), "Hithere");
        assert_eq!(glyphs[0].color, magenta());
        assert_eq!(glyphs[1].color, magenta());
        assert!(glyphs[2..].iter().all(|g| g.color == Color::WHITE));
    }

    #[test]
    fn color_digits_are_not_emitted() {
        let glyphs = lex("@123456");
        assert!(glyphs.is_empty());
    }

    #[test]
    fn color_and_weight_are_independent() {
        let glyphs = lex("@ff00ff#x#@y");
        assert_eq!(glyphs[0].weight, Weight::Bold);
        assert_eq!(glyphs[0].color, magenta());
        assert_eq!(glyphs[1].weight, Weight::Regular);
        assert_eq!(glyphs[1].color, Color::WHITE);
    }

    #[test]
    fn adjacent_directives_are_all_consumed() {
        let glyphs = lex("##~~x");
        assert_eq!(plain_text(&glyphs), "x");
        assert_eq!(glyphs[0].weight, Weight::Regular);
    }

    #[test]
    fn truncated_color_code_does_not_overrun() {
        let glyphs = lex("ok@ab");
        assert_eq!(plain_text(&glyphs), "ok");
    }

    #[test]
    fn unterminated_bold_stays_open() {
        let glyphs = lex("#open");
        assert_eq!(glyphs.len(), 4);
        assert!(glyphs.iter().all(|g| g.weight == Weight::Bold));
    }

    #[test]
    fn marker_at_end_of_input() {
        assert_eq!(plain_text(&lex("end#")), "end");
        assert_eq!(plain_text(&lex("end@")), "end");
        assert!(lex("").is_empty());
    }

    #[test]
    fn newlines_and_multibyte_survive() {
        let glyphs = lex("caf\u{e9}\n#b#");
        assert_eq!(plain_text(&glyphs), "caf\u{e9}\nb");
        assert!(glyphs[4].is_newline());
    }
}
