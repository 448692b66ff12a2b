//! Monospace text layout — places styled glyphs inside a box, wrapping
//! at spaces once the cursor passes the soft margin.

use serde::{Deserialize, Serialize};

use crate::schema::glyph::StyledGlyph;

/// The box text is laid out in.
///
/// Units are whatever the renderer uses: terminal cells, canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutBox {
    /// Left edge.
    pub origin_x: f32,
    /// First baseline.
    pub origin_y: f32,
    pub width: f32,
    /// How far short of `width` a space starts counting as a wrap point.
    pub slack: f32,
    pub line_height: f32,
    /// Horizontal advance per glyph.
    pub advance: f32,
}

impl Default for LayoutBox {
    fn default() -> Self {
        Self {
            origin_x: 0.0,
            origin_y: 0.0,
            width: 72.0,
            slack: 12.0,
            line_height: 1.0,
            advance: 1.0,
        }
    }
}

impl LayoutBox {
    /// Offset from the left edge at which spaces become wrap points.
    pub fn soft_margin(&self) -> f32 {
        self.width - self.slack
    }
}

/// A glyph with its draw position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionedGlyph {
    pub glyph: StyledGlyph,
    pub x: f32,
    pub y: f32,
}

/// Lay out `glyphs` in `bounds`.
///
/// Pure: the same input always yields the same output, so renderers may
/// call this every frame instead of caching positions. Newlines and
/// wrapping spaces are still emitted (at the end of their line) so a
/// renderer sees every glyph; most will skip drawing whitespace.
pub fn layout(glyphs: &[StyledGlyph], bounds: &LayoutBox) -> Vec<PositionedGlyph> {
    let mut out = Vec::with_capacity(glyphs.len());
    let mut x = bounds.origin_x;
    let mut y = bounds.origin_y;
    let margin = bounds.soft_margin();

    for glyph in glyphs {
        out.push(PositionedGlyph {
            glyph: *glyph,
            x,
            y,
        });

        let wraps = glyph.is_space() && x - bounds.origin_x >= margin;
        if glyph.is_newline() || wraps {
            x = bounds.origin_x;
            y += bounds.line_height;
        } else {
            x += bounds.advance;
        }
    }

    out
}

/// Number of lines a laid-out run occupies.
pub fn line_count(positioned: &[PositionedGlyph], bounds: &LayoutBox) -> usize {
    match positioned.last() {
        None => 0,
        Some(last) => ((last.y - bounds.origin_y) / bounds.line_height).round() as usize + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::markup::lex;

    fn cell_box(width: f32, slack: f32) -> LayoutBox {
        LayoutBox {
            width,
            slack,
            ..LayoutBox::default()
        }
    }

    #[test]
    fn single_line_advances_by_glyph() {
        let out = layout(&lex("abc"), &cell_box(80.0, 10.0));
        let xs: Vec<f32> = out.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0]);
        assert!(out.iter().all(|p| p.y == 0.0));
    }

    #[test]
    fn newline_starts_next_line() {
        let out = layout(&lex("ab\ncd"), &cell_box(80.0, 10.0));
        assert_eq!((out[2].x, out[2].y), (2.0, 0.0));
        assert_eq!((out[3].x, out[3].y), (0.0, 1.0));
        assert_eq!((out[4].x, out[4].y), (1.0, 1.0));
    }

    #[test]
    fn space_past_margin_wraps() {
        // margin = 4; the space sits at x = 5.
        let out = layout(&lex("hello world"), &cell_box(6.0, 2.0));
        assert_eq!((out[5].x, out[5].y), (5.0, 0.0));
        assert_eq!((out[6].x, out[6].y), (0.0, 1.0));
        assert_eq!(out[6].glyph.ch, 'w');
    }

    #[test]
    fn space_exactly_at_margin_wraps() {
        // margin = 3; the space sits at x = 3.
        let out = layout(&lex("abc de"), &cell_box(5.0, 2.0));
        assert_eq!((out[4].x, out[4].y), (0.0, 1.0));
    }

    #[test]
    fn space_before_margin_does_not_wrap() {
        let out = layout(&lex("ab cd"), &cell_box(10.0, 2.0));
        assert!(out.iter().all(|p| p.y == 0.0));
    }

    #[test]
    fn long_word_overflows_instead_of_breaking() {
        let out = layout(&lex("abcdefghij"), &cell_box(4.0, 1.0));
        assert!(out.iter().all(|p| p.y == 0.0));
        assert_eq!(out[9].x, 9.0);
    }

    #[test]
    fn origin_and_units_are_respected() {
        let bounds = LayoutBox {
            origin_x: -900.0,
            origin_y: -500.0,
            width: 1600.0,
            slack: 200.0,
            line_height: 35.0,
            advance: 28.0,
        };
        let out = layout(&lex("a\nb"), &bounds);
        assert_eq!((out[0].x, out[0].y), (-900.0, -500.0));
        assert_eq!((out[2].x, out[2].y), (-900.0, -465.0));
    }

    #[test]
    fn layout_is_idempotent() {
        let glyphs = lex("#The lantern# flickers. @ffaa00Shadows@ gather near the door.");
        let bounds = cell_box(20.0, 5.0);
        let first = layout(&glyphs, &bounds);
        let second = layout(&glyphs, &bounds);
        assert_eq!(first, second);
    }

    #[test]
    fn styles_carry_through() {
        let out = layout(&lex("#b#"), &cell_box(10.0, 1.0));
        assert_eq!(out[0].glyph.weight, crate::schema::glyph::Weight::Bold);
    }

    #[test]
    fn counts_lines() {
        let bounds = cell_box(80.0, 10.0);
        assert_eq!(line_count(&layout(&[], &bounds), &bounds), 0);
        assert_eq!(line_count(&layout(&lex("one"), &bounds), &bounds), 1);
        assert_eq!(line_count(&layout(&lex("one\ntwo\nthree"), &bounds), &bounds), 3);
    }
}
