//! Terminal painting with crossterm.
//!
//! Layout units are taken as character cells. Whitespace is not drawn;
//! the frame is cleared first.

use crossterm::cursor::MoveTo;
use crossterm::style::{
    Attribute, Color as TermColor, ContentStyle, PrintStyledContent, StyledContent,
};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{queue, QueueableCommand};
use std::io::{self, Write};

use crate::core::layout::PositionedGlyph;
use crate::core::session::Frame;
use crate::schema::glyph::{StyledGlyph, Weight};

/// Terminal style for a glyph. Colour codes that are not valid hex
/// fall back to the terminal's default foreground.
pub fn style_for(glyph: &StyledGlyph) -> ContentStyle {
    let mut style = ContentStyle::new();
    style.foreground_color = glyph
        .color
        .rgb()
        .map(|(r, g, b)| TermColor::Rgb { r, g, b });
    match glyph.weight {
        Weight::Regular => {}
        Weight::Bold => style.attributes.set(Attribute::Bold),
        Weight::Italic => style.attributes.set(Attribute::Italic),
    }
    style
}

fn cell(v: f32) -> u16 {
    v.max(0.0).round().min(u16::MAX as f32) as u16
}

/// Queue positioned glyphs onto `out` without flushing.
pub fn queue_glyphs<W: Write>(out: &mut W, glyphs: &[PositionedGlyph]) -> io::Result<()> {
    for placed in glyphs {
        if placed.glyph.ch.is_whitespace() {
            continue;
        }
        queue!(
            out,
            MoveTo(cell(placed.x), cell(placed.y)),
            PrintStyledContent(StyledContent::new(style_for(&placed.glyph), placed.glyph.ch))
        )?;
    }
    Ok(())
}

/// Clear the screen and draw a whole frame, leaving the cursor at the
/// end of the command line.
pub fn paint_frame<W: Write>(out: &mut W, frame: &Frame) -> io::Result<()> {
    out.queue(Clear(ClearType::All))?;
    queue_glyphs(out, &frame.text)?;

    let (x, y) = frame.command_origin;
    let col = cell(x).saturating_add(frame.command_line.chars().count() as u16);
    queue!(
        out,
        MoveTo(cell(x), cell(y)),
        crossterm::style::Print(&frame.command_line),
        MoveTo(col, cell(y))
    )?;
    out.flush()
}
