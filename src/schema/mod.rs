pub mod command;
pub mod glyph;
