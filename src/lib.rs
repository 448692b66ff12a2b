//! Narrative Shell — the presentation layer of a text-adventure client.
//!
//! Renders narrative text carrying inline style markup into a wrapped,
//! positioned glyph stream, and turns raw keystrokes into verb/argument
//! queries against an externally supplied narrative engine.

pub mod core;
pub mod schema;
