//! The narrative engine contract.
//!
//! The engine itself (story compilation, rooms, inventory) lives outside
//! this crate. The shell talks to it only through [`NarrativeEngine`],
//! and treats story progress as an opaque token that is threaded through
//! every call: each call takes the latest token and returns a new one.

use std::fmt;

/// One engine response: text to render plus the token to query with next.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState<T> {
    text: String,
    token: T,
}

impl<T> GameState<T> {
    pub fn new(text: impl Into<String>, token: T) -> Self {
        Self {
            text: text.into(),
            token,
        }
    }

    /// The opaque token for the next query.
    pub fn to_state(&self) -> &T {
        &self.token
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_parts(self) -> (String, T) {
        (self.text, self.token)
    }
}

impl<T> fmt::Display for GameState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A compiled, queryable story.
///
/// Implementations must not keep hidden progress between calls; all of
/// it belongs in `State`.
pub trait NarrativeEngine: Sized {
    type State: Clone + fmt::Debug;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the engine from the full narrative source.
    fn compile(narrative: &str) -> Result<Self, Self::Error>;

    /// The opening state and its text.
    fn start(&self) -> Result<GameState<Self::State>, Self::Error>;

    fn query(
        &self,
        verb: &str,
        arg: &str,
        state: &Self::State,
    ) -> Result<GameState<Self::State>, Self::Error>;

    fn print_current_room(
        &self,
        state: &Self::State,
    ) -> Result<GameState<Self::State>, Self::Error>;

    fn print_inventory(&self, state: &Self::State)
        -> Result<GameState<Self::State>, Self::Error>;
}

/// Join narrative source lines with single spaces.
///
/// Line breaks in the source file are not significant; the engine finds
/// paragraph structure in the joined text itself.
pub fn join_narrative<S: AsRef<str>>(lines: &[S]) -> String {
    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(line.as_ref());
    }
    out
}
