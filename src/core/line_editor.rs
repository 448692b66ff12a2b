//! Single-line command editor with a fixed prompt.

use crate::schema::command::Key;

pub const DEFAULT_PROMPT: &str = "> ";

/// Accumulates key presses into a command line.
///
/// The line always starts with the prompt, and backspace never eats into
/// it. Pressing Enter raises a ready flag; keys typed before the command
/// is taken keep appending to the same line, so callers should poll
/// [`LineEditor::is_ready`] after every key.
#[derive(Debug, Clone)]
pub struct LineEditor {
    prompt: String,
    line: String,
    ready: bool,
}

impl Default for LineEditor {
    fn default() -> Self {
        Self::new(DEFAULT_PROMPT)
    }
}

impl LineEditor {
    pub fn new(prompt: &str) -> Self {
        Self {
            prompt: prompt.to_string(),
            line: prompt.to_string(),
            ready: false,
        }
    }

    pub fn handle_key(&mut self, key: &Key) {
        if key.is_literal() {
            if let Key::Char(ch) = key {
                self.line.push(*ch);
            }
            return;
        }

        match key {
            Key::Backspace | Key::Delete => {
                if self.line.len() > self.prompt.len() {
                    self.line.pop();
                }
            }
            Key::Enter => {
                tracing::debug!("command line committed: {:?}", self.tail());
                self.ready = true;
            }
            other => tracing::warn!("unhandled key pressed: {:?}", other),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Take the committed command as lower-case tokens and reset the
    /// line to the bare prompt.
    ///
    /// Leading spaces are stripped and the rest is split on single
    /// spaces, so a blank line yields `[""]` and doubled spaces yield
    /// empty tokens. Returns `None` (and leaves the line alone) if Enter
    /// has not been pressed.
    pub fn take_command(&mut self) -> Option<Vec<String>> {
        if !self.ready {
            return None;
        }
        self.ready = false;

        let command = self.tail().to_lowercase();
        let tokens = command
            .trim_start_matches(' ')
            .split(' ')
            .map(str::to_string)
            .collect();
        self.line.truncate(self.prompt.len());
        Some(tokens)
    }

    /// Prompt plus typed text, as drawn.
    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Text typed after the prompt.
    pub fn tail(&self) -> &str {
        &self.line[self.prompt.len()..]
    }
}
