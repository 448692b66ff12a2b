//! The game session — the one context object every callback receives.
//!
//! A session is built in a fixed order: narrative assets are loaded
//! first, the engine is compiled from them, and only then is the shell
//! created. After that there are exactly two entry points:
//! [`Session::handle_key`] for input and [`Session::frame`] for drawing.

use thiserror::Error;

use crate::core::config::ShellConfig;
use crate::core::dispatch::{CommandDispatcher, DispatchError};
use crate::core::engine::{join_narrative, NarrativeEngine};
use crate::core::layout::{layout, PositionedGlyph};
use crate::core::line_editor::LineEditor;
use crate::core::markup::{lex, plain_text};
use crate::schema::command::Key;
use crate::schema::glyph::StyledGlyph;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("narrative failed to compile: {0}")]
    Compile(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("narrative failed to start: {0}")]
    Start(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub text: Vec<PositionedGlyph>,
    /// Prompt plus typed text.
    pub command_line: String,
    pub command_origin: (f32, f32),
}

pub struct Session<E: NarrativeEngine> {
    config: ShellConfig,
    editor: LineEditor,
    dispatcher: CommandDispatcher<E>,
    display: Vec<StyledGlyph>,
}

impl<E: NarrativeEngine> Session<E> {
    /// Compile the narrative and open the story.
    pub fn bootstrap<S: AsRef<str>>(
        narrative_lines: &[S],
        config: ShellConfig,
    ) -> Result<Self, SessionError> {
        let narrative = join_narrative(narrative_lines);
        let engine = E::compile(&narrative).map_err(|e| SessionError::Compile(Box::new(e)))?;
        Self::with_engine(engine, config)
    }

    /// Open the story on an already compiled engine.
    pub fn with_engine(engine: E, config: ShellConfig) -> Result<Self, SessionError> {
        let (dispatcher, opening) =
            CommandDispatcher::start(engine).map_err(|e| SessionError::Start(Box::new(e)))?;
        tracing::info!("session started");
        Ok(Self {
            editor: LineEditor::new(&config.prompt),
            config,
            dispatcher,
            display: lex(&opening),
        })
    }

    /// Feed one key to the command line, dispatching if it completed a
    /// command. Returns whether a command was dispatched.
    ///
    /// If the engine fails, the previous text and state stay current.
    pub fn handle_key(&mut self, key: &Key) -> Result<bool, DispatchError> {
        self.editor.handle_key(key);
        let Some(tokens) = self.editor.take_command() else {
            return Ok(false);
        };

        match self.dispatcher.dispatch(&tokens) {
            Ok(text) => {
                self.display = lex(&text);
                Ok(true)
            }
            Err(e) => {
                tracing::warn!("command {:?} failed: {}", tokens, e);
                Err(e)
            }
        }
    }

    /// Lay out the current text and command line.
    pub fn frame(&self) -> Frame {
        Frame {
            text: layout(&self.display, &self.config.text_box),
            command_line: self.editor.line().to_string(),
            command_origin: self.config.prompt_origin,
        }
    }

    /// Current text without markup.
    pub fn display_text(&self) -> String {
        plain_text(&self.display)
    }

    pub fn display(&self) -> &[StyledGlyph] {
        &self.display
    }

    pub fn state(&self) -> &E::State {
        self.dispatcher.state()
    }

    pub fn editor(&self) -> &LineEditor {
        &self.editor
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }
}
