//! Shell configuration, loaded from RON.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::core::layout::LayoutBox;
use crate::core::line_editor::DEFAULT_PROMPT;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("prompt must not be empty")]
    EmptyPrompt,
}

/// Where and how the shell draws.
///
/// Every field has a default, so a RON file only needs the fields it
/// changes:
///
/// ```ron
/// (
///     prompt: "$ ",
///     text_box: (origin_x: 2.0, origin_y: 1.0, width: 60.0, slack: 10.0,
///                line_height: 1.0, advance: 1.0),
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub prompt: String,
    /// Box the narrative text is laid out in.
    pub text_box: LayoutBox,
    /// Where the command line is drawn.
    pub prompt_origin: (f32, f32),
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            text_box: LayoutBox::default(),
            prompt_origin: (0.0, 22.0),
        }
    }
}

impl ShellConfig {
    /// Load a config from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<ShellConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a config from a RON string.
    pub fn parse_ron(input: &str) -> Result<ShellConfig, ConfigError> {
        let config: ShellConfig = ron::from_str(input)?;
        if config.prompt.is_empty() {
            return Err(ConfigError::EmptyPrompt);
        }
        Ok(config)
    }
}
