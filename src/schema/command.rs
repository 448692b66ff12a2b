use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A key press as seen by the line editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Delete,
    Enter,
    /// Anything else, carried by name so it can be logged.
    Other(String),
}

impl Key {
    /// True for the literal-character classes the command line accepts:
    /// space, ASCII digits, and ASCII upper- and lower-case letters.
    pub fn is_literal(&self) -> bool {
        matches!(self, Key::Char(ch) if *ch == ' ' || ch.is_ascii_alphanumeric())
    }
}

impl From<KeyEvent> for Key {
    fn from(event: KeyEvent) -> Self {
        // Chords like Ctrl-W or Alt-X are not typed characters.
        let typed = event.modifiers.difference(KeyModifiers::SHIFT).is_empty();
        match event.code {
            KeyCode::Char(ch) if typed => Key::Char(ch),
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Enter => Key::Enter,
            _ => Key::Other(format!("{:?}+{:?}", event.modifiers, event.code)),
        }
    }
}

/// The fixed verb table understood by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Examine,
    Use,
    Talk,
    Go,
    Take,
    Help,
    Inventory,
}

impl Verb {
    pub const ALL: [Verb; 7] = [
        Verb::Examine,
        Verb::Use,
        Verb::Talk,
        Verb::Go,
        Verb::Take,
        Verb::Help,
        Verb::Inventory,
    ];

    /// Look up a typed word. `None` is the not-found result; callers
    /// forward such words to the engine as `MISC`.
    pub fn lookup(word: &str) -> Option<Verb> {
        Self::ALL.into_iter().find(|verb| verb.word() == word)
    }

    /// The lower-case word a player types.
    pub fn word(&self) -> &'static str {
        match self {
            Self::Examine => "examine",
            Self::Use => "use",
            Self::Talk => "talk",
            Self::Go => "go",
            Self::Take => "take",
            Self::Help => "help",
            Self::Inventory => "inventory",
        }
    }

    /// The verb name sent in an engine query, or `None` for verbs the
    /// engine answers through a dedicated call (`inventory`).
    pub fn query_name(&self) -> Option<&'static str> {
        match self {
            Self::Examine => Some("EXAMINE"),
            Self::Use => Some("USE"),
            Self::Talk => Some("TALK"),
            Self::Go => Some("GO"),
            Self::Take => Some("TAKE"),
            Self::Help => Some("HELP"),
            Self::Inventory => None,
        }
    }

    /// Index of the token carrying this verb's argument.
    ///
    /// `talk` reads the third token (`talk to <name>`); the others read
    /// the second.
    pub fn arg_slot(&self) -> usize {
        match self {
            Self::Talk => 2,
            _ => 1,
        }
    }
}

/// Query verb used for words missing from the verb table.
pub const MISC_QUERY: &str = "MISC";
