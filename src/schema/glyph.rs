use std::fmt;

/// Typeface weight of a glyph.
///
/// Bold and italic share a single slot: a glyph is never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weight {
    Regular,
    Bold,
    Italic,
}

impl Default for Weight {
    fn default() -> Self {
        Self::Regular
    }
}

/// A six-digit colour code, stored exactly as it appeared in the markup.
///
/// Digits are not validated when lexing; renderers call [`Color::rgb`]
/// and decide what to do with codes that are not valid hex.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub [char; 6]);

impl Color {
    pub const WHITE: Color = Color(['f'; 6]);

    /// Build a colour from the first six characters of `digits`.
    /// Returns `None` if fewer than six are available.
    pub fn from_digits(digits: &str) -> Option<Color> {
        let mut code = ['0'; 6];
        let mut chars = digits.chars();
        for slot in code.iter_mut() {
            *slot = chars.next()?;
        }
        Some(Color(code))
    }

    /// Decode to `(r, g, b)`, or `None` if any digit is not hex.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        let mut bytes = [0u8; 3];
        for (i, byte) in bytes.iter_mut().enumerate() {
            let hi = self.0[i * 2].to_digit(16)?;
            let lo = self.0[i * 2 + 1].to_digit(16)?;
            *byte = (hi * 16 + lo) as u8;
        }
        Some((bytes[0], bytes[1], bytes[2]))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("#")?;
        for ch in self.0 {
            write!(f, "{}", ch)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color({})", self)
    }
}

/// One character with its resolved style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyledGlyph {
    pub ch: char,
    pub weight: Weight,
    pub color: Color,
}

impl StyledGlyph {
    /// A regular-weight white glyph.
    pub fn plain(ch: char) -> Self {
        Self {
            ch,
            weight: Weight::Regular,
            color: Color::WHITE,
        }
    }

    pub fn is_newline(&self) -> bool {
        self.ch == '\n'
    }

    pub fn is_space(&self) -> bool {
        self.ch == ' '
    }
}
