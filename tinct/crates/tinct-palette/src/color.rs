//! 24-bit colours and ANSI painting.

use std::fmt::{self, Write};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PaletteError, PaletteResult};

/// Resets all terminal attributes.
pub const ANSI_RESET: &str = "\x1b[0m";

/// An RGB colour, written `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb`; the leading `#` is optional.
    ///
    /// ```
    /// use tinct_palette::Color;
    ///
    /// assert_eq!(Color::parse("#cba6f7").unwrap(), Color::rgb(0xcb, 0xa6, 0xf7));
    /// assert!(Color::parse("#cba6").is_err());
    /// ```
    pub fn parse(text: &str) -> PaletteResult<Self> {
        let invalid = |reason| PaletteError::InvalidColor {
            value: text.to_string(),
            reason,
        };

        let hex = text.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 {
            return Err(invalid("expected six hex digits"));
        }
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid("not a hex digit"));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid("not a hex digit"))
        };
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Escape sequence selecting this colour as the foreground.
    pub fn ansi_fg(self) -> String {
        format!("\x1b[38;2;{};{};{}m", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = PaletteError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Appends `text` to `out`, wrapped in the colour's escape codes.
///
/// Without a colour the text is appended unchanged. Line breaks inside the
/// text reset and re-open the colour so each terminal line stands alone.
pub fn write_painted(out: &mut String, text: &str, color: Option<Color>) {
    let Some(color) = color else {
        out.push_str(text);
        return;
    };

    let open = color.ansi_fg();
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if line.is_empty() {
            continue;
        }
        // Writing to a String cannot fail.
        let _ = write!(out, "{}{}{}", open, line, ANSI_RESET);
    }
}

/// Returns `text` painted with `color`.
pub fn paint(text: &str, color: Option<Color>) -> String {
    let mut out = String::with_capacity(text.len() + 24);
    write_painted(&mut out, text, color);
    out
}
