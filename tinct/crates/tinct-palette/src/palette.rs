//! Colour palettes.
//!
//! A [`Palette`] maps token categories to colours. Keywords are coloured by
//! group: group `n` takes the `n`-th colour of the keyword list, cycling
//! when a language has more groups than colours.

use serde::{Deserialize, Serialize};
use tinct_lang::GroupId;
use tinct_lex::{Token, TokenKind};
use tinct_util::{Buffer, FxHashMap};

use crate::category::Category;
use crate::color::{write_painted, Color};

/// Catppuccin Mocha colours.
mod mocha {
    use super::Color;

    pub const MAUVE: Color = Color::rgb(0xcb, 0xa6, 0xf7);
    pub const BLUE: Color = Color::rgb(0x89, 0xb4, 0xfa);
    pub const GREEN: Color = Color::rgb(0xa6, 0xe3, 0xa1);
    pub const PEACH: Color = Color::rgb(0xfa, 0xb3, 0x87);
    pub const YELLOW: Color = Color::rgb(0xf9, 0xe2, 0xaf);
    pub const RED: Color = Color::rgb(0xf3, 0x8b, 0xa8);
    pub const SKY: Color = Color::rgb(0x89, 0xdc, 0xeb);
    pub const TEAL: Color = Color::rgb(0x94, 0xe2, 0xd5);
    pub const PINK: Color = Color::rgb(0xf5, 0xc2, 0xe7);
    pub const OVERLAY0: Color = Color::rgb(0x6c, 0x70, 0x86);
    pub const OVERLAY2: Color = Color::rgb(0x93, 0x99, 0xb2);
    pub const TEXT: Color = Color::rgb(0xcd, 0xd6, 0xf4);
}

/// Category and keyword-group colours.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: FxHashMap<Category, Color>,
    keyword_groups: Vec<Color>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::catppuccin_mocha()
    }
}

impl Palette {
    /// A palette with no colours at all.
    pub fn empty() -> Self {
        Self {
            colors: FxHashMap::default(),
            keyword_groups: Vec::new(),
        }
    }

    /// The default dark theme.
    pub fn catppuccin_mocha() -> Self {
        let mut palette = Self::empty();
        palette.set(Category::Identifier, mocha::TEXT);
        palette.set(Category::Keyword, mocha::MAUVE);
        palette.set(Category::Number, mocha::PEACH);
        palette.set(Category::Operator, mocha::SKY);
        palette.set(Category::Punctuation, mocha::OVERLAY2);
        palette.set(Category::Comment, mocha::OVERLAY0);
        palette.set(Category::String, mocha::GREEN);
        palette.set(Category::Error, mocha::RED);
        palette.keyword_groups = vec![mocha::MAUVE, mocha::YELLOW, mocha::BLUE, mocha::TEAL, mocha::PINK];
        palette
    }

    pub fn color(&self, category: Category) -> Option<Color> {
        self.colors.get(&category).copied()
    }

    pub fn set(&mut self, category: Category, color: Color) {
        self.colors.insert(category, color);
    }

    pub fn keyword_groups(&self) -> &[Color] {
        &self.keyword_groups
    }

    pub fn set_keyword_groups(&mut self, colors: Vec<Color>) {
        self.keyword_groups = colors;
    }

    /// Colour of a keyword group, falling back to the keyword colour when
    /// no group colours are set.
    pub fn keyword_color(&self, group: GroupId) -> Option<Color> {
        if self.keyword_groups.is_empty() {
            return self.color(Category::Keyword);
        }
        let slot = group.0 as usize % self.keyword_groups.len();
        Some(self.keyword_groups[slot])
    }

    /// Colour of a token kind; whitespace has none.
    pub fn color_for(&self, kind: &TokenKind) -> Option<Color> {
        match kind {
            TokenKind::Keyword(group) => self.keyword_color(*group),
            other => Category::of(*other).and_then(|c| self.color(c)),
        }
    }

    /// Applies the colours set in `overrides`.
    pub fn apply(&mut self, overrides: &PaletteConfig) {
        for category in Category::ALL {
            if let Some(color) = overrides.get(category) {
                tracing::debug!(%category, %color, "palette override");
                self.set(category, color);
            }
        }
        if !overrides.keyword_groups.is_empty() {
            self.keyword_groups = overrides.keyword_groups.clone();
        }
    }

    /// The default theme with `overrides` applied.
    pub fn with_overrides(overrides: &PaletteConfig) -> Self {
        let mut palette = Self::default();
        palette.apply(overrides);
        palette
    }

    /// Renders `tokens` from `buffer` as ANSI-coloured text.
    pub fn render<I>(&self, buffer: &Buffer, tokens: I) -> String
    where
        I: IntoIterator<Item = Token>,
    {
        let mut out = String::new();
        for token in tokens {
            write_painted(&mut out, &token.text(buffer), self.color_for(&token.kind));
        }
        out
    }
}

/// Colour overrides, as found in the `[palette]` table of a config file.
///
/// ```toml
/// [palette]
/// comment = "#7f849c"
/// keyword_groups = ["#cba6f7", "#f9e2af"]
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub punctuation: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub string: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Color>,
    /// Keyword colours by group id, cycled
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keyword_groups: Vec<Color>,
}

impl PaletteConfig {
    pub fn get(&self, category: Category) -> Option<Color> {
        match category {
            Category::Identifier => self.identifier,
            Category::Keyword => self.keyword,
            Category::Number => self.number,
            Category::Operator => self.operator,
            Category::Punctuation => self.punctuation,
            Category::Comment => self.comment,
            Category::String => self.string,
            Category::Error => self.error,
        }
    }
}
