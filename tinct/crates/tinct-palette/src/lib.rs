//! tinct-palette - Token Colours
//!
//! Maps the token kinds produced by `tinct-lex` to 24-bit colours and
//! paints text with ANSI escape sequences.
//!
//! # Example
//!
//! ```
//! use tinct_lex::TokenKind;
//! use tinct_palette::{Category, Palette};
//!
//! let palette = Palette::default();
//! assert_eq!(palette.color_for(&TokenKind::Number), palette.color(Category::Number));
//! assert_eq!(palette.color_for(&TokenKind::Whitespace), None);
//! ```

pub mod category;
pub mod color;
pub mod error;
pub mod palette;

pub use category::Category;
pub use color::{paint, write_painted, Color, ANSI_RESET};
pub use error::{PaletteError, PaletteResult};
pub use palette::{Palette, PaletteConfig};
