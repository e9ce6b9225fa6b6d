//! Command modules for the tinct CLI.
//!
//! Each subcommand lives in its own file: an args struct, a handler
//! implementing [`traits::Command`] and a `run_*` entry point.

pub mod common;
pub mod traits;

pub mod compile;
pub mod highlight;
pub mod init;
pub mod languages;
pub mod rebuild;
pub mod tokens;

pub use compile::{run_compile, CompileArgs};
pub use highlight::{run_highlight, HighlightArgs};
pub use init::{run_init, InitArgs};
pub use languages::{run_languages, LanguagesArgs};
pub use rebuild::{run_rebuild, RebuildArgs};
pub use tokens::{run_tokens, TokensArgs};
