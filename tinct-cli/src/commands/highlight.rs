//! `highlight` command: print a file with ANSI colours.

use std::io::Write;
use std::ops::Range;
use std::path::PathBuf;

use tinct_lang::{LanguageDefinition, LanguageManager, ManagerConfig};
use tinct_lex::{ScanOptions, Token};
use tinct_palette::{write_painted, Palette, PaletteConfig};
use tinct_util::Buffer;

use crate::commands::common::{collect_tokens, load_buffer, parse_line_range, select_language};
use crate::commands::traits::Command;
use crate::error::Result;

/// Arguments for the highlight command.
#[derive(Debug, Clone)]
pub struct HighlightArgs {
    pub file: PathBuf,
    pub lang: Option<String>,
    pub lines: Option<String>,
    /// Emit colour escapes; plain text otherwise.
    pub color: bool,
    pub palette: PaletteConfig,
    pub manager: ManagerConfig,
}

/// Highlight command handler.
pub struct HighlightCommand {
    args: HighlightArgs,
    palette: Palette,
}

impl HighlightCommand {
    /// Renders the selected part of `buffer`.
    pub fn render(&self, buffer: &Buffer, language: &LanguageDefinition) -> Result<String> {
        let lines = self.args.lines.as_deref().map(parse_line_range).transpose()?;
        let (tokens, range) = collect_tokens(buffer, language, lines, ScanOptions::default())?;
        Ok(self.paint(buffer, &tokens, range))
    }

    /// Paints `tokens`, clipped to `range`.
    fn paint(&self, buffer: &Buffer, tokens: &[Token], range: Range<usize>) -> String {
        let mut out = String::with_capacity(range.len());
        for token in tokens {
            let start = token.start.max(range.start);
            let end = token.end().min(range.end);
            if start >= end {
                continue;
            }
            let color = if self.args.color {
                self.palette.color_for(&token.kind)
            } else {
                None
            };
            write_painted(&mut out, &buffer.text(start..end), color);
        }
        out
    }

    pub fn run(&self) -> Result<()> {
        let buffer = load_buffer(&self.args.file)?;
        let manager = LanguageManager::new(self.args.manager.clone());
        let language = select_language(&manager, &self.args.file, self.args.lang.as_deref());
        tracing::debug!(language = language.name(), "highlighting");

        let text = self.render(&buffer, &language)?;
        let mut out = std::io::stdout().lock();
        out.write_all(text.as_bytes())?;
        if !text.is_empty() && !text.ends_with('\n') {
            out.write_all(b"\n")?;
        }
        Ok(())
    }
}

impl Command for HighlightCommand {
    type Args = HighlightArgs;
    type Output = ();

    fn new(args: Self::Args) -> Self {
        let palette = Palette::with_overrides(&args.palette);
        Self { args, palette }
    }

    fn execute(&self) -> Result<Self::Output> {
        self.run()
    }

    fn name() -> &'static str {
        "highlight"
    }
}

/// Run the highlight command.
pub fn run_highlight(args: HighlightArgs) -> Result<()> {
    HighlightCommand::new(args).execute()?;
    tracing::debug!(command = HighlightCommand::name(), "done");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinct_palette::{Color, ANSI_RESET};

    fn args(color: bool, lines: Option<&str>) -> HighlightArgs {
        HighlightArgs {
            file: PathBuf::from("t.py"),
            lang: None,
            lines: lines.map(str::to_string),
            color,
            palette: PaletteConfig {
                comment: Some(Color::rgb(1, 2, 3)),
                ..PaletteConfig::default()
            },
            manager: ManagerConfig::default(),
        }
    }

    fn python() -> std::sync::Arc<LanguageDefinition> {
        LanguageManager::bundled().resolve(".py")
    }

    #[test]
    fn test_plain_output_reproduces_text() {
        let text = "def f():\n    return 1  # one\n";
        let buffer = Buffer::from_text("t.py", text);
        let out = HighlightCommand::new(args(false, None)).render(&buffer, &python()).unwrap();
        assert_eq!(out, text);
    }

    #[test]
    fn test_coloured_comment() {
        let buffer = Buffer::from_text("t.py", "x  # c");
        let out = HighlightCommand::new(args(true, None)).render(&buffer, &python()).unwrap();
        assert!(out.contains("\x1b[38;2;1;2;3m# c"));
        assert!(out.ends_with(ANSI_RESET));
    }

    #[test]
    fn test_lines_are_clipped() {
        let buffer = Buffer::from_text("t.py", "a = 1\nb = 2\nc = 3\n");
        let out = HighlightCommand::new(args(false, Some("2:2"))).render(&buffer, &python()).unwrap();
        assert_eq!(out, "b = 2\n");
    }
}
