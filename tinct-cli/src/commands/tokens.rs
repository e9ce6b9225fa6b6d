//! `tokens` command: print the token stream of a file.

use std::io::Write;
use std::path::PathBuf;

use serde::Serialize;
use tinct_lang::{LanguageDefinition, LanguageManager, ManagerConfig};
use tinct_lex::{ScanOptions, Token};
use tinct_util::Buffer;

use crate::commands::common::{collect_tokens, load_buffer, parse_line_range, select_language};
use crate::commands::traits::Command;
use crate::error::Result;

/// Arguments for the tokens command.
#[derive(Debug, Clone)]
pub struct TokensArgs {
    pub file: PathBuf,
    /// Extension or language name overriding the file's extension.
    pub lang: Option<String>,
    /// 1-based `A:B` line selection.
    pub lines: Option<String>,
    pub json: bool,
    pub emit_whitespace: bool,
    pub manager: ManagerConfig,
}

/// One token as printed in JSON mode.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct TokenRecord<'a> {
    pub start: usize,
    pub len: usize,
    /// 1-based line of the first character
    pub line: usize,
    /// 1-based column of the first character
    pub col: usize,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_name: Option<&'a str>,
    pub text: String,
}

impl<'a> TokenRecord<'a> {
    pub fn new(buffer: &Buffer, language: &'a LanguageDefinition, token: &Token) -> Self {
        let (line, col) = buffer.offset_to_line_col(token.start);
        let group = token.group();
        Self {
            start: token.start,
            len: token.len,
            line,
            col,
            kind: token.kind.name(),
            group: group.map(|g| g.0),
            group_name: group.and_then(|g| language.group(g)).map(|g| g.name()),
            text: token.text(buffer),
        }
    }

    /// The plain-text row: position, span, kind and quoted text.
    pub fn to_row(&self) -> String {
        let kind = match (self.group, self.group_name) {
            (Some(id), Some(name)) => format!("{}({}:{})", self.kind, id, name),
            _ => self.kind.to_string(),
        };
        format!(
            "{:>5}:{:<4} {:>7} {:>5}  {:<28} {:?}",
            self.line, self.col, self.start, self.len, kind, self.text
        )
    }
}

/// Tokens command handler.
pub struct TokensCommand {
    args: TokensArgs,
}

impl TokensCommand {
    /// Renders every output line for the selected tokens.
    pub fn render(&self, buffer: &Buffer, language: &LanguageDefinition) -> Result<Vec<String>> {
        let lines = self.args.lines.as_deref().map(parse_line_range).transpose()?;
        let options = ScanOptions {
            emit_whitespace: self.args.emit_whitespace,
        };
        let (tokens, _) = collect_tokens(buffer, language, lines, options)?;

        tokens
            .iter()
            .map(|token| -> Result<String> {
                let record = TokenRecord::new(buffer, language, token);
                if self.args.json {
                    Ok(serde_json::to_string(&record)?)
                } else {
                    Ok(record.to_row())
                }
            })
            .collect()
    }

    pub fn run(&self) -> Result<usize> {
        let buffer = load_buffer(&self.args.file)?;
        let manager = LanguageManager::new(self.args.manager.clone());
        let language = select_language(&manager, &self.args.file, self.args.lang.as_deref());
        tracing::debug!(language = language.name(), "scanning");

        let rows = self.render(&buffer, &language)?;
        let mut out = std::io::stdout().lock();
        for row in &rows {
            writeln!(out, "{}", row)?;
        }
        Ok(rows.len())
    }
}

impl Command for TokensCommand {
    type Args = TokensArgs;
    type Output = usize;

    fn new(args: Self::Args) -> Self {
        Self { args }
    }

    fn execute(&self) -> Result<Self::Output> {
        self.run()
    }

    fn name() -> &'static str {
        "tokens"
    }
}

/// Run the tokens command.
pub fn run_tokens(args: TokensArgs) -> Result<usize> {
    let count = TokensCommand::new(args).execute()?;
    tracing::debug!(command = TokensCommand::name(), tokens = count, "done");
    Ok(count)
}
