//! Common helpers shared by tinct commands.

use std::ops::Range;
use std::path::Path;
use std::sync::Arc;

use tinct_lang::{LanguageDefinition, LanguageManager};
use tinct_lex::{BoundaryIndex, ScanOptions, Scanner, Token};
use tinct_util::Buffer;

use crate::error::{Result, TinctError};

// ============================================================================
// Input
// ============================================================================

/// Reads a file into a buffer, detecting its encoding.
pub fn load_buffer(path: &Path) -> Result<Buffer> {
    let bytes = std::fs::read(path).map_err(|e| {
        TinctError::FileOperation(format!("Cannot read {}: {}", path.display(), e))
    })?;
    let buffer = Buffer::from_bytes(path.display().to_string(), bytes);

    if buffer.has_encoding_issues() {
        tracing::warn!(
            file = %path.display(),
            encoding = %buffer.encoding(),
            issues = buffer.encoding_issues().len(),
            "file contains undecodable bytes"
        );
    }
    tracing::debug!(
        file = %path.display(),
        encoding = %buffer.encoding(),
        bytes = buffer.raw_bytes().len(),
        chars = buffer.len(),
        "loaded file"
    );
    Ok(buffer)
}

/// Picks the definition for `path`.
///
/// `lang` overrides the file's extension; it may be an extension (`rs`,
/// `.rs`) or a language name (`Rust`).
pub fn select_language(
    manager: &LanguageManager,
    path: &Path,
    lang: Option<&str>,
) -> Arc<LanguageDefinition> {
    let Some(lang) = lang else {
        return manager.resolve_path(path);
    };

    let by_extension = manager.resolve(lang);
    if !by_extension.is_plain_text() {
        return by_extension;
    }
    manager.by_name(lang)
}

// ============================================================================
// Line ranges
// ============================================================================

/// Parses a 1-based inclusive line selection into 0-based line indices.
///
/// Accepted forms: `A:B`, `A:` (to the end), `:B` (from the start) and `A`
/// (a single line).
pub fn parse_line_range(spec: &str) -> Result<Range<usize>> {
    let invalid = |why: &str| TinctError::Validation(format!("Invalid line range '{}': {}", spec, why));
    let number = |text: &str| -> Result<Option<usize>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        match text.parse::<usize>() {
            Ok(0) => Err(invalid("line numbers start at 1")),
            Ok(n) => Ok(Some(n)),
            Err(_) => Err(invalid("not a number")),
        }
    };

    let (first, last) = match spec.split_once(':') {
        Some((a, b)) => (number(a)?, number(b)?),
        None => {
            let line = number(spec)?.ok_or_else(|| invalid("empty"))?;
            (Some(line), Some(line))
        },
    };

    let first = first.unwrap_or(1);
    let last = last.unwrap_or(usize::MAX);
    if first > last {
        return Err(invalid("start is after end"));
    }
    Ok(first - 1..last)
}

// ============================================================================
// Scanning
// ============================================================================

/// Scans the whole buffer, or only the given 0-based lines.
///
/// Returns the tokens and the character range they were requested for.
pub fn collect_tokens(
    buffer: &Buffer,
    language: &LanguageDefinition,
    lines: Option<Range<usize>>,
    options: ScanOptions,
) -> Result<(Vec<Token>, Range<usize>)> {
    let Some(lines) = lines else {
        let tokens = Scanner::with_options(buffer, language, 0, options).collect();
        return Ok((tokens, 0..buffer.len()));
    };

    let lines = lines.start..lines.end.min(buffer.line_count());
    let range = buffer.lines_range(lines.clone())?;
    let index = BoundaryIndex::build(buffer, language);
    let tokens = index.tokens_in_lines(buffer, language, lines, options)?.collect();
    Ok((tokens, range))
}
