//! Compiled language files.
//!
//! A compiled file is a line-oriented `Key = value ...` text format holding
//! one fully derived definition, so loading it skips the build step:
//!
//! ```text
//! ; tinct compiled language
//! Version = 1
//! Name = "C"
//! Ext = .c .h
//! LineComment = "//"
//! BlockComment = "/*" "*/"
//! Delimiter = string "\"" "\\" "\""
//! Operators = "!%&*+-/<=>^|~"
//! KeyStart = "#_abcdefgilrsuvw"
//! Group = keywords types
//! Keyword = auto 0 break 0 char 1
//! ```
//!
//! Quoted values escape `\`, `"`, `\n`, `\r`, `\t` and other control
//! characters (`\u{7f}`). Bare values are anything up to whitespace. Blank
//! lines and lines starting with `;` are ignored, as are unknown keys.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use tinct_util::{CharSet, FxHashSet, IndexVec};

use crate::definition::{BlockComment, Delimiter, GroupId, Keyword, KeywordGroup, LanguageDefinition};
use crate::error::{LanguageError, LanguageResult};
use crate::extension_map::normalize_extension;
use crate::source::single_char;

/// Newest format revision this crate reads and the one it writes.
pub const COMPILED_FORMAT_VERSION: u32 = 1;

/// File extension of compiled language files.
pub const COMPILED_EXTENSION: &str = "lang";

const KEYWORDS_PER_LINE: usize = 8;

/// File name for a language's compiled file.
///
/// ASCII letters are lower-cased and digits kept; every other character is
/// written as its code point in hex between underscores, so names that
/// differ in anything but letter case get distinct files.
///
/// ```
/// use tinct_lang::compiled_file_name;
///
/// assert_eq!(compiled_file_name("Rust"), "rust.lang");
/// assert_eq!(compiled_file_name("C++"), "c_2b__2b_.lang");
/// assert_ne!(compiled_file_name("Obj-C"), compiled_file_name("Obj C"));
/// ```
pub fn compiled_file_name(language: &str) -> String {
    let mut stem = String::with_capacity(language.len());
    for c in language.chars() {
        if c.is_ascii_alphanumeric() {
            stem.push(c.to_ascii_lowercase());
        } else {
            // Writing to a String cannot fail.
            let _ = write!(stem, "_{:x}_", c as u32);
        }
    }
    format!("{}.{}", stem, COMPILED_EXTENSION)
}

/// Serializes a definition to the compiled text format.
pub fn write_compiled(lang: &LanguageDefinition) -> String {
    let mut out = String::new();
    out.push_str("; tinct compiled language\n");
    // Writing to a String cannot fail.
    let _ = writeln!(out, "Version = {}", COMPILED_FORMAT_VERSION);
    let _ = writeln!(out, "Name = {}", quote(&lang.name));

    if !lang.extensions.is_empty() {
        let exts: Vec<String> = lang.extensions.iter().map(|e| value(e)).collect();
        let _ = writeln!(out, "Ext = {}", exts.join(" "));
    }
    if let Some(prefix) = &lang.line_comment {
        let _ = writeln!(out, "LineComment = {}", quote(prefix));
    }
    if let Some(block) = &lang.block_comment {
        let _ = writeln!(out, "BlockComment = {} {}", quote(&block.start), quote(&block.end));
    }
    for d in &lang.delimiters {
        let escape = d.escape.map(String::from).unwrap_or_default();
        let _ = writeln!(
            out,
            "Delimiter = {} {} {} {}",
            value(&d.name),
            quote(&d.open.to_string()),
            quote(&escape),
            quote(&d.close.to_string())
        );
    }

    for (key, set) in [
        ("Operators", &lang.operators),
        ("Punctuation", &lang.punctuation),
        ("KeyStart", &lang.key_start),
        ("KeyContinue", &lang.key_continue),
        ("NumberContinue", &lang.number_continue),
    ] {
        let _ = writeln!(out, "{} = {}", key, quote(&set.to_string()));
    }

    if !lang.groups.is_empty() {
        let names: Vec<String> = lang.groups.iter().map(|g| value(g.name())).collect();
        let _ = writeln!(out, "Group = {}", names.join(" "));
    }
    for chunk in lang.keywords.chunks(KEYWORDS_PER_LINE) {
        let pairs: Vec<String> = chunk
            .iter()
            .map(|k| format!("{} {}", value(&k.text), k.group))
            .collect();
        let _ = writeln!(out, "Keyword = {}", pairs.join(" "));
    }

    out
}

/// Parses the compiled text format.
///
/// # Examples
///
/// ```
/// use tinct_lang::{parse_compiled, write_compiled, GroupSpec, LanguageDefinition, LanguageSpec};
///
/// let lang = LanguageDefinition::build(
///     LanguageSpec::new("Mini").group(GroupSpec::from_words("kw", "let in")),
/// );
/// let text = write_compiled(&lang);
/// assert_eq!(parse_compiled(&text).unwrap(), lang);
/// ```
pub fn parse_compiled(text: &str) -> LanguageResult<LanguageDefinition> {
    let mut name = None;
    let mut extensions: Vec<String> = Vec::new();
    let mut line_comment = None;
    let mut block_comment = None;
    let mut delimiters = Vec::new();
    let mut operators = CharSet::new();
    let mut punctuation = CharSet::new();
    let mut key_start = CharSet::new();
    let mut key_continue = CharSet::new();
    let mut number_continue = CharSet::new();
    let mut group_names: Vec<String> = Vec::new();
    let mut pairs: Vec<(String, u32)> = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with(';') {
            continue;
        }

        let (key, rest) = line
            .split_once('=')
            .ok_or_else(|| LanguageError::parse(line_no, "expected 'Key = value'"))?;
        let key = key.trim();
        let values = split_values(line_no, rest)?;

        match key {
            "Version" => {
                let [v] = exactly::<1>(line_no, key, values)?;
                let found: u32 = v
                    .parse()
                    .map_err(|_| LanguageError::parse(line_no, format!("invalid version '{}'", v)))?;
                if found > COMPILED_FORMAT_VERSION {
                    return Err(LanguageError::UnsupportedVersion {
                        found,
                        supported: COMPILED_FORMAT_VERSION,
                    });
                }
            },
            "Name" => {
                let [v] = exactly::<1>(line_no, key, values)?;
                name = Some(v);
            },
            "Ext" => {
                for ext in values.iter().map(|e| normalize_extension(e)) {
                    if !ext.is_empty() && !extensions.contains(&ext) {
                        extensions.push(ext);
                    }
                }
            },
            "LineComment" => {
                let [v] = exactly::<1>(line_no, key, values)?;
                line_comment = Some(v).filter(|p| !p.is_empty());
            },
            "BlockComment" => {
                let [start, end] = exactly::<2>(line_no, key, values)?;
                block_comment = Some(BlockComment::new(start, end))
                    .filter(|b| !b.start.is_empty() && !b.end.is_empty());
            },
            "Delimiter" => {
                let [dname, open, escape, close] = exactly::<4>(line_no, key, values)?;
                let open = single_char("delimiter open", &open)?;
                let escape = match escape.as_str() {
                    "" => None,
                    esc => Some(single_char("delimiter escape", esc)?),
                };
                let close = single_char("delimiter close", &close)?;
                delimiters.push(Delimiter::new(dname, open, escape).with_close(close));
            },
            "Operators" => operators = charset(line_no, key, values)?,
            "Punctuation" => punctuation = charset(line_no, key, values)?,
            "KeyStart" => key_start = charset(line_no, key, values)?,
            "KeyContinue" => key_continue = charset(line_no, key, values)?,
            "NumberContinue" => number_continue = charset(line_no, key, values)?,
            "Group" => group_names.extend(values),
            "Keyword" => {
                if values.len() % 2 != 0 {
                    return Err(LanguageError::parse(line_no, "keyword without group id"));
                }
                let mut iter = values.into_iter();
                while let (Some(word), Some(id)) = (iter.next(), iter.next()) {
                    let group: u32 = id.parse().map_err(|_| {
                        LanguageError::parse(line_no, format!("invalid group id '{}'", id))
                    })?;
                    pairs.push((word, group));
                }
            },
            other => {
                tracing::warn!(line = line_no, key = other, "unknown key in compiled language file");
            },
        }
    }

    let name = name.ok_or(LanguageError::MissingField("Name"))?;

    let mut words: Vec<IndexSet<String>> = vec![IndexSet::new(); group_names.len()];
    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut keywords = Vec::with_capacity(pairs.len());
    for (word, group) in pairs {
        let slot = words
            .get_mut(group as usize)
            .ok_or_else(|| LanguageError::InvalidGroup {
                word: word.clone(),
                group,
            })?;
        if !seen.insert(word.clone()) {
            tracing::debug!(language = %name, keyword = %word, "repeated keyword, keeping the first");
            continue;
        }
        slot.insert(word.clone());
        keywords.push(Keyword {
            text: word,
            group: GroupId(group),
        });
    }
    keywords.sort_unstable_by(|a, b| a.text.cmp(&b.text));
    check_keyword_sets(&keywords, &key_start, &key_continue, &operators, &punctuation)?;

    let groups: IndexVec<GroupId, KeywordGroup> = group_names
        .into_iter()
        .zip(words)
        .enumerate()
        .map(|(i, (gname, set))| KeywordGroup::new(GroupId(i as u32), gname, set))
        .collect();

    Ok(LanguageDefinition {
        name,
        extensions,
        groups,
        keywords,
        key_start,
        key_continue,
        operators,
        punctuation,
        number_continue,
        line_comment,
        block_comment,
        delimiters,
        plain: false,
    })
}

/// Reads and parses one compiled file.
pub fn load_compiled(path: &Path) -> LanguageResult<LanguageDefinition> {
    let text = fs::read_to_string(path).map_err(|e| LanguageError::io(path, e))?;
    parse_compiled(&text)
}

/// Writes `lang` into `dir` under [`compiled_file_name`] and returns the path.
pub fn save_compiled(lang: &LanguageDefinition, dir: &Path) -> LanguageResult<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| LanguageError::io(dir, e))?;
    let path = dir.join(compiled_file_name(lang.name()));
    fs::write(&path, write_compiled(lang)).map_err(|e| LanguageError::io(&path, e))?;
    Ok(path)
}

/// Keyword characters must be reachable through the key sets and must not
/// appear in the operator or punctuation sets.
fn check_keyword_sets(
    keywords: &[Keyword],
    key_start: &CharSet,
    key_continue: &CharSet,
    operators: &CharSet,
    punctuation: &CharSet,
) -> LanguageResult<()> {
    for keyword in keywords {
        for (i, ch) in keyword.text.chars().enumerate() {
            let (set, missing) = if i == 0 {
                ("KeyStart", !key_start.contains(ch))
            } else {
                ("KeyContinue", !key_continue.contains(ch))
            };
            let clash = if missing {
                Some(set)
            } else if operators.contains(ch) {
                Some("Operators")
            } else if punctuation.contains(ch) {
                Some("Punctuation")
            } else {
                None
            };
            if let Some(set) = clash {
                return Err(LanguageError::KeywordCharClash {
                    keyword: keyword.text.clone(),
                    ch,
                    set,
                });
            }
        }
    }
    Ok(())
}

fn exactly<const N: usize>(line: usize, key: &str, values: Vec<String>) -> LanguageResult<[String; N]> {
    let found = values.len();
    values.try_into().map_err(|_| {
        LanguageError::parse(line, format!("{} takes {} value(s), found {}", key, N, found))
    })
}

fn charset(line: usize, key: &str, values: Vec<String>) -> LanguageResult<CharSet> {
    let [v] = exactly::<1>(line, key, values)?;
    Ok(v.chars().collect())
}

/// Quotes `s` only when a bare value could not carry it.
fn value(s: &str) -> String {
    let needs_quotes = s.is_empty() || s.chars().any(|c| c.is_whitespace() || c.is_control() || c == '"');
    if needs_quotes {
        quote(s)
    } else {
        s.to_string()
    }
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{{{:x}}}", c as u32);
            },
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Splits the right-hand side of a line into bare and quoted values.
fn split_values(line: usize, text: &str) -> LanguageResult<Vec<String>> {
    let mut values = Vec::new();
    let mut chars = text.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        let Some(&first) = chars.peek() else {
            break;
        };

        if first != '"' {
            let mut bare = String::new();
            while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
                if c == '"' {
                    return Err(LanguageError::parse(line, "quote inside bare value"));
                }
                bare.push(c);
            }
            values.push(bare);
            continue;
        }

        chars.next();
        let mut quoted = String::new();
        loop {
            match chars.next() {
                None => return Err(LanguageError::parse(line, "unterminated quoted value")),
                Some('"') => break,
                Some('\\') => match chars.next() {
                    Some('\\') => quoted.push('\\'),
                    Some('"') => quoted.push('"'),
                    Some('n') => quoted.push('\n'),
                    Some('r') => quoted.push('\r'),
                    Some('t') => quoted.push('\t'),
                    Some('u') => quoted.push(unicode_escape(line, &mut chars)?),
                    other => {
                        return Err(LanguageError::parse(
                            line,
                            format!("unknown escape '\\{}'", other.map(String::from).unwrap_or_default()),
                        ))
                    },
                },
                Some(c) => quoted.push(c),
            }
        }
        values.push(quoted);
    }

    Ok(values)
}

fn unicode_escape(
    line: usize,
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
) -> LanguageResult<char> {
    if chars.next() != Some('{') {
        return Err(LanguageError::parse(line, "expected '{' after \\u"));
    }
    let mut hex = String::new();
    loop {
        match chars.next() {
            Some('}') => break,
            Some(c) if c.is_ascii_hexdigit() && hex.len() < 6 => hex.push(c),
            _ => return Err(LanguageError::parse(line, "malformed \\u{...} escape")),
        }
    }
    u32::from_str_radix(&hex, 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| LanguageError::parse(line, format!("invalid code point '{}'", hex)))
}
