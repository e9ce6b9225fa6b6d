//! The TOML language source.
//!
//! The source is the single source of truth for every language: compiled
//! files and the extension map are both derived from it.
//!
//! ```toml
//! [[language]]
//! name = "C"
//! extensions = ".c .h"
//! line_comment = "//"
//! block_comment = ["/*", "*/"]
//!
//! [[language.group]]
//! name = "keywords"
//! words = "auto break case"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::definition::{Delimiter, GroupSpec, LanguageSpec};
use crate::error::{LanguageError, LanguageResult};
use crate::extension_map::ExtensionMap;

/// Source bundled into the binary.
pub const BUNDLED_SOURCE: &str = include_str!("../languages.toml");

/// A parsed language source file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LanguageSource {
    #[serde(default, rename = "language")]
    languages: Vec<LanguageRecord>,
}

/// One `[[language]]` table.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LanguageRecord {
    #[serde(default)]
    pub name: Option<String>,
    /// Space-separated extension list
    #[serde(default)]
    pub extensions: String,
    #[serde(default)]
    pub line_comment: Option<String>,
    /// `[start, end]`
    #[serde(default)]
    pub block_comment: Option<Vec<String>>,
    #[serde(default)]
    pub number_continue: Option<String>,
    /// Absent means the default `"` and `'` delimiters
    #[serde(default)]
    pub delimiters: Option<Vec<DelimiterRecord>>,
    #[serde(default, rename = "group")]
    pub groups: Vec<GroupRecord>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DelimiterRecord {
    #[serde(default)]
    pub name: Option<String>,
    pub open: String,
    /// Empty or absent means no escape character
    #[serde(default)]
    pub escape: Option<String>,
    /// Absent means the same as `open`
    #[serde(default)]
    pub close: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupRecord {
    pub name: String,
    pub words: Words,
}

/// Group words as one whitespace-delimited string or a pre-split list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Words {
    Text(String),
    List(Vec<String>),
}

impl Words {
    fn into_vec(self) -> Vec<String> {
        match self {
            Words::Text(text) => text.split_whitespace().map(str::to_string).collect(),
            Words::List(list) => list,
        }
    }
}

impl LanguageSource {
    /// Parses TOML source text.
    pub fn parse(text: &str) -> LanguageResult<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_path(path: &Path) -> LanguageResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| LanguageError::io(path, e))?;
        Self::parse(&text)
    }

    /// The source compiled into this crate.
    pub fn bundled() -> LanguageResult<Self> {
        Self::parse(BUNDLED_SOURCE)
    }

    pub fn records(&self) -> &[LanguageRecord] {
        &self.languages
    }

    /// Language names in declaration order, skipping unnamed records.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.languages.iter().filter_map(|r| r.name.as_deref())
    }

    /// Finds a record by exact name, then case-insensitively.
    pub fn find(&self, name: &str) -> Option<&LanguageRecord> {
        self.languages
            .iter()
            .find(|r| r.name.as_deref() == Some(name))
            .or_else(|| {
                self.languages
                    .iter()
                    .find(|r| r.name.as_deref().is_some_and(|n| n.eq_ignore_ascii_case(name)))
            })
    }

    /// Builds the extension map from every named record.
    pub fn extension_map(&self) -> ExtensionMap {
        let mut map = ExtensionMap::new();
        for record in &self.languages {
            let Some(name) = record.name.as_deref() else {
                continue;
            };
            for ext in record.extensions.split_whitespace() {
                map.insert(ext, name);
            }
        }
        map
    }
}

impl LanguageRecord {
    /// Validates the record and converts it into a [`LanguageSpec`].
    pub fn to_spec(&self) -> LanguageResult<LanguageSpec> {
        let name = self
            .name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .ok_or(LanguageError::MissingField("name"))?;

        let mut spec = LanguageSpec::new(name).extensions(&self.extensions);

        if let Some(prefix) = &self.line_comment {
            spec = spec.line_comment(prefix.as_str());
        }

        if let Some(markers) = &self.block_comment {
            match markers.as_slice() {
                [start, end] if !start.is_empty() && !end.is_empty() => {
                    spec = spec.block_comment(start.as_str(), end.as_str());
                },
                _ => return Err(LanguageError::MissingField("block_comment [start, end]")),
            }
        }

        if let Some(chars) = &self.number_continue {
            spec = spec.number_continue(chars.as_str());
        }

        if let Some(records) = &self.delimiters {
            let delimiters = records
                .iter()
                .map(DelimiterRecord::to_delimiter)
                .collect::<LanguageResult<Vec<_>>>()?;
            spec = spec.delimiters(delimiters);
        }

        for group in &self.groups {
            let words = group.words.clone().into_vec();
            spec = spec.group(GroupSpec::new(group.name.as_str(), words));
        }

        Ok(spec)
    }
}

impl DelimiterRecord {
    fn to_delimiter(&self) -> LanguageResult<Delimiter> {
        let open = single_char("delimiter open", &self.open)?;
        let escape = match self.escape.as_deref() {
            None | Some("") => None,
            Some(esc) => Some(single_char("delimiter escape", esc)?),
        };
        let close = match self.close.as_deref() {
            None => open,
            Some(close) => single_char("delimiter close", close)?,
        };
        let name = self.name.clone().unwrap_or_else(|| "string".to_string());
        Ok(Delimiter::new(name, open, escape).with_close(close))
    }
}

/// Exactly one character, or [`LanguageError::InvalidChar`].
pub(crate) fn single_char(field: &'static str, value: &str) -> LanguageResult<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch),
        _ => Err(LanguageError::InvalidChar {
            field,
            value: value.to_string(),
        }),
    }
}
