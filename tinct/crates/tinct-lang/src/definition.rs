//! Language definitions.
//!
//! A [`LanguageDefinition`] is the immutable rule set the scanner runs on:
//! keyword groups, the sorted keyword table, the derived character sets,
//! comment markers and string delimiters. It is built once by
//! [`LanguageDefinition::build`] from a [`LanguageSpec`] and never mutated
//! afterwards.
//!
//! ```text
//! operators   = "-+=><|^%*&/!~"        minus every keyword character
//! punctuation = ":;?.,][{}()$#@\`\""   minus every keyword character
//! key_start   = first characters of all keywords
//! key_continue= remaining characters of all keywords
//! ```

use std::fmt;

use indexmap::IndexSet;
use tinct_util::{define_idx, CharSet, FxHashMap, IndexVec};

use crate::extension_map::normalize_extension;

/// Operator candidates before keyword characters are removed.
pub const OPERATOR_ALPHABET: &str = "-+=><|^%*&/!~";

/// Punctuation candidates before keyword characters are removed.
pub const PUNCTUATION_ALPHABET: &str = ":;?.,][{}()$#@\\`\"";

/// Name of the built-in fallback definition.
pub const PLAIN_TEXT_NAME: &str = "Plain Text";

define_idx!(
    /// Dense index of a keyword group, assigned in declaration order.
    GroupId
);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry of the aggregated keyword table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Keyword {
    pub text: String,
    pub group: GroupId,
}

/// A named bucket of keywords sharing a highlighting category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeywordGroup {
    id: GroupId,
    name: String,
    words: IndexSet<String>,
}

impl KeywordGroup {
    pub(crate) fn new(id: GroupId, name: String, words: IndexSet<String>) -> Self {
        Self { id, name, words }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Words in declaration order.
    pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
        self.words.iter().map(String::as_str)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// A string delimiter rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Delimiter {
    /// Rule name, e.g. `string` or `char`
    pub name: String,
    /// Character that opens the literal
    pub open: char,
    /// Character that makes the following character literal
    pub escape: Option<char>,
    /// Character that closes the literal
    pub close: char,
}

impl Delimiter {
    /// A delimiter closed by the same character that opens it.
    pub fn new(name: impl Into<String>, open: char, escape: Option<char>) -> Self {
        Self {
            name: name.into(),
            open,
            escape,
            close: open,
        }
    }

    pub fn with_close(mut self, close: char) -> Self {
        self.close = close;
        self
    }

    /// `"` and `'`, both escaped by a backslash.
    pub fn defaults() -> Vec<Delimiter> {
        vec![
            Delimiter::new("string", '"', Some('\\')),
            Delimiter::new("char", '\'', Some('\\')),
        ]
    }
}

/// Block comment markers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockComment {
    pub start: String,
    pub end: String,
}

impl BlockComment {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// A keyword group as declared in a language source.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GroupSpec {
    pub name: String,
    pub words: Vec<String>,
}

impl GroupSpec {
    /// A group from pre-split words.
    pub fn new<I, S>(name: impl Into<String>, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// A group from one whitespace-delimited word list.
    pub fn from_words(name: impl Into<String>, words: &str) -> Self {
        Self::new(name, words.split_whitespace())
    }
}

/// Everything needed to build a [`LanguageDefinition`].
///
/// # Examples
///
/// ```
/// use tinct_lang::{GroupSpec, LanguageDefinition, LanguageSpec};
///
/// let spec = LanguageSpec::new("C")
///     .extensions(".c .h")
///     .line_comment("//")
///     .block_comment("/*", "*/")
///     .group(GroupSpec::from_words("keywords", "for int return"));
/// let c = LanguageDefinition::build(spec);
///
/// assert!(c.lookup_keyword("int").is_some());
/// assert!(!c.is_operator('r'));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguageSpec {
    pub name: String,
    pub extensions: Vec<String>,
    pub line_comment: Option<String>,
    pub block_comment: Option<BlockComment>,
    pub delimiters: Vec<Delimiter>,
    pub number_continue: String,
    pub groups: Vec<GroupSpec>,
}

impl LanguageSpec {
    /// A spec with no groups, no comments and the default delimiters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extensions: Vec::new(),
            line_comment: None,
            block_comment: None,
            delimiters: Delimiter::defaults(),
            number_continue: String::new(),
            groups: Vec::new(),
        }
    }

    /// Adds space-separated extensions.
    pub fn extensions(mut self, list: &str) -> Self {
        self.extensions.extend(list.split_whitespace().map(str::to_string));
        self
    }

    pub fn line_comment(mut self, prefix: impl Into<String>) -> Self {
        self.line_comment = Some(prefix.into());
        self
    }

    pub fn block_comment(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.block_comment = Some(BlockComment::new(start, end));
        self
    }

    /// Replaces the delimiter list.
    pub fn delimiters(mut self, delimiters: Vec<Delimiter>) -> Self {
        self.delimiters = delimiters;
        self
    }

    pub fn number_continue(mut self, chars: impl Into<String>) -> Self {
        self.number_continue = chars.into();
        self
    }

    pub fn group(mut self, group: GroupSpec) -> Self {
        self.groups.push(group);
        self
    }
}

/// Immutable lexical rule set for one language.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguageDefinition {
    pub(crate) name: String,
    pub(crate) extensions: Vec<String>,
    pub(crate) groups: IndexVec<GroupId, KeywordGroup>,
    /// Sorted by ordinal text comparison
    pub(crate) keywords: Vec<Keyword>,
    pub(crate) key_start: CharSet,
    pub(crate) key_continue: CharSet,
    pub(crate) operators: CharSet,
    pub(crate) punctuation: CharSet,
    pub(crate) number_continue: CharSet,
    pub(crate) line_comment: Option<String>,
    pub(crate) block_comment: Option<BlockComment>,
    pub(crate) delimiters: Vec<Delimiter>,
    pub(crate) plain: bool,
}

impl LanguageDefinition {
    /// Builds a definition, deriving the character sets and keyword table.
    ///
    /// A word declared in several groups belongs to the first of them; later
    /// occurrences are dropped from their groups.
    pub fn build(spec: LanguageSpec) -> Self {
        let mut operators: CharSet = OPERATOR_ALPHABET.chars().collect();
        let mut punctuation: CharSet = PUNCTUATION_ALPHABET.chars().collect();
        let mut key_start = CharSet::new();
        let mut key_continue = CharSet::new();
        let mut owners: FxHashMap<String, GroupId> = FxHashMap::default();
        let mut groups: IndexVec<GroupId, KeywordGroup> = IndexVec::with_capacity(spec.groups.len());

        for group in spec.groups {
            let id = groups.next_index();
            let mut words = IndexSet::with_capacity(group.words.len());

            for word in group.words {
                if word.is_empty() {
                    continue;
                }
                if let Some(&owner) = owners.get(&word) {
                    if owner != id {
                        tracing::debug!(
                            language = %spec.name,
                            keyword = %word,
                            kept_in = %groups[owner].name,
                            dropped_from = %group.name,
                            "duplicate keyword, first group wins"
                        );
                    }
                    continue;
                }

                let mut chars = word.chars();
                if let Some(first) = chars.next() {
                    key_start.insert(first);
                    operators.remove(first);
                    punctuation.remove(first);
                }
                for ch in chars {
                    key_continue.insert(ch);
                    operators.remove(ch);
                    punctuation.remove(ch);
                }

                owners.insert(word.clone(), id);
                words.insert(word);
            }

            groups.push(KeywordGroup::new(id, group.name, words));
        }

        let mut keywords: Vec<Keyword> = owners
            .into_iter()
            .map(|(text, group)| Keyword { text, group })
            .collect();
        keywords.sort_unstable_by(|a, b| a.text.cmp(&b.text));

        let mut extensions: Vec<String> = Vec::with_capacity(spec.extensions.len());
        for ext in spec.extensions.iter().map(|e| normalize_extension(e)) {
            if !ext.is_empty() && !extensions.contains(&ext) {
                extensions.push(ext);
            }
        }

        let block_comment = spec
            .block_comment
            .filter(|b| !b.start.is_empty() && !b.end.is_empty());

        Self {
            name: spec.name,
            extensions,
            groups,
            keywords,
            key_start,
            key_continue,
            operators,
            punctuation,
            number_continue: spec.number_continue.chars().collect(),
            line_comment: spec.line_comment.filter(|p| !p.is_empty()),
            block_comment,
            delimiters: spec.delimiters,
            plain: false,
        }
    }

    /// The fallback definition: no keywords, operators, punctuation,
    /// comments or strings. Scans yield only identifiers and whitespace.
    pub fn plain_text() -> Self {
        Self {
            name: PLAIN_TEXT_NAME.to_string(),
            extensions: Vec::new(),
            groups: IndexVec::new(),
            keywords: Vec::new(),
            key_start: CharSet::new(),
            key_continue: CharSet::new(),
            operators: CharSet::new(),
            punctuation: CharSet::new(),
            number_continue: CharSet::new(),
            line_comment: None,
            block_comment: None,
            delimiters: Vec::new(),
            plain: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalized extensions (lower case, leading `.`).
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn is_plain_text(&self) -> bool {
        self.plain
    }

    pub fn groups(&self) -> &IndexVec<GroupId, KeywordGroup> {
        &self.groups
    }

    pub fn group(&self, id: GroupId) -> Option<&KeywordGroup> {
        self.groups.get(id)
    }

    /// The aggregated keyword table, sorted by text.
    pub fn keywords(&self) -> &[Keyword] {
        &self.keywords
    }

    /// Exact, case-sensitive keyword lookup.
    pub fn lookup_keyword(&self, word: &str) -> Option<GroupId> {
        self.keywords
            .binary_search_by(|k| k.text.as_str().cmp(word))
            .ok()
            .map(|i| self.keywords[i].group)
    }

    pub fn key_start(&self) -> &CharSet {
        &self.key_start
    }

    pub fn key_continue(&self) -> &CharSet {
        &self.key_continue
    }

    pub fn operators(&self) -> &CharSet {
        &self.operators
    }

    pub fn punctuation(&self) -> &CharSet {
        &self.punctuation
    }

    pub fn number_continue(&self) -> &CharSet {
        &self.number_continue
    }

    pub fn line_comment(&self) -> Option<&str> {
        self.line_comment.as_deref()
    }

    pub fn block_comment(&self) -> Option<&BlockComment> {
        self.block_comment.as_ref()
    }

    pub fn delimiters(&self) -> &[Delimiter] {
        &self.delimiters
    }

    /// The first delimiter opened by `ch`.
    pub fn delimiter_for(&self, ch: char) -> Option<&Delimiter> {
        self.delimiters.iter().find(|d| d.open == ch)
    }

    #[inline]
    pub fn is_ident_start(&self, ch: char) -> bool {
        self.key_start.contains(ch) || ch.is_alphabetic() || ch == '_'
    }

    #[inline]
    pub fn is_ident_continue(&self, ch: char) -> bool {
        self.key_continue.contains(ch) || ch.is_alphanumeric() || ch == '_'
    }

    #[inline]
    pub fn is_operator(&self, ch: char) -> bool {
        self.operators.contains(ch)
    }

    #[inline]
    pub fn is_punctuation(&self, ch: char) -> bool {
        self.punctuation.contains(ch)
    }

    #[inline]
    pub fn is_number_continue(&self, ch: char) -> bool {
        self.number_continue.contains(ch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c_like() -> LanguageDefinition {
        LanguageDefinition::build(
            LanguageSpec::new("C")
                .extensions(".C h")
                .line_comment("//")
                .block_comment("/*", "*/")
                .group(GroupSpec::from_words("keywords", "for int return"))
                .group(GroupSpec::from_words("preprocessor", "#include #define")),
        )
    }

    #[test]
    fn test_derived_sets() {
        let c = c_like();
        for ch in ['f', 'i', 'r', '#'] {
            assert!(c.key_start().contains(ch), "{ch} should start a keyword");
        }
        for ch in ['o', 'n', 't', 'e', 'u', 'c', 'l', 'd'] {
            assert!(c.key_continue().contains(ch), "{ch} should continue a keyword");
        }
        assert!(!c.key_start().contains('o'));
        assert!(!c.is_punctuation('#'));
        assert!(c.is_punctuation('$'));
        assert!(c.is_operator('+'));
    }

    #[test]
    fn test_keyword_chars_removed_from_operators() {
        let lang = LanguageDefinition::build(
            LanguageSpec::new("Odd").group(GroupSpec::from_words("ops", "<=> !in")),
        );
        for ch in ['<', '=', '>', '!'] {
            assert!(!lang.is_operator(ch));
        }
        assert!(lang.is_operator('+'));
        assert!(lang.is_operator('|'));
    }

    #[test]
    fn test_keyword_table_sorted() {
        let c = c_like();
        let texts: Vec<&str> = c.keywords().iter().map(|k| k.text.as_str()).collect();
        assert_eq!(texts, vec!["#define", "#include", "for", "int", "return"]);
        assert_eq!(c.lookup_keyword("int"), Some(GroupId(0)));
        assert_eq!(c.lookup_keyword("#define"), Some(GroupId(1)));
        assert_eq!(c.lookup_keyword("in"), None);
        assert_eq!(c.lookup_keyword("Int"), None);
    }

    #[test]
    fn test_duplicate_keyword_first_group_wins() {
        let lang = LanguageDefinition::build(
            LanguageSpec::new("Dup")
                .group(GroupSpec::from_words("a", "alpha beta beta"))
                .group(GroupSpec::from_words("b", "beta gamma")),
        );
        assert_eq!(lang.lookup_keyword("beta"), Some(GroupId(0)));
        assert_eq!(lang.keywords().len(), 3);
        let b = lang.group(GroupId(1)).unwrap();
        assert!(!b.contains("beta"));
        assert_eq!(b.words().collect::<Vec<_>>(), vec!["gamma"]);
        assert_eq!(lang.group(GroupId(0)).unwrap().len(), 2);
    }

    #[test]
    fn test_extensions_normalized() {
        let c = c_like();
        assert_eq!(c.extensions(), &[".c".to_string(), ".h".to_string()]);
    }

    #[test]
    fn test_empty_markers_dropped() {
        let lang = LanguageDefinition::build(
            LanguageSpec::new("X").line_comment("").block_comment("", "*/"),
        );
        assert_eq!(lang.line_comment(), None);
        assert_eq!(lang.block_comment(), None);
    }

    #[test]
    fn test_identifier_classes() {
        let c = c_like();
        assert!(c.is_ident_start('n'));
        assert!(c.is_ident_start('_'));
        assert!(c.is_ident_start('é'));
        assert!(!c.is_ident_start('1'));
        assert!(c.is_ident_continue('1'));
    }

    #[test]
    fn test_delimiter_lookup() {
        let c = c_like();
        assert_eq!(c.delimiter_for('"').map(|d| d.name.as_str()), Some("string"));
        assert_eq!(c.delimiter_for('\'').map(|d| d.escape), Some(Some('\\')));
        assert!(c.delimiter_for('`').is_none());
    }

    #[test]
    fn test_plain_text() {
        let plain = LanguageDefinition::plain_text();
        assert!(plain.is_plain_text());
        assert_eq!(plain.name(), PLAIN_TEXT_NAME);
        assert!(plain.keywords().is_empty());
        assert!(plain.operators().is_empty());
        assert!(plain.punctuation().is_empty());
        assert!(plain.delimiters().is_empty());
    }
}
