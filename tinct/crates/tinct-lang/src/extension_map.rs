//! Extension to language-name lookup table.
//!
//! The map is a derived cache: it can always be regenerated from the
//! language source. On disk it is versioned JSON:
//!
//! ```json
//! { "version": 1, "extensions": { ".c": "C", ".h": "C" } }
//! ```

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{LanguageError, LanguageResult};

/// Current on-disk format revision.
pub const EXTENSION_MAP_VERSION: u32 = 1;

/// Lower-cases `ext` and gives it exactly one leading `.`.
///
/// Returns an empty string for input with no extension text.
///
/// # Examples
///
/// ```
/// use tinct_lang::normalize_extension;
///
/// assert_eq!(normalize_extension("CS"), ".cs");
/// assert_eq!(normalize_extension(".Rs"), ".rs");
/// assert_eq!(normalize_extension(" . "), "");
/// ```
pub fn normalize_extension(ext: &str) -> String {
    let bare = ext.trim().trim_start_matches('.');
    if bare.is_empty() {
        String::new()
    } else {
        format!(".{}", bare.to_lowercase())
    }
}

/// Mapping from normalized extension to language name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionMap {
    version: u32,
    extensions: IndexMap<String, String>,
}

impl ExtensionMap {
    pub fn new() -> Self {
        Self {
            version: EXTENSION_MAP_VERSION,
            extensions: IndexMap::new(),
        }
    }

    /// Adds `ext -> language` unless the extension is already claimed.
    ///
    /// Returns false when the extension was empty or already taken.
    pub fn insert(&mut self, ext: &str, language: &str) -> bool {
        let ext = normalize_extension(ext);
        if ext.is_empty() {
            return false;
        }
        match self.extensions.get(&ext) {
            Some(owner) if owner == language => false,
            Some(owner) => {
                tracing::warn!(
                    extension = %ext,
                    kept = %owner,
                    ignored = %language,
                    "extension claimed by two languages, keeping the first"
                );
                false
            },
            None => {
                self.extensions.insert(ext, language.to_string());
                true
            },
        }
    }

    /// Language name for `ext` (normalized before lookup).
    pub fn get(&self, ext: &str) -> Option<&str> {
        self.extensions
            .get(&normalize_extension(ext))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.extensions
            .iter()
            .map(|(ext, name)| (ext.as_str(), name.as_str()))
    }

    /// Reads a persisted map, rejecting unknown format revisions.
    pub fn load(path: &Path) -> LanguageResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| LanguageError::io(path, e))?;
        let map: ExtensionMap = serde_json::from_str(&text)?;
        if map.version != EXTENSION_MAP_VERSION {
            return Err(LanguageError::UnsupportedVersion {
                found: map.version,
                supported: EXTENSION_MAP_VERSION,
            });
        }
        Ok(map)
    }

    /// Writes the map as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> LanguageResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| LanguageError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| LanguageError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> ExtensionMap {
        let mut map = ExtensionMap::new();
        for (exts, language) in [(".c .h", "C"), (".cpp .H .hpp", "C++")] {
            for ext in exts.split_whitespace() {
                map.insert(ext, language);
            }
        }
        map
    }

    #[test]
    fn test_first_language_keeps_extension() {
        let map = sample();
        assert_eq!(map.get(".h"), Some("C"));
        assert_eq!(map.get("CPP"), Some("C++"));
        assert_eq!(map.len(), 4);
    }

    #[test]
    fn test_insert_rejects_empty() {
        let mut map = ExtensionMap::new();
        assert!(!map.insert(".", "X"));
        assert!(map.insert("md", "Markdown"));
        assert!(!map.insert(".MD", "Markdown"));
        assert_eq!(map.get(".md"), Some("Markdown"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache").join("extensions.json");
        let map = sample();
        map.save(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"version\": 1"));
        assert_eq!(ExtensionMap::load(&path).unwrap(), map);
    }

    #[test]
    fn test_load_rejects_newer_version() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("extensions.json");
        fs::write(&path, r#"{"version":2,"extensions":{}}"#).unwrap();
        assert!(matches!(
            ExtensionMap::load(&path),
            Err(LanguageError::UnsupportedVersion { found: 2, .. })
        ));
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("extensions.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(ExtensionMap::load(&path), Err(LanguageError::Json(_))));
    }
}
