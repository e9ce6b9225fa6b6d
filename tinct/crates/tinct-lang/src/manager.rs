//! Language resolution and caching.
//!
//! [`LanguageManager`] maps file extensions to language names, builds
//! definitions on first use and shares them as `Arc`s. Every failure along
//! the way (unreadable source, malformed compiled file, unknown extension)
//! degrades to the plain-text definition.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;
use rayon::prelude::*;
use tinct_util::FxHashMap;

use crate::compiled::{compiled_file_name, load_compiled, save_compiled};
use crate::definition::LanguageDefinition;
use crate::error::{LanguageError, LanguageResult};
use crate::extension_map::{normalize_extension, ExtensionMap};
use crate::source::LanguageSource;

/// Where the canonical language source comes from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SourceLocation {
    /// The source compiled into the crate
    #[default]
    Bundled,
    /// A TOML file on disk
    File(PathBuf),
    /// TOML text held in memory
    Inline(String),
}

impl SourceLocation {
    fn load(&self) -> LanguageResult<LanguageSource> {
        match self {
            SourceLocation::Bundled => LanguageSource::bundled(),
            SourceLocation::File(path) => LanguageSource::from_path(path),
            SourceLocation::Inline(text) => LanguageSource::parse(text),
        }
    }
}

/// Manager settings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ManagerConfig {
    pub source: SourceLocation,
    /// Directory searched for `<name>.lang` files before building from source
    pub compiled_dir: Option<PathBuf>,
    /// Where the extension map is cached
    pub extension_map: Option<PathBuf>,
}

impl ManagerConfig {
    pub fn with_source(mut self, source: SourceLocation) -> Self {
        self.source = source;
        self
    }

    pub fn with_compiled_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.compiled_dir = Some(dir.into());
        self
    }

    pub fn with_extension_map(mut self, path: impl Into<PathBuf>) -> Self {
        self.extension_map = Some(path.into());
        self
    }
}

/// A language name with its normalized extensions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguageSummary {
    pub name: String,
    pub extensions: Vec<String>,
}

/// Resolves extensions to shared, lazily built language definitions.
///
/// # Examples
///
/// ```
/// use tinct_lang::LanguageManager;
///
/// let manager = LanguageManager::bundled();
/// let rust = manager.resolve("RS");
/// assert_eq!(rust.name(), "Rust");
/// assert!(manager.resolve(".nope").is_plain_text());
/// ```
pub struct LanguageManager {
    config: ManagerConfig,
    source: RwLock<Arc<LanguageSource>>,
    extensions: RwLock<ExtensionMap>,
    cache: DashMap<String, Arc<LanguageDefinition>>,
    plain: Arc<LanguageDefinition>,
}

impl LanguageManager {
    /// Creates a manager, loading the source and the extension map.
    ///
    /// A source that cannot be read or parsed leaves the manager with no
    /// languages; every resolution then yields plain text.
    pub fn new(config: ManagerConfig) -> Self {
        let source = config.source.load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "language source unusable, falling back to plain text");
            LanguageSource::default()
        });

        let extensions = config
            .extension_map
            .as_deref()
            .and_then(load_persisted_map)
            .unwrap_or_else(|| source.extension_map());

        tracing::debug!(
            languages = source.records().len(),
            extensions = extensions.len(),
            "language manager ready"
        );

        Self {
            config,
            source: RwLock::new(Arc::new(source)),
            extensions: RwLock::new(extensions),
            cache: DashMap::new(),
            plain: Arc::new(LanguageDefinition::plain_text()),
        }
    }

    /// A manager over the bundled source with no caches on disk.
    pub fn bundled() -> Self {
        Self::new(ManagerConfig::default())
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// The definition for a file extension, or plain text.
    ///
    /// The extension is matched case-insensitively, with or without the
    /// leading `.`.
    pub fn resolve(&self, extension: &str) -> Arc<LanguageDefinition> {
        let ext = normalize_extension(extension);
        let name = self.extensions.read().get(&ext).map(str::to_string);
        match name {
            Some(name) => self.by_name(&name),
            None => {
                tracing::trace!(extension = %ext, "no language for extension");
                Arc::clone(&self.plain)
            },
        }
    }

    /// The definition for a path's extension, or plain text.
    pub fn resolve_path(&self, path: &Path) -> Arc<LanguageDefinition> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => self.resolve(ext),
            None => Arc::clone(&self.plain),
        }
    }

    /// The definition for a language name, or plain text.
    pub fn by_name(&self, name: &str) -> Arc<LanguageDefinition> {
        if let Some(hit) = self.cache.get(name) {
            tracing::trace!(language = name, "definition cache hit");
            return Arc::clone(hit.value());
        }

        let lang = self.load_definition(name);
        Arc::clone(self.cache.entry(name.to_string()).or_insert(lang).value())
    }

    /// The shared plain-text definition.
    pub fn plain_text(&self) -> Arc<LanguageDefinition> {
        Arc::clone(&self.plain)
    }

    /// Snapshot of the current extension map.
    pub fn extension_map(&self) -> ExtensionMap {
        self.extensions.read().clone()
    }

    /// Every named language in the source, in declaration order.
    pub fn languages(&self) -> Vec<LanguageSummary> {
        let source = self.source.read().clone();
        source
            .records()
            .iter()
            .filter_map(|record| {
                let name = record.name.clone()?;
                let mut extensions: Vec<String> = Vec::new();
                for ext in record.extensions.split_whitespace().map(normalize_extension) {
                    if !ext.is_empty() && !extensions.contains(&ext) {
                        extensions.push(ext);
                    }
                }
                Some(LanguageSummary { name, extensions })
            })
            .collect()
    }

    /// Number of cached definitions.
    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }

    /// Drops every cached definition; the next resolution rebuilds.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Re-reads the source and re-derives the extension map from it.
    ///
    /// The new map replaces the current one, is written to the configured
    /// map path (if any) and returned. Cached definitions are dropped.
    /// Running it twice yields the same map.
    pub fn rebuild_dictionary(&self) -> LanguageResult<ExtensionMap> {
        let source = self.config.source.load()?;
        let map = source.extension_map();

        if let Some(path) = &self.config.extension_map {
            map.save(path)?;
            tracing::debug!(path = %path.display(), entries = map.len(), "extension map written");
        }

        *self.source.write() = Arc::new(source);
        *self.extensions.write() = map.clone();
        self.cache.clear();

        tracing::info!(entries = map.len(), "extension map rebuilt");
        Ok(map)
    }

    /// Builds every language in the source and writes its compiled file
    /// into `out_dir`, in parallel. Returns the written paths in source
    /// order.
    pub fn compile_all(&self, out_dir: &Path) -> LanguageResult<Vec<PathBuf>> {
        let source = self.source.read().clone();

        // Names differing only in letter case share a file name.
        let mut targets: FxHashMap<String, &str> = FxHashMap::default();
        for name in source.names() {
            let file = compiled_file_name(name);
            if let Some(first) = targets.insert(file.clone(), name) {
                return Err(LanguageError::CompiledNameClash {
                    first: first.to_string(),
                    second: name.to_string(),
                    path: out_dir.join(file),
                });
            }
        }

        fs::create_dir_all(out_dir).map_err(|e| LanguageError::io(out_dir, e))?;

        let paths = source
            .records()
            .par_iter()
            .map(|record| {
                let lang = LanguageDefinition::build(record.to_spec()?);
                save_compiled(&lang, out_dir)
            })
            .collect::<LanguageResult<Vec<_>>>()?;

        tracing::info!(count = paths.len(), dir = %out_dir.display(), "compiled languages");
        Ok(paths)
    }

    fn load_definition(&self, name: &str) -> Arc<LanguageDefinition> {
        let source = self.source.read().clone();
        let record = source.find(name);
        let canonical = record.and_then(|r| r.name.as_deref()).unwrap_or(name);

        if let Some(lang) = self.load_compiled_definition(canonical) {
            return lang;
        }

        match record.map(|record| record.to_spec()) {
            Some(Ok(spec)) => {
                tracing::debug!(language = canonical, "built language from source");
                Arc::new(LanguageDefinition::build(spec))
            },
            Some(Err(e)) => {
                tracing::warn!(language = name, error = %e, "malformed language, using plain text");
                Arc::clone(&self.plain)
            },
            None => {
                tracing::warn!(language = name, "language not in source, using plain text");
                Arc::clone(&self.plain)
            },
        }
    }

    /// The compiled file for `name`, if one exists, parses and really
    /// describes `name`.
    fn load_compiled_definition(&self, name: &str) -> Option<Arc<LanguageDefinition>> {
        let path = self.config.compiled_dir.as_ref()?.join(compiled_file_name(name));
        if !path.is_file() {
            return None;
        }

        match load_compiled(&path) {
            Ok(lang) if lang.name() == name => {
                tracing::debug!(language = name, path = %path.display(), "loaded compiled language");
                Some(Arc::new(lang))
            },
            Ok(lang) => {
                tracing::warn!(
                    language = name,
                    found = lang.name(),
                    path = %path.display(),
                    "compiled file holds another language, building from source"
                );
                None
            },
            Err(e) => {
                tracing::warn!(
                    language = name,
                    path = %path.display(),
                    error = %e,
                    "compiled language unusable, building from source"
                );
                None
            },
        }
    }
}

impl Default for LanguageManager {
    fn default() -> Self {
        Self::bundled()
    }
}

fn load_persisted_map(path: &Path) -> Option<ExtensionMap> {
    if !path.is_file() {
        return None;
    }
    match ExtensionMap::load(path) {
        Ok(map) => {
            tracing::debug!(path = %path.display(), "loaded cached extension map");
            Some(map)
        },
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring cached extension map");
            None
        },
    }
}

static_assertions::assert_impl_all!(LanguageManager: Send, Sync);
