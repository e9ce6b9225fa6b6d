//! Configuration module for the tinct CLI.
//!
//! Settings live in `tinct.toml`, looked up in the current directory,
//! `~/.config/tinct/`, then the platform configuration directory.

use std::path::{Path, PathBuf};

use dirs::{config_dir, home_dir};
use num_cpus::get as get_num_cpus;
use serde::{Deserialize, Serialize};
use tinct_lang::{ManagerConfig, SourceLocation};
use tinct_palette::PaletteConfig;

use crate::error::{Result, TinctError};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "tinct.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Language source TOML; the bundled source when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_source: Option<PathBuf>,

    /// Directory holding compiled `<name>.lang` files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compiled_dir: Option<PathBuf>,

    /// Where the extension map is cached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension_map: Option<PathBuf>,

    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub compile: CompileConfig,

    /// Colour overrides on top of the default theme.
    #[serde(default)]
    pub palette: PaletteConfig,
}

/// Scanner options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScanConfig {
    #[serde(default = "default_true")]
    pub emit_whitespace: bool,
}

/// `compile` command options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompileConfig {
    /// Number of worker threads.
    #[serde(default = "default_parallel_jobs")]
    pub jobs: usize,
}

fn default_true() -> bool {
    true
}

fn default_parallel_jobs() -> usize {
    get_num_cpus().max(1)
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            emit_whitespace: true,
        }
    }
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            jobs: default_parallel_jobs(),
        }
    }
}

impl Config {
    /// Loads the first configuration file found, or the defaults.
    pub fn load() -> Result<Self> {
        match Self::find_config_file() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(TinctError::Config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| TinctError::Config(format!("Failed to parse configuration: {}", e)))?;

        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Serializes the configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| TinctError::Config(format!("Failed to serialize configuration: {}", e)))
    }

    /// Saves configuration to a specific path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Language manager settings, with `source` overriding the configured
    /// language source.
    pub fn manager_config(&self, source: Option<&Path>) -> ManagerConfig {
        let location = match source.or(self.language_source.as_deref()) {
            Some(path) => SourceLocation::File(path.to_path_buf()),
            None => SourceLocation::Bundled,
        };

        ManagerConfig {
            source: location,
            compiled_dir: self.compiled_dir.clone(),
            extension_map: self.extension_map.clone(),
        }
    }

    fn check_current_dir_config() -> Option<PathBuf> {
        let path = PathBuf::from(CONFIG_FILE_NAME);
        path.exists().then_some(path)
    }

    fn check_home_config() -> Option<PathBuf> {
        home_dir()
            .map(|dir| dir.join(".config").join("tinct").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    fn check_system_config() -> Option<PathBuf> {
        config_dir()
            .map(|dir| dir.join("tinct").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    fn find_config_file() -> Option<PathBuf> {
        Self::check_current_dir_config()
            .or_else(Self::check_home_config)
            .or_else(Self::check_system_config)
    }
}
