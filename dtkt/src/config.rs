//! Configuration module for the dtkt CLI.
//!
//! This module handles loading, saving, and managing `dtkt.toml`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use dirs::{config_dir, home_dir};
use dtk_lex::Language;
use num_cpus::get as get_num_cpus;
use serde::{Deserialize, Serialize};

use crate::error::{DtktError, Result};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "dtkt.toml";

/// Fallback when the CPU count does not fit a `u32`.
const DEFAULT_THREAD_COUNT: u32 = 4;

/// Application configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Global verbose setting.
    #[serde(default)]
    pub verbose: bool,

    /// Language selection.
    #[serde(default)]
    pub lex: LexConfig,

    /// Report formatting.
    #[serde(default)]
    pub output: OutputConfig,

    /// `check` command settings.
    #[serde(default)]
    pub check: CheckConfig,
}

/// Language selection options.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LexConfig {
    /// Language used when nothing else identifies a file.
    #[serde(default)]
    pub default_language: Option<String>,

    /// Extension (without the dot) to language name overrides.
    #[serde(default)]
    pub extensions: BTreeMap<String, String>,
}

/// Report formatting options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// Default output format (`text` or `json`).
    #[serde(default = "default_format")]
    pub format: String,

    /// Whether `tokens` lists whitespace tokens.
    #[serde(default)]
    pub show_whitespace: bool,
}

/// `check` command options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckConfig {
    /// Number of parallel jobs.
    #[serde(default = "default_parallel_jobs")]
    pub jobs: u32,

    /// Error tokens reported per file before the rest are summarised.
    #[serde(default = "default_max_errors")]
    pub max_errors_per_file: usize,
}

fn default_format() -> String {
    "text".to_string()
}

/// The number of available CPUs, or [`DEFAULT_THREAD_COUNT`].
fn default_parallel_jobs() -> u32 {
    get_num_cpus().try_into().unwrap_or(DEFAULT_THREAD_COUNT)
}

fn default_max_errors() -> usize {
    100
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            show_whitespace: false,
        }
    }
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            jobs: default_parallel_jobs(),
            max_errors_per_file: default_max_errors(),
        }
    }
}

impl LexConfig {
    /// The language an extension override names, if any.
    pub fn language_for_extension(&self, extension: &str) -> Result<Option<Language>> {
        let name = self
            .extensions
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(extension))
            .map(|(_, name)| name);
        name.map(|name| parse_language(name)).transpose()
    }

    /// The configured fallback language, if any.
    pub fn default_language(&self) -> Result<Option<Language>> {
        self.default_language
            .as_deref()
            .map(parse_language)
            .transpose()
    }
}

fn parse_language(name: &str) -> Result<Language> {
    name.parse()
        .map_err(|e| DtktError::Config(format!("{} in {}", e, CONFIG_FILE_NAME)))
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Searches for configuration in the following order:
    /// 1. Current directory
    /// 2. `~/.config/dtkt/`
    /// 3. System configuration directory
    ///
    /// Returns the default configuration if no config file is found.
    pub fn load() -> Result<Self> {
        match Self::find_config_file() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DtktError::Config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            DtktError::Config(format!("Failed to parse configuration: {}", e))
        })?;

        Ok(config)
    }

    /// Save configuration to a specific path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            DtktError::Config(format!("Failed to serialize configuration: {}", e))
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    fn check_current_dir_config() -> Option<PathBuf> {
        let path = PathBuf::from(CONFIG_FILE_NAME);
        path.exists().then_some(path)
    }

    fn check_home_config() -> Option<PathBuf> {
        home_dir()
            .map(|dir| dir.join(".config").join("dtkt").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    fn check_system_config() -> Option<PathBuf> {
        config_dir()
            .map(|dir| dir.join("dtkt").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    fn find_config_file() -> Option<PathBuf> {
        Self::check_current_dir_config()
            .or_else(Self::check_home_config)
            .or_else(Self::check_system_config)
    }
}
