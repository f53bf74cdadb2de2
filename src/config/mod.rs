//! Configuration system for scriptquill.
//!
//! This module provides the configuration structure for scriptquill with sensible defaults
//! and support for serialization/deserialization via serde. Configuration is loaded from
//! a TOML file and turned into the [`DispatchConfig`] handed to resolvers and dispatchers.
//!
//! # Example
//!
//! ```
//! use scriptquill::config::Config;
//!
//! // Use default configuration
//! let config = Config::default();
//! assert!(config.match_numbers_leniently);
//! assert_eq!(config.prompt, "> ");
//!
//! // Create custom configuration
//! let custom = Config {
//!     log_dispatch: true,
//!     ..Config::default()
//! };
//! assert!(custom.dispatch_config().log_dispatch);
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::dispatch::DispatchConfig;

/// Configuration for the scriptquill application.
///
/// # Fields
///
/// * `match_numbers_leniently` - Any number fits any numeric parameter (default: true)
/// * `match_qualified_names` - Erased generics match by qualified name (default: false)
/// * `resolve_ambiguous_specificity` - Break overload ties by specificity (default: true)
/// * `log_dispatch` - Log overload selection at debug level (default: false)
/// * `prompt` - REPL prompt (default: "> ")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Any numeric argument matches any numeric parameter
    #[serde(default = "default_true")]
    pub match_numbers_leniently: bool,

    /// Unrelated types match when their qualified names are equal
    #[serde(default)]
    pub match_qualified_names: bool,

    /// Break ties between matching overloads by specificity
    #[serde(default = "default_true")]
    pub resolve_ambiguous_specificity: bool,

    /// Log candidate filtering and the chosen overload
    #[serde(default)]
    pub log_dispatch: bool,

    /// Prompt printed before each REPL line
    #[serde(default = "default_prompt")]
    pub prompt: String,
}

fn default_true() -> bool {
    true
}

/// Returns the default REPL prompt.
fn default_prompt() -> String {
    "> ".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            match_numbers_leniently: true,
            match_qualified_names: false,
            resolve_ambiguous_specificity: true,
            log_dispatch: false,
            prompt: default_prompt(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/scriptquill/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("scriptquill");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        let config_path = match Self::config_path() {
            Some(path) => path,
            None => return Self::default(),
        };

        if !config_path.exists() {
            return Self::default();
        }

        Self::load_from(&config_path).unwrap_or_else(|err| {
            log::warn!("ignoring config file: {:#}", err);
            Self::default()
        })
    }

    /// Loads configuration from `path`, failing on unreadable or invalid files.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&config_path)
    }

    /// Writes configuration as pretty TOML to `path`.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Matching settings for resolvers and dispatchers.
    pub fn dispatch_config(&self) -> DispatchConfig {
        DispatchConfig {
            match_numbers_leniently: self.match_numbers_leniently,
            match_qualified_names: self.match_qualified_names,
            resolve_ambiguous_specificity: self.resolve_ambiguous_specificity,
            log_dispatch: self.log_dispatch,
        }
    }
}
