//! Shell configuration.
//!
//! Loaded from a TOML file such as:
//!
//! ```toml
//! prompt = "parley> "
//! banner = false
//! history-file = "~/.parley_history"
//! log-filter = "debug"
//!
//! [engine]
//! optional-flag = "negated"
//! strict-arity = true
//! ```
//!
//! Every key is optional.

use std::fs;
use std::path::{Path, PathBuf};

use parley_command::EngineConfig;
use parley_foundation::{Error, Result};
use serde::{Deserialize, Serialize};

/// Settings for a [`Shell`](crate::Shell) and the engine it owns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ShellConfig {
    /// Primary prompt.
    pub prompt: String,
    /// Whether to print the welcome banner.
    pub banner: bool,
    /// Where to load and save line history.
    pub history_file: Option<PathBuf>,
    /// Default `env_logger` filter when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Engine behavior.
    pub engine: EngineConfig,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: "parley> ".to_string(),
            banner: true,
            history_file: None,
            log_filter: "warn".to_string(),
            engine: EngineConfig::default(),
        }
    }
}

impl ShellConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns a config error if the text is not valid TOML or has
    /// mistyped keys.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::config(format!("invalid config: {e}")))
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns a config error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| Error::config(format!("failed to read {}: {e}", path.display())))?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Serializes the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns a config error if serialization fails.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| Error::config(format!("cannot serialize config: {e}")))
    }

    /// Sets the prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Enables or disables the banner.
    #[must_use]
    pub const fn with_banner(mut self, banner: bool) -> Self {
        self.banner = banner;
        self
    }

    /// Sets the history file.
    #[must_use]
    pub fn with_history_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.history_file = Some(path.into());
        self
    }

    /// Sets the default log filter.
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Sets the engine configuration.
    #[must_use]
    pub const fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }
}
