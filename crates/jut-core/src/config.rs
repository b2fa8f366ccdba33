//! Configuration management for jut.
//!
//! Loads configuration from ${JUT_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{JutError, Result};

pub mod paths {
    //! Path resolution for the jut configuration directory.
    //!
    //! JUT_HOME resolution order:
    //! 1. JUT_HOME environment variable (if set)
    //! 2. ~/.config/jut (default)
    //! 3. ./.jut when no home directory can be determined

    use std::path::PathBuf;

    pub fn jut_home() -> PathBuf {
        if let Ok(home) = std::env::var("JUT_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".jut"),
            |h| h.join(".config").join("jut"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        jut_home().join("config.toml")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Cells shown when no selection flag is passed (0 disables the default)
    pub default_head: u32,

    /// Language for code cells of notebooks without language metadata
    pub code_language: String,

    /// Draw borders around cell content
    pub cell_border: bool,

    /// Pager command for single-page output
    pub pager: Option<String>,

    /// Upper bound for the render width
    pub max_width: Option<u16>,
}

impl Config {
    const DEFAULT_HEAD: u32 = 10;
    const DEFAULT_CODE_LANGUAGE: &str = "python";

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            JutError::Configuration(format!("failed to read {}: {e}", path.display()))
        })?;
        let config: Config = toml::from_str(&contents).map_err(|e| {
            JutError::Configuration(format!("failed to parse {}: {e}", path.display()))
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Head count used when the user selects nothing, if any.
    pub fn default_head(&self) -> Option<usize> {
        (self.default_head > 0).then_some(self.default_head as usize)
    }

    /// Pager command: config, then `$PAGER`, then `less -R`. Blank values are skipped.
    pub fn effective_pager(&self) -> String {
        let non_blank = |p: &String| !p.trim().is_empty();
        self.pager
            .clone()
            .filter(non_blank)
            .or_else(|| std::env::var("PAGER").ok().filter(non_blank))
            .unwrap_or_else(|| "less -R".to_string())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_head: Self::DEFAULT_HEAD,
            code_language: Self::DEFAULT_CODE_LANGUAGE.to_string(),
            cell_border: true,
            pager: None,
            max_width: None,
        }
    }
}
