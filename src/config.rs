//! Defaults for the `fastfeed` binary, read from `~/.config/fastfeed/config.toml`.
//!
//! Having no file at all is normal and means built-in defaults. Keys the
//! binary does not know are tolerated and logged.
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::feed::ParseOptions;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// SEC-014: Config file exceeds maximum allowed size.
    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Defaults for the `fastfeed` binary.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
/// Command-line flags take precedence over these values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Extract body fields (description/summary/content).
    pub extract_content: bool,

    /// Harvest namespaced extension elements.
    pub extract_extensions: bool,

    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extract_content: true,
            extract_extensions: false,
            pretty: true,
        }
    }
}

impl Config {
    /// SEC-014: Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [&'static str; 3] = ["extract_content", "extract_extensions", "pretty"];

    /// Default location, `$HOME/.config/fastfeed/config.toml`.
    ///
    /// `None` when `HOME` is not set.
    pub fn default_path() -> Option<PathBuf> {
        let home = std::env::var_os("HOME")?;
        Some(
            PathBuf::from(home)
                .join(".config")
                .join("fastfeed")
                .join("config.toml"),
        )
    }

    /// Reads the config at `path`.
    ///
    /// A missing or blank file gives [`Config::default`]. Invalid TOML or a
    /// value of the wrong type is [`ConfigError::Parse`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let size = match std::fs::metadata(path) {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        // SEC-014
        if size > Self::MAX_FILE_SIZE {
            return Err(ConfigError::TooLarge(format!(
                "{} is {size} bytes (max {} bytes)",
                path.display(),
                Self::MAX_FILE_SIZE
            )));
        }

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        Self::warn_unknown_keys(&content);
        let config: Config = toml::from_str(&content)?;
        tracing::info!(path = %path.display(), ?config, "Loaded configuration");
        Ok(config)
    }

    fn warn_unknown_keys(content: &str) {
        let Ok(table) = content.parse::<toml::Table>() else {
            return;
        };
        table
            .keys()
            .filter(|key| !Self::KNOWN_KEYS.contains(&key.as_str()))
            .for_each(|key| tracing::warn!(key = %key, "Unknown config key ignored"));
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions::default()
            .extract_content(self.extract_content)
            .extract_extensions(self.extract_extensions)
    }
}

// ============================================================================
// Tests
// ============================================================================
