//! Configuration for curscript.
//!
//! This module provides TOML configuration file loading from
//! `~/.curscript/config.toml`:
//!
//! ```toml
//! # Log level for the file log: trace, debug, info, warn, error
//! log_level = "info"
//!
//! [border]
//! horizontal = "-"
//! vertical = "|"
//! corner = "+"
//! ```

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level for the file log
    pub log_level: String,
    /// Characters drawn by the window `box` method
    pub border: BorderChars,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            border: BorderChars::default(),
        }
    }
}

/// Border drawing characters
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderChars {
    pub horizontal: char,
    pub vertical: char,
    pub corner: char,
}

impl Default for BorderChars {
    fn default() -> Self {
        Self {
            horizontal: '-',
            vertical: '|',
            corner: '+',
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults.
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                if let Ok(content) = fs::read_to_string(&path) {
                    if let Ok(config) = toml::from_str(&content) {
                        return config;
                    }
                }
            }
        }
        Self::default()
    }

    /// Directory holding the config file and the log file.
    pub fn config_dir() -> Option<PathBuf> {
        home_dir().map(|home| home.join(".curscript"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }
}

// Get home directory
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.border.horizontal, '-');
        assert_eq!(config.border.vertical, '|');
        assert_eq!(config.border.corner, '+');
    }

    #[test]
    fn test_parse_partial() {
        let config: Config = toml::from_str(
            r##"
            log_level = "debug"

            [border]
            corner = "#"
            "##,
        )
        .unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.border.corner, '#');
        // unspecified fields keep their defaults
        assert_eq!(config.border.horizontal, '-');
    }
}
