//! User configuration.
//!
//! Read from `config.toml` in the platform config directory
//! (`~/.config/markshelf/config.toml` on Linux), or from the path in
//! `MARKSHELF_CONFIG`. Every key is optional:
//!
//! ```toml
//! data_dir = "/home/me/.bookmarks"
//! toast_ticks = 8
//!
//! [favicon]
//! endpoint = "https://www.google.com/s2/favicons?domain={host}&sz={size}"
//! size = 64
//! ```
//!
//! Data directory precedence: `MARKSHELF_DATA_DIR` > `data_dir` > platform
//! data directory.

use crate::favicon::FaviconConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "markshelf";
pub const DATA_DIR_ENV: &str = "MARKSHELF_DATA_DIR";
pub const CONFIG_ENV: &str = "MARKSHELF_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_dir: Option<PathBuf>,
    pub favicon: FaviconConfig,
    /// How many UI ticks (250ms each) a notification stays on screen.
    pub toast_ticks: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            favicon: FaviconConfig::default(),
            toast_ticks: 7,
        }
    }
}

impl Config {
    /// Loads the config file from its default or overridden location.
    /// A missing file yields defaults.
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Resolves where bookmarks, the theme flag and logs live.
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(dir));
        }
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }

        Ok(dirs::data_dir()
            .context("Failed to get data directory")?
            .join(APP_NAME))
    }
}

fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "data_dir = \"/tmp/marks\"\n[favicon]\nsize = 32\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/marks")));
        assert_eq!(config.favicon.size, 32);
        assert_eq!(config.favicon.endpoint, FaviconConfig::default().endpoint);
        assert_eq!(config.toast_ticks, Config::default().toast_ticks);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "toast_ticks = \"many\"").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
