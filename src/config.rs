//! Application configuration loading for CLI defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

/// JSON-backed file configuration for the portal CLI.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Path to the catalog database file.
    pub db_path: PathBuf,
    /// Object storage settings; required for upload commands.
    pub storage: StorageSettings,
    /// Default user id for admin commands when `--user` is not given.
    pub admin_user: Option<String>,
}

/// Storage service endpoint settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageSettings {
    /// Base URL of the storage API, e.g. `https://host/storage/v1`.
    pub base_url: String,
    /// Bucket resources are written to.
    pub bucket: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("studyshelf.db"),
            storage: StorageSettings::default(),
            admin_user: None,
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            bucket: "resources".to_string(),
        }
    }
}

impl Config {
    /// Validates config values against runtime constraints.
    pub fn validate(&self) -> Result<()> {
        if !self.storage.base_url.is_empty() && !self.storage.base_url.starts_with("http") {
            bail!(
                "Invalid config value for `storage.base_url`: {}. Expected an http(s) URL",
                self.storage.base_url
            );
        }
        if self.storage.bucket.is_empty() {
            bail!("Invalid config value for `storage.bucket`: must not be empty");
        }
        Ok(())
    }
}

/// Resolves the default config path.
///
/// Priority:
/// 1. `$STUDYSHELF_CONFIG` (explicit file path)
/// 2. `$XDG_CONFIG_HOME/studyshelf/config.json`
/// 3. `$HOME/.config/studyshelf/config.json`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(explicit) = env_var_non_empty_os("STUDYSHELF_CONFIG") {
        return Some(PathBuf::from(explicit));
    }

    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join("studyshelf")
                .join("config.json"),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("studyshelf")
            .join("config.json"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads config from an explicit path, or the default path if present.
/// A missing file yields defaults rather than an error.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => resolve_default_config_path(),
    };

    let Some(path) = path else {
        return Ok(Config::default());
    };

    if !path.exists() {
        if explicit.is_some() {
            bail!("Config file '{}' does not exist", path.display());
        }
        return Ok(Config::default());
    }

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    let config = parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))?;
    config.validate()?;
    Ok(config)
}

fn parse_config_str(raw: &str) -> Result<Config> {
    serde_json::from_str(raw).context("invalid JSON config")
}
