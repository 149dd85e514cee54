//! Application configuration.
//!
//! Settings live in `<config dir>/nextwave/config.toml`. Every field has a
//! default so a missing or partial file still produces a usable config.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    platform::{Platform, PlatformPreference},
    rules::DEFAULT_LANGUAGE,
};

/// Directory under the user's config dir holding our files.
pub const CONFIG_DIR: &str = "nextwave";
/// File name of the config file.
pub const CONFIG_FILE: &str = "config.toml";
/// Remote location serving the wakethieving rules document.
pub const DEFAULT_RULES_URL: &str = "https://nextwaveapp.ch/api/wakethieving-rules.json";
/// Local copy consulted when the remote location fails.
pub const DEFAULT_RULES_FALLBACK: &str = "data/wakethieving-rules.json";

/// Top-level application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Platform shown when the app starts.
    pub platform: PlatformPreference,
    /// Rules content locations.
    pub rules: RulesConfig,
}

/// Where the rules document comes from and which language is shown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Primary location, normally an `https://` URL.
    pub primary: String,
    /// Secondary location, normally a file path.
    pub fallback: String,
    /// Language bundle to display.
    pub language: String,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            primary: DEFAULT_RULES_URL.to_string(),
            fallback: DEFAULT_RULES_FALLBACK.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl AppConfig {
    /// Default config file location.
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR)
            .join(CONFIG_FILE)
    }

    /// Load from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::path())
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .build()
            .with_context(|| format!("failed to read config {}", path.display()))?;
        settings
            .try_deserialize()
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// Platform to start on for the device this process runs on.
    pub fn initial_platform(&self) -> Platform {
        self.platform.resolve(std::env::consts::OS)
    }
}

/// Write the default config file if none exists yet, returning its path.
pub fn ensure_default_config() -> Result<PathBuf> {
    ensure_default_config_at(AppConfig::path())
}

/// Same as [`ensure_default_config`] for an explicit path.
pub fn ensure_default_config_at(path: impl Into<PathBuf>) -> Result<PathBuf> {
    let path = path.into();
    if path.exists() {
        return Ok(path);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    fs::write(&path, default_config_contents())
        .with_context(|| format!("failed to write config {}", path.display()))?;
    info!(path = %path.display(), "wrote default config");
    Ok(path)
}

fn default_config_contents() -> String {
    let rules = RulesConfig::default();
    format!(
        r#"# NextWave terminal settings.

# Platform shown on start: "auto", "ios" or "android".
platform = "auto"

[rules]
# Fetched first. On any failure the fallback is read instead.
primary = "{}"
fallback = "{}"
language = "{}"
"#,
        rules.primary, rules.fallback, rules.language
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() -> Result<()> {
        let dir = tempdir()?;
        let config = AppConfig::load_from(dir.path().join("absent.toml"))?;
        assert_eq!(config, AppConfig::default());
        Ok(())
    }

    #[test]
    fn default_file_round_trips() -> Result<()> {
        let dir = tempdir()?;
        let path = ensure_default_config_at(dir.path().join("nested/config.toml"))?;
        assert!(path.exists());
        let config = AppConfig::load_from(&path)?;
        assert_eq!(config, AppConfig::default());
        Ok(())
    }

    #[test]
    fn existing_file_is_not_overwritten() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(&path, "platform = \"android\"\n")?;
        ensure_default_config_at(&path)?;
        assert_eq!(fs::read_to_string(&path)?, "platform = \"android\"\n");
        Ok(())
    }

    #[test]
    fn partial_file_keeps_other_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "platform = \"android\"\n[rules]\nfallback = \"/srv/rules.json\"\n",
        )?;
        let config = AppConfig::load_from(&path)?;
        assert_eq!(config.platform, PlatformPreference::Android);
        assert_eq!(config.rules.fallback, "/srv/rules.json");
        assert_eq!(config.rules.primary, DEFAULT_RULES_URL);
        assert_eq!(config.rules.language, DEFAULT_LANGUAGE);
        assert_eq!(config.initial_platform(), Platform::Android);
        Ok(())
    }
}
