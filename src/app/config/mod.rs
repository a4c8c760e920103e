// SPDX-License-Identifier: MPL-2.0
//! User preferences stored in `settings.toml`.
//!
//! # Configuration Sections
//!
//! - `[general]` - Theme mode
//! - `[privacy]` - Secure mode (block screenshots and screen recording)
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with an explicit path
//! 2. Pass a directory to `load_with_override()`/`save_with_override()`
//! 3. Otherwise see [`paths::get_app_config_dir`]
//!
//! # Migration
//!
//! Flat files written before the sections existed (`secure_mode = true` at the
//! top level) are migrated when loaded. The next save writes sections.
//!
//! # Examples
//!
//! ```no_run
//! use gallery_shell::app::config;
//!
//! let (mut config, _warning) = config::load();
//! config.privacy.secure_mode = Some(true);
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "settings.toml";

/// Warning key returned when an existing config file cannot be used.
pub const CONFIG_LOAD_WARNING: &str = "notification-config-load-error";

// =============================================================================
// Section Structs
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    #[serde(
        default = "default_theme_mode",
        deserialize_with = "deserialize_theme_mode"
    )]
    pub theme_mode: ThemeMode,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            theme_mode: default_theme_mode(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PrivacyConfig {
    /// Forbid capture of the app's windows.
    #[serde(
        default = "default_secure_mode",
        skip_serializing_if = "Option::is_none"
    )]
    pub secure_mode: Option<bool>,
}

impl Default for PrivacyConfig {
    fn default() -> Self {
        Self {
            secure_mode: default_secure_mode(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub privacy: PrivacyConfig,
}

impl Config {
    /// Effective secure mode, falling back to [`DEFAULT_SECURE_MODE`].
    #[must_use]
    pub fn secure_mode(&self) -> bool {
        self.privacy.secure_mode.unwrap_or(DEFAULT_SECURE_MODE)
    }
}

// =============================================================================
// Legacy Config (flat format)
// =============================================================================

#[derive(Debug, Deserialize)]
struct LegacyConfig {
    #[serde(
        default = "default_theme_mode",
        deserialize_with = "deserialize_theme_mode"
    )]
    theme_mode: ThemeMode,
    #[serde(default = "default_secure_mode")]
    secure_mode: Option<bool>,
}

impl From<LegacyConfig> for Config {
    fn from(legacy: LegacyConfig) -> Self {
        Config {
            general: GeneralConfig {
                theme_mode: legacy.theme_mode,
            },
            privacy: PrivacyConfig {
                secure_mode: legacy.secure_mode,
            },
        }
    }
}

fn default_theme_mode() -> ThemeMode {
    ThemeMode::System
}

fn default_secure_mode() -> Option<bool> {
    Some(DEFAULT_SECURE_MODE)
}

fn deserialize_theme_mode<'de, D>(deserializer: D) -> std::result::Result<ThemeMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    ThemeMode::parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid theme_mode: {}", raw)))
}

// =============================================================================
// Paths
// =============================================================================

/// Returns the config file path with an optional directory override.
pub fn config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load / Save
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns the config and an optional warning key. A missing file is not an
/// error; an unreadable one yields the defaults plus [`CONFIG_LOAD_WARNING`].
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    let Some(path) = config_path_with_override(base_dir) else {
        return (Config::default(), None);
    };
    if !path.exists() {
        return (Config::default(), None);
    }
    match load_from_path(&path) {
        Ok(config) => (config, None),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "falling back to default config");
            (Config::default(), Some(CONFIG_LOAD_WARNING.to_string()))
        }
    }
}

/// Loads configuration from a specific path, migrating the flat format.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;

    if content.contains("[general]") || content.contains("[privacy]") {
        return Ok(toml::from_str::<Config>(&content)?);
    }

    if let Ok(legacy) = toml::from_str::<LegacyConfig>(&content) {
        return Ok(Config::from(legacy));
    }

    // Neither shape matched; report the sectioned parse error
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    match config_path_with_override(base_dir) {
        Some(path) => save_to_path(config, &path),
        None => Err(Error::Config("no config directory available".to_string())),
    }
}

/// Saves configuration to a specific path, creating parent directories.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
