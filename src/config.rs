//! Player preferences loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Environment variable overriding [`Settings::auto_save`].
pub const AUTO_SAVE_ENV: &str = "TICTACTOE_AUTO_SAVE";
/// Environment variable overriding [`Settings::store_path`].
pub const STORE_ENV: &str = "TICTACTOE_STORE";

/// User-configurable settings.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Settings {
    /// Save the game on exit and restore it on the next start.
    #[serde(default = "default_auto_save")]
    auto_save: bool,

    /// File holding saved games.
    #[serde(default = "default_store_path")]
    store_path: PathBuf,

    /// Name of the slot the game is saved under.
    #[serde(default = "default_slot")]
    slot: String,

    /// Log file used while the terminal UI owns the screen.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,
}

fn default_auto_save() -> bool {
    true
}

fn default_store_path() -> PathBuf {
    PathBuf::from("tictactoe_store.toml")
}

fn default_slot() -> String {
    "GAME".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("tictactoe.log")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_save: default_auto_save(),
            store_path: default_store_path(),
            slot: default_slot(),
            log_file: default_log_file(),
        }
    }
}

impl Settings {
    /// Loads settings from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading settings from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let settings: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(auto_save = settings.auto_save, "Settings loaded");
        Ok(settings)
    }

    /// Loads settings from `path`, or defaults if the file does not exist.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Writes settings to a TOML file.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::new(format!("Failed to encode config: {}", e)))?;
        std::fs::write(path.as_ref(), content)
            .map_err(|e| ConfigError::new(format!("Failed to write config file: {}", e)))?;
        info!("Settings saved");
        Ok(())
    }

    /// Applies `TICTACTOE_AUTO_SAVE` and `TICTACTOE_STORE` from the environment.
    #[instrument(skip(self))]
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_overrides(
            std::env::var(AUTO_SAVE_ENV).ok().as_deref(),
            std::env::var(STORE_ENV).ok().as_deref(),
        )
    }

    /// Applies override values as read from the environment.
    pub fn apply_overrides(
        mut self,
        auto_save: Option<&str>,
        store: Option<&str>,
    ) -> Result<Self, ConfigError> {
        if let Some(raw) = auto_save {
            self.auto_save = parse_flag(raw).ok_or_else(|| {
                ConfigError::new(format!("{} must be true/false/1/0, got {:?}", AUTO_SAVE_ENV, raw))
            })?;
            debug!(auto_save = self.auto_save, "Auto-save overridden");
        }
        if let Some(path) = store.filter(|p| !p.trim().is_empty()) {
            self.store_path = PathBuf::from(path);
            debug!(store = %path, "Store path overridden");
        }
        Ok(self)
    }

    /// Sets the auto-save preference.
    pub fn set_auto_save(&mut self, auto_save: bool) {
        self.auto_save = auto_save;
    }

    /// Sets the store path.
    pub fn set_store_path(&mut self, path: impl Into<PathBuf>) {
        self.store_path = path.into();
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        other => {
            warn!(value = %other, "Unrecognised flag value");
            None
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(*settings.auto_save());
        assert_eq!(settings.slot(), "GAME");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let settings: Settings = toml::from_str("auto_save = false").unwrap();
        assert!(!*settings.auto_save());
        assert_eq!(settings.store_path(), &default_store_path());
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::default()
            .apply_overrides(Some("0"), Some("saves/game.toml"))
            .unwrap();
        assert!(!*settings.auto_save());
        assert_eq!(settings.store_path(), &PathBuf::from("saves/game.toml"));
    }

    #[test]
    fn test_bad_flag_rejected() {
        let err = Settings::default()
            .apply_overrides(Some("maybe"), None)
            .unwrap_err();
        assert!(err.message.contains(AUTO_SAVE_ENV));
    }

    #[test]
    fn test_blank_store_override_ignored() {
        let settings = Settings::default()
            .apply_overrides(None, Some("  "))
            .unwrap();
        assert_eq!(settings, Settings::default());
    }
}
