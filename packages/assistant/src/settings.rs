//! Persisted user settings.
//!
//! Settings live in a TOML file (see [`settings_path`]). A missing file
//! yields [`Settings::default`]. All changes go through
//! [`SettingsStore::update`], which persists before publishing the new
//! value.

use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use air_vision_air_quality_models::Locale;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use thiserror::Error;

/// Default location of the settings file.
pub const DEFAULT_SETTINGS_PATH: &str = "data/settings.toml";

/// Environment variable overriding [`DEFAULT_SETTINGS_PATH`].
pub const SETTINGS_PATH_ENV: &str = "AIR_VISION_SETTINGS";

/// Errors from loading or saving settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Reading or writing the settings file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not valid TOML for [`Settings`].
    #[error("Invalid settings file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Serializing the settings failed.
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Display theme.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// User settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Query live providers instead of synthesizing snapshots.
    pub live_data: bool,
    /// Show user notifications.
    pub notifications: bool,
    pub theme: Theme,
    pub locale: Locale,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            live_data: false,
            notifications: true,
            theme: Theme::Dark,
            locale: Locale::En,
        }
    }
}

/// A partial update; `None` fields are left unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_data: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notifications: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<Locale>,
}

impl SettingsPatch {
    /// Returns `settings` with this patch applied.
    #[must_use]
    pub fn apply(&self, settings: Settings) -> Settings {
        Settings {
            live_data: self.live_data.unwrap_or(settings.live_data),
            notifications: self.notifications.unwrap_or(settings.notifications),
            theme: self.theme.unwrap_or(settings.theme),
            locale: self.locale.unwrap_or(settings.locale),
        }
    }

    /// Whether the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.live_data.is_none()
            && self.notifications.is_none()
            && self.theme.is_none()
            && self.locale.is_none()
    }
}

/// Resolves the settings file path from [`SETTINGS_PATH_ENV`], falling
/// back to [`DEFAULT_SETTINGS_PATH`].
#[must_use]
pub fn settings_path() -> PathBuf {
    std::env::var(SETTINGS_PATH_ENV)
        .map_or_else(|_| PathBuf::from(DEFAULT_SETTINGS_PATH), PathBuf::from)
}

/// Loads settings from `path`. A missing file yields the defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load(path: &Path) -> Result<Settings, SettingsError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(toml::from_str(&text)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("No settings at {}, using defaults", path.display());
            Ok(Settings::default())
        }
        Err(e) => Err(e.into()),
    }
}

/// Writes `settings` to `path`, creating parent directories.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn save(path: &Path, settings: &Settings) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string(settings)?)?;
    Ok(())
}

/// The process-wide settings, shared between the assistant and the
/// server.
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    current: RwLock<Settings>,
}

impl SettingsStore {
    /// Opens the store at `path`, loading the current value.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing settings file cannot be read or
    /// parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        let current = load(&path)?;
        log::info!("Loaded settings from {}: {current:?}", path.display());
        Ok(Self {
            path,
            current: RwLock::new(current),
        })
    }

    /// Opens the store at [`settings_path`].
    ///
    /// # Errors
    ///
    /// See [`SettingsStore::open`].
    pub fn open_default() -> Result<Self, SettingsError> {
        Self::open(settings_path())
    }

    /// The backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A copy of the current settings.
    #[must_use]
    pub fn current(&self) -> Settings {
        *self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies `patch`, persists the result, and returns it.
    ///
    /// The in-memory value only changes once the write succeeded.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be written.
    pub fn update(&self, patch: &SettingsPatch) -> Result<Settings, SettingsError> {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let next = patch.apply(*current);
        if next != *current {
            save(&self.path, &next)?;
            log::info!("Settings updated: {next:?}");
            *current = next;
        }
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn temp_path(name: &str) -> PathBuf {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let n = COUNTER.fetch_add(1, Ordering::SeqCst);
        std::env::temp_dir().join(format!(
            "air_vision_settings_{}_{name}_{n}/settings.toml",
            std::process::id()
        ))
    }

    #[test]
    fn defaults_match_first_run() {
        let s = Settings::default();
        assert!(!s.live_data);
        assert!(s.notifications);
        assert_eq!(s.theme, Theme::Dark);
        assert_eq!(s.locale, Locale::En);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let store = SettingsStore::open(temp_path("missing")).unwrap();
        assert_eq!(store.current(), Settings::default());
    }

    #[test]
    fn update_persists_and_reloads() {
        let path = temp_path("persist");
        let store = SettingsStore::open(&path).unwrap();

        let updated = store
            .update(&SettingsPatch {
                live_data: Some(true),
                locale: Some(Locale::Fr),
                ..SettingsPatch::default()
            })
            .unwrap();

        assert!(updated.live_data);
        assert!(updated.notifications);
        assert_eq!(store.current(), updated);
        assert_eq!(SettingsStore::open(&path).unwrap().current(), updated);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let path = temp_path("partial");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "liveData = true\n").unwrap();

        let settings = load(&path).unwrap();

        assert!(settings.live_data);
        assert!(settings.notifications);
        assert_eq!(settings.theme, Theme::Dark);
    }

    #[test]
    fn invalid_file_is_an_error() {
        let path = temp_path("invalid");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "theme = \"sepia\"\n").unwrap();

        assert!(matches!(load(&path), Err(SettingsError::Parse(_))));
    }

    #[test]
    fn patch_json_uses_camel_case() {
        let patch: SettingsPatch =
            serde_json::from_str(r#"{"liveData": true, "theme": "light"}"#).unwrap();
        assert_eq!(patch.live_data, Some(true));
        assert_eq!(patch.theme, Some(Theme::Light));
        assert!(patch.notifications.is_none());
        assert!(!patch.is_empty());
        assert!(SettingsPatch::default().is_empty());
    }
}
