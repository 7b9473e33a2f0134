//! JSON configuration file.
//!
//! Stores settings in `<config dir>/Rangefinder/config.json`
//! (`%APPDATA%` on Windows).
//!
//! Uses an in-memory cache so repeated updates do not touch the disk.
//! Call [`ConfigStore::flush`] to persist changes.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ConfigError;
use crate::i18n::Language;
use crate::model::constants::*;
use crate::model::{Calibration, HotkeyAction, HotkeyBindings, Key, Settings};

/// On-disk layout. Every field is optional so an old or hand-edited file
/// still loads; missing or unusable values fall back one by one.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
struct ConfigFile {
    #[serde(deserialize_with = "lenient")]
    measure_hotkey: String,
    #[serde(deserialize_with = "lenient")]
    clear_hotkey: String,
    #[serde(deserialize_with = "lenient")]
    calibration_hotkey: String,
    #[serde(deserialize_with = "lenient")]
    calibration_px: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    reference_meters: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    language: String,
}

/// Accept any JSON value; one of the wrong type becomes `T::default()`,
/// which `into_settings` then replaces with the field's default.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(&value).unwrap_or_else(|e| {
        warn!("Ignoring config value {value}: {e}");
        T::default()
    }))
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

impl From<&Settings> for ConfigFile {
    fn from(settings: &Settings) -> Self {
        let b = &settings.bindings;
        Self {
            measure_hotkey: b.key_for(HotkeyAction::Measure).name().to_string(),
            clear_hotkey: b.key_for(HotkeyAction::Clear).name().to_string(),
            calibration_hotkey: b.key_for(HotkeyAction::Calibrate).name().to_string(),
            calibration_px: settings.calibration.map(|c| c.reference_pixels()),
            reference_meters: Some(settings.reference_meters),
            language: settings.language.code().to_string(),
        }
    }
}

impl ConfigFile {
    fn into_settings(self) -> Settings {
        let defaults = HotkeyBindings::default();
        let key = |name: &str, action: HotkeyAction| {
            name.parse::<Key>().unwrap_or_else(|e| {
                warn!("{e}, using default for {}", action.description());
                defaults.key_for(action)
            })
        };
        let bindings = HotkeyBindings::default()
            .with_key(
                HotkeyAction::Measure,
                key(&self.measure_hotkey, HotkeyAction::Measure),
            )
            .with_key(
                HotkeyAction::Clear,
                key(&self.clear_hotkey, HotkeyAction::Clear),
            )
            .with_key(
                HotkeyAction::Calibrate,
                key(&self.calibration_hotkey, HotkeyAction::Calibrate),
            );

        let mut settings = Settings {
            bindings,
            calibration: self.calibration_px.and_then(Calibration::new),
            reference_meters: self.reference_meters.unwrap_or(DEFAULT_REFERENCE_METERS),
            language: Language::from_code(&self.language).unwrap_or_default(),
        };
        settings.validate();
        settings
    }
}

/// Default location of the config file.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
        .ok_or(ConfigError::NoConfigDir)
}

/// Read settings from `path`.
///
/// A missing file yields defaults. An unreadable or corrupt file is an
/// error; [`ConfigStore::open`] turns it into defaults with a warning.
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Settings::default()),
        Err(e) => return Err(e.into()),
    };
    let file: ConfigFile = serde_json::from_str(&contents)?;
    Ok(file.into_settings())
}

/// Write settings to `path`, creating the parent directory.
pub fn save_settings(path: &Path, settings: &Settings) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&ConfigFile::from(settings))?;
    fs::write(path, json)?;
    Ok(())
}

/// Cached settings backed by an optional file.
#[derive(Debug)]
pub struct ConfigStore {
    path: Option<PathBuf>,
    cache: Settings,
    dirty: bool,
}

impl ConfigStore {
    /// Open the store at the platform config location.
    ///
    /// Falls back to an in-memory store if the system has no config dir.
    pub fn open_default() -> Self {
        match default_config_path() {
            Ok(path) => Self::open(path),
            Err(e) => {
                warn!("{e}, settings will not be saved");
                Self::ephemeral()
            }
        }
    }

    /// Open the store at `path`, loading whatever is there.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cache = match load_settings(&path) {
            Ok(settings) => {
                debug!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                warn!("Ignoring config at {}: {e}", path.display());
                Settings::default()
            }
        };
        Self {
            path: Some(path),
            cache,
            dirty: false,
        }
    }

    /// A store that never touches the disk.
    pub fn ephemeral() -> Self {
        Self {
            path: None,
            cache: Settings::default(),
            dirty: false,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn settings(&self) -> &Settings {
        &self.cache
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Change the cached settings; written on the next [`flush`](Self::flush).
    pub fn update(&mut self, f: impl FnOnce(&mut Settings)) {
        let before = self.cache.clone();
        f(&mut self.cache);
        if self.cache != before {
            self.dirty = true;
        }
    }

    /// Write the cache to disk if it changed.
    pub fn flush(&mut self) -> Result<(), ConfigError> {
        if !self.dirty {
            return Ok(());
        }
        if let Some(path) = &self.path {
            save_settings(path, &self.cache)?;
            info!("Saved settings to {}", path.display());
        }
        self.dirty = false;
        Ok(())
    }
}
