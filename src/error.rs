//! Error types shared across the crate.

use std::io;

use thiserror::Error;

use crate::model::hotkey::{HotkeyAction, Key};

/// Start-up failure that ends the process.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("platform error: {0}")]
    Platform(String),
}

/// Rejected measurement-engine inputs. None of them change engine state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("calibration required before measuring")]
    CalibrationRequired,

    #[error("calibration points must be distinct")]
    DegenerateCalibration,

    #[error("no cursor position available for {}", .0.description())]
    MissingCursorPosition(HotkeyAction),
}

/// Settings and persistence errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown key name '{0}'")]
    UnknownKey(String),

    #[error("key {key} is bound to both {} and {}", .first.description(), .second.description())]
    DuplicateHotkey {
        key: Key,
        first: HotkeyAction,
        second: HotkeyAction,
    },

    #[error("calibration must be a positive number, got '{0}'")]
    InvalidCalibration(String),

    #[error("no config directory on this system")]
    NoConfigDir,
}
