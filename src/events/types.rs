//! Application events for inter-module communication.
//!
//! These events represent commands published by hotkey and tray handlers
//! and executed by the dispatcher on the UI thread.
//! This module is pure Rust with no FFI dependencies, making it fully testable.

use crate::i18n::Language;
use crate::model::{HotkeyAction, HotkeyBindings, ScreenPoint};

/// Application-level events for decoupled communication between modules.
///
/// Events flow from producers (hotkeys, tray menu) through the EventBus
/// to the dispatcher, which hands them to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    // === Input Events ===
    /// A global hotkey fired. `point` is the cursor position captured at
    /// that moment, `None` if it could not be read.
    Hotkey {
        action: HotkeyAction,
        point: Option<ScreenPoint>,
    },

    /// Remove all markers (tray menu)
    ClearAll,

    // === Settings Events ===
    /// Replace the key bindings and re-register the hotkeys
    SetHotkeys(HotkeyBindings),

    /// Manually typed calibration value, validated before use
    SetCalibration(String),

    /// Switch the interface language
    SetLanguage(Language),

    /// Switch to the other interface language (tray menu)
    ToggleLanguage,

    // === System Events ===
    /// Release everything and leave the message loop
    Shutdown,
}

impl AppEvent {
    /// Returns true if this event should trigger hotkey reinstallation.
    ///
    /// Rebinding releases the old reservations and registers the new keys.
    pub fn requires_hotkey_reinstall(&self) -> bool {
        matches!(self, AppEvent::SetHotkeys(_))
    }

    /// Returns a human-readable description of the event for debugging.
    pub fn description(&self) -> &'static str {
        match self {
            AppEvent::Hotkey {
                action: HotkeyAction::Measure,
                ..
            } => "Measure hotkey",
            AppEvent::Hotkey {
                action: HotkeyAction::Clear,
                ..
            } => "Clear hotkey",
            AppEvent::Hotkey {
                action: HotkeyAction::Calibrate,
                ..
            } => "Calibrate hotkey",
            AppEvent::ClearAll => "Clear all markers",
            AppEvent::SetHotkeys(_) => "Rebind hotkeys",
            AppEvent::SetCalibration(_) => "Set calibration manually",
            AppEvent::SetLanguage(_) => "Set language",
            AppEvent::ToggleLanguage => "Toggle language",
            AppEvent::Shutdown => "Shut down",
        }
    }
}
