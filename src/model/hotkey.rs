//! Hotkey actions, physical keys and the action-to-key bindings.

use std::fmt;
use std::str::FromStr;

use super::constants::*;
use crate::error::ConfigError;

/// A logical action the user can trigger from anywhere on the desktop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HotkeyAction {
    Measure,
    Clear,
    Calibrate,
}

impl HotkeyAction {
    /// All actions, in registration order.
    pub const ALL: [HotkeyAction; 3] = [
        HotkeyAction::Measure,
        HotkeyAction::Clear,
        HotkeyAction::Calibrate,
    ];

    /// Returns true if the action needs the cursor position at trigger time.
    pub fn captures_point(self) -> bool {
        matches!(self, HotkeyAction::Measure | HotkeyAction::Calibrate)
    }

    /// OS-level hotkey id reserved for this action.
    pub fn hotkey_id(self) -> i32 {
        match self {
            HotkeyAction::Measure => HOTKEY_MEASURE_ID,
            HotkeyAction::Clear => HOTKEY_CLEAR_ID,
            HotkeyAction::Calibrate => HOTKEY_CALIBRATE_ID,
        }
    }

    /// Inverse of [`HotkeyAction::hotkey_id`].
    pub fn from_hotkey_id(id: i32) -> Option<Self> {
        HotkeyAction::ALL.into_iter().find(|a| a.hotkey_id() == id)
    }

    /// Returns a human-readable name for logs.
    pub fn description(self) -> &'static str {
        match self {
            HotkeyAction::Measure => "measure",
            HotkeyAction::Clear => "clear",
            HotkeyAction::Calibrate => "calibrate",
        }
    }
}

macro_rules! keys {
    ($($variant:ident => $name:literal, $vk:literal;)*) => {
        /// A single physical key that can be bound to an action.
        ///
        /// Names match the ones persisted in the settings file.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Key {
            $($variant,)*
        }

        impl Key {
            /// Every bindable key.
            pub const ALL: &'static [Key] = &[$(Key::$variant,)*];

            /// Canonical name, as stored in the config file.
            pub fn name(self) -> &'static str {
                match self {
                    $(Key::$variant => $name,)*
                }
            }

            /// Win32 virtual-key code.
            pub fn virtual_key_code(self) -> u32 {
                match self {
                    $(Key::$variant => $vk,)*
                }
            }
        }
    };
}

keys! {
    F1 => "F1", 0x70; F2 => "F2", 0x71; F3 => "F3", 0x72; F4 => "F4", 0x73;
    F5 => "F5", 0x74; F6 => "F6", 0x75; F7 => "F7", 0x76; F8 => "F8", 0x77;
    F9 => "F9", 0x78; F10 => "F10", 0x79; F11 => "F11", 0x7A; F12 => "F12", 0x7B;
    F13 => "F13", 0x7C; F14 => "F14", 0x7D; F15 => "F15", 0x7E; F16 => "F16", 0x7F;
    F17 => "F17", 0x80; F18 => "F18", 0x81; F19 => "F19", 0x82; F20 => "F20", 0x83;
    F21 => "F21", 0x84; F22 => "F22", 0x85; F23 => "F23", 0x86; F24 => "F24", 0x87;

    A => "A", 0x41; B => "B", 0x42; C => "C", 0x43; D => "D", 0x44; E => "E", 0x45;
    F => "F", 0x46; G => "G", 0x47; H => "H", 0x48; I => "I", 0x49; J => "J", 0x4A;
    K => "K", 0x4B; L => "L", 0x4C; M => "M", 0x4D; N => "N", 0x4E; O => "O", 0x4F;
    P => "P", 0x50; Q => "Q", 0x51; R => "R", 0x52; S => "S", 0x53; T => "T", 0x54;
    U => "U", 0x55; V => "V", 0x56; W => "W", 0x57; X => "X", 0x58; Y => "Y", 0x59;
    Z => "Z", 0x5A;

    D0 => "D0", 0x30; D1 => "D1", 0x31; D2 => "D2", 0x32; D3 => "D3", 0x33;
    D4 => "D4", 0x34; D5 => "D5", 0x35; D6 => "D6", 0x36; D7 => "D7", 0x37;
    D8 => "D8", 0x38; D9 => "D9", 0x39;

    NumPad0 => "NumPad0", 0x60; NumPad1 => "NumPad1", 0x61; NumPad2 => "NumPad2", 0x62;
    NumPad3 => "NumPad3", 0x63; NumPad4 => "NumPad4", 0x64; NumPad5 => "NumPad5", 0x65;
    NumPad6 => "NumPad6", 0x66; NumPad7 => "NumPad7", 0x67; NumPad8 => "NumPad8", 0x68;
    NumPad9 => "NumPad9", 0x69;
    Multiply => "Multiply", 0x6A; Add => "Add", 0x6B; Subtract => "Subtract", 0x6D;
    Decimal => "Decimal", 0x6E; Divide => "Divide", 0x6F;

    Insert => "Insert", 0x2D; Delete => "Delete", 0x2E; Home => "Home", 0x24;
    End => "End", 0x23; PageUp => "PageUp", 0x21; PageDown => "PageDown", 0x22;
    Pause => "Pause", 0x13; Scroll => "Scroll", 0x91; Space => "Space", 0x20;
    Tab => "Tab", 0x09; Oem3 => "Oem3", 0xC0;
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Key {
    type Err = ConfigError;

    /// Case-insensitive; also accepts the legacy `Prior`/`Next` page key names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.eq_ignore_ascii_case("Prior") {
            return Ok(Key::PageUp);
        }
        if t.eq_ignore_ascii_case("Next") {
            return Ok(Key::PageDown);
        }
        Key::ALL
            .iter()
            .copied()
            .find(|k| k.name().eq_ignore_ascii_case(t))
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}

/// Which key triggers which action. One key per action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotkeyBindings {
    pub measure: Key,
    pub clear: Key,
    pub calibrate: Key,
}

impl Default for HotkeyBindings {
    fn default() -> Self {
        Self {
            measure: Key::F9,
            clear: Key::F10,
            calibrate: Key::F8,
        }
    }
}

impl HotkeyBindings {
    /// Key currently bound to `action`.
    pub fn key_for(&self, action: HotkeyAction) -> Key {
        match action {
            HotkeyAction::Measure => self.measure,
            HotkeyAction::Clear => self.clear,
            HotkeyAction::Calibrate => self.calibrate,
        }
    }

    /// Copy with `action` rebound to `key`; the other actions keep their keys.
    pub fn with_key(mut self, action: HotkeyAction, key: Key) -> Self {
        match action {
            HotkeyAction::Measure => self.measure = key,
            HotkeyAction::Clear => self.clear = key,
            HotkeyAction::Calibrate => self.calibrate = key,
        }
        self
    }

    /// Action bound to `key`, if any.
    pub fn action_for(&self, key: Key) -> Option<HotkeyAction> {
        HotkeyAction::ALL
            .into_iter()
            .find(|&a| self.key_for(a) == key)
    }

    /// `(action, key)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (HotkeyAction, Key)> + '_ {
        HotkeyAction::ALL.into_iter().map(|a| (a, self.key_for(a)))
    }

    /// Rejects bindings where two actions share one key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pairs: Vec<_> = self.iter().collect();
        for (i, &(first, key)) in pairs.iter().enumerate() {
            if let Some(&(second, _)) = pairs[i + 1..].iter().find(|(_, k)| *k == key) {
                return Err(ConfigError::DuplicateHotkey { key, first, second });
            }
        }
        Ok(())
    }
}
