//! User settings: hotkey bindings, calibration, reference length, language.
//!
//! Pure Rust, no I/O. Persistence lives in `storage::config`.

use super::constants::*;
use super::geometry::Calibration;
use super::hotkey::HotkeyBindings;
use crate::error::ConfigError;
use crate::i18n::Language;

/// Everything the user can configure.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub bindings: HotkeyBindings,
    /// Saved calibration; `None` until the user calibrates.
    pub calibration: Option<Calibration>,
    /// Real-world length of the calibration reference, in meters.
    pub reference_meters: f64,
    pub language: Language,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bindings: HotkeyBindings::default(),
            calibration: None,
            reference_meters: DEFAULT_REFERENCE_METERS,
            language: Language::default(),
        }
    }
}

impl Settings {
    /// Replaces values that cannot be used with their defaults.
    pub fn validate(&mut self) {
        if !self.reference_meters.is_finite() || self.reference_meters <= 0.0 {
            self.reference_meters = DEFAULT_REFERENCE_METERS;
        }
        if self.bindings.validate().is_err() {
            self.bindings = HotkeyBindings::default();
        }
    }
}

/// Parse a manually typed calibration value (pixels per reference length).
///
/// Accepts `.` or `,` as decimal separator. Rejects anything that is not a
/// positive finite number.
pub fn parse_calibration_input(input: &str) -> Result<Calibration, ConfigError> {
    let normalized = input.trim().replace(',', ".");
    normalized
        .parse::<f64>()
        .ok()
        .and_then(Calibration::new)
        .ok_or_else(|| ConfigError::InvalidCalibration(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::hotkey::{HotkeyAction, Key};

    #[test]
    fn validate_restores_bad_reference_length() {
        let mut s = Settings {
            reference_meters: -5.0,
            ..Settings::default()
        };
        s.validate();
        assert_eq!(s.reference_meters, DEFAULT_REFERENCE_METERS);
    }

    #[test]
    fn validate_resets_conflicting_bindings() {
        let mut s = Settings::default();
        s.bindings = s.bindings.with_key(HotkeyAction::Clear, Key::F9);
        s.validate();
        assert_eq!(s.bindings, HotkeyBindings::default());
    }

    #[test]
    fn parse_calibration_accepts_comma_decimal() {
        let cal = parse_calibration_input(" 312,5 ").unwrap();
        assert_eq!(cal.reference_pixels(), 312.5);
    }

    #[test]
    fn parse_calibration_rejects_garbage_and_non_positive() {
        assert!(parse_calibration_input("abc").is_err());
        assert!(parse_calibration_input("0").is_err());
        assert!(parse_calibration_input("-10").is_err());
        assert!(parse_calibration_input("").is_err());
    }
}
