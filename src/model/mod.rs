//! Application domain model.
//!
//! This module contains pure business logic (no FFI dependencies)
//! including geometry, hotkey bindings, the interaction session types,
//! settings and configuration constants.
//!
//! Persistence is in `storage`, platform glue in `platform::windows`.

pub mod constants;
pub mod geometry;
pub mod hotkey;
pub mod session;
pub mod settings;

pub use constants::*;
pub use geometry::{distance, scale_to_meters, Calibration, ScreenPoint};
pub use hotkey::{HotkeyAction, HotkeyBindings, Key};
pub use session::{Mode, PairProgress, PointPair};
pub use settings::{parse_calibration_input, Settings};
