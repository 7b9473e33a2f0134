//! Configuration constants and default values.
//!
//! This module contains all application constants including calibration
//! defaults, hotkey identifiers, overlay layout metrics and config keys.

// === Calibration ===

/// Default real-world length of the calibration reference, in meters.
pub const DEFAULT_REFERENCE_METERS: f64 = 100.0;

// === Hotkeys ===

/// OS hotkey id reserved for the Measure action.
pub const HOTKEY_MEASURE_ID: i32 = 9000;

/// OS hotkey id reserved for the Clear action.
pub const HOTKEY_CLEAR_ID: i32 = 9001;

/// OS hotkey id reserved for the Calibrate action.
pub const HOTKEY_CALIBRATE_ID: i32 = 9002;

// === Markers ===

/// Marker circle radius in pixels.
pub const MARKER_RADIUS: f32 = 8.0;

/// Width of the white outline around a marker.
pub const MARKER_OUTLINE_WIDTH: f32 = 3.0;

/// Offset from the marker center to the top-left corner of its label.
pub const MARKER_LABEL_OFFSET: (f64, f64) = (15.0, -25.0);

/// Font size of marker labels ("1", "2", "A", "B").
pub const MARKER_LABEL_FONT_SIZE: f32 = 18.0;

/// Horizontal and vertical padding inside a marker label box.
pub const MARKER_LABEL_PADDING: (f32, f32) = (6.0, 3.0);

// === Lines ===

/// Stroke width of the line joining two points.
pub const LINE_WIDTH: f32 = 4.0;

/// Offset from the line midpoint to the top-left corner of the distance label.
pub const DISTANCE_LABEL_OFFSET: (f64, f64) = (10.0, -10.0);

/// Font size of distance labels.
pub const DISTANCE_LABEL_FONT_SIZE: f32 = 16.0;

/// Horizontal and vertical padding inside a distance label box.
pub const DISTANCE_LABEL_PADDING: (f32, f32) = (5.0, 2.0);

/// Alpha of the dark box behind every label (0-255).
pub const LABEL_BACKGROUND_ALPHA: u8 = 200;

// === Status HUD ===

/// Width of the status panel drawn in the top-right corner of the primary monitor.
pub const HUD_WIDTH: f32 = 380.0;

/// Distance between the status panel and the primary monitor edges.
pub const HUD_MARGIN: f32 = 20.0;

/// Font size of the status panel lines.
pub const HUD_FONT_SIZE: f32 = 14.0;

// === Event loop ===

/// Timer id used to drain the event bus.
pub const TIMER_DISPATCH: usize = 1;

/// Event bus drain interval (~60 FPS).
pub const TIMER_INTERVAL_MS: u32 = 16;

// === Persistence ===

/// Directory created under the platform config dir.
pub const APP_DIR_NAME: &str = "Rangefinder";

/// Settings file name.
pub const CONFIG_FILE_NAME: &str = "config.json";
