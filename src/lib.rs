//! Rangefinder: in-game distance measurement on a transparent overlay.
//!
//! Calibrate once by marking a stretch of known length (100 m by default),
//! then measure any two points on screen with a global hotkey. Markers,
//! lines and distances are drawn on a click-through window above the game.
//!
//! Everything except `platform` is portable and tested on every target.

pub mod app;
pub mod engine;
pub mod error;
pub mod events;
pub mod handlers;
pub mod i18n;
pub mod input;
pub mod logging;
pub mod model;
pub mod overlay;
pub mod storage;

#[cfg(target_os = "windows")]
pub mod platform;

pub use app::{Controller, Flow, StatusBoard, StatusSink};
pub use engine::{EngineEvent, MeasurementEngine, MeasurementResult};
pub use error::{AppError, ConfigError, EngineError};
pub use events::{AppEvent, EventBus, EventPublisher};
pub use i18n::{tr_key, Language};
