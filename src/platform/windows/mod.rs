//! Windows backend: Win32 windowing, RegisterHotKey and Direct2D.
//!
//! - app: thread-local runtime state
//! - input: hotkey backend and cursor position
//! - ui: overlay window, renderer and tray icon

pub mod app;
pub mod input;
pub mod ui;
