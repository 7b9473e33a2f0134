//! Input handling for Windows.

pub mod hotkeys;

pub use hotkeys::{cursor_position, Win32HotkeyBackend};
