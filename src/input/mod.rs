//! Input handling.
//!
//! - hotkeys.rs: global hotkey registration and hotkey id translation
//!
//! The Win32 backend lives in `platform::windows::input`.

pub mod hotkeys;

pub use hotkeys::{
    hotkey_event, HotkeyBackend, HotkeyListener, HotkeyRegistry, RegistrationReport,
};
