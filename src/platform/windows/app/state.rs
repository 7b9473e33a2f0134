//! Windows runtime state.
//!
//! The window procedure is a free function, so the controller and the
//! status board live in a thread-local owned by the UI thread.

use std::cell::RefCell;

use crate::app::{Controller, StatusBoard};
use crate::i18n::Language;
use crate::input::HotkeyRegistry;
use crate::platform::windows::input::Win32HotkeyBackend;
use crate::platform::windows::ui::overlay::OverlayWindow;

pub type AppController = Controller<OverlayWindow, HotkeyRegistry<Win32HotkeyBackend>>;

#[derive(Default)]
pub struct WindowsRuntimeState {
    /// `None` before start-up and after shutdown.
    pub controller: Option<AppController>,
    pub board: StatusBoard,
    /// Language the tray menu was last built in.
    pub tray_language: Language,
}

thread_local! {
    pub static STATE: RefCell<WindowsRuntimeState> = RefCell::new(WindowsRuntimeState::default());
}
