//! RegisterHotKey-based hotkey backend.

use windows::Win32::Foundation::{HWND, POINT};
use windows::Win32::UI::Input::KeyboardAndMouse::{RegisterHotKey, UnregisterHotKey, MOD_NOREPEAT};
use windows::Win32::UI::WindowsAndMessaging::GetCursorPos;

use crate::input::HotkeyBackend;
use crate::model::{Key, ScreenPoint};

/// Reserves keys for a window; presses arrive as WM_HOTKEY on it.
///
/// MOD_NOREPEAT keeps a held key from producing a stream of points.
#[derive(Debug)]
pub struct Win32HotkeyBackend {
    hwnd: HWND,
}

impl Win32HotkeyBackend {
    pub fn new(hwnd: HWND) -> Self {
        Self { hwnd }
    }
}

impl HotkeyBackend for Win32HotkeyBackend {
    fn reserve(&mut self, id: i32, key: Key) -> bool {
        unsafe { RegisterHotKey(Some(self.hwnd), id, MOD_NOREPEAT, key.virtual_key_code()) }
            .is_ok()
    }

    fn release(&mut self, id: i32) {
        unsafe {
            let _ = UnregisterHotKey(Some(self.hwnd), id);
        }
    }
}

/// Cursor position in desktop coordinates.
pub fn cursor_position() -> Option<ScreenPoint> {
    let mut pt = POINT::default();
    unsafe { GetCursorPos(&mut pt) }.ok()?;
    Some(ScreenPoint::from((pt.x, pt.y)))
}
