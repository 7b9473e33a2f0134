//! System tray (notification area) icon for Windows.
//!
//! The overlay never takes focus, so the tray menu is the only place to
//! clear markers, switch language or quit with the mouse.

use std::cell::RefCell;

use windows::core::PCWSTR;
use windows::Win32::Foundation::{HWND, POINT};
use windows::Win32::UI::Shell::{
    Shell_NotifyIconW, NIF_ICON, NIF_MESSAGE, NIF_TIP, NIM_ADD, NIM_DELETE, NOTIFYICONDATAW,
};
use windows::Win32::UI::WindowsAndMessaging::{
    AppendMenuW, CreatePopupMenu, DestroyMenu, GetCursorPos, LoadIconW, SetForegroundWindow,
    TrackPopupMenu, HMENU, IDI_APPLICATION, MF_SEPARATOR, MF_STRING, TPM_BOTTOMALIGN,
    TPM_LEFTALIGN, TPM_RIGHTBUTTON, WM_USER,
};

use crate::events::{publish, AppEvent};
use crate::i18n::{tr_key, Language};

/// Custom message for tray icon events.
pub const WM_TRAYICON: u32 = WM_USER + 1;

// Menu item IDs
pub const MENU_CLEAR: u32 = 1001;
pub const MENU_LANGUAGE: u32 = 1002;
pub const MENU_QUIT: u32 = 1003;

const TRAY_ICON_ID: u32 = 1;

thread_local! {
    static TRAY_HWND: RefCell<Option<HWND>> = const { RefCell::new(None) };
    static TRAY_MENU: RefCell<Option<HMENU>> = const { RefCell::new(None) };
}

fn wide(text: &str) -> Vec<u16> {
    text.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Install the tray icon and build its menu in `language`.
pub fn install_tray_icon(hwnd: HWND, language: Language) {
    unsafe {
        TRAY_HWND.with(|h| *h.borrow_mut() = Some(hwnd));

        let hicon = LoadIconW(None, IDI_APPLICATION).unwrap_or_default();

        let mut nid = NOTIFYICONDATAW {
            cbSize: std::mem::size_of::<NOTIFYICONDATAW>() as u32,
            hWnd: hwnd,
            uID: TRAY_ICON_ID,
            uFlags: NIF_ICON | NIF_MESSAGE | NIF_TIP,
            uCallbackMessage: WM_TRAYICON,
            hIcon: hicon,
            ..Default::default()
        };

        let tip: Vec<u16> = "Rangefinder".encode_utf16().collect();
        for (i, &c) in tip.iter().enumerate().take(127) {
            nid.szTip[i] = c;
        }

        if !Shell_NotifyIconW(NIM_ADD, &nid).as_bool() {
            log::warn!("Could not add tray icon");
        }
    }

    update_tray_language(language);
}

/// Remove the tray icon and destroy its menu.
pub fn remove_tray_icon() {
    TRAY_HWND.with(|h| {
        if let Some(hwnd) = h.borrow_mut().take() {
            unsafe {
                let nid = NOTIFYICONDATAW {
                    cbSize: std::mem::size_of::<NOTIFYICONDATAW>() as u32,
                    hWnd: hwnd,
                    uID: TRAY_ICON_ID,
                    ..Default::default()
                };
                let _ = Shell_NotifyIconW(NIM_DELETE, &nid);
            }
        }
    });

    TRAY_MENU.with(|m| {
        if let Some(menu) = m.borrow_mut().take() {
            unsafe {
                let _ = DestroyMenu(menu);
            }
        }
    });
}

/// Show the context menu at the cursor position.
pub fn show_tray_menu(hwnd: HWND) {
    TRAY_MENU.with(|m| {
        if let Some(menu) = *m.borrow() {
            unsafe {
                let mut pt = POINT::default();
                let _ = GetCursorPos(&mut pt);

                // Required for the menu to close when clicking outside
                let _ = SetForegroundWindow(hwnd);

                let _ = TrackPopupMenu(
                    menu,
                    TPM_BOTTOMALIGN | TPM_LEFTALIGN | TPM_RIGHTBUTTON,
                    pt.x,
                    pt.y,
                    None,
                    hwnd,
                    None,
                );
            }
        }
    });
}

/// Rebuild the menu with labels in `language`.
pub fn update_tray_language(language: Language) {
    TRAY_MENU.with(|m| {
        if let Some(old_menu) = m.borrow_mut().take() {
            unsafe {
                let _ = DestroyMenu(old_menu);
            }
        }
    });

    unsafe {
        let Ok(menu) = CreatePopupMenu() else {
            log::warn!("CreatePopupMenu failed");
            return;
        };
        for (id, key) in [(MENU_CLEAR, "Clear markers"), (MENU_LANGUAGE, "Language")] {
            let label = wide(&tr_key(key, language));
            let _ = AppendMenuW(menu, MF_STRING, id as usize, PCWSTR(label.as_ptr()));
        }
        let _ = AppendMenuW(menu, MF_SEPARATOR, 0, PCWSTR::null());
        let quit = wide(&tr_key("Quit", language));
        let _ = AppendMenuW(menu, MF_STRING, MENU_QUIT as usize, PCWSTR(quit.as_ptr()));

        TRAY_MENU.with(|m| *m.borrow_mut() = Some(menu));
    }
}

/// Translate a menu command into an event. Returns false for unknown ids.
pub fn handle_menu_command(id: u32) -> bool {
    let event = match id {
        MENU_CLEAR => AppEvent::ClearAll,
        MENU_LANGUAGE => AppEvent::ToggleLanguage,
        MENU_QUIT => AppEvent::Shutdown,
        _ => return false,
    };
    publish(event);
    true
}
