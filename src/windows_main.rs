//! Windows-specific entry point and message loop.
//!
//! Hotkey and tray messages only publish events. A 16 ms timer drains the
//! event bus into the controller and redraws the overlay when something
//! changed.

use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::Graphics::Direct2D::{D2D1CreateFactory, D2D1_FACTORY_TYPE_SINGLE_THREADED};
use windows::Win32::Graphics::DirectWrite::{DWriteCreateFactory, DWRITE_FACTORY_TYPE_SHARED};
use windows::Win32::System::Com::{CoInitializeEx, CoUninitialize, COINIT_APARTMENTTHREADED};
use windows::Win32::UI::HiDpi::{SetProcessDpiAwareness, PROCESS_PER_MONITOR_DPI_AWARE};
use windows::Win32::UI::WindowsAndMessaging::{
    DefWindowProcW, DispatchMessageW, GetMessageW, PostQuitMessage, SetTimer, TranslateMessage,
    MSG, WM_COMMAND, WM_CREATE, WM_DESTROY, WM_HOTKEY, WM_LBUTTONDBLCLK, WM_RBUTTONUP, WM_TIMER,
};

use rangefinder::app::{Controller, Flow};
use rangefinder::events::publish;
use rangefinder::handlers::dispatch_events;
use rangefinder::input::{hotkey_event, HotkeyRegistry};
use rangefinder::model::constants::*;
use rangefinder::platform::windows::app::STATE;
use rangefinder::platform::windows::input::{cursor_position, Win32HotkeyBackend};
use rangefinder::platform::windows::ui::overlay::{OverlayWindow, D2D_FACTORY, DWRITE_FACTORY};
use rangefinder::platform::windows::ui::tray::{self, WM_TRAYICON};
use rangefinder::storage::ConfigStore;
use rangefinder::{AppError, AppEvent};

/// Main entry point for Windows.
pub fn run() {
    if let Err(e) = run_app() {
        log::error!("Rangefinder error: {e}");
        std::process::exit(1);
    }
}

fn run_app() -> Result<(), AppError> {
    unsafe {
        // Cursor positions and overlay pixels must both be physical pixels.
        if let Err(e) = SetProcessDpiAwareness(PROCESS_PER_MONITOR_DPI_AWARE) {
            log::debug!("SetProcessDpiAwareness: {e}");
        }

        CoInitializeEx(None, COINIT_APARTMENTTHREADED)
            .ok()
            .map_err(platform)?;

        let factory = D2D1CreateFactory(D2D1_FACTORY_TYPE_SINGLE_THREADED, None).map_err(platform)?;
        D2D_FACTORY.with(|f| *f.borrow_mut() = Some(factory));

        let dwrite_factory = DWriteCreateFactory(DWRITE_FACTORY_TYPE_SHARED).map_err(platform)?;
        DWRITE_FACTORY.with(|f| *f.borrow_mut() = Some(dwrite_factory));

        let overlay = OverlayWindow::create(Some(wndproc)).map_err(platform)?;
        let Some(hwnd) = overlay.hwnd() else {
            return Ok(());
        };

        let store = ConfigStore::open_default();
        let language = store.settings().language;
        let hotkeys = HotkeyRegistry::new(Win32HotkeyBackend::new(hwnd));

        tray::install_tray_icon(hwnd, language);

        STATE.with(|s| {
            let state = &mut *s.borrow_mut();
            let mut controller = Controller::new(overlay, hotkeys, store);
            controller.start(&mut state.board);
            controller
                .overlay_mut()
                .render_if_dirty(&mut state.board, language);
            state.tray_language = language;
            state.controller = Some(controller);
        });

        SetTimer(Some(hwnd), TIMER_DISPATCH, TIMER_INTERVAL_MS, None);

        let mut msg = MSG::default();
        while GetMessageW(&mut msg, None, 0, 0).as_bool() {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }

        // The loop also ends when Windows destroys the window (log-off);
        // make sure hotkeys are released and settings saved either way.
        let controller = STATE.with(|s| s.borrow_mut().controller.take());
        if let Some(mut controller) = controller {
            controller.shutdown();
        }
        tray::remove_tray_icon();

        DWRITE_FACTORY.with(|f| *f.borrow_mut() = None);
        D2D_FACTORY.with(|f| *f.borrow_mut() = None);

        CoUninitialize();

        Ok(())
    }
}

fn platform(e: windows::core::Error) -> AppError {
    AppError::Platform(e.to_string())
}

/// Drain pending events and redraw. Runs on every timer tick.
fn on_timer() {
    STATE.with(|s| {
        // A modal tray menu can deliver timer ticks while the state is borrowed.
        let Ok(mut guard) = s.try_borrow_mut() else {
            return;
        };
        let state = &mut *guard;
        let Some(controller) = state.controller.as_mut() else {
            return;
        };

        if dispatch_events(controller, &mut state.board) == Flow::Exit {
            state.controller = None;
            return;
        }

        let language = controller.language();
        if language != state.tray_language {
            tray::update_tray_language(language);
            state.tray_language = language;
        }
        controller
            .overlay_mut()
            .render_if_dirty(&mut state.board, language);
    });
}

extern "system" fn wndproc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    unsafe {
        match msg {
            WM_CREATE => LRESULT(0),

            WM_TIMER => {
                if wparam.0 == TIMER_DISPATCH {
                    on_timer();
                }
                LRESULT(0)
            }

            WM_HOTKEY => {
                if let Some(event) = hotkey_event(wparam.0 as i32, cursor_position) {
                    publish(event);
                }
                LRESULT(0)
            }

            WM_DESTROY => {
                tray::remove_tray_icon();
                PostQuitMessage(0);
                LRESULT(0)
            }

            msg if msg == WM_TRAYICON => {
                match lparam.0 as u32 {
                    WM_RBUTTONUP => tray::show_tray_menu(hwnd),
                    WM_LBUTTONDBLCLK => publish(AppEvent::ClearAll),
                    _ => {}
                }
                LRESULT(0)
            }

            WM_COMMAND => {
                let cmd = (wparam.0 & 0xFFFF) as u32;
                if !tray::handle_menu_command(cmd) {
                    return DefWindowProcW(hwnd, msg, wparam, lparam);
                }
                LRESULT(0)
            }

            _ => DefWindowProcW(hwnd, msg, wparam, lparam),
        }
    }
}
