//! The layered, click-through window that hosts the overlay.

use windows::core::{w, PCWSTR};
use windows::Win32::Foundation::HWND;
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DestroyWindow, GetSystemMetrics, IsWindow, LoadCursorW, RegisterClassW,
    ShowWindow, CS_HREDRAW, CS_VREDRAW, IDC_ARROW, SM_CXSCREEN, SM_CXVIRTUALSCREEN,
    SM_CYVIRTUALSCREEN, SM_XVIRTUALSCREEN, SM_YVIRTUALSCREEN, SW_SHOWNOACTIVATE, WNDCLASSW,
    WNDPROC, WS_EX_LAYERED, WS_EX_NOACTIVATE, WS_EX_TOOLWINDOW, WS_EX_TOPMOST,
    WS_EX_TRANSPARENT, WS_POPUP,
};

use super::renderer::{render, Frame};
use crate::app::StatusBoard;
use crate::i18n::Language;
use crate::model::ScreenPoint;
use crate::overlay::{Color, OverlaySurface, Scene, Viewport};

const CLASS_NAME: PCWSTR = w!("RangefinderOverlay");

/// Rectangle covering every monitor, in desktop coordinates.
pub fn virtual_screen() -> Viewport {
    unsafe {
        Viewport::new(
            GetSystemMetrics(SM_XVIRTUALSCREEN),
            GetSystemMetrics(SM_YVIRTUALSCREEN),
            GetSystemMetrics(SM_CXVIRTUALSCREEN),
            GetSystemMetrics(SM_CYVIRTUALSCREEN),
        )
    }
}

/// Transparent, topmost window spanning the virtual desktop.
///
/// WS_EX_TRANSPARENT and WS_EX_LAYERED keep it out of hit-testing, so every
/// click reaches the game below. WS_EX_NOACTIVATE keeps it from taking
/// focus and WS_EX_TOOLWINDOW keeps it off the taskbar and Alt+Tab.
pub struct OverlayWindow {
    hwnd: Option<HWND>,
    viewport: Viewport,
    primary_width: i32,
    scene: Scene,
}

impl OverlayWindow {
    /// Register the window class and create the (still hidden) window.
    pub fn create(wndproc: WNDPROC) -> windows::core::Result<Self> {
        unsafe {
            let instance = GetModuleHandleW(None)?;

            let wc = WNDCLASSW {
                style: CS_HREDRAW | CS_VREDRAW,
                lpfnWndProc: wndproc,
                hInstance: instance.into(),
                hCursor: LoadCursorW(None, IDC_ARROW)?,
                lpszClassName: CLASS_NAME,
                ..Default::default()
            };
            RegisterClassW(&wc);

            let viewport = virtual_screen();
            let ex_style = WS_EX_LAYERED
                | WS_EX_TRANSPARENT
                | WS_EX_TOPMOST
                | WS_EX_NOACTIVATE
                | WS_EX_TOOLWINDOW;

            let hwnd = CreateWindowExW(
                ex_style,
                CLASS_NAME,
                w!("Rangefinder Overlay"),
                WS_POPUP,
                viewport.x,
                viewport.y,
                viewport.width,
                viewport.height,
                None,
                None,
                Some(instance.into()),
                None,
            )?;

            log::info!(
                "Overlay window {}x{} at ({}, {})",
                viewport.width,
                viewport.height,
                viewport.x,
                viewport.y
            );

            Ok(Self {
                hwnd: Some(hwnd),
                viewport,
                primary_width: GetSystemMetrics(SM_CXSCREEN),
                scene: Scene::new(),
            })
        }
    }

    pub fn hwnd(&self) -> Option<HWND> {
        self.hwnd
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Redraw if the scene or the status board changed since the last frame.
    pub fn render_if_dirty(&mut self, board: &mut StatusBoard, language: Language) {
        let scene_dirty = self.scene.take_dirty();
        let board_dirty = board.take_dirty();
        if scene_dirty || board_dirty {
            self.render(board, language);
        }
    }

    /// Redraw unconditionally.
    pub fn render(&self, board: &StatusBoard, language: Language) {
        let Some(hwnd) = self.hwnd else {
            return;
        };
        render(&Frame {
            hwnd,
            viewport: self.viewport,
            primary_width: self.primary_width,
            scene: &self.scene,
            board,
            language,
        });
    }
}

impl OverlaySurface for OverlayWindow {
    fn add_marker(&mut self, point: ScreenPoint, color: Color, label: &str) {
        if !self.viewport.contains(point) {
            log::debug!("marker at ({}, {}) is off-screen", point.x, point.y);
        }
        self.scene.add_marker(point, color, label);
    }

    fn add_line(&mut self, from: ScreenPoint, to: ScreenPoint, color: Color, meters: f64) {
        self.scene.add_line(from, to, color, meters);
    }

    fn clear(&mut self) {
        self.scene.clear();
    }

    fn show(&mut self) {
        self.scene.show();
        if let Some(hwnd) = self.hwnd {
            unsafe {
                let _ = ShowWindow(hwnd, SW_SHOWNOACTIVATE);
            }
        }
    }

    fn close(&mut self) {
        self.scene.close();
        if let Some(hwnd) = self.hwnd.take() {
            unsafe {
                if IsWindow(Some(hwnd)).as_bool() {
                    if let Err(e) = DestroyWindow(hwnd) {
                        log::warn!("DestroyWindow failed: {e}");
                    }
                }
            }
        }
    }
}
