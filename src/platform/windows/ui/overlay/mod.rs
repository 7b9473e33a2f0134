//! Overlay window and its Direct2D renderer.

pub mod renderer;
pub mod window;

pub use renderer::{D2D_FACTORY, DWRITE_FACTORY};
pub use window::{virtual_screen, OverlayWindow};
