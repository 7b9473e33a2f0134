//! The drawing surface that sits above every other window.
//!
//! The surface is transparent, topmost, spans the whole virtual desktop and
//! is excluded from hit-testing, so the game underneath keeps focus and
//! receives every click. This module holds the portable part:
//!
//! - [`OverlaySurface`]: what the measurement engine draws through
//! - [`Scene`]: retained list of annotations a platform window renders
//! - [`layout`]: pixel placement of markers, lines and labels
//!
//! The Win32 layered window lives in `platform::windows::ui::overlay`.

pub mod layout;
pub mod scene;

pub use layout::{format_distance, LabelBox, Viewport};
pub use scene::{Annotation, Scene};

use crate::model::ScreenPoint;

/// Straight RGBA colour, components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Calibration markers and line.
    pub const YELLOW: Color = Color::opaque(1.0, 1.0, 0.0);
    /// Measurement markers and line.
    pub const LIME: Color = Color::opaque(0.0, 1.0, 0.0);
    /// Marker outline and label text.
    pub const WHITE: Color = Color::opaque(1.0, 1.0, 1.0);
    /// Warnings in the status panel (#FF4444).
    pub const RED: Color = Color::opaque(1.0, 0.267, 0.267);

    const fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Same colour with a different alpha.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

/// A surface the engine can annotate.
///
/// Calls are side-effect only. Implementations must never take input
/// focus or intercept pointer events.
pub trait OverlaySurface {
    /// Draw a small circular marker with a text label next to it.
    fn add_marker(&mut self, point: ScreenPoint, color: Color, label: &str);

    /// Draw a line between two points with its length in meters at the midpoint.
    fn add_line(&mut self, from: ScreenPoint, to: ScreenPoint, color: Color, meters: f64);

    /// Remove every annotation.
    fn clear(&mut self);

    /// Make the surface visible.
    fn show(&mut self);

    /// Hide the surface and release its OS resources.
    fn close(&mut self);
}
