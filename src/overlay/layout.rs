//! Pixel placement of overlay elements.
//!
//! Annotations are stored in virtual-desktop coordinates; the overlay window
//! starts at the virtual desktop origin, which is negative when a monitor
//! sits left of or above the primary one. Everything here converts to
//! window-local pixels.

use crate::i18n::Language;
use crate::model::constants::*;
use crate::model::ScreenPoint;

/// The overlay window rectangle in virtual-desktop coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Window-local pixel position of a desktop point.
    pub fn to_local(&self, p: ScreenPoint) -> (f32, f32) {
        ((p.x - self.x as f64) as f32, (p.y - self.y as f64) as f32)
    }

    pub fn contains(&self, p: ScreenPoint) -> bool {
        let (lx, ly) = self.to_local(p);
        lx >= 0.0 && ly >= 0.0 && lx < self.width as f32 && ly < self.height as f32
    }

    /// Top-left corner of the status panel: top-right of the primary
    /// monitor, which always starts at desktop (0, 0).
    pub fn hud_origin(&self, primary_width: i32) -> (f32, f32) {
        let (px, py) = self.to_local(ScreenPoint::new(0.0, 0.0));
        let x = px + primary_width as f32 - HUD_WIDTH - HUD_MARGIN;
        (x.max(px + HUD_MARGIN), py + HUD_MARGIN)
    }
}

/// Placement of a text label with a dark background box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelBox {
    /// Window-local top-left corner of the background box.
    pub left: f32,
    pub top: f32,
    /// Horizontal and vertical padding between box edge and text.
    pub padding: (f32, f32),
    pub font_size: f32,
}

impl LabelBox {
    /// Label next to a marker ("1", "A", ...).
    pub fn for_marker(center: ScreenPoint, viewport: &Viewport) -> Self {
        let (dx, dy) = MARKER_LABEL_OFFSET;
        let (left, top) = viewport.to_local(center.offset(dx, dy));
        Self {
            left,
            top,
            padding: MARKER_LABEL_PADDING,
            font_size: MARKER_LABEL_FONT_SIZE,
        }
    }

    /// Distance label near the middle of a line.
    pub fn for_distance(from: ScreenPoint, to: ScreenPoint, viewport: &Viewport) -> Self {
        let (dx, dy) = DISTANCE_LABEL_OFFSET;
        let (left, top) = viewport.to_local(from.midpoint(to).offset(dx, dy));
        Self {
            left,
            top,
            padding: DISTANCE_LABEL_PADDING,
            font_size: DISTANCE_LABEL_FONT_SIZE,
        }
    }

    /// Background rectangle `(left, top, right, bottom)` for text of the given size.
    pub fn rect(&self, text_width: f32, text_height: f32) -> (f32, f32, f32, f32) {
        (
            self.left,
            self.top,
            self.left + text_width + 2.0 * self.padding.0,
            self.top + text_height + 2.0 * self.padding.1,
        )
    }

    /// Where the text itself starts.
    pub fn text_origin(&self) -> (f32, f32) {
        (self.left + self.padding.0, self.top + self.padding.1)
    }
}

/// Distance label text: one decimal place and a unit suffix.
pub fn format_distance(meters: f64, lang: Language) -> String {
    format!("{:.1} {}", meters, lang.meter_suffix())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_local_subtracts_negative_origin() {
        let vp = Viewport::new(-1920, -200, 3840, 1280);
        assert_eq!(vp.to_local(ScreenPoint::new(0.0, 0.0)), (1920.0, 200.0));
        assert_eq!(vp.to_local(ScreenPoint::new(-1920.0, -200.0)), (0.0, 0.0));
    }

    #[test]
    fn contains_checks_all_edges() {
        let vp = Viewport::new(0, 0, 100, 50);
        assert!(vp.contains(ScreenPoint::new(0.0, 0.0)));
        assert!(vp.contains(ScreenPoint::new(99.0, 49.0)));
        assert!(!vp.contains(ScreenPoint::new(100.0, 10.0)));
        assert!(!vp.contains(ScreenPoint::new(-1.0, 10.0)));
    }

    #[test]
    fn marker_label_sits_up_and_right() {
        let vp = Viewport::new(0, 0, 1920, 1080);
        let label = LabelBox::for_marker(ScreenPoint::new(100.0, 100.0), &vp);
        assert_eq!((label.left, label.top), (115.0, 75.0));
        assert_eq!(label.text_origin(), (121.0, 78.0));
    }

    #[test]
    fn distance_label_starts_near_midpoint() {
        let vp = Viewport::new(0, 0, 1920, 1080);
        let label =
            LabelBox::for_distance(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(200.0, 100.0), &vp);
        assert_eq!((label.left, label.top), (110.0, 40.0));
    }

    #[test]
    fn label_rect_includes_padding() {
        let vp = Viewport::new(0, 0, 1920, 1080);
        let label = LabelBox::for_marker(ScreenPoint::new(0.0, 100.0), &vp);
        assert_eq!(label.rect(10.0, 20.0), (15.0, 75.0, 37.0, 101.0));
    }

    #[test]
    fn distance_format_has_one_decimal_and_unit() {
        assert_eq!(format_distance(50.0, Language::English), "50.0 m");
        assert_eq!(format_distance(123.456, Language::Russian), "123.5 м");
    }

    #[test]
    fn hud_sits_in_primary_top_right() {
        let vp = Viewport::new(-1920, 0, 3840, 1080);
        let (x, y) = vp.hud_origin(1920);
        assert_eq!(y, HUD_MARGIN);
        assert_eq!(x, 1920.0 + 1920.0 - HUD_WIDTH - HUD_MARGIN);
    }
}
