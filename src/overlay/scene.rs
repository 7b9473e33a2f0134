//! Retained annotation list.

use super::{Color, OverlaySurface};
use crate::model::ScreenPoint;

/// One visual element on the overlay.
#[derive(Debug, Clone, PartialEq)]
pub enum Annotation {
    Marker {
        center: ScreenPoint,
        color: Color,
        label: String,
    },
    Line {
        from: ScreenPoint,
        to: ScreenPoint,
        color: Color,
        meters: f64,
    },
}

/// Everything currently drawn on the overlay.
///
/// Distances are stored as numbers and formatted at render time so that a
/// language switch updates existing labels too.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    annotations: Vec<Annotation>,
    visible: bool,
    dirty: bool,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns true once after every change, then resets.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Number of markers, for logs and tests.
    pub fn marker_count(&self) -> usize {
        self.annotations
            .iter()
            .filter(|a| matches!(a, Annotation::Marker { .. }))
            .count()
    }

    /// Number of lines, for logs and tests.
    pub fn line_count(&self) -> usize {
        self.annotations
            .iter()
            .filter(|a| matches!(a, Annotation::Line { .. }))
            .count()
    }
}

impl OverlaySurface for Scene {
    fn add_marker(&mut self, point: ScreenPoint, color: Color, label: &str) {
        self.annotations.push(Annotation::Marker {
            center: point,
            color,
            label: label.to_string(),
        });
        self.dirty = true;
    }

    fn add_line(&mut self, from: ScreenPoint, to: ScreenPoint, color: Color, meters: f64) {
        self.annotations.push(Annotation::Line {
            from,
            to,
            color,
            meters,
        });
        self.dirty = true;
    }

    fn clear(&mut self) {
        self.annotations.clear();
        self.dirty = true;
    }

    fn show(&mut self) {
        self.visible = true;
        self.dirty = true;
    }

    fn close(&mut self) {
        self.annotations.clear();
        self.visible = false;
        self.dirty = true;
    }
}
