//! Interaction mode and the point sequences collected in each mode.

use super::geometry::ScreenPoint;

/// Which point sequence absorbs the next captured point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Idle,
    Calibrating,
    Measuring,
}

/// Result of adding a point to a [`PointPair`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PairProgress {
    /// The point became the first of the pair.
    First(ScreenPoint),
    /// The point completed the pair.
    Complete(ScreenPoint, ScreenPoint),
}

/// Up to two points collected one hotkey press at a time.
///
/// Used for both the calibration and the measurement sequence.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointPair {
    first: Option<ScreenPoint>,
    second: Option<ScreenPoint>,
}

impl PointPair {
    pub fn first(&self) -> Option<ScreenPoint> {
        self.first
    }

    pub fn second(&self) -> Option<ScreenPoint> {
        self.second
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_none() && self.second.is_none()
    }

    pub fn is_complete(&self) -> bool {
        self.first.is_some() && self.second.is_some()
    }

    pub fn reset(&mut self) {
        *self = PointPair::default();
    }

    /// Add a point. A pair that is already complete starts over.
    pub fn push(&mut self, point: ScreenPoint) -> PairProgress {
        match (self.first, self.second) {
            (Some(first), None) => {
                self.second = Some(point);
                PairProgress::Complete(first, point)
            }
            _ => {
                self.first = Some(point);
                self.second = None;
                PairProgress::First(point)
            }
        }
    }
}
