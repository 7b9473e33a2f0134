//! Screen-space geometry: points, pixel distances and meter scaling.

/// A position on the virtual desktop (the union of all monitors).
///
/// Coordinates come straight from the OS cursor position and may be
/// negative when a monitor sits left of or above the primary one.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point halfway between `self` and `other`.
    pub fn midpoint(self, other: ScreenPoint) -> ScreenPoint {
        ScreenPoint::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Point translated by `(dx, dy)`.
    pub fn offset(self, dx: f64, dy: f64) -> ScreenPoint {
        ScreenPoint::new(self.x + dx, self.y + dy)
    }
}

impl From<(i32, i32)> for ScreenPoint {
    fn from((x, y): (i32, i32)) -> Self {
        ScreenPoint::new(x as f64, y as f64)
    }
}

/// Euclidean distance in pixels. Symmetric, and zero for identical points.
pub fn distance(a: ScreenPoint, b: ScreenPoint) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Convert a pixel distance into meters given a reference pair.
///
/// Returns `None` when `reference_pixels` is not a positive finite number,
/// since no scale can be derived from it.
pub fn scale_to_meters(
    pixel_distance: f64,
    reference_pixels: f64,
    reference_meters: f64,
) -> Option<f64> {
    if !reference_pixels.is_finite() || reference_pixels <= 0.0 {
        return None;
    }
    Some(pixel_distance / reference_pixels * reference_meters)
}

/// A usable pixel-to-meter calibration.
///
/// Holds the pixel length of the reference distance. Can only be built
/// from a positive finite value, so holding one means measuring is allowed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    reference_pixels: f64,
}

impl Calibration {
    pub fn new(reference_pixels: f64) -> Option<Self> {
        if reference_pixels.is_finite() && reference_pixels > 0.0 {
            Some(Self { reference_pixels })
        } else {
            None
        }
    }

    /// Calibration derived from two points spanning the reference distance.
    pub fn from_points(a: ScreenPoint, b: ScreenPoint) -> Option<Self> {
        Self::new(distance(a, b))
    }

    /// Pixel length of the reference distance.
    pub fn reference_pixels(&self) -> f64 {
        self.reference_pixels
    }

    /// Meters spanned by `pixel_distance` when the reference is `reference_meters` long.
    pub fn to_meters(&self, pixel_distance: f64, reference_meters: f64) -> f64 {
        pixel_distance / self.reference_pixels * reference_meters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midpoint_is_halfway() {
        let m = ScreenPoint::new(0.0, 0.0).midpoint(ScreenPoint::new(10.0, -4.0));
        assert_eq!(m, ScreenPoint::new(5.0, -2.0));
    }

    #[test]
    fn point_from_cursor_tuple() {
        assert_eq!(ScreenPoint::from((-1920, 35)), ScreenPoint::new(-1920.0, 35.0));
    }

    #[test]
    fn calibration_rejects_non_positive_and_nan() {
        assert!(Calibration::new(0.0).is_none());
        assert!(Calibration::new(-3.0).is_none());
        assert!(Calibration::new(f64::NAN).is_none());
        assert!(Calibration::new(f64::INFINITY).is_none());
        assert!(Calibration::new(0.5).is_some());
    }

    #[test]
    fn calibration_from_identical_points_is_none() {
        let p = ScreenPoint::new(12.0, 12.0);
        assert!(Calibration::from_points(p, p).is_none());
    }

    #[test]
    fn calibration_agrees_with_scale_to_meters() {
        let cal = Calibration::new(250.0).unwrap();
        assert_eq!(
            Some(cal.to_meters(75.0, 100.0)),
            scale_to_meters(75.0, 250.0, 100.0)
        );
    }
}
