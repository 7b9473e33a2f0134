//! Tests for the coordinate math.

use rangefinder::model::{distance, scale_to_meters, Calibration, ScreenPoint};

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn p(x: f64, y: f64) -> ScreenPoint {
    ScreenPoint::new(x, y)
}

#[test]
fn distance_is_symmetric() {
    let pairs = [
        (p(0.0, 0.0), p(3.0, 4.0)),
        (p(-1920.0, 200.5), p(1000.25, -33.0)),
        (p(7.0, 7.0), p(7.0, -7.0)),
    ];
    for (a, b) in pairs {
        assert_eq!(distance(a, b), distance(b, a));
    }
}

#[test]
fn distance_to_self_is_zero() {
    for point in [p(0.0, 0.0), p(-500.0, 12.5), p(3840.0, 2160.0)] {
        assert_eq!(distance(point, point), 0.0);
    }
}

#[test]
fn distance_three_four_five() {
    assert!(approx_eq(distance(p(0.0, 0.0), p(3.0, 4.0)), 5.0));
}

#[test]
fn distance_across_negative_coordinates() {
    assert!(approx_eq(distance(p(-100.0, 0.0), p(100.0, 0.0)), 200.0));
}

#[test]
fn scale_of_reference_is_reference_exactly() {
    for d in [1.0, 17.3, 300.0, 1234.5678] {
        for r in [1.0, 100.0, 250.0] {
            assert_eq!(scale_to_meters(d, d, r), Some(r));
        }
    }
}

#[test]
fn scale_is_linear() {
    assert_eq!(scale_to_meters(150.0, 300.0, 100.0), Some(50.0));
    assert_eq!(scale_to_meters(600.0, 300.0, 100.0), Some(200.0));
}

#[test]
fn scale_without_usable_reference_is_none() {
    assert_eq!(scale_to_meters(10.0, 0.0, 100.0), None);
    assert_eq!(scale_to_meters(10.0, -5.0, 100.0), None);
    assert_eq!(scale_to_meters(10.0, f64::NAN, 100.0), None);
}

#[test]
fn calibration_from_points_measures_pixels() {
    let cal = Calibration::from_points(p(0.0, 0.0), p(300.0, 0.0)).unwrap();
    assert_eq!(cal.reference_pixels(), 300.0);
    assert_eq!(cal.to_meters(150.0, 100.0), 50.0);
}
