use patternkit_core::Point;
use patternkit_designer::{bezier_between, smooth_curve};
use proptest::prelude::*;

#[test]
fn test_three_point_arch() {
    let pts = [
        Point::new(0.0, 0.0),
        Point::new(5.0, 10.0),
        Point::new(10.0, 0.0),
    ];
    let out = smooth_curve(&pts, 5);

    assert_eq!(out.len(), 5);
    assert_eq!(out[0], Point::new(0.0, 0.0));
    assert_eq!(out[4], Point::new(10.0, 0.0));
    // Symmetric knots give a symmetric curve.
    assert!((out[1].y - out[3].y).abs() < 1e-9);
    assert!((out[1].x + out[3].x - 10.0).abs() < 1e-9);
}

#[test]
fn test_quarter_bezier_sample() {
    let out = bezier_between(
        Point::new(0.0, 0.0),
        Point::new(8.0, 0.0),
        Point::new(4.0, 8.0),
        5,
    );
    // t = 0.25: 0.5625 * start + 0.375 * control + 0.0625 * end
    assert!(out[1].approx_eq(Point::new(2.0, 3.0), 1e-12));
}

#[test]
fn test_bezier_with_degenerate_sample_count() {
    let out = bezier_between(Point::new(1.0, 1.0), Point::new(2.0, 2.0), Point::new(0.0, 5.0), 1);
    assert_eq!(out.len(), 2);
}

fn point_strategy() -> impl Strategy<Value = Point> {
    (-100.0..100.0f64, -100.0..100.0f64).prop_map(|(x, y)| Point::new(x, y))
}

proptest! {
    #[test]
    fn prop_spline_endpoints_are_exact(
        pts in prop::collection::vec(point_strategy(), 3..12),
        samples in 2usize..80,
    ) {
        let out = smooth_curve(&pts, samples);
        prop_assert_eq!(out.len(), samples);
        prop_assert_eq!(out[0], pts[0]);
        prop_assert_eq!(out[samples - 1], pts[pts.len() - 1]);
    }

    #[test]
    fn prop_bezier_matches_closed_form(
        start in point_strategy(),
        control in point_strategy(),
        end in point_strategy(),
    ) {
        let out = bezier_between(start, end, control, 3);
        let mid = Point::new(
            0.25 * start.x + 0.5 * control.x + 0.25 * end.x,
            0.25 * start.y + 0.5 * control.y + 0.25 * end.y,
        );
        prop_assert!(out[0].approx_eq(start, 1e-9));
        prop_assert!(out[1].approx_eq(mid, 1e-9));
        prop_assert!(out[2].approx_eq(end, 1e-9));
    }
}
