//! Curve reconstruction for pattern edges.
//!
//! Two strategies turn a handful of control points into a dense polyline:
//! a natural cubic spline through every input point, and a quadratic Bézier
//! between two endpoints pulled toward one control point.

use lyon::geom::{point, QuadraticBezierSegment};
use nalgebra::DMatrix;
use patternkit_core::Point;
use tracing::{debug, warn};

/// Fewest points a spline is fitted through. Shorter inputs are returned as-is.
pub const MIN_SPLINE_POINTS: usize = 3;

/// Smooth `points` with a natural cubic spline and resample it.
///
/// x(t) and y(t) are fitted independently over a uniform parameter t in [0, 1]
/// assigned in input order. The result has `sample_count` points (at least 2);
/// the first and last samples are exactly the first and last inputs.
///
/// When the spline system is singular or produces non-finite values, the input
/// is returned unchanged.
pub fn smooth_curve(points: &[Point], sample_count: usize) -> Vec<Point> {
    if points.len() < MIN_SPLINE_POINTS {
        return points.to_vec();
    }

    let Some(spline) = NaturalSpline::fit(points) else {
        warn!(
            "Spline fit failed for {} points, keeping unsmoothed outline",
            points.len()
        );
        return points.to_vec();
    };

    let sample_count = sample_count.max(2);
    let last = sample_count - 1;
    let mut samples = Vec::with_capacity(sample_count);

    for i in 0..sample_count {
        let sample = match i {
            0 => points[0],
            i if i == last => points[points.len() - 1],
            i => spline.evaluate(i as f64 / last as f64),
        };
        samples.push(sample);
    }

    if !samples.iter().all(Point::is_finite) {
        warn!("Spline produced non-finite samples, keeping unsmoothed outline");
        return points.to_vec();
    }

    debug!(
        "Smoothed {} control points into {} samples",
        points.len(),
        sample_count
    );
    samples
}

/// Sample the quadratic Bézier from `start` to `end` pulled toward `control`.
///
/// Returns `sample_count` points (at least 2) at evenly spaced t in [0, 1].
pub fn bezier_between(start: Point, end: Point, control: Point, sample_count: usize) -> Vec<Point> {
    let segment = QuadraticBezierSegment {
        from: point(start.x, start.y),
        ctrl: point(control.x, control.y),
        to: point(end.x, end.y),
    };

    let sample_count = sample_count.max(2);
    let last = (sample_count - 1) as f64;

    (0..sample_count)
        .map(|i| {
            let p = segment.sample(i as f64 / last);
            Point::new(p.x, p.y)
        })
        .collect()
}

/// Second-derivative form of a natural cubic spline over a uniform parameter.
struct NaturalSpline {
    /// Knot values, column 0 is x and column 1 is y
    knots: DMatrix<f64>,
    /// Second derivatives at each knot, same layout as `knots`
    moments: DMatrix<f64>,
    /// Uniform knot spacing
    h: f64,
}

impl NaturalSpline {
    fn fit(points: &[Point]) -> Option<Self> {
        let n = points.len();
        let h = 1.0 / (n - 1) as f64;

        let knots = DMatrix::from_fn(n, 2, |row, col| match col {
            0 => points[row].x,
            _ => points[row].y,
        });

        // Natural end conditions pin the outer moments to zero.
        let mut system = DMatrix::<f64>::zeros(n, n);
        let mut rhs = DMatrix::<f64>::zeros(n, 2);
        system[(0, 0)] = 1.0;
        system[(n - 1, n - 1)] = 1.0;

        for i in 1..n - 1 {
            system[(i, i - 1)] = h;
            system[(i, i)] = 4.0 * h;
            system[(i, i + 1)] = h;
            for col in 0..2 {
                let second_diff =
                    knots[(i + 1, col)] - 2.0 * knots[(i, col)] + knots[(i - 1, col)];
                rhs[(i, col)] = 6.0 * second_diff / h;
            }
        }

        let moments = system.lu().solve(&rhs)?;
        if moments.iter().any(|m| !m.is_finite()) {
            return None;
        }

        Some(Self { knots, moments, h })
    }

    fn evaluate(&self, t: f64) -> Point {
        let segments = self.knots.nrows() - 1;
        let k = ((t / self.h).floor() as usize).min(segments - 1);
        let h = self.h;
        let t0 = k as f64 * h;
        let t1 = t0 + h;
        let a = t1 - t;
        let b = t - t0;

        let value = |col: usize| {
            let m0 = self.moments[(k, col)];
            let m1 = self.moments[(k + 1, col)];
            let y0 = self.knots[(k, col)];
            let y1 = self.knots[(k + 1, col)];
            m0 * a.powi(3) / (6.0 * h)
                + m1 * b.powi(3) / (6.0 * h)
                + (y0 / h - m0 * h / 6.0) * a
                + (y1 / h - m1 * h / 6.0) * b
        };

        Point::new(value(0), value(1))
    }
}
