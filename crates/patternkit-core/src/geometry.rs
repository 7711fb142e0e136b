//! Core geometry types for pattern outlines.
//!
//! All coordinates are centimeters. Y grows downward, toward the hem or cuff.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 2D point in centimeter space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Returns this point moved by (dx, dy).
    #[inline]
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// True when both coordinates are within `tolerance` of the other point.
    pub fn approx_eq(&self, other: Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Bounding box of a point sequence, `None` when the sequence is empty.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        let min_x = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let max_x = points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
        let min_y = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max_y = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

        Some(Self::new(min_x, max_x, min_y, max_y))
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds::new(
            self.min_x.min(other.min_x),
            self.max_x.max(other.max_x),
            self.min_y.min(other.min_y),
            self.max_y.max(other.max_y),
        )
    }

    /// Box grown outward by `amount` on every side.
    pub fn expanded(&self, amount: f64) -> Bounds {
        Bounds::new(
            self.min_x - amount,
            self.max_x + amount,
            self.min_y - amount,
            self.max_y + amount,
        )
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Bounds {
        Bounds::new(
            self.min_x + dx,
            self.max_x + dx,
            self.min_y + dy,
            self.max_y + dy,
        )
    }

    /// Interior overlap test. Boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }

    /// Closed intersection test, touching boxes intersect.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Corners in top-left, top-right, bottom-left, bottom-right order.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.min_x, self.min_y),
            Point::new(self.max_x, self.min_y),
            Point::new(self.min_x, self.max_y),
            Point::new(self.max_x, self.max_y),
        ]
    }
}

/// Vertex average of a point sequence.
///
/// This is the label anchor used on printed pieces, not the area centroid.
pub fn vertex_centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let sum_x: f64 = points.iter().map(|p| p.x).sum();
    let sum_y: f64 = points.iter().map(|p| p.y).sum();
    Some(Point::new(sum_x / n, sum_y / n))
}

/// True when every point lies on the line through the first two distinct points.
pub fn all_collinear(points: &[Point], tolerance: f64) -> bool {
    let Some(&origin) = points.first() else {
        return true;
    };
    let Some(&other) = points.iter().find(|p| !p.approx_eq(origin, tolerance)) else {
        return true;
    };

    let dx = other.x - origin.x;
    let dy = other.y - origin.y;
    let length = (dx * dx + dy * dy).sqrt();

    points.iter().all(|p| {
        let cross = (p.x - origin.x) * dy - (p.y - origin.y) * dx;
        (cross / length).abs() <= tolerance
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_distance() {
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(3.0, 4.0);
        assert_eq!(p1.distance(p2), 5.0);
    }

    #[test]
    fn bounds_from_points() {
        let bounds = Bounds::from_points(&[
            Point::new(2.0, 1.0),
            Point::new(10.0, 5.0),
            Point::new(-1.0, 3.0),
        ])
        .unwrap();
        assert_eq!(bounds, Bounds::new(-1.0, 10.0, 1.0, 5.0));
        assert_eq!(bounds.width(), 11.0);
        assert_eq!(bounds.height(), 4.0);
    }

    #[test]
    fn empty_bounds() {
        assert_eq!(Bounds::from_points(&[]), None);
    }

    #[test]
    fn touching_boxes_do_not_overlap() {
        let a = Bounds::new(0.0, 10.0, 0.0, 10.0);
        let b = Bounds::new(10.0, 20.0, 0.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(a.intersects(&b));

        let c = Bounds::new(9.0, 20.0, 5.0, 15.0);
        assert!(a.overlaps(&c));
    }

    #[test]
    fn union_and_expand() {
        let a = Bounds::new(0.0, 10.0, 0.0, 10.0);
        let b = Bounds::new(5.0, 20.0, -5.0, 3.0);
        assert_eq!(a.union(&b), Bounds::new(0.0, 20.0, -5.0, 10.0));
        assert_eq!(a.expanded(2.0), Bounds::new(-2.0, 12.0, -2.0, 12.0));
    }

    #[test]
    fn centroid_is_vertex_average() {
        let c = vertex_centroid(&[
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ])
        .unwrap();
        assert_eq!(c, Point::new(5.0, 5.0));
        assert_eq!(vertex_centroid(&[]), None);
    }

    #[test]
    fn collinear_detection() {
        let line = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(5.0, 5.0),
        ];
        assert!(all_collinear(&line, 1e-9));

        let triangle = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 8.0),
        ];
        assert!(!all_collinear(&triangle, 1e-9));

        let repeated = [Point::new(1.0, 1.0); 4];
        assert!(all_collinear(&repeated, 1e-9));
    }
}
