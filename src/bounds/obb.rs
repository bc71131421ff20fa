//! 2D oriented bounding rectangle.
//!
//! Used as the in-plane step of the 3D box search: the minimum-area
//! rectangle of a point set has one side collinear with an edge of its convex
//! hull, so only hull-edge directions need testing.
//!
//! # Example
//!
//! ```
//! use flatgeom::bounds::Obb2;
//! use flatgeom::Point2;
//!
//! // A rotated 2x1 rectangle
//! let points = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.6, 1.2),
//!     Point2::new(1.0, 2.0),
//!     Point2::new(-0.6, 0.8),
//! ];
//!
//! let obb = Obb2::from_points_min_area(&points).unwrap();
//! assert!((obb.area() - 2.0).abs() < 1e-9);
//! ```

use crate::hull::convex_hull;
use crate::primitives::{Point2, Vec2};
use num_traits::Float;

/// A 2D oriented bounding rectangle.
///
/// Represented by a center, a unit local x-axis and half-extents along the
/// local x- and y-axes. The local y-axis is the x-axis rotated 90 degrees
/// counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obb2<F> {
    /// Center of the rectangle.
    pub center: Point2<F>,
    /// Unit direction of the local x-axis.
    pub axis: Vec2<F>,
    /// Half-extents along the local x- and y-axes.
    pub half_extents: [F; 2],
}

impl<F: Float> Obb2<F> {
    /// Creates a new rectangle.
    #[inline]
    pub fn new(center: Point2<F>, axis: Vec2<F>, half_extents: [F; 2]) -> Self {
        Self {
            center,
            axis,
            half_extents,
        }
    }

    /// Returns the area of the rectangle.
    #[inline]
    pub fn area(self) -> F {
        let four = F::one() + F::one() + F::one() + F::one();
        four * self.half_extents[0] * self.half_extents[1]
    }

    /// Returns the local y-axis direction.
    #[inline]
    pub fn axis_y(self) -> Vec2<F> {
        self.axis.perpendicular()
    }

    /// Returns the four corners in counter-clockwise order.
    pub fn corners(self) -> [Point2<F>; 4] {
        let u = self.axis * self.half_extents[0];
        let v = self.axis_y() * self.half_extents[1];
        [
            self.center - u - v,
            self.center + u - v,
            self.center + u + v,
            self.center - u + v,
        ]
    }

    /// Returns `true` if the point lies within `tolerance` of the rectangle.
    pub fn contains_point(self, p: Point2<F>, tolerance: F) -> bool {
        let d = p - self.center;
        d.dot(self.axis).abs() <= self.half_extents[0] + tolerance
            && d.dot(self.axis_y()).abs() <= self.half_extents[1] + tolerance
    }
}

impl Obb2<f64> {
    /// Fits the rectangle with local x-axis `axis` (unit) tightly around the
    /// points. Returns `None` for an empty slice.
    pub fn fit(points: &[Point2<f64>], axis: Vec2<f64>) -> Option<Self> {
        let origin = *points.first()?;
        let up = axis.perpendicular();

        let mut min = [f64::INFINITY; 2];
        let mut max = [f64::NEG_INFINITY; 2];
        for &p in points {
            let d = p - origin;
            let proj = [d.dot(axis), d.dot(up)];
            for k in 0..2 {
                min[k] = min[k].min(proj[k]);
                max[k] = max[k].max(proj[k]);
            }
        }

        let mid = [(min[0] + max[0]) * 0.5, (min[1] + max[1]) * 0.5];
        Some(Self {
            center: origin + axis * mid[0] + up * mid[1],
            axis,
            half_extents: [(max[0] - min[0]) * 0.5, (max[1] - min[1]) * 0.5],
        })
    }

    /// Computes the minimum-area enclosing rectangle.
    ///
    /// Rotating calipers over the convex hull choose the direction; the
    /// rectangle is then fitted over every hull vertex, so it always encloses
    /// the input. Coincident points give a zero rectangle aligned with the
    /// x-axis and collinear points a rectangle of zero height.
    ///
    /// Returns `None` for an empty slice.
    pub fn from_points_min_area(points: &[Point2<f64>]) -> Option<Self> {
        let hull = convex_hull(points);
        match hull.len() {
            0 => None,
            1 => Some(Self::new(hull[0], Vec2::new(1.0, 0.0), [0.0, 0.0])),
            2 => {
                let axis = (hull[1] - hull[0]).normalize()?;
                Self::fit(&hull, axis)
            }
            _ => {
                let axis = min_area_direction(&hull)?;
                Self::fit(&hull, axis)
            }
        }
    }
}

/// Index of the vertex that maximizes `sign * (p . axis)`, walking forward
/// from `start` over the convex loop `rel`.
fn advance(rel: &[Vec2<f64>], start: usize, axis: Vec2<f64>, sign: f64) -> usize {
    let n = rel.len();
    let mut k = start;
    for _ in 0..n {
        let next = (k + 1) % n;
        if sign * rel[next].dot(axis) > sign * rel[k].dot(axis) {
            k = next;
        } else {
            break;
        }
    }
    k
}

/// Rotating calipers over a CCW hull with at least three vertices. Returns
/// the hull-edge direction with the smallest rectangle area.
fn min_area_direction(hull: &[Point2<f64>]) -> Option<Vec2<f64>> {
    let n = hull.len();
    let rel: Vec<Vec2<f64>> = hull.iter().map(|&p| p - hull[0]).collect();

    let mut best: Option<(f64, Vec2<f64>)> = None;
    let mut calipers: Option<(usize, usize, usize)> = None;

    for i in 0..n {
        let Some(d) = (rel[(i + 1) % n] - rel[i]).normalize() else {
            continue;
        };
        let up = d.perpendicular();

        let (right, top, left) = match calipers {
            Some((r, t, l)) => {
                let r = advance(&rel, r, d, 1.0);
                let t = advance(&rel, t, up, 1.0);
                (r, t, advance(&rel, l, d, -1.0))
            }
            None => {
                let r = advance(&rel, (i + 1) % n, d, 1.0);
                let t = advance(&rel, r, up, 1.0);
                (r, t, advance(&rel, t, d, -1.0))
            }
        };
        calipers = Some((right, top, left));

        let width = rel[right].dot(d) - rel[left].dot(d);
        let height = rel[top].dot(up) - rel[i].dot(up);
        let area = width * height;
        if best.map_or(true, |(a, _)| area < a) {
            best = Some((area, d));
        }
    }

    best.map(|(_, d)| d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_axis_aligned_rectangle() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(4.0, 2.0),
            Point2::new(0.0, 2.0),
            Point2::new(1.0, 1.0),
        ];
        let obb = Obb2::from_points_min_area(&points).unwrap();
        assert_relative_eq!(obb.area(), 8.0, epsilon = 1e-12);
        assert_relative_eq!(obb.center.x, 2.0, epsilon = 1e-12);
        assert_relative_eq!(obb.center.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotated_rectangle_beats_axis_aligned() {
        let angle = 0.5_f64;
        let (c, s) = (angle.cos(), angle.sin());
        let local = [(-3.0, -1.0), (3.0, -1.0), (3.0, 1.0), (-3.0, 1.0), (0.5, 0.2)];
        let points: Vec<Point2<f64>> = local
            .iter()
            .map(|&(x, y)| Point2::new(10.0 + x * c - y * s, -4.0 + x * s + y * c))
            .collect();

        let obb = Obb2::from_points_min_area(&points).unwrap();
        assert_relative_eq!(obb.area(), 12.0, epsilon = 1e-9);
        assert_relative_eq!(obb.center.x, 10.0, epsilon = 1e-9);
        assert_relative_eq!(obb.center.y, -4.0, epsilon = 1e-9);
        for p in &points {
            assert!(obb.contains_point(*p, 1e-9));
        }
    }

    #[test]
    fn test_encloses_irregular_points() {
        let points: Vec<Point2<f64>> = (0..30)
            .map(|i| {
                let t = i as f64 * 0.9;
                Point2::new(t.cos() * (2.0 + (t * 3.0).sin()), t.sin() * 1.5)
            })
            .collect();
        let obb = Obb2::from_points_min_area(&points).unwrap();
        for p in &points {
            assert!(obb.contains_point(*p, 1e-9));
        }
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(Obb2::from_points_min_area(&[]).is_none());

        let p = Point2::new(1.0, 1.0);
        let obb = Obb2::from_points_min_area(&[p, p]).unwrap();
        assert_eq!(obb.half_extents, [0.0, 0.0]);

        let line = [Point2::new(0.0, 0.0), Point2::new(1.0, 1.0), Point2::new(3.0, 3.0)];
        let obb = Obb2::from_points_min_area(&line).unwrap();
        assert_relative_eq!(obb.area(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(obb.half_extents[0], 18.0_f64.sqrt() / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_corners_ccw() {
        let obb: Obb2<f64> = Obb2::new(Point2::new(0.0, 0.0), Vec2::new(1.0, 0.0), [2.0, 1.0]);
        let corners = obb.corners();
        assert_eq!(corners[0], Point2::new(-2.0, -1.0));
        assert_eq!(corners[2], Point2::new(2.0, 1.0));
    }
}
