//! Orientation tests and the predicates derived from them.

use crate::primitives::{Point2, Point3};
use robust::{orient2d, orient3d, Coord, Coord3D};
use std::cmp::Ordering;

/// Result of a 2D orientation test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    /// `c` lies strictly left of the directed line `a -> b`.
    Left,
    /// `c` lies strictly right of the directed line `a -> b`.
    Right,
    /// The three points are exactly collinear.
    Collinear,
}

impl Turn {
    /// Strict left turn. Collinear counts as non-left.
    #[inline]
    pub fn is_left(self) -> bool {
        matches!(self, Turn::Left)
    }

    /// Strict right turn. Collinear counts as non-right.
    #[inline]
    pub fn is_right(self) -> bool {
        matches!(self, Turn::Right)
    }

    /// Exactly collinear.
    #[inline]
    pub fn is_collinear(self) -> bool {
        matches!(self, Turn::Collinear)
    }
}

/// Result of a 3D orientation test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaneSide {
    /// On the side the normal `(b - a) x (c - a)` points to.
    Above,
    /// On the opposite side.
    Below,
    /// Exactly on the plane.
    On,
}

#[inline]
fn coord(p: Point2<f64>) -> Coord<f64> {
    Coord { x: p.x, y: p.y }
}

#[inline]
fn coord3(p: Point3<f64>) -> Coord3D<f64> {
    Coord3D {
        x: p.x,
        y: p.y,
        z: p.z,
    }
}

/// Exact orientation of `c` relative to the directed line `a -> b`.
///
/// # Example
///
/// ```
/// use flatgeom::kernel::{turn, Turn};
/// use flatgeom::Point2;
///
/// let a = Point2::new(0.0, 0.0);
/// let b = Point2::new(1.0, 0.0);
/// assert_eq!(turn(a, b, Point2::new(0.5, 1.0)), Turn::Left);
/// assert_eq!(turn(a, b, Point2::new(3.0, 0.0)), Turn::Collinear);
/// ```
#[inline]
pub fn turn(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> Turn {
    let det = orient2d(coord(a), coord(b), coord(c));
    if det > 0.0 {
        Turn::Left
    } else if det < 0.0 {
        Turn::Right
    } else {
        Turn::Collinear
    }
}

/// Exact side of `d` relative to the oriented plane through `a`, `b`, `c`.
#[inline]
pub fn side_of_plane(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>, d: Point3<f64>) -> PlaneSide {
    // orient3d is positive when d lies opposite the right-handed normal.
    let det = orient3d(coord3(a), coord3(b), coord3(c), coord3(d));
    if det < 0.0 {
        PlaneSide::Above
    } else if det > 0.0 {
        PlaneSide::Below
    } else {
        PlaneSide::On
    }
}

/// Given `p` collinear with the segment `a -> b`, tests whether it lies on
/// the closed segment.
#[inline]
pub fn on_segment(a: Point2<f64>, b: Point2<f64>, p: Point2<f64>) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// Exact intersection test for the closed segments `a-b` and `c-d`.
///
/// Touching endpoints and collinear overlap count as intersections.
pub fn segments_intersect(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>, d: Point2<f64>) -> bool {
    let o1 = turn(a, b, c);
    let o2 = turn(a, b, d);
    let o3 = turn(c, d, a);
    let o4 = turn(c, d, b);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    (o1.is_collinear() && on_segment(a, b, c))
        || (o2.is_collinear() && on_segment(a, b, d))
        || (o3.is_collinear() && on_segment(c, d, a))
        || (o4.is_collinear() && on_segment(c, d, b))
}

/// 0 for directions in `[0, pi)` measured CCW from `reference`, 1 for `[pi, 2 pi)`.
fn half_plane(origin: Point2<f64>, reference: Point2<f64>, p: Point2<f64>) -> u8 {
    match turn(origin, reference, p) {
        Turn::Left => 0,
        Turn::Right => 1,
        Turn::Collinear => {
            // Coordinate differences keep their exact sign.
            let same = if reference.x != origin.x {
                (p.x > origin.x) == (reference.x > origin.x)
            } else {
                (p.y > origin.y) == (reference.y > origin.y)
            };
            if same {
                0
            } else {
                1
            }
        }
    }
}

/// Compares the counter-clockwise angles from `reference` to `p` and to `q`,
/// all measured around `origin`.
///
/// Angles lie in `[0, 2 pi)`; the direction of `reference` itself has angle
/// zero. Points must differ from `origin`.
pub fn ccw_angle_cmp(
    origin: Point2<f64>,
    reference: Point2<f64>,
    p: Point2<f64>,
    q: Point2<f64>,
) -> Ordering {
    let hp = half_plane(origin, reference, p);
    let hq = half_plane(origin, reference, q);
    if hp != hq {
        return hp.cmp(&hq);
    }
    match turn(origin, p, q) {
        Turn::Left => Ordering::Less,
        Turn::Right => Ordering::Greater,
        Turn::Collinear => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2<f64> {
        Point2::new(x, y)
    }

    #[test]
    fn test_turn() {
        assert_eq!(turn(p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)), Turn::Left);
        assert_eq!(turn(p(0.0, 0.0), p(1.0, 0.0), p(0.0, -1.0)), Turn::Right);
        assert_eq!(turn(p(0.0, 0.0), p(1.0, 1.0), p(2.0, 2.0)), Turn::Collinear);
        assert!(!Turn::Collinear.is_left());
    }

    #[test]
    fn test_turn_is_exact_near_degenerate() {
        let a = p(0.5, 0.5);
        let b = p(12.0, 12.0);
        let c = p(24.0, 24.0);
        assert_eq!(turn(a, b, c), Turn::Collinear);

        let nudged = p(24.0, 24.000000000000004);
        assert_eq!(turn(a, b, nudged), Turn::Left);
    }

    #[test]
    fn test_side_of_plane() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        let c = Point3::new(0.0, 1.0, 0.0);
        // Normal (b - a) x (c - a) is +z.
        assert_eq!(side_of_plane(a, b, c, Point3::new(0.2, 0.2, 1.0)), PlaneSide::Above);
        assert_eq!(side_of_plane(a, b, c, Point3::new(0.2, 0.2, -1.0)), PlaneSide::Below);
        assert_eq!(side_of_plane(a, b, c, Point3::new(5.0, -3.0, 0.0)), PlaneSide::On);
    }

    #[test]
    fn test_segments_intersect() {
        // Proper crossing.
        assert!(segments_intersect(p(0.0, 0.0), p(2.0, 2.0), p(0.0, 2.0), p(2.0, 0.0)));
        // Touching at an endpoint.
        assert!(segments_intersect(p(0.0, 0.0), p(1.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)));
        // T junction.
        assert!(segments_intersect(p(0.0, 0.0), p(2.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)));
        // Collinear overlap and collinear disjoint.
        assert!(segments_intersect(p(0.0, 0.0), p(2.0, 0.0), p(1.0, 0.0), p(3.0, 0.0)));
        assert!(!segments_intersect(p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0), p(3.0, 0.0)));
        // Parallel.
        assert!(!segments_intersect(p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0), p(1.0, 1.0)));
    }

    #[test]
    fn test_ccw_angle_cmp() {
        let o = p(0.0, 0.0);
        let r = p(1.0, 0.0);
        let up = p(0.0, 1.0);
        let left = p(-1.0, 0.0);
        let down = p(0.0, -1.0);

        assert_eq!(ccw_angle_cmp(o, r, r, up), Ordering::Less);
        assert_eq!(ccw_angle_cmp(o, r, up, left), Ordering::Less);
        assert_eq!(ccw_angle_cmp(o, r, left, down), Ordering::Less);
        assert_eq!(ccw_angle_cmp(o, r, down, up), Ordering::Greater);
        assert_eq!(ccw_angle_cmp(o, r, p(2.0, 0.0), r), Ordering::Equal);

        let mut pts = vec![down, left, p(1.0, 1.0), up, r];
        pts.sort_by(|a, b| ccw_angle_cmp(o, r, *a, *b));
        assert_eq!(pts, vec![r, p(1.0, 1.0), up, left, down]);
    }
}
