//! Polygon-level predicates: simplicity, convexity and containment.

use super::predicates::{on_segment, segments_intersect, turn, Turn};
use crate::primitives::Point2;

/// Where a point lies relative to a polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Containment {
    /// Strictly inside.
    Inside,
    /// Strictly outside.
    Outside,
    /// On an edge or vertex.
    Boundary,
}

/// Checks whether the closed vertex loop is a simple polygon.
///
/// Requires at least 3 vertices, no repeated vertex, no two non-adjacent
/// edges touching, and adjacent edges meeting only at their shared vertex.
/// Runs in O(n^2).
///
/// # Example
///
/// ```
/// use flatgeom::kernel::is_simple;
/// use flatgeom::Point2;
///
/// let bowtie = [
///     Point2::new(0.0, 0.0),
///     Point2::new(2.0, 2.0),
///     Point2::new(2.0, 0.0),
///     Point2::new(0.0, 2.0),
/// ];
/// assert!(!is_simple(&bowtie));
/// ```
pub fn is_simple(vertices: &[Point2<f64>]) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }

    let mut sorted: Vec<Point2<f64>> = vertices.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    if sorted.windows(2).any(|w| w[0] == w[1]) {
        return false;
    }

    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        let c = vertices[(i + 2) % n];

        // Edge (b, c) must not fold back over edge (a, b).
        if turn(a, b, c).is_collinear() && (on_segment(a, b, c) || on_segment(b, c, a)) {
            return false;
        }

        for j in (i + 2)..n {
            if (j + 1) % n == i {
                continue;
            }
            let d = vertices[j];
            let e = vertices[(j + 1) % n];
            if segments_intersect(a, b, d, e) {
                return false;
            }
        }
    }

    true
}

/// Checks that a counter-clockwise vertex loop makes no right turn.
pub fn is_convex(vertices: &[Point2<f64>]) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }
    (0..n).all(|i| !turn(vertices[i], vertices[(i + 1) % n], vertices[(i + 2) % n]).is_right())
}

/// Classifies `p` against the polygon using an exact winding number.
pub fn polygon_contains(vertices: &[Point2<f64>], p: Point2<f64>) -> Containment {
    let n = vertices.len();
    if n < 3 {
        return Containment::Outside;
    }

    let mut winding = 0i32;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        let side = turn(a, b, p);

        if side.is_collinear() && on_segment(a, b, p) {
            return Containment::Boundary;
        }

        if a.y <= p.y {
            if b.y > p.y && side == Turn::Left {
                winding += 1;
            }
        } else if b.y <= p.y && side == Turn::Right {
            winding -= 1;
        }
    }

    if winding != 0 {
        Containment::Inside
    } else {
        Containment::Outside
    }
}
