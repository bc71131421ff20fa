//! Triangulation by ear clipping and by the monotone-polygon stack sweep.
//!
//! Both produce diagonals of a counter-clockwise polygon rather than
//! triangles, so the convex partitioners can merge the triangles back.

use super::core::{Normalized, Polygon};
use crate::error::{GeomError, Result};
use crate::kernel::{turn, Turn};
use crate::primitives::Point2;
use std::cmp::Ordering;

/// Closed point-in-triangle test for a counter-clockwise triangle.
fn in_triangle(p: Point2<f64>, a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> bool {
    !turn(a, b, p).is_right() && !turn(b, c, p).is_right() && !turn(c, a, p).is_right()
}

/// Ear clipping with exact predicates.
///
/// Returns the `n - 3` diagonals of a triangulation of the counter-clockwise
/// simple polygon `points`.
pub(crate) fn ear_clip_diagonals(points: &[Point2<f64>]) -> Result<Vec<(usize, usize)>> {
    let mut remaining: Vec<usize> = (0..points.len()).collect();
    let mut diagonals = Vec::with_capacity(points.len().saturating_sub(3));
    let mut cursor = 0;

    while remaining.len() > 3 {
        let m = remaining.len();
        let mut clipped = false;

        for offset in 0..m {
            let i = (cursor + offset) % m;
            let prev = remaining[(i + m - 1) % m];
            let curr = remaining[i];
            let next = remaining[(i + 1) % m];

            if is_ear(points, &remaining, prev, curr, next) {
                diagonals.push((prev, next));
                remaining.remove(i);
                cursor = if i == 0 { 0 } else { i - 1 };
                clipped = true;
                break;
            }
        }

        if !clipped {
            return Err(GeomError::degeneracy(format!(
                "no ear among {} remaining vertices",
                m
            )));
        }
    }

    Ok(diagonals)
}

fn is_ear(
    points: &[Point2<f64>],
    remaining: &[usize],
    prev: usize,
    curr: usize,
    next: usize,
) -> bool {
    let (a, b, c) = (points[prev], points[curr], points[next]);
    if turn(a, b, c) != Turn::Left {
        return false;
    }
    remaining
        .iter()
        .filter(|&&r| r != prev && r != curr && r != next)
        .all(|&r| !in_triangle(points[r], a, b, c))
}

/// Sweep order: higher y first, ties broken by lower x.
pub(crate) fn sweep_cmp(p: Point2<f64>, q: Point2<f64>) -> Ordering {
    q.y.total_cmp(&p.y).then(p.x.total_cmp(&q.x))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Chain {
    Left,
    Right,
}

/// Stack triangulation of one y-monotone piece.
///
/// `piece` is a counter-clockwise cycle of indices into `points`. Returns the
/// diagonals as index pairs into `points`.
pub(crate) fn monotone_piece_diagonals(
    points: &[Point2<f64>],
    piece: &[usize],
) -> Vec<(usize, usize)> {
    let m = piece.len();
    if m <= 3 {
        return Vec::new();
    }

    let by_order = |a: &usize, b: &usize| sweep_cmp(points[piece[*a]], points[piece[*b]]);
    let top = (0..m).min_by(by_order).unwrap_or(0);
    let bottom = (0..m).max_by(by_order).unwrap_or(0);

    // Counter-clockwise from the top runs down the left chain.
    let mut chain = vec![Chain::Right; m];
    let mut k = (top + 1) % m;
    while k != bottom {
        chain[k] = Chain::Left;
        k = (k + 1) % m;
    }

    let mut order: Vec<usize> = (0..m).collect();
    order.sort_by(by_order);

    let mut diagonals = Vec::with_capacity(m - 3);
    let mut stack: Vec<usize> = vec![order[0], order[1]];

    for j in 2..m - 1 {
        let u = order[j];
        let Some(&top_of_stack) = stack.last() else {
            break;
        };

        if chain[u] != chain[top_of_stack] {
            while stack.len() > 1 {
                if let Some(s) = stack.pop() {
                    diagonals.push((piece[u], piece[s]));
                }
            }
            stack.clear();
            stack.push(order[j - 1]);
            stack.push(u);
        } else {
            let mut last = top_of_stack;
            stack.pop();
            while let Some(&s) = stack.last() {
                let side = turn(points[piece[u]], points[piece[s]], points[piece[last]]);
                let inside = match chain[u] {
                    Chain::Left => side == Turn::Left,
                    Chain::Right => side == Turn::Right,
                };
                if !inside {
                    break;
                }
                stack.pop();
                diagonals.push((piece[u], piece[s]));
                last = s;
            }
            stack.push(last);
            stack.push(u);
        }
    }

    let u = order[m - 1];
    if stack.len() > 2 {
        for &s in &stack[1..stack.len() - 1] {
            diagonals.push((piece[u], piece[s]));
        }
    }

    diagonals
}

/// Triangulates a simple polygon by ear clipping.
///
/// Returns triangles as counter-clockwise triples of input vertex indices.
/// Exactly collinear vertices are skipped, so they appear in no triangle.
///
/// # Example
///
/// ```
/// use flatgeom::polygon::{triangulate_polygon_indexed, Polygon};
///
/// let l_shape = Polygon::from_xy(&[0.0, 0.0, 2.0, 0.0, 2.0, 1.0, 1.0, 1.0, 1.0, 2.0, 0.0, 2.0]);
/// let triangles = triangulate_polygon_indexed(&l_shape).unwrap();
/// assert_eq!(triangles.len(), 4);
/// ```
pub fn triangulate_polygon_indexed(polygon: &Polygon<f64>) -> Result<Vec<[usize; 3]>> {
    let norm = Normalized::new(&polygon.vertices, true)?;
    let diagonals = ear_clip_diagonals(&norm.points)?;
    let faces = super::subdivision::Subdivision::new(&norm.points, &diagonals).faces();
    Ok(faces
        .into_iter()
        .filter(|f| f.len() == 3)
        .map(|f| [norm.source[f[0]], norm.source[f[1]], norm.source[f[2]]])
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polygon::subdivision::Subdivision;
    use crate::polygon::core::polygon_area;
    use approx::assert_relative_eq;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point2<f64>> {
        coords.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    fn triangle_area_sum(points: &[Point2<f64>], diagonals: &[(usize, usize)]) -> f64 {
        let faces = Subdivision::new(points, diagonals).faces();
        assert_eq!(faces.len(), points.len() - 2);
        faces
            .iter()
            .map(|f| {
                assert_eq!(f.len(), 3);
                let tri: Vec<Point2<f64>> = f.iter().map(|&i| points[i]).collect();
                assert_eq!(turn(tri[0], tri[1], tri[2]), Turn::Left);
                polygon_area(&tri)
            })
            .sum()
    }

    #[test]
    fn test_ear_clip_l_shape() {
        let l_shape = pts(&[
            (0.0, 0.0),
            (2.0, 0.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (1.0, 2.0),
            (0.0, 2.0),
        ]);
        let diagonals = ear_clip_diagonals(&l_shape).unwrap();
        assert_eq!(diagonals.len(), 3);
        assert_relative_eq!(triangle_area_sum(&l_shape, &diagonals), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ear_clip_comb() {
        let comb = pts(&[
            (0.0, 0.0),
            (5.0, 0.0),
            (5.0, 3.0),
            (4.0, 3.0),
            (4.0, 1.0),
            (3.0, 1.0),
            (3.0, 3.0),
            (2.0, 3.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (1.0, 3.0),
            (0.0, 3.0),
        ]);
        let diagonals = ear_clip_diagonals(&comb).unwrap();
        assert_relative_eq!(
            triangle_area_sum(&comb, &diagonals),
            polygon_area(&comb),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_monotone_piece_triangulation() {
        // y-monotone polygon with reflex vertices on both chains.
        let piece_pts = pts(&[
            (0.0, 4.0),
            (-2.0, 3.0),
            (-0.5, 2.0),
            (-2.0, 0.0),
            (0.0, -1.0),
            (2.0, 0.5),
            (0.5, 2.5),
            (2.0, 3.5),
        ]);
        let piece: Vec<usize> = (0..piece_pts.len()).collect();
        let diagonals = monotone_piece_diagonals(&piece_pts, &piece);
        assert_eq!(diagonals.len(), piece_pts.len() - 3);
        assert_relative_eq!(
            triangle_area_sum(&piece_pts, &diagonals),
            polygon_area(&piece_pts),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_monotone_piece_convex_fan() {
        let hexagon = pts(&[
            (2.0, 0.0),
            (1.0, 1.7),
            (-1.0, 1.7),
            (-2.0, 0.0),
            (-1.0, -1.7),
            (1.0, -1.7),
        ]);
        let piece: Vec<usize> = (0..6).collect();
        let diagonals = monotone_piece_diagonals(&hexagon, &piece);
        assert_relative_eq!(
            triangle_area_sum(&hexagon, &diagonals),
            polygon_area(&hexagon),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_triangulate_indexed_cw_input() {
        let square = Polygon::from_xy(&[0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0]);
        let triangles = triangulate_polygon_indexed(&square).unwrap();
        assert_eq!(triangles.len(), 2);
        for t in &triangles {
            let tri: Vec<Point2<f64>> = t.iter().map(|&i| square.vertices[i]).collect();
            assert_eq!(turn(tri[0], tri[1], tri[2]), Turn::Left);
        }
    }
}
