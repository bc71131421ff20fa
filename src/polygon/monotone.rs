//! Monotone decomposition by plane sweep, and the convex partition built on
//! top of it.
//!
//! The sweep runs from top to bottom in the order of
//! [`sweep_cmp`](super::triangulate::sweep_cmp), which breaks ties in `y` by
//! `x` so horizontal edges need no special handling. Every split and merge
//! vertex gets a diagonal to the helper of the edge directly to its left,
//! leaving pieces that are monotone in that order.

use super::core::{Normalized, Polygon};
use super::subdivision::{hertel_mehlhorn, Subdivision};
use super::triangulate::{monotone_piece_diagonals, sweep_cmp};
use crate::error::Result;
use crate::kernel::{turn, Turn};
use crate::primitives::Point2;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VertexKind {
    Start,
    Split,
    End,
    Merge,
    Regular,
}

fn classify(points: &[Point2<f64>], v: usize) -> VertexKind {
    let n = points.len();
    let (p, c, q) = (points[(v + n - 1) % n], points[v], points[(v + 1) % n]);
    let prev_below = sweep_cmp(c, p) == Ordering::Less;
    let next_below = sweep_cmp(c, q) == Ordering::Less;
    let convex = turn(p, c, q) == Turn::Left;
    match (prev_below, next_below) {
        (true, true) if convex => VertexKind::Start,
        (true, true) => VertexKind::Split,
        (false, false) if convex => VertexKind::End,
        (false, false) => VertexKind::Merge,
        _ => VertexKind::Regular,
    }
}

/// Sweep-line status: downward edges, which have the polygon interior on
/// their left (east) side, ordered west to east where they cross the sweep
/// line.
///
/// Edge `e` runs from vertex `e` down to vertex `e + 1`. Positions are found
/// by binary search with exact orientation tests against the current event
/// vertex, which always lies within the vertical span of every stored edge.
struct Status<'a> {
    points: &'a [Point2<f64>],
    edges: Vec<usize>,
    helper: Vec<usize>,
}

impl<'a> Status<'a> {
    fn new(points: &'a [Point2<f64>]) -> Self {
        Self {
            points,
            edges: Vec::new(),
            helper: vec![0; points.len()],
        }
    }

    /// Number of stored edges strictly west of `v`.
    fn west_of(&self, v: usize) -> usize {
        let n = self.points.len();
        let p = self.points[v];
        self.edges.partition_point(|&e| {
            // Edges point downward, so east of the edge is its left side.
            turn(self.points[e], self.points[(e + 1) % n], p) == Turn::Left
        })
    }

    fn insert(&mut self, e: usize, helper: usize) {
        let at = self.west_of(e);
        self.edges.insert(at, e);
        self.helper[e] = helper;
    }

    fn remove(&mut self, e: usize) {
        let at = self.west_of((e + 1) % self.points.len());
        if self.edges.get(at) == Some(&e) {
            self.edges.remove(at);
        } else if let Some(pos) = self.edges.iter().position(|&x| x == e) {
            self.edges.remove(pos);
        }
    }

    /// The edge directly west of `v`.
    fn left_of(&self, v: usize) -> Option<usize> {
        match self.west_of(v) {
            0 => None,
            k => Some(self.edges[k - 1]),
        }
    }
}

/// Diagonals that split a counter-clockwise simple polygon into pieces
/// monotone with respect to the sweep order.
pub(crate) fn monotone_diagonals(points: &[Point2<f64>]) -> Vec<(usize, usize)> {
    let n = points.len();
    let kinds: Vec<VertexKind> = (0..n).map(|v| classify(points, v)).collect();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| sweep_cmp(points[a], points[b]));

    let mut status = Status::new(points);
    let mut diagonals = Vec::new();

    for v in order {
        let prev_edge = (v + n - 1) % n;
        match kinds[v] {
            VertexKind::Start => status.insert(v, v),
            VertexKind::End => {
                let h = status.helper[prev_edge];
                if kinds[h] == VertexKind::Merge {
                    diagonals.push((v, h));
                }
                status.remove(prev_edge);
            }
            VertexKind::Split => {
                if let Some(e) = status.left_of(v) {
                    diagonals.push((v, status.helper[e]));
                    status.helper[e] = v;
                }
                status.insert(v, v);
            }
            VertexKind::Merge => {
                let h = status.helper[prev_edge];
                if kinds[h] == VertexKind::Merge {
                    diagonals.push((v, h));
                }
                status.remove(prev_edge);
                if let Some(e) = status.left_of(v) {
                    let h = status.helper[e];
                    if kinds[h] == VertexKind::Merge {
                        diagonals.push((v, h));
                    }
                    status.helper[e] = v;
                }
            }
            VertexKind::Regular => {
                let next_below = sweep_cmp(points[v], points[(v + 1) % n]) == Ordering::Less;
                if next_below {
                    // Interior lies east of v.
                    let h = status.helper[prev_edge];
                    if kinds[h] == VertexKind::Merge {
                        diagonals.push((v, h));
                    }
                    status.remove(prev_edge);
                    status.insert(v, v);
                } else if let Some(e) = status.left_of(v) {
                    let h = status.helper[e];
                    if kinds[h] == VertexKind::Merge {
                        diagonals.push((v, h));
                    }
                    status.helper[e] = v;
                }
            }
        }
    }

    diagonals
}

/// Splits a simple polygon into y-monotone pieces.
///
/// Pieces are counter-clockwise, start at their lowest input index and use
/// only input vertices. Exactly collinear vertices are dropped.
///
/// # Example
///
/// ```
/// use flatgeom::polygon::{y_monotone_pieces, Polygon};
///
/// // A "W" has two notches on top.
/// let w = Polygon::from_xy(&[
///     0.0, 0.0, 4.0, 0.0, 4.0, 3.0, 3.0, 1.0, 2.0, 3.0, 1.0, 1.0, 0.0, 3.0,
/// ]);
/// let pieces = y_monotone_pieces(&w).unwrap();
/// assert!(pieces.len() >= 2);
/// ```
pub fn y_monotone_pieces(polygon: &Polygon<f64>) -> Result<Vec<Polygon<f64>>> {
    let norm = Normalized::new(&polygon.vertices, true)?;
    let diagonals = monotone_diagonals(&norm.points);
    let faces = Subdivision::new(&norm.points, &diagonals).faces();
    Ok(norm.pieces(faces))
}

/// Convex partition faces of a normalized polygon via monotone pieces.
///
/// The monotone diagonals are always kept; only the triangulation
/// diagonals inside each piece are candidates for removal.
pub(crate) fn monotone_partition_faces(points: &[Point2<f64>]) -> Vec<Vec<usize>> {
    let fixed = monotone_diagonals(points);
    let pieces = Subdivision::new(points, &fixed).faces();
    log::trace!(
        "monotone sweep: {} diagonals, {} pieces",
        fixed.len(),
        pieces.len()
    );

    let removable: Vec<(usize, usize)> = pieces
        .iter()
        .flat_map(|piece| monotone_piece_diagonals(points, piece))
        .collect();
    hertel_mehlhorn(points, &fixed, &removable)
}
