//! Planar subdivision of a polygon by non-crossing diagonals.
//!
//! Vertices keep their neighbors sorted counter-clockwise, starting from the
//! next boundary vertex and ending at the previous one. Faces are recovered
//! by walking half-edges; Hertel-Mehlhorn removal edits the neighbor lists
//! in place.

use crate::kernel::{ccw_angle_cmp, turn};
use crate::primitives::Point2;
use std::collections::HashSet;

pub(crate) struct Subdivision<'a> {
    points: &'a [Point2<f64>],
    /// Neighbors of each vertex in counter-clockwise order.
    neighbors: Vec<Vec<usize>>,
}

impl<'a> Subdivision<'a> {
    /// Builds the subdivision of the counter-clockwise polygon `points` by
    /// `diagonals`. Diagonals must be valid and pairwise non-crossing.
    pub fn new(points: &'a [Point2<f64>], diagonals: &[(usize, usize)]) -> Self {
        let n = points.len();
        let mut neighbors: Vec<Vec<usize>> = (0..n)
            .map(|v| vec![(v + 1) % n, (v + n - 1) % n])
            .collect();
        for &(a, b) in diagonals {
            neighbors[a].push(b);
            neighbors[b].push(a);
        }
        for (v, list) in neighbors.iter_mut().enumerate() {
            let origin = points[v];
            let reference = points[(v + 1) % n];
            list.sort_by(|&p, &q| ccw_angle_cmp(origin, reference, points[p], points[q]));
            list.dedup();
        }
        Self { points, neighbors }
    }

    fn position(&self, v: usize, w: usize) -> Option<usize> {
        self.neighbors[v].iter().position(|&x| x == w)
    }

    /// Whether the angle at `a` stays at most 180 degrees once the diagonal
    /// `a-b` is gone.
    fn convex_without(&self, a: usize, b: usize) -> bool {
        let list = &self.neighbors[a];
        match self.position(a, b) {
            Some(k) if k > 0 && k + 1 < list.len() => {
                let w1 = self.points[list[k - 1]];
                let w2 = self.points[list[k + 1]];
                !turn(self.points[a], w1, w2).is_right()
            }
            _ => false,
        }
    }

    /// Removes the diagonal `a-b` if both endpoints stay convex. Returns
    /// whether it was removed.
    pub fn remove_if_convex(&mut self, a: usize, b: usize) -> bool {
        if !(self.convex_without(a, b) && self.convex_without(b, a)) {
            return false;
        }
        self.neighbors[a].retain(|&x| x != b);
        self.neighbors[b].retain(|&x| x != a);
        true
    }

    /// Next half-edge of the face left of `u -> v`.
    fn next_in_face(&self, u: usize, v: usize) -> Option<usize> {
        let list = &self.neighbors[v];
        let k = self.position(v, u)?;
        Some(list[(k + list.len() - 1) % list.len()])
    }

    /// Interior faces as counter-clockwise vertex cycles.
    ///
    /// Walks start from the boundary edges in order, then from both
    /// directions of every diagonal, so the output order is deterministic.
    pub fn faces(&self) -> Vec<Vec<usize>> {
        let n = self.points.len();
        let mut starts: Vec<(usize, usize)> = (0..n).map(|i| (i, (i + 1) % n)).collect();
        for (a, list) in self.neighbors.iter().enumerate() {
            for &b in &list[1..list.len().saturating_sub(1)] {
                starts.push((a, b));
            }
        }

        let mut visited: HashSet<(usize, usize)> = HashSet::new();
        let mut faces = Vec::new();
        for (u0, v0) in starts {
            if visited.contains(&(u0, v0)) {
                continue;
            }
            let mut face = Vec::new();
            let (mut u, mut v) = (u0, v0);
            // A face cannot have more half-edges than the graph.
            for _ in 0..=(2 * n + 2 * self.edge_count()) {
                if !visited.insert((u, v)) {
                    break;
                }
                face.push(u);
                match self.next_in_face(u, v) {
                    Some(w) => {
                        u = v;
                        v = w;
                    }
                    None => break,
                }
            }
            if face.len() >= 3 {
                faces.push(face);
            }
        }
        faces
    }

    /// Number of diagonals currently present.
    pub fn edge_count(&self) -> usize {
        self.neighbors.iter().map(|l| l.len() - 2).sum::<usize>() / 2
    }
}

/// Hertel-Mehlhorn: drops each diagonal of `removable`, in order, whose
/// endpoints both stay convex without it. `fixed` diagonals are kept.
/// Returns the faces of the resulting subdivision.
pub(crate) fn hertel_mehlhorn(
    points: &[Point2<f64>],
    fixed: &[(usize, usize)],
    removable: &[(usize, usize)],
) -> Vec<Vec<usize>> {
    let all: Vec<(usize, usize)> = fixed.iter().chain(removable).copied().collect();
    let mut subdivision = Subdivision::new(points, &all);
    let mut removed = 0;
    for &(a, b) in removable {
        if subdivision.remove_if_convex(a, b) {
            removed += 1;
        }
    }
    log::trace!(
        "hertel-mehlhorn removed {} of {} diagonals",
        removed,
        removable.len()
    );
    subdivision.faces()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point2<f64>> {
        coords.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    #[test]
    fn test_no_diagonals_is_one_face() {
        let square = pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let sub = Subdivision::new(&square, &[]);
        assert_eq!(sub.faces(), vec![vec![0, 1, 2, 3]]);
    }

    #[test]
    fn test_fan_faces() {
        let hexagon = pts(&[
            (2.0, 0.0),
            (1.0, 1.7),
            (-1.0, 1.7),
            (-2.0, 0.0),
            (-1.0, -1.7),
            (1.0, -1.7),
        ]);
        let sub = Subdivision::new(&hexagon, &[(0, 2), (0, 3), (0, 4)]);
        let faces = sub.faces();
        assert_eq!(faces.len(), 4);
        assert_eq!(faces[0], vec![0, 1, 2]);
        for face in &faces {
            assert_eq!(face.len(), 3);
        }
    }

    #[test]
    fn test_hertel_mehlhorn_merges_convex_fan() {
        let hexagon = pts(&[
            (2.0, 0.0),
            (1.0, 1.7),
            (-1.0, 1.7),
            (-2.0, 0.0),
            (-1.0, -1.7),
            (1.0, -1.7),
        ]);
        let faces = hertel_mehlhorn(&hexagon, &[], &[(0, 2), (0, 3), (0, 4)]);
        assert_eq!(faces, vec![vec![0, 1, 2, 3, 4, 5]]);
    }

    #[test]
    fn test_hertel_mehlhorn_keeps_essential_diagonal() {
        // L shape; vertex 3 is reflex.
        let l_shape = pts(&[
            (0.0, 0.0),
            (2.0, 0.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (1.0, 2.0),
            (0.0, 2.0),
        ]);
        let faces = hertel_mehlhorn(&l_shape, &[], &[(3, 0), (0, 2), (3, 5)]);
        assert_eq!(faces.len(), 2);
        for face in &faces {
            let poly: Vec<Point2<f64>> = face.iter().map(|&i| l_shape[i]).collect();
            assert!(crate::kernel::is_convex(&poly));
        }
    }

    #[test]
    fn test_fixed_diagonals_stay() {
        let square = pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let faces = hertel_mehlhorn(&square, &[(0, 2)], &[]);
        assert_eq!(faces.len(), 2);
    }
}
