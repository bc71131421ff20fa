//! Incremental 3D convex hull with exact orientation tests.

use crate::kernel::{side_of_plane, turn, PlaneSide};
use crate::primitives::{Point2, Point3};
use std::collections::{HashMap, HashSet};

/// Affine dimension spanned by a point set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HullDimension {
    /// All points coincide.
    Point,
    /// All points are collinear.
    Segment,
    /// All points are coplanar.
    Plane,
    /// The points span a volume.
    Solid,
}

/// A convex hull over indices of the input points.
#[derive(Debug, Clone, PartialEq)]
pub struct Hull3 {
    /// Dimension of the input.
    pub dimension: HullDimension,
    /// Input indices of the hull vertices, ascending.
    ///
    /// For lower-dimensional input this holds the affinely independent
    /// points that were found.
    pub vertices: Vec<usize>,
    /// Triangular faces as input indices, counter-clockwise seen from
    /// outside. Empty unless the dimension is [`HullDimension::Solid`].
    pub faces: Vec<[usize; 3]>,
}

impl Hull3 {
    fn degenerate(dimension: HullDimension, vertices: Vec<usize>) -> Self {
        Self {
            dimension,
            vertices,
            faces: Vec::new(),
        }
    }
}

/// Exact 3D collinearity: all three axis-plane projections are collinear.
fn collinear(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>) -> bool {
    let xy = |p: Point3<f64>| Point2::new(p.x, p.y);
    let yz = |p: Point3<f64>| Point2::new(p.y, p.z);
    let zx = |p: Point3<f64>| Point2::new(p.z, p.x);
    turn(xy(a), xy(b), xy(c)).is_collinear()
        && turn(yz(a), yz(b), yz(c)).is_collinear()
        && turn(zx(a), zx(b), zx(c)).is_collinear()
}

struct Face {
    v: [usize; 3],
    alive: bool,
}

impl Face {
    fn edges(&self) -> [(usize, usize); 3] {
        let [a, b, c] = self.v;
        [(a, b), (b, c), (c, a)]
    }
}

struct HullBuilder<'a> {
    points: &'a [Point3<f64>],
    faces: Vec<Face>,
    /// Directed edge to the live face that owns it.
    edges: HashMap<(usize, usize), usize>,
}

impl<'a> HullBuilder<'a> {
    fn new(points: &'a [Point3<f64>]) -> Self {
        Self {
            points,
            faces: Vec::new(),
            edges: HashMap::new(),
        }
    }

    fn add_face(&mut self, a: usize, b: usize, c: usize) {
        let id = self.faces.len();
        let face = Face {
            v: [a, b, c],
            alive: true,
        };
        for edge in face.edges() {
            self.edges.insert(edge, id);
        }
        self.faces.push(face);
    }

    fn remove_face(&mut self, id: usize) {
        self.faces[id].alive = false;
        for edge in self.faces[id].edges() {
            if self.edges.get(&edge) == Some(&id) {
                self.edges.remove(&edge);
            }
        }
    }

    fn sees(&self, id: usize, p: Point3<f64>) -> bool {
        let [a, b, c] = self.faces[id].v;
        side_of_plane(self.points[a], self.points[b], self.points[c], p) == PlaneSide::Above
    }

    fn insert(&mut self, index: usize) {
        let p = self.points[index];
        let visible: Vec<usize> = (0..self.faces.len())
            .filter(|&id| self.faces[id].alive && self.sees(id, p))
            .collect();
        if visible.is_empty() {
            return;
        }

        let visible_set: HashSet<usize> = visible.iter().copied().collect();
        let mut horizon = Vec::new();
        for &id in &visible {
            for (u, v) in self.faces[id].edges() {
                if let Some(other) = self.edges.get(&(v, u)) {
                    if !visible_set.contains(other) {
                        horizon.push((u, v));
                    }
                }
            }
        }

        for &id in &visible {
            self.remove_face(id);
        }
        for (u, v) in horizon {
            self.add_face(u, v, index);
        }
    }

    fn finish(self, dimension: HullDimension) -> Hull3 {
        let faces: Vec<[usize; 3]> = self
            .faces
            .into_iter()
            .filter(|f| f.alive)
            .map(|f| f.v)
            .collect();
        let mut vertices: Vec<usize> = faces.iter().flatten().copied().collect();
        vertices.sort_unstable();
        vertices.dedup();
        Hull3 {
            dimension,
            vertices,
            faces,
        }
    }
}

/// Computes the convex hull of a 3D point set.
///
/// Points are inserted in input order after an initial tetrahedron built from
/// the first affinely independent points. Points on the current hull surface
/// are not added, so coplanar faces stay triangulated without extra vertices.
///
/// # Example
///
/// ```
/// use flatgeom::hull::{convex_hull_3d, HullDimension};
/// use flatgeom::Point3;
///
/// let points = [
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
///     Point3::new(0.0, 0.0, 1.0),
///     Point3::new(0.1, 0.1, 0.1),
/// ];
/// let hull = convex_hull_3d(&points);
/// assert_eq!(hull.dimension, HullDimension::Solid);
/// assert_eq!(hull.vertices, vec![0, 1, 2, 3]);
/// assert_eq!(hull.faces.len(), 4);
/// ```
pub fn convex_hull_3d(points: &[Point3<f64>]) -> Hull3 {
    let Some(&p0) = points.first() else {
        return Hull3::degenerate(HullDimension::Point, Vec::new());
    };
    let Some(i1) = points.iter().position(|&p| p != p0) else {
        return Hull3::degenerate(HullDimension::Point, vec![0]);
    };
    let p1 = points[i1];
    let Some(i2) = points.iter().position(|&p| !collinear(p0, p1, p)) else {
        return Hull3::degenerate(HullDimension::Segment, vec![0, i1]);
    };
    let p2 = points[i2];
    let Some(i3) = points
        .iter()
        .position(|&p| side_of_plane(p0, p1, p2, p) != PlaneSide::On)
    else {
        return Hull3::degenerate(HullDimension::Plane, vec![0, i1, i2]);
    };

    // Orient the base so the apex lies below it.
    let (a, b, c) = if side_of_plane(p0, p1, p2, points[i3]) == PlaneSide::Above {
        (0, i2, i1)
    } else {
        (0, i1, i2)
    };
    let d = i3;

    let mut builder = HullBuilder::new(points);
    builder.add_face(a, b, c);
    builder.add_face(a, d, b);
    builder.add_face(b, d, c);
    builder.add_face(c, d, a);

    for index in 0..points.len() {
        if index != a && index != b && index != c && index != d {
            builder.insert(index);
        }
    }

    builder.finish(HullDimension::Solid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube_corners() -> Vec<Point3<f64>> {
        let mut points = Vec::new();
        for k in 0..8 {
            points.push(Point3::new(
                (k & 1) as f64,
                ((k >> 1) & 1) as f64,
                ((k >> 2) & 1) as f64,
            ));
        }
        points
    }

    fn assert_all_below(points: &[Point3<f64>], hull: &Hull3) {
        for face in &hull.faces {
            for p in points {
                let side = side_of_plane(points[face[0]], points[face[1]], points[face[2]], *p);
                assert_ne!(side, PlaneSide::Above, "face {:?} sees {:?}", face, p);
            }
        }
    }

    #[test]
    fn test_cube_with_interior_point() {
        let mut points = cube_corners();
        points.push(Point3::new(0.5, 0.5, 0.5));
        let hull = convex_hull_3d(&points);

        assert_eq!(hull.dimension, HullDimension::Solid);
        assert_eq!(hull.vertices, (0..8).collect::<Vec<_>>());
        // Closed triangulated sphere: F = 2V - 4.
        assert_eq!(hull.faces.len(), 12);
        assert_all_below(&points, &hull);
    }

    #[test]
    fn test_every_edge_is_shared_once() {
        let points: Vec<Point3<f64>> = (0..40)
            .map(|i| {
                let t = i as f64 * 0.7;
                Point3::new(t.cos() * (1.0 + 0.1 * t), t.sin(), (t * 1.3).sin() * 2.0)
            })
            .collect();
        let hull = convex_hull_3d(&points);
        assert_eq!(hull.dimension, HullDimension::Solid);
        assert_all_below(&points, &hull);

        let mut directed = HashSet::new();
        for f in &hull.faces {
            for e in [(f[0], f[1]), (f[1], f[2]), (f[2], f[0])] {
                assert!(directed.insert(e));
            }
        }
        for &(u, v) in &directed {
            assert!(directed.contains(&(v, u)));
        }
    }

    #[test]
    fn test_lower_dimensions() {
        let p = Point3::new(1.0, 2.0, 3.0);
        assert_eq!(convex_hull_3d(&[p, p, p]).dimension, HullDimension::Point);

        let line: Vec<Point3<f64>> = (0..4)
            .map(|i| Point3::new(i as f64, 2.0 * i as f64, 0.0))
            .collect();
        assert_eq!(convex_hull_3d(&line).dimension, HullDimension::Segment);

        let plane = vec![
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        ];
        let hull = convex_hull_3d(&plane);
        assert_eq!(hull.dimension, HullDimension::Plane);
        assert!(hull.faces.is_empty());
    }
}
