//! 3D oriented bounding box.
//!
//! The search tries one box per convex-hull face: the face normal fixes the
//! third axis and the minimum-area rectangle of the hull projected onto the
//! face plane fixes the other two. The smallest of these boxes is returned.
//! It is the best face-aligned box, which is close to but not always the
//! global minimum-volume box.

use super::obb::Obb2;
use crate::error::{GeomError, Result};
use crate::hull::{convex_hull_3d, HullDimension};
use crate::primitives::{Point2, Point3, Vec2, Vec3};
use num_traits::Float;

/// A 3D oriented bounding box.
///
/// Corner `k` is `center + s0*h0*e0 + s1*h1*e1 + s2*h2*e2` where `s_i` is
/// `+1` when bit `i` of `k` is set and `-1` otherwise. The axes are
/// orthonormal and right-handed (`e2 = e0 x e1`).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obb3<F> {
    /// Center of the box.
    pub center: Point3<F>,
    /// Unit axes `e0`, `e1`, `e2`.
    pub axes: [Vec3<F>; 3],
    /// Non-negative half extents along each axis.
    pub half_extents: [F; 3],
}

impl<F: Float> Obb3<F> {
    /// Creates a new box.
    #[inline]
    pub fn new(center: Point3<F>, axes: [Vec3<F>; 3], half_extents: [F; 3]) -> Self {
        Self {
            center,
            axes,
            half_extents,
        }
    }

    /// Returns axis `i` (0, 1 or 2).
    #[inline]
    pub fn axis(&self, i: usize) -> Vec3<F> {
        self.axes[i]
    }

    /// Returns the volume of the box.
    pub fn volume(&self) -> F {
        let two = F::one() + F::one();
        let [h0, h1, h2] = self.half_extents;
        (two * h0) * (two * h1) * (two * h2)
    }

    /// Returns the eight corners.
    pub fn corners(&self) -> [Point3<F>; 8] {
        let mut corners = [self.center; 8];
        for (k, corner) in corners.iter_mut().enumerate() {
            let mut p = self.center;
            for i in 0..3 {
                let h = if k & (1 << i) != 0 {
                    self.half_extents[i]
                } else {
                    -self.half_extents[i]
                };
                p = p + self.axes[i] * h;
            }
            *corner = p;
        }
        corners
    }

    /// Returns `true` if `p` lies within `tolerance` of the box.
    pub fn contains_point(&self, p: Point3<F>, tolerance: F) -> bool {
        let d = p - self.center;
        (0..3).all(|i| d.dot(self.axes[i]).abs() <= self.half_extents[i] + tolerance)
    }
}

impl Obb3<f64> {
    /// Fits a box with the given orthonormal axes tightly around `points`.
    fn fit(points: &[Point3<f64>], axes: [Vec3<f64>; 3]) -> Self {
        let origin = points[0];
        let mut min = [f64::INFINITY; 3];
        let mut max = [f64::NEG_INFINITY; 3];
        for &p in points {
            let d = p - origin;
            for i in 0..3 {
                let t = d.dot(axes[i]);
                min[i] = min[i].min(t);
                max[i] = max[i].max(t);
            }
        }

        let mut center = origin;
        let mut half_extents = [0.0; 3];
        for i in 0..3 {
            center = center + axes[i] * ((min[i] + max[i]) * 0.5);
            half_extents[i] = (max[i] - min[i]) * 0.5;
        }
        Self::new(center, axes, half_extents)
    }

    /// Computes an oriented bounding box of at least three points.
    ///
    /// # Errors
    ///
    /// [`GeomError::PreconditionFailure`] for fewer than three points or a
    /// non-finite coordinate. Degenerate sets never fail: coplanar points give
    /// a box of zero thickness, collinear points a box with two zero extents
    /// and coincident points a box whose corners all coincide.
    ///
    /// # Example
    ///
    /// ```
    /// use flatgeom::bounds::Obb3;
    /// use flatgeom::Point3;
    ///
    /// let points = [
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(2.0, 0.0, 0.0),
    ///     Point3::new(0.0, 3.0, 0.0),
    ///     Point3::new(2.0, 3.0, 0.0),
    ///     Point3::new(0.0, 0.0, 1.0),
    ///     Point3::new(2.0, 3.0, 1.0),
    /// ];
    /// let obb = Obb3::from_points(&points).unwrap();
    /// assert!((obb.volume() - 6.0).abs() < 1e-9);
    /// ```
    pub fn from_points(points: &[Point3<f64>]) -> Result<Self> {
        if points.len() < 3 {
            return Err(GeomError::precondition(format!(
                "bounding box needs at least 3 points, got {}",
                points.len()
            )));
        }
        if let Some(i) = points.iter().position(|p| !p.is_finite()) {
            return Err(GeomError::precondition(format!(
                "point {} has a non-finite coordinate",
                i
            )));
        }

        let hull = convex_hull_3d(points);
        log::debug!(
            "oriented bounding box: {} points, hull {:?} with {} faces",
            points.len(),
            hull.dimension,
            hull.faces.len()
        );

        let obb = match hull.dimension {
            HullDimension::Point => Self::new(
                points[0],
                [Vec3::unit_x(), Vec3::unit_y(), Vec3::unit_z()],
                [0.0; 3],
            ),
            HullDimension::Segment => {
                let e0 = (points[hull.vertices[1]] - points[0])
                    .normalize()
                    .ok_or_else(|| GeomError::degeneracy("segment direction underflows"))?;
                let e1 = e0.any_perpendicular();
                let mut obb = Self::fit(points, [e0, e1, e0.cross(e1)]);
                obb.half_extents[1] = 0.0;
                obb.half_extents[2] = 0.0;
                obb
            }
            HullDimension::Plane => {
                let [a, b, c] = [hull.vertices[0], hull.vertices[1], hull.vertices[2]];
                let normal = (points[b] - points[a])
                    .cross(points[c] - points[a])
                    .normalize()
                    .ok_or_else(|| GeomError::degeneracy("plane normal underflows"))?;
                let (axes, _) = face_aligned_axes(points, points[a], points[b], normal)
                    .ok_or_else(|| GeomError::degeneracy("in-plane rectangle is empty"))?;
                let mut obb = Self::fit(points, axes);
                obb.half_extents[2] = 0.0;
                obb
            }
            HullDimension::Solid => {
                let vertices: Vec<Point3<f64>> =
                    hull.vertices.iter().map(|&i| points[i]).collect();

                let mut best: Option<(f64, [Vec3<f64>; 3])> = None;
                for face in &hull.faces {
                    let [a, b, c] = face.map(|i| points[i]);
                    let Some(normal) = (b - a).cross(c - a).normalize() else {
                        continue;
                    };
                    let Some((axes, area)) = face_aligned_axes(&vertices, a, b, normal) else {
                        continue;
                    };
                    let (lo, hi) = vertices.iter().fold(
                        (f64::INFINITY, f64::NEG_INFINITY),
                        |(lo, hi), &p| {
                            let t = (p - a).dot(normal);
                            (lo.min(t), hi.max(t))
                        },
                    );
                    let volume = area * (hi - lo);
                    if best.map_or(true, |(v, _)| volume < v) {
                        best = Some((volume, axes));
                    }
                }

                let (_, axes) =
                    best.ok_or_else(|| GeomError::degeneracy("no usable hull face"))?;
                Self::fit(&vertices, axes)
            }
        };

        log::debug!(
            "oriented bounding box: volume {} half extents {:?}",
            obb.volume(),
            obb.half_extents
        );
        Ok(obb)
    }
}

/// Axes for a box whose third axis is `normal` and whose first two axes come
/// from the minimum-area rectangle of `points` projected onto the plane
/// through `a` with direction `b - a`. Also returns the rectangle area.
fn face_aligned_axes(
    points: &[Point3<f64>],
    a: Point3<f64>,
    b: Point3<f64>,
    normal: Vec3<f64>,
) -> Option<([Vec3<f64>; 3], f64)> {
    let u = (b - a).normalize()?;
    let v = normal.cross(u);
    let projected: Vec<Point2<f64>> = points
        .iter()
        .map(|&p| {
            let d = p - a;
            Point2::new(d.dot(u), d.dot(v))
        })
        .collect();

    let rect = Obb2::from_points_min_area(&projected)?;
    let d: Vec2<f64> = rect.axis;
    let e0 = u * d.x + v * d.y;
    let e1 = normal.cross(e0);
    Some(([e0, e1, normal], rect.area()))
}

/// Computes an oriented bounding box of a 3D point set.
///
/// See [`Obb3::from_points`].
pub fn oriented_bounding_box(points: &[Point3<f64>]) -> Result<Obb3<f64>> {
    Obb3::from_points(points)
}
