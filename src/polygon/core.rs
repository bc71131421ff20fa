//! Core polygon type and input normalization.

use crate::error::{GeomError, Result};
use crate::kernel::{self, turn, Containment};
use crate::primitives::Point2;
use num_traits::Float;

/// A polygon represented as a sequence of vertices.
///
/// The polygon is implicitly closed (the last vertex connects to the first).
/// Algorithms accept either orientation and normalize to counter-clockwise
/// internally.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon<F> {
    /// The vertices of the polygon.
    pub vertices: Vec<Point2<F>>,
}

impl<F: Float> Polygon<F> {
    /// Creates a new polygon from vertices.
    #[inline]
    pub fn new(vertices: Vec<Point2<F>>) -> Self {
        Self { vertices }
    }

    /// Returns true if the polygon has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the signed area of the polygon using the shoelace formula.
    ///
    /// Positive for CCW winding, negative for CW winding.
    pub fn signed_area(&self) -> F {
        polygon_signed_area(&self.vertices)
    }

    /// Returns the absolute area of the polygon.
    pub fn area(&self) -> F {
        self.signed_area().abs()
    }

    /// Returns the bounding box as (min, max) points.
    pub fn bounding_box(&self) -> Option<(Point2<F>, Point2<F>)> {
        let first = *self.vertices.first()?;
        Some(self.vertices.iter().fold((first, first), |(min, max), v| {
            (
                Point2::new(min.x.min(v.x), min.y.min(v.y)),
                Point2::new(max.x.max(v.x), max.y.max(v.y)),
            )
        }))
    }

    /// Returns a polygon with reversed winding order.
    pub fn reversed(&self) -> Self {
        let mut vertices = self.vertices.clone();
        vertices.reverse();
        Self { vertices }
    }

    /// Returns the perimeter of the polygon.
    pub fn perimeter(&self) -> F {
        let n = self.vertices.len();
        if n < 2 {
            return F::zero();
        }
        (0..n).fold(F::zero(), |acc, i| {
            acc + self.vertices[i].distance(self.vertices[(i + 1) % n])
        })
    }
}

impl Polygon<f64> {
    /// Builds a polygon from interleaved `x, y` coordinates. A trailing odd
    /// value is ignored.
    pub fn from_xy(coords: &[f64]) -> Self {
        Self::new(
            coords
                .chunks_exact(2)
                .map(|c| Point2::new(c[0], c[1]))
                .collect(),
        )
    }

    /// Exact test for counter-clockwise orientation.
    ///
    /// Decided by the turn at the lowest-leftmost vertex, which is always
    /// convex. Degenerate polygons report `false`.
    pub fn is_ccw(&self) -> bool {
        lowest_vertex_turn(&self.vertices).is_left()
    }

    /// Ensures counter-clockwise winding.
    pub fn ensure_ccw(&mut self) {
        if lowest_vertex_turn(&self.vertices).is_right() {
            self.vertices.reverse();
        }
    }

    /// Exact simplicity test. See [`kernel::is_simple`].
    pub fn is_simple(&self) -> bool {
        kernel::is_simple(&self.vertices)
    }

    /// Exact convexity test for a counter-clockwise polygon.
    pub fn is_convex(&self) -> bool {
        kernel::is_convex(&self.vertices)
    }

    /// Classifies a point against the polygon.
    pub fn contains(&self, p: Point2<f64>) -> Containment {
        kernel::polygon_contains(&self.vertices, p)
    }
}

/// Computes the signed area of a polygon using the shoelace formula.
pub fn polygon_signed_area<F: Float>(vertices: &[Point2<F>]) -> F {
    let n = vertices.len();
    if n < 3 {
        return F::zero();
    }
    let twice = (0..n).fold(F::zero(), |acc, i| {
        let j = (i + 1) % n;
        acc + vertices[i].x * vertices[j].y - vertices[j].x * vertices[i].y
    });
    twice / (F::one() + F::one())
}

/// Computes the absolute area of a polygon.
pub fn polygon_area<F: Float>(vertices: &[Point2<F>]) -> F {
    polygon_signed_area(vertices).abs()
}

fn lowest_vertex_turn(vertices: &[Point2<f64>]) -> kernel::Turn {
    let n = vertices.len();
    if n < 3 {
        return kernel::Turn::Collinear;
    }
    let mut k = 0;
    for i in 1..n {
        let (v, best) = (vertices[i], vertices[k]);
        if v.x < best.x || (v.x == best.x && v.y < best.y) {
            k = i;
        }
    }
    turn(vertices[(k + n - 1) % n], vertices[k], vertices[(k + 1) % n])
}

/// A validated polygon in counter-clockwise order, remembering where every
/// vertex came from in the caller's input.
#[derive(Debug, Clone)]
pub(crate) struct Normalized {
    pub points: Vec<Point2<f64>>,
    /// Input index of each entry of `points`.
    pub source: Vec<usize>,
    /// Input length before collinear vertices were dropped.
    pub input_len: usize,
    /// The input was clockwise.
    pub reversed: bool,
}

impl Normalized {
    /// Validates `vertices` and orients them counter-clockwise.
    ///
    /// With `drop_collinear`, vertices whose turn is exactly collinear are
    /// removed; they do not change the area.
    pub fn new(vertices: &[Point2<f64>], drop_collinear: bool) -> Result<Self> {
        check_vertices(vertices)?;

        let mut points = vertices.to_vec();
        let mut source: Vec<usize> = (0..vertices.len()).collect();
        let reversed = lowest_vertex_turn(&points).is_right();
        if reversed {
            points.reverse();
            source.reverse();
        }

        if drop_collinear {
            loop {
                let n = points.len();
                let keep: Vec<bool> = (0..n)
                    .map(|i| {
                        !turn(points[(i + n - 1) % n], points[i], points[(i + 1) % n])
                            .is_collinear()
                    })
                    .collect();
                if keep.iter().all(|&k| k) {
                    break;
                }
                let mut flags = keep.iter();
                points.retain(|_| *flags.next().unwrap_or(&true));
                let mut flags = keep.iter();
                source.retain(|_| *flags.next().unwrap_or(&true));
            }
        }

        Ok(Self {
            points,
            source,
            input_len: vertices.len(),
            reversed,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Dropped input vertices as `(input index, normalized edge)` pairs, the
    /// edge being the one the vertex lies on. Sorted by input index.
    pub fn dropped(&self) -> Vec<(usize, usize)> {
        let (m, total) = (self.source.len(), self.input_len);
        let mut dropped = Vec::with_capacity(total - m);
        for k in 0..m {
            let end = self.source[(k + 1) % m];
            let mut c = self.source[k];
            loop {
                c = if self.reversed { (c + total - 1) % total } else { (c + 1) % total };
                if c == end {
                    break;
                }
                dropped.push((c, k));
            }
        }
        dropped.sort_unstable();
        dropped
    }

    /// Builds output pieces from cycles of normalized indices. Each piece is
    /// rotated to start at its lowest input index; pieces are ordered by
    /// their input indices.
    pub fn pieces(&self, faces: Vec<Vec<usize>>) -> Vec<Polygon<f64>> {
        let mut indexed: Vec<Vec<usize>> = faces
            .into_iter()
            .map(|face| {
                let mut ids: Vec<usize> = face.iter().map(|&v| self.source[v]).collect();
                let start = ids
                    .iter()
                    .enumerate()
                    .min_by_key(|&(_, id)| *id)
                    .map_or(0, |(k, _)| k);
                ids.rotate_left(start);
                ids
            })
            .collect();
        indexed.sort();

        let mut by_source = vec![Point2::origin(); self.input_len];
        for (k, &s) in self.source.iter().enumerate() {
            by_source[s] = self.points[k];
        }
        indexed
            .into_iter()
            .map(|ids| Polygon::new(ids.into_iter().map(|s| by_source[s]).collect()))
            .collect()
    }
}

/// Rejects too few vertices, non-finite coordinates and non-simple loops.
pub(crate) fn check_vertices(vertices: &[Point2<f64>]) -> Result<()> {
    if vertices.len() < 3 {
        return Err(GeomError::precondition(format!(
            "polygon needs at least 3 vertices, got {}",
            vertices.len()
        )));
    }
    if let Some(i) = vertices.iter().position(|p| !p.is_finite()) {
        return Err(GeomError::precondition(format!(
            "vertex {} has a non-finite coordinate",
            i
        )));
    }
    if !kernel::is_simple(vertices) {
        return Err(GeomError::InvalidGeometry);
    }
    Ok(())
}

/// Counts inner steps of a search against a fixed budget.
#[derive(Debug)]
pub(crate) struct Meter {
    steps: u64,
    budget: u64,
}

impl Meter {
    pub fn new(budget: u64) -> Self {
        Self { steps: 0, budget }
    }

    #[inline]
    pub fn tick(&mut self) -> Result<()> {
        self.steps += 1;
        if self.steps > self.budget {
            Err(GeomError::BudgetExceeded {
                budget: self.budget,
            })
        } else {
            Ok(())
        }
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square() -> Polygon<f64> {
        Polygon::from_xy(&[0.0, 0.0, 4.0, 0.0, 4.0, 4.0, 0.0, 4.0])
    }

    #[test]
    fn test_area_and_orientation() {
        let sq = square();
        assert_relative_eq!(sq.signed_area(), 16.0);
        assert!(sq.is_ccw());

        let mut cw = sq.reversed();
        assert_relative_eq!(cw.signed_area(), -16.0);
        assert!(!cw.is_ccw());
        cw.ensure_ccw();
        assert!(cw.is_ccw());
        assert_relative_eq!(sq.perimeter(), 16.0);
    }

    #[test]
    fn test_bounding_box() {
        let (min, max) = square().bounding_box().unwrap();
        assert_eq!(min, Point2::new(0.0, 0.0));
        assert_eq!(max, Point2::new(4.0, 4.0));
        assert!(Polygon::<f64>::new(vec![]).bounding_box().is_none());
    }

    #[test]
    fn test_normalize_reverses_and_tracks_sources() {
        let cw = square().reversed();
        let norm = Normalized::new(&cw.vertices, false).unwrap();
        assert_eq!(norm.source, vec![3, 2, 1, 0]);
        assert_eq!(norm.points[0], cw.vertices[3]);
        assert!(Polygon::new(norm.points.clone()).is_ccw());
    }

    #[test]
    fn test_normalize_drops_collinear() {
        let poly = Polygon::from_xy(&[0.0, 0.0, 2.0, 0.0, 4.0, 0.0, 4.0, 4.0, 2.0, 4.0, 0.0, 4.0]);
        let norm = Normalized::new(&poly.vertices, true).unwrap();
        assert_eq!(norm.source, vec![0, 2, 3, 5]);
        assert_eq!(norm.dropped(), vec![(1, 0), (4, 2)]);
        let kept = Normalized::new(&poly.vertices, false).unwrap();
        assert_eq!(kept.len(), 6);
        assert!(kept.dropped().is_empty());

        // Clockwise: the walk from each kept vertex runs backwards in input.
        let cw = poly.reversed();
        let norm = Normalized::new(&cw.vertices, true).unwrap();
        assert!(norm.reversed);
        assert_eq!(norm.source, vec![5, 3, 2, 0]);
        assert_eq!(norm.dropped(), vec![(1, 2), (4, 0)]);
    }

    #[test]
    fn test_meter_budget() {
        let mut meter = Meter::new(2);
        assert!(meter.tick().is_ok());
        assert!(meter.tick().is_ok());
        assert_eq!(meter.tick(), Err(GeomError::BudgetExceeded { budget: 2 }));
        assert_eq!(meter.steps(), 3);
    }

    #[test]
    fn test_normalize_rejects() {
        assert!(matches!(
            Normalized::new(&[Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)], false),
            Err(GeomError::PreconditionFailure { .. })
        ));
        let bowtie = Polygon::from_xy(&[0.0, 0.0, 2.0, 2.0, 2.0, 0.0, 0.0, 2.0]);
        assert_eq!(
            Normalized::new(&bowtie.vertices, true).unwrap_err(),
            GeomError::InvalidGeometry
        );
        let nan = Polygon::from_xy(&[0.0, 0.0, f64::NAN, 0.0, 1.0, 1.0]);
        assert!(matches!(
            Normalized::new(&nan.vertices, true),
            Err(GeomError::PreconditionFailure { .. })
        ));
    }

    #[test]
    fn test_pieces_rotate_to_lowest_source() {
        let cw = square().reversed();
        let norm = Normalized::new(&cw.vertices, false).unwrap();
        let pieces = norm.pieces(vec![vec![0, 1, 2, 3]]);
        assert_eq!(pieces.len(), 1);
        // Source 0 of the clockwise input is (0, 4).
        assert_eq!(pieces[0].vertices[0], Point2::new(0.0, 4.0));
        assert!(pieces[0].is_ccw());
    }
}
