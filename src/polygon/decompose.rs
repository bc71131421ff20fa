//! Convex polygon decomposition.
//!
//! Splits a simple polygon into convex pieces whose vertices are all input
//! vertices.
//!
//! # Strategies
//!
//! - **Approximate**: ear-clipping triangulation followed by Hertel-Mehlhorn
//!   diagonal removal; at most four times the optimum
//! - **Optimal**: exact minimum by dynamic programming, metered by
//!   [`Config::optimal_step_budget`]
//! - **Monotone**: plane sweep into y-monotone pieces, stack triangulation,
//!   then Hertel-Mehlhorn on the triangulation diagonals only
//!
//! # Example
//!
//! ```
//! use flatgeom::polygon::{partition, Polygon, Strategy};
//! use flatgeom::Config;
//!
//! // L-shaped polygon (non-convex)
//! let l_shape = Polygon::from_xy(&[0.0, 0.0, 2.0, 0.0, 2.0, 1.0, 1.0, 1.0, 1.0, 2.0, 0.0, 2.0]);
//!
//! let parts = partition(&l_shape, Strategy::Optimal, &Config::default()).unwrap();
//! assert_eq!(parts.len(), 2);
//! for part in &parts {
//!     assert!(part.is_convex());
//! }
//! ```

use super::core::{Normalized, Polygon};
use super::monotone::monotone_partition_faces;
use super::optimal::optimal_diagonals;
use super::subdivision::{hertel_mehlhorn, Subdivision};
use super::triangulate::ear_clip_diagonals;
use crate::config::Config;
use crate::error::{GeomError, Result};
use crate::kernel::turn;
use crate::primitives::Point2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Convex partition algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Strategy {
    /// Triangulate, then merge with Hertel-Mehlhorn.
    Approximate,
    /// Minimum number of pieces.
    Optimal,
    /// Monotone pieces, triangulated, then merged.
    Monotone,
}

/// Partitions a simple polygon into convex pieces.
///
/// Pieces are counter-clockwise, start at their lowest input index and are
/// ordered by input indices. Exactly collinear vertices are dropped.
///
/// # Errors
///
/// - [`GeomError::PreconditionFailure`] for fewer than three vertices or a
///   non-finite coordinate
/// - [`GeomError::InvalidGeometry`] if the polygon is not simple
/// - [`GeomError::BudgetExceeded`] when the optimal strategy runs out of
///   steps and [`Config::optimal_fallback`] is off
pub fn partition(
    polygon: &Polygon<f64>,
    strategy: Strategy,
    config: &Config,
) -> Result<Vec<Polygon<f64>>> {
    log::debug!(
        "partition: {} vertices, strategy {:?}",
        polygon.len(),
        strategy
    );
    let norm = Normalized::new(&polygon.vertices, true)?;

    let faces = match strategy {
        Strategy::Approximate => approximate_faces(&norm.points)?,
        Strategy::Monotone => monotone_partition_faces(&norm.points),
        Strategy::Optimal => match optimal_diagonals(&norm.points, config.optimal_step_budget) {
            Ok(diagonals) => Subdivision::new(&norm.points, &diagonals).faces(),
            Err(GeomError::BudgetExceeded { budget }) if config.optimal_fallback => {
                log::warn!(
                    "optimal partition exceeded {} steps on {} vertices, \
                     using approximate partition",
                    budget,
                    norm.len()
                );
                approximate_faces(&norm.points)?
            }
            Err(e) => return Err(e),
        },
    };

    let pieces = norm.pieces(faces);
    log::debug!("partition: {} convex pieces", pieces.len());
    Ok(pieces)
}

fn approximate_faces(points: &[Point2<f64>]) -> Result<Vec<Vec<usize>>> {
    let diagonals = ear_clip_diagonals(points)?;
    Ok(hertel_mehlhorn(points, &[], &diagonals))
}

/// Approximate convex decomposition with default settings.
///
/// # Example
///
/// ```
/// use flatgeom::polygon::{convex_decomposition, Polygon};
/// use flatgeom::Point2;
///
/// // Star shape (non-convex)
/// let star = Polygon::new(vec![
///     Point2::new(0.0, 1.0),
///     Point2::new(0.2, 0.4),
///     Point2::new(-0.5, 0.3),
///     Point2::new(0.0, 0.0),
///     Point2::new(0.5, 0.3),
///     Point2::new(0.8, 0.4),
///     Point2::new(1.0, 1.0),
///     Point2::new(0.5, 0.8),
/// ]);
///
/// let parts = convex_decomposition(&star).unwrap();
/// for part in &parts {
///     assert!(part.is_convex());
/// }
/// ```
pub fn convex_decomposition(polygon: &Polygon<f64>) -> Result<Vec<Polygon<f64>>> {
    partition(polygon, Strategy::Approximate, &Config::default())
}

/// Minimum convex decomposition with default settings.
pub fn optimal_convex_decomposition(polygon: &Polygon<f64>) -> Result<Vec<Polygon<f64>>> {
    partition(polygon, Strategy::Optimal, &Config::default())
}

/// Monotone-based convex decomposition with default settings.
pub fn monotone_convex_decomposition(polygon: &Polygon<f64>) -> Result<Vec<Polygon<f64>>> {
    partition(polygon, Strategy::Monotone, &Config::default())
}

/// Decomposes a polygon into triangles by ear clipping.
///
/// # Example
///
/// ```
/// use flatgeom::polygon::{triangulate_decomposition, Polygon};
///
/// let square = Polygon::from_xy(&[0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0]);
/// let triangles = triangulate_decomposition(&square).unwrap();
/// assert_eq!(triangles.len(), 2); // Square = 2 triangles
/// ```
pub fn triangulate_decomposition(polygon: &Polygon<f64>) -> Result<Vec<Polygon<f64>>> {
    let norm = Normalized::new(&polygon.vertices, true)?;
    let diagonals = ear_clip_diagonals(&norm.points)?;
    let faces = Subdivision::new(&norm.points, &diagonals).faces();
    Ok(norm.pieces(faces))
}

/// Returns the number of reflex (concave) vertices in a polygon.
///
/// A reflex vertex is one where the interior angle is greater than 180°.
/// Either orientation is accepted.
pub fn count_reflex_vertices(polygon: &Polygon<f64>) -> usize {
    find_reflex_vertices(polygon).len()
}

/// Returns input indices of reflex (concave) vertices, ascending.
pub fn find_reflex_vertices(polygon: &Polygon<f64>) -> Vec<usize> {
    let v = &polygon.vertices;
    let n = v.len();
    if n < 3 {
        return vec![];
    }
    let ccw = polygon.is_ccw();
    (0..n)
        .filter(|&i| {
            let t = turn(v[(i + n - 1) % n], v[i], v[(i + 1) % n]);
            if ccw {
                t.is_right()
            } else {
                t.is_left()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square(x: f64, y: f64, size: f64) -> Polygon<f64> {
        Polygon::new(vec![
            Point2::new(x, y),
            Point2::new(x + size, y),
            Point2::new(x + size, y + size),
            Point2::new(x, y + size),
        ])
    }

    fn l_shape() -> Polygon<f64> {
        Polygon::from_xy(&[0.0, 0.0, 2.0, 0.0, 2.0, 1.0, 1.0, 1.0, 1.0, 2.0, 0.0, 2.0])
    }

    fn arrow() -> Polygon<f64> {
        Polygon::from_xy(&[0.0, 1.0, 2.0, 1.0, 2.0, 0.0, 4.0, 2.0, 2.0, 4.0, 2.0, 3.0, 0.0, 3.0])
    }

    fn comb() -> Polygon<f64> {
        Polygon::from_xy(&[
            0.0, 0.0, 7.0, 0.0, 7.0, 3.0, 6.0, 3.0, 6.0, 1.0, 5.0, 1.0, 5.0, 3.0, 4.0, 3.0, 4.0,
            1.0, 3.0, 1.0, 3.0, 3.0, 2.0, 3.0, 2.0, 1.0, 1.0, 1.0, 1.0, 3.0, 0.0, 3.0,
        ])
    }

    const ALL: [Strategy; 3] = [Strategy::Approximate, Strategy::Optimal, Strategy::Monotone];

    fn check(polygon: &Polygon<f64>, strategy: Strategy) -> Vec<Polygon<f64>> {
        let pieces = partition(polygon, strategy, &Config::default()).unwrap();
        let mut total = 0.0;
        for piece in &pieces {
            assert!(piece.is_convex(), "{:?} gave non-convex {:?}", strategy, piece);
            assert!(piece.signed_area() > 0.0);
            for v in &piece.vertices {
                assert!(polygon.vertices.contains(v));
            }
            total += piece.area();
        }
        assert_relative_eq!(total, polygon.area(), epsilon = 1e-9);
        pieces
    }

    #[test]
    fn test_square_is_one_piece() {
        for strategy in ALL {
            let pieces = check(&square(0.0, 0.0, 4.0), strategy);
            assert_eq!(pieces.len(), 1);
            assert_eq!(pieces[0], square(0.0, 0.0, 4.0));
        }
    }

    #[test]
    fn test_l_shape() {
        for strategy in ALL {
            let pieces = check(&l_shape(), strategy);
            assert!(pieces.len() >= 2);
        }
        assert_eq!(check(&l_shape(), Strategy::Optimal).len(), 2);
    }

    #[test]
    fn test_optimal_never_worse() {
        for polygon in [l_shape(), arrow(), comb()] {
            let optimal = check(&polygon, Strategy::Optimal).len();
            assert!(optimal <= check(&polygon, Strategy::Approximate).len());
            assert!(optimal <= check(&polygon, Strategy::Monotone).len());
        }
        // Two reflex corners per notch, three notches.
        assert!(check(&comb(), Strategy::Optimal).len() >= 4);
    }

    #[test]
    fn test_clockwise_input() {
        for strategy in ALL {
            let pieces = check(&l_shape().reversed(), strategy);
            for piece in &pieces {
                assert!(piece.is_ccw());
            }
        }
    }

    #[test]
    fn test_collinear_vertices_are_dropped() {
        let poly = Polygon::from_xy(&[0.0, 0.0, 2.0, 0.0, 4.0, 0.0, 4.0, 4.0, 0.0, 4.0]);
        for strategy in ALL {
            let pieces = check(&poly, strategy);
            assert_eq!(pieces.len(), 1);
            assert_eq!(pieces[0].len(), 4);
        }
    }

    #[test]
    fn test_rejects_bad_input() {
        let bowtie = Polygon::from_xy(&[0.0, 0.0, 2.0, 2.0, 2.0, 0.0, 0.0, 2.0]);
        let two = Polygon::from_xy(&[0.0, 0.0, 1.0, 0.0]);
        for strategy in ALL {
            assert_eq!(
                partition(&bowtie, strategy, &Config::default()).unwrap_err(),
                GeomError::InvalidGeometry
            );
            assert!(matches!(
                partition(&two, strategy, &Config::default()),
                Err(GeomError::PreconditionFailure { .. })
            ));
        }
    }

    #[test]
    fn test_optimal_budget_fallback() {
        let tight = Config::new().with_optimal_step_budget(1);
        let pieces = partition(&comb(), Strategy::Optimal, &tight).unwrap();
        let approximate = partition(&comb(), Strategy::Approximate, &tight).unwrap();
        assert_eq!(pieces, approximate);

        let strict = tight.with_optimal_fallback(false);
        assert_eq!(
            partition(&comb(), Strategy::Optimal, &strict).unwrap_err(),
            GeomError::BudgetExceeded { budget: 1 }
        );
    }

    #[test]
    fn test_deterministic() {
        for strategy in ALL {
            let a = partition(&comb(), strategy, &Config::default()).unwrap();
            let b = partition(&comb(), strategy, &Config::default()).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_triangulate_decomposition() {
        let triangles = triangulate_decomposition(&l_shape()).unwrap();
        assert_eq!(triangles.len(), 4);
        let total: f64 = triangles.iter().map(|t| t.area()).sum();
        assert_relative_eq!(total, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_reflex_vertices() {
        assert_eq!(count_reflex_vertices(&square(0.0, 0.0, 1.0)), 0);
        assert_eq!(find_reflex_vertices(&l_shape()), vec![3]);
        assert_eq!(find_reflex_vertices(&l_shape().reversed()), vec![2]);
        assert_eq!(count_reflex_vertices(&comb()), 6);
    }
}
