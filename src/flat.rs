//! Interleaved coordinate buffers.
//!
//! This is the layer below the C entry points: inputs are `x0, y0, x1, y1, ...`
//! (or `x, y, z` triples), outputs go into caller-sized slices and are never
//! written past their end. When a result does not fit it is truncated and the
//! returned outcome reports both what was written and the full size.
//!
//! On any error nothing has been written.
//!
//! # Example
//!
//! ```
//! use flatgeom::flat::partition_into;
//! use flatgeom::{Config, Strategy};
//!
//! let l_shape = [0.0, 0.0, 2.0, 0.0, 2.0, 1.0, 1.0, 1.0, 1.0, 2.0, 0.0, 2.0];
//! let mut xy = [0.0; 32];
//! let mut sizes = [0; 8];
//!
//! let config = Config::default();
//! let outcome =
//!     partition_into(&l_shape, Strategy::Optimal, &config, &mut xy, &mut sizes).unwrap();
//! assert_eq!(outcome.pieces_written, 2);
//! assert!(!outcome.is_truncated());
//! ```

use crate::bounds::oriented_bounding_box;
use crate::config::Config;
use crate::error::{GeomError, Result};
use crate::polygon::{partition, straight_skeleton, Polygon, Strategy};
use crate::primitives::{Point2, Point3};

/// Reads interleaved `x, y` pairs.
pub fn points2_from_flat(coords: &[f64]) -> Result<Vec<Point2<f64>>> {
    if coords.len() % 2 != 0 {
        return Err(GeomError::precondition(format!(
            "2D buffer length {} is not a multiple of 2",
            coords.len()
        )));
    }
    Ok(coords.chunks_exact(2).map(|c| Point2::new(c[0], c[1])).collect())
}

/// Reads interleaved `x, y, z` triples.
pub fn points3_from_flat(coords: &[f64]) -> Result<Vec<Point3<f64>>> {
    if coords.len() % 3 != 0 {
        return Err(GeomError::precondition(format!(
            "3D buffer length {} is not a multiple of 3",
            coords.len()
        )));
    }
    Ok(coords
        .chunks_exact(3)
        .map(|c| Point3::new(c[0], c[1], c[2]))
        .collect())
}

/// Oriented bounding box of `x, y, z` triples as eight interleaved corners.
///
/// Corner `k` has axis `i` at its positive extent when bit `i` of `k` is set.
pub fn obb_corners(points: &[f64]) -> Result<[f64; 24]> {
    let points = points3_from_flat(points)?;
    let obb = oriented_bounding_box(&points)?;
    let mut out = [0.0; 24];
    for (slot, corner) in out.chunks_exact_mut(3).zip(obb.corners()) {
        slot.copy_from_slice(&corner.to_array());
    }
    Ok(out)
}

/// What a partition call wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionOutcome {
    /// Pieces written, each with its size in the sizes buffer.
    pub pieces_written: usize,
    /// Pieces in the full result.
    pub pieces_total: usize,
    /// Points written to the coordinate buffer.
    pub points_written: usize,
}

impl PartitionOutcome {
    /// Returns `true` if some pieces did not fit.
    pub fn is_truncated(&self) -> bool {
        self.pieces_written < self.pieces_total
    }

    /// Turns truncation into [`GeomError::CapacityExceeded`].
    pub fn require_complete(self) -> Result<Self> {
        if self.is_truncated() {
            return Err(GeomError::CapacityExceeded {
                required: self.pieces_total,
                capacity: self.pieces_written,
            });
        }
        Ok(self)
    }
}

/// Partitions the polygon in `coords` and writes whole pieces in order.
///
/// Piece `k` occupies `sizes[k]` consecutive points of `out_xy`. Writing
/// stops at the first piece that does not fit in either buffer.
pub fn partition_into(
    coords: &[f64],
    strategy: Strategy,
    config: &Config,
    out_xy: &mut [f64],
    sizes: &mut [i32],
) -> Result<PartitionOutcome> {
    let polygon = Polygon::new(points2_from_flat(coords)?);
    let pieces = partition(&polygon, strategy, config)?;

    let point_capacity = out_xy.len() / 2;
    let mut outcome = PartitionOutcome {
        pieces_written: 0,
        pieces_total: pieces.len(),
        points_written: 0,
    };
    for piece in &pieces {
        let end = outcome.points_written + piece.len();
        if outcome.pieces_written == sizes.len() || end > point_capacity {
            break;
        }
        let size = i32::try_from(piece.len())
            .map_err(|_| GeomError::precondition("piece size does not fit in i32"))?;
        for (slot, p) in out_xy[2 * outcome.points_written..2 * end]
            .chunks_exact_mut(2)
            .zip(&piece.vertices)
        {
            slot.copy_from_slice(&p.to_array());
        }
        sizes[outcome.pieces_written] = size;
        outcome.pieces_written += 1;
        outcome.points_written = end;
    }

    if outcome.is_truncated() {
        log::debug!(
            "partition_into: wrote {} of {} pieces",
            outcome.pieces_written,
            outcome.pieces_total
        );
    }
    Ok(outcome)
}

/// What a skeleton call wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkeletonOutcome {
    pub vertices_written: usize,
    pub vertices_total: usize,
    pub edges_written: usize,
    pub edges_total: usize,
}

impl SkeletonOutcome {
    /// Returns `true` if some vertices or edges did not fit.
    pub fn is_truncated(&self) -> bool {
        self.vertices_written < self.vertices_total || self.edges_written < self.edges_total
    }

    /// Turns truncation into [`GeomError::CapacityExceeded`].
    pub fn require_complete(self) -> Result<Self> {
        if self.edges_written < self.edges_total {
            return Err(GeomError::CapacityExceeded {
                required: self.edges_total,
                capacity: self.edges_written,
            });
        }
        if self.vertices_written < self.vertices_total {
            return Err(GeomError::CapacityExceeded {
                required: self.vertices_total,
                capacity: self.vertices_written,
            });
        }
        Ok(self)
    }
}

/// Computes the straight skeleton of the polygon in `coords`.
///
/// Vertices go to `out_xy` (polygon vertices first, in input order), edges
/// to `edge_pairs` as index pairs in ascending order. An edge is written only
/// if both its endpoints were.
pub fn skeleton_into(
    coords: &[f64],
    config: &Config,
    out_xy: &mut [f64],
    edge_pairs: &mut [i32],
) -> Result<SkeletonOutcome> {
    let polygon = Polygon::new(points2_from_flat(coords)?);
    let graph = straight_skeleton(&polygon, config)?;

    let vertices_written = graph.vertices.len().min(out_xy.len() / 2);
    for (slot, p) in out_xy.chunks_exact_mut(2).zip(&graph.vertices[..vertices_written]) {
        slot.copy_from_slice(&p.to_array());
    }

    let edge_capacity = edge_pairs.len() / 2;
    let mut edges_written = 0;
    for &(a, b) in &graph.edges {
        if edges_written == edge_capacity {
            break;
        }
        if b >= vertices_written {
            continue;
        }
        let (a, b) = match (i32::try_from(a), i32::try_from(b)) {
            (Ok(a), Ok(b)) => (a, b),
            _ => return Err(GeomError::precondition("vertex index does not fit in i32")),
        };
        edge_pairs[2 * edges_written] = a;
        edge_pairs[2 * edges_written + 1] = b;
        edges_written += 1;
    }

    Ok(SkeletonOutcome {
        vertices_written,
        vertices_total: graph.vertices.len(),
        edges_written,
        edges_total: graph.edges.len(),
    })
}
