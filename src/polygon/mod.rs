//! Simple polygons, convex partitioning and straight skeletons.
//!
//! This module provides:
//! - Area, orientation and containment on [`Polygon`]
//! - Convex partitioning with three strategies ([`partition`])
//! - Y-monotone decomposition and triangulation
//! - Interior straight skeletons ([`straight_skeleton`])
//!
//! Every algorithm validates its input first: fewer than three vertices or a
//! non-finite coordinate is a precondition failure, a self-intersecting loop
//! is invalid geometry. Clockwise input is reoriented internally and results
//! refer back to input vertices.
//!
//! # Example
//!
//! ```
//! use flatgeom::polygon::{partition, Polygon, Strategy};
//! use flatgeom::Config;
//!
//! let u_shape = Polygon::from_xy(&[
//!     0.0, 0.0, 3.0, 0.0, 3.0, 2.0, 2.0, 2.0, 2.0, 1.0, 1.0, 1.0, 1.0, 2.0, 0.0, 2.0,
//! ]);
//!
//! let pieces = partition(&u_shape, Strategy::Optimal, &Config::default()).unwrap();
//! assert_eq!(pieces.len(), 3);
//! ```

mod core;
mod decompose;
mod monotone;
mod optimal;
mod skeleton;
mod subdivision;
mod triangulate;

pub use core::{polygon_area, polygon_signed_area, Polygon};
pub use decompose::{
    convex_decomposition, count_reflex_vertices, find_reflex_vertices,
    monotone_convex_decomposition, optimal_convex_decomposition, partition,
    triangulate_decomposition, Strategy,
};
pub use monotone::y_monotone_pieces;
pub use skeleton::{straight_skeleton, SkeletonGraph};
pub use triangulate::triangulate_polygon_indexed;
