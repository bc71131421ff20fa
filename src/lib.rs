//! flatgeom - Oriented boxes, convex partitions and straight skeletons
//!
//! Four one-shot geometry operations over plain coordinate buffers:
//!
//! - [`oriented_bounding_box`] of a 3D point set, aligned to its convex hull
//! - [`partition`] of a simple polygon into convex pieces, with
//!   [`Strategy::Approximate`], [`Strategy::Optimal`] or [`Strategy::Monotone`]
//! - [`straight_skeleton`] of a simple polygon as a vertex/edge graph
//!
//! Predicates are exact ([`kernel`]). The typed API lives in [`polygon`] and
//! [`bounds`], [`flat`] works on interleaved `f64` slices and [`ffi`] exports
//! the same operations with C linkage.
//!
//! # Example
//!
//! ```
//! use flatgeom::{partition, straight_skeleton, Config, Polygon, Strategy};
//!
//! let l_shape = Polygon::from_xy(&[0.0, 0.0, 2.0, 0.0, 2.0, 1.0, 1.0, 1.0, 1.0, 2.0, 0.0, 2.0]);
//! let config = Config::default();
//!
//! let pieces = partition(&l_shape, Strategy::Optimal, &config).unwrap();
//! assert_eq!(pieces.len(), 2);
//!
//! let skeleton = straight_skeleton(&l_shape, &config).unwrap();
//! assert_eq!(skeleton.edges.len(), 8);
//! ```

pub mod bounds;
pub mod config;
pub mod error;
pub mod ffi;
pub mod flat;
pub mod hull;
pub mod kernel;
pub mod polygon;
pub mod primitives;

pub use bounds::{oriented_bounding_box, Obb3};
pub use config::Config;
pub use error::{GeomError, Result};
pub use polygon::{partition, straight_skeleton, Polygon, SkeletonGraph, Strategy};
pub use primitives::{Point2, Point3, Vec2, Vec3};
