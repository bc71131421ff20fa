//! Exact geometric predicates.
//!
//! Every predicate in this module returns the exact sign of its determinant,
//! evaluated with Shewchuk's adaptive-precision arithmetic from the `robust`
//! crate. Ties are never broken by an epsilon: a point exactly on a line is
//! reported as [`Turn::Collinear`], and callers decide how to treat it.
//!
//! Inputs are `f64` points. Non-finite coordinates give unspecified results;
//! the public entry points reject them before any predicate runs.

mod predicates;
mod simplicity;

pub use predicates::{
    ccw_angle_cmp, on_segment, segments_intersect, side_of_plane, turn, PlaneSide, Turn,
};
pub use simplicity::{is_convex, is_simple, polygon_contains, Containment};
