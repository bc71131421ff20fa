//! Point and vector types shared by every algorithm in the crate.
//!
//! Points and vectors are distinct types: `Point - Point` yields a vector and
//! `Point + Vec` yields a point.

mod point2;
mod point3;
mod vec2;
mod vec3;

pub use point2::Point2;
pub use point3::Point3;
pub use vec2::Vec2;
pub use vec3::Vec3;
