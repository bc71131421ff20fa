//! Oriented bounding boxes.

mod obb;
mod obb3;

pub use obb::Obb2;
pub use obb3::{oriented_bounding_box, Obb3};
