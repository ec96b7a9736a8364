//! Spatial primitives shared by the gesture and scene layers
//!
//! World space is right-handed with:
//! - X: Right (+) / Left (-)
//! - Y: Up (+) / Down (-)
//! - Z: Forward (+) / Backward (-)
//!
//! Screen space is measured in view points with the origin at the top-left
//! corner and Y growing downwards.

mod point3d;
mod quaternion;
mod screen;
mod transform;
mod vector3d;

pub use point3d::Point3D;
pub use quaternion::Quaternion;
pub use screen::{ScreenPoint, ScreenRect, ScreenVector};
pub use transform::Transform;
pub use vector3d::Vector3D;
