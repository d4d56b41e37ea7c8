//! Geometric primitives applied to pages: rotation and cropping.
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = counter-clockwise
//! - Crop rectangles are in pixels with exclusive right/bottom edges
//! - Origin is top-left corner

mod crop;
mod rotation;

pub use crop::apply_crop;
pub use rotation::{apply_rotation, rotate_raster, rotated_size, InterpolationFilter, ANGLE_EPSILON};
