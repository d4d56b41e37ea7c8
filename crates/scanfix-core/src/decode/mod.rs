//! Page decoding for the normalization pipeline.
//!
//! Turns encoded page bytes (JPEG, PNG, GIF) into an RGB [`DecodedImage`],
//! applying the EXIF orientation so that the page is upright before the
//! skew search runs.

mod page;
mod types;

pub use page::{decode_image, decode_image_no_orientation, get_orientation};
pub use types::{DecodeError, DecodedImage, Orientation};
