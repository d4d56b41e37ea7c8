//! Bindings for the rotation and crop primitives.
//!
//! Use these to apply a result from `auto_crop` or `deskew` to a page, or
//! to rotate and crop by hand.

use crate::types::{JsCropRect, JsDecodedImage};
use scanfix_core::transform::{apply_crop as core_crop, apply_rotation as core_rotate, InterpolationFilter};
use scanfix_core::CropRect;
use wasm_bindgen::prelude::*;

const PAPER: [u8; 3] = [255, 255, 255];

/// Rotate a page about its center onto an enlarged white canvas.
///
/// # Arguments
///
/// * `angle_degrees` - Rotation angle in degrees (positive = counter-clockwise)
/// * `bicubic` - Use bicubic interpolation, otherwise bilinear
#[wasm_bindgen]
pub fn apply_rotation(image: &JsDecodedImage, angle_degrees: f64, bicubic: bool) -> JsDecodedImage {
    let filter = if bicubic {
        InterpolationFilter::Bicubic
    } else {
        InterpolationFilter::Bilinear
    };
    JsDecodedImage::from_decoded(core_rotate(&image.to_decoded(), angle_degrees, PAPER, filter))
}

/// Cut a pixel rectangle out of a page. Right and bottom are exclusive.
#[wasm_bindgen]
pub fn apply_crop(image: &JsDecodedImage, left: u32, top: u32, right: u32, bottom: u32) -> JsDecodedImage {
    let rect = CropRect {
        left,
        top,
        right,
        bottom,
    };
    JsDecodedImage::from_decoded(core_crop(&image.to_decoded(), &rect))
}

/// Cut the rectangle returned by `auto_crop` out of a page.
#[wasm_bindgen]
pub fn apply_crop_rect(image: &JsDecodedImage, rect: &JsCropRect) -> JsDecodedImage {
    JsDecodedImage::from_decoded(core_crop(&image.to_decoded(), &CropRect::from(*rect)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(width: u32, height: u32) -> JsDecodedImage {
        JsDecodedImage::try_new(width, height, vec![0u8; (width * height * 3) as usize]).unwrap()
    }

    #[test]
    fn test_rotation_zero_is_identity() {
        let img = page(20, 10);
        assert_eq!(apply_rotation(&img, 0.0, true), img);
    }

    #[test]
    fn test_rotation_expands_canvas() {
        let rotated = apply_rotation(&page(100, 50), 30.0, false);
        assert!(rotated.width() > 100);
        assert!(rotated.height() > 50);
    }

    #[test]
    fn test_crop() {
        let cropped = apply_crop(&page(100, 50), 10, 5, 60, 45);
        assert_eq!((cropped.width(), cropped.height()), (50, 40));
        assert_eq!(cropped.byte_length(), 50 * 40 * 3);
    }

    #[test]
    fn test_crop_rect() {
        let rect = JsCropRect::from(CropRect {
            left: 0,
            top: 0,
            right: 30,
            bottom: 20,
        });
        let cropped = apply_crop_rect(&page(100, 50), &rect);
        assert_eq!((cropped.width(), cropped.height()), (30, 20));
    }
}
