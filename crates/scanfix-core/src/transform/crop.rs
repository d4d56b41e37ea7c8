//! Page cropping by pixel rectangle.
//!
//! Rectangles use exclusive right/bottom edges, matching the output of the
//! crop solver. A rectangle reaching past the page is clamped to it.

use crate::decode::DecodedImage;
use crate::geometry::CropRect;

/// Copy the region `rect` out of `image`.
///
/// The rectangle is clamped to the page first. A full-page rectangle
/// returns a clone, and a rectangle that clamps to nothing yields an
/// empty page.
pub fn apply_crop(image: &DecodedImage, rect: &CropRect) -> DecodedImage {
    let left = rect.left.min(image.width);
    let top = rect.top.min(image.height);
    let right = rect.right.clamp(left, image.width);
    let bottom = rect.bottom.clamp(top, image.height);

    if left == 0 && top == 0 && right == image.width && bottom == image.height {
        return image.clone();
    }

    let out_width = right - left;
    let out_height = bottom - top;
    let row_bytes = out_width as usize * 3;
    let mut output = Vec::with_capacity(row_bytes * out_height as usize);

    for y in top..bottom {
        let start = (y as usize * image.width as usize + left as usize) * 3;
        output.extend_from_slice(&image.pixels[start..start + row_bytes]);
    }

    DecodedImage::new(out_width, out_height, output)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Page where each pixel encodes its position.
    fn test_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                pixels.extend_from_slice(&[v, v, v]);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    fn rect(left: u32, top: u32, right: u32, bottom: u32) -> CropRect {
        CropRect {
            left,
            top,
            right,
            bottom,
        }
    }

    #[test]
    fn test_full_crop() {
        let img = test_image(100, 100);
        let result = apply_crop(&img, &CropRect::full(100, 100));
        assert_eq!(result, img);
    }

    #[test]
    fn test_center_crop() {
        let img = test_image(10, 10);
        let result = apply_crop(&img, &rect(2, 2, 8, 8));

        assert_eq!(result.width, 6);
        assert_eq!(result.height, 6);
        // (2, 2) in the source
        assert_eq!(result.pixel(0, 0), [22, 22, 22]);
        // (7, 7) in the source
        assert_eq!(result.pixel(5, 5), [77, 77, 77]);
    }

    #[test]
    fn test_crop_clamps_to_bounds() {
        let img = test_image(10, 10);
        let result = apply_crop(&img, &rect(8, 8, 15, 15));

        assert_eq!(result.width, 2);
        assert_eq!(result.height, 2);
        assert_eq!(result.pixel(1, 1), [99, 99, 99]);
    }

    #[test]
    fn test_crop_outside_page_is_empty() {
        let img = test_image(10, 10);
        let result = apply_crop(&img, &rect(12, 0, 20, 5));
        assert!(result.is_empty());
        assert!(result.pixels.is_empty());
    }

    #[test]
    fn test_inverted_rect_is_empty() {
        let img = test_image(10, 10);
        let result = apply_crop(&img, &rect(6, 6, 3, 3));
        assert_eq!((result.width, result.height), (0, 0));
    }

    #[test]
    fn test_crop_single_row() {
        let img = test_image(10, 10);
        let result = apply_crop(&img, &rect(0, 3, 10, 4));

        assert_eq!((result.width, result.height), (10, 1));
        assert_eq!(result.pixels.len(), 30);
        assert_eq!(result.pixel(9, 0), [39, 39, 39]);
    }
}
