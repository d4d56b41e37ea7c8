//! Page rotation with bilinear and bicubic interpolation.
//!
//! The rotation uses inverse mapping: for each pixel of the output canvas
//! we locate the source position and interpolate around it. Source taps
//! that fall outside the page read the fill value, so the uncovered
//! corners of the enlarged canvas become blank paper.
//!
//! For rotation by angle θ about the pixel-centre of the page:
//! ```text
//! src_x = (dst_x - dst_cx) * cos(θ) - (dst_y - dst_cy) * sin(θ) + src_cx
//! src_y = (dst_x - dst_cx) * sin(θ) + (dst_y - dst_cy) * cos(θ) + src_cy
//! ```
//! With the y axis pointing down this turns positive angles counter-clockwise.

use image::GrayImage;
use serde::{Deserialize, Serialize};

use crate::decode::DecodedImage;
use crate::raster::Raster;

/// Interpolation filter for rotation operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InterpolationFilter {
    /// Fast bilinear interpolation over a 2x2 neighbourhood.
    Bilinear,
    /// Catmull-Rom bicubic interpolation over a 4x4 neighbourhood.
    #[default]
    Bicubic,
}

/// Angles closer to zero than this are treated as no rotation.
pub const ANGLE_EPSILON: f64 = 0.001;

/// Extents within this distance of a whole pixel count are snapped to it.
const EXTENT_SNAP: f64 = 0.01;

/// Compute the canvas size that holds a `width` x `height` page rotated by
/// `angle_degrees`.
///
/// The four corner pixel-centres are rotated about the page centre and the
/// axis-aligned bounding box of the result is taken. An extent that is not
/// within 0.01 of a whole number gets 2 extra pixels so that interpolation
/// never clips the rotated corners. Empty pages yield `(0, 0)`.
pub fn rotated_size(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let x_off = (width as f64 - 1.0) / 2.0;
    let y_off = (height as f64 - 1.0) / 2.0;
    let (sin, cos) = angle_degrees.to_radians().sin_cos();

    let corners = [(-x_off, -y_off), (x_off, -y_off), (x_off, y_off), (-x_off, y_off)];
    let (mut min_x, mut max_x) = (f64::MAX, f64::MIN);
    let (mut min_y, mut max_y) = (f64::MAX, f64::MIN);
    for (x, y) in corners {
        let rx = x * cos - y * sin;
        let ry = x * sin + y * cos;
        min_x = min_x.min(rx);
        max_x = max_x.max(rx);
        min_y = min_y.min(ry);
        max_y = max_y.max(ry);
    }

    (
        padded_extent(max_x - min_x + 1.0),
        padded_extent(max_y - min_y + 1.0),
    )
}

fn padded_extent(extent: f64) -> u32 {
    let nearest = extent.round();
    if (extent - nearest).abs() <= EXTENT_SNAP {
        nearest as u32
    } else {
        extent.floor() as u32 + 2
    }
}

/// Rotate an RGB page about its centre onto an enlarged canvas.
///
/// Uncovered canvas is painted with `fill`. The output size follows
/// [`rotated_size`].
pub fn apply_rotation(
    image: &DecodedImage,
    angle_degrees: f64,
    fill: [u8; 3],
    filter: InterpolationFilter,
) -> DecodedImage {
    if angle_degrees.abs() < ANGLE_EPSILON {
        return image.clone();
    }

    let source = Source {
        pixels: &image.pixels,
        width: image.width,
        height: image.height,
        fill,
    };
    let (width, height, pixels) = rotate(&source, angle_degrees, filter);
    DecodedImage::new(width, height, pixels)
}

/// Rotate a raster, filling uncovered canvas with its mode's background.
pub fn rotate_raster(raster: &Raster, angle_degrees: f64, filter: InterpolationFilter) -> Raster {
    if angle_degrees.abs() < ANGLE_EPSILON {
        return raster.clone();
    }

    let source = Source {
        pixels: raster.samples().as_raw(),
        width: raster.width(),
        height: raster.height(),
        fill: [raster.mode().background()],
    };
    let (width, height, samples) = rotate(&source, angle_degrees, filter);
    // The buffer length always matches the canvas computed by `rotate`.
    let samples = GrayImage::from_raw(width, height, samples).unwrap_or_else(|| GrayImage::new(width, height));
    Raster::new(samples, raster.mode())
}

/// Interleaved `C`-channel pixel buffer with a fill value for
/// out-of-range reads.
struct Source<'a, const C: usize> {
    pixels: &'a [u8],
    width: u32,
    height: u32,
    fill: [u8; C],
}

impl<const C: usize> Source<'_, C> {
    #[inline]
    fn tap(&self, x: i64, y: i64) -> [f64; C] {
        let mut out = [0.0; C];
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            for (o, f) in out.iter_mut().zip(self.fill) {
                *o = f as f64;
            }
        } else {
            let idx = (y as usize * self.width as usize + x as usize) * C;
            for (o, p) in out.iter_mut().zip(&self.pixels[idx..idx + C]) {
                *o = *p as f64;
            }
        }
        out
    }
}

fn rotate<const C: usize>(
    source: &Source<'_, C>,
    angle_degrees: f64,
    filter: InterpolationFilter,
) -> (u32, u32, Vec<u8>) {
    let (dst_w, dst_h) = rotated_size(source.width, source.height, angle_degrees);
    let (sin, cos) = angle_degrees.to_radians().sin_cos();

    let src_cx = (source.width as f64 - 1.0) / 2.0;
    let src_cy = (source.height as f64 - 1.0) / 2.0;
    let dst_cx = (dst_w as f64 - 1.0) / 2.0;
    let dst_cy = (dst_h as f64 - 1.0) / 2.0;

    let mut output = Vec::with_capacity(dst_w as usize * dst_h as usize * C);
    for dst_y in 0..dst_h {
        let dy = dst_y as f64 - dst_cy;
        for dst_x in 0..dst_w {
            let dx = dst_x as f64 - dst_cx;
            let src_x = dx * cos - dy * sin + src_cx;
            let src_y = dx * sin + dy * cos + src_cy;

            let pixel = match filter {
                InterpolationFilter::Bilinear => sample_bilinear(source, src_x, src_y),
                InterpolationFilter::Bicubic => sample_bicubic(source, src_x, src_y),
            };
            output.extend_from_slice(&pixel);
        }
    }

    (dst_w, dst_h, output)
}

/// Sample using the 4 nearest pixels weighted by distance.
fn sample_bilinear<const C: usize>(source: &Source<'_, C>, x: f64, y: f64) -> [u8; C] {
    let x0 = x.floor();
    let y0 = y.floor();
    let (fx, fy) = (x - x0, y - y0);
    let (x0, y0) = (x0 as i64, y0 as i64);

    let p00 = source.tap(x0, y0);
    let p10 = source.tap(x0 + 1, y0);
    let p01 = source.tap(x0, y0 + 1);
    let p11 = source.tap(x0 + 1, y0 + 1);

    std::array::from_fn(|i| {
        let v = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
        v.clamp(0.0, 255.0).round() as u8
    })
}

/// Sample using a separable Catmull-Rom kernel over a 4x4 neighbourhood.
fn sample_bicubic<const C: usize>(source: &Source<'_, C>, x: f64, y: f64) -> [u8; C] {
    let x0 = x.floor();
    let y0 = y.floor();
    let (fx, fy) = (x - x0, y - y0);
    let (x0, y0) = (x0 as i64, y0 as i64);

    let wx = [
        cubic_weight(fx + 1.0),
        cubic_weight(fx),
        cubic_weight(1.0 - fx),
        cubic_weight(2.0 - fx),
    ];
    let wy = [
        cubic_weight(fy + 1.0),
        cubic_weight(fy),
        cubic_weight(1.0 - fy),
        cubic_weight(2.0 - fy),
    ];

    let mut sum = [0.0f64; C];
    for (ky, weight_y) in wy.iter().enumerate() {
        for (kx, weight_x) in wx.iter().enumerate() {
            let weight = weight_x * weight_y;
            let pixel = source.tap(x0 - 1 + kx as i64, y0 - 1 + ky as i64);
            for (acc, channel) in sum.iter_mut().zip(pixel) {
                *acc += channel * weight;
            }
        }
    }

    sum.map(|v| v.clamp(0.0, 255.0).round() as u8)
}

/// Catmull-Rom cubic convolution weight (a = -0.5).
fn cubic_weight(t: f64) -> f64 {
    const A: f64 = -0.5;
    let t = t.abs();
    if t <= 1.0 {
        ((A + 2.0) * t - (A + 3.0)) * t * t + 1.0
    } else if t < 2.0 {
        ((A * t - 5.0 * A) * t + 8.0 * A) * t - 4.0 * A
    } else {
        0.0
    }
}
