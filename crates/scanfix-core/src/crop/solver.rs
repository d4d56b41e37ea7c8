//! Constrained crop rectangle solving.
//!
//! The boundary detector finds where the content is. The solver turns that
//! into the rectangle that is actually cut out, honouring two limits the
//! caller sets on the result:
//!
//! - **Max crop rate**: at most this fraction of each page dimension may be
//!   removed, which puts a floor under the output size.
//! - **Ratio bounds**: the output `height / width` must stay inside
//!   `[min_ratio, max_ratio]`.
//!
//! Any growth needed to meet them is split evenly between the two sides of
//! the axis. A side that runs into the page edge hands its shortfall to the
//! opposite side, and when both sides are out of room the rectangle stops at
//! the page edge.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::NormalizeError;
use crate::geometry::{BoundaryBox, CropRect};

/// Absorbs binary rounding in products such as `0.8 * 350`.
const FLOOR_EPSILON: f64 = 1e-9;

/// Geometric limits on the final crop rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CropConstraints {
    /// Lowest allowed `height / width`.
    pub min_ratio: f64,
    /// Highest allowed `height / width`.
    pub max_ratio: f64,
    /// Largest fraction of the page width that may be removed, in `[0, 1)`.
    pub max_width_crop_rate: f64,
    /// Largest fraction of the page height that may be removed, in `[0, 1)`.
    pub max_height_crop_rate: f64,
}

impl Default for CropConstraints {
    fn default() -> Self {
        Self {
            min_ratio: 0.0,
            max_ratio: f64::MAX,
            max_width_crop_rate: 0.5,
            max_height_crop_rate: 0.5,
        }
    }
}

impl CropConstraints {
    /// Check that the limits can be satisfied together.
    pub fn validate(&self) -> Result<(), NormalizeError> {
        for rate in [self.max_width_crop_rate, self.max_height_crop_rate] {
            if !(0.0..1.0).contains(&rate) {
                return Err(NormalizeError::InvalidCropRate(rate));
            }
        }

        let ratio_error = NormalizeError::InvalidRatio {
            min: self.min_ratio,
            max: self.max_ratio,
        };
        if self.min_ratio.is_nan() || self.max_ratio.is_nan() {
            return Err(ratio_error);
        }
        if self.min_ratio < 0.0 || self.max_ratio <= 0.0 || self.min_ratio > self.max_ratio {
            return Err(ratio_error);
        }
        Ok(())
    }

    /// Smallest width the output may have on a page `image_width` wide.
    pub fn min_width(&self, image_width: u32) -> u32 {
        floor_dim((1.0 - self.max_width_crop_rate) * image_width as f64)
    }

    /// Smallest height the output may have on a page `image_height` tall.
    pub fn min_height(&self, image_height: u32) -> u32 {
        floor_dim((1.0 - self.max_height_crop_rate) * image_height as f64)
    }
}

fn floor_dim(value: f64) -> u32 {
    (value + FLOOR_EPSILON).floor().clamp(0.0, u32::MAX as f64) as u32
}

/// Grow `boundary` until it satisfies `constraints` on a page of `image_size`.
///
/// A box with no area means nothing was detected, and the full page is
/// returned. The result always lies within the page; when the page is too
/// small to meet a target the rectangle saturates at its edges and a
/// warning is logged.
pub fn solve_crop_rect(
    boundary: BoundaryBox,
    image_size: (u32, u32),
    constraints: &CropConstraints,
) -> CropRect {
    let (image_width, image_height) = image_size;
    if boundary.is_empty() {
        return CropRect::full(image_width, image_height);
    }

    let init_width = boundary.width();
    let init_height = boundary.height();

    let mut width = init_width.max(constraints.min_width(image_width));
    let mut height = init_height.max(constraints.min_height(image_height));

    let ratio = height as f64 / width as f64;
    if ratio < constraints.min_ratio {
        height = height.max(floor_dim(width as f64 * constraints.min_ratio));
    } else if ratio > constraints.max_ratio {
        width = width.max(floor_dim(height as f64 / constraints.max_ratio));
    }

    let (left, right) = grow(boundary.left, boundary.right, width - init_width, image_width);
    let (top, bottom) = grow(boundary.top, boundary.bottom, height - init_height, image_height);
    let rect = CropRect {
        left,
        top,
        right,
        bottom,
    };

    if rect.width() < width || rect.height() < height {
        warn!(
            target_width = width,
            target_height = height,
            width = rect.width(),
            height = rect.height(),
            "crop rectangle saturated at the page edge"
        );
    }
    rect
}

/// Widen the span `[lo, hi)` by `inc` inside `[0, limit)`.
///
/// Half of the growth goes to each side. A side short on room passes the
/// remainder to the other one; whatever neither side can take is dropped.
fn grow(lo: u32, hi: u32, inc: u32, limit: u32) -> (u32, u32) {
    if inc == 0 {
        return (lo, hi);
    }
    let room_lo = lo;
    let room_hi = limit.saturating_sub(hi);

    let mut take_lo = room_lo.min(inc / 2);
    let take_hi = room_hi.min(inc - take_lo);
    let shortfall = inc - take_lo - take_hi;
    take_lo = (take_lo + shortfall).min(room_lo);

    (lo - take_lo, hi + take_hi)
}
