//! Pixel rectangles shared by the boundary detector, the crop solver and
//! the crop primitive.
//!
//! Both rectangle types use top-left inclusive, bottom-right exclusive
//! pixel coordinates.

use serde::{Deserialize, Serialize};

/// Raw content rectangle found by the boundary detector.
///
/// Always satisfies `top <= bottom <= height` and `left <= right <= width`
/// for the raster it was detected on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoundaryBox {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl BoundaryBox {
    /// Box covering a whole `width` x `height` raster.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            top: 0,
            bottom: height,
            left: 0,
            right: width,
        }
    }

    /// Box signalling that no content was found.
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            top: height,
            bottom: height,
            left: width,
            right: width,
        }
    }

    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    /// True when the box has no area.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// True when the box spans the whole raster, i.e. nothing to crop.
    pub fn is_full(&self, width: u32, height: u32) -> bool {
        *self == Self::full(width, height)
    }
}

/// Final crop rectangle produced by the crop solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CropRect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CropRect {
    /// Rectangle covering a whole `width` x `height` image.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            left: 0,
            top: 0,
            right: width,
            bottom: height,
        }
    }

    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    /// True when cropping to this rectangle would leave the image untouched.
    pub fn is_full(&self, width: u32, height: u32) -> bool {
        *self == Self::full(width, height)
    }

    /// True when the rectangle lies inside a `width` x `height` image.
    pub fn is_within(&self, width: u32, height: u32) -> bool {
        self.left <= self.right && self.top <= self.bottom && self.right <= width && self.bottom <= height
    }
}

impl From<BoundaryBox> for CropRect {
    fn from(b: BoundaryBox) -> Self {
        Self {
            left: b.left,
            top: b.top,
            right: b.right,
            bottom: b.bottom,
        }
    }
}
