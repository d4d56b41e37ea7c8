//! Read-only sample views over a page.
//!
//! Every scanner in the engine reads a single 8-bit sample per pixel. The
//! sample is either the page luminance (ink is dark) or the response of a
//! Laplacian edge filter (ink outlines are bright). [`SampleMode`] carries
//! the differences between the two so that the boundary detector and the
//! skew search have a single implementation.

mod scan;

pub use scan::{count_content_rows, scan_line, Line, ScanConfig, Sides};

use image::{GrayImage, Luma};
use serde::{Deserialize, Serialize};

use crate::decode::DecodedImage;

/// High-pass kernel used to build edge-magnitude rasters.
pub const EDGE_KERNEL: [f32; 9] = [-1.0, -1.0, -1.0, -1.0, 8.0, -1.0, -1.0, -1.0, -1.0];

/// How raster samples are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SampleMode {
    /// Mean of the RGB channels; foreground falls below the threshold.
    #[default]
    Luminance,
    /// Laplacian edge response; foreground exceeds the threshold.
    EdgeMagnitude,
}

impl SampleMode {
    /// Whether `sample` counts as ink under `threshold`.
    #[inline]
    pub fn is_foreground(self, sample: u8, threshold: u8) -> bool {
        match self {
            SampleMode::Luminance => sample < threshold,
            SampleMode::EdgeMagnitude => sample > threshold,
        }
    }

    /// Sample value of blank paper, used to fill uncovered canvas on rotation.
    pub fn background(self) -> u8 {
        match self {
            SampleMode::Luminance => u8::MAX,
            SampleMode::EdgeMagnitude => 0,
        }
    }

    /// Distance in pixels between the detected response and the ink itself.
    ///
    /// The Laplacian fires on the paper pixel next to the ink, one pixel
    /// outside the content on every side.
    pub fn halo(self) -> u32 {
        match self {
            SampleMode::Luminance => 0,
            SampleMode::EdgeMagnitude => 1,
        }
    }
}

/// A single-channel sample grid derived from a page.
///
/// Immutable once built; each detection or search call reads it without
/// keeping any state between calls.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    samples: GrayImage,
    mode: SampleMode,
}

impl Raster {
    /// Wrap an existing sample grid.
    pub fn new(samples: GrayImage, mode: SampleMode) -> Self {
        Self { samples, mode }
    }

    /// Build a raster of the requested mode from an RGB page.
    pub fn from_image(image: &DecodedImage, mode: SampleMode) -> Self {
        match mode {
            SampleMode::Luminance => Self::luminance(image),
            SampleMode::EdgeMagnitude => Self::edge_magnitude(image),
        }
    }

    /// Luminance raster: arithmetic mean of the three channels.
    pub fn luminance(image: &DecodedImage) -> Self {
        Self::new(luminance_grid(image), SampleMode::Luminance)
    }

    /// Edge-magnitude raster: luminance filtered with [`EDGE_KERNEL`].
    ///
    /// Border pixels, which the 3x3 kernel cannot cover, read as zero.
    pub fn edge_magnitude(image: &DecodedImage) -> Self {
        let samples = if image.width < 3 || image.height < 3 {
            GrayImage::new(image.width, image.height)
        } else {
            image::imageops::filter3x3(&luminance_grid(image), &EDGE_KERNEL)
        };
        Self::new(samples, SampleMode::EdgeMagnitude)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.samples.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.samples.height()
    }

    pub fn mode(&self) -> SampleMode {
        self.mode
    }

    /// Borrow the underlying sample grid.
    pub fn samples(&self) -> &GrayImage {
        &self.samples
    }

    /// True when the raster has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Sample value at `(x, y)`. Panics when out of bounds.
    #[inline]
    pub fn sample(&self, x: u32, y: u32) -> u8 {
        self.samples.get_pixel(x, y).0[0]
    }

    /// Whether the pixel at `(x, y)` is ink under `threshold`.
    #[inline]
    pub fn is_foreground(&self, x: u32, y: u32, threshold: u8) -> bool {
        self.mode.is_foreground(self.sample(x, y), threshold)
    }
}

fn luminance_grid(image: &DecodedImage) -> GrayImage {
    GrayImage::from_fn(image.width, image.height, |x, y| {
        let [r, g, b] = image.pixel(x, y);
        Luma([((r as u16 + g as u16 + b as u16) / 3) as u8])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [u8; 3] = [255, 255, 255];
    const BLACK: [u8; 3] = [0, 0, 0];

    fn page_with_block() -> DecodedImage {
        let mut page = DecodedImage::filled(20, 20, WHITE);
        page.fill_rect(5, 5, 15, 15, BLACK);
        page
    }

    #[test]
    fn test_luminance_is_channel_mean() {
        let mut page = DecodedImage::filled(2, 1, WHITE);
        page.fill_rect(0, 0, 1, 1, [30, 60, 90]);

        let raster = Raster::luminance(&page);
        assert_eq!(raster.sample(0, 0), 60);
        assert_eq!(raster.sample(1, 0), 255);
    }

    #[test]
    fn test_luminance_polarity() {
        let raster = Raster::luminance(&page_with_block());
        assert!(raster.is_foreground(10, 10, 128));
        assert!(!raster.is_foreground(0, 0, 128));
    }

    #[test]
    fn test_edge_magnitude_outlines_block() {
        let raster = Raster::edge_magnitude(&page_with_block());

        // Paper pixel next to the block responds strongly
        assert_eq!(raster.sample(4, 10), 255);
        // Ink interior and paper far from the block are flat
        assert_eq!(raster.sample(10, 10), 0);
        assert_eq!(raster.sample(1, 1), 0);
        // Ink side of the boundary is clamped to zero
        assert_eq!(raster.sample(5, 10), 0);

        assert!(raster.is_foreground(4, 10, 100));
        assert!(!raster.is_foreground(10, 10, 100));
    }

    #[test]
    fn test_edge_magnitude_tiny_page() {
        let page = DecodedImage::filled(2, 2, BLACK);
        let raster = Raster::edge_magnitude(&page);
        assert_eq!((raster.width(), raster.height()), (2, 2));
        assert!(raster.samples().pixels().all(|p| p.0[0] == 0));
    }

    #[test]
    fn test_sample_mode_background_is_not_foreground() {
        for mode in [SampleMode::Luminance, SampleMode::EdgeMagnitude] {
            for threshold in [1u8, 100, 128, 254] {
                assert!(!mode.is_foreground(mode.background(), threshold));
            }
        }
    }

    #[test]
    fn test_halo() {
        assert_eq!(SampleMode::Luminance.halo(), 0);
        assert_eq!(SampleMode::EdgeMagnitude.halo(), 1);
    }

    #[test]
    fn test_empty_raster() {
        let raster = Raster::luminance(&DecodedImage::new(0, 0, vec![]));
        assert!(raster.is_empty());
    }
}
