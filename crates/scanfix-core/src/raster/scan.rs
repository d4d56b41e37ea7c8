//! Projection-profile line scanning.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::Raster;

/// Per-side pixel amounts (padding or margin).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Sides {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl Sides {
    /// Same amount on all four sides.
    pub fn uniform(value: u32) -> Self {
        Self {
            top: value,
            bottom: value,
            left: value,
            right: value,
        }
    }
}

/// Line classification and boundary offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScanConfig {
    /// Sample cut point between paper and ink (0-255).
    pub threshold: u8,
    /// Foreground samples a line may contain and still count as blank.
    pub tolerance_count: u32,
    /// Bands excluded from boundary scanning, e.g. scanner noise strips.
    pub padding: Sides,
    /// Safety buffer added back outward from each detected edge.
    pub margin: Sides,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            threshold: 128,
            tolerance_count: 0,
            padding: Sides::default(),
            margin: Sides::default(),
        }
    }
}

/// A row or a column of a raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    /// Row at the given y, spanning x.
    Row(u32),
    /// Column at the given x, spanning y.
    Column(u32),
}

/// Report whether `line` carries content within `span`.
///
/// Counts foreground samples and returns `true` as soon as the count exceeds
/// `cfg.tolerance_count`; samples past that point are never read. The span is
/// clipped to the raster.
pub fn scan_line(raster: &Raster, line: Line, span: Range<u32>, cfg: &ScanConfig) -> bool {
    let threshold = cfg.threshold;
    let tolerance = cfg.tolerance_count as usize;

    match line {
        Line::Row(y) if y < raster.height() => {
            let end = span.end.min(raster.width());
            (span.start..end)
                .filter(|&x| raster.is_foreground(x, y, threshold))
                .nth(tolerance)
                .is_some()
        }
        Line::Column(x) if x < raster.width() => {
            let end = span.end.min(raster.height());
            (span.start..end)
                .filter(|&y| raster.is_foreground(x, y, threshold))
                .nth(tolerance)
                .is_some()
        }
        _ => false,
    }
}

/// Number of full-width rows classified as content.
///
/// This is the skew score: the fewer rows the ink is smeared across, the
/// better horizontal text lines are aligned with the pixel grid.
pub fn count_content_rows(raster: &Raster, cfg: &ScanConfig) -> u32 {
    let width = raster.width();
    (0..raster.height())
        .filter(|&y| scan_line(raster, Line::Row(y), 0..width, cfg))
        .count() as u32
}
