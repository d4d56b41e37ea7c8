//! Content boundary detection.
//!
//! Each side is found by scanning lines inward from that side until the
//! first line with content. Sides are resolved in a fixed order because
//! the scan span of each one is bounded by the sides found before it:
//! top, then bottom, then left, then right.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geometry::BoundaryBox;
use crate::raster::{scan_line, Line, Raster, ScanConfig};

/// Absolute limits on how far each side may move inward, in pixels.
///
/// A `None` side is unlimited. `Some(0)` pins that side to the page edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CropCaps {
    pub top: Option<u32>,
    pub bottom: Option<u32>,
    pub left: Option<u32>,
    pub right: Option<u32>,
}

impl CropCaps {
    /// Same cap on all four sides.
    pub fn uniform(value: u32) -> Self {
        Self {
            top: Some(value),
            bottom: Some(value),
            left: Some(value),
            right: Some(value),
        }
    }

    /// Build caps from the flat integer form used in filter options.
    ///
    /// All four zero means no caps at all, and a negative value leaves
    /// that single side unlimited.
    pub fn from_legacy(top: i64, bottom: i64, left: i64, right: i64) -> Option<Self> {
        if top == 0 && bottom == 0 && left == 0 && right == 0 {
            return None;
        }
        let side = |v: i64| u32::try_from(v).ok();
        Some(Self {
            top: side(top),
            bottom: side(bottom),
            left: side(left),
            right: side(right),
        })
    }

    /// True when no side carries a limit.
    pub fn is_unlimited(&self) -> bool {
        self.top.is_none() && self.bottom.is_none() && self.left.is_none() && self.right.is_none()
    }
}

/// Inclusive edges as found by the scans, before conversion to a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Edges {
    top: i64,
    bottom: i64,
    left: i64,
    right: i64,
}

/// Locate the content rectangle of `raster`.
///
/// Padding bands are skipped while scanning and margins are added back
/// outward from each detected edge. Caps then limit how far each side may
/// have moved inward. When no row carries content the result is
/// [`BoundaryBox::empty`], and caps are not applied.
pub fn detect_boundary(raster: &Raster, cfg: &ScanConfig, caps: Option<&CropCaps>) -> BoundaryBox {
    let width = raster.width();
    let height = raster.height();
    if raster.is_empty() {
        return BoundaryBox::empty(width, height);
    }

    let Some(mut edges) = find_edges(raster, cfg) else {
        debug!(width, height, "no content found");
        return BoundaryBox::empty(width, height);
    };

    if let Some(caps) = caps.filter(|c| !c.is_unlimited()) {
        apply_caps(&mut edges, caps, width as i64, height as i64);
    }

    let top = edges.top.clamp(0, height as i64) as u32;
    let left = edges.left.clamp(0, width as i64) as u32;
    let bottom = (edges.bottom + 1).clamp(top as i64, height as i64) as u32;
    let right = (edges.right + 1).clamp(left as i64, width as i64) as u32;

    let boundary = BoundaryBox {
        top,
        bottom,
        left,
        right,
    };
    debug!(?boundary, "detected content boundary");
    boundary
}

fn find_edges(raster: &Raster, cfg: &ScanConfig) -> Option<Edges> {
    let width = raster.width() as i64;
    let height = raster.height() as i64;
    let pad = &cfg.padding;
    let margin = &cfg.margin;
    let halo = raster.mode().halo() as i64;

    let x_start = pad.left as i64;
    let x_end = width - pad.right as i64;
    let y_end = height - pad.bottom as i64;
    let columns = span(x_start, x_end);

    let has_row = |y: i64, cols: std::ops::Range<u32>| scan_line(raster, Line::Row(y as u32), cols, cfg);
    let has_column = |x: i64, rows: std::ops::Range<u32>| scan_line(raster, Line::Column(x as u32), rows, cfg);

    let top = (pad.top as i64..y_end)
        .find(|&y| has_row(y, columns.clone()))
        .map(|y| (y - margin.top as i64).max(0) + halo)?;

    let bottom = (top + 1..y_end)
        .rev()
        .find(|&y| has_row(y, columns.clone()))
        .map_or(top, |y| (y - halo + margin.bottom as i64).min(height - 1));

    let left = (x_start..x_end)
        .find(|&x| has_column(x, span(top + 1, y_end)))
        .map_or(width, |x| (x - margin.left as i64).max(0) + halo);

    let right = (left + 1..x_end)
        .rev()
        .find(|&x| has_column(x, span(top + 1, bottom)))
        .map_or(left, |x| (x - halo + margin.right as i64).min(width - 1));

    Some(Edges {
        top,
        bottom,
        left,
        right,
    })
}

fn apply_caps(edges: &mut Edges, caps: &CropCaps, width: i64, height: i64) {
    if let Some(cap) = caps.top {
        edges.top = edges.top.min(cap as i64);
    }
    if let Some(cap) = caps.bottom {
        edges.bottom = edges.bottom.max(height - cap as i64);
    }
    if let Some(cap) = caps.left {
        edges.left = edges.left.min(cap as i64);
    }
    if let Some(cap) = caps.right {
        edges.right = edges.right.max(width - cap as i64);
    }
}

/// Clip a signed half-open range to `u32` scan coordinates.
fn span(start: i64, end: i64) -> std::ops::Range<u32> {
    let start = start.clamp(0, u32::MAX as i64) as u32;
    let end = end.clamp(0, u32::MAX as i64) as u32;
    start..end.max(start)
}
