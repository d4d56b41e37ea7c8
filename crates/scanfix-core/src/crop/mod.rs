//! Automatic border removal.
//!
//! [`auto_crop`] runs the two stages back to back: [`detect_boundary`]
//! finds the content, [`solve_crop_rect`] grows it to meet the caller's
//! geometric limits. The result is a pixel rectangle; cutting the image is
//! left to [`crate::transform::apply_crop`].

mod boundary;
mod solver;

pub use boundary::{detect_boundary, CropCaps};
pub use solver::{solve_crop_rect, CropConstraints};

use tracing::{info, instrument};

use crate::error::NormalizeError;
use crate::geometry::CropRect;
use crate::raster::{Raster, ScanConfig};

/// Compute the crop rectangle for one page.
///
/// Returns the full page when no content was found or the content already
/// touches every edge.
#[instrument(skip_all, fields(width = raster.width(), height = raster.height(), mode = ?raster.mode()))]
pub fn auto_crop(
    raster: &Raster,
    scan: &ScanConfig,
    caps: Option<CropCaps>,
    constraints: &CropConstraints,
) -> Result<CropRect, NormalizeError> {
    constraints.validate()?;

    let (width, height) = (raster.width(), raster.height());
    let boundary = detect_boundary(raster, scan, caps.as_ref());
    if boundary.is_empty() || boundary.is_full(width, height) {
        return Ok(CropRect::full(width, height));
    }

    let rect = solve_crop_rect(boundary, (width, height), constraints);
    if !rect.is_full(width, height) {
        info!(?rect, crop_width = rect.width(), crop_height = rect.height(), "cropping page");
    }
    Ok(rect)
}
