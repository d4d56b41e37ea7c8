//! Scanfix Core - scanned page normalization
//!
//! This crate removes excess background border from scanned pages
//! ("auto-crop") and straightens pages that were fed into the scanner at a
//! slight angle ("deskew").
//!
//! The two per-page entry points are [`auto_crop`], which returns the
//! rectangle to keep, and [`deskew`], which returns the correcting angle.
//! Both read a [`Raster`], a single-channel view of the page in either
//! luminance or edge-magnitude mode. Applying the result to the RGB page is
//! done with [`apply_crop`] and [`apply_rotation`], or all at once through a
//! [`Pipeline`] of named filters.

pub mod crop;
pub mod decode;
pub mod deskew;
pub mod encode;
pub mod error;
pub mod geometry;
pub mod pipeline;
pub mod raster;
pub mod transform;

pub use crop::{auto_crop, detect_boundary, solve_crop_rect, CropCaps, CropConstraints};
pub use decode::{decode_image, DecodeError, DecodedImage};
pub use deskew::{deskew, SearchStrategy, SkewResult, SkewSearchConfig};
pub use encode::{encode_jpeg, encode_page, EncodeError};
pub use error::NormalizeError;
pub use geometry::{BoundaryBox, CropRect};
pub use pipeline::{FilterReport, FilterSpec, Pipeline, PipelineOutput};
pub use raster::{Raster, SampleMode, ScanConfig, Sides};
pub use transform::{apply_crop, apply_rotation, rotated_size, InterpolationFilter};
