//! Ordered filter chains described in JSON.
//!
//! A pipeline lists the filters to apply to every page, each with its own
//! option map:
//!
//! ```json
//! {
//!   "filters": [
//!     { "name": "deskew", "options": { "maxRotation": 2, "incrStep": 0.2, "threshold": 220 } },
//!     { "name": "autoCrop", "options": { "threshold": 128, "marginTop": 10 } }
//!   ]
//! }
//! ```
//!
//! The `ED` variants of each filter (`deskewED`, `autoCropED`) scan an
//! edge-magnitude raster instead of luminance. Option names are the flat
//! camelCase keys of the filter configuration files; unknown keys are
//! ignored and missing keys take their defaults.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::crop::{auto_crop, CropCaps, CropConstraints};
use crate::decode::DecodedImage;
use crate::deskew::{deskew, SearchStrategy, SkewResult, SkewSearchConfig};
use crate::error::NormalizeError;
use crate::geometry::CropRect;
use crate::raster::{Raster, SampleMode, ScanConfig, Sides};
use crate::transform::{apply_crop, apply_rotation, InterpolationFilter};

/// Paper color painted into the corners uncovered by rotation.
const PAPER: [u8; 3] = [255, 255, 255];

/// Options of the `autoCrop` and `autoCropED` filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AutoCropOptions {
    pub threshold: u8,
    pub min_ratio: f64,
    pub max_ratio: f64,
    pub max_width_crop_rate: f64,
    pub max_height_crop_rate: f64,
    pub empty_line_max_dot_count: u32,
    pub margin_top: u32,
    pub margin_bottom: u32,
    pub margin_left: u32,
    pub margin_right: u32,
    pub padding_top: u32,
    pub padding_bottom: u32,
    pub padding_left: u32,
    pub padding_right: u32,
    /// All four zero disables caps; a negative value disables one side.
    pub max_crop_top: i64,
    pub max_crop_bottom: i64,
    pub max_crop_left: i64,
    pub max_crop_right: i64,
}

impl Default for AutoCropOptions {
    fn default() -> Self {
        let constraints = CropConstraints::default();
        Self {
            threshold: ScanConfig::default().threshold,
            min_ratio: constraints.min_ratio,
            max_ratio: constraints.max_ratio,
            max_width_crop_rate: constraints.max_width_crop_rate,
            max_height_crop_rate: constraints.max_height_crop_rate,
            empty_line_max_dot_count: 0,
            margin_top: 0,
            margin_bottom: 0,
            margin_left: 0,
            margin_right: 0,
            padding_top: 0,
            padding_bottom: 0,
            padding_left: 0,
            padding_right: 0,
            max_crop_top: 0,
            max_crop_bottom: 0,
            max_crop_left: 0,
            max_crop_right: 0,
        }
    }
}

impl AutoCropOptions {
    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            threshold: self.threshold,
            tolerance_count: self.empty_line_max_dot_count,
            padding: Sides {
                top: self.padding_top,
                bottom: self.padding_bottom,
                left: self.padding_left,
                right: self.padding_right,
            },
            margin: Sides {
                top: self.margin_top,
                bottom: self.margin_bottom,
                left: self.margin_left,
                right: self.margin_right,
            },
        }
    }

    pub fn caps(&self) -> Option<CropCaps> {
        CropCaps::from_legacy(
            self.max_crop_top,
            self.max_crop_bottom,
            self.max_crop_left,
            self.max_crop_right,
        )
    }

    pub fn constraints(&self) -> CropConstraints {
        CropConstraints {
            min_ratio: self.min_ratio,
            max_ratio: self.max_ratio,
            max_width_crop_rate: self.max_width_crop_rate,
            max_height_crop_rate: self.max_height_crop_rate,
        }
    }
}

/// Options of the `deskew` and `deskewED` filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeskewOptions {
    pub max_rotation: f64,
    pub incr_step: f64,
    pub empty_line_max_dot_count: u32,
    pub threshold: u8,
    pub strategy: SearchStrategy,
}

impl Default for DeskewOptions {
    fn default() -> Self {
        let search = SkewSearchConfig::default();
        Self {
            max_rotation: search.max_rotation,
            incr_step: search.incr_step,
            empty_line_max_dot_count: search.scan.tolerance_count,
            threshold: search.scan.threshold,
            strategy: search.strategy,
        }
    }
}

impl DeskewOptions {
    pub fn search_config(&self) -> SkewSearchConfig {
        SkewSearchConfig {
            max_rotation: self.max_rotation,
            incr_step: self.incr_step,
            scan: ScanConfig {
                threshold: self.threshold,
                tolerance_count: self.empty_line_max_dot_count,
                ..Default::default()
            },
            strategy: self.strategy,
        }
    }
}

/// One named filter with its options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", content = "options")]
pub enum FilterSpec {
    #[serde(rename = "deskew")]
    Deskew(DeskewOptions),
    #[serde(rename = "deskewED")]
    DeskewEdges(DeskewOptions),
    #[serde(rename = "autoCrop")]
    AutoCrop(AutoCropOptions),
    #[serde(rename = "autoCropED")]
    AutoCropEdges(AutoCropOptions),
}

impl FilterSpec {
    /// Name used in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            FilterSpec::Deskew(_) => "deskew",
            FilterSpec::DeskewEdges(_) => "deskewED",
            FilterSpec::AutoCrop(_) => "autoCrop",
            FilterSpec::AutoCropEdges(_) => "autoCropED",
        }
    }

    /// Raster the filter scans.
    pub fn sample_mode(&self) -> SampleMode {
        match self {
            FilterSpec::Deskew(_) | FilterSpec::AutoCrop(_) => SampleMode::Luminance,
            FilterSpec::DeskewEdges(_) | FilterSpec::AutoCropEdges(_) => SampleMode::EdgeMagnitude,
        }
    }

    pub fn validate(&self) -> Result<(), NormalizeError> {
        match self {
            FilterSpec::Deskew(opts) | FilterSpec::DeskewEdges(opts) => opts.search_config().validate(),
            FilterSpec::AutoCrop(opts) | FilterSpec::AutoCropEdges(opts) => opts.constraints().validate(),
        }
    }

    /// Apply the filter to `page`.
    pub fn apply(&self, page: &DecodedImage) -> Result<(DecodedImage, FilterReport), NormalizeError> {
        let raster = Raster::from_image(page, self.sample_mode());

        match self {
            FilterSpec::Deskew(opts) | FilterSpec::DeskewEdges(opts) => {
                let result = deskew(&raster, &opts.search_config())?;
                let page = if result.is_rotated() {
                    apply_rotation(page, result.angle, PAPER, InterpolationFilter::Bicubic)
                } else {
                    page.clone()
                };
                Ok((page, FilterReport::Deskewed(result)))
            }
            FilterSpec::AutoCrop(opts) | FilterSpec::AutoCropEdges(opts) => {
                let rect = auto_crop(&raster, &opts.scan_config(), opts.caps(), &opts.constraints())?;
                if rect.is_full(page.width, page.height) {
                    Ok((page.clone(), FilterReport::Unchanged))
                } else {
                    Ok((apply_crop(page, &rect), FilterReport::Cropped { rect }))
                }
            }
        }
    }
}

/// What a filter did to the page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FilterReport {
    Cropped { rect: CropRect },
    Deskewed(SkewResult),
    Unchanged,
}

/// Final page and one report per filter, in filter order.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub image: DecodedImage,
    pub reports: Vec<FilterReport>,
}

/// An ordered list of filters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    #[serde(default)]
    pub filters: Vec<FilterSpec>,
}

impl Pipeline {
    pub fn new(filters: Vec<FilterSpec>) -> Self {
        Self { filters }
    }

    /// Parse and validate a pipeline description.
    pub fn from_json(json: &str) -> Result<Self, NormalizeError> {
        let pipeline: Pipeline = serde_json::from_str(json)?;
        pipeline.validate()?;
        Ok(pipeline)
    }

    pub fn validate(&self) -> Result<(), NormalizeError> {
        self.filters.iter().try_for_each(FilterSpec::validate)
    }

    /// Run every filter in order on `image`.
    #[instrument(skip_all, fields(width = image.width, height = image.height, filters = self.filters.len()))]
    pub fn run(&self, image: &DecodedImage) -> Result<PipelineOutput, NormalizeError> {
        let mut current = image.clone();
        let mut reports = Vec::with_capacity(self.filters.len());

        for filter in &self.filters {
            let (next, report) = filter.apply(&current)?;
            debug!(filter = filter.name(), ?report, "filter applied");
            current = next;
            reports.push(report);
        }

        Ok(PipelineOutput {
            image: current,
            reports,
        })
    }
}
