//! Auto-crop, deskew and filter pipeline bindings.
//!
//! Options are plain JavaScript objects using the same camelCase keys as
//! the filter configuration files; missing keys take their defaults.
//!
//! ```typescript
//! import { auto_crop, deskew, apply_crop_rect, apply_rotation } from '@scanfix/wasm';
//!
//! const skew = deskew(page, { maxRotation: 2, incrStep: 0.2, threshold: 220 }, false);
//! const straight = skew.is_rotated() ? apply_rotation(page, skew.angle, true) : page;
//!
//! const rect = auto_crop(straight, { threshold: 128, marginTop: 10 }, false);
//! const cropped = apply_crop_rect(straight, rect);
//! ```

use crate::types::{JsCropRect, JsDecodedImage, JsSkewResult};
use scanfix_core::pipeline::{AutoCropOptions, DeskewOptions};
use scanfix_core::{
    auto_crop as core_auto_crop, deskew as core_deskew, CropRect, DecodedImage, FilterReport, NormalizeError,
    Pipeline, Raster, SampleMode, SkewResult,
};
use wasm_bindgen::prelude::*;

fn sample_mode(use_edges: bool) -> SampleMode {
    if use_edges {
        SampleMode::EdgeMagnitude
    } else {
        SampleMode::Luminance
    }
}

fn to_js_error(err: NormalizeError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn parse_options<T: serde::de::DeserializeOwned + Default>(options: JsValue) -> Result<T, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(options).map_err(|e| JsValue::from_str(&format!("Invalid options: {}", e)))
}

fn crop_rect_for(page: &DecodedImage, options: &AutoCropOptions, mode: SampleMode) -> Result<CropRect, NormalizeError> {
    let raster = Raster::from_image(page, mode);
    core_auto_crop(&raster, &options.scan_config(), options.caps(), &options.constraints())
}

fn skew_for(page: &DecodedImage, options: &DeskewOptions, mode: SampleMode) -> Result<SkewResult, NormalizeError> {
    let raster = Raster::from_image(page, mode);
    core_deskew(&raster, &options.search_config())
}

/// Find the crop rectangle for a page.
///
/// # Arguments
///
/// * `options` - Auto-crop options object, or `undefined` for defaults
/// * `use_edges` - Scan an edge map instead of luminance
#[wasm_bindgen]
pub fn auto_crop(image: &JsDecodedImage, options: JsValue, use_edges: bool) -> Result<JsCropRect, JsValue> {
    let options: AutoCropOptions = parse_options(options)?;
    crop_rect_for(&image.to_decoded(), &options, sample_mode(use_edges))
        .map(JsCropRect::from)
        .map_err(to_js_error)
}

/// Find the rotation that straightens a page.
///
/// # Arguments
///
/// * `options` - Deskew options object, or `undefined` for defaults
/// * `use_edges` - Scan an edge map instead of luminance
#[wasm_bindgen]
pub fn deskew(image: &JsDecodedImage, options: JsValue, use_edges: bool) -> Result<JsSkewResult, JsValue> {
    let options: DeskewOptions = parse_options(options)?;
    skew_for(&image.to_decoded(), &options, sample_mode(use_edges))
        .map(JsSkewResult::from)
        .map_err(to_js_error)
}

/// Output of [`run_pipeline`].
#[wasm_bindgen]
pub struct JsPipelineResult {
    image: JsDecodedImage,
    reports: Vec<FilterReport>,
}

#[wasm_bindgen]
impl JsPipelineResult {
    /// The normalized page (copied).
    pub fn image(&self) -> JsDecodedImage {
        self.image.clone()
    }

    /// Number of filters that ran.
    #[wasm_bindgen(getter)]
    pub fn filter_count(&self) -> usize {
        self.reports.len()
    }

    /// One report object per filter, in filter order.
    pub fn reports(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.reports).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

fn run_pipeline_json(page: &DecodedImage, config: &str) -> Result<JsPipelineResult, NormalizeError> {
    let output = Pipeline::from_json(config)?.run(page)?;
    Ok(JsPipelineResult {
        image: JsDecodedImage::from_decoded(output.image),
        reports: output.reports,
    })
}

/// Run a JSON filter pipeline on a page.
///
/// ```typescript
/// const result = run_pipeline(page, JSON.stringify({
///   filters: [
///     { name: 'deskew', options: { threshold: 220 } },
///     { name: 'autoCrop', options: { marginTop: 10, marginBottom: 10 } },
///   ],
/// }));
/// const normalized = result.image();
/// ```
#[wasm_bindgen]
pub fn run_pipeline(image: &JsDecodedImage, config: &str) -> Result<JsPipelineResult, JsValue> {
    run_pipeline_json(&image.to_decoded(), config).map_err(to_js_error)
}

/// 200x350 white page with a black block spanning 50..150 by 50..300.
#[cfg(test)]
fn block_page() -> DecodedImage {
    let mut page = DecodedImage::filled(200, 350, [255, 255, 255]);
    page.fill_rect(50, 50, 150, 300, [0, 0, 0]);
    page
}
