//! WASM-compatible wrapper types.
//!
//! JavaScript sees pages as `JsDecodedImage` and results as small
//! getter-only objects. Conversions to and from the core types live here.

use scanfix_core::{CropRect, DecodeError, DecodedImage, SkewResult};
use wasm_bindgen::prelude::*;

/// A decoded RGB page held in WASM memory.
///
/// Calling `pixels()` copies the buffer into a JavaScript `Uint8Array`.
/// Keep pages in WASM memory between filter calls and only extract pixels
/// for display or export.
#[wasm_bindgen]
#[derive(Debug, Clone, PartialEq)]
pub struct JsDecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsDecodedImage {
    /// Create a page from RGB pixel data (3 bytes per pixel, row-major order).
    ///
    /// Throws when `pixels` is not exactly `width * height * 3` bytes long.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsDecodedImage, JsValue> {
        Self::try_new(width, height, pixels).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 3)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// Optional; the finalizer releases the buffer otherwise.
    pub fn free(self) {}
}

impl JsDecodedImage {
    /// Checked constructor. Every page reaching the core goes through here
    /// or [`JsDecodedImage::from_decoded`], so the buffer length always
    /// matches the dimensions.
    pub(crate) fn try_new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, DecodeError> {
        DecodedImage::from_raw(width, height, pixels).map(Self::from_decoded)
    }

    pub(crate) fn from_decoded(img: DecodedImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }

    /// Copy into a core page.
    pub(crate) fn to_decoded(&self) -> DecodedImage {
        DecodedImage::new(self.width, self.height, self.pixels.clone())
    }
}

/// Crop rectangle in pixels, right and bottom exclusive.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsCropRect {
    inner: CropRect,
}

#[wasm_bindgen]
impl JsCropRect {
    #[wasm_bindgen(getter)]
    pub fn left(&self) -> u32 {
        self.inner.left
    }

    #[wasm_bindgen(getter)]
    pub fn top(&self) -> u32 {
        self.inner.top
    }

    #[wasm_bindgen(getter)]
    pub fn right(&self) -> u32 {
        self.inner.right
    }

    #[wasm_bindgen(getter)]
    pub fn bottom(&self) -> u32 {
        self.inner.bottom
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }
}

impl From<CropRect> for JsCropRect {
    fn from(inner: CropRect) -> Self {
        Self { inner }
    }
}

impl From<JsCropRect> for CropRect {
    fn from(rect: JsCropRect) -> Self {
        rect.inner
    }
}

/// Detected skew angle and its score.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JsSkewResult {
    inner: SkewResult,
}

#[wasm_bindgen]
impl JsSkewResult {
    /// Correcting rotation in degrees, positive = counter-clockwise
    #[wasm_bindgen(getter)]
    pub fn angle(&self) -> f64 {
        self.inner.angle
    }

    /// Content row count at `angle`
    #[wasm_bindgen(getter)]
    pub fn score(&self) -> u32 {
        self.inner.score
    }

    /// True when the page needs rotating
    pub fn is_rotated(&self) -> bool {
        self.inner.is_rotated()
    }
}

impl From<SkewResult> for JsSkewResult {
    fn from(inner: SkewResult) -> Self {
        Self { inner }
    }
}
