//! Page encoding bindings.
//!
//! ```typescript
//! import { encode_page } from '@scanfix/wasm';
//!
//! const jpegBytes = encode_page(page, 90);
//! ```

use crate::types::JsDecodedImage;
use scanfix_core::encode;
use wasm_bindgen::prelude::*;

/// Encode RGB pixel data to JPEG bytes.
///
/// # Errors
///
/// Returns an error if the pixel data length doesn't match
/// `width * height * 3`, a dimension is zero, or encoding fails.
#[wasm_bindgen]
pub fn encode_jpeg(pixels: &[u8], width: u32, height: u32, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(pixels, width, height, quality).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode a page to JPEG bytes.
#[wasm_bindgen]
pub fn encode_page(image: &JsDecodedImage, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_page(&image.to_decoded(), quality).map_err(|e| JsValue::from_str(&e.to_string()))
}
