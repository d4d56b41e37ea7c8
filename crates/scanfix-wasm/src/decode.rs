//! Page decoding bindings.
//!
//! ```typescript
//! import { decode_image } from '@scanfix/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const page = decode_image(bytes);
//! console.log(`Decoded ${page.width}x${page.height}`);
//! ```

use crate::types::JsDecodedImage;
use scanfix_core::decode;
use wasm_bindgen::prelude::*;

/// Decode a JPEG, PNG or GIF page, applying its EXIF orientation.
///
/// # Errors
///
/// Returns an error if the format is unsupported or the data is corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Decode a page without applying EXIF orientation.
#[wasm_bindgen]
pub fn decode_image_raw(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image_no_orientation(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// EXIF orientation value (1-8) of an encoded page, 1 when absent.
#[wasm_bindgen]
pub fn get_orientation(bytes: &[u8]) -> u8 {
    decode::get_orientation(bytes) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use scanfix_core::encode::encode_jpeg;

    #[test]
    fn test_orientation_of_plain_jpeg() {
        let jpeg = encode_jpeg(&[200u8; 8 * 8 * 3], 8, 8, 90).unwrap();
        assert_eq!(get_orientation(&jpeg), 1);
    }

    #[test]
    fn test_orientation_of_garbage() {
        assert_eq!(get_orientation(&[0, 1, 2, 3]), 1);
    }
}

/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use scanfix_core::encode::encode_jpeg;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_decode_jpeg_page() {
        let jpeg = encode_jpeg(&[128u8; 16 * 8 * 3], 16, 8, 90).unwrap();
        let page = decode_image(&jpeg).unwrap();
        assert_eq!((page.width(), page.height()), (16, 8));
    }

    #[wasm_bindgen_test]
    fn test_decode_invalid_bytes() {
        assert!(decode_image(&[0, 1, 2, 3]).is_err());
    }
}
