//! Scanfix WASM - WebAssembly bindings for scanfix-core
//!
//! Exposes page decoding, auto-crop, deskew, the filter pipeline and JPEG
//! export to JavaScript/TypeScript document pipelines.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrappers for pages and results
//! - `decode` - Page decoding (JPEG, PNG, GIF) with EXIF orientation
//! - `normalize` - Auto-crop, deskew and JSON filter pipelines
//! - `transform` - Rotation and crop primitives
//! - `encode` - JPEG export
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, run_pipeline, encode_page } from '@scanfix/wasm';
//!
//! await init();
//!
//! const page = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const result = run_pipeline(page, JSON.stringify({ filters: [{ name: 'deskew', options: {} }] }));
//! const jpeg = encode_page(result.image(), 90);
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod normalize;
mod transform;
mod types;

pub use decode::{decode_image, decode_image_raw, get_orientation};
pub use encode::{encode_jpeg, encode_page};
pub use normalize::{auto_crop, deskew, run_pipeline, JsPipelineResult};
pub use transform::{apply_crop, apply_crop_rect, apply_rotation};
pub use types::{JsCropRect, JsDecodedImage, JsSkewResult};

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
