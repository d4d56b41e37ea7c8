//! Page encoding for archival output.
//!
//! Normalized pages are persisted as JPEG, the format downstream OCR and
//! archival storage consume.

mod jpeg;

pub use jpeg::{encode_jpeg, encode_page, EncodeError, DEFAULT_JPEG_QUALITY};
