//! Parameter validation errors for the normalization engine.
//!
//! The engine performs no I/O, so every error here is a caller bug surfaced
//! before any work is done. "No content found" and "no better angle" are
//! ordinary results, never errors.

use thiserror::Error;

/// Error types for auto-crop, deskew and pipeline configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalizeError {
    /// The skew search step is below 0.001 degrees or not a number.
    #[error("Invalid angle step {0}: must be at least 0.001 degrees")]
    InvalidStep(f64),

    /// The skew search range is negative or not a number.
    #[error("Invalid maximum rotation {0}: must be zero or greater")]
    InvalidRotation(f64),

    /// Ratio bounds are inverted or non-positive.
    #[error("Invalid ratio bounds: min ({min}) must be >= 0 and <= max ({max}), max must be > 0")]
    InvalidRatio { min: f64, max: f64 },

    /// A max-crop rate lies outside `[0, 1)`.
    #[error("Invalid crop rate {0}: must be in [0, 1)")]
    InvalidCropRate(f64),

    /// A pipeline description could not be parsed.
    #[error("Invalid pipeline configuration: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for NormalizeError {
    fn from(err: serde_json::Error) -> Self {
        NormalizeError::InvalidConfig(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NormalizeError::InvalidStep(0.0);
        assert_eq!(err.to_string(), "Invalid angle step 0: must be at least 0.001 degrees");

        let err = NormalizeError::InvalidCropRate(1.5);
        assert_eq!(err.to_string(), "Invalid crop rate 1.5: must be in [0, 1)");
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let err = NormalizeError::from(json_err);
        assert!(matches!(err, NormalizeError::InvalidConfig(_)));
    }
}
