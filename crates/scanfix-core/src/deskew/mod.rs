//! Skew detection.
//!
//! A page is scored at a candidate angle by rotating its raster and
//! counting rows that carry content. Text lines that run parallel to the
//! pixel grid pack ink into the fewest rows, so the angle with the lowest
//! count is the one that straightens the page.

mod search;

pub use search::score_angle;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::NormalizeError;
use crate::raster::{Raster, ScanConfig};
use crate::transform::ANGLE_EPSILON;

/// How candidate angles are explored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchStrategy {
    /// Walk outward in both directions, stopping a direction once its
    /// score starts rising.
    #[default]
    HillClimb,
    /// Score every angle in range and keep the global minimum.
    Exhaustive,
}

/// Skew search range and per-angle scoring settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SkewSearchConfig {
    /// Largest angle tried in either direction, in degrees.
    pub max_rotation: f64,
    /// Distance between candidate angles, in degrees.
    pub incr_step: f64,
    /// Row classification. Padding and margin are not used for scoring.
    pub scan: ScanConfig,
    pub strategy: SearchStrategy,
}

impl Default for SkewSearchConfig {
    fn default() -> Self {
        Self {
            max_rotation: 2.0,
            incr_step: 0.2,
            scan: ScanConfig::default(),
            strategy: SearchStrategy::default(),
        }
    }
}

impl SkewSearchConfig {
    /// Steps finer than [`ANGLE_EPSILON`] would only produce angles that
    /// rotation treats as zero.
    pub fn validate(&self) -> Result<(), NormalizeError> {
        if !(self.incr_step >= ANGLE_EPSILON && self.incr_step.is_finite()) {
            return Err(NormalizeError::InvalidStep(self.incr_step));
        }
        if !(self.max_rotation >= 0.0 && self.max_rotation.is_finite()) {
            return Err(NormalizeError::InvalidRotation(self.max_rotation));
        }
        Ok(())
    }

    /// Number of candidate angles on each side of zero.
    pub fn steps(&self) -> u32 {
        (self.max_rotation / self.incr_step + 1e-9).floor() as u32
    }
}

/// Outcome of a skew search.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SkewResult {
    /// Rotation that straightens the page, in degrees (positive = counter-clockwise).
    pub angle: f64,
    /// Content row count at `angle`.
    pub score: u32,
}

impl SkewResult {
    /// True when the page needs rotating.
    pub fn is_rotated(&self) -> bool {
        self.angle.abs() >= ANGLE_EPSILON
    }
}

/// Find the rotation that best aligns the content of `raster` with its rows.
///
/// A page without any content row is reported as straight.
#[instrument(skip_all, fields(width = raster.width(), height = raster.height(), strategy = ?cfg.strategy))]
pub fn deskew(raster: &Raster, cfg: &SkewSearchConfig) -> Result<SkewResult, NormalizeError> {
    cfg.validate()?;
    if raster.is_empty() {
        return Ok(SkewResult::default());
    }

    let baseline = score_angle(raster, 0.0, &cfg.scan);
    if baseline == 0 {
        debug!("no content rows, skipping skew search");
        return Ok(SkewResult::default());
    }

    let result = match cfg.strategy {
        SearchStrategy::HillClimb => search::hill_climb(raster, cfg, baseline),
        SearchStrategy::Exhaustive => search::exhaustive(raster, cfg, baseline),
    };

    if result.is_rotated() {
        info!(angle = result.angle, score = result.score, baseline, "detected skew");
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::DecodedImage;

    #[test]
    fn test_default_config() {
        let cfg = SkewSearchConfig::default();
        assert_eq!(cfg.max_rotation, 2.0);
        assert_eq!(cfg.incr_step, 0.2);
        assert_eq!(cfg.steps(), 10);
        assert_eq!(cfg.strategy, SearchStrategy::HillClimb);
    }

    #[test]
    fn test_steps() {
        let cfg = SkewSearchConfig {
            max_rotation: 1.0,
            incr_step: 0.3,
            ..Default::default()
        };
        assert_eq!(cfg.steps(), 3);

        let cfg = SkewSearchConfig {
            max_rotation: 0.0,
            ..Default::default()
        };
        assert_eq!(cfg.steps(), 0);
    }

    #[test]
    fn test_validate() {
        let mut cfg = SkewSearchConfig::default();
        assert!(cfg.validate().is_ok());

        cfg.incr_step = 0.0;
        assert_eq!(cfg.validate(), Err(NormalizeError::InvalidStep(0.0)));
        cfg.incr_step = -1.0;
        assert_eq!(cfg.validate(), Err(NormalizeError::InvalidStep(-1.0)));
        cfg.incr_step = f64::NAN;
        assert!(matches!(cfg.validate(), Err(NormalizeError::InvalidStep(_))));
        cfg.incr_step = 0.0005;
        assert_eq!(cfg.validate(), Err(NormalizeError::InvalidStep(0.0005)));
        cfg.incr_step = ANGLE_EPSILON;
        assert!(cfg.validate().is_ok());

        cfg.incr_step = 0.5;
        cfg.max_rotation = -0.1;
        assert_eq!(cfg.validate(), Err(NormalizeError::InvalidRotation(-0.1)));
        cfg.max_rotation = f64::INFINITY;
        assert!(matches!(cfg.validate(), Err(NormalizeError::InvalidRotation(_))));
    }

    #[test]
    fn test_blank_page_is_straight() {
        let raster = Raster::luminance(&DecodedImage::filled(60, 40, [255, 255, 255]));
        let result = deskew(&raster, &SkewSearchConfig::default()).unwrap();
        assert_eq!(result, SkewResult::default());
        assert!(!result.is_rotated());
    }

    #[test]
    fn test_sub_epsilon_angle_is_not_rotated() {
        // Rotation copies the page for these angles
        assert!(!SkewResult { angle: 0.0004, score: 3 }.is_rotated());
        assert!(!SkewResult { angle: -0.0009, score: 3 }.is_rotated());
        assert!(SkewResult { angle: 0.001, score: 3 }.is_rotated());
    }

    #[test]
    fn test_empty_raster_is_straight() {
        let raster = Raster::luminance(&DecodedImage::new(0, 0, Vec::new()));
        assert_eq!(deskew(&raster, &SkewSearchConfig::default()), Ok(SkewResult::default()));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let raster = Raster::luminance(&DecodedImage::filled(10, 10, [255, 255, 255]));
        let cfg = SkewSearchConfig {
            incr_step: 0.0,
            ..Default::default()
        };
        assert!(deskew(&raster, &cfg).is_err());
    }

    #[test]
    fn test_sub_epsilon_step_rejected_before_search() {
        let mut page = DecodedImage::filled(40, 40, [255, 255, 255]);
        page.fill_rect(10, 10, 30, 30, [0, 0, 0]);
        let raster = Raster::luminance(&page);
        let cfg = SkewSearchConfig {
            max_rotation: 0.01,
            incr_step: 0.0001,
            ..Default::default()
        };
        assert_eq!(deskew(&raster, &cfg), Err(NormalizeError::InvalidStep(0.0001)));
    }

    #[test]
    fn test_config_deserialize() {
        let cfg: SkewSearchConfig =
            serde_json::from_str(r#"{"maxRotation": 5, "strategy": "exhaustive", "scan": {"threshold": 200}}"#)
                .unwrap();
        assert_eq!(cfg.max_rotation, 5.0);
        assert_eq!(cfg.incr_step, 0.2);
        assert_eq!(cfg.strategy, SearchStrategy::Exhaustive);
        assert_eq!(cfg.scan.threshold, 200);
    }
}
