//! Angle search strategies.

use std::cmp::Ordering;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

use super::{SkewResult, SkewSearchConfig};
use crate::raster::{count_content_rows, Raster, ScanConfig};
use crate::transform::{rotate_raster, InterpolationFilter};

/// Content row count of `raster` rotated by `angle` degrees.
///
/// Only the threshold and tolerance of `scan` are used; every row of the
/// rotated canvas is scanned across its full width.
pub fn score_angle(raster: &Raster, angle: f64, scan: &ScanConfig) -> u32 {
    if angle == 0.0 {
        return count_content_rows(raster, scan);
    }
    let rotated = rotate_raster(raster, angle, InterpolationFilter::Bicubic);
    count_content_rows(&rotated, scan)
}

/// One direction of the hill climb.
struct Walk {
    sign: f64,
    active: bool,
    previous: u32,
}

/// Greedy search walking outward from zero in both directions at once.
///
/// At each step the positive walk is scored before the negative one. A
/// score no worse than the best so far is adopted, so ties move the result
/// outward. A walk stops once its score rises above its own previous score.
pub(super) fn hill_climb(raster: &Raster, cfg: &SkewSearchConfig, baseline: u32) -> SkewResult {
    let mut best = SkewResult {
        angle: 0.0,
        score: baseline,
    };
    let mut walks = [1.0, -1.0].map(|sign| Walk {
        sign,
        active: true,
        previous: baseline,
    });

    for k in 1..=cfg.steps() {
        if walks.iter().all(|walk| !walk.active) {
            break;
        }
        let magnitude = k as f64 * cfg.incr_step;

        for walk in walks.iter_mut().filter(|walk| walk.active) {
            let angle = walk.sign * magnitude;
            let score = score_angle(raster, angle, &cfg.scan);
            debug!(angle, score, "scored skew angle");

            if score <= best.score {
                best = SkewResult { angle, score };
            } else if score > walk.previous {
                walk.active = false;
            }
            walk.previous = score;
        }
    }

    best
}

/// Score every candidate angle and keep the best.
///
/// Angles are independent, so with the `parallel` feature they are scored
/// on the rayon pool. The reduction is order-independent: lowest score,
/// then larger magnitude, then negative before positive.
pub(super) fn exhaustive(raster: &Raster, cfg: &SkewSearchConfig, baseline: u32) -> SkewResult {
    let angles: Vec<f64> = (1..=cfg.steps())
        .flat_map(|k| {
            let magnitude = k as f64 * cfg.incr_step;
            [magnitude, -magnitude]
        })
        .collect();

    let evaluate = |&angle: &f64| {
        let score = score_angle(raster, angle, &cfg.scan);
        debug!(angle, score, "scored skew angle");
        SkewResult { angle, score }
    };

    #[cfg(feature = "parallel")]
    let scored: Vec<SkewResult> = angles.par_iter().map(evaluate).collect();
    #[cfg(not(feature = "parallel"))]
    let scored: Vec<SkewResult> = angles.iter().map(evaluate).collect();

    let baseline = SkewResult {
        angle: 0.0,
        score: baseline,
    };
    scored
        .into_iter()
        .chain(std::iter::once(baseline))
        .min_by(preference)
        .unwrap_or(baseline)
}

fn preference(a: &SkewResult, b: &SkewResult) -> Ordering {
    a.score
        .cmp(&b.score)
        .then_with(|| b.angle.abs().total_cmp(&a.angle.abs()))
        .then_with(|| a.angle.total_cmp(&b.angle))
}
