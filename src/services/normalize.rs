//! Range normalization.
//!
//! Maps a raw observation and a crop's ideal range to a score in [0,1].

use crate::helpers::clamp01;

/// Smallest half-range / range width used as a divisor.
const MIN_SPAN: f64 = 1e-6;

/// Exponential decay rate for values outside the ideal band.
const COVERAGE_DECAY: f64 = 1.5;

/// Score 1 at the range midpoint, decaying linearly to 0 at twice the
/// half-range away from it.
///
/// score = clamp(1 - |value - mid| / (2 * half), 0, 1)
pub fn range_midpoint_score(value: f64, min: f64, max: f64) -> f64 {
    let mid = (min + max) / 2.0;
    let half_range = ((max - min) / 2.0).max(MIN_SPAN);
    clamp01(1.0 - (value - mid).abs() / (2.0 * half_range))
}

/// Score 1 anywhere inside `[min, max]`, `exp(-1.5 * d)` outside, where `d` is
/// the distance beyond the nearest edge as a fraction of the range width.
pub fn range_coverage_score(value: f64, min: f64, max: f64) -> f64 {
    if value >= min && value <= max {
        return 1.0;
    }
    let range = (max - min).max(MIN_SPAN);
    let d = if value < min {
        (min - value) / range
    } else {
        (value - max) / range
    };
    clamp01((-COVERAGE_DECAY * d).exp())
}
