//! Crop suitability scoring.
//!
//! combined = 0.4 * temperature + 0.4 * rainfall + 0.2 * moisture
//!
//! Temperature and moisture use the midpoint score, rainfall the coverage
//! score. Results are published with the threshold-or-top-6 policy.

use serde::Serialize;
use utoipa::ToSchema;

use crate::services::aggregate::ClimateObservation;
use crate::services::normalize::{range_coverage_score, range_midpoint_score};
use crate::services::ranking::{rank_by_score, RankPolicy};
use crate::services::reference::{CropProfile, CropTable};

const TEMPERATURE_WEIGHT: f64 = 0.4;
const RAINFALL_WEIGHT: f64 = 0.4;
const MOISTURE_WEIGHT: f64 = 0.2;

/// Crops scoring at least 0.45 are suitable; the best six are always shown.
pub const CROP_RANK_POLICY: RankPolicy = RankPolicy {
    threshold: 0.45,
    min_count: 6,
};

/// Per-factor suitability, each in [0,1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct FactorScores {
    pub temperature: f64,
    pub rainfall: f64,
    pub moisture: f64,
}

/// Suitability of one crop for one location.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CropScoreResult {
    pub crop_name: String,
    pub profile: CropProfile,
    pub factor_scores: FactorScores,
    /// Weighted suitability in [0,1]
    pub combined_score: f64,
}

/// Score a single crop profile.
pub fn score_crop(observation: &ClimateObservation, profile: &CropProfile) -> (FactorScores, f64) {
    let factors = FactorScores {
        temperature: range_midpoint_score(observation.avg_temp, profile.min_temp, profile.max_temp),
        rainfall: range_coverage_score(observation.yearly_rain, profile.min_rain, profile.max_rain),
        moisture: range_midpoint_score(
            observation.soil_moisture,
            profile.moisture_ideal_min,
            profile.moisture_ideal_max,
        ),
    };
    let combined = TEMPERATURE_WEIGHT * factors.temperature
        + RAINFALL_WEIGHT * factors.rainfall
        + MOISTURE_WEIGHT * factors.moisture;
    (factors, combined)
}

/// Score every crop in `table` and return the published ranking.
pub fn score_crops(observation: &ClimateObservation, table: &CropTable) -> Vec<CropScoreResult> {
    let scored: Vec<(CropScoreResult, f64)> = table
        .iter()
        .map(|(name, profile)| {
            let (factor_scores, combined_score) = score_crop(observation, profile);
            (
                CropScoreResult {
                    crop_name: name.to_string(),
                    profile: profile.clone(),
                    factor_scores,
                    combined_score,
                },
                combined_score,
            )
        })
        .collect();

    let ranked = rank_by_score(scored, &CROP_RANK_POLICY);
    tracing::debug!(
        "Scored {} crops, publishing {} (top: {:?})",
        table.len(),
        ranked.len(),
        ranked.first().map(|(r, _)| r.crop_name.as_str())
    );

    ranked.into_iter().map(|(result, _)| result).collect()
}
