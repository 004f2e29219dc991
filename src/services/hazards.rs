//! Hazard risk scoring.
//!
//! Seven independent hazards, each scored from a sparse `HazardObservation`
//! into an integer percent. A hazard whose required inputs are absent reports
//! `None` (insufficient data), which is distinct from a genuine 0%.
//!
//! | Hazard  | Required inputs                 | Defaults when absent         |
//! |---------|---------------------------------|------------------------------|
//! | flood   | none                            | discharge, precipitation = 0 |
//! | drought | surface + root moisture, et0    | none                         |
//! | heat    | max_temp                        | vpd term = 0                 |
//! | cold    | min_temp                        | none                         |
//! | wind    | none                            | gust, speed = 0              |
//! | rain    | none                            | precipitation, hours = 0     |
//! | air     | none                            | pm2_5, pm10, ozone = 0       |

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::helpers::{clamp, clamp01, finite_in, to_percent};
use crate::services::reference::{
    AirThresholds, ColdThresholds, DroughtThresholds, FloodThresholds, HazardThresholds,
    HeatThresholds, RainThresholds, WindThresholds,
};

/// Percent at or above which a hazard is shown as high risk.
const HIGH_RISK_PERCENT: u8 = 75;
/// Percent at or above which a hazard is shown as moderate risk.
const MODERATE_RISK_PERCENT: u8 = 50;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Hazard {
    Flood,
    Drought,
    Heat,
    Cold,
    Wind,
    Rain,
    Air,
}

impl Hazard {
    pub const ALL: [Hazard; 7] = [
        Hazard::Flood,
        Hazard::Drought,
        Hazard::Heat,
        Hazard::Cold,
        Hazard::Wind,
        Hazard::Rain,
        Hazard::Air,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Hazard::Flood => "flood",
            Hazard::Drought => "drought",
            Hazard::Heat => "heat",
            Hazard::Cold => "cold",
            Hazard::Wind => "wind",
            Hazard::Rain => "rain",
            Hazard::Air => "air",
        }
    }

    /// Human-readable card title.
    pub fn title(&self) -> &'static str {
        match self {
            Hazard::Flood => "Flood Risk",
            Hazard::Drought => "Drought Risk",
            Hazard::Heat => "Heatwave Risk",
            Hazard::Cold => "Cold / Frost Risk",
            Hazard::Wind => "Cyclone / Severe Wind Risk",
            Hazard::Rain => "Heavy Rain / Severe Thunder Risk",
            Hazard::Air => "Air Quality Stress",
        }
    }
}

impl std::fmt::Display for Hazard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw readings for one location and day. Every field is optional because
/// any provider may omit it or fail entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct HazardObservation {
    /// River discharge (m³/s)
    pub river_discharge: Option<f64>,
    /// Daily maximum air temperature (°C)
    pub max_temp: Option<f64>,
    /// Daily minimum air temperature (°C)
    pub min_temp: Option<f64>,
    /// Daily precipitation sum (mm)
    pub precipitation: Option<f64>,
    /// Hours of heavy precipitation in the day
    pub heavy_precip_hours: Option<f64>,
    /// Maximum wind gust (km/h)
    pub wind_gust: Option<f64>,
    /// Maximum sustained wind speed (km/h)
    pub wind_speed: Option<f64>,
    /// Soil moisture 0–7 cm (m³/m³)
    pub soil_moisture_surface: Option<f64>,
    /// Soil moisture 7–28 cm (m³/m³)
    pub soil_moisture_root: Option<f64>,
    /// FAO reference evapotranspiration (mm/day)
    pub et0: Option<f64>,
    /// Vapor pressure deficit (kPa)
    pub vapor_pressure_deficit: Option<f64>,
    /// Fine particulate matter (µg/m³)
    pub pm2_5: Option<f64>,
    /// Coarse particulate matter (µg/m³)
    pub pm10: Option<f64>,
    /// Ozone (µg/m³)
    pub ozone: Option<f64>,
}

impl HazardObservation {
    /// Copy with every non-finite or physically impossible reading removed.
    pub fn sanitized(&self) -> Self {
        let clean = Self {
            river_discharge: finite_in(self.river_discharge, 0.0, 1e6),
            max_temp: finite_in(self.max_temp, -80.0, 80.0),
            min_temp: finite_in(self.min_temp, -80.0, 80.0),
            precipitation: finite_in(self.precipitation, 0.0, 2000.0),
            heavy_precip_hours: finite_in(self.heavy_precip_hours, 0.0, 24.0),
            wind_gust: finite_in(self.wind_gust, 0.0, 500.0),
            wind_speed: finite_in(self.wind_speed, 0.0, 500.0),
            soil_moisture_surface: finite_in(self.soil_moisture_surface, 0.0, 1.0),
            soil_moisture_root: finite_in(self.soil_moisture_root, 0.0, 1.0),
            et0: finite_in(self.et0, 0.0, 30.0),
            vapor_pressure_deficit: finite_in(self.vapor_pressure_deficit, 0.0, 20.0),
            pm2_5: finite_in(self.pm2_5, 0.0, 5000.0),
            pm10: finite_in(self.pm10, 0.0, 5000.0),
            ozone: finite_in(self.ozone, 0.0, 5000.0),
        };
        let dropped = self.present_count() - clean.present_count();
        if dropped > 0 {
            tracing::debug!("Discarded {} out-of-domain hazard readings", dropped);
        }
        clean
    }

    /// Fill every absent field from `other`, keeping fields already present.
    pub fn merge(&mut self, other: HazardObservation) {
        macro_rules! fill {
            ($($field:ident),*) => {
                $( if self.$field.is_none() { self.$field = other.$field; } )*
            };
        }
        fill!(
            river_discharge,
            max_temp,
            min_temp,
            precipitation,
            heavy_precip_hours,
            wind_gust,
            wind_speed,
            soil_moisture_surface,
            soil_moisture_root,
            et0,
            vapor_pressure_deficit,
            pm2_5,
            pm10,
            ozone
        );
    }

    fn present_count(&self) -> usize {
        [
            self.river_discharge,
            self.max_temp,
            self.min_temp,
            self.precipitation,
            self.heavy_precip_hours,
            self.wind_gust,
            self.wind_speed,
            self.soil_moisture_surface,
            self.soil_moisture_root,
            self.et0,
            self.vapor_pressure_deficit,
            self.pm2_5,
            self.pm10,
            self.ozone,
        ]
        .iter()
        .filter(|v| v.is_some())
        .count()
    }
}

/// Display band for a hazard percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Insufficient data
    Unknown,
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn from_percent(percent: Option<u8>) -> Self {
        match percent {
            None => RiskLevel::Unknown,
            Some(p) if p >= HIGH_RISK_PERCENT => RiskLevel::High,
            Some(p) if p >= MODERATE_RISK_PERCENT => RiskLevel::Moderate,
            Some(_) => RiskLevel::Low,
        }
    }
}

/// Score for one hazard.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct HazardScore {
    pub hazard: Hazard,
    pub title: String,
    /// Risk percent 0..100, null when required inputs were missing
    pub percent: Option<u8>,
    pub level: RiskLevel,
}

impl HazardScore {
    fn new(hazard: Hazard, percent: Option<u8>) -> Self {
        Self {
            hazard,
            title: hazard.title().to_string(),
            percent,
            level: RiskLevel::from_percent(percent),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStatus {
    /// Every hazard was computed (individual hazards may still be null)
    Complete,
    /// Scoring failed; all hazards were reset to 0
    Failed,
}

/// Scores for all seven hazards, in `Hazard::ALL` order.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct HazardAssessment {
    pub status: AssessmentStatus,
    /// Why scoring failed (only when `status` is `failed`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    pub scores: Vec<HazardScore>,
}

impl HazardAssessment {
    fn failed(reason: String) -> Self {
        Self {
            status: AssessmentStatus::Failed,
            failure_reason: Some(reason),
            scores: Hazard::ALL
                .iter()
                .map(|&h| HazardScore::new(h, Some(0)))
                .collect(),
        }
    }
}

#[cfg(test)]
impl HazardAssessment {
    pub(crate) fn percent(&self, hazard: Hazard) -> Option<u8> {
        self.scores
            .iter()
            .find(|s| s.hazard == hazard)
            .and_then(|s| s.percent)
    }
}

/// Internal scoring failure, caught by `assess_hazards`.
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("{hazard} score is not a finite number ({value})")]
    NonFinite { hazard: Hazard, value: f64 },
}

fn finish(hazard: Hazard, raw: f64) -> Result<u8, ScoringError> {
    if raw.is_finite() {
        Ok(to_percent(raw))
    } else {
        Err(ScoringError::NonFinite { hazard, value: raw })
    }
}

pub fn score_flood(
    obs: &HazardObservation,
    t: &FloodThresholds,
) -> Result<Option<u8>, ScoringError> {
    let discharge_ratio = obs.river_discharge.unwrap_or(0.0) / t.discharge_ref;
    let precip_ratio = obs.precipitation.unwrap_or(0.0) / t.precip_ref;
    // Saturates: anything past 1 before the final clamp is simply 100%
    let raw = clamp(
        t.discharge_weight * discharge_ratio + t.precip_weight * precip_ratio,
        0.0,
        t.raw_cap,
    );
    finish(Hazard::Flood, clamp01(raw)).map(Some)
}

pub fn score_drought(
    obs: &HazardObservation,
    t: &DroughtThresholds,
) -> Result<Option<u8>, ScoringError> {
    let (Some(surface), Some(root), Some(et0)) =
        (obs.soil_moisture_surface, obs.soil_moisture_root, obs.et0)
    else {
        return Ok(None);
    };
    let dryness = |m: f64| clamp01((t.safe_moisture - m) / t.safe_moisture);
    let raw = t.root_weight * dryness(root)
        + t.surface_weight * dryness(surface)
        + t.et0_weight * clamp01(et0 / t.et0_ref);
    finish(Hazard::Drought, raw).map(Some)
}

pub fn score_heat(obs: &HazardObservation, t: &HeatThresholds) -> Result<Option<u8>, ScoringError> {
    let Some(max_temp) = obs.max_temp else {
        return Ok(None);
    };
    let temp_ratio = clamp01((max_temp - t.stress_onset_c) / (t.extreme_c - t.stress_onset_c));
    let vpd_norm = obs
        .vapor_pressure_deficit
        .map(|v| clamp01(v / t.vpd_ref))
        .unwrap_or(0.0);
    let raw = t.temp_weight * temp_ratio + t.vpd_weight * vpd_norm;
    finish(Hazard::Heat, raw).map(Some)
}

pub fn score_cold(obs: &HazardObservation, t: &ColdThresholds) -> Result<Option<u8>, ScoringError> {
    let Some(min_temp) = obs.min_temp else {
        return Ok(None);
    };
    let raw = clamp01((t.safe_c - min_temp) / (t.safe_c - t.critical_c));
    finish(Hazard::Cold, raw).map(Some)
}

pub fn score_wind(obs: &HazardObservation, t: &WindThresholds) -> Result<Option<u8>, ScoringError> {
    let gust = clamp01(obs.wind_gust.unwrap_or(0.0) / t.gust_ref_kmh);
    let speed = clamp01(obs.wind_speed.unwrap_or(0.0) / t.speed_ref_kmh);
    let raw = clamp01(t.gust_weight * gust + t.speed_weight * speed);
    finish(Hazard::Wind, raw).map(Some)
}

pub fn score_rain(obs: &HazardObservation, t: &RainThresholds) -> Result<Option<u8>, ScoringError> {
    let precip = clamp01(obs.precipitation.unwrap_or(0.0) / t.precip_ref);
    let hours = clamp01(obs.heavy_precip_hours.unwrap_or(0.0) / t.heavy_hours_ref);
    let raw = t.precip_weight * precip + t.hours_weight * hours;
    finish(Hazard::Rain, raw).map(Some)
}

pub fn score_air(obs: &HazardObservation, t: &AirThresholds) -> Result<Option<u8>, ScoringError> {
    let ratio =
        |v: Option<f64>, reference: f64| clamp(v.unwrap_or(0.0) / reference, 0.0, t.ratio_cap);
    let weighted = t.pm2_5_weight * ratio(obs.pm2_5, t.pm2_5_ref)
        + t.pm10_weight * ratio(obs.pm10, t.pm10_ref)
        + t.ozone_weight * ratio(obs.ozone, t.ozone_ref);
    finish(Hazard::Air, clamp01(weighted / t.normalizer)).map(Some)
}

fn try_score_hazards(
    obs: &HazardObservation,
    t: &HazardThresholds,
) -> Result<Vec<HazardScore>, ScoringError> {
    Hazard::ALL
        .iter()
        .map(|&hazard| {
            let percent = match hazard {
                Hazard::Flood => score_flood(obs, &t.flood)?,
                Hazard::Drought => score_drought(obs, &t.drought)?,
                Hazard::Heat => score_heat(obs, &t.heat)?,
                Hazard::Cold => score_cold(obs, &t.cold)?,
                Hazard::Wind => score_wind(obs, &t.wind)?,
                Hazard::Rain => score_rain(obs, &t.rain)?,
                Hazard::Air => score_air(obs, &t.air)?,
            };
            Ok(HazardScore::new(hazard, percent))
        })
        .collect()
}

/// Score all seven hazards.
///
/// Out-of-domain readings are discarded first. If any hazard fails to
/// compute, the whole assessment is reset to 0% with `status = failed`, so a
/// failure is never mistaken for a genuine all-clear.
pub fn assess_hazards(obs: &HazardObservation, thresholds: &HazardThresholds) -> HazardAssessment {
    let clean = obs.sanitized();
    match try_score_hazards(&clean, thresholds) {
        Ok(scores) => HazardAssessment {
            status: AssessmentStatus::Complete,
            failure_reason: None,
            scores,
        },
        Err(e) => {
            tracing::error!("Hazard scoring failed, resetting all hazards: {}", e);
            HazardAssessment::failed(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> HazardThresholds {
        HazardThresholds::default()
    }

    fn assess(obs: HazardObservation) -> HazardAssessment {
        assess_hazards(&obs, &thresholds())
    }

    #[test]
    fn test_flood_discharge_saturates() {
        let a = assess(HazardObservation {
            river_discharge: Some(100.0),
            precipitation: Some(0.0),
            ..Default::default()
        });
        assert_eq!(a.percent(Hazard::Flood), Some(100));
    }

    #[test]
    fn test_flood_combines_discharge_and_precip() {
        // 0.6 * 20/50 + 0.4 * 25/50 = 0.24 + 0.2
        let a = assess(HazardObservation {
            river_discharge: Some(20.0),
            precipitation: Some(25.0),
            ..Default::default()
        });
        assert_eq!(a.percent(Hazard::Flood), Some(44));
    }

    #[test]
    fn test_flood_without_discharge_uses_precip_only() {
        let a = assess(HazardObservation {
            precipitation: Some(50.0),
            ..Default::default()
        });
        assert_eq!(a.percent(Hazard::Flood), Some(40));
    }

    #[test]
    fn test_cold_reference_points() {
        for (min_temp, expected) in [(-2.0, 100), (8.0, 0), (3.0, 50), (-10.0, 100), (15.0, 0)] {
            let a = assess(HazardObservation {
                min_temp: Some(min_temp),
                ..Default::default()
            });
            assert_eq!(a.percent(Hazard::Cold), Some(expected), "min_temp={}", min_temp);
        }
    }

    #[test]
    fn test_heat_at_onset_without_vpd() {
        let a = assess(HazardObservation {
            max_temp: Some(30.0),
            ..Default::default()
        });
        assert_eq!(a.percent(Hazard::Heat), Some(0));
    }

    #[test]
    fn test_heat_with_vpd() {
        // 0.75 * (39-30)/15 + 0.25 * 1.2/6 = 0.45 + 0.05
        let a = assess(HazardObservation {
            max_temp: Some(39.0),
            vapor_pressure_deficit: Some(1.2),
            ..Default::default()
        });
        assert_eq!(a.percent(Hazard::Heat), Some(50));
    }

    #[test]
    fn test_drought_requires_all_inputs() {
        let a = assess(HazardObservation {
            soil_moisture_surface: Some(0.05),
            soil_moisture_root: Some(0.05),
            ..Default::default()
        });
        assert_eq!(a.percent(Hazard::Drought), None);
        let score = a.scores.iter().find(|s| s.hazard == Hazard::Drought).unwrap();
        assert_eq!(score.level, RiskLevel::Unknown);
    }

    #[test]
    fn test_drought_formula() {
        // root dryness (0.25-0.05)/0.25 = 0.8, surface (0.25-0.15)/0.25 = 0.4, et0 2.4/6 = 0.4
        // 0.55*0.8 + 0.30*0.4 + 0.15*0.4 = 0.44 + 0.12 + 0.06
        let a = assess(HazardObservation {
            soil_moisture_surface: Some(0.15),
            soil_moisture_root: Some(0.05),
            et0: Some(2.4),
            ..Default::default()
        });
        assert_eq!(a.percent(Hazard::Drought), Some(62));
    }

    #[test]
    fn test_drought_wet_soil_is_zero_not_null() {
        let a = assess(HazardObservation {
            soil_moisture_surface: Some(0.4),
            soil_moisture_root: Some(0.4),
            et0: Some(0.0),
            ..Default::default()
        });
        assert_eq!(a.percent(Hazard::Drought), Some(0));
    }

    #[test]
    fn test_wind_formula() {
        // 0.7 * 60/120 + 0.3 * 40/80 = 0.35 + 0.15
        let a = assess(HazardObservation {
            wind_gust: Some(60.0),
            wind_speed: Some(40.0),
            ..Default::default()
        });
        assert_eq!(a.percent(Hazard::Wind), Some(50));
        assert_eq!(
            a.scores.iter().find(|s| s.hazard == Hazard::Wind).unwrap().level,
            RiskLevel::Moderate
        );
    }

    #[test]
    fn test_rain_formula() {
        // 0.8 * 100/100 + 0.2 * 3/6
        let a = assess(HazardObservation {
            precipitation: Some(100.0),
            heavy_precip_hours: Some(3.0),
            ..Default::default()
        });
        assert_eq!(a.percent(Hazard::Rain), Some(90));
    }

    #[test]
    fn test_air_ratios_capped_at_two() {
        // Every ratio saturates at 2 → (0.6*2 + 0.3*2 + 0.1*2) / 2 = 1
        let a = assess(HazardObservation {
            pm2_5: Some(600.0),
            pm10: Some(1200.0),
            ozone: Some(1800.0),
            ..Default::default()
        });
        assert_eq!(a.percent(Hazard::Air), Some(100));

        // pm2_5 at its reference only: 0.6 / 2
        let a = assess(HazardObservation {
            pm2_5: Some(60.0),
            ..Default::default()
        });
        assert_eq!(a.percent(Hazard::Air), Some(30));
    }

    #[test]
    fn test_empty_observation() {
        let a = assess(HazardObservation::default());
        assert_eq!(a.status, AssessmentStatus::Complete);
        assert_eq!(a.percent(Hazard::Flood), Some(0));
        assert_eq!(a.percent(Hazard::Drought), None);
        assert_eq!(a.percent(Hazard::Heat), None);
        assert_eq!(a.percent(Hazard::Cold), None);
        assert_eq!(a.percent(Hazard::Wind), Some(0));
        assert_eq!(a.percent(Hazard::Rain), Some(0));
        assert_eq!(a.percent(Hazard::Air), Some(0));
        assert_eq!(a.scores.len(), 7);
    }

    #[test]
    fn test_out_of_domain_treated_as_absent() {
        let a = assess(HazardObservation {
            max_temp: Some(95.0),
            min_temp: Some(-120.0),
            wind_gust: Some(-5.0),
            ..Default::default()
        });
        assert_eq!(a.percent(Hazard::Heat), None);
        assert_eq!(a.percent(Hazard::Cold), None);
        assert_eq!(a.percent(Hazard::Wind), Some(0));
    }

    #[test]
    fn test_missing_field_does_not_leak_into_other_hazards() {
        let full = HazardObservation {
            max_temp: Some(41.0),
            min_temp: Some(4.0),
            wind_gust: Some(90.0),
            precipitation: Some(30.0),
            ..Default::default()
        };
        let without_min = HazardObservation {
            min_temp: None,
            ..full.clone()
        };
        let a = assess(full);
        let b = assess(without_min);
        assert_eq!(b.percent(Hazard::Cold), None);
        for h in [Hazard::Flood, Hazard::Heat, Hazard::Wind, Hazard::Rain, Hazard::Air] {
            assert_eq!(a.percent(h), b.percent(h), "{} changed", h);
        }
    }

    #[test]
    fn test_percents_always_in_range() {
        let extremes = [0.0, 1e-3, 0.5, 7.0, 79.9, 499.0, 1999.0];
        for &v in &extremes {
            let a = assess(HazardObservation {
                river_discharge: Some(v * 100.0),
                max_temp: Some(v.min(79.0)),
                min_temp: Some(-v.min(79.0)),
                precipitation: Some(v),
                heavy_precip_hours: Some(v.min(24.0)),
                wind_gust: Some(v.min(500.0)),
                wind_speed: Some(v.min(500.0)),
                soil_moisture_surface: Some(v.min(1.0)),
                soil_moisture_root: Some(v.min(1.0)),
                et0: Some(v.min(30.0)),
                vapor_pressure_deficit: Some(v.min(20.0)),
                pm2_5: Some(v),
                pm10: Some(v),
                ozone: Some(v),
            });
            assert_eq!(a.status, AssessmentStatus::Complete);
            for s in &a.scores {
                let p = s.percent.expect("all inputs present");
                assert!(p <= 100, "{} = {}", s.hazard, p);
            }
        }
    }

    #[test]
    fn test_malformed_thresholds_reset_everything() {
        let mut t = thresholds();
        t.wind.gust_ref_kmh = 0.0; // 0/0 with no gust reading
        let a = assess_hazards(
            &HazardObservation {
                max_temp: Some(44.0),
                ..Default::default()
            },
            &t,
        );
        assert_eq!(a.status, AssessmentStatus::Failed);
        assert!(a.failure_reason.as_deref().unwrap().contains("wind"));
        assert_eq!(a.scores.len(), 7);
        assert!(a.scores.iter().all(|s| s.percent == Some(0)));
    }

    #[test]
    fn test_failure_distinct_from_all_clear() {
        let ok = assess(HazardObservation {
            max_temp: Some(20.0),
            min_temp: Some(15.0),
            soil_moisture_surface: Some(0.3),
            soil_moisture_root: Some(0.3),
            et0: Some(0.0),
            ..Default::default()
        });
        assert!(ok.scores.iter().all(|s| s.percent == Some(0)));
        assert_eq!(ok.status, AssessmentStatus::Complete);
        assert!(ok.failure_reason.is_none());
    }

    #[test]
    fn test_merge_keeps_present_fields() {
        let mut obs = HazardObservation {
            max_temp: Some(33.0),
            ..Default::default()
        };
        obs.merge(HazardObservation {
            max_temp: Some(10.0),
            river_discharge: Some(12.0),
            ..Default::default()
        });
        assert_eq!(obs.max_temp, Some(33.0));
        assert_eq!(obs.river_discharge, Some(12.0));
    }

    #[test]
    fn test_risk_levels() {
        assert_eq!(RiskLevel::from_percent(None), RiskLevel::Unknown);
        assert_eq!(RiskLevel::from_percent(Some(0)), RiskLevel::Low);
        assert_eq!(RiskLevel::from_percent(Some(49)), RiskLevel::Low);
        assert_eq!(RiskLevel::from_percent(Some(50)), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_percent(Some(75)), RiskLevel::High);
        assert_eq!(RiskLevel::from_percent(Some(100)), RiskLevel::High);
    }

    #[test]
    fn test_assessment_json_shape() {
        let a = assess(HazardObservation {
            min_temp: Some(3.0),
            ..Default::default()
        });
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["status"], "complete");
        assert!(json.get("failure_reason").is_none());
        assert_eq!(json["scores"][1]["hazard"], "drought");
        assert!(json["scores"][1]["percent"].is_null());
        assert_eq!(json["scores"][3]["percent"], 50);
        assert_eq!(json["scores"][3]["level"], "moderate");
    }
}
