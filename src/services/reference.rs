//! Static reference tables: crop profiles and hazard thresholds.
//!
//! Both tables are built once at startup, validated, and then shared
//! read-only. The crop table can be replaced by a JSON file (an array of
//! `{ "name": ..., <profile fields> }` objects, order preserved).

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use utoipa::ToSchema;

/// Errors raised while building or loading a reference table.
#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("IO error reading reference table: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed reference table JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Crop table is empty")]
    EmptyTable,
    #[error("Duplicate crop '{0}'")]
    DuplicateCrop(String),
    #[error("Invalid crop '{crop}': {message}")]
    InvalidCrop { crop: String, message: String },
    #[error("Invalid {hazard} threshold: {message}")]
    InvalidThreshold {
        hazard: &'static str,
        message: String,
    },
}

// ---------------------------------------------------------------------------
// Crop profiles
// ---------------------------------------------------------------------------

/// Ideal growing conditions for one crop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CropProfile {
    /// Lowest suitable mean temperature (°C)
    pub min_temp: f64,
    /// Highest suitable mean temperature (°C)
    pub max_temp: f64,
    /// Lowest suitable yearly rainfall (mm)
    pub min_rain: f64,
    /// Highest suitable yearly rainfall (mm)
    pub max_rain: f64,
    /// Lower bound of ideal root-zone moisture (fraction 0..1)
    pub moisture_ideal_min: f64,
    /// Upper bound of ideal root-zone moisture (fraction 0..1)
    pub moisture_ideal_max: f64,
    /// Growing season (e.g. "Kharif", "Rabi")
    pub season: String,
    pub description: String,
    /// Short cultivation advice
    pub tips: String,
}

impl CropProfile {
    fn validate(&self, crop: &str) -> Result<(), ReferenceError> {
        let pairs = [
            ("temperature", self.min_temp, self.max_temp),
            ("rainfall", self.min_rain, self.max_rain),
            ("moisture", self.moisture_ideal_min, self.moisture_ideal_max),
        ];
        for (label, min, max) in pairs {
            if !min.is_finite() || !max.is_finite() {
                return Err(ReferenceError::InvalidCrop {
                    crop: crop.to_string(),
                    message: format!("{} bounds must be finite", label),
                });
            }
            if min > max {
                return Err(ReferenceError::InvalidCrop {
                    crop: crop.to_string(),
                    message: format!("{} min {} exceeds max {}", label, min, max),
                });
            }
        }
        Ok(())
    }
}

/// A named crop profile as it appears in a crop table file.
#[derive(Debug, Clone, Deserialize)]
struct CropDefinition {
    name: String,
    #[serde(flatten)]
    profile: CropProfile,
}

/// Validated, ordered crop table. Table order is the ranking tie-break.
#[derive(Debug, Clone)]
pub struct CropTable {
    entries: Vec<(String, CropProfile)>,
}

impl CropTable {
    /// Build a table, rejecting empty tables, duplicate names and inverted or
    /// non-finite bounds.
    pub fn new(entries: Vec<(String, CropProfile)>) -> Result<Self, ReferenceError> {
        if entries.is_empty() {
            return Err(ReferenceError::EmptyTable);
        }
        let mut seen = std::collections::HashSet::new();
        for (name, profile) in &entries {
            if !seen.insert(name.as_str()) {
                return Err(ReferenceError::DuplicateCrop(name.clone()));
            }
            profile.validate(name)?;
        }
        Ok(Self { entries })
    }

    /// Parse a JSON array of crop definitions.
    pub fn from_json(json: &str) -> Result<Self, ReferenceError> {
        let defs: Vec<CropDefinition> = serde_json::from_str(json)?;
        Self::new(defs.into_iter().map(|d| (d.name, d.profile)).collect())
    }

    pub fn from_file(path: &Path) -> Result<Self, ReferenceError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CropProfile)> {
        self.entries.iter().map(|(n, p)| (n.as_str(), p))
    }

    pub fn get(&self, name: &str) -> Option<&CropProfile> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, p)| p)
    }

    /// Number of crops; never zero for a constructed table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

fn crop(
    name: &str,
    (min_temp, max_temp): (f64, f64),
    (min_rain, max_rain): (f64, f64),
    (moisture_ideal_min, moisture_ideal_max): (f64, f64),
    season: &str,
    description: &str,
    tips: &str,
) -> (String, CropProfile) {
    (
        name.to_string(),
        CropProfile {
            min_temp,
            max_temp,
            min_rain,
            max_rain,
            moisture_ideal_min,
            moisture_ideal_max,
            season: season.to_string(),
            description: description.to_string(),
            tips: tips.to_string(),
        },
    )
}

/// The built-in crop table.
#[rustfmt::skip]
pub fn default_crop_entries() -> Vec<(String, CropProfile)> {
    vec![
        crop("rice", (20.0, 35.0), (1200.0, 2400.0), (0.5, 0.9), "Kharif",
            "Staple grain crop, needs consistent water",
            "Plant in standing water, maintain water level"),
        crop("wheat", (10.0, 25.0), (300.0, 1200.0), (0.15, 0.35), "Rabi",
            "Winter cereal crop, moderate water needs",
            "Sow seeds 2-3 cm deep, needs well-drained soil"),
        crop("cotton", (20.0, 35.0), (500.0, 1000.0), (0.2, 0.45), "Kharif",
            "Fiber crop, needs warm climate",
            "Plant in full sun, avoid waterlogging"),
        crop("maize", (16.0, 32.0), (500.0, 1100.0), (0.25, 0.5), "Kharif",
            "Grain crop, needs well-drained soil",
            "Plant in blocks for pollination, water regularly"),
        crop("sugarcane", (20.0, 35.0), (750.0, 2000.0), (0.4, 0.8), "Kharif",
            "Tropical crop, high water needs",
            "Plant in rows, needs rich soil"),
        crop("potato", (8.0, 25.0), (300.0, 800.0), (0.25, 0.6), "Rabi",
            "Root crop, grows in cool weather",
            "Plant in trenches, hill up soil around plants"),
        crop("tomato", (15.0, 30.0), (400.0, 1000.0), (0.25, 0.6), "Kharif",
            "Warm-season crop, needs full sun",
            "Stake plants, water at base to avoid leaf diseases"),
        crop("chilli", (20.0, 32.0), (400.0, 1000.0), (0.25, 0.6), "Kharif",
            "Spice crop, grows in hot climate",
            "Mulch soil, avoid overwatering"),
        crop("onion", (10.0, 25.0), (300.0, 800.0), (0.2, 0.5), "Rabi",
            "Bulb crop, grows in cool weather",
            "Plant in rows, water moderately"),
        crop("banana", (20.0, 35.0), (1000.0, 2000.0), (0.5, 0.85), "Kharif",
            "Tropical fruit crop, high water needs",
            "Plant in rich soil, water regularly"),
        crop("mango", (20.0, 35.0), (800.0, 2000.0), (0.35, 0.7), "Kharif",
            "Tropical fruit crop, high water needs",
            "Prune trees, water deeply but infrequently"),
        crop("coconut", (20.0, 35.0), (1500.0, 3000.0), (0.5, 0.9), "Kharif",
            "Tropical crop, high water needs",
            "Plant in sandy soil, water regularly"),
        crop("tea", (12.0, 28.0), (1500.0, 3000.0), (0.5, 0.9), "Kharif",
            "Beverage crop, needs humid climate",
            "Plant in shade, water regularly"),
        crop("coffee", (15.0, 30.0), (1500.0, 3000.0), (0.45, 0.9), "Kharif",
            "Beverage crop, needs humid climate",
            "Plant in shade, water regularly"),
        crop("sunflower", (18.0, 35.0), (400.0, 900.0), (0.15, 0.4), "Kharif",
            "Oilseed crop, grows in hot climate",
            "Plant in full sun, water regularly"),
    ]
}

// ---------------------------------------------------------------------------
// Hazard thresholds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct FloodThresholds {
    /// River discharge considered a moderate flood signal (m³/s)
    pub discharge_ref: f64,
    /// Daily precipitation considered heavy for flooding (mm)
    pub precip_ref: f64,
    pub discharge_weight: f64,
    pub precip_weight: f64,
    /// Upper clamp applied to the raw combination before the final [0,1] clamp
    pub raw_cap: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DroughtThresholds {
    /// Soil moisture at or above which the soil is not dry (m³/m³)
    pub safe_moisture: f64,
    /// Reference evapotranspiration treated as high demand (mm/day)
    pub et0_ref: f64,
    pub root_weight: f64,
    pub surface_weight: f64,
    pub et0_weight: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeatThresholds {
    /// Maximum temperature where crop heat stress begins (°C)
    pub stress_onset_c: f64,
    /// Maximum temperature treated as extreme (°C)
    pub extreme_c: f64,
    /// Vapor pressure deficit treated as extreme (kPa)
    pub vpd_ref: f64,
    pub temp_weight: f64,
    pub vpd_weight: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColdThresholds {
    /// Minimum temperature with no frost risk (°C)
    pub safe_c: f64,
    /// Minimum temperature of severe frost (°C)
    pub critical_c: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindThresholds {
    pub gust_ref_kmh: f64,
    pub speed_ref_kmh: f64,
    pub gust_weight: f64,
    pub speed_weight: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RainThresholds {
    /// Daily precipitation treated as extreme (mm)
    pub precip_ref: f64,
    pub heavy_hours_ref: f64,
    pub precip_weight: f64,
    pub hours_weight: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AirThresholds {
    pub pm2_5_ref: f64,
    pub pm10_ref: f64,
    pub ozone_ref: f64,
    pub pm2_5_weight: f64,
    pub pm10_weight: f64,
    pub ozone_weight: f64,
    /// Each pollutant ratio is clamped to [0, ratio_cap]
    pub ratio_cap: f64,
    /// Divisor bringing the weighted ratio sum back into [0,1]
    pub normalizer: f64,
}

/// Reference constants and weights for all seven hazards.
#[derive(Debug, Clone, PartialEq)]
pub struct HazardThresholds {
    pub flood: FloodThresholds,
    pub drought: DroughtThresholds,
    pub heat: HeatThresholds,
    pub cold: ColdThresholds,
    pub wind: WindThresholds,
    pub rain: RainThresholds,
    pub air: AirThresholds,
}

impl Default for HazardThresholds {
    fn default() -> Self {
        Self {
            flood: FloodThresholds {
                discharge_ref: 50.0,
                precip_ref: 50.0,
                discharge_weight: 0.6,
                precip_weight: 0.4,
                raw_cap: 4.0,
            },
            drought: DroughtThresholds {
                safe_moisture: 0.25,
                et0_ref: 6.0,
                root_weight: 0.55,
                surface_weight: 0.30,
                et0_weight: 0.15,
            },
            heat: HeatThresholds {
                stress_onset_c: 30.0,
                extreme_c: 45.0,
                vpd_ref: 6.0,
                temp_weight: 0.75,
                vpd_weight: 0.25,
            },
            cold: ColdThresholds {
                safe_c: 8.0,
                critical_c: -2.0,
            },
            wind: WindThresholds {
                gust_ref_kmh: 120.0,
                speed_ref_kmh: 80.0,
                gust_weight: 0.7,
                speed_weight: 0.3,
            },
            rain: RainThresholds {
                precip_ref: 100.0,
                heavy_hours_ref: 6.0,
                precip_weight: 0.8,
                hours_weight: 0.2,
            },
            air: AirThresholds {
                pm2_5_ref: 60.0,
                pm10_ref: 120.0,
                ozone_ref: 180.0,
                pm2_5_weight: 0.6,
                pm10_weight: 0.3,
                ozone_weight: 0.1,
                ratio_cap: 2.0,
                normalizer: 2.0,
            },
        }
    }
}

fn check_positive(hazard: &'static str, label: &str, v: f64) -> Result<(), ReferenceError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(ReferenceError::InvalidThreshold {
            hazard,
            message: format!("{} must be a positive finite number, got {}", label, v),
        })
    }
}

fn check_weight(hazard: &'static str, label: &str, v: f64) -> Result<(), ReferenceError> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(ReferenceError::InvalidThreshold {
            hazard,
            message: format!("{} must be a non-negative finite weight, got {}", label, v),
        })
    }
}

impl HazardThresholds {
    /// Check every reference scale is positive and every weight non-negative.
    pub fn validate(&self) -> Result<(), ReferenceError> {
        let f = &self.flood;
        check_positive("flood", "discharge_ref", f.discharge_ref)?;
        check_positive("flood", "precip_ref", f.precip_ref)?;
        check_positive("flood", "raw_cap", f.raw_cap)?;
        check_weight("flood", "discharge_weight", f.discharge_weight)?;
        check_weight("flood", "precip_weight", f.precip_weight)?;

        let d = &self.drought;
        check_positive("drought", "safe_moisture", d.safe_moisture)?;
        check_positive("drought", "et0_ref", d.et0_ref)?;
        check_weight("drought", "root_weight", d.root_weight)?;
        check_weight("drought", "surface_weight", d.surface_weight)?;
        check_weight("drought", "et0_weight", d.et0_weight)?;

        let h = &self.heat;
        check_positive("heat", "vpd_ref", h.vpd_ref)?;
        check_positive("heat", "extreme_c - stress_onset_c", h.extreme_c - h.stress_onset_c)?;
        check_weight("heat", "temp_weight", h.temp_weight)?;
        check_weight("heat", "vpd_weight", h.vpd_weight)?;

        let c = &self.cold;
        check_positive("cold", "safe_c - critical_c", c.safe_c - c.critical_c)?;

        let w = &self.wind;
        check_positive("wind", "gust_ref_kmh", w.gust_ref_kmh)?;
        check_positive("wind", "speed_ref_kmh", w.speed_ref_kmh)?;
        check_weight("wind", "gust_weight", w.gust_weight)?;
        check_weight("wind", "speed_weight", w.speed_weight)?;

        let r = &self.rain;
        check_positive("rain", "precip_ref", r.precip_ref)?;
        check_positive("rain", "heavy_hours_ref", r.heavy_hours_ref)?;
        check_weight("rain", "precip_weight", r.precip_weight)?;
        check_weight("rain", "hours_weight", r.hours_weight)?;

        let a = &self.air;
        check_positive("air", "pm2_5_ref", a.pm2_5_ref)?;
        check_positive("air", "pm10_ref", a.pm10_ref)?;
        check_positive("air", "ozone_ref", a.ozone_ref)?;
        check_positive("air", "ratio_cap", a.ratio_cap)?;
        check_positive("air", "normalizer", a.normalizer)?;
        check_weight("air", "pm2_5_weight", a.pm2_5_weight)?;
        check_weight("air", "pm10_weight", a.pm10_weight)?;
        check_weight("air", "ozone_weight", a.ozone_weight)?;

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Startup bundle
// ---------------------------------------------------------------------------

/// Both reference tables, built once at startup.
#[derive(Debug, Clone)]
pub struct ReferenceTables {
    pub crops: CropTable,
    pub hazards: HazardThresholds,
}

impl ReferenceTables {
    /// Built-in crop table (or `crop_table_path` if given) plus the default
    /// hazard thresholds, all validated.
    pub fn load(crop_table_path: Option<&Path>) -> Result<Self, ReferenceError> {
        let crops = match crop_table_path {
            Some(path) => CropTable::from_file(path)?,
            None => CropTable::new(default_crop_entries())?,
        };
        let hazards = HazardThresholds::default();
        hazards.validate()?;
        Ok(Self { crops, hazards })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_valid() {
        let table = CropTable::new(default_crop_entries()).unwrap();
        assert_eq!(table.len(), 15);
        let names: Vec<&str> = table.iter().map(|(n, _)| n).collect();
        assert_eq!(names[0], "rice");
        assert_eq!(names[14], "sunflower");
    }

    #[test]
    fn test_get_profile() {
        let table = CropTable::new(default_crop_entries()).unwrap();
        let wheat = table.get("wheat").unwrap();
        assert_eq!(wheat.season, "Rabi");
        assert_eq!(wheat.min_rain, 300.0);
        assert!(table.get("quinoa").is_none());
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let mut entries = default_crop_entries();
        entries[1].1.min_temp = 30.0;
        let err = CropTable::new(entries).unwrap_err();
        assert!(
            matches!(err, ReferenceError::InvalidCrop { ref crop, .. } if crop == "wheat"),
            "unexpected error: {}",
            err
        );
    }

    #[test]
    fn test_non_finite_bounds_rejected() {
        let mut entries = default_crop_entries();
        entries[0].1.max_rain = f64::INFINITY;
        assert!(CropTable::new(entries).is_err());
    }

    #[test]
    fn test_duplicate_crop_rejected() {
        let mut entries = default_crop_entries();
        let dup = entries[0].clone();
        entries.push(dup);
        assert!(matches!(
            CropTable::new(entries),
            Err(ReferenceError::DuplicateCrop(name)) if name == "rice"
        ));
    }

    #[test]
    fn test_empty_table_rejected() {
        assert!(matches!(CropTable::new(vec![]), Err(ReferenceError::EmptyTable)));
    }

    #[test]
    fn test_from_json_preserves_order() {
        let json = r#"[
            {"name": "millet", "min_temp": 25, "max_temp": 35, "min_rain": 200, "max_rain": 600,
             "moisture_ideal_min": 0.1, "moisture_ideal_max": 0.3,
             "season": "Kharif", "description": "Drought-hardy grain",
             "tips": "Sow after first rains"},
            {"name": "barley", "min_temp": 7, "max_temp": 22, "min_rain": 300, "max_rain": 900,
             "moisture_ideal_min": 0.15, "moisture_ideal_max": 0.4,
             "season": "Rabi", "description": "Cool-season cereal", "tips": "Tolerates saline soil"}
        ]"#;
        let table = CropTable::from_json(json).unwrap();
        let names: Vec<&str> = table.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["millet", "barley"]);
        assert_eq!(table.get("barley").unwrap().max_temp, 22.0);
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(
            CropTable::from_json("{\"rice\": 1}"),
            Err(ReferenceError::Json(_))
        ));
    }

    #[test]
    fn test_default_thresholds_valid() {
        assert!(HazardThresholds::default().validate().is_ok());
    }

    #[test]
    fn test_zero_scale_threshold_rejected() {
        let mut t = HazardThresholds::default();
        t.wind.gust_ref_kmh = 0.0;
        let err = t.validate().unwrap_err();
        assert!(err.to_string().contains("wind"));
    }

    #[test]
    fn test_inverted_heat_band_rejected() {
        let mut t = HazardThresholds::default();
        t.heat.extreme_c = 25.0;
        assert!(t.validate().is_err());
    }

    #[test]
    fn test_load_defaults() {
        let tables = ReferenceTables::load(None).unwrap();
        assert_eq!(tables.crops.len(), 15);
        assert_eq!(tables.hazards.heat.stress_onset_c, 30.0);
    }

    #[test]
    fn test_load_missing_file() {
        let err = ReferenceTables::load(Some(Path::new("/nonexistent/crops.json"))).unwrap_err();
        assert!(matches!(err, ReferenceError::Io(_)));
    }
}
