//! Observation aggregator.
//!
//! Collapses multi-year monthly series (precipitation, temperature, root-zone
//! moisture) into one representative `ClimateObservation`:
//!
//! 1. Partition valid samples by calendar year (only years in the range)
//! 2. Per year: sum rainfall, average temperature, average moisture
//! 3. Average each per-year aggregate over every year in the range
//! 4. Substitute a fixed fallback for any result that is zero or non-finite
//!
//! Step 3 divides by the number of years in the range, so a year with no
//! valid samples pulls the average towards zero.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use utoipa::ToSchema;

use crate::helpers::clamp01;

/// Fallback mean temperature (°C).
pub const FALLBACK_AVG_TEMP: f64 = 25.0;
/// Fallback yearly rainfall (mm).
pub const FALLBACK_YEARLY_RAIN: f64 = 500.0;
/// Fallback root-zone soil moisture (fraction).
pub const FALLBACK_SOIL_MOISTURE: f64 = 0.4;

/// Upper bound for accepted moisture samples; values above 1 are clamped.
const MOISTURE_ACCEPT_MAX: f64 = 1.5;

/// Monthly samples keyed by `YYYYMM`.
pub type MonthlySeries = BTreeMap<String, f64>;

/// Raw series for the three climate variables. An empty series means the
/// provider returned nothing for that variable.
#[derive(Debug, Clone, Default)]
pub struct ClimateSeries {
    /// Monthly precipitation (mm)
    pub precipitation: MonthlySeries,
    /// Monthly mean temperature (°C)
    pub temperature: MonthlySeries,
    /// Monthly root-zone wetness (fraction)
    pub root_moisture: MonthlySeries,
}

/// Whether a climate value came from measurements or the fixed fallback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ValueSource {
    #[default]
    Measured,
    Fallback,
}

/// Provenance of each field of a `ClimateObservation`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ClimateSources {
    pub avg_temp: ValueSource,
    pub yearly_rain: ValueSource,
    pub soil_moisture: ValueSource,
}

impl ClimateSources {
    pub fn any_fallback(&self) -> bool {
        [self.avg_temp, self.yearly_rain, self.soil_moisture].contains(&ValueSource::Fallback)
    }
}

/// Representative multi-year climate for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ClimateObservation {
    /// Multi-year mean temperature (°C)
    pub avg_temp: f64,
    /// Mean yearly rainfall (mm)
    pub yearly_rain: f64,
    /// Mean root-zone soil moisture (fraction 0..1)
    pub soil_moisture: f64,
    /// Which fields were measured and which fell back to defaults
    #[serde(default)]
    pub sources: ClimateSources,
}

impl ClimateObservation {
    /// The documented fallback triple, flagged as fallback throughout.
    pub fn fallback() -> Self {
        Self {
            avg_temp: FALLBACK_AVG_TEMP,
            yearly_rain: FALLBACK_YEARLY_RAIN,
            soil_moisture: FALLBACK_SOIL_MOISTURE,
            sources: ClimateSources {
                avg_temp: ValueSource::Fallback,
                yearly_rain: ValueSource::Fallback,
                soil_moisture: ValueSource::Fallback,
            },
        }
    }
}

#[derive(Debug, Default)]
struct YearAccum {
    rain_sum: f64,
    temp_sum: f64,
    temp_count: u32,
    moisture_sum: f64,
    moisture_count: u32,
}

impl YearAccum {
    fn mean_temp(&self) -> f64 {
        if self.temp_count > 0 {
            self.temp_sum / self.temp_count as f64
        } else {
            0.0
        }
    }

    fn mean_moisture(&self) -> f64 {
        if self.moisture_count > 0 {
            self.moisture_sum / self.moisture_count as f64
        } else {
            0.0
        }
    }
}

/// Parse a `YYYYMM` key into (year, month). Month 13 (annual summary rows)
/// and anything else outside 1..=12 is rejected.
fn parse_period_key(key: &str) -> Option<(i32, u32)> {
    if key.len() != 6 || !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = key[..4].parse().ok()?;
    let month: u32 = key[4..].parse().ok()?;
    (1..=12).contains(&month).then_some((year, month))
}

/// Feed every in-range, valid sample of `series` into its year's accumulator.
/// Returns the number of samples dropped.
fn accumulate<F>(
    series: &MonthlySeries,
    years: &mut BTreeMap<i32, YearAccum>,
    mut add: F,
) -> usize
where
    F: FnMut(&mut YearAccum, f64) -> bool,
{
    let mut dropped = 0;
    for (key, &value) in series {
        let Some((year, _)) = parse_period_key(key) else {
            continue;
        };
        let Some(acc) = years.get_mut(&year) else {
            continue;
        };
        if !value.is_finite() || !add(acc, value) {
            dropped += 1;
        }
    }
    dropped
}

fn finalize(value: f64, fallback: f64) -> (f64, ValueSource) {
    if value.is_finite() && value != 0.0 {
        (value, ValueSource::Measured)
    } else {
        (fallback, ValueSource::Fallback)
    }
}

/// Aggregate monthly series over the inclusive `years` range.
///
/// Never fails: missing or invalid data degrades to the documented fallbacks,
/// flagged in `sources`.
pub fn aggregate_climate(series: &ClimateSeries, years: RangeInclusive<i32>) -> ClimateObservation {
    let mut per_year: BTreeMap<i32, YearAccum> =
        years.map(|y| (y, YearAccum::default())).collect();

    let dropped_rain = accumulate(&series.precipitation, &mut per_year, |acc, v| {
        if v >= 0.0 {
            acc.rain_sum += v;
            true
        } else {
            false
        }
    });
    let dropped_temp = accumulate(&series.temperature, &mut per_year, |acc, v| {
        if v > -80.0 && v < 80.0 {
            acc.temp_sum += v;
            acc.temp_count += 1;
            true
        } else {
            false
        }
    });
    let dropped_moisture = accumulate(&series.root_moisture, &mut per_year, |acc, v| {
        if (0.0..=MOISTURE_ACCEPT_MAX).contains(&v) {
            acc.moisture_sum += clamp01(v);
            acc.moisture_count += 1;
            true
        } else {
            false
        }
    });

    if dropped_rain + dropped_temp + dropped_moisture > 0 {
        tracing::debug!(
            "Dropped out-of-domain samples: precipitation={}, temperature={}, moisture={}",
            dropped_rain,
            dropped_temp,
            dropped_moisture
        );
    }

    // 0/0 on an empty range yields NaN, which finalize() replaces
    let n = per_year.len() as f64;
    let avg_rain = per_year.values().map(|y| y.rain_sum).sum::<f64>() / n;
    let avg_temp = per_year.values().map(YearAccum::mean_temp).sum::<f64>() / n;
    let avg_moisture = per_year.values().map(YearAccum::mean_moisture).sum::<f64>() / n;

    let (avg_temp, temp_src) = finalize(avg_temp, FALLBACK_AVG_TEMP);
    let (yearly_rain, rain_src) = finalize(avg_rain, FALLBACK_YEARLY_RAIN);
    let (soil_moisture, moisture_src) = finalize(avg_moisture, FALLBACK_SOIL_MOISTURE);

    let observation = ClimateObservation {
        avg_temp,
        yearly_rain,
        soil_moisture,
        sources: ClimateSources {
            avg_temp: temp_src,
            yearly_rain: rain_src,
            soil_moisture: moisture_src,
        },
    };

    if observation.sources.any_fallback() {
        tracing::warn!("Climate aggregation used fallback values: {:?}", observation.sources);
    }

    observation
}
