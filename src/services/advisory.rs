//! Location advisories: fetch observations from the providers, then score.
//!
//! Provider failures never fail the advisory. A failed hazard provider leaves
//! its fields absent; a failed climate fetch falls back to the default
//! climate and reports the error alongside the suggestions.

use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::errors::AppError;
use crate::services::aggregate::{aggregate_climate, ClimateObservation};
use crate::services::crops::{score_crops, CropScoreResult};
use crate::services::hazards::{assess_hazards, HazardAssessment, HazardObservation};
use crate::services::open_meteo::{GeoLocation, OpenMeteoClient};
use crate::services::power::PowerClient;
use crate::services::reference::{CropTable, HazardThresholds};

/// A provider that could not be reached or returned garbage.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProviderFailure {
    /// Provider name ("flood", "forecast", "agro" or "air_quality")
    pub provider: String,
    pub error: String,
}

/// Hazard advisory for one point.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HazardReport {
    /// When the providers were queried
    pub fetched_at: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    /// Merged provider readings the scores were computed from
    pub observation: HazardObservation,
    pub assessment: HazardAssessment,
    /// Providers that failed; their fields are absent from `observation`
    pub provider_failures: Vec<ProviderFailure>,
}

/// Crop suggestions for one point.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CropSuggestion {
    /// Geocoded place, when the request was by name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoLocation>,
    pub latitude: f64,
    pub longitude: f64,
    /// False when the climate provider failed and the fallback was scored
    pub climate_available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub climate_error: Option<String>,
    pub climate: ClimateObservation,
    pub suggestions: Vec<CropScoreResult>,
}

/// Query all four hazard providers concurrently and merge what succeeded.
pub async fn fetch_hazard_observation(
    client: &OpenMeteoClient,
    lat: f64,
    lon: f64,
) -> (HazardObservation, Vec<ProviderFailure>) {
    let (flood, forecast, agro, air_quality) = futures::join!(
        client.fetch_flood(lat, lon),
        client.fetch_forecast(lat, lon),
        client.fetch_agro(lat, lon),
        client.fetch_air_quality(lat, lon),
    );

    let mut observation = HazardObservation::default();
    let mut failures = Vec::new();
    for (provider, result) in [
        ("flood", flood),
        ("forecast", forecast),
        ("agro", agro),
        ("air_quality", air_quality),
    ] {
        match result {
            Ok(partial) => observation.merge(partial),
            Err(e) => {
                tracing::warn!(
                    "Hazard provider '{}' failed at ({}, {}): {}",
                    provider,
                    lat,
                    lon,
                    e
                );
                failures.push(ProviderFailure {
                    provider: provider.to_string(),
                    error: e.to_string(),
                });
            }
        }
    }
    (observation, failures)
}

pub async fn hazard_report(
    client: &OpenMeteoClient,
    thresholds: &HazardThresholds,
    lat: f64,
    lon: f64,
) -> HazardReport {
    let fetched_at = Utc::now();
    let (observation, provider_failures) = fetch_hazard_observation(client, lat, lon).await;
    let assessment = assess_hazards(&observation, thresholds);
    tracing::info!(
        "Hazard report for ({}, {}): {:?}, {} provider failures",
        lat,
        lon,
        assessment.status,
        provider_failures.len()
    );
    HazardReport {
        fetched_at,
        latitude: lat,
        longitude: lon,
        observation,
        assessment,
        provider_failures,
    }
}

/// Score crops for a point from its multi-year climate.
pub async fn suggest_crops(
    power: &PowerClient,
    crops: &CropTable,
    years: &RangeInclusive<i32>,
    lat: f64,
    lon: f64,
) -> CropSuggestion {
    let (climate, climate_error) = match power.fetch_monthly(lat, lon, years).await {
        Ok(series) => (aggregate_climate(&series, years.clone()), None),
        Err(e) => {
            tracing::warn!(
                "Climate fetch failed at ({}, {}), scoring fallback climate: {}",
                lat,
                lon,
                e
            );
            (ClimateObservation::fallback(), Some(e.to_string()))
        }
    };

    let suggestions = score_crops(&climate, crops);
    tracing::info!(
        "Suggested {} crops for ({}, {})",
        suggestions.len(),
        lat,
        lon
    );
    CropSuggestion {
        location: None,
        latitude: lat,
        longitude: lon,
        climate_available: climate_error.is_none(),
        climate_error,
        climate,
        suggestions,
    }
}

/// Geocode `name`, then suggest crops for the top match.
pub async fn suggest_crops_by_name(
    geocoder: &OpenMeteoClient,
    power: &PowerClient,
    crops: &CropTable,
    years: &RangeInclusive<i32>,
    name: &str,
) -> Result<CropSuggestion, AppError> {
    let location = geocoder
        .geocode(name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Location '{}' not found", name)))?;
    let mut suggestion =
        suggest_crops(power, crops, years, location.latitude, location.longitude).await;
    suggestion.location = Some(location);
    Ok(suggestion)
}
