//! Crop HTTP endpoints.
//!
//! - GET  /api/v1/crops
//! - GET  /api/v1/crops/:name
//! - POST /api/v1/crops/score
//! - GET  /api/v1/crops/suggest?lat=..&lon=.. | ?location=name

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::extract::{ApiJson, ApiQuery};
use super::{validate_coordinates, AppState};
use crate::errors::{AppError, ErrorResponse};
use crate::helpers::finite_in;
use crate::services::advisory::{suggest_crops, suggest_crops_by_name, CropSuggestion};
use crate::services::aggregate::ClimateObservation;
use crate::services::crops::{score_crops, CropScoreResult};
use crate::services::reference::CropProfile;

/// One row of the crop reference table.
#[derive(Debug, Serialize, ToSchema)]
pub struct CropEntry {
    pub name: String,
    #[serde(flatten)]
    pub profile: CropProfile,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SuggestQuery {
    /// Latitude (WGS84); requires `lon`
    pub lat: Option<f64>,
    /// Longitude (WGS84); requires `lat`
    pub lon: Option<f64>,
    /// Place name to geocode instead of coordinates
    pub location: Option<String>,
}

/// List the crop reference table in ranking tie-break order.
#[utoipa::path(
    get,
    path = "/api/v1/crops",
    tag = "Crops",
    responses(
        (status = 200, description = "All crop profiles", body = Vec<CropEntry>),
    )
)]
pub async fn list_crops(State(state): State<AppState>) -> Json<Vec<CropEntry>> {
    let entries = state
        .tables
        .crops
        .iter()
        .map(|(name, profile)| CropEntry {
            name: name.to_string(),
            profile: profile.clone(),
        })
        .collect();
    Json(entries)
}

#[utoipa::path(
    get,
    path = "/api/v1/crops/{name}",
    tag = "Crops",
    params(
        ("name" = String, Path, description = "Crop name (e.g. \"rice\")"),
    ),
    responses(
        (status = 200, description = "Crop profile", body = CropEntry),
        (status = 404, description = "Unknown crop", body = ErrorResponse),
    )
)]
pub async fn get_crop(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<CropEntry>, AppError> {
    let profile = state
        .tables
        .crops
        .get(&name)
        .ok_or_else(|| AppError::NotFound(format!("Crop '{}' not found", name)))?;
    Ok(Json(CropEntry {
        name,
        profile: profile.clone(),
    }))
}

/// Rank crops for a caller-supplied climate.
#[utoipa::path(
    post,
    path = "/api/v1/crops/score",
    tag = "Crops",
    request_body = ClimateObservation,
    responses(
        (status = 200, description = "Published crop ranking", body = Vec<CropScoreResult>),
        (status = 400, description = "Malformed or out-of-domain climate", body = ErrorResponse),
    )
)]
pub async fn score_climate(
    State(state): State<AppState>,
    ApiJson(observation): ApiJson<ClimateObservation>,
) -> Result<Json<Vec<CropScoreResult>>, AppError> {
    validate_climate(&observation)?;
    Ok(Json(score_crops(&observation, &state.tables.crops)))
}

/// Same domain the aggregator accepts from NASA POWER: temperature in
/// (-80, 80) °C, non-negative rain, moisture in [0, 1].
fn validate_climate(observation: &ClimateObservation) -> Result<(), AppError> {
    let avg_temp = Some(observation.avg_temp);
    if finite_in(avg_temp, -80.0, 80.0).filter(|t| t.abs() < 80.0).is_none() {
        return Err(AppError::BadRequest(format!(
            "avg_temp must be between -80 and 80 °C, got {}",
            observation.avg_temp
        )));
    }
    if finite_in(Some(observation.yearly_rain), 0.0, f64::MAX).is_none() {
        return Err(AppError::BadRequest(format!(
            "yearly_rain must be a non-negative amount, got {}",
            observation.yearly_rain
        )));
    }
    if finite_in(Some(observation.soil_moisture), 0.0, 1.0).is_none() {
        return Err(AppError::BadRequest(format!(
            "soil_moisture must be between 0 and 1, got {}",
            observation.soil_moisture
        )));
    }
    Ok(())
}

/// Suggest crops for a point or a named place from its multi-year climate.
///
/// A climate provider failure still returns suggestions, scored against the
/// fallback climate with `climate_available: false`.
#[utoipa::path(
    get,
    path = "/api/v1/crops/suggest",
    tag = "Crops",
    params(SuggestQuery),
    responses(
        (status = 200, description = "Crop suggestions", body = CropSuggestion),
        (status = 400, description = "Missing or invalid location", body = ErrorResponse),
        (status = 404, description = "Place name not found", body = ErrorResponse),
        (status = 502, description = "Geocoding service unreachable", body = ErrorResponse),
    )
)]
pub async fn suggest(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<SuggestQuery>,
) -> Result<Json<CropSuggestion>, AppError> {
    let suggestion = match (params.lat, params.lon, params.location.as_deref()) {
        (Some(lat), Some(lon), _) => {
            validate_coordinates(lat, lon)?;
            suggest_crops(&state.power, &state.tables.crops, &state.climate_years, lat, lon).await
        }
        (None, None, Some(name)) if !name.trim().is_empty() => {
            suggest_crops_by_name(
                &state.open_meteo,
                &state.power,
                &state.tables.crops,
                &state.climate_years,
                name.trim(),
            )
            .await?
        }
        _ => {
            return Err(AppError::BadRequest(
                "Provide either lat and lon, or location".to_string(),
            ))
        }
    };
    Ok(Json(suggestion))
}
