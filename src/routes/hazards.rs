use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use utoipa::IntoParams;

use super::extract::{ApiJson, ApiQuery};
use super::{validate_coordinates, AppState};
use crate::errors::{AppError, ErrorResponse};
use crate::services::advisory::{hazard_report, HazardReport};
use crate::services::hazards::{assess_hazards, HazardAssessment, HazardObservation};

#[derive(Debug, Deserialize, IntoParams)]
pub struct HazardQuery {
    /// Latitude (WGS84)
    pub lat: f64,
    /// Longitude (WGS84)
    pub lon: f64,
}

fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

/// Score a caller-supplied hazard observation.
///
/// Absent fields are treated as missing inputs; out-of-domain values are
/// discarded before scoring.
#[utoipa::path(
    post,
    path = "/api/v1/hazards/score",
    tag = "Hazards",
    request_body = HazardObservation,
    responses(
        (status = 200, description = "Scores for all seven hazards", body = HazardAssessment),
        (status = 400, description = "Malformed observation", body = ErrorResponse),
    )
)]
pub async fn score_observation(
    State(state): State<AppState>,
    ApiJson(observation): ApiJson<HazardObservation>,
) -> Json<HazardAssessment> {
    Json(assess_hazards(&observation, &state.tables.hazards))
}

/// Fetch today's readings for a point from all providers and score them.
#[utoipa::path(
    get,
    path = "/api/v1/hazards",
    tag = "Hazards",
    params(HazardQuery),
    responses(
        (
            status = 200,
            description = "Hazard report (provider failures listed, never fatal)",
            body = HazardReport
        ),
        (status = 400, description = "Invalid coordinates", body = ErrorResponse),
    )
)]
pub async fn get_hazards(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<HazardQuery>,
) -> Result<Json<HazardReport>, AppError> {
    validate_coordinates(params.lat, params.lon)?;
    let report = hazard_report(
        &state.open_meteo,
        &state.tables.hazards,
        round4(params.lat),
        round4(params.lon),
    )
    .await;
    Ok(Json(report))
}
