use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use utoipa::IntoParams;

use super::extract::ApiQuery;
use super::AppState;
use crate::errors::{AppError, ErrorResponse};
use crate::services::open_meteo::GeoLocation;

#[derive(Debug, Deserialize, IntoParams)]
pub struct LocationQuery {
    /// Place name (e.g. "Pune")
    pub name: String,
}

/// Resolve a place name to coordinates (top match only).
#[utoipa::path(
    get,
    path = "/api/v1/locations/search",
    tag = "Locations",
    params(LocationQuery),
    responses(
        (status = 200, description = "Best matching place", body = GeoLocation),
        (status = 400, description = "Missing or empty name", body = ErrorResponse),
        (status = 404, description = "No match", body = ErrorResponse),
        (status = 502, description = "Geocoding service unreachable", body = ErrorResponse),
    )
)]
pub async fn search_location(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<LocationQuery>,
) -> Result<Json<GeoLocation>, AppError> {
    let name = params.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("name must not be empty".to_string()));
    }
    let location = state
        .open_meteo
        .geocode(name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Location '{}' not found", name)))?;
    Ok(Json(location))
}
