pub mod crops;
mod extract;
pub mod hazards;
pub mod health;
pub mod locations;

use std::ops::RangeInclusive;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::errors::AppError;
use crate::services::open_meteo::OpenMeteoClient;
use crate::services::power::PowerClient;
use crate::services::reference::ReferenceTables;

/// Shared application state.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) power: PowerClient,
    pub(crate) open_meteo: OpenMeteoClient,
    pub(crate) tables: Arc<ReferenceTables>,
    pub(crate) climate_years: RangeInclusive<i32>,
}

/// Reject non-finite or out-of-range WGS84 coordinates.
pub(crate) fn validate_coordinates(lat: f64, lon: f64) -> Result<(), AppError> {
    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return Err(AppError::BadRequest(format!(
            "Latitude must be between -90 and 90, got {}",
            lat
        )));
    }
    if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
        return Err(AppError::BadRequest(format!(
            "Longitude must be between -180 and 180, got {}",
            lon
        )));
    }
    Ok(())
}

/// All `/api/v1` routes.
pub(crate) fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health::health_check))
        .route("/api/v1/crops", get(crops::list_crops))
        .route("/api/v1/crops/score", post(crops::score_climate))
        .route("/api/v1/crops/suggest", get(crops::suggest))
        .route("/api/v1/crops/:name", get(crops::get_crop))
        .route("/api/v1/hazards", get(hazards::get_hazards))
        .route("/api/v1/hazards/score", post(hazards::score_observation))
        .route("/api/v1/locations/search", get(locations::search_location))
        .with_state(state)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_coordinates() {
        assert!(validate_coordinates(0.0, 0.0).is_ok());
        assert!(validate_coordinates(-90.0, 180.0).is_ok());
        assert!(validate_coordinates(90.1, 0.0).is_err());
        assert!(validate_coordinates(0.0, -180.5).is_err());
        assert!(validate_coordinates(f64::NAN, 0.0).is_err());
    }
}
