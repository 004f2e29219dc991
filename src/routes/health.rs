use axum::extract::State;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use super::AppState;
use crate::services::hazards::Hazard;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status ("ok" when healthy)
    pub status: String,
    /// API version
    pub version: String,
    /// Number of crops in the loaded crop table
    pub crops: usize,
    /// Number of hazards scored
    pub hazards: usize,
}

/// Health check endpoint.
///
/// Reference tables are validated at startup, so a running service is
/// always "ok"; the table sizes show which crop table was loaded.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        crops: state.tables.crops.len(),
        hazards: Hazard::ALL.len(),
    })
}
