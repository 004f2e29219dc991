// AgroScore API v0.1
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod errors;
mod helpers;
mod routes;
mod services;

use config::AppConfig;
use routes::AppState;
use services::open_meteo::OpenMeteoClient;
use services::power::PowerClient;
use services::reference::ReferenceTables;

/// AgroScore API OpenAPI specification.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "AgroScore API",
        version = "0.1.0",
        description = "Agricultural advisory scoring. Suggests crops for a location from \
            multi-year NASA POWER climate data, and scores seven weather hazards \
            (flood, drought, heat, cold, wind, heavy rain, air quality) from \
            Open-Meteo forecasts.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Crops", description = "Crop reference table and suitability scoring"),
        (name = "Hazards", description = "Hazard risk scoring"),
        (name = "Locations", description = "Place name geocoding"),
    ),
    paths(
        routes::health::health_check,
        routes::crops::list_crops,
        routes::crops::get_crop,
        routes::crops::score_climate,
        routes::crops::suggest,
        routes::hazards::score_observation,
        routes::hazards::get_hazards,
        routes::locations::search_location,
    ),
    components(
        schemas(
            routes::health::HealthResponse,
            routes::crops::CropEntry,
            services::reference::CropProfile,
            services::aggregate::ClimateObservation,
            services::aggregate::ClimateSources,
            services::aggregate::ValueSource,
            services::crops::FactorScores,
            services::crops::CropScoreResult,
            services::advisory::CropSuggestion,
            services::advisory::HazardReport,
            services::advisory::ProviderFailure,
            services::hazards::Hazard,
            services::hazards::HazardObservation,
            services::hazards::HazardScore,
            services::hazards::HazardAssessment,
            services::hazards::AssessmentStatus,
            services::hazards::RiskLevel,
            services::open_meteo::GeoLocation,
            errors::ErrorResponse,
        )
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agroscore_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();

    // Reference tables are validated once; a malformed table aborts startup
    let tables = ReferenceTables::load(config.crop_table_path.as_deref())
        .expect("Failed to load reference tables");
    tracing::info!(
        "Loaded {} crops from {}",
        tables.crops.len(),
        config
            .crop_table_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in table".to_string())
    );

    let http = services::build_http_client(&config.user_agent, config.fetch_timeout)
        .expect("Failed to build HTTP client");

    let app_state = AppState {
        power: PowerClient::new(http.clone(), &config.nasa_power_url),
        open_meteo: OpenMeteoClient::new(http, config.open_meteo.clone()),
        tables: Arc::new(tables),
        climate_years: config.climate_years(),
    };

    // CORS: GET for lookups, POST for caller-supplied observations
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers(Any);

    let app = Router::new()
        .merge(routes::api_router(app_state))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("API server listening on {}", addr);
    tracing::info!(
        "Swagger UI available at http://localhost:{}/swagger-ui/",
        config.port
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind TCP listener");
    axum::serve(listener, app)
        .await
        .expect("Server terminated unexpectedly");
}
