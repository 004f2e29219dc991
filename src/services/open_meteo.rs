//! Open-Meteo clients: geocoding plus the four hazard providers.
//!
//! Each hazard provider fills a disjoint subset of `HazardObservation`.
//! Daily forecast and agro values use the first day; flood discharge and
//! hourly air quality use the last entry.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::AppError;
use crate::helpers::Reading;
use crate::services::{decode, get_json};
use crate::services::hazards::HazardObservation;

const FORECAST_DAILY: &str = "temperature_2m_max,temperature_2m_min,precipitation_sum,\
wind_gusts_10m_max,wind_speed_10m_max,heavy_precipitation_hours";
const FLOOD_DAILY: &str = "river_discharge";
const AGRO_DAILY: &str =
    "soil_moisture_0_7cm,soil_moisture_7_28cm,et0_fao_evapotranspiration,vapor_pressure_deficit";
const AIR_QUALITY_HOURLY: &str = "pm2_5,pm10,ozone";

const GEOCODING: &str = "Open-Meteo geocoding";
const FORECAST: &str = "Open-Meteo forecast";
const FLOOD: &str = "Open-Meteo flood";
const AGRO: &str = "Open-Meteo agro";
const AIR_QUALITY: &str = "Open-Meteo air quality";

/// Endpoint URLs for every Open-Meteo service used.
#[derive(Debug, Clone)]
pub struct OpenMeteoUrls {
    pub geocoding: String,
    pub forecast: String,
    pub flood: String,
    pub agro: String,
    pub air_quality: String,
}

/// A geocoded place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeoLocation {
    /// Place name (e.g. "Kochi")
    pub name: String,
    /// Country name, when known
    pub country: Option<String>,
    /// Latitude (WGS84)
    pub latitude: f64,
    /// Longitude (WGS84)
    pub longitude: f64,
}

#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: reqwest::Client,
    urls: OpenMeteoUrls,
}

/// Coordinates formatted to 4 decimal places.
fn point_query(lat: f64, lon: f64) -> Vec<(&'static str, String)> {
    vec![
        ("latitude", format!("{:.4}", lat)),
        ("longitude", format!("{:.4}", lon)),
    ]
}

impl OpenMeteoClient {
    pub fn new(client: reqwest::Client, urls: OpenMeteoUrls) -> Self {
        Self { client, urls }
    }

    /// Resolve a place name to its top match, `None` when nothing matched.
    pub async fn geocode(&self, name: &str) -> Result<Option<GeoLocation>, AppError> {
        let query = [("name", name.to_string()), ("count", "1".to_string())];
        let json = get_json(&self.client, GEOCODING, &self.urls.geocoding, &query).await?;
        parse_geocoding(&json)
    }

    pub async fn fetch_forecast(&self, lat: f64, lon: f64) -> Result<HazardObservation, AppError> {
        let mut query = point_query(lat, lon);
        query.push(("daily", FORECAST_DAILY.to_string()));
        query.push(("timezone", "auto".to_string()));
        let json = get_json(&self.client, FORECAST, &self.urls.forecast, &query).await?;
        parse_forecast(&json)
    }

    pub async fn fetch_flood(&self, lat: f64, lon: f64) -> Result<HazardObservation, AppError> {
        let mut query = point_query(lat, lon);
        query.push(("daily", FLOOD_DAILY.to_string()));
        let json = get_json(&self.client, FLOOD, &self.urls.flood, &query).await?;
        parse_flood(&json)
    }

    pub async fn fetch_agro(&self, lat: f64, lon: f64) -> Result<HazardObservation, AppError> {
        let mut query = point_query(lat, lon);
        query.push(("daily", AGRO_DAILY.to_string()));
        query.push(("timezone", "auto".to_string()));
        let json = get_json(&self.client, AGRO, &self.urls.agro, &query).await?;
        parse_agro(&json)
    }

    pub async fn fetch_air_quality(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<HazardObservation, AppError> {
        let mut query = point_query(lat, lon);
        query.push(("hourly", AIR_QUALITY_HOURLY.to_string()));
        let json = get_json(&self.client, AIR_QUALITY, &self.urls.air_quality, &query).await?;
        parse_air_quality(&json)
    }
}

// Open-Meteo response structures (only the fields we read)
#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Vec<GeocodingResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    country: Option<String>,
    latitude: f64,
    longitude: f64,
}

type Readings = Option<Vec<Reading>>;

#[derive(Debug, Deserialize)]
struct DailyResponse<T> {
    daily: Option<T>,
}

#[derive(Debug, Deserialize)]
struct HourlyResponse<T> {
    hourly: Option<T>,
}

#[derive(Debug, Default, Deserialize)]
struct ForecastDaily {
    temperature_2m_max: Readings,
    temperature_2m_min: Readings,
    precipitation_sum: Readings,
    heavy_precipitation_hours: Readings,
    wind_gusts_10m_max: Readings,
    wind_speed_10m_max: Readings,
}

#[derive(Debug, Default, Deserialize)]
struct FloodDaily {
    river_discharge: Readings,
}

#[derive(Debug, Default, Deserialize)]
struct AgroDaily {
    soil_moisture_0_7cm: Readings,
    soil_moisture_7_28cm: Readings,
    et0_fao_evapotranspiration: Readings,
    vapor_pressure_deficit: Readings,
}

#[derive(Debug, Default, Deserialize)]
struct AirQualityHourly {
    pm2_5: Readings,
    pm10: Readings,
    ozone: Readings,
}

fn first(values: Readings) -> Option<f64> {
    values?.into_iter().next()?.0
}

fn last(values: Readings) -> Option<f64> {
    values?.into_iter().last()?.0
}

pub fn parse_geocoding(json: &serde_json::Value) -> Result<Option<GeoLocation>, AppError> {
    let response: GeocodingResponse = decode(GEOCODING, json)?;
    Ok(response.results.into_iter().next().map(|top| GeoLocation {
        name: top.name,
        country: top.country,
        latitude: top.latitude,
        longitude: top.longitude,
    }))
}

pub fn parse_forecast(json: &serde_json::Value) -> Result<HazardObservation, AppError> {
    let response: DailyResponse<ForecastDaily> = decode(FORECAST, json)?;
    let daily = response.daily.unwrap_or_default();
    Ok(HazardObservation {
        max_temp: first(daily.temperature_2m_max),
        min_temp: first(daily.temperature_2m_min),
        precipitation: first(daily.precipitation_sum),
        heavy_precip_hours: first(daily.heavy_precipitation_hours),
        wind_gust: first(daily.wind_gusts_10m_max),
        wind_speed: first(daily.wind_speed_10m_max),
        ..Default::default()
    })
}

pub fn parse_flood(json: &serde_json::Value) -> Result<HazardObservation, AppError> {
    let response: DailyResponse<FloodDaily> = decode(FLOOD, json)?;
    let daily = response.daily.unwrap_or_default();
    Ok(HazardObservation {
        river_discharge: last(daily.river_discharge),
        ..Default::default()
    })
}

pub fn parse_agro(json: &serde_json::Value) -> Result<HazardObservation, AppError> {
    let response: DailyResponse<AgroDaily> = decode(AGRO, json)?;
    let daily = response.daily.unwrap_or_default();
    Ok(HazardObservation {
        soil_moisture_surface: first(daily.soil_moisture_0_7cm),
        soil_moisture_root: first(daily.soil_moisture_7_28cm),
        et0: first(daily.et0_fao_evapotranspiration),
        vapor_pressure_deficit: first(daily.vapor_pressure_deficit),
        ..Default::default()
    })
}

pub fn parse_air_quality(json: &serde_json::Value) -> Result<HazardObservation, AppError> {
    let response: HourlyResponse<AirQualityHourly> = decode(AIR_QUALITY, json)?;
    let hourly = response.hourly.unwrap_or_default();
    Ok(HazardObservation {
        pm2_5: last(hourly.pm2_5),
        pm10: last(hourly.pm10),
        ozone: last(hourly.ozone),
        ..Default::default()
    })
}
