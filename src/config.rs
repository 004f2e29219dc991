use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::time::Duration;

use crate::services::open_meteo::OpenMeteoUrls;

const DEFAULT_NASA_POWER_URL: &str = "https://power.larc.nasa.gov/api/temporal/monthly/point";
const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
const DEFAULT_FLOOD_URL: &str = "https://flood-api.open-meteo.com/v1/flood";
const DEFAULT_AGRO_URL: &str = "https://api.open-meteo.com/v1/agrometeorology";
const DEFAULT_AIR_QUALITY_URL: &str = "https://air-quality-api.open-meteo.com/v1/air-quality";

/// Application configuration, parsed from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub user_agent: String,
    /// Per-request timeout for every provider call.
    pub fetch_timeout: Duration,
    /// First and last calendar year of the climate window.
    pub climate_start_year: i32,
    pub climate_end_year: i32,
    /// Optional JSON file replacing the built-in crop table.
    pub crop_table_path: Option<PathBuf>,
    pub nasa_power_url: String,
    pub open_meteo: OpenMeteoUrls,
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

impl AppConfig {
    pub fn from_env() -> Self {
        let climate_start_year = env_or("CLIMATE_START_YEAR", "2023")
            .parse()
            .expect("CLIMATE_START_YEAR must be a valid year");
        let climate_end_year = env_or("CLIMATE_END_YEAR", "2025")
            .parse()
            .expect("CLIMATE_END_YEAR must be a valid year");
        assert!(
            climate_start_year <= climate_end_year,
            "CLIMATE_START_YEAR must not be after CLIMATE_END_YEAR"
        );

        Self {
            port: env_or("PORT", "8080")
                .parse()
                .expect("PORT must be a valid u16"),
            user_agent: env_or("HTTP_USER_AGENT", concat!("AgroScore/", env!("CARGO_PKG_VERSION"))),
            fetch_timeout: Duration::from_secs(
                env_or("FETCH_TIMEOUT_SECS", "10")
                    .parse()
                    .expect("FETCH_TIMEOUT_SECS must be a whole number of seconds"),
            ),
            climate_start_year,
            climate_end_year,
            crop_table_path: std::env::var("CROP_TABLE_PATH").ok().map(PathBuf::from),
            nasa_power_url: env_or("NASA_POWER_URL", DEFAULT_NASA_POWER_URL),
            open_meteo: OpenMeteoUrls {
                geocoding: env_or("OPEN_METEO_GEOCODING_URL", DEFAULT_GEOCODING_URL),
                forecast: env_or("OPEN_METEO_FORECAST_URL", DEFAULT_FORECAST_URL),
                flood: env_or("OPEN_METEO_FLOOD_URL", DEFAULT_FLOOD_URL),
                agro: env_or("OPEN_METEO_AGRO_URL", DEFAULT_AGRO_URL),
                air_quality: env_or("OPEN_METEO_AIR_QUALITY_URL", DEFAULT_AIR_QUALITY_URL),
            },
        }
    }

    pub fn climate_years(&self) -> RangeInclusive<i32> {
        self.climate_start_year..=self.climate_end_year
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        // set_var/remove_var race with other threads reading the environment;
        // no other test in this binary touches these variables.
        unsafe {
            for name in [
                "PORT",
                "HTTP_USER_AGENT",
                "FETCH_TIMEOUT_SECS",
                "CLIMATE_START_YEAR",
                "CLIMATE_END_YEAR",
                "CROP_TABLE_PATH",
                "NASA_POWER_URL",
                "OPEN_METEO_FLOOD_URL",
            ] {
                std::env::remove_var(name);
            }
        }

        let config = AppConfig::from_env();

        assert_eq!(config.port, 8080);
        assert!(config.user_agent.starts_with("AgroScore/"));
        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
        assert_eq!(config.climate_years(), 2023..=2025);
        assert!(config.crop_table_path.is_none());
        assert_eq!(config.nasa_power_url, DEFAULT_NASA_POWER_URL);
        assert_eq!(config.open_meteo.flood, DEFAULT_FLOOD_URL);
    }
}
