//! NASA POWER monthly point client.
//!
//! Fetches monthly precipitation (`PRECTOTCORR`), mean temperature (`T2M`)
//! and root-zone wetness (`GWETROOT`, or `GWETPROF` when absent) for a
//! location. See: https://power.larc.nasa.gov/docs/services/api/temporal/monthly/

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use serde::Deserialize;

use crate::errors::AppError;
use crate::helpers::Reading;
use crate::services::aggregate::{ClimateSeries, MonthlySeries};
use crate::services::{decode, get_json};

const PROVIDER: &str = "NASA POWER";
const PARAMETERS: &str = "PRECTOTCORR,T2M,GWETROOT";

/// Client for the NASA POWER monthly point API.
#[derive(Debug, Clone)]
pub struct PowerClient {
    client: reqwest::Client,
    url: String,
}

impl PowerClient {
    pub fn new(client: reqwest::Client, url: &str) -> Self {
        Self {
            client,
            url: url.to_string(),
        }
    }

    /// Fetch the monthly series for `years` at a point.
    pub async fn fetch_monthly(
        &self,
        lat: f64,
        lon: f64,
        years: &RangeInclusive<i32>,
    ) -> Result<ClimateSeries, AppError> {
        let query = [
            ("start", years.start().to_string()),
            ("end", years.end().to_string()),
            ("latitude", lat.to_string()),
            ("longitude", lon.to_string()),
            ("community", "AG".to_string()),
            ("parameters", PARAMETERS.to_string()),
            ("format", "JSON".to_string()),
        ];
        let json = get_json(&self.client, PROVIDER, &self.url, &query).await?;
        parse_power_response(&json)
    }
}

// POWER response structures (only the fields we read)
#[derive(Debug, Deserialize)]
struct PowerResponse {
    properties: PowerProperties,
}

#[derive(Debug, Deserialize)]
struct PowerProperties {
    parameter: PowerParameters,
}

type PeriodReadings = BTreeMap<String, Reading>;

#[derive(Debug, Deserialize)]
struct PowerParameters {
    #[serde(rename = "PRECTOTCORR")]
    precipitation: Option<PeriodReadings>,
    #[serde(rename = "T2M")]
    temperature: Option<PeriodReadings>,
    #[serde(rename = "GWETROOT")]
    root_moisture: Option<PeriodReadings>,
    #[serde(rename = "GWETPROF")]
    profile_moisture: Option<PeriodReadings>,
}

fn monthly_series(readings: Option<PeriodReadings>) -> Option<MonthlySeries> {
    readings.map(|entries| {
        entries
            .into_iter()
            .filter_map(|(period, Reading(value))| value.map(|v| (period, v)))
            .collect()
    })
}

/// Extract the three climate series from a POWER response body.
///
/// A missing `properties.parameter` object is a provider error; a missing
/// individual parameter yields an empty series.
pub fn parse_power_response(json: &serde_json::Value) -> Result<ClimateSeries, AppError> {
    let response: PowerResponse = decode(PROVIDER, json)?;
    let parameter = response.properties.parameter;

    let root_moisture = monthly_series(parameter.root_moisture)
        .or_else(|| monthly_series(parameter.profile_moisture))
        .unwrap_or_default();

    Ok(ClimateSeries {
        precipitation: monthly_series(parameter.precipitation).unwrap_or_default(),
        temperature: monthly_series(parameter.temperature).unwrap_or_default(),
        root_moisture,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_body() -> serde_json::Value {
        serde_json::json!({
            "type": "Feature",
            "properties": {
                "parameter": {
                    "PRECTOTCORR": { "202301": 40.5, "202302": 10.0, "202313": 50.5 },
                    "T2M": { "202301": 24.0, "202302": -999.0 },
                    "GWETROOT": { "202301": 0.6, "202302": null }
                }
            }
        })
    }

    #[test]
    fn test_parse_power_response() {
        let series = tokio_test::assert_ok!(parse_power_response(&sample_body()));
        assert_eq!(series.precipitation.len(), 3);
        assert_eq!(series.precipitation["202301"], 40.5);
        // The -999 fill value is kept here; the aggregator rejects it
        assert_eq!(series.temperature["202302"], -999.0);
        assert_eq!(series.root_moisture.len(), 1);
    }

    #[test]
    fn test_parse_falls_back_to_gwetprof() {
        let json = serde_json::json!({
            "properties": { "parameter": {
                "T2M": { "202401": 12.0 },
                "GWETPROF": { "202401": 0.3 }
            }}
        });
        let series = parse_power_response(&json).unwrap();
        assert_eq!(series.root_moisture["202401"], 0.3);
        assert!(series.precipitation.is_empty());
    }

    #[test]
    fn test_parse_missing_parameter_block() {
        let json = serde_json::json!({ "properties": {} });
        let err = tokio_test::assert_err!(parse_power_response(&json));
        assert!(matches!(err, AppError::ExternalServiceError(_)));
        assert!(err.to_string().contains("NASA POWER response structure error"), "{}", err);
    }

    #[test]
    fn test_parse_skips_non_numeric_entries() {
        let json = serde_json::json!({
            "properties": { "parameter": {
                "PRECTOTCORR": { "202401": "missing", "202402": 12.5 },
                "T2M": { "202401": [1, 2] }
            }}
        });
        let series = parse_power_response(&json).unwrap();
        assert_eq!(series.precipitation.len(), 1);
        assert_eq!(series.precipitation["202402"], 12.5);
        assert!(series.temperature.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_monthly_sends_expected_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/temporal/monthly/point"))
            .and(query_param("start", "2023"))
            .and(query_param("end", "2025"))
            .and(query_param("community", "AG"))
            .and(query_param("parameters", PARAMETERS))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = PowerClient::new(
            reqwest::Client::new(),
            &format!("{}/api/temporal/monthly/point", server.uri()),
        );
        let series = client.fetch_monthly(10.5, 76.2, &(2023..=2025)).await.unwrap();
        assert_eq!(series.temperature["202301"], 24.0);
    }

    #[tokio::test]
    async fn test_fetch_monthly_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = PowerClient::new(reqwest::Client::new(), &server.uri());
        let err = client.fetch_monthly(0.0, 0.0, &(2023..=2025)).await.unwrap_err();
        assert!(err.to_string().contains("HTTP 503"), "{}", err);
    }
}
