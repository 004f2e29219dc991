pub mod advisory;
pub mod aggregate;
pub mod crops;
pub mod hazards;
pub mod normalize;
pub mod open_meteo;
pub mod power;
pub mod ranking;
pub mod reference;

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// Build the HTTP client shared by every provider.
pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<reqwest::Client, AppError> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
        .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))
}

/// GET `url` with `query` and decode the body as JSON.
///
/// Transport failures, non-2xx statuses and undecodable bodies all map to
/// `ExternalServiceError` tagged with `provider`.
pub(crate) async fn get_json(
    client: &reqwest::Client,
    provider: &str,
    url: &str,
    query: &[(&str, String)],
) -> Result<serde_json::Value, AppError> {
    let response = client
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|e| {
            AppError::ExternalServiceError(format!("{} request failed: {}", provider, e))
        })?;

    if !response.status().is_success() {
        return Err(AppError::ExternalServiceError(format!(
            "{} returned HTTP {}",
            provider,
            response.status()
        )));
    }

    response
        .json()
        .await
        .map_err(|e| {
            AppError::ExternalServiceError(format!("{} JSON parse error: {}", provider, e))
        })
}

/// Decode a provider body into its typed response struct.
pub(crate) fn decode<T: DeserializeOwned>(
    provider: &str,
    json: &serde_json::Value,
) -> Result<T, AppError> {
    serde_json::from_value(json.clone()).map_err(|e| {
        AppError::ExternalServiceError(format!("{} response structure error: {}", provider, e))
    })
}
