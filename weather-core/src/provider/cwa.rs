use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::ForecastError;

use super::ForecastSource;

/// Client for the CWA 36-hour forecast dataset.
#[derive(Debug, Clone)]
pub struct CwaClient {
    url: String,
    http: Client,
}

impl CwaClient {
    /// `url` is the full dataset endpoint, see [`crate::Config::forecast_url`].
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ForecastError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ForecastError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { url: url.into(), http })
    }
}

#[async_trait]
impl ForecastSource for CwaClient {
    #[instrument(skip(self, api_key), level = "info")]
    async fn fetch_forecast(
        &self,
        api_key: &str,
        location: &str,
    ) -> Result<CwaResponse, ForecastError> {
        let res = self
            .http
            .get(&self.url)
            .query(&[("Authorization", api_key), ("locationName", location)])
            .send()
            .await
            .map_err(network_error)?;

        let status = res.status();

        if !status.is_success() {
            // an unreadable error body is forwarded empty
            let body = res.text().await.unwrap_or_else(|e| {
                warn!(%status, error = %e.without_url(), "failed to read CWA error body");
                String::new()
            });
            warn!(%status, body = %truncate_body(&body), "CWA request failed");
            return Err(ForecastError::Upstream { status, body });
        }

        let body = res.text().await.map_err(network_error)?;

        let parsed: CwaResponse = serde_json::from_str(&body)?;
        debug!(locations = parsed.records.location.len(), "CWA response parsed");

        Ok(parsed)
    }
}

/// The request URL carries the API key, so it never travels with the error.
fn network_error(err: reqwest::Error) -> ForecastError {
    ForecastError::Network(err.without_url())
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

// Upstream payload. Only the fields the transformer reads are modelled;
// everything else in the CWA envelope is ignored.

#[derive(Debug, Deserialize)]
pub struct CwaResponse {
    pub records: CwaRecords,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CwaRecords {
    #[serde(default)]
    pub dataset_description: String,
    #[serde(default)]
    pub location: Vec<CwaLocation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CwaLocation {
    pub location_name: String,
    #[serde(default)]
    pub weather_element: Vec<CwaWeatherElement>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CwaWeatherElement {
    pub element_name: String,
    #[serde(default)]
    pub time: Vec<CwaTimeSlot>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CwaTimeSlot {
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub parameter: CwaParameter,
}

/// Parameter of one time slot. The label (`parameterName`) carries the
/// reading for every element of the 36-hour dataset; value and unit are
/// not read.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CwaParameter {
    #[serde(default)]
    pub parameter_name: String,
}
