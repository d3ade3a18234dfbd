use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    Config, ForecastError, forecast,
    model::WeatherResult,
    provider::{ForecastSource, source_from_config},
};

/// Lookup pipeline for one request: validate, fetch, transform.
#[derive(Debug, Clone)]
pub struct ForecastService {
    config: Arc<Config>,
    source: Arc<dyn ForecastSource>,
}

impl ForecastService {
    pub fn new(config: Config, source: Arc<dyn ForecastSource>) -> Self {
        Self { config: Arc::new(config), source }
    }

    /// Service backed by the real CWA client.
    pub fn from_config(config: Config) -> Result<Self, ForecastError> {
        let source = source_from_config(&config)?;
        Ok(Self::new(config, source))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Forecast for `location`, as sent by the client (possibly absent).
    pub async fn lookup(&self, location: Option<&str>) -> Result<WeatherResult, ForecastError> {
        let location = location
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .ok_or(ForecastError::BadRequest)?;

        let api_key = self.config.api_key().ok_or(ForecastError::ServerMisconfigured)?;

        let response = self.source.fetch_forecast(api_key, location).await?;
        debug!(location, "upstream forecast received");

        let result = forecast::build_weather_result(location, response)?;
        info!(city = %result.city, periods = result.forecasts.len(), "forecast served");

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::cwa::CwaResponse;
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use serde_json::json;
    use std::sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    /// Canned upstream that records what it was asked.
    #[derive(Debug, Default)]
    struct FakeSource {
        calls: AtomicUsize,
        last_query: Mutex<Option<(String, String)>>,
        fail_with: Option<StatusCode>,
    }

    #[async_trait]
    impl ForecastSource for FakeSource {
        async fn fetch_forecast(
            &self,
            api_key: &str,
            location: &str,
        ) -> Result<CwaResponse, ForecastError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_query.lock().unwrap() = Some((api_key.to_string(), location.to_string()));

            if let Some(status) = self.fail_with {
                return Err(ForecastError::Upstream { status, body: "{}".into() });
            }

            let locations = if location == "臺北市" {
                json!([{
                    "locationName": "臺北市",
                    "weatherElement": [{
                        "elementName": "Wx",
                        "time": [{
                            "startTime": "2026-10-14 18:00:00",
                            "endTime": "2026-10-15 06:00:00",
                            "parameter": { "parameterName": "多雲" }
                        }]
                    }]
                }])
            } else {
                json!([])
            };

            Ok(serde_json::from_value(json!({
                "records": { "datasetDescription": "三十六小時天氣預報", "location": locations }
            }))
            .unwrap())
        }
    }

    fn keyed_config() -> Config {
        let mut cfg = Config::default();
        cfg.set_api_key("TEST-KEY".into());
        cfg
    }

    fn service(config: Config, source: &Arc<FakeSource>) -> ForecastService {
        ForecastService::new(config, source.clone())
    }

    #[tokio::test]
    async fn missing_location_is_rejected_before_fetch() {
        let source = Arc::new(FakeSource::default());
        let svc = service(keyed_config(), &source);

        for location in [None, Some(""), Some("   ")] {
            let err = svc.lookup(location).await.unwrap_err();
            assert!(matches!(err, ForecastError::BadRequest));
        }
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_api_key_never_calls_upstream() {
        let source = Arc::new(FakeSource::default());
        let svc = service(Config::default(), &source);

        let err = svc.lookup(Some("臺北市")).await.unwrap_err();
        assert!(matches!(err, ForecastError::ServerMisconfigured));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn bad_request_wins_over_missing_key() {
        let source = Arc::new(FakeSource::default());
        let svc = service(Config::default(), &source);

        let err = svc.lookup(None).await.unwrap_err();
        assert!(matches!(err, ForecastError::BadRequest));
    }

    #[tokio::test]
    async fn forwards_key_and_trimmed_location() {
        let source = Arc::new(FakeSource::default());
        let svc = service(keyed_config(), &source);

        let result = svc.lookup(Some(" 臺北市 ")).await.unwrap();
        assert_eq!(result.city, "臺北市");
        assert_eq!(result.forecasts.len(), 1);

        let query = source.last_query.lock().unwrap().clone();
        assert_eq!(query, Some(("TEST-KEY".to_string(), "臺北市".to_string())));
    }

    #[tokio::test]
    async fn unknown_location_is_not_found() {
        let source = Arc::new(FakeSource::default());
        let svc = service(keyed_config(), &source);

        let err = svc.lookup(Some("火星市")).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert!(err.user_message().contains("火星市"));
    }

    #[tokio::test]
    async fn upstream_error_passes_through() {
        let source = Arc::new(FakeSource {
            fail_with: Some(StatusCode::FORBIDDEN),
            ..FakeSource::default()
        });
        let svc = service(keyed_config(), &source);

        let err = svc.lookup(Some("臺北市")).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn repeated_lookups_are_identical() {
        let source = Arc::new(FakeSource::default());
        let svc = service(keyed_config(), &source);

        let first = svc.lookup(Some("臺北市")).await.unwrap();
        let second = svc.lookup(Some("臺北市")).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }
}
