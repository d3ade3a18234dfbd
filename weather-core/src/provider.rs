use crate::{Config, ForecastError, provider::cwa::{CwaClient, CwaResponse}};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod cwa;

/// Upstream forecast dataset, queried by exact location name.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn fetch_forecast(
        &self,
        api_key: &str,
        location: &str,
    ) -> Result<CwaResponse, ForecastError>;
}

/// Construct the production source from config.
pub fn source_from_config(config: &Config) -> Result<Arc<dyn ForecastSource>, ForecastError> {
    let client = CwaClient::new(config.forecast_url(), config.request_timeout())?;
    Ok(Arc::new(client))
}
