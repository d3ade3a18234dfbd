use serde::{Deserialize, Serialize};

/// One forecast time slot, flattened across all weather elements.
///
/// Every measurement is the provider's string as-is; a field stays empty
/// when the dataset has no element for it (wind speed in the 36-hour data).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPeriod {
    pub start_time: String,
    pub end_time: String,
    pub weather: String,
    /// Probability of precipitation, without the percent sign.
    pub rain: String,
    pub min_temp: String,
    pub max_temp: String,
    pub comfort: String,
    pub wind_speed: String,
}

impl ForecastPeriod {
    pub fn new(start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        Self { start_time: start_time.into(), end_time: end_time.into(), ..Self::default() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherResult {
    pub city: String,
    pub update_time: String,
    /// Upstream time-slot order.
    pub forecasts: Vec<ForecastPeriod>,
}
