//! Reshapes the CWA element/time-series payload into per-period records.

use crate::{
    ForecastError,
    model::{ForecastPeriod, WeatherResult},
    provider::cwa::{CwaLocation, CwaResponse},
};

/// Weather element codes of the forecast dataset that map onto a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementCode {
    /// Weather condition.
    Wx,
    /// Probability of precipitation.
    PoP,
    MinT,
    MaxT,
    /// Comfort index.
    CI,
    /// Wind speed; not published in the 36-hour dataset.
    WS,
}

impl ElementCode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Wx" => Some(Self::Wx),
            "PoP" => Some(Self::PoP),
            "MinT" => Some(Self::MinT),
            "MaxT" => Some(Self::MaxT),
            "CI" => Some(Self::CI),
            "WS" => Some(Self::WS),
            _ => None,
        }
    }

    /// The period field this element writes into.
    pub fn field_mut(self, period: &mut ForecastPeriod) -> &mut String {
        match self {
            Self::Wx => &mut period.weather,
            Self::PoP => &mut period.rain,
            Self::MinT => &mut period.min_temp,
            Self::MaxT => &mut period.max_temp,
            Self::CI => &mut period.comfort,
            Self::WS => &mut period.wind_speed,
        }
    }
}

/// Build the client result for `query` out of an upstream response.
///
/// Only the first location record is used. An empty location list means the
/// provider does not know `query`.
pub fn build_weather_result(
    query: &str,
    response: CwaResponse,
) -> Result<WeatherResult, ForecastError> {
    let records = response.records;
    let location = records
        .location
        .into_iter()
        .next()
        .ok_or_else(|| ForecastError::NotFound(query.to_string()))?;

    Ok(WeatherResult {
        forecasts: periods(&location),
        city: location.location_name,
        update_time: records.dataset_description,
    })
}

/// One period per time slot of the first element; all elements are assumed
/// to share its time axis.
pub fn periods(location: &CwaLocation) -> Vec<ForecastPeriod> {
    let Some(axis) = location.weather_element.first() else {
        return Vec::new();
    };

    axis.time
        .iter()
        .enumerate()
        .map(|(i, slot)| {
            let mut period = ForecastPeriod::new(&slot.start_time, &slot.end_time);

            for element in &location.weather_element {
                let Some(code) = ElementCode::from_name(&element.element_name) else {
                    continue;
                };
                // ragged series: shorter elements leave the field empty
                if let Some(slot) = element.time.get(i) {
                    *code.field_mut(&mut period) = slot.parameter.parameter_name.clone();
                }
            }

            period
        })
        .collect()
}
