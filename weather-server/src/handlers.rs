use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::{Method, StatusCode, Uri},
    response::Response,
};
use chrono::{SecondsFormat, Utc};
use cwa_weather_core::WeatherResult;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

use crate::{
    error::{ApiError, ErrorBody},
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub location: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WeatherResponse {
    pub success: bool,
    pub data: WeatherResult,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

/// GET / - service descriptor
pub async fn root() -> Json<Value> {
    Json(json!({
        "name": "CWA weather forecast API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "GET /api/health",
            "weather": "GET /api/weather?location=<locationName>"
        }
    }))
}

/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

/// GET /api/weather?location=<name>
pub async fn weather(
    State(state): State<AppState>,
    query: Result<Query<WeatherQuery>, QueryRejection>,
) -> Result<Json<WeatherResponse>, ApiError> {
    let location = match query {
        Ok(Query(q)) => q.location,
        Err(rejection) => {
            debug!(%rejection, "unreadable query string");
            None
        }
    };

    let data = state.service.lookup(location.as_deref()).await?;

    Ok(Json(WeatherResponse { success: true, data }))
}

/// Fallback for unmatched routes.
pub async fn not_found(method: Method, uri: Uri) -> Response {
    ErrorBody::new("Not Found", format!("Route {method} {} not found", uri.path()))
        .with_status(StatusCode::NOT_FOUND)
}
