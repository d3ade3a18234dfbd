//! JSON rendering of failures.

use std::any::Any;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use cwa_weather_core::ForecastError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, warn};

/// Body of every non-2xx response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self { error: error.into(), message: message.into(), details: None }
    }

    pub fn with_status(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// Handler-facing error; renders a [`ForecastError`] as JSON.
#[derive(Debug)]
pub struct ApiError(pub ForecastError);

impl From<ForecastError> for ApiError {
    fn from(err: ForecastError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = err.status_code();

        if err.is_server_fault() {
            error!(error = %err, source = ?std::error::Error::source(&err), "forecast lookup failed");
        } else {
            warn!(%status, error = %err, "forecast lookup rejected");
        }

        let mut body = ErrorBody::new(err.label(), err.user_message());
        if let ForecastError::Upstream { body: upstream, .. } = err {
            body.details =
                Some(serde_json::from_str(&upstream).unwrap_or(Value::String(upstream)));
        }

        body.with_status(status)
    }
}

/// Response for a panicking handler, installed via `CatchPanicLayer`.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown error".to_string()
    };

    error!(%message, "request handler panicked");

    ErrorBody::new("Internal Server Error", message).with_status(StatusCode::INTERNAL_SERVER_ERROR)
}
