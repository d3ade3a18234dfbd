//! Failure kinds of a forecast lookup and their HTTP mapping.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("missing required query parameter 'location'")]
    BadRequest,

    #[error("{} is not configured", crate::config::ENV_API_KEY)]
    ServerMisconfigured,

    #[error("no forecast found for location '{0}'")]
    NotFound(String),

    #[error("upstream API responded with status {status}")]
    Upstream { status: StatusCode, body: String },

    #[error("failed to reach upstream API: {0}")]
    Network(#[source] reqwest::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ForecastError {
    /// HTTP status to answer the client with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream { status, .. } => *status,
            Self::ServerMisconfigured | Self::Network(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Short value for the `error` field of the JSON body.
    pub fn label(&self) -> &'static str {
        match self {
            Self::BadRequest => "Bad Request",
            Self::ServerMisconfigured => "Server Misconfigured",
            Self::NotFound(_) => "Not Found",
            Self::Upstream { .. } => "Upstream API Error",
            Self::Network(_) => "Network Error",
            Self::Internal(_) => "Internal Server Error",
        }
    }

    /// Client-safe message; never carries source chains.
    pub fn user_message(&self) -> String {
        match self {
            Self::BadRequest => "Query parameter 'location' is required, e.g. ?location=臺北市".to_string(),
            Self::ServerMisconfigured => {
                "Server is missing its forecast API key; contact the operator".to_string()
            }
            Self::NotFound(location) => format!("No forecast data found for location '{location}'"),
            Self::Upstream { status, .. } => {
                format!("Forecast provider returned an error ({})", status.as_u16())
            }
            Self::Network(_) => "Unable to reach the forecast provider".to_string(),
            Self::Internal(_) => "An unexpected error occurred".to_string(),
        }
    }

    /// Errors worth an `error!` line server-side, as opposed to client mistakes.
    pub fn is_server_fault(&self) -> bool {
        matches!(self, Self::ServerMisconfigured | Self::Network(_) | Self::Internal(_))
    }
}

impl From<serde_json::Error> for ForecastError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("unexpected upstream payload: {err}"))
    }
}
