//! Router wiring for the forecast API.

use std::sync::Arc;

use axum::{Router, routing::get};
use cwa_weather_core::ForecastService;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error, handlers};

/// Shared state for HTTP handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub service: Arc<ForecastService>,
}

pub fn create_router(service: Arc<ForecastService>) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/", get(handlers::root))
        .route("/api/health", get(handlers::health))
        .route("/api/weather", get(handlers::weather))
        // registered after the routes: applies to every method router above
        .method_not_allowed_fallback(handlers::not_found)
        .fallback(handlers::not_found)
        .with_state(AppState { service })
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
