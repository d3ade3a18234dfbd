//! Core library for the CWA forecast proxy.
//!
//! This crate defines:
//! - Configuration (defaults, config file, environment)
//! - The upstream client for the CWA 36-hour forecast dataset
//! - Reshaping of the provider payload into flat forecast periods
//! - The per-request lookup pipeline and its error taxonomy
//!
//! It is used by `cwa-weather-server`, but holds no HTTP server types.

pub mod config;
pub mod error;
pub mod forecast;
pub mod model;
pub mod provider;
pub mod service;

pub use config::Config;
pub use error::ForecastError;
pub use model::{ForecastPeriod, WeatherResult};
pub use provider::{ForecastSource, cwa::CwaClient};
pub use service::ForecastService;
