use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

/// Base URL of the CWA open-data datastore.
pub const DEFAULT_API_BASE_URL: &str = "https://opendata.cwa.gov.tw/api/v1/rest/datastore";
/// Dataset id of the 36-hour city-level forecast.
pub const FORECAST_DATASET: &str = "F-C0032-001";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const ENV_API_KEY: &str = "CWA_API_KEY";
pub const ENV_PORT: &str = "PORT";
pub const ENV_API_BASE_URL: &str = "CWA_API_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "CWA_TIMEOUT_SECS";

/// Process-wide configuration, built once at startup.
///
/// Example TOML:
/// ```toml
/// api_key = "CWA-XXXXXXXX"
/// port = 8080
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,

    /// Missing key is reported per request, not at startup.
    pub api_key: Option<String>,

    pub port: u16,

    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_key: None,
            port: DEFAULT_PORT,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Config file, then process environment on top.
    pub fn from_env() -> Result<Self> {
        Self::load()?.with_env(|name| std::env::var(name).ok())
    }

    /// Overlay environment values onto `self`.
    ///
    /// `lookup` resolves a variable name to its value; it is a parameter so
    /// callers (and tests) decide where the environment comes from.
    pub fn with_env<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ENV_API_KEY) {
            self.api_key = Some(key);
        }

        if let Some(url) = lookup(ENV_API_BASE_URL).filter(|u| !u.trim().is_empty()) {
            self.api_base_url = url;
        }

        if let Some(port) = lookup(ENV_PORT).filter(|p| !p.trim().is_empty()) {
            self.port = port
                .trim()
                .parse()
                .with_context(|| format!("{ENV_PORT} must be a valid port number, got '{port}'"))?;
        }

        if let Some(secs) = lookup(ENV_TIMEOUT_SECS).filter(|s| !s.trim().is_empty()) {
            self.request_timeout_secs = secs.trim().parse().with_context(|| {
                format!("{ENV_TIMEOUT_SECS} must be a whole number of seconds, got '{secs}'")
            })?;
        }

        self.validate()?;
        Ok(self)
    }

    /// Reject values that would leave the service unable to answer.
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            return Err(anyhow!("request timeout must be at least 1 second"));
        }
        Ok(())
    }

    /// The API key, if one is set and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key().is_some()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Full URL of the forecast dataset endpoint.
    pub fn forecast_url(&self) -> String {
        format!("{}/{}", self.api_base_url.trim_end_matches('/'), FORECAST_DATASET)
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// Load config from disk, or return the defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(path)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("tw", "cwa-weather", "cwa-weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
