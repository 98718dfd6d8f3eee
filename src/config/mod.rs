//! Application configuration module
//!
//! Configuration is loaded from environment variables using the `config` and
//! `dotenvy` crates. Every value has a default, so an empty environment yields
//! a working configuration pointed at `http://localhost:8000`.
//!
//! # Example
//!
//! ```no_run
//! use review_dashboard::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Review API at {}", config.api.base_url);
//! ```

mod api;
mod dashboard;
mod error;

pub use api::ApiConfig;
pub use dashboard::DashboardConfig;
pub use error::{ConfigError, ValidationError};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Review API connection
    #[serde(default)]
    pub api: ApiConfig,

    /// Dashboard timers and paging
    #[serde(default)]
    pub dashboard: DashboardConfig,

    /// Rust log filter directive, used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            dashboard: DashboardConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `REVIEW_DASHBOARD` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `REVIEW_DASHBOARD__API__BASE_URL=...` -> `api.base_url = ...`
    /// - `REVIEW_DASHBOARD__DASHBOARD__POLL_INTERVAL_SECS=10` -> `dashboard.poll_interval_secs = 10`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("REVIEW_DASHBOARD")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.api.validate()?;
        self.dashboard.validate()?;
        Ok(())
    }
}

fn default_log_level() -> String {
    "info,review_dashboard=debug".to_string()
}
