//! Configuration management for the Stockroom platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with STOCKROOM_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Shipping carrier API configuration
    pub carrier: CarrierConfig,

    /// Sales forecast configuration
    pub forecast: ForecastConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CarrierConfig {
    /// OAuth client id issued by the carrier
    pub api_key: String,

    /// OAuth client secret
    pub secret_key: String,

    /// Carrier account number used for rating and shipping
    pub account_number: String,

    /// API base URL (sandbox by default)
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ForecastConfig {
    /// Number of weeks to project ahead
    pub horizon_weeks: u32,

    /// Upper bound on model fitting time before the request gives up
    pub timeout_seconds: u64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("STOCKROOM_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3839)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("carrier.api_key", "")?
            .set_default("carrier.secret_key", "")?
            .set_default("carrier.account_number", "")?
            .set_default("carrier.base_url", "https://apis-sandbox.fedex.com")?
            .set_default("forecast.horizon_weeks", 52)?
            .set_default("forecast.timeout_seconds", 120)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (STOCKROOM_ prefix)
            .add_source(
                Environment::with_prefix("STOCKROOM")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
