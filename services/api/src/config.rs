//! Service configuration
//!
//! Values come from the process environment (after `.env` is loaded) with
//! the defaults below. Database settings live in
//! [`common::database::DatabaseConfig`].

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// HTTP service settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Listen port
    pub port: u16,
    /// Deployment environment; `development` exposes panic details
    pub app_env: String,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
    /// Comma separated list of allowed CORS origins
    pub cors_origins: String,
    pub body_limit_bytes: usize,
    /// Apply pending migrations at startup
    pub run_migrations: bool,
}

impl AppConfig {
    /// Load the configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("port", 3001_i64)?
            .set_default("app_env", "development")?
            .set_default("bcrypt_cost", 10_i64)?
            .set_default("cors_origins", "http://localhost:5173,http://localhost:3000")?
            .set_default("body_limit_bytes", 10 * 1024 * 1024_i64)?
            .set_default("run_migrations", true)?
            .add_source(Environment::default().try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn is_development(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("development")
    }

    /// Allowed CORS origins, trimmed and without empty entries
    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }
}
