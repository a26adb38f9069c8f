//! Runtime settings for the HTTP service.
//!
//! Settings come from `API_`-prefixed environment variables; anything not set
//! falls back to a development default. The binary loads `.env` before this
//! runs, so local overrides live there.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Interface to bind the listener on.
    pub host: String,
    pub port: u16,
    /// Signing key for issued tokens. The default is only fit for local runs.
    pub jwt_secret: String,
    /// Token lifetime in seconds.
    pub jwt_expiration_secs: u64,
    /// PostgreSQL connection string, also used to run migrations on startup.
    pub database_url: String,
    /// Tracing filter directive, e.g. `info` or `storefront=debug`.
    pub log_level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_secs: 3600,
            database_url: "postgres://localhost/storefront".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl ApiConfig {
    /// Reads the full configuration from `API_*` environment variables.
    ///
    /// Fails when a required variable is missing or does not parse; the
    /// binary's loader supplies per-field defaults before calling this.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Bind address in `host:port` form.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
