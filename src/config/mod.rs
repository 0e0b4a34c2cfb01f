// Config layer - environment settings and logging setup
pub mod logging;

use std::env;

/// Application settings loaded from the environment
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub session_secret: String,
    pub bind_addr: String,
    /// Session cookies are marked Secure outside development
    pub secure_cookies: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://backoffice.db?mode=rwc".to_string());

        let session_secret =
            env::var("SESSION_SECRET").map_err(|_| ConfigError::MissingVar("SESSION_SECRET"))?;

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let secure_cookies = app_env == "production";

        Ok(Self {
            database_url,
            session_secret,
            bind_addr,
            secure_cookies,
        })
    }
}
