//! Environment driven settings for the API and web binaries.
//!
//! Binaries call `dotenvy::dotenv()` before reading these so a local `.env`
//! file can provide the values during development.

use std::env;

pub const DEFAULT_ADDRESS: &str = "127.0.0.1";
pub const DEFAULT_API_PORT: u16 = 8080;
pub const DEFAULT_WEB_PORT: u16 = 8082;
pub const DEFAULT_DATABASE_URL: &str = "app.db";
pub const DEFAULT_GATEWAY_URL: &str = "http://127.0.0.1:8081";

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn port_or(default: u16) -> u16 {
    env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(default)
}

/// Settings of the API service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// Apply pending migrations at start-up.
    pub run_migrations: bool,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let run_migrations = env::var("RUN_MIGRATIONS")
            .map(|value| !matches!(value.trim().to_lowercase().as_str(), "false" | "0" | "no"))
            .unwrap_or(true);

        Self {
            address: var_or("ADDRESS", DEFAULT_ADDRESS),
            port: port_or(DEFAULT_API_PORT),
            database_url: var_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            run_migrations,
        }
    }
}

/// Settings of the server-rendered front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebConfig {
    pub address: String,
    pub port: u16,
    /// Base URL of the gateway all page data is fetched through.
    pub gateway_url: String,
    /// Key material for the flash message cookie; a random key is used when
    /// unset.
    pub secret_key: Option<String>,
}

impl WebConfig {
    pub fn from_env() -> Self {
        Self {
            address: var_or("ADDRESS", DEFAULT_ADDRESS),
            port: port_or(DEFAULT_WEB_PORT),
            gateway_url: var_or("GATEWAY_URL", DEFAULT_GATEWAY_URL),
            secret_key: env::var("SECRET_KEY").ok().filter(|key| !key.is_empty()),
        }
    }
}
