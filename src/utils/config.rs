use dotenv::dotenv;
use std::env;
use thiserror::Error;

pub const DEFAULT_DATABASE_NAME: &str = "furrycare";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_SERVICE_NAME: &str = "FurryCare API";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub database_url: String,
    pub database_name: String,
    pub host: String,
    pub port: u16,
    pub service_name: String,
    pub production: bool,
}

impl AppConfig {

    /// Reads the configuration from the process environment, loading a
    /// `.env` file first when one is present.
    pub fn load() -> Result<AppConfig, ConfigError> {
        dotenv().ok();
        Self::from_env()
    }

    pub fn from_env() -> Result<AppConfig, ConfigError> {
        let database_url = env::var("MONGODB_URI")
            .map_err(|_| ConfigError::Missing("MONGODB_URI"))?;

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { name: "PORT", value: raw })?,
            Err(_) => DEFAULT_PORT,
        };

        let production = env::var("APP_ENV")
            .map(|value| value.trim().eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        Ok(AppConfig {
            database_url,
            database_name: env_or("DATABASE_NAME", DEFAULT_DATABASE_NAME),
            host: env_or("HOST", DEFAULT_HOST),
            port,
            service_name: env_or("SERVICE_NAME", DEFAULT_SERVICE_NAME),
            production,
        })
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
