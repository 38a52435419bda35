// Configuration lue depuis l'environnement (.env chargé dans main)

use std::env;
use std::net::IpAddr;
use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const INSECURE_JWT_SECRET: &str = "default-insecure-key-change-this";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set in .env file")]
    Missing(&'static str),
    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub host: IpAddr,
    pub port: u16,
    pub db_max_connections: Option<u32>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Variante testable: `lookup` remplace `env::var`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let jwt_secret = match lookup("JWT_SECRET").filter(|v| !v.is_empty()) {
            Some(secret) => secret,
            None => {
                tracing::warn!("JWT_SECRET not found in .env, using default (INSECURE)");
                INSECURE_JWT_SECRET.to_string()
            }
        };

        let host = match lookup("HOST") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::Invalid { key: "HOST", value })?,
            None => DEFAULT_HOST.parse().map_err(|_| ConfigError::Invalid {
                key: "HOST",
                value: DEFAULT_HOST.to_string(),
            })?,
        };

        let port = match lookup("PORT") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::Invalid { key: "PORT", value })?,
            None => DEFAULT_PORT,
        };

        let db_max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(value) => Some(value.parse().map_err(|_| ConfigError::Invalid {
                key: "DB_MAX_CONNECTIONS",
                value,
            })?),
            None => None,
        };

        Ok(AppConfig {
            database_url,
            jwt_secret,
            host,
            port,
            db_max_connections,
        })
    }
}

#[cfg(test)]
pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "postgres://localhost/test".to_string(),
        jwt_secret: "test-secret".to_string(),
        host: DEFAULT_HOST.parse().unwrap(),
        port: DEFAULT_PORT,
        db_max_connections: None,
    }
}
