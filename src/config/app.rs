//! Application settings.
//!
//! Settings come from an optional TOML file (`config.toml`, or the path named by
//! `APP_CONFIG`) and are then overridden by the `HOST`, `PORT` and `DATABASE_URL`
//! environment variables. Every field has a default, so running with neither a
//! file nor variables serves on `0.0.0.0:5000` against a local `SQLite` file.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::{env::VarError, path::Path};
use tracing::{debug, info};

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Default database used when neither the file nor `DATABASE_URL` names one.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/restaurants.sqlite?mode=rwc";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener settings
    pub server: ServerConfig,
    /// Persistence settings
    pub database: DatabaseConfig,
}

/// Where the HTTP server listens
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind, `0.0.0.0` for all
    pub host: String,
    /// TCP port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl ServerConfig {
    /// The `host:port` pair handed to the TCP listener.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Which database to connect to
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SeaORM` connection URL, e.g. `sqlite://data/restaurants.sqlite?mode=rwc`
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
        }
    }
}

/// Parses configuration from TOML text.
///
/// # Errors
/// Returns [`Error::Config`] if the TOML syntax is invalid or a field has the wrong type.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse configuration: {e}"),
    })
}

/// Loads configuration from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or does not parse.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;
    parse_config(&contents)
}

/// Applies `HOST`, `PORT` and `DATABASE_URL` overrides through the given lookup.
///
/// # Errors
/// Returns [`Error::Config`] if `PORT` is set but is not a valid port number.
pub fn apply_overrides<F>(mut config: AppConfig, lookup: F) -> Result<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup("HOST") {
        config.server.host = host;
    }
    if let Some(port) = lookup("PORT") {
        config.server.port = port.trim().parse().map_err(|e| Error::Config {
            message: format!("Invalid PORT {port:?}: {e}"),
        })?;
    }
    if let Some(url) = lookup("DATABASE_URL") {
        config.database.url = url;
    }
    Ok(config)
}

/// Loads the full application configuration.
///
/// A missing default `config.toml` is not an error; a missing file explicitly
/// named by `APP_CONFIG` is.
///
/// # Errors
/// Returns an error if a configuration file cannot be read or parsed,
/// `APP_CONFIG` is not valid Unicode, or an override is malformed.
pub fn load_app_configuration() -> Result<AppConfig> {
    let base = match std::env::var("APP_CONFIG") {
        Ok(path) => load_config(path)?,
        Err(VarError::NotPresent) if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            load_config(DEFAULT_CONFIG_PATH)?
        }
        Err(VarError::NotPresent) => {
            info!("No {DEFAULT_CONFIG_PATH} found, using defaults");
            AppConfig::default()
        }
        Err(e) => return Err(e.into()),
    };

    let config = apply_overrides(base, |key| std::env::var(key).ok())?;
    info!(
        bind = %config.server.bind_address(),
        database = %config.database.url,
        "Loaded application configuration"
    );
    Ok(config)
}
