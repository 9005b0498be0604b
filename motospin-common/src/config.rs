//! Configuration loading and resolution
//!
//! Settings resolve through a priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file (`~/.config/motospin/config.toml`)
//! 4. Compiled default (fallback)
//!
//! The provider credential is special: it is re-resolved on every request so
//! a key exported after startup is picked up without a restart, and its
//! absence is a configuration error rather than a retryable condition.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::warn;

/// Environment variable holding the data provider credential.
pub const API_KEY_ENV: &str = "MOTOSPIN_API_KEY";

/// Default base URL of the external motorcycle data provider.
pub const DEFAULT_PROVIDER_URL: &str = "https://api.api-ninjas.com/v1/motorcycles";

/// Default listen address for the web service.
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:5780";

/// Optional settings read from the TOML config file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub provider_url: Option<String>,
    pub api_key: Option<String>,
    pub identity_url: Option<String>,
    pub database_path: Option<String>,
    pub bind_address: Option<String>,
}

/// Fully resolved service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the motorcycle data provider
    pub provider_url: String,
    /// Provider credential override; when `None` the environment variable is
    /// consulted per request
    pub api_key: Option<String>,
    /// Base URL of the identity service, if configured
    pub identity_url: Option<String>,
    /// Path of the favorites database file
    pub database_path: PathBuf,
    /// Listen address for the HTTP server
    pub bind_address: String,
}

/// Command-line overrides, passed in by the binary's argument parser.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub provider_url: Option<String>,
    pub api_key: Option<String>,
    pub identity_url: Option<String>,
    pub database_path: Option<String>,
    pub bind_address: Option<String>,
}

impl Config {
    /// Resolve the full configuration from CLI overrides, environment,
    /// TOML file, and defaults, in that order.
    pub fn resolve(cli: CliOverrides) -> Result<Self> {
        let toml_config = load_toml_config().unwrap_or_default();

        let provider_url = cli
            .provider_url
            .or_else(|| env_value("MOTOSPIN_PROVIDER_URL"))
            .or(toml_config.provider_url)
            .unwrap_or_else(|| DEFAULT_PROVIDER_URL.to_string());

        let api_key = cli
            .api_key
            .or(toml_config.api_key)
            .filter(|k| !k.trim().is_empty());

        let identity_url = cli
            .identity_url
            .or_else(|| env_value("MOTOSPIN_IDENTITY_URL"))
            .or(toml_config.identity_url);

        let database_path = cli
            .database_path
            .or_else(|| env_value("MOTOSPIN_DATABASE"))
            .or(toml_config.database_path)
            .map(PathBuf::from)
            .unwrap_or_else(default_database_path);

        let bind_address = cli
            .bind_address
            .or_else(|| env_value("MOTOSPIN_BIND"))
            .or(toml_config.bind_address)
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        Ok(Self {
            provider_url,
            api_key,
            identity_url,
            database_path,
            bind_address,
        })
    }

    /// Resolve the provider credential for one request.
    ///
    /// A configured override wins; otherwise the process environment is read
    /// at request time. Absence is a [`Error::Config`].
    pub fn resolve_api_key(&self) -> Result<String> {
        if let Some(key) = &self.api_key {
            return Ok(key.clone());
        }
        match env_value(API_KEY_ENV) {
            Some(key) => Ok(key),
            None => Err(Error::Config(format!(
                "API key not configured. Set the {} environment variable, \
                 pass --api-key, or add api_key to the config file.",
                API_KEY_ENV
            ))),
        }
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Read the TOML config file if one exists.
fn load_toml_config() -> Option<TomlConfig> {
    let path = dirs::config_dir()?.join("motospin").join("config.toml");
    if !path.exists() {
        return None;
    }
    let content = std::fs::read_to_string(&path).ok()?;
    match toml::from_str::<TomlConfig>(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("Ignoring malformed config file {}: {}", path.display(), e);
            None
        }
    }
}

/// OS-dependent default location of the favorites database.
fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("motospin"))
        .unwrap_or_else(|| PathBuf::from("./motospin_data"))
        .join("motospin.db")
}
