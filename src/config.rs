use serde::{Deserialize, Serialize};

use std::{env, fs, path::Path};

const DEFAULT_HTTP_HOST: &str = "0.0.0.0";
const DEFAULT_HTTP_PORT: u16 = 8000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub database_dsn: String,
    #[serde(default = "default_http_host")]
    pub http_host: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },

    #[error("{0} environment variable is required")]
    MissingVar(&'static str),

    #[error("Failed to parse {name}: {value:?} is not a valid port")]
    InvalidPort { name: &'static str, value: String },
}

impl Config {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}

fn default_http_host() -> String {
    DEFAULT_HTTP_HOST.to_string()
}

const fn default_http_port() -> u16 {
    DEFAULT_HTTP_PORT
}

fn read_config_file(path: &str) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_string(),
        source,
    })?;

    serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_string(),
        source,
    })
}

/// Builds a config from variables provided by `lookup`.
fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
    let database_dsn = lookup("PG_DSN").ok_or(ConfigError::MissingVar("PG_DSN"))?;

    let http_host = lookup("HTTP_HOST").unwrap_or_else(default_http_host);

    let http_port = match lookup("HTTP_PORT") {
        Some(value) => value
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort {
                name: "HTTP_PORT",
                value,
            })?,
        None => DEFAULT_HTTP_PORT,
    };

    Ok(Config {
        database_dsn,
        http_host,
        http_port,
    })
}

/// Loads the server configuration.
///
/// Tries the file named by `KEEPNOTE_CONFIG`, then `config.yaml`, then
/// `config.example.yaml`, and finally the `PG_DSN`, `HTTP_HOST` and
/// `HTTP_PORT` environment variables.
pub fn load_config() -> Result<Config, ConfigError> {
    // Retrieve env variable
    let config_path = env::var("KEEPNOTE_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());

    // Try env path
    if Path::new(&config_path).exists() {
        return read_config_file(&config_path);
    }

    // Fallback to config.yaml
    if Path::new("config.yaml").exists() {
        tracing::warn!(
            "Config file '{}' not found, falling back to 'config.yaml'",
            config_path
        );
        return read_config_file("config.yaml");
    }

    // Fallback to config.example.yaml
    if Path::new("config.example.yaml").exists() {
        tracing::warn!(
            "Config file '{}' and 'config.yaml' not found, falling back to 'config.example.yaml'\
             \n This file should not be used and should be replaced with actual data",
            config_path
        );
        return read_config_file("config.example.yaml");
    }

    // Fallback to environment variables
    tracing::info!(
        "No config file found, attempting to load configuration from environment variables"
    );
    from_vars(|name| env::var(name).ok())
}
