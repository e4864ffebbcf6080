//! Service configuration from environment variables or a YAML file.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Result, ServiceError};

/// Default backing table, overridable via `TABLE_NAME`.
pub const DEFAULT_TABLE_NAME: &str = "Maldonado-CryptoBro";

/// Immutable service configuration, built once at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Listen host; empty means all interfaces.
    #[serde(default)]
    pub host: String,

    /// Listen port, kept as text to match the wire/env representation.
    pub port: String,

    /// Backing table name.
    #[serde(default = "default_table_name")]
    pub table_name: String,
}

fn default_table_name() -> String {
    DEFAULT_TABLE_NAME.to_string()
}

/// On-disk shape of the YAML configuration file.
#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(rename = "server-host", default)]
    server_host: String,
    #[serde(rename = "server-port")]
    server_port: String,
}

impl Config {
    /// Load configuration from `HOST`/`PORT`/`TABLE_NAME` environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(envy::from_env::<Config>()?)
    }

    /// Load configuration from a YAML file with `server-host`/`server-port` keys.
    ///
    /// The table name still comes from the environment so both sourcing
    /// variants share one override mechanism.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let file: FileConfig = serde_yaml::from_str(&raw)?;

        Ok(Self {
            host: file.server_host,
            port: file.server_port,
            table_name: std::env::var("TABLE_NAME").unwrap_or_else(|_| default_table_name()),
        })
    }

    /// Resolve from the file when a path is given, from the environment otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::from_env(),
        }
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.port.is_empty() {
            return Err("PORT is required".to_string());
        }

        if self.port.parse::<u16>().is_err() {
            return Err(format!("PORT must be a valid port number, got {:?}", self.port));
        }

        if self.table_name.is_empty() {
            return Err("TABLE_NAME must not be empty".to_string());
        }

        Ok(())
    }

    /// Bind address; an empty host binds all interfaces.
    pub fn addr(&self) -> String {
        let host = if self.host.is_empty() { "0.0.0.0" } else { &self.host };
        format!("{}:{}", host, self.port)
    }
}

/// Parse a grace-period string: unit-suffixed segments (`15s`, `1m30s`,
/// `100ms`, `2h`) or bare seconds (`90`, `2.5`).
pub fn parse_grace_period(value: &str) -> std::result::Result<Duration, String> {
    let invalid = || format!("invalid duration {:?}, expected e.g. 15s, 1m30s, or 90", value);

    if value.is_empty() {
        return Err(invalid());
    }

    // Bare number means seconds.
    if let Ok(seconds) = value.parse::<f64>() {
        if seconds < 0.0 {
            return Err(format!("duration must not be negative, got {:?}", value));
        }
        return Ok(Duration::from_secs_f64(seconds));
    }

    let mut total_seconds = 0.0f64;
    let mut rest = value;

    while !rest.is_empty() {
        let unit_start = rest
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .ok_or_else(invalid)?;
        let (number, tail) = rest.split_at(unit_start);
        let number: f64 = number.parse().map_err(|_| invalid())?;

        let (scale, tail) = if let Some(tail) = tail.strip_prefix("ms") {
            (1e-3, tail)
        } else if let Some(tail) = tail.strip_prefix("us") {
            (1e-6, tail)
        } else if let Some(tail) = tail.strip_prefix("ns") {
            (1e-9, tail)
        } else if let Some(tail) = tail.strip_prefix('s') {
            (1.0, tail)
        } else if let Some(tail) = tail.strip_prefix('m') {
            (60.0, tail)
        } else if let Some(tail) = tail.strip_prefix('h') {
            (3600.0, tail)
        } else {
            return Err(invalid());
        };

        total_seconds += number * scale;
        rest = tail;
    }

    Ok(Duration::from_secs_f64(total_seconds))
}
