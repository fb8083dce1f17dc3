use std::path::Path;

use anyhow::Context;
use config::{Environment, File};
use serde::Deserialize;

use rolodex_core::seed::DEFAULT_SEED_URL;

/// Runtime configuration, layered lowest to highest precedence:
/// built-in defaults, an optional TOML file, then `ROLODEX_`-prefixed
/// environment variables (`ROLODEX_SERVER__PORT`, `ROLODEX_DATABASE__URL`,
/// ...).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub name: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "mongodb://localhost:27017".to_string(),
            name: "rolodex".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 signing secret for login tokens. The default mirrors the
    /// demo deployment; override it outside of demos.
    pub token_secret: String,
    pub token_ttl_days: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: "fallback_secret".to_string(),
            token_ttl_days: 7,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub url: String,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SEED_URL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration. A missing file is fine unless a path was given
    /// explicitly.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder();
        builder = match path {
            Some(path) => builder.add_source(File::from(path)),
            None => builder.add_source(File::with_name("rolodex").required(false)),
        };

        builder
            .add_source(Environment::with_prefix("ROLODEX").separator("__"))
            .build()
            .context("failed to read configuration sources")?
            .try_deserialize()
            .context("invalid configuration")
    }
}
