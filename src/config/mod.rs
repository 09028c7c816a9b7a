mod basic;
mod database;

pub use basic::BasicConfig;
pub use database::DatabaseConfig;

use crate::error::VaxportError;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Core server configuration (see `basic` table in config.toml).
    #[serde(default)]
    pub basic: BasicConfig,

    /// Connection pool settings (see `database` table in config.toml).
    #[serde(default)]
    pub database: DatabaseConfig,
}

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "VAXPORT_";

impl Config {
    /// Defaults, then `path` if it exists, then `VAXPORT_*` environment variables.
    ///
    /// Nested keys use a double underscore: `VAXPORT_DATABASE__URL` sets `database.url`.
    pub fn figment_from(path: impl AsRef<Path>) -> Figment {
        let path = path.as_ref();
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if path.is_file() {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn figment() -> Figment {
        Self::figment_from(DEFAULT_CONFIG_FILE)
    }

    /// Loads and validates the configuration.
    pub fn load() -> Result<Self, VaxportError> {
        Self::from_figment(&Self::figment())
    }

    pub fn from_figment(figment: &Figment) -> Result<Self, VaxportError> {
        let cfg: Self = figment.extract()?;
        if cfg.database.url.trim().is_empty() {
            return Err(VaxportError::UnexpectedError(
                "database.url must be set and non-empty".to_string(),
            ));
        }
        if cfg.database.max_connections == 0 {
            return Err(VaxportError::UnexpectedError(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        Ok(cfg)
    }
}
