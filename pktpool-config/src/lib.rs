//! # pktpool Configuration System
//!
//! Layered configuration for packet pools and their telemetry.
//!
//! ## Features
//! - **Layered Sources**: defaults, YAML files, then `PKTPOOL_*` environment
//! - **Validation**: every loaded configuration is range-checked before use
//! - **Environment Awareness**: per-environment override files

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

mod error;
mod pool;
mod telemetry;
mod validation;

pub use error::ConfigError;
pub use pool::PoolConfig;
pub use telemetry::TelemetryConfig;

const BASE_CONFIG: &str = "config/pktpool.yaml";
const ENV_PREFIX: &str = "PKTPOOL_";

/// Top‑level configuration container.
#[derive(Debug, Serialize, Deserialize, Validate, Default, Clone, PartialEq, Eq)]
pub struct PktpoolConfig {
    /// Packet pool sizing.
    #[serde(default)]
    #[validate(nested)]
    pub pool: PoolConfig,

    /// Logging and metrics.
    #[serde(default)]
    #[validate(nested)]
    pub telemetry: TelemetryConfig,
}

impl PktpoolConfig {
    /// Load configuration from default files and environment.
    ///
    /// Hierarchy:
    /// 1. Default Values
    /// 2. `config/pktpool.yaml` - Base settings. If missing, defaults are used.
    /// 3. `config/<PKTPOOL_ENV>.yaml` - Environment‑specific overrides.
    /// 4. `PKTPOOL_*` environment variables (`__` separates nested keys).
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(PktpoolConfig::default()));

        if Path::new(BASE_CONFIG).exists() {
            figment = figment.merge(Yaml::file(BASE_CONFIG));
        } else {
            debug!("{BASE_CONFIG} not found, using default configuration");
        }

        let env = std::env::var("PKTPOOL_ENV").unwrap_or_else(|_| "production".into());
        let env_file = format!("config/{}.yaml", env);
        if Path::new(&env_file).exists() {
            figment = figment.merge(Yaml::file(env_file));
        }

        Self::extract(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Load configuration from a specific path, with environment overrides.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        Self::extract(
            Figment::from(Serialized::defaults(PktpoolConfig::default()))
                .merge(Yaml::file(path))
                .merge(Env::prefixed(ENV_PREFIX).split("__")),
        )
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        figment
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }
}
