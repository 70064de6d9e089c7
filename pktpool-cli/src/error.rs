use thiserror::Error;

use pktpool_config::ConfigError;
use pktpool_core::{PoolError, ReleaseError};
use pktpool_telemetry::TelemetryError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Pool(#[from] PoolError),

    #[error(transparent)]
    Release(#[from] ReleaseError),

    #[error(transparent)]
    Telemetry(#[from] TelemetryError),

    #[error("Unable to render configuration: {0}")]
    Render(#[from] serde_yaml::Error),
}
