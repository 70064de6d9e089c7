//! Observability configuration.
//!
//! Parameters for logging and the Prometheus exporter.

use serde::{Deserialize, Serialize};
use validator::{self, Validate};

use crate::validation;

/// Telemetry configuration.
#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Default `tracing` filter directive; `RUST_LOG` takes precedence.
    #[serde(default = "default_log_filter")]
    #[validate(length(min = 1))]
    pub log_filter: String,

    /// Prefix for every exported metric name.
    #[serde(default = "default_metrics_prefix")]
    #[validate(custom(function = validation::validate_metric_prefix))]
    pub metrics_prefix: String,
}

fn default_log_filter() -> String {
    "info".into()
}

fn default_metrics_prefix() -> String {
    "pktpool".into()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            metrics_prefix: default_metrics_prefix(),
        }
    }
}
