//! ## pktpool-telemetry::logging
//! **Structured logging with `tracing`**
//!
//! Pools log construction at `info`, exhaustion at `debug`, bad releases at
//! `error` and leaked buffers at `warn`. The allocate/release fast path only
//! emits `trace` events.

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, EnvFilter};

use crate::TelemetryError;

#[derive(Clone)]
pub struct PoolLogger;

impl PoolLogger {
    /// Installs the global fmt subscriber.
    ///
    /// `RUST_LOG` wins over `default_filter` when set.
    pub fn init(default_filter: &str) -> Result<(), TelemetryError> {
        fmt()
            .with_env_filter(Self::filter(default_filter))
            .with_thread_names(true)
            .with_span_events(FmtSpan::CLOSE)
            .try_init()
            .map_err(|e| TelemetryError::Subscriber(e.to_string()))
    }

    fn filter(default_filter: &str) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_an_error() {
        // Either this test installs the subscriber first or another one did.
        let _ = PoolLogger::init("info");
        assert!(matches!(
            PoolLogger::init("debug"),
            Err(TelemetryError::Subscriber(_))
        ));
    }
}
