use thiserror::Error;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Metrics registry error: {0}")]
    Prometheus(#[from] prometheus::Error),

    #[error("Metrics exposition is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("Unable to install log subscriber: {0}")]
    Subscriber(String),
}
