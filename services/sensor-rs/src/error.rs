use reqwest::StatusCode;
use thiserror::Error;

/// Configuration could not be loaded or is unusable.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("Invalid endpoint URL {url:?}: {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::Load(Box::new(err))
    }
}

/// A detection event did not reach the endpoint.
///
/// Neither case is fatal for the loop; they only decide which log line is written.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Server returned {}", .0.as_u16())]
    Rejected(StatusCode),

    #[error("Request error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Startup failures of the simulator binary.
#[derive(Debug, Error)]
pub enum SimulatorError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("HTTP client could not be built: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Tracing init failed: {0}")]
    Telemetry(String),
}
