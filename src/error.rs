use std::time::Duration;
use thiserror::Error;

// Failure of a single supplier call. Never crosses the aggregator boundary.
#[derive(Error, Debug)]
pub enum SupplierError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Supplier responded with {status_code}: {message}")]
    Status { status_code: u16, message: String },

    #[error("Malformed supplier body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid supplier record: {0}")]
    InvalidRecord(String),

    #[error("Supplier timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
}

impl From<reqwest::Error> for SupplierError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => SupplierError::Status {
                status_code: status.as_u16(),
                message: err.to_string(),
            },
            None => SupplierError::Transport(err.to_string()),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid request: {}", .details.join("; "))]
    Invalid { details: Vec<String> },
}

impl ValidationError {
    pub fn details(&self) -> &[String] {
        match self {
            ValidationError::Invalid { details } => details,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing supplier url: {0}")]
    MissingUrl(&'static str),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("Configuration parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("HTTP client initialization error: {0}")]
    InitError(String),
}
