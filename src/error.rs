//! Error types for the gas price feeds

use thiserror::Error;

/// Errors that can occur during a single fetch cycle
///
/// None of these ever reach a price reader: the fetch loop logs them and
/// leaves the store untouched.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network request failed
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// Response body is not valid JSON
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Expected key is absent from the payload
    #[error("Missing field: {0}")]
    MissingField(String),

    /// Key is present but not a non-negative number
    #[error("Invalid value for {field}: {value}")]
    InvalidField { field: String, value: String },

    /// Scaled value does not fit into a Wei amount
    #[error("Value for {0} overflows")]
    Overflow(String),

    /// Endpoint could not be built
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Timeout waiting for response
    #[error("Request timeout")]
    Timeout,

    /// Provider's parser panicked on the payload
    #[error("Parser panicked: {0}")]
    ParserPanic(String),
}

impl ProviderError {
    /// Creates a MissingField error
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingField(field.into())
    }

    /// Creates an InvalidField error
    pub fn invalid(field: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidField {
            field: field.into(),
            value: value.to_string(),
        }
    }
}

/// Errors raised while building a feed configuration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Refresh interval must be positive")]
    ZeroRefreshInterval,

    #[error("Expiry must be positive")]
    ZeroExpiry,

    #[error("Request timeout must be positive")]
    ZeroRequestTimeout,

    /// Environment variable holds something other than an integer
    #[error("Invalid value for {var}: {value}")]
    InvalidEnv { var: String, value: String },
}

/// Errors raised while constructing a tracker
#[derive(Debug, Error)]
pub enum FeedError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// HTTP client could not be built
    #[error(transparent)]
    Transport(#[from] ProviderError),
}
