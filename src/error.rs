use thiserror::Error;

/// Error type for engine configuration.
///
/// Collision checks themselves are infallible; only loading a config can fail.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Values parsed but do not make sense together.
    #[error("invalid config: {0}")]
    Invalid(String),
}
