use thiserror::Error;

/// Errors surfaced by the authentication SDK seam
#[derive(Debug, Error)]
pub enum SdkError {
    /// The SDK refused to initialize
    #[error("SDK initialization error: {0}")]
    Init(String),

    /// Invalid SDK configuration
    #[error("SDK configuration error: {0}")]
    Config(String),

    /// Error from JSON serialization/deserialization of SDK payloads
    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}
