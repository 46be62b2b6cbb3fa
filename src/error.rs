//! Error types for the spotlight pipeline.

/// Top-level error type for the icon rotation bot.
#[derive(Debug, thiserror::Error)]
pub enum SpotlightError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Image decode, rotation, or re-encode error.
    #[error("image error: {0}")]
    Image(String),

    /// Discord REST API error.
    #[error("discord api error: {0}")]
    Api(String),

    /// Discord gateway session error.
    #[error("gateway error: {0}")]
    Gateway(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, SpotlightError>;
