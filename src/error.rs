//! Error type shared by the pointing, selection and polygon modules

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by library operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown pointing source: {0}")]
    UnknownSource(String),

    #[error("Pointing source already registered: {0}")]
    DuplicateSource(String),

    #[error("Unknown target: {0}")]
    UnknownTarget(String),

    #[error("Target already registered: {0}")]
    DuplicateTarget(String),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Sink error: {0}")]
    Sink(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
