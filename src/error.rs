//! Error types for mmaudio-rs.

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Candle tensor/model error.
    #[error("candle: {0}")]
    Candle(#[from] candle_core::Error),

    /// Malformed index file (TSV parsing).
    #[error("index: {0}")]
    Index(String),

    /// Tensor store error (missing directory, unknown array name).
    #[error("store: {0}")]
    Store(String),

    /// A loaded tensor's shape disagrees with the configuration.
    #[error("shape: {field}: expected {expected}, got {actual}")]
    Shape {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Invalid configuration.
    #[error("config: {0}")]
    Config(String),

    /// Dataset index out of range.
    #[error("index {index} out of range for dataset of length {len}")]
    OutOfRange { index: usize, len: usize },

    /// I/O error.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}
