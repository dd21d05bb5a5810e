//! # Error Types
//!
//! Custom error types for Sensor Board using `thiserror`.

use thiserror::Error;

/// Main error type for Sensor Board
#[derive(Debug, Error)]
pub enum SensorBoardError {
    /// Transport-level failures (timeout, no connectivity, bad status)
    #[error("network failure: {0}")]
    Network(String),

    /// Feed document missing required sections or fields
    #[error("malformed feed: {0}")]
    MalformedFeed(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Sensor Board
pub type Result<T> = std::result::Result<T, SensorBoardError>;
