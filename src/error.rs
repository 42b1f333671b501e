//! Error types for the gallery client and layout engine

use thiserror::Error;

/// Result type alias for gallery operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while fetching, storing or laying out images
#[derive(Error, Debug)]
pub enum Error {
    /// Transport failure or non-success HTTP status
    #[error("Network error: {0}")]
    Network(String),

    /// The remote service answered with a payload that does not match the
    /// expected schema (missing or mistyped fields)
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// An image whose dimensions cannot produce a finite aspect ratio
    #[error("Invalid image {id}: {width}x{height} has no usable aspect ratio")]
    InvalidImage { id: String, width: u32, height: u32 },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Key-value store read/write failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Operation timed out
    #[error("Operation timed out after {0}ms")]
    Timeout(u64),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Storage(err.to_string())
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Error::MalformedResponse(err.to_string())
        } else {
            Error::Network(err.to_string())
        }
    }
}
