//! Error types for clustermesh

use thiserror::Error;

/// Main error type for clustermesh operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Mesh has no vertices")]
    EmptyMesh,

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Result type alias for clustermesh operations
pub type Result<T> = std::result::Result<T, Error>;
