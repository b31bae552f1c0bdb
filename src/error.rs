//! Error types for the somcolor engine.

use thiserror::Error;

/// The main error type for somcolor operations.
#[derive(Error, Debug)]
pub enum SomColorError {
    /// Invalid configuration or command-line value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decode or encode failure.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A grid buffer was built from a sequence whose length is not a non-zero perfect square.
    #[error("Grid length {len} is not a non-zero perfect square")]
    NonSquareGrid {
        /// Length of the rejected sequence.
        len: usize,
    },

    /// The decoded image is not square.
    #[error("Image is not square: {width}x{height}")]
    NonSquareImage {
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
    },
}

/// Result type alias for somcolor operations.
pub type Result<T> = std::result::Result<T, SomColorError>;

impl From<serde_json::Error> for SomColorError {
    fn from(err: serde_json::Error) -> Self {
        SomColorError::Serialization(err.to_string())
    }
}
