//! Error types for brickyard

use thiserror::Error;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    /// Input JSON did not match any known brick data shape
    #[error("Format error: {0}")]
    Format(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A layer source failed to produce bricks for a layer
    #[error("Failed to load layer {index}: {message}")]
    Fetch { index: u32, message: String },

    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Build a fetch error for the given layer index
    pub fn fetch(index: u32, message: impl Into<String>) -> Self {
        Self::Fetch {
            index,
            message: message.into(),
        }
    }
}
