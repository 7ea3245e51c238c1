//! Error types for the seasons simulation

use thiserror::Error;

/// Main error type for the simulation
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Service error: {0}")]
    Service(String),

    #[error("Invalid layout: {0}")]
    InvalidLayout(String),
}
