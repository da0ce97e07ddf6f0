//! Error types for the gold_models crate

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or querying a fitted model
#[derive(Debug, Error)]
pub enum ModelError {
    /// No artifact exists at the requested path
    #[error("Model file '{}' not found", .path.display())]
    NotFound { path: PathBuf },

    /// The artifact exists but cannot be turned into a usable model
    #[error("Error loading model '{}': {reason}", .path.display())]
    LoadError { path: PathBuf, reason: String },

    /// The model carries no fit statistics to summarize
    #[error("Model summary not available: {0}")]
    SummaryUnavailable(String),

    /// Error related to forecasting operations
    #[error("Forecasting error: {0}")]
    ForecastingError(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Artifact body that is not a supported model document
    #[error("Invalid artifact: {0}")]
    InvalidArtifact(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        ModelError::InvalidArtifact(err.to_string())
    }
}

impl ModelError {
    /// True for the two load-time failures
    pub fn is_load_failure(&self) -> bool {
        matches!(self, ModelError::NotFound { .. } | ModelError::LoadError { .. })
    }
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ModelError>;
