//! Error types for the gold_forecast crate

use gold_data::DataError;
use gold_models::ModelError;
use thiserror::Error;

/// Custom error types for the dashboard
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Historical prices could not be fetched
    #[error("Failed to fetch historical data: {0}")]
    DataFetch(#[from] DataError),

    /// The model could not be loaded or queried
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Horizon outside the slider bounds
    #[error("Forecast horizon must be between {min} and {max} months, got {value}")]
    InvalidHorizon { value: usize, min: usize, max: usize },

    /// The model answered with sequences that do not line up
    #[error("Forecast misaligned: {0}")]
    Misaligned(String),

    /// Error related to configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error writing an export file
    #[error("Export error: {0}")]
    Export(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, DashboardError>;

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::Config(err.to_string())
    }
}

impl From<csv::Error> for DashboardError {
    fn from(err: csv::Error) -> Self {
        DashboardError::Export(err.to_string())
    }
}
