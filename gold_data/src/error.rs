//! Error types for the gold_data crate

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while fetching or validating price history
#[derive(Debug, Error)]
pub enum DataError {
    /// The upstream provider could not be reached
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The provider answered with a body we could not parse
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The provider answered with an explicit error object
    #[error("API error [{code}]: {description}")]
    ApiError { code: String, description: String },

    /// The provider answered but returned no usable rows
    #[error("No data returned for {0}")]
    NoData(String),

    /// A series failed validation (ordering, non-finite prices, ...)
    #[error("Data error: {0}")]
    InvalidSeries(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    PolarsError(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, DataError>;

impl From<PolarsError> for DataError {
    fn from(err: PolarsError) -> Self {
        DataError::PolarsError(err.to_string())
    }
}

impl From<reqwest::Error> for DataError {
    fn from(err: reqwest::Error) -> Self {
        DataError::RequestFailed(err.to_string())
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::ParseError(err.to_string())
    }
}
