//! # Gold Models
//!
//! Loading and querying pre-trained forecasting models.
//!
//! Models are trained elsewhere and stored as JSON artifacts. This crate
//! deserializes them behind the [`LoadedModel`] trait so callers can ask for
//! a forecast or a summary without caring which variant they hold.
//!
//! ## Variants
//!
//! - [`ArimaModel`]: non-seasonal ARIMA(p, d, q), suited to short-term forecasts
//! - [`SarimaModel`]: seasonal SARIMA(p, d, q)(P, D, Q, s)
//!
//! ## Quick Start
//!
//! ```no_run
//! use gold_models::{load_model, ModelError};
//!
//! match load_model("arima_gold_model.json") {
//!     Ok(model) => {
//!         let forecast = model.forecast(12)?;
//!         println!("{}: {:?}", model.name(), forecast.values());
//!     }
//!     Err(ModelError::NotFound { path }) => eprintln!("missing {}", path.display()),
//!     Err(e) => eprintln!("{}", e),
//! }
//! # Ok::<(), ModelError>(())
//! ```

use std::fmt::Debug;

pub mod arima;
pub mod artifact;
pub mod error;
pub mod forecast;
pub mod polynomial;
pub mod sarima;
pub mod summary;

pub use crate::arima::ArimaModel;
pub use crate::artifact::{load_model, ModelArtifact, FORMAT_VERSION};
pub use crate::error::{ModelError, Result};
pub use crate::forecast::ForecastResult;
pub use crate::sarima::SarimaModel;
pub use crate::summary::FitStatistics;

/// Two-sided coverage of the forecast bounds
pub const CONFIDENCE_LEVEL: f64 = 0.95;

/// A fitted model loaded from disk
pub trait LoadedModel: Debug {
    /// Name including orders, e.g. `ARIMA(1,1,1)`
    fn name(&self) -> String;

    /// Point forecasts and 95% bounds for the next `horizon` periods
    fn forecast(&self, horizon: usize) -> Result<ForecastResult>;

    /// Human-readable results table.
    ///
    /// Fails with [`ModelError::SummaryUnavailable`] when the artifact
    /// carries no fit statistics.
    fn summary(&self) -> Result<String>;
}
