//! # Gold Forecast Workspace
//!
//! Umbrella crate re-exporting the three workspace members:
//!
//! - [`gold_data`]: monthly gold futures history from Yahoo Finance or CSV
//! - [`gold_models`]: pre-trained ARIMA/SARIMA artifacts behind one trait
//! - [`gold_forecast`]: the render pipeline, presentation and dashboard
//!
//! ## Example
//!
//! ```
//! use gold_forecast_workspace::gold_forecast::{format_currency, ForecastHorizon, ModelChoice};
//!
//! let choice: ModelChoice = "sarima".parse().unwrap();
//! assert_eq!(choice.file_name(), "sarima_gold_model.json");
//! assert_eq!(choice.label(), "SARIMA");
//!
//! let horizon = ForecastHorizon::default().step(30);
//! assert_eq!(horizon.get(), 36);
//! assert_eq!(format_currency(2050.0), "$2,050.00");
//! ```

pub use gold_data;
pub use gold_forecast;
pub use gold_models;
