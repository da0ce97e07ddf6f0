//! # Gold Forecast
//!
//! Interactive dashboard that charts gold futures history and projects it
//! forward with a pre-trained ARIMA or SARIMA model.
//!
//! Every change to the two controls (model choice and a 1 to 36 month
//! horizon) re-runs one render cycle:
//!
//! 1. fetch monthly closes since 2005 (memoized per day)
//! 2. load the selected model artifact
//! 3. forecast and align the numbers to a monthly date index
//! 4. lay the results out as a [`Page`] of sections
//!
//! The page is shown either by the terminal dashboard in [`tui`] or printed
//! once with [`render_page`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use chrono::Utc;
//! use gold_data::YahooFinance;
//! use gold_forecast::{render_page, ControlEvent, Dashboard, DashboardConfig, RenderOptions};
//!
//! let mut dashboard = Dashboard::new(YahooFinance::new(), DashboardConfig::default());
//! let today = Utc::now().date_naive();
//!
//! let outcome = dashboard.handle(ControlEvent::AdjustHorizon(6), today);
//! print!("{}", render_page(&outcome.page, &RenderOptions::default()));
//! ```

pub mod assembler;
pub mod config;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod presentation;
pub mod tui;

pub use crate::assembler::{assemble, forecast_index, summary_text, ForecastRow, ForecastTable};
pub use crate::config::{
    Controls, DashboardConfig, ForecastHorizon, ModelChoice, DEFAULT_HORIZON, MAX_HORIZON,
    MIN_HORIZON,
};
pub use crate::error::{DashboardError, Result};
pub use crate::export::{write_forecast_csv, EXPORT_FILE_NAME};
pub use crate::pipeline::{
    model_failure_message, ControlEvent, Dashboard, RenderCycle, RenderOutcome, Stage, StageName,
};
pub use crate::presentation::text::{render_page, RenderOptions};
pub use crate::presentation::{format_currency, ForecastChart, Notice, NoticeLevel, Page, Section};
