//! # Gold Data
//!
//! Monthly price history for the gold forecasting dashboard.
//!
//! ## Features
//!
//! - Yahoo Finance chart API client (blocking, closing prices only)
//! - CSV ingestion through polars for offline runs
//! - A keyed fetch cache so repeated renders reuse the same series
//!
//! ## Quick Start
//!
//! ```no_run
//! use chrono::Utc;
//! use gold_data::{FetchCache, HistoryQuery, YahooFinance};
//!
//! let mut cache = FetchCache::new(YahooFinance::new());
//! let query = HistoryQuery::gold(Utc::now().date_naive());
//! let series = cache.get(&query)?;
//! println!("{} months, last close {:.2}", series.len(), series.last().price);
//! # Ok::<(), gold_data::DataError>(())
//! ```

pub mod cache;
pub mod error;
pub mod loader;
pub mod query;
pub mod series;
pub mod yahoo;

pub use crate::cache::{CachedSeries, FetchCache};
pub use crate::error::{DataError, Result};
pub use crate::loader::{CsvSource, DataLoader};
pub use crate::query::{gold_history_start, HistoryQuery, GOLD_FUTURES_SYMBOL};
pub use crate::series::{month_start, HistoricalSeries, PricePoint};
pub use crate::yahoo::YahooFinance;

/// Anything that can answer a [`HistoryQuery`] with a clean monthly series
pub trait PriceSource {
    /// Fetch the series for a query
    fn fetch(&self, query: &HistoryQuery) -> Result<HistoricalSeries>;

    /// Short label used in logs
    fn name(&self) -> &str;
}

impl<S: PriceSource + ?Sized> PriceSource for Box<S> {
    fn fetch(&self, query: &HistoryQuery) -> Result<HistoricalSeries> {
        (**self).fetch(query)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
