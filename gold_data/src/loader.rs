//! CSV ingestion for offline runs

use crate::error::{DataError, Result};
use crate::query::HistoryQuery;
use crate::series::HistoricalSeries;
use crate::PriceSource;
use chrono::NaiveDate;
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

/// Data loader for monthly price files
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load a monthly series from a CSV file with a date column and a
    /// close (or price) column.
    pub fn from_csv<P: AsRef<Path>>(path: P, symbol: &str) -> Result<HistoricalSeries> {
        let file = File::open(path)?;
        let df = CsvReader::new(file)
            .infer_schema(None)
            .has_header(true)
            .finish()?;

        Self::from_dataframe(&df, symbol)
    }

    /// Build a series from an existing DataFrame
    pub fn from_dataframe(df: &DataFrame, symbol: &str) -> Result<HistoricalSeries> {
        let time_column = Self::detect_time_column(df)?;
        let close_column = Self::detect_close_column(df)?;

        let dates = df.column(&time_column)?.cast(&DataType::Utf8)?;
        let closes = df.column(&close_column)?.cast(&DataType::Float64)?;

        let mut bars = Vec::with_capacity(df.height());
        for (raw_date, close) in dates.utf8()?.into_iter().zip(closes.f64()?.into_iter()) {
            let Some(raw_date) = raw_date else {
                continue;
            };
            bars.push((Self::parse_date(raw_date)?, close));
        }

        HistoricalSeries::from_monthly_bars(symbol, bars)
    }

    /// Accepts `YYYY-MM-DD` optionally followed by a time part
    fn parse_date(raw: &str) -> Result<NaiveDate> {
        let trimmed = raw.trim();
        let day_part = trimmed.get(..10).unwrap_or(trimmed);
        NaiveDate::parse_from_str(day_part, "%Y-%m-%d")
            .map_err(|e| DataError::ParseError(format!("invalid date '{}': {}", raw, e)))
    }

    /// Detect the time column in a DataFrame
    fn detect_time_column(df: &DataFrame) -> Result<String> {
        for name in df.get_column_names() {
            let lower_name = name.to_lowercase();
            if lower_name.contains("date") || lower_name.contains("time") {
                return Ok(name.to_string());
            }
        }

        Err(DataError::InvalidSeries(
            "No date column found in data".to_string(),
        ))
    }

    /// Detect the closing price column, preferring an exact `close` over
    /// `adj close` style columns.
    fn detect_close_column(df: &DataFrame) -> Result<String> {
        let column_names = df.get_column_names();

        let exact = column_names
            .iter()
            .find(|name| name.trim().eq_ignore_ascii_case("close"));
        let partial = column_names
            .iter()
            .find(|name| name.to_lowercase().contains("close"));
        let price = column_names
            .iter()
            .find(|name| name.to_lowercase().contains("price"));

        exact
            .or(partial)
            .or(price)
            .map(|name| name.to_string())
            .ok_or_else(|| DataError::InvalidSeries("No close or price column found in data".to_string()))
    }
}

/// [`PriceSource`] backed by a CSV file, clipped to each query's range
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PriceSource for CsvSource {
    fn fetch(&self, query: &HistoryQuery) -> Result<HistoricalSeries> {
        let series = DataLoader::from_csv(&self.path, &query.symbol)?;
        let clipped = series.clip(query.start, query.end)?;
        info!(
            path = %self.path.display(),
            months = clipped.len(),
            "loaded history from csv"
        );
        Ok(clipped)
    }

    fn name(&self) -> &str {
        "csv"
    }
}
