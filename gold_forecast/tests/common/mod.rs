#![allow(dead_code)]

use chrono::NaiveDate;
use gold_data::{DataError, HistoricalSeries, HistoryQuery, PriceSource, PricePoint};
use gold_forecast::{DashboardConfig, ModelChoice};
use serde_json::json;
use std::cell::Cell;
use std::fs;
use std::path::Path;
use std::rc::Rc;
use tempfile::TempDir;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A day after the last historical month
pub fn today() -> NaiveDate {
    date(2025, 1, 15)
}

/// Two years of monthly closes ending 2024-12-01 at 2050.00
pub fn gold_history() -> HistoricalSeries {
    let points = (0..24)
        .map(|i| PricePoint {
            date: date(2023 + i / 12, (i % 12) as u32 + 1, 1),
            price: if i == 23 { 2050.0 } else { 1800.0 + 10.0 * i as f64 },
        })
        .collect();
    HistoricalSeries::new("GC=F", points).unwrap()
}

/// Price source that counts fetches and can be told to fail
#[derive(Debug, Clone)]
pub struct StubSource {
    series: Option<HistoricalSeries>,
    calls: Rc<Cell<usize>>,
}

impl StubSource {
    pub fn new(series: HistoricalSeries) -> Self {
        Self {
            series: Some(series),
            calls: Rc::new(Cell::new(0)),
        }
    }

    pub fn failing() -> Self {
        Self {
            series: None,
            calls: Rc::new(Cell::new(0)),
        }
    }

    /// Shared counter, still readable after the source is moved
    pub fn calls(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.calls)
    }
}

impl PriceSource for StubSource {
    fn fetch(&self, query: &HistoryQuery) -> gold_data::Result<HistoricalSeries> {
        self.calls.set(self.calls.get() + 1);
        match &self.series {
            Some(series) => Ok(series.clone()),
            None => Err(DataError::NoData(query.symbol.clone())),
        }
    }

    fn name(&self) -> &str {
        "stub"
    }
}

/// Random walk ARIMA(0,1,0) whose last observation is 2050, no fit statistics
pub fn random_walk_artifact() -> serde_json::Value {
    json!({
        "format_version": 1,
        "model": "arima",
        "order": [0, 1, 0],
        "sigma2": 100.0,
        "observations": [2000.0, 2050.0]
    })
}

pub fn arima_artifact() -> serde_json::Value {
    let observations: Vec<f64> = (0..24).map(|i| 1800.0 + 10.0 * i as f64).collect();
    let residuals = vec![2.0; 24];
    json!({
        "format_version": 1,
        "model": "arima",
        "order": [1, 1, 1],
        "constant": 0.5,
        "ar": [0.3],
        "ma": [-0.1],
        "sigma2": 1500.0,
        "observations": observations,
        "residuals": residuals,
        "fit": {
            "nobs": 24,
            "log_likelihood": -120.5,
            "aic": 247.0,
            "bic": 250.5,
            "sample_start": "2023-01-01",
            "sample_end": "2024-12-01"
        }
    })
}

pub fn sarima_artifact() -> serde_json::Value {
    let observations: Vec<f64> = (0..36)
        .map(|i| 1700.0 + 12.0 * i as f64 + if i % 12 < 6 { 15.0 } else { -15.0 })
        .collect();
    let residuals = vec![0.0; 36];
    json!({
        "format_version": 1,
        "model": "sarima",
        "order": [1, 1, 0],
        "seasonal_order": [1, 0, 0, 12],
        "ar": [0.2],
        "seasonal_ar": [0.4],
        "sigma2": 1200.0,
        "observations": observations,
        "residuals": residuals
    })
}

pub fn write_artifact(dir: &Path, choice: ModelChoice, artifact: &serde_json::Value) {
    let body = serde_json::to_string_pretty(artifact).unwrap();
    fs::write(dir.join(choice.file_name()), body).unwrap();
}

/// A model directory holding both artifacts and a config pointing at it
pub fn model_dir() -> (TempDir, DashboardConfig) {
    let dir = TempDir::new().unwrap();
    write_artifact(dir.path(), ModelChoice::Arima, &arima_artifact());
    write_artifact(dir.path(), ModelChoice::Sarima, &sarima_artifact());
    let config = DashboardConfig {
        model_dir: dir.path().to_path_buf(),
        ..DashboardConfig::default()
    };
    (dir, config)
}
