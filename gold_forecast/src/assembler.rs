//! Forecast assembly: model output aligned to a monthly date index

use crate::config::ForecastHorizon;
use crate::error::{DashboardError, Result};
use chrono::{Months, NaiveDate};
use gold_data::HistoricalSeries;
use gold_models::{LoadedModel, ModelError};
use serde::Serialize;
use tracing::debug;

/// One forecast month
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastRow {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Forecast")]
    pub forecast: f64,
    #[serde(rename = "Lower CI")]
    pub lower: f64,
    #[serde(rename = "Upper CI")]
    pub upper: f64,
}

/// Forecast keyed by date, columns Forecast / Lower CI / Upper CI
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastTable {
    model_name: String,
    rows: Vec<ForecastRow>,
}

impl ForecastTable {
    /// Name of the model that produced the numbers
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn rows(&self) -> &[ForecastRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|r| r.date).collect()
    }
}

/// `horizon` month starts following `last`, the first exactly one calendar
/// month after it
pub fn forecast_index(last: NaiveDate, horizon: usize) -> Result<Vec<NaiveDate>> {
    (1..=horizon)
        .map(|step| {
            last.checked_add_months(Months::new(step as u32)).ok_or_else(|| {
                DashboardError::Misaligned(format!("{} + {} months is out of range", last, step))
            })
        })
        .collect()
}

/// Ask `model` for `horizon` steps and line the answer up after the last
/// historical month.
///
/// No arithmetic is applied to the model's numbers.
pub fn assemble(
    model: &dyn LoadedModel,
    history: &HistoricalSeries,
    horizon: ForecastHorizon,
) -> Result<ForecastTable> {
    let steps = horizon.get();
    let result = model.forecast(steps)?;

    if result.horizons() != steps {
        return Err(DashboardError::Misaligned(format!(
            "asked {} for {} steps, got {}",
            model.name(),
            steps,
            result.horizons()
        )));
    }

    let index = forecast_index(history.last().date, steps)?;
    let rows: Vec<ForecastRow> = index
        .into_iter()
        .zip(result.values())
        .zip(result.lower().iter().zip(result.upper()))
        .map(|((date, forecast), (lower, upper))| ForecastRow {
            date,
            forecast: *forecast,
            lower: *lower,
            upper: *upper,
        })
        .collect();

    debug!(
        model = %model.name(),
        rows = rows.len(),
        first = %rows[0].date,
        "assembled forecast table"
    );

    Ok(ForecastTable {
        model_name: model.name(),
        rows,
    })
}

/// The model's summary text, or `None` when it cannot produce one
pub fn summary_text(model: &dyn LoadedModel) -> Option<String> {
    match model.summary() {
        Ok(text) => Some(text),
        Err(ModelError::SummaryUnavailable(reason)) => {
            debug!(model = %model.name(), %reason, "model summary unavailable");
            None
        }
        Err(e) => {
            debug!(model = %model.name(), error = %e, "model summary failed");
            None
        }
    }
}
