//! Forecast output of a fitted model

use crate::error::{ModelError, Result};

/// Point forecasts with lower and upper confidence bounds, one entry per
/// step ahead
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastResult {
    values: Vec<f64>,
    lower: Vec<f64>,
    upper: Vec<f64>,
    confidence_level: f64,
}

impl ForecastResult {
    /// Create a new forecast result with confidence intervals
    pub fn new_with_intervals(
        values: Vec<f64>,
        lower: Vec<f64>,
        upper: Vec<f64>,
        confidence_level: f64,
    ) -> Result<Self> {
        if values.len() != lower.len() || values.len() != upper.len() {
            return Err(ModelError::ForecastingError(format!(
                "Values length ({}) doesn't match interval lengths ({}, {})",
                values.len(),
                lower.len(),
                upper.len()
            )));
        }

        if !(confidence_level > 0.0 && confidence_level < 1.0) {
            return Err(ModelError::InvalidParameter(
                "Confidence level must be between 0 and 1".to_string(),
            ));
        }

        let finite = |xs: &[f64]| xs.iter().all(|x| x.is_finite());
        if !(finite(&values) && finite(&lower) && finite(&upper)) {
            return Err(ModelError::ForecastingError(
                "forecast produced non-finite values".to_string(),
            ));
        }

        Ok(Self {
            values,
            lower,
            upper,
            confidence_level,
        })
    }

    /// Get the point forecasts
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get the lower confidence bounds
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    /// Get the upper confidence bounds
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Get the number of periods forecasted
    pub fn horizons(&self) -> usize {
        self.values.len()
    }

    pub fn confidence_level(&self) -> f64 {
        self.confidence_level
    }
}
