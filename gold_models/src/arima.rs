//! ARIMA models for time series forecasting

use crate::error::{ModelError, Result};
use crate::polynomial::{difference_polynomial, lag_polynomial, multiply, ExpandedModel};
use crate::summary::{self, FitStatistics};
use crate::{ForecastResult, LoadedModel, CONFIDENCE_LEVEL};
use serde::{Deserialize, Serialize};

/// Fitted ARIMA(p, d, q) model (AutoRegressive Integrated Moving Average)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArimaModel {
    /// Orders `(p, d, q)`
    pub order: (usize, usize, usize),
    /// Intercept of the expanded model equation
    #[serde(default)]
    pub constant: f64,
    /// Fitted AR coefficients, `p` of them
    #[serde(default)]
    pub ar: Vec<f64>,
    /// Fitted MA coefficients, `q` of them
    #[serde(default)]
    pub ma: Vec<f64>,
    /// Innovation variance
    pub sigma2: f64,
    /// Training observations, oldest first
    pub observations: Vec<f64>,
    /// In-sample one-step residuals aligned with the tail of `observations`
    #[serde(default)]
    pub residuals: Vec<f64>,
    /// Fit statistics, if the trainer recorded them
    #[serde(default)]
    pub fit: Option<FitStatistics>,
}

impl ArimaModel {
    /// Check orders against coefficients and that enough history was stored
    pub fn validate(&self) -> Result<()> {
        let (p, _, q) = self.order;
        check_block("ar", &self.ar, p)?;
        check_block("ma", &self.ma, q)?;
        check_scalars(self.constant, self.sigma2)?;
        check_history(&self.expanded(), &self.observations, &self.residuals)
    }

    pub(crate) fn expanded(&self) -> ExpandedModel {
        let (_, d, _) = self.order;
        ExpandedModel {
            ar: multiply(&lag_polynomial(&self.ar, -1.0, 1), &difference_polynomial(d, 1)),
            ma: lag_polynomial(&self.ma, 1.0, 1),
            constant: self.constant,
            sigma2: self.sigma2,
        }
    }
}

impl LoadedModel for ArimaModel {
    fn name(&self) -> String {
        let (p, d, q) = self.order;
        format!("ARIMA({},{},{})", p, d, q)
    }

    fn forecast(&self, horizon: usize) -> Result<ForecastResult> {
        self.expanded()
            .forecast(&self.observations, &self.residuals, horizon, CONFIDENCE_LEVEL)
    }

    fn summary(&self) -> Result<String> {
        let fit = self
            .fit
            .as_ref()
            .ok_or_else(|| ModelError::SummaryUnavailable("no fit statistics stored".to_string()))?;

        let mut params = Vec::new();
        if self.constant != 0.0 {
            params.push(("intercept".to_string(), self.constant));
        }
        params.extend(summary::named_lags("ar", &self.ar, 1));
        params.extend(summary::named_lags("ma", &self.ma, 1));
        params.push(("sigma2".to_string(), self.sigma2));

        Ok(summary::render(&self.name(), fit, &params))
    }
}

pub(crate) fn check_block(label: &str, coefficients: &[f64], order: usize) -> Result<()> {
    if coefficients.len() != order {
        return Err(ModelError::InvalidParameter(format!(
            "order says {} {} coefficients but {} are stored",
            order,
            label,
            coefficients.len()
        )));
    }
    if coefficients.iter().any(|c| !c.is_finite()) {
        return Err(ModelError::InvalidParameter(format!(
            "{} coefficients must be finite",
            label
        )));
    }
    Ok(())
}

pub(crate) fn check_scalars(constant: f64, sigma2: f64) -> Result<()> {
    if !constant.is_finite() {
        return Err(ModelError::InvalidParameter(
            "constant must be finite".to_string(),
        ));
    }
    if !sigma2.is_finite() || sigma2 < 0.0 {
        return Err(ModelError::InvalidParameter(format!(
            "sigma2 must be a non-negative number, got {}",
            sigma2
        )));
    }
    Ok(())
}

pub(crate) fn check_history(
    expanded: &ExpandedModel,
    observations: &[f64],
    residuals: &[f64],
) -> Result<()> {
    let needed = expanded.ar_lags().max(1);
    if observations.len() < needed {
        return Err(ModelError::InvalidParameter(format!(
            "model needs at least {} stored observations, found {}",
            needed,
            observations.len()
        )));
    }
    if residuals.len() < expanded.ma_lags() {
        return Err(ModelError::InvalidParameter(format!(
            "model needs at least {} stored residuals, found {}",
            expanded.ma_lags(),
            residuals.len()
        )));
    }
    if observations.iter().chain(residuals).any(|v| !v.is_finite()) {
        return Err(ModelError::InvalidParameter(
            "stored observations and residuals must be finite".to_string(),
        ));
    }
    Ok(())
}
