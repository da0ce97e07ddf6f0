//! Seasonal ARIMA models

use crate::arima::{check_block, check_history, check_scalars};
use crate::error::{ModelError, Result};
use crate::polynomial::{difference_polynomial, lag_polynomial, multiply, ExpandedModel};
use crate::summary::{self, FitStatistics};
use crate::{ForecastResult, LoadedModel, CONFIDENCE_LEVEL};
use serde::{Deserialize, Serialize};

/// Fitted SARIMA(p, d, q)(P, D, Q, s) model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SarimaModel {
    /// Non-seasonal orders `(p, d, q)`
    pub order: (usize, usize, usize),
    /// Seasonal orders `(P, D, Q, s)`
    pub seasonal_order: (usize, usize, usize, usize),
    /// Intercept of the expanded model equation
    #[serde(default)]
    pub constant: f64,
    #[serde(default)]
    pub ar: Vec<f64>,
    #[serde(default)]
    pub ma: Vec<f64>,
    #[serde(default)]
    pub seasonal_ar: Vec<f64>,
    #[serde(default)]
    pub seasonal_ma: Vec<f64>,
    /// Innovation variance
    pub sigma2: f64,
    /// Training observations, oldest first
    pub observations: Vec<f64>,
    /// In-sample one-step residuals aligned with the tail of `observations`
    #[serde(default)]
    pub residuals: Vec<f64>,
    #[serde(default)]
    pub fit: Option<FitStatistics>,
}

impl SarimaModel {
    /// Check orders against coefficients and that enough history was stored
    pub fn validate(&self) -> Result<()> {
        let (p, _, q) = self.order;
        let (sp, sd, sq, period) = self.seasonal_order;

        if period < 2 && sp + sd + sq > 0 {
            return Err(ModelError::InvalidParameter(format!(
                "seasonal period must be at least 2, got {}",
                period
            )));
        }

        check_block("ar", &self.ar, p)?;
        check_block("ma", &self.ma, q)?;
        check_block("seasonal ar", &self.seasonal_ar, sp)?;
        check_block("seasonal ma", &self.seasonal_ma, sq)?;
        check_scalars(self.constant, self.sigma2)?;
        check_history(&self.expanded(), &self.observations, &self.residuals)
    }

    pub(crate) fn expanded(&self) -> ExpandedModel {
        let (_, d, _) = self.order;
        let (_, sd, _, period) = self.seasonal_order;
        let step = period.max(1);

        let ar = [
            lag_polynomial(&self.seasonal_ar, -1.0, step),
            difference_polynomial(d, 1),
            difference_polynomial(sd, step),
        ]
        .iter()
        .fold(lag_polynomial(&self.ar, -1.0, 1), |acc, factor| multiply(&acc, factor));

        let ma = multiply(
            &lag_polynomial(&self.ma, 1.0, 1),
            &lag_polynomial(&self.seasonal_ma, 1.0, step),
        );

        ExpandedModel {
            ar,
            ma,
            constant: self.constant,
            sigma2: self.sigma2,
        }
    }
}

impl LoadedModel for SarimaModel {
    fn name(&self) -> String {
        let (p, d, q) = self.order;
        let (sp, sd, sq, s) = self.seasonal_order;
        format!("SARIMA({},{},{})x({},{},{},{})", p, d, q, sp, sd, sq, s)
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
        let period = self.seasonal_order.3;

        let mut params = Vec::new();
        if self.constant != 0.0 {
            params.push(("intercept".to_string(), self.constant));
        }
        params.extend(summary::named_lags("ar", &self.ar, 1));
        params.extend(summary::named_lags("ma", &self.ma, 1));
        params.extend(summary::named_lags("ar", &self.seasonal_ar, period));
        params.extend(summary::named_lags("ma", &self.seasonal_ma, period));
        params.push(("sigma2".to_string(), self.sigma2));

        Ok(summary::render(&self.name(), fit, &params))
    }
}
