//! Lag-polynomial arithmetic shared by the ARIMA and SARIMA adapters.
//!
//! A polynomial in the backshift operator `B` is stored as its coefficient
//! vector with `c[0] == 1`. Both adapters reduce to one expanded equation
//!
//! ```text
//! P(B) y_t = constant + M(B) e_t
//! ```
//!
//! where `P` folds in the AR, seasonal AR and both differencing factors and
//! `M` folds in the MA and seasonal MA factors.

use crate::error::{ModelError, Result};
use crate::forecast::ForecastResult;
use statrs::distribution::{ContinuousCDF, Normal};

/// Product of two lag polynomials
pub fn multiply(a: &[f64], b: &[f64]) -> Vec<f64> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }

    let mut out = vec![0.0; a.len() + b.len() - 1];
    for (i, x) in a.iter().enumerate() {
        for (j, y) in b.iter().enumerate() {
            out[i + j] += x * y;
        }
    }
    out
}

/// `1 + sign * (c_1 B^step + c_2 B^{2 step} + ...)`
pub fn lag_polynomial(coefficients: &[f64], sign: f64, step: usize) -> Vec<f64> {
    let mut poly = vec![0.0; coefficients.len() * step + 1];
    poly[0] = 1.0;
    for (i, c) in coefficients.iter().enumerate() {
        poly[(i + 1) * step] = sign * c;
    }
    poly
}

/// `(1 - B^step)^order`
pub fn difference_polynomial(order: usize, step: usize) -> Vec<f64> {
    let mut factor = vec![0.0; step + 1];
    factor[0] = 1.0;
    factor[step] = -1.0;

    (0..order).fold(vec![1.0], |acc, _| multiply(&acc, &factor))
}

/// Two-sided normal critical value for a confidence level, e.g. 1.96 for 0.95
pub fn normal_critical_value(confidence_level: f64) -> Result<f64> {
    if !(confidence_level > 0.0 && confidence_level < 1.0) {
        return Err(ModelError::InvalidParameter(format!(
            "confidence level must be between 0 and 1, got {}",
            confidence_level
        )));
    }

    let normal = Normal::new(0.0, 1.0).map_err(|e| ModelError::ForecastingError(e.to_string()))?;
    Ok(normal.inverse_cdf(0.5 + confidence_level / 2.0))
}

/// Fully expanded model equation
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandedModel {
    /// `P(B)`, AR side including differencing
    pub ar: Vec<f64>,
    /// `M(B)`, MA side
    pub ma: Vec<f64>,
    pub constant: f64,
    /// Innovation variance
    pub sigma2: f64,
}

impl ExpandedModel {
    /// Observations the recursion needs to start
    pub fn ar_lags(&self) -> usize {
        self.ar.len().saturating_sub(1)
    }

    /// Residuals the recursion needs to start
    pub fn ma_lags(&self) -> usize {
        self.ma.len().saturating_sub(1)
    }

    /// MA(∞) weights `psi_0 .. psi_{n-1}` solving `P(B) psi(B) = M(B)`
    pub fn psi_weights(&self, n: usize) -> Vec<f64> {
        let mut psi = Vec::with_capacity(n);
        for j in 0..n {
            if j == 0 {
                psi.push(1.0);
                continue;
            }
            let mut value = self.ma.get(j).copied().unwrap_or(0.0);
            for i in 1..=j.min(self.ar_lags()) {
                value -= self.ar[i] * psi[j - i];
            }
            psi.push(value);
        }
        psi
    }

    /// Multi-step forecast with symmetric normal bounds.
    ///
    /// `observations` and `residuals` are the in-sample history, oldest
    /// first, aligned at their last element. Future shocks are zero.
    pub fn forecast(
        &self,
        observations: &[f64],
        residuals: &[f64],
        horizon: usize,
        confidence_level: f64,
    ) -> Result<ForecastResult> {
        if horizon == 0 {
            return Err(ModelError::InvalidParameter(
                "forecast horizon must be at least 1".to_string(),
            ));
        }
        if observations.len() < self.ar_lags().max(1) {
            return Err(ModelError::ForecastingError(format!(
                "need {} observations to forecast, model stores {}",
                self.ar_lags().max(1),
                observations.len()
            )));
        }
        if residuals.len() < self.ma_lags() {
            return Err(ModelError::ForecastingError(format!(
                "need {} residuals to forecast, model stores {}",
                self.ma_lags(),
                residuals.len()
            )));
        }

        let mut y = observations.to_vec();
        let mut e = residuals.to_vec();
        let mut values = Vec::with_capacity(horizon);

        for _ in 0..horizon {
            let mut next = self.constant;
            for i in 1..=self.ar_lags() {
                next -= self.ar[i] * y[y.len() - i];
            }
            for j in 1..=self.ma_lags() {
                next += self.ma[j] * e[e.len() - j];
            }
            y.push(next);
            e.push(0.0);
            values.push(next);
        }

        let z = normal_critical_value(confidence_level)?;
        let psi = self.psi_weights(horizon);
        let mut cumulative = 0.0;
        let mut lower = Vec::with_capacity(horizon);
        let mut upper = Vec::with_capacity(horizon);
        for (h, mean) in values.iter().enumerate() {
            cumulative += psi[h] * psi[h];
            let margin = z * (self.sigma2 * cumulative).sqrt();
            lower.push(mean - margin);
            upper.push(mean + margin);
        }

        ForecastResult::new_with_intervals(values, lower, upper, confidence_level)
    }
}
