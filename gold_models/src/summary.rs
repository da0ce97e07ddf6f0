//! Plain-text model summaries

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

const RULE_WIDTH: usize = 78;

/// Goodness-of-fit statistics recorded when the model was trained
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitStatistics {
    /// Number of observations used in the fit
    pub nobs: usize,
    pub log_likelihood: f64,
    pub aic: f64,
    pub bic: f64,
    #[serde(default)]
    pub sample_start: Option<NaiveDate>,
    #[serde(default)]
    pub sample_end: Option<NaiveDate>,
}

/// Name the parameters of one lag-coefficient block, e.g. `ar.L1`, `ma.S.L12`
pub(crate) fn named_lags(prefix: &str, coefficients: &[f64], step: usize) -> Vec<(String, f64)> {
    coefficients
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let lag = (i + 1) * step;
            let name = if step > 1 {
                format!("{}.S.L{}", prefix, lag)
            } else {
                format!("{}.L{}", prefix, lag)
            };
            (name, *c)
        })
        .collect()
}

/// Render the results table shown in the dashboard's summary section
pub(crate) fn render(model_name: &str, fit: &FitStatistics, params: &[(String, f64)]) -> String {
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);
    let sample = |d: Option<NaiveDate>| d.map(|d| d.to_string()).unwrap_or_else(|| "?".to_string());

    let mut out = String::new();
    let _ = writeln!(out, "{:^width$}", "Model Results", width = RULE_WIDTH);
    let _ = writeln!(out, "{}", heavy);
    let _ = writeln!(
        out,
        "{:<14}{:>24}   {:<22}{:>15}",
        "Model:", model_name, "No. Observations:", fit.nobs
    );
    let _ = writeln!(
        out,
        "{:<14}{:>24}   {:<22}{:>15.3}",
        "Sample:",
        sample(fit.sample_start),
        "Log Likelihood",
        fit.log_likelihood
    );
    let _ = writeln!(
        out,
        "{:<14}{:>24}   {:<22}{:>15.3}",
        "",
        format!("- {}", sample(fit.sample_end)),
        "AIC",
        fit.aic
    );
    let _ = writeln!(out, "{:<14}{:>24}   {:<22}{:>15.3}", "", "", "BIC", fit.bic);
    let _ = writeln!(out, "{}", heavy);
    let _ = writeln!(out, "{:<20}{:>14}", "", "coef");
    let _ = writeln!(out, "{}", light);
    for (name, value) in params {
        let _ = writeln!(out, "{:<20}{:>14.4}", name, value);
    }
    let _ = write!(out, "{}", heavy);
    out
}
