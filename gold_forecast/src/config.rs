//! Dashboard configuration and user controls

use crate::error::{DashboardError, Result};
use chrono::NaiveDate;
use gold_data::{gold_history_start, HistoryQuery, GOLD_FUTURES_SYMBOL};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Shortest forecast the slider allows
pub const MIN_HORIZON: usize = 1;
/// Longest forecast the slider allows
pub const MAX_HORIZON: usize = 36;
/// Slider position on start-up
pub const DEFAULT_HORIZON: usize = 12;

/// Which pre-trained model artifact to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelChoice {
    /// Non-seasonal model, short-term forecasts
    #[default]
    Arima,
    /// Seasonal model
    Sarima,
}

impl ModelChoice {
    /// Every choice, in selector order
    pub const ALL: [ModelChoice; 2] = [ModelChoice::Arima, ModelChoice::Sarima];

    /// Artifact file name inside the model directory
    pub fn file_name(&self) -> &'static str {
        match self {
            ModelChoice::Arima => "arima_gold_model.json",
            ModelChoice::Sarima => "sarima_gold_model.json",
        }
    }

    /// Label shown to users: the file-name prefix upper-cased
    pub fn label(&self) -> String {
        self.file_name()
            .split('_')
            .next()
            .unwrap_or_default()
            .to_uppercase()
    }

    /// One-line description shown under the selector
    pub fn description(&self) -> &'static str {
        match self {
            ModelChoice::Arima => "Short-term forecasts",
            ModelChoice::Sarima => "Seasonal patterns",
        }
    }

    /// The other choice
    pub fn toggled(&self) -> Self {
        match self {
            ModelChoice::Arima => ModelChoice::Sarima,
            ModelChoice::Sarima => ModelChoice::Arima,
        }
    }
}

impl fmt::Display for ModelChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for ModelChoice {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "arima" | "arima_gold_model.json" => Ok(ModelChoice::Arima),
            "sarima" | "sarima_gold_model.json" => Ok(ModelChoice::Sarima),
            other => Err(format!("unknown model '{}', expected arima or sarima", other)),
        }
    }
}

/// Number of months to forecast, always within `[1, 36]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct ForecastHorizon(usize);

impl ForecastHorizon {
    pub fn new(months: usize) -> Result<Self> {
        if !(MIN_HORIZON..=MAX_HORIZON).contains(&months) {
            return Err(DashboardError::InvalidHorizon {
                value: months,
                min: MIN_HORIZON,
                max: MAX_HORIZON,
            });
        }
        Ok(Self(months))
    }

    /// Clamp any value onto the slider
    pub fn saturating(months: i64) -> Self {
        Self(months.clamp(MIN_HORIZON as i64, MAX_HORIZON as i64) as usize)
    }

    /// Move the slider by `delta` months, stopping at the ends
    pub fn step(&self, delta: i64) -> Self {
        Self::saturating(self.0 as i64 + delta)
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for ForecastHorizon {
    fn default() -> Self {
        Self(DEFAULT_HORIZON)
    }
}

impl TryFrom<usize> for ForecastHorizon {
    type Error = DashboardError;

    fn try_from(value: usize) -> Result<Self> {
        Self::new(value)
    }
}

impl From<ForecastHorizon> for usize {
    fn from(value: ForecastHorizon) -> Self {
        value.0
    }
}

impl fmt::Display for ForecastHorizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Current position of the two user controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Controls {
    pub model: ModelChoice,
    pub horizon: ForecastHorizon,
}

/// Settings for one dashboard session.
///
/// Every field has a default, so an empty JSON object is a valid file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Ticker to chart
    pub symbol: String,
    /// First month of history
    pub start_date: NaiveDate,
    /// Directory holding the model artifacts
    pub model_dir: PathBuf,
    /// Model selected on start-up
    pub default_model: ModelChoice,
    /// Horizon selected on start-up
    pub default_horizon: ForecastHorizon,
    /// Override for the Yahoo chart endpoint
    pub yahoo_base_url: Option<String>,
    /// HTTP timeout for history requests
    pub http_timeout_secs: u64,
    /// Read history from this CSV instead of the network
    pub history_csv: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            symbol: GOLD_FUTURES_SYMBOL.to_string(),
            start_date: gold_history_start(),
            model_dir: PathBuf::from("."),
            default_model: ModelChoice::default(),
            default_horizon: ForecastHorizon::default(),
            yahoo_base_url: None,
            http_timeout_secs: 30,
            history_csv: None,
        }
    }
}

impl DashboardConfig {
    /// Load a JSON config file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            DashboardError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.symbol.trim().is_empty() {
            return Err(DashboardError::Config("symbol must not be empty".to_string()));
        }
        if self.http_timeout_secs == 0 {
            return Err(DashboardError::Config(
                "http_timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// History request for a render on `today`
    pub fn query(&self, today: NaiveDate) -> HistoryQuery {
        HistoryQuery::new(self.symbol.clone(), self.start_date, today)
    }

    /// Controls as they stand before any user input
    pub fn initial_controls(&self) -> Controls {
        Controls {
            model: self.default_model,
            horizon: self.default_horizon,
        }
    }

    /// Artifact path for a model choice
    pub fn model_path(&self, choice: ModelChoice) -> PathBuf {
        self.model_dir.join(choice.file_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_model_choice_labels() {
        assert_eq!(ModelChoice::Arima.label(), "ARIMA");
        assert_eq!(ModelChoice::Sarima.label(), "SARIMA");
        assert_eq!(ModelChoice::Arima.toggled(), ModelChoice::Sarima);
        assert_eq!("SARIMA".parse::<ModelChoice>().unwrap(), ModelChoice::Sarima);
        assert!("prophet".parse::<ModelChoice>().is_err());
    }

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    #[case(12, true)]
    #[case(36, true)]
    #[case(37, false)]
    fn test_horizon_bounds(#[case] months: usize, #[case] ok: bool) {
        assert_eq!(ForecastHorizon::new(months).is_ok(), ok);
    }

    #[test]
    fn test_horizon_step_saturates() {
        let h = ForecastHorizon::default();
        assert_eq!(h.get(), 12);
        assert_eq!(h.step(-100).get(), MIN_HORIZON);
        assert_eq!(h.step(100).get(), MAX_HORIZON);
        assert_eq!(h.step(6).get(), 18);
    }

    #[test]
    fn test_empty_json_is_default_config() {
        let config: DashboardConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.symbol, "GC=F");
        assert_eq!(config.start_date, NaiveDate::from_ymd_opt(2005, 1, 1).unwrap());
    }

    #[test]
    fn test_config_rejects_out_of_range_horizon() {
        let result: std::result::Result<DashboardConfig, _> =
            serde_json::from_str(r#"{"default_horizon": 48}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_model_path_and_query() {
        let config = DashboardConfig {
            model_dir: PathBuf::from("/srv/models"),
            ..DashboardConfig::default()
        };
        assert_eq!(
            config.model_path(ModelChoice::Sarima),
            PathBuf::from("/srv/models/sarima_gold_model.json")
        );

        let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let query = config.query(today);
        assert_eq!(query, HistoryQuery::gold(today));
    }
}
