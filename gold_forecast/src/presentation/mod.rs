//! Page model shared by the plain-text renderer and the terminal dashboard

pub mod chart;
pub mod text;

use crate::assembler::ForecastTable;
use crate::config::Controls;
use gold_data::HistoricalSeries;
use std::sync::Arc;

pub use chart::ForecastChart;

/// App title shown at the top of every page
pub const APP_TITLE: &str = "Gold Price Forecasting App";
/// Description under the title
pub const APP_DESCRIPTION: &str =
    "This app forecasts gold prices using time series models (ARIMA/SARIMA).";
/// Heading of the collapsible history section
pub const HISTORY_HEADING: &str = "View Historical Gold Prices";
/// Heading of the collapsible summary section
pub const SUMMARY_HEADING: &str = "Model Summary";
/// Warning shown when the model has no summary
pub const SUMMARY_UNAVAILABLE: &str = "Model summary not available";

/// Severity of a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// A one-line status message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, text: text.into() }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, text: text.into() }
    }
}

/// One block of the page, in display order
#[derive(Debug, Clone)]
pub enum Section {
    /// Collapsible historical price table
    History(Arc<HistoricalSeries>),
    /// Success or error indicator
    Notice(Notice),
    /// The forecast table under its heading
    Forecast(ForecastTable),
    /// History, forecast and band overlaid
    Chart(ForecastChart),
    /// Collapsible model summary; `None` renders the unavailable warning
    Summary(Option<String>),
}

/// Everything one render cycle produced
#[derive(Debug, Clone, Default)]
pub struct Page {
    /// Controls the page was rendered for
    pub controls: Controls,
    pub sections: Vec<Section>,
}

impl Page {
    pub fn new(controls: Controls) -> Self {
        Self {
            controls,
            sections: Vec::new(),
        }
    }

    pub fn push(&mut self, section: Section) {
        self.sections.push(section);
    }

    pub fn history(&self) -> Option<&HistoricalSeries> {
        self.sections.iter().find_map(|s| match s {
            Section::History(series) => Some(series.as_ref()),
            _ => None,
        })
    }

    pub fn notices(&self) -> Vec<&Notice> {
        self.sections
            .iter()
            .filter_map(|s| match s {
                Section::Notice(notice) => Some(notice),
                _ => None,
            })
            .collect()
    }

    /// First error message on the page
    pub fn error(&self) -> Option<&str> {
        self.notices()
            .into_iter()
            .find(|n| n.level == NoticeLevel::Error)
            .map(|n| n.text.as_str())
    }

    pub fn forecast(&self) -> Option<&ForecastTable> {
        self.sections.iter().find_map(|s| match s {
            Section::Forecast(table) => Some(table),
            _ => None,
        })
    }

    pub fn chart(&self) -> Option<&ForecastChart> {
        self.sections.iter().find_map(|s| match s {
            Section::Chart(chart) => Some(chart),
            _ => None,
        })
    }

    /// `Some(None)` when the section exists but shows the warning
    pub fn summary(&self) -> Option<Option<&str>> {
        self.sections.iter().find_map(|s| match s {
            Section::Summary(text) => Some(text.as_deref()),
            _ => None,
        })
    }
}

/// Heading above the forecast table
pub fn forecast_heading(months: usize) -> String {
    format!("{}-Month Forecast", months)
}

/// `$1,234.56`, with the sign after the dollar for negatives (`$-5.00`)
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return format!("${}", value);
    }

    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("${}{}.{}", sign, grouped, cents)
}

/// Rows of the historical table: date and formatted price
pub fn history_rows(series: &HistoricalSeries) -> Vec<[String; 2]> {
    series
        .points()
        .iter()
        .map(|p| [p.date.to_string(), format_currency(p.price)])
        .collect()
}

/// Column headers of the historical table
pub const HISTORY_COLUMNS: [&str; 2] = ["Date", "Price"];

/// Rows of the forecast table, currency formatted per column
pub fn forecast_rows(table: &ForecastTable) -> Vec<[String; 4]> {
    table
        .rows()
        .iter()
        .map(|r| {
            [
                r.date.to_string(),
                format_currency(r.forecast),
                format_currency(r.lower),
                format_currency(r.upper),
            ]
        })
        .collect()
}

/// Column headers of the forecast table
pub const FORECAST_COLUMNS: [&str; 4] = ["Date", "Forecast", "Lower CI", "Upper CI"];

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, "$0.00")]
    #[case(5.0, "$5.00")]
    #[case(999.999, "$1,000.00")]
    #[case(2050.0, "$2,050.00")]
    #[case(1234567.891, "$1,234,567.89")]
    #[case(-5.0, "$-5.00")]
    #[case(-1234.5, "$-1,234.50")]
    #[case(-0.001, "$0.00")]
    fn test_format_currency(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(format_currency(value), expected);
    }

    #[test]
    fn test_forecast_heading() {
        assert_eq!(forecast_heading(3), "3-Month Forecast");
    }
}
