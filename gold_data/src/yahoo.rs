//! Yahoo Finance chart API client
//!
//! Only the monthly close is kept; bars with a null close are dropped.

use crate::error::{DataError, Result};
use crate::query::HistoryQuery;
use crate::series::HistoricalSeries;
use crate::PriceSource;
use chrono::{DateTime, NaiveDate, NaiveTime};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

#[derive(Debug, Deserialize)]
struct YahooResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// Blocking Yahoo Finance client
#[derive(Debug, Clone)]
pub struct YahooFinance {
    base_url: String,
    timeout: Duration,
}

impl Default for YahooFinance {
    fn default() -> Self {
        Self::new()
    }
}

impl YahooFinance {
    /// Create a client against the public chart endpoint
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Point the client at another endpoint (mirrors, test servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn unix_midnight(date: NaiveDate) -> i64 {
        date.and_time(NaiveTime::default()).and_utc().timestamp()
    }

    fn build_url(&self, query: &HistoryQuery) -> String {
        format!(
            "{}/{}?period1={}&period2={}&interval=1mo",
            self.base_url,
            query.symbol,
            Self::unix_midnight(query.start),
            Self::unix_midnight(query.end),
        )
    }

    /// Turn a chart API body into a monthly series
    fn parse_response(&self, symbol: &str, json: &str) -> Result<HistoricalSeries> {
        let response: YahooResponse = serde_json::from_str(json)?;

        if let Some(error) = response.chart.error {
            return Err(DataError::ApiError {
                code: error.code,
                description: error.description,
            });
        }

        let results = response
            .chart
            .result
            .ok_or_else(|| DataError::NoData(symbol.to_string()))?;
        let data = results
            .first()
            .ok_or_else(|| DataError::NoData(symbol.to_string()))?;
        let quote = data
            .indicators
            .quote
            .first()
            .ok_or_else(|| DataError::NoData(symbol.to_string()))?;

        let mut bars = Vec::with_capacity(data.timestamp.len());
        for (i, ts) in data.timestamp.iter().enumerate() {
            let date = DateTime::from_timestamp(*ts, 0)
                .ok_or_else(|| DataError::ParseError(format!("timestamp out of range: {}", ts)))?
                .date_naive();
            let close = quote.close.get(i).copied().flatten();
            bars.push((date, close));
        }

        HistoricalSeries::from_monthly_bars(symbol, bars)
    }
}

impl PriceSource for YahooFinance {
    fn fetch(&self, query: &HistoryQuery) -> Result<HistoricalSeries> {
        let url = self.build_url(query);
        debug!(%url, "requesting monthly history");

        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.timeout)
            .build()?;

        let text = client.get(&url).send()?.error_for_status()?.text()?;
        let series = self.parse_response(&query.symbol, &text)?;

        info!(
            symbol = %query.symbol,
            months = series.len(),
            last = %series.last().date,
            "fetched history"
        );
        Ok(series)
    }

    fn name(&self) -> &str {
        "yahoo"
    }
}
