//! History queries

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Yahoo ticker for COMEX gold futures
pub const GOLD_FUTURES_SYMBOL: &str = "GC=F";

/// First month of the gold history the dashboard shows
pub fn gold_history_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2005, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Parameters identifying one monthly history request.
///
/// Two equal queries must produce the same series, which is what makes
/// this usable as a cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HistoryQuery {
    /// Ticker symbol
    pub symbol: String,
    /// First day requested (inclusive)
    pub start: NaiveDate,
    /// Last day requested (exclusive upstream, so "today" yields up to the current month)
    pub end: NaiveDate,
}

impl HistoryQuery {
    pub fn new(symbol: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            symbol: symbol.into(),
            start,
            end,
        }
    }

    /// Monthly gold futures from 2005-01-01 through `today`
    pub fn gold(today: NaiveDate) -> Self {
        Self::new(GOLD_FUTURES_SYMBOL, gold_history_start(), today)
    }
}

impl fmt::Display for HistoryQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}..{} (1mo)", self.symbol, self.start, self.end)
    }
}
