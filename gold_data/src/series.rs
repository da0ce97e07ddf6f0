//! Monthly price history

use crate::error::{DataError, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single monthly observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// First day of the month the bar belongs to
    pub date: NaiveDate,
    /// Closing price
    pub price: f64,
}

/// Ordered, null-free monthly closing prices for one symbol.
///
/// Dates are strictly increasing and the series is never empty, so
/// [`HistoricalSeries::last`] always has an answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSeries")]
pub struct HistoricalSeries {
    symbol: String,
    points: Vec<PricePoint>,
}

/// Unchecked wire form, validated on the way in
#[derive(Deserialize)]
struct RawSeries {
    symbol: String,
    points: Vec<PricePoint>,
}

impl TryFrom<RawSeries> for HistoricalSeries {
    type Error = DataError;

    fn try_from(raw: RawSeries) -> Result<Self> {
        Self::new(raw.symbol, raw.points)
    }
}

/// Move a date to the first day of its month
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

impl HistoricalSeries {
    /// Create a series from points that are already clean.
    ///
    /// Fails if the points are empty, not strictly ascending, or carry a
    /// non-finite price.
    pub fn new(symbol: impl Into<String>, points: Vec<PricePoint>) -> Result<Self> {
        let symbol = symbol.into();
        if points.is_empty() {
            return Err(DataError::NoData(symbol));
        }

        if let Some(bad) = points.iter().find(|p| !p.price.is_finite()) {
            return Err(DataError::InvalidSeries(format!(
                "non-finite price on {}",
                bad.date
            )));
        }

        if let Some(pair) = points.windows(2).find(|w| w[1].date <= w[0].date) {
            return Err(DataError::InvalidSeries(format!(
                "dates must be strictly increasing ({} then {})",
                pair[0].date, pair[1].date
            )));
        }

        Ok(Self { symbol, points })
    }

    /// Build a series from raw monthly bars.
    ///
    /// Bars with a missing or non-finite close are dropped, each date is
    /// moved to the start of its month, and when two bars land in the same
    /// month the later one in input order wins.
    pub fn from_monthly_bars<I>(symbol: impl Into<String>, bars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (NaiveDate, Option<f64>)>,
    {
        let mut by_month = BTreeMap::new();
        for (date, close) in bars {
            if let Some(price) = close.filter(|p| p.is_finite()) {
                by_month.insert(month_start(date), price);
            }
        }

        let points = by_month
            .into_iter()
            .map(|(date, price)| PricePoint { date, price })
            .collect();

        Self::new(symbol, points)
    }

    /// Keep only the months in `[start, end]`
    pub fn clip(&self, start: NaiveDate, end: NaiveDate) -> Result<Self> {
        let start = month_start(start);
        let points = self
            .points
            .iter()
            .filter(|p| p.date >= start && p.date <= end)
            .copied()
            .collect();
        Self::new(self.symbol.clone(), points)
    }

    /// Ticker the prices belong to
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a constructed series
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    pub fn first(&self) -> &PricePoint {
        &self.points[0]
    }

    /// Most recent observation
    pub fn last(&self) -> &PricePoint {
        &self.points[self.points.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_from_monthly_bars_drops_nulls_and_dedupes() {
        let bars = vec![
            (date(2024, 2, 1), Some(2050.0)),
            (date(2024, 1, 1), Some(2040.0)),
            (date(2024, 3, 1), None),
            (date(2024, 2, 19), Some(2061.5)),
            (date(2024, 4, 1), Some(f64::NAN)),
        ];

        let series = HistoricalSeries::from_monthly_bars("GC=F", bars).unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series.dates(), vec![date(2024, 1, 1), date(2024, 2, 1)]);
        assert_eq!(series.prices(), vec![2040.0, 2061.5]);
    }

    #[test]
    fn test_new_rejects_unordered_points() {
        let points = vec![
            PricePoint { date: date(2024, 2, 1), price: 1.0 },
            PricePoint { date: date(2024, 1, 1), price: 2.0 },
        ];
        let result = HistoricalSeries::new("GC=F", points);
        assert!(matches!(result, Err(DataError::InvalidSeries(_))));
    }

    #[test]
    fn test_new_rejects_empty() {
        let result = HistoricalSeries::new("GC=F", Vec::new());
        assert!(matches!(result, Err(DataError::NoData(_))));
    }

    #[test]
    fn test_clip_to_months() {
        let bars = (1..=12).map(|m| (date(2023, m, 1), Some(1800.0 + m as f64)));
        let series = HistoricalSeries::from_monthly_bars("GC=F", bars).unwrap();

        let clipped = series.clip(date(2023, 3, 15), date(2023, 5, 1)).unwrap();
        assert_eq!(clipped.len(), 3);
        assert_eq!(clipped.first().date, date(2023, 3, 1));
        assert_eq!(clipped.last().date, date(2023, 5, 1));
        assert_eq!(clipped.prices(), vec![1803.0, 1804.0, 1805.0]);
    }

    #[test]
    fn test_deserialize_validates_points() {
        let empty = serde_json::from_str::<HistoricalSeries>(r#"{"symbol": "GC=F", "points": []}"#);
        assert!(empty.is_err());

        let unordered = r#"{"symbol": "GC=F", "points": [
            {"date": "2024-02-01", "price": 1.0},
            {"date": "2024-01-01", "price": 2.0}
        ]}"#;
        assert!(serde_json::from_str::<HistoricalSeries>(unordered).is_err());

        let series = HistoricalSeries::new(
            "GC=F",
            vec![PricePoint { date: date(2024, 1, 1), price: 2040.0 }],
        )
        .unwrap();
        let json = serde_json::to_string(&series).unwrap();
        assert_eq!(serde_json::from_str::<HistoricalSeries>(&json).unwrap(), series);
    }
}
