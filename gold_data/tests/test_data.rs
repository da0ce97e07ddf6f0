use approx::assert_relative_eq;
use chrono::NaiveDate;
use gold_data::{CsvSource, DataError, DataLoader, FetchCache, HistoryQuery, PriceSource};
use rstest::rstest;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn write_csv(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file
}

#[test]
fn test_data_loader_from_yfinance_style_csv() {
    let file = write_csv(&[
        "Date,Open,High,Low,Close,Adj Close,Volume",
        "2024-10-01,2650.0,2790.0,2600.0,2744.0,2700.0,100",
        "2024-11-01,2744.0,2800.0,2540.0,2657.0,2600.0,120",
        "2024-12-01,2657.0,2720.0,2590.0,2050.0,2000.0,130",
    ]);

    let series = DataLoader::from_csv(file.path(), "GC=F").unwrap();

    assert_eq!(series.len(), 3);
    assert_eq!(series.symbol(), "GC=F");
    assert_eq!(series.last().date, date(2024, 12, 1));
    assert_relative_eq!(series.last().price, 2050.0);
}

#[test]
fn test_data_loader_price_column_and_gaps() {
    let file = write_csv(&[
        "date,price",
        "2023-01-01,1900.5",
        "2023-02-01,",
        "2023-03-01 00:00:00,1950",
    ]);

    let series = DataLoader::from_csv(file.path(), "GC=F").unwrap();

    assert_eq!(series.dates(), vec![date(2023, 1, 1), date(2023, 3, 1)]);
    let prices = series.prices();
    assert_eq!(prices.len(), 2);
    assert_relative_eq!(prices[0], 1900.5);
    assert_relative_eq!(prices[1], 1950.0);
}

#[rstest]
#[case(&["invalid,csv,format", "1,2,3"])]
#[case(&["date,volume", "2023-01-01,10"])]
fn test_data_loader_rejects_unusable_files(#[case] lines: &[&str]) {
    let file = write_csv(lines);
    assert!(DataLoader::from_csv(file.path(), "GC=F").is_err());
}

#[test]
fn test_data_loader_missing_file() {
    let result = DataLoader::from_csv("nonexistent_file.csv", "GC=F");
    assert!(matches!(result, Err(DataError::IoError(_))));
}

#[test]
fn test_csv_source_clips_to_query() {
    let file = write_csv(&[
        "Date,Close",
        "2004-11-01,430.0",
        "2004-12-01,438.0",
        "2005-01-01,422.0",
        "2005-02-01,435.0",
    ]);
    let source = CsvSource::new(file.path());

    let series = source.fetch(&HistoryQuery::gold(date(2024, 12, 1))).unwrap();

    assert_eq!(series.len(), 2);
    assert_eq!(series.first().date, date(2005, 1, 1));
    assert_eq!(source.name(), "csv");
}

#[test]
fn test_cached_csv_history_is_identical_on_reuse() {
    let file = write_csv(&["Date,Close", "2024-11-01,2657.0", "2024-12-01,2050.0"]);
    let mut cache = FetchCache::new(CsvSource::new(file.path()));
    let query = HistoryQuery::gold(date(2024, 12, 20));

    let first = cache.get(&query).unwrap();
    let second = cache.get(&query).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.points(), second.points());
}
