mod common;

use common::{gold_history, random_walk_artifact, today, write_artifact, StubSource};
use gold_forecast::{
    render_page, ControlEvent, Dashboard, DashboardConfig, ForecastHorizon, ModelChoice,
    RenderOptions,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn three_month_page_text(options: &RenderOptions) -> String {
    let dir = TempDir::new().unwrap();
    write_artifact(dir.path(), ModelChoice::Arima, &random_walk_artifact());
    let config = DashboardConfig {
        model_dir: dir.path().to_path_buf(),
        ..DashboardConfig::default()
    };
    let mut dashboard = Dashboard::new(StubSource::new(gold_history()), config);
    let horizon = ForecastHorizon::new(3).unwrap();
    let outcome = dashboard.handle(ControlEvent::SetHorizon(horizon), today());
    render_page(&outcome.page, options)
}

#[test]
fn test_forecast_table_is_currency_formatted() {
    let text = three_month_page_text(&RenderOptions::default());

    let start = text.find("3-Month Forecast").expect("forecast heading");
    let table: Vec<&str> = text[start..].lines().take(6).collect();
    assert_eq!(
        table,
        vec![
            "3-Month Forecast",
            "----------------",
            "Date         Forecast   Lower CI   Upper CI",
            "2025-01-01  $2,050.00  $2,030.40  $2,069.60",
            "2025-02-01  $2,050.00  $2,022.28  $2,077.72",
            "2025-03-01  $2,050.00  $2,016.05  $2,083.95",
        ]
    );
}

#[test]
fn test_sections_render_in_order() {
    let text = three_month_page_text(&RenderOptions::default());

    let positions: Vec<usize> = [
        "> View Historical Gold Prices (24 months)",
        "[ok] Loaded ARIMA model",
        "3-Month Forecast",
        "Gold Price Forecast - ARIMA",
        "v Model Summary",
        "[warning] Model summary not available",
    ]
    .iter()
    .map(|needle| text.find(needle).unwrap_or_else(|| panic!("missing {:?}", needle)))
    .collect();

    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{:?}", positions);
    assert!(text.contains("Model: ARIMA (Short-term forecasts) | Forecast horizon: 3 months"));
}

#[test]
fn test_expanded_history_lists_every_month() {
    let options = RenderOptions {
        show_history: true,
        show_summary: false,
        ..RenderOptions::default()
    };
    let text = three_month_page_text(&options);

    assert!(text.contains("v View Historical Gold Prices"));
    assert!(text.contains("2023-01-01  $1,800.00"));
    assert!(text.contains("2024-12-01  $2,050.00"));
    assert!(text.contains("> Model Summary"));
    assert!(!text.contains("Model summary not available"));
}
