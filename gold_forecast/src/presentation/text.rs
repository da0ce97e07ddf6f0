//! Plain-text rendering of a [`Page`] for non-interactive runs

use super::chart::rasterize;
use super::{
    forecast_heading, forecast_rows, history_rows, NoticeLevel, Page, Section, APP_DESCRIPTION,
    APP_TITLE, FORECAST_COLUMNS, HISTORY_COLUMNS, HISTORY_HEADING, SUMMARY_HEADING,
    SUMMARY_UNAVAILABLE,
};
use std::fmt::Write;

/// What to expand and how large to draw the chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Print every historical row instead of a collapsed heading
    pub show_history: bool,
    /// Print the model summary instead of a collapsed heading
    pub show_summary: bool,
    pub chart_width: u16,
    pub chart_height: u16,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_history: false,
            show_summary: true,
            chart_width: 100,
            chart_height: 28,
        }
    }
}

/// Render a page top to bottom
pub fn render_page(page: &Page, options: &RenderOptions) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", APP_TITLE);
    let _ = writeln!(out, "{}", "=".repeat(APP_TITLE.len()));
    let _ = writeln!(out, "{}", APP_DESCRIPTION);
    let _ = writeln!(
        out,
        "Model: {} ({}) | Forecast horizon: {} months",
        page.controls.model.label(),
        page.controls.model.description(),
        page.controls.horizon
    );

    for section in &page.sections {
        out.push('\n');
        match section {
            Section::History(series) => {
                if options.show_history {
                    let _ = writeln!(out, "v {}", HISTORY_HEADING);
                    out.push_str(&table(&HISTORY_COLUMNS, &history_rows(series)));
                } else {
                    let _ = writeln!(out, "> {} ({} months)", HISTORY_HEADING, series.len());
                }
            }
            Section::Notice(notice) => {
                let tag = match notice.level {
                    NoticeLevel::Success => "[ok]",
                    NoticeLevel::Warning => "[warning]",
                    NoticeLevel::Error => "[error]",
                };
                let _ = writeln!(out, "{} {}", tag, notice.text);
            }
            Section::Forecast(forecast) => {
                let heading = forecast_heading(forecast.len());
                let _ = writeln!(out, "{}", heading);
                let _ = writeln!(out, "{}", "-".repeat(heading.len()));
                out.push_str(&table(&FORECAST_COLUMNS, &forecast_rows(forecast)));
            }
            Section::Chart(chart) => {
                for row in rasterize(chart, options.chart_width, options.chart_height) {
                    let _ = writeln!(out, "{}", row);
                }
            }
            Section::Summary(summary) => match (options.show_summary, summary) {
                (true, Some(text)) => {
                    let _ = writeln!(out, "v {}", SUMMARY_HEADING);
                    out.push_str(text);
                    if !text.ends_with('\n') {
                        out.push('\n');
                    }
                }
                (true, None) => {
                    let _ = writeln!(out, "v {}", SUMMARY_HEADING);
                    let _ = writeln!(out, "[warning] {}", SUMMARY_UNAVAILABLE);
                }
                (false, _) => {
                    let _ = writeln!(out, "> {}", SUMMARY_HEADING);
                }
            },
        }
    }
    out
}

/// Right-aligned columns after a left-aligned first column
fn table<const N: usize>(headers: &[&str; N], rows: &[[String; N]]) -> String {
    let mut widths = headers.map(str::len);
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    let mut line = |cells: Vec<&str>| {
        let mut text = String::new();
        for (i, (cell, width)) in cells.iter().zip(&widths).enumerate() {
            if i == 0 {
                let _ = write!(text, "{:<width$}", cell, width = width);
            } else {
                let _ = write!(text, "  {:>width$}", cell, width = width);
            }
        }
        let _ = writeln!(out, "{}", text.trim_end());
    };

    line(headers.to_vec());
    for row in rows {
        line(row.iter().map(String::as_str).collect());
    }
    out
}
