//! Forecast chart widget: history line, dashed forecast, shaded band

use crate::assembler::ForecastTable;
use chrono::{Datelike, NaiveDate};
use gold_data::HistoricalSeries;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Widget},
};

/// Braille pixels drawn, then skipped, along the forecast line
const DASH_PIXELS: usize = 4;
const X_LABELS: usize = 5;
const Y_LABELS: usize = 3;

/// Chart data in plot coordinates.
///
/// `x` is a month position (`year * 12 + month0`), so one unit is one month.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastChart {
    title: String,
    history: Vec<(f64, f64)>,
    forecast: Vec<(f64, f64)>,
    lower: Vec<(f64, f64)>,
    upper: Vec<(f64, f64)>,
}

/// Plot x coordinate of a date
pub fn month_position(date: NaiveDate) -> f64 {
    (date.year() * 12 + date.month0() as i32) as f64 + date.day0() as f64 / 31.0
}

/// `YYYY-MM` for the month nearest to `position`
pub fn month_label(position: f64) -> String {
    let index = position.round() as i32;
    format!("{:04}-{:02}", index.div_euclid(12), index.rem_euclid(12) + 1)
}

impl ForecastChart {
    pub fn new(label: &str, history: &HistoricalSeries, table: &ForecastTable) -> Self {
        let at = |date: NaiveDate, value: f64| (month_position(date), value);
        Self {
            title: format!("Gold Price Forecast - {}", label),
            history: history.points().iter().map(|p| at(p.date, p.price)).collect(),
            forecast: table.rows().iter().map(|r| at(r.date, r.forecast)).collect(),
            lower: table.rows().iter().map(|r| at(r.date, r.lower)).collect(),
            upper: table.rows().iter().map(|r| at(r.date, r.upper)).collect(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn history(&self) -> &[(f64, f64)] {
        &self.history
    }

    pub fn forecast(&self) -> &[(f64, f64)] {
        &self.forecast
    }

    pub fn x_bounds(&self) -> [f64; 2] {
        let xs = self.history.iter().chain(&self.forecast).map(|(x, _)| *x);
        let (min, max) = xs.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
            (lo.min(x), hi.max(x))
        });
        if !min.is_finite() {
            return [0.0, 1.0];
        }
        if max - min < 1.0 {
            return [min - 0.5, max + 0.5];
        }
        [min, max]
    }

    /// Value range of every series with a 5% margin
    pub fn y_bounds(&self) -> [f64; 2] {
        let ys = self
            .history
            .iter()
            .chain(&self.forecast)
            .chain(&self.lower)
            .chain(&self.upper)
            .map(|(_, y)| *y)
            .filter(|y| y.is_finite());
        let (min, max) = ys.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
            (lo.min(y), hi.max(y))
        });
        if !min.is_finite() {
            return [0.0, 1.0];
        }
        let pad = if max > min { (max - min) * 0.05 } else { 1.0 };
        [min - pad, max + pad]
    }

    /// Points filling the area between the bounds, one or more per cell
    fn band_points(&self, cols: f64, rows: f64) -> Vec<(f64, f64)> {
        let (Some(first), Some(last)) = (self.lower.first(), self.lower.last()) else {
            return Vec::new();
        };
        let [x_min, x_max] = self.x_bounds();
        let [y_min, y_max] = self.y_bounds();
        let dx = (x_max - x_min) / cols / 2.0;
        let dy = (y_max - y_min) / rows / 2.0;
        if !(dx > 0.0 && dy > 0.0 && dx.is_finite() && dy.is_finite()) {
            return Vec::new();
        }

        let mut points = Vec::new();
        let mut x = first.0;
        while x <= last.0 + f64::EPSILON {
            let low = interpolate(&self.lower, x);
            let high = interpolate(&self.upper, x);
            if !(low.is_finite() && high.is_finite()) {
                x += dx;
                continue;
            }
            let steps = ((high - low) / dy).floor();
            if steps >= 0.0 {
                points.extend((0..=steps as usize).map(|i| (x, low + i as f64 * dy)));
            }
            points.push((x, high));
            x += dx;
        }
        points
    }

    /// Forecast polyline sampled per braille pixel with every other run dropped
    fn dashed_forecast(&self, cols: f64) -> Vec<(f64, f64)> {
        if self.forecast.len() < 2 {
            return self.forecast.clone();
        }
        let [x_min, x_max] = self.x_bounds();
        let dx = (x_max - x_min) / (cols * 2.0);
        let (start, end) = (self.forecast[0].0, self.forecast[self.forecast.len() - 1].0);

        let mut points = Vec::new();
        let mut pixel = 0;
        let mut x = start;
        while x <= end {
            if (pixel / DASH_PIXELS) % 2 == 0 {
                points.push((x, interpolate(&self.forecast, x)));
            }
            pixel += 1;
            x += dx;
        }
        points
    }
}

/// Linear interpolation along a polyline sorted by x
fn interpolate(points: &[(f64, f64)], x: f64) -> f64 {
    match points {
        [] => f64::NAN,
        [only] => only.1,
        _ => {
            let segment = points
                .windows(2)
                .find(|w| x <= w[1].0)
                .unwrap_or(&points[points.len() - 2..]);
            let (x0, y0) = segment[0];
            let (x1, y1) = segment[1];
            if (x1 - x0).abs() < f64::EPSILON {
                return y0;
            }
            let t = ((x - x0) / (x1 - x0)).clamp(0.0, 1.0);
            y0 + t * (y1 - y0)
        }
    }
}

fn spread(bounds: [f64; 2], count: usize) -> impl Iterator<Item = f64> {
    let step = (bounds[1] - bounds[0]) / (count - 1) as f64;
    (0..count).map(move |i| bounds[0] + step * i as f64)
}

impl Widget for &ForecastChart {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let cols = f64::from(area.width.saturating_sub(2).max(1));
        let rows = f64::from(area.height.saturating_sub(2).max(1));
        let band = self.band_points(cols, rows);
        let dashes = self.dashed_forecast(cols);

        let datasets = vec![
            Dataset::default()
                .name("95% Confidence Interval")
                .marker(Marker::Block)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(Color::DarkGray))
                .data(&band),
            Dataset::default()
                .name("Historical")
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Yellow))
                .data(&self.history),
            Dataset::default()
                .name("Forecast")
                .marker(Marker::Braille)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(Color::Red))
                .data(&dashes),
        ];

        let x_bounds = self.x_bounds();
        let y_bounds = self.y_bounds();
        let months = (x_bounds[1] - x_bounds[0]).round() as usize + 1;
        let x_labels = spread(x_bounds, X_LABELS.min(months).max(2))
            .map(|x| Span::raw(month_label(x)))
            .collect();
        let y_labels = spread(y_bounds, Y_LABELS)
            .map(|y| Span::raw(format!("{:.0}", y)))
            .collect();

        Chart::new(datasets)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", self.title)),
            )
            .x_axis(
                Axis::default()
                    .title("Date")
                    .style(Style::default().fg(Color::Gray))
                    .bounds(x_bounds)
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .title("Price (USD)")
                    .style(Style::default().fg(Color::Gray))
                    .bounds(y_bounds)
                    .labels(y_labels),
            )
            .hidden_legend_constraints((Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)))
            .render(area, buf);
    }
}

/// Draw `chart` into an off-screen buffer and return its rows as text
pub fn rasterize(chart: &ForecastChart, width: u16, height: u16) -> Vec<String> {
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    chart.render(area, &mut buf);

    (0..height)
        .map(|y| {
            let row: String = (0..width).map(|x| buf.get(x, y).symbol()).collect();
            row.trim_end().to_string()
        })
        .collect()
}
