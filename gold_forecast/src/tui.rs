//! Interactive terminal dashboard

use crate::config::{ModelChoice, MAX_HORIZON};
use crate::error::Result;
use crate::pipeline::{ControlEvent, Dashboard, RenderOutcome};
use crate::presentation::{
    forecast_heading, forecast_rows, history_rows, NoticeLevel, Section, APP_DESCRIPTION,
    APP_TITLE, FORECAST_COLUMNS, HISTORY_COLUMNS, HISTORY_HEADING, SUMMARY_HEADING,
    SUMMARY_UNAVAILABLE,
};
use chrono::{NaiveDate, Utc};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use gold_data::PriceSource;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Row, Table, Wrap},
};
use std::time::Duration;

const SIDEBAR_WIDTH: u16 = 32;
/// Table rows shown before the rest is cut off
const MAX_TABLE_ROWS: usize = 12;
const MAX_SUMMARY_LINES: usize = 16;

/// Dashboard state plus what the user has expanded
pub struct App<S> {
    dashboard: Dashboard<S>,
    outcome: RenderOutcome,
    show_history: bool,
    show_summary: bool,
    should_quit: bool,
}

impl<S: PriceSource> App<S> {
    /// Run the first cycle for the configured defaults
    pub fn new(mut dashboard: Dashboard<S>, today: NaiveDate) -> Self {
        let outcome = dashboard.render(today);
        Self {
            dashboard,
            outcome,
            show_history: false,
            show_summary: false,
            should_quit: false,
        }
    }

    pub fn outcome(&self) -> &RenderOutcome {
        &self.outcome
    }

    pub fn dashboard(&self) -> &Dashboard<S> {
        &self.dashboard
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn show_history(&self) -> bool {
        self.show_history
    }

    pub fn show_summary(&self) -> bool {
        self.show_summary
    }

    pub fn handle_key(&mut self, key: KeyEvent, today: NaiveDate) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('h') => self.show_history = !self.show_history,
            KeyCode::Char('s') => self.show_summary = !self.show_summary,
            _ => {
                if let Some(event) = control_for_key(key.code) {
                    self.outcome = self.dashboard.handle(event, today);
                }
            }
        }
    }
}

/// Keys that move a control and therefore re-run the pipeline
fn control_for_key(code: KeyCode) -> Option<ControlEvent> {
    match code {
        KeyCode::Char('m') | KeyCode::Tab => Some(ControlEvent::ToggleModel),
        KeyCode::Char('1') => Some(ControlEvent::SelectModel(ModelChoice::Arima)),
        KeyCode::Char('2') => Some(ControlEvent::SelectModel(ModelChoice::Sarima)),
        KeyCode::Left | KeyCode::Char('-') => Some(ControlEvent::AdjustHorizon(-1)),
        KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') => {
            Some(ControlEvent::AdjustHorizon(1))
        }
        KeyCode::PageDown => Some(ControlEvent::AdjustHorizon(-6)),
        KeyCode::PageUp => Some(ControlEvent::AdjustHorizon(6)),
        KeyCode::Char('r') => Some(ControlEvent::Refresh),
        _ => None,
    }
}

/// Event loop until the user quits
pub fn run<B: Backend, S: PriceSource>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
) -> Result<()> {
    let tick_rate = Duration::from_millis(250);

    loop {
        terminal.draw(|frame| draw(frame, app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key, Utc::now().date_naive());
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Draw the sidebar and the current page
pub fn draw<S: PriceSource>(frame: &mut Frame, app: &App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(40)])
        .split(frame.size());

    draw_sidebar(frame, chunks[0], app);
    draw_page(frame, chunks[1], app);
}

fn draw_sidebar<S: PriceSource>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let controls = app.dashboard.controls();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Model selector
            Constraint::Length(3), // Horizon slider
            Constraint::Length(6), // About
            Constraint::Min(0),    // Keys
        ])
        .split(area);

    let items: Vec<ListItem> = ModelChoice::ALL
        .iter()
        .map(|choice| {
            if *choice == controls.model {
                ListItem::new(format!("(•) {}", choice.label()))
                    .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            } else {
                ListItem::new(format!("( ) {}", choice.label()))
            }
        })
        .collect();
    let selector = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Select Model "),
    );
    frame.render_widget(selector, chunks[0]);

    let horizon = controls.horizon.get();
    let slider = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Forecast Months "),
        )
        .gauge_style(Style::default().fg(Color::Yellow))
        .ratio(horizon as f64 / MAX_HORIZON as f64)
        .label(format!("{} months", horizon));
    frame.render_widget(slider, chunks[1]);

    let about = Paragraph::new(vec![
        Line::from("Models used:"),
        Line::from(format!("- ARIMA: {}", ModelChoice::Arima.description())),
        Line::from(format!("- SARIMA: {}", ModelChoice::Sarima.description())),
    ])
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL).title(" About "));
    frame.render_widget(about, chunks[2]);

    let keys = Paragraph::new(vec![
        Line::from("[m/Tab] switch model"),
        Line::from("[←/→] horizon ±1"),
        Line::from("[PgUp/PgDn] horizon ±6"),
        Line::from("[h] history  [s] summary"),
        Line::from("[r] refresh  [q] quit"),
    ])
    .style(Style::default().fg(Color::DarkGray))
    .block(Block::default().borders(Borders::ALL).title(" Keys "));
    frame.render_widget(keys, chunks[3]);
}

fn section_height<S>(section: &Section, app: &App<S>) -> Constraint {
    match section {
        Section::History(series) if app.show_history => {
            Constraint::Length((series.len().min(MAX_TABLE_ROWS) + 3) as u16)
        }
        Section::History(_) => Constraint::Length(1),
        Section::Notice(_) => Constraint::Length(1),
        Section::Forecast(table) => {
            Constraint::Length((table.len().min(MAX_TABLE_ROWS) + 3) as u16)
        }
        Section::Chart(_) => Constraint::Min(12),
        Section::Summary(Some(text)) if app.show_summary => {
            Constraint::Length((text.lines().count().min(MAX_SUMMARY_LINES) + 2) as u16)
        }
        Section::Summary(None) if app.show_summary => Constraint::Length(3),
        Section::Summary(_) => Constraint::Length(1),
    }
}

fn draw_page<S: PriceSource>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let page = &app.outcome.page;
    let mut constraints = vec![Constraint::Length(3)];
    constraints.extend(page.sections.iter().map(|s| section_height(s, app)));
    if page.chart().is_none() {
        constraints.push(Constraint::Min(0));
    }
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            APP_TITLE,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(APP_DESCRIPTION),
    ])
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    for (section, area) in page.sections.iter().zip(chunks.iter().skip(1)) {
        draw_section(frame, *area, section, app);
    }
}

fn collapsed(heading: &str, key: char) -> Paragraph<'static> {
    Paragraph::new(format!("▶ {} [{}]", heading, key))
        .style(Style::default().fg(Color::Cyan))
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn draw_section<S>(frame: &mut Frame, area: Rect, section: &Section, app: &App<S>) {
    match section {
        Section::History(series) => {
            if !app.show_history {
                frame.render_widget(collapsed(HISTORY_HEADING, 'h'), area);
                return;
            }
            let rows = history_rows(series);
            let newest = rows.iter().rev().take(MAX_TABLE_ROWS).rev();
            let table = Table::new(
                newest.map(|r| Row::new(r.to_vec())),
                [Constraint::Length(12), Constraint::Length(14)],
            )
            .header(Row::new(HISTORY_COLUMNS.to_vec()).style(bold()))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" ▼ {} ({} months) ", HISTORY_HEADING, series.len())),
            );
            frame.render_widget(table, area);
        }
        Section::Notice(notice) => {
            let (prefix, color) = match notice.level {
                NoticeLevel::Success => ("✔", Color::Green),
                NoticeLevel::Warning => ("!", Color::Yellow),
                NoticeLevel::Error => ("✘", Color::Red),
            };
            let line = Paragraph::new(format!("{} {}", prefix, notice.text))
                .style(Style::default().fg(color));
            frame.render_widget(line, area);
        }
        Section::Forecast(forecast) => {
            let rows = forecast_rows(forecast);
            let table = Table::new(
                rows.iter().take(MAX_TABLE_ROWS).map(|r| Row::new(r.to_vec())),
                [
                    Constraint::Length(12),
                    Constraint::Length(14),
                    Constraint::Length(14),
                    Constraint::Length(14),
                ],
            )
            .header(Row::new(FORECAST_COLUMNS.to_vec()).style(bold()))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", forecast_heading(forecast.len()))),
            );
            frame.render_widget(table, area);
        }
        Section::Chart(chart) => frame.render_widget(chart, area),
        Section::Summary(summary) => {
            if !app.show_summary {
                frame.render_widget(collapsed(SUMMARY_HEADING, 's'), area);
                return;
            }
            let body = match summary {
                Some(text) => Paragraph::new(text.as_str()),
                None => {
                    Paragraph::new(SUMMARY_UNAVAILABLE).style(Style::default().fg(Color::Yellow))
                }
            };
            let block = Block::default()
                .borders(Borders::ALL)
                .title(format!(" ▼ {} ", SUMMARY_HEADING));
            frame.render_widget(body.block(block), area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizon_keys() {
        assert_eq!(control_for_key(KeyCode::Right), Some(ControlEvent::AdjustHorizon(1)));
        assert_eq!(control_for_key(KeyCode::Char('-')), Some(ControlEvent::AdjustHorizon(-1)));
        assert_eq!(control_for_key(KeyCode::PageUp), Some(ControlEvent::AdjustHorizon(6)));
        assert_eq!(control_for_key(KeyCode::Tab), Some(ControlEvent::ToggleModel));
        assert_eq!(control_for_key(KeyCode::Char('x')), None);
    }
}
