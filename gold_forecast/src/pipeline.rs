//! One render cycle: fetch history, load the model, forecast, lay out a page

use crate::assembler::{assemble, summary_text};
use crate::config::{Controls, DashboardConfig, ForecastHorizon, ModelChoice};
use crate::error::DashboardError;
use crate::presentation::{ForecastChart, Notice, Page, Section};
use chrono::NaiveDate;
use gold_data::{FetchCache, PriceSource};
use gold_models::{load_model, ModelError};
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Stage names, used to say where a cycle failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageName {
    Idle,
    Fetching,
    Loaded,
    ModelLoading,
    ModelLoaded,
    Forecasting,
    Rendered,
}

impl fmt::Display for StageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Where a render cycle stands
#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    Idle,
    Fetching,
    Loaded { months: usize },
    ModelLoading { path: PathBuf },
    ModelLoaded { model: String },
    Forecasting { horizon: ForecastHorizon },
    Rendered,
    Failed { stage: StageName, reason: String },
}

impl Stage {
    pub fn name(&self) -> Option<StageName> {
        Some(match self {
            Stage::Idle => StageName::Idle,
            Stage::Fetching => StageName::Fetching,
            Stage::Loaded { .. } => StageName::Loaded,
            Stage::ModelLoading { .. } => StageName::ModelLoading,
            Stage::ModelLoaded { .. } => StageName::ModelLoaded,
            Stage::Forecasting { .. } => StageName::Forecasting,
            Stage::Rendered => StageName::Rendered,
            Stage::Failed { .. } => return None,
        })
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Rendered | Stage::Failed { .. })
    }
}

/// Transitions taken by one cycle, in order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderCycle {
    transitions: Vec<Stage>,
}

impl RenderCycle {
    fn advance(&mut self, stage: Stage) {
        debug!(?stage, "render stage");
        self.transitions.push(stage);
    }

    fn fail(&mut self, stage: StageName, reason: impl Into<String>) {
        let reason = reason.into();
        warn!(%stage, %reason, "render cycle failed");
        self.transitions.push(Stage::Failed { stage, reason });
    }

    pub fn transitions(&self) -> &[Stage] {
        &self.transitions
    }

    /// Names of the stages passed through, excluding a failure
    pub fn stage_names(&self) -> Vec<StageName> {
        self.transitions.iter().filter_map(Stage::name).collect()
    }

    pub fn current(&self) -> &Stage {
        self.transitions.last().unwrap_or(&Stage::Idle)
    }

    pub fn is_rendered(&self) -> bool {
        matches!(self.current(), Stage::Rendered)
    }

    pub fn failure(&self) -> Option<(StageName, &str)> {
        match self.current() {
            Stage::Failed { stage, reason } => Some((*stage, reason.as_str())),
            _ => None,
        }
    }
}

/// Something the user did to the controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    SelectModel(ModelChoice),
    ToggleModel,
    SetHorizon(ForecastHorizon),
    /// Move the slider by a signed number of months
    AdjustHorizon(i64),
    /// Drop memoized history so the next cycle fetches again
    Refresh,
}

/// A finished cycle: the page to show and how it got there
#[derive(Debug, Clone)]
pub struct RenderOutcome {
    pub page: Page,
    pub cycle: RenderCycle,
}

/// Controls plus memoized history; every event re-runs the whole cycle
#[derive(Debug)]
pub struct Dashboard<S> {
    cache: FetchCache<S>,
    config: DashboardConfig,
    controls: Controls,
}

impl<S: PriceSource> Dashboard<S> {
    pub fn new(source: S, config: DashboardConfig) -> Self {
        let controls = config.initial_controls();
        Self {
            cache: FetchCache::new(source),
            config,
            controls,
        }
    }

    pub fn controls(&self) -> Controls {
        self.controls
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn cache(&self) -> &FetchCache<S> {
        &self.cache
    }

    /// Apply a control change, then render from `Idle`
    pub fn handle(&mut self, event: ControlEvent, today: NaiveDate) -> RenderOutcome {
        match event {
            ControlEvent::SelectModel(choice) => self.controls.model = choice,
            ControlEvent::ToggleModel => self.controls.model = self.controls.model.toggled(),
            ControlEvent::SetHorizon(horizon) => self.controls.horizon = horizon,
            ControlEvent::AdjustHorizon(delta) => {
                self.controls.horizon = self.controls.horizon.step(delta)
            }
            ControlEvent::Refresh => {
                info!(entries = self.cache.len(), "dropping cached history");
                self.cache.invalidate();
            }
        }
        debug!(?event, controls = ?self.controls, "control event");
        self.render(today)
    }

    /// Run one cycle for the current controls.
    ///
    /// Never fails: every error becomes a notice on the returned page and a
    /// `Failed` transition in the cycle.
    pub fn render(&mut self, today: NaiveDate) -> RenderOutcome {
        let controls = self.controls;
        let mut page = Page::new(controls);
        let mut cycle = RenderCycle::default();
        cycle.advance(Stage::Idle);

        cycle.advance(Stage::Fetching);
        let query = self.config.query(today);
        let series = match self.cache.get(&query) {
            Ok(series) => series,
            Err(e) => {
                let error = DashboardError::from(e);
                page.push(Section::Notice(Notice::error(format!(
                    "An error occurred: {}",
                    error
                ))));
                cycle.fail(StageName::Fetching, error.to_string());
                return RenderOutcome { page, cycle };
            }
        };
        cycle.advance(Stage::Loaded { months: series.len() });
        page.push(Section::History(series.clone()));

        let path = self.config.model_path(controls.model);
        cycle.advance(Stage::ModelLoading { path: path.clone() });
        let model = match load_model(&path) {
            Ok(model) => model,
            Err(e) => {
                let message = model_failure_message(&e, controls.model);
                page.push(Section::Notice(Notice::error(message.clone())));
                cycle.fail(StageName::ModelLoading, message);
                return RenderOutcome { page, cycle };
            }
        };
        let label = controls.model.label();
        cycle.advance(Stage::ModelLoaded { model: model.name() });
        page.push(Section::Notice(Notice::success(format!("Loaded {} model", label))));

        cycle.advance(Stage::Forecasting { horizon: controls.horizon });
        let table = match assemble(model.as_ref(), &series, controls.horizon) {
            Ok(table) => table,
            Err(e) => {
                let message = format!("Error generating forecast: {}", e);
                page.push(Section::Notice(Notice::error(message.clone())));
                cycle.fail(StageName::Forecasting, message);
                return RenderOutcome { page, cycle };
            }
        };

        let chart = ForecastChart::new(&label, &series, &table);
        page.push(Section::Forecast(table));
        page.push(Section::Chart(chart));
        page.push(Section::Summary(summary_text(model.as_ref())));
        cycle.advance(Stage::Rendered);

        info!(
            model = %label,
            horizon = %controls.horizon,
            history = series.len(),
            "rendered forecast"
        );
        RenderOutcome { page, cycle }
    }
}

/// User-facing text for a model that could not be loaded
pub fn model_failure_message(error: &ModelError, choice: ModelChoice) -> String {
    match error {
        ModelError::NotFound { .. } => format!("Model file '{}' not found", choice.file_name()),
        ModelError::LoadError { reason, .. } => format!("Error loading model: {}", reason),
        other => format!("Error loading model: {}", other),
    }
}
