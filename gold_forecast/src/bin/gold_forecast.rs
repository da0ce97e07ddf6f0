//! gold-forecast - terminal dashboard for gold price forecasts.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{ArgAction, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gold_data::{CsvSource, PriceSource, YahooFinance};
use gold_forecast::{
    render_page, tui, write_forecast_csv, Dashboard, DashboardConfig, ForecastHorizon,
    ModelChoice, RenderOptions,
};

#[derive(Debug, Parser)]
#[command(
    name = "gold-forecast",
    version,
    about = "Forecast gold prices with pre-trained ARIMA/SARIMA models"
)]
struct Args {
    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding arima_gold_model.json and sarima_gold_model.json
    #[arg(long)]
    model_dir: Option<PathBuf>,

    /// Model selected on start-up (arima or sarima)
    #[arg(long)]
    model: Option<ModelChoice>,

    /// Months to forecast, 1 to 36
    #[arg(long)]
    horizon: Option<usize>,

    /// Read monthly history from a CSV file instead of Yahoo Finance
    #[arg(long)]
    history_csv: Option<PathBuf>,

    /// Print the page once and exit instead of starting the dashboard
    #[arg(long)]
    once: bool,

    /// Also write forecast.csv into this directory
    #[arg(long, requires = "once")]
    export: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    /// File settings first, then flags on top
    fn resolve_config(&self) -> Result<DashboardConfig> {
        let mut config = match &self.config {
            Some(path) => DashboardConfig::from_json_file(path)?,
            None => DashboardConfig::default(),
        };
        if let Some(dir) = &self.model_dir {
            config.model_dir = dir.clone();
        }
        if let Some(model) = self.model {
            config.default_model = model;
        }
        if let Some(months) = self.horizon {
            config.default_horizon = ForecastHorizon::new(months)?;
        }
        if let Some(path) = &self.history_csv {
            config.history_csv = Some(path.clone());
        }
        config.validate()?;
        Ok(config)
    }
}

fn init_tracing(verbose: u8, interactive: bool) -> Result<()> {
    // stderr shares the screen with the dashboard
    let level = match (verbose, interactive) {
        (0, true) => "off",
        (0, false) => "warn",
        (1, _) => "info",
        _ => "debug",
    };
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(format!(
            "gold_forecast={level},gold_data={level},gold_models={level}"
        ))?,
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .init();
    Ok(())
}

fn price_source(config: &DashboardConfig) -> Box<dyn PriceSource> {
    match &config.history_csv {
        Some(path) => Box::new(CsvSource::new(path)),
        None => {
            let mut yahoo =
                YahooFinance::new().with_timeout(Duration::from_secs(config.http_timeout_secs));
            if let Some(url) = &config.yahoo_base_url {
                yahoo = yahoo.with_base_url(url.as_str());
            }
            Box::new(yahoo)
        }
    }
}

type BoxedDashboard = Dashboard<Box<dyn PriceSource>>;

fn run_once(mut dashboard: BoxedDashboard, export: Option<PathBuf>) -> Result<()> {
    let outcome = dashboard.render(Utc::now().date_naive());
    print!("{}", render_page(&outcome.page, &RenderOptions::default()));

    if let Some(dir) = export {
        let table = outcome
            .page
            .forecast()
            .context("no forecast was produced, nothing to export")?;
        let path = write_forecast_csv(table, &dir)?;
        println!("\nForecast written to {}", path.display());
    }

    if let Some((stage, reason)) = outcome.cycle.failure() {
        info!(%stage, %reason, "exiting with failure");
        std::process::exit(1);
    }
    Ok(())
}

fn run_dashboard(dashboard: BoxedDashboard) -> Result<()> {
    let mut app = tui::App::new(dashboard, Utc::now().date_naive());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = tui::run(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result.map_err(Into::into)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose, !args.once)?;

    let config = args.resolve_config()?;
    info!(
        symbol = %config.symbol,
        model_dir = %config.model_dir.display(),
        model = %config.default_model,
        horizon = %config.default_horizon,
        "starting gold-forecast"
    );

    let dashboard = Dashboard::new(price_source(&config), config);
    if args.once {
        run_once(dashboard, args.export)
    } else {
        run_dashboard(dashboard)
    }
}
