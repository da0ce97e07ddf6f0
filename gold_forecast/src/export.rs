//! CSV export of a forecast table

use crate::assembler::ForecastTable;
use crate::error::{DashboardError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// File written inside the export directory
pub const EXPORT_FILE_NAME: &str = "forecast.csv";

/// Write `table` to `dir/forecast.csv`, creating `dir` if needed.
///
/// Columns are `Date,Forecast,Lower CI,Upper CI` with unformatted numbers.
pub fn write_forecast_csv(table: &ForecastTable, dir: impl AsRef<Path>) -> Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let path = dir.join(EXPORT_FILE_NAME);

    let mut writer = csv::Writer::from_path(&path)?;
    for row in table.rows() {
        writer.serialize(row)?;
    }
    writer
        .flush()
        .map_err(|e| DashboardError::Export(format!("{}: {}", path.display(), e)))?;

    info!(
        path = %path.display(),
        rows = table.len(),
        model = table.model_name(),
        "exported forecast"
    );
    Ok(path)
}
