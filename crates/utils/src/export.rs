//! CSV export of study output.

use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};

use pead_model::StudyReport;
use polars::prelude::*;
use tracing::info;

use crate::{
    UtilsError, abnormal_returns_frame, car_frame, exclusion_frame, fit_frame, regression_frame,
    regression_input_frame, skipped_frame, summary_frame,
};

/// Write `df` to `path` as CSV with a header row.
///
/// # Errors
/// Returns error if the file cannot be created or written.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<(), UtilsError> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).include_header(true).finish(df)?;
    Ok(())
}

/// Write every table of `report` into `dir`, creating it if needed.
///
/// Files written:
/// * `car_results.csv` - CARs per event and horizon, with surprise
/// * `abnormal_returns.csv` - daily abnormal returns
/// * `market_model_fits.csv` - per-event alpha and beta
/// * `regression_inputs.csv` - pooled regression rows per horizon
/// * `regression_results.csv` - one row per horizon regressed
/// * `skipped_horizons.csv` - horizons not regressed, with reasons
/// * `car_summary.csv` - CAR distribution per horizon
/// * `exclusions.csv` - excluded events, with reasons
///
/// # Returns
/// Paths of the files written, in the order above.
///
/// # Errors
/// Returns error if the directory or any file cannot be written.
pub fn export_report(report: &StudyReport, dir: &Path) -> Result<Vec<PathBuf>, UtilsError> {
    fs::create_dir_all(dir)?;

    let tables = [
        ("car_results.csv", car_frame(&report.outcomes)?),
        ("abnormal_returns.csv", abnormal_returns_frame(report.abnormal_returns())?),
        ("market_model_fits.csv", fit_frame(&report.outcomes)?),
        ("regression_inputs.csv", regression_input_frame(&report.tables)?),
        ("regression_results.csv", regression_frame(&report.regressions)?),
        ("skipped_horizons.csv", skipped_frame(&report.skipped)?),
        ("car_summary.csv", summary_frame(&report.summaries)?),
        ("exclusions.csv", exclusion_frame(&report.exclusions)?),
    ];

    let mut written = Vec::with_capacity(tables.len());
    for (name, mut df) in tables {
        let path = dir.join(name);
        write_csv(&mut df, &path)?;
        written.push(path);
    }

    info!(dir = %dir.display(), files = written.len(), "exported study report");
    Ok(written)
}
