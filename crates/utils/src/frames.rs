//! Conversion of study output into polars DataFrames.
//!
//! Every frame is in long format with one row per record, keyed by `symbol`
//! and `announcement_date` where the record belongs to a stock-event.

use chrono::Datelike;
use pead_model::EventOutcome;
use pead_primitives::{
    AbnormalReturnRecord, CarRecord, CarSummary, Date, Exclusion, RegressionInput,
    RegressionResult, RegressionTable, SkippedHorizon,
};
use polars::prelude::*;

use crate::UtilsError;

/// `num_days_from_ce` of 1970-01-01, the epoch of polars `Date`.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

fn date_column(name: &str, dates: impl IntoIterator<Item = Date>) -> Result<Column, UtilsError> {
    let days: Vec<i32> =
        dates.into_iter().map(|d| d.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE).collect();
    Ok(Series::new(name.into(), days).cast(&DataType::Date)?.into())
}

fn text_column<'a>(name: &str, values: impl IntoIterator<Item = &'a str>) -> Column {
    Column::new(name.into(), values.into_iter().collect::<Vec<_>>())
}

fn float_column(name: &str, values: impl IntoIterator<Item = f64>) -> Column {
    Column::new(name.into(), values.into_iter().collect::<Vec<_>>())
}

fn count_column(name: &str, values: impl IntoIterator<Item = usize>) -> Column {
    Column::new(name.into(), values.into_iter().map(|n| n as u64).collect::<Vec<_>>())
}

/// Daily abnormal returns: `symbol`, `announcement_date`, `date`, `abnormal_return`.
///
/// # Errors
/// Returns error if the frame cannot be assembled.
pub fn abnormal_returns_frame<'a>(
    records: impl IntoIterator<Item = &'a AbnormalReturnRecord>,
) -> Result<DataFrame, UtilsError> {
    let records: Vec<&AbnormalReturnRecord> = records.into_iter().collect();
    Ok(DataFrame::new(vec![
        text_column("symbol", records.iter().map(|r| r.symbol.as_str())),
        date_column("announcement_date", records.iter().map(|r| r.announcement_date))?,
        date_column("date", records.iter().map(|r| r.date))?,
        float_column("abnormal_return", records.iter().map(|r| r.abnormal_return)),
    ])?)
}

/// CARs with the event's surprise: `symbol`, `announcement_date`,
/// `surprise_pct`, `horizon`, `horizon_days`, `car`.
///
/// # Errors
/// Returns error if the frame cannot be assembled.
pub fn car_frame(outcomes: &[EventOutcome]) -> Result<DataFrame, UtilsError> {
    let rows: Vec<(&EventOutcome, &CarRecord)> =
        outcomes.iter().flat_map(|o| o.cars.iter().map(move |c| (o, c))).collect();
    let labels: Vec<String> = rows.iter().map(|(_, c)| c.horizon_label()).collect();

    Ok(DataFrame::new(vec![
        text_column("symbol", rows.iter().map(|(o, _)| o.key.symbol.as_str())),
        date_column("announcement_date", rows.iter().map(|(o, _)| o.key.announcement_date))?,
        float_column("surprise_pct", rows.iter().map(|(o, _)| o.surprise_pct)),
        text_column("horizon", labels.iter().map(String::as_str)),
        count_column("horizon_days", rows.iter().map(|(_, c)| c.horizon.days())),
        float_column("car", rows.iter().map(|(_, c)| c.car)),
    ])?)
}

/// Market-model fits: `symbol`, `announcement_date`, `alpha`, `beta`,
/// `residual_std`, `n_obs`.
///
/// # Errors
/// Returns error if the frame cannot be assembled.
pub fn fit_frame(outcomes: &[EventOutcome]) -> Result<DataFrame, UtilsError> {
    Ok(DataFrame::new(vec![
        text_column("symbol", outcomes.iter().map(|o| o.key.symbol.as_str())),
        date_column("announcement_date", outcomes.iter().map(|o| o.key.announcement_date))?,
        float_column("alpha", outcomes.iter().map(|o| o.fit.alpha)),
        float_column("beta", outcomes.iter().map(|o| o.fit.beta)),
        float_column("residual_std", outcomes.iter().map(|o| o.fit.residual_std)),
        count_column("n_obs", outcomes.iter().map(|o| o.fit.n_obs)),
    ])?)
}

/// Pooled regression inputs across horizons: `horizon`, `symbol`,
/// `announcement_date`, `surprise_pct`, `car`.
///
/// # Errors
/// Returns error if the frame cannot be assembled.
pub fn regression_input_frame(tables: &[RegressionTable]) -> Result<DataFrame, UtilsError> {
    let rows: Vec<(String, &RegressionInput)> = tables
        .iter()
        .flat_map(|t| t.rows.iter().map(move |r| (t.horizon_label(), r)))
        .collect();

    Ok(DataFrame::new(vec![
        text_column("horizon", rows.iter().map(|(h, _)| h.as_str())),
        text_column("symbol", rows.iter().map(|(_, r)| r.symbol.as_str())),
        date_column("announcement_date", rows.iter().map(|(_, r)| r.announcement_date))?,
        float_column("surprise_pct", rows.iter().map(|(_, r)| r.surprise_pct)),
        float_column("car", rows.iter().map(|(_, r)| r.car)),
    ])?)
}

/// One row per regression that ran.
///
/// # Errors
/// Returns error if the frame cannot be assembled.
pub fn regression_frame(results: &[RegressionResult]) -> Result<DataFrame, UtilsError> {
    let labels: Vec<String> = results.iter().map(RegressionResult::horizon_label).collect();
    Ok(DataFrame::new(vec![
        text_column("horizon", labels.iter().map(String::as_str)),
        float_column("intercept", results.iter().map(|r| r.intercept)),
        float_column("intercept_std_err", results.iter().map(|r| r.intercept_std_err)),
        float_column("slope", results.iter().map(|r| r.slope)),
        float_column("std_err", results.iter().map(|r| r.std_err)),
        float_column("t_stat", results.iter().map(|r| r.t_stat)),
        float_column("p_value", results.iter().map(|r| r.p_value)),
        float_column("r_squared", results.iter().map(|r| r.r_squared)),
        count_column("n", results.iter().map(|r| r.n)),
        Column::new("robust".into(), results.iter().map(|r| r.robust).collect::<Vec<_>>()),
    ])?)
}

/// Horizons whose regression did not run: `horizon`, `reason`, `detail`.
///
/// # Errors
/// Returns error if the frame cannot be assembled.
pub fn skipped_frame(skipped: &[SkippedHorizon]) -> Result<DataFrame, UtilsError> {
    let labels: Vec<String> = skipped.iter().map(SkippedHorizon::horizon_label).collect();
    let reasons: Vec<String> = skipped.iter().map(|s| s.reason.to_string()).collect();
    Ok(DataFrame::new(vec![
        text_column("horizon", labels.iter().map(String::as_str)),
        text_column("reason", reasons.iter().map(String::as_str)),
        text_column("detail", skipped.iter().map(|s| s.detail.as_str())),
    ])?)
}

/// Per-horizon CAR summaries.
///
/// # Errors
/// Returns error if the frame cannot be assembled.
pub fn summary_frame(summaries: &[CarSummary]) -> Result<DataFrame, UtilsError> {
    let labels: Vec<String> = summaries.iter().map(CarSummary::horizon_label).collect();
    Ok(DataFrame::new(vec![
        text_column("horizon", labels.iter().map(String::as_str)),
        count_column("n", summaries.iter().map(|s| s.n)),
        float_column("mean_car", summaries.iter().map(|s| s.mean_car)),
        float_column("std_car", summaries.iter().map(|s| s.std_car)),
        float_column("t_stat", summaries.iter().map(|s| s.t_stat)),
        float_column("p_value", summaries.iter().map(|s| s.p_value)),
        Column::new(
            "mean_car_positive".into(),
            summaries.iter().map(|s| s.mean_positive).collect::<Vec<_>>(),
        ),
        Column::new(
            "mean_car_negative".into(),
            summaries.iter().map(|s| s.mean_negative).collect::<Vec<_>>(),
        ),
    ])?)
}

/// Exclusion audit: `symbol`, `announcement_date`, `reason`, `detail`.
///
/// # Errors
/// Returns error if the frame cannot be assembled.
pub fn exclusion_frame(exclusions: &[Exclusion]) -> Result<DataFrame, UtilsError> {
    let reasons: Vec<String> = exclusions.iter().map(|e| e.reason.to_string()).collect();
    Ok(DataFrame::new(vec![
        text_column("symbol", exclusions.iter().map(|e| e.symbol.as_str())),
        date_column("announcement_date", exclusions.iter().map(|e| e.announcement_date))?,
        text_column("reason", reasons.iter().map(String::as_str)),
        text_column("detail", exclusions.iter().map(|e| e.detail.as_str())),
    ])?)
}
