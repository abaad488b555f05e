//! Cross-sectional regression inputs and results.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::{Date, ExclusionReason, Horizon, Symbol, offset_label};

/// One stock-event row of a horizon's regression dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionInput {
    /// Ticker symbol.
    pub symbol: Symbol,
    /// Announcement date.
    pub announcement_date: Date,
    /// Earnings surprise in percent.
    pub surprise_pct: f64,
    /// CAR at the table's horizon.
    pub car: f64,
}

/// Pooled regression dataset for a single horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTable {
    /// Horizon the CARs were cumulated to.
    pub horizon: Horizon,
    /// Offset of the last trading day cumulated.
    pub end_offset: i32,
    /// Rows ordered by `(symbol, announcement_date)`.
    pub rows: Vec<RegressionInput>,
}

impl RegressionTable {
    /// Build a table, ordering rows by `(symbol, announcement_date)`.
    #[must_use]
    pub fn new(horizon: Horizon, end_offset: i32, mut rows: Vec<RegressionInput>) -> Self {
        rows.sort_by(|a, b| {
            a.symbol.cmp(&b.symbol).then(a.announcement_date.cmp(&b.announcement_date))
        });
        Self { horizon, end_offset, rows }
    }

    /// Label of the last day cumulated, e.g. `"t+5"`.
    #[must_use]
    pub fn horizon_label(&self) -> String {
        offset_label(self.end_offset)
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Surprise column.
    #[must_use]
    pub fn surprises(&self) -> Array1<f64> {
        self.rows.iter().map(|r| r.surprise_pct).collect()
    }

    /// CAR column.
    #[must_use]
    pub fn cars(&self) -> Array1<f64> {
        self.rows.iter().map(|r| r.car).collect()
    }
}

/// OLS of CAR on surprise for one horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    /// Horizon regressed.
    pub horizon: Horizon,
    /// Offset of the last trading day cumulated.
    pub end_offset: i32,
    /// Intercept estimate.
    pub intercept: f64,
    /// Standard error of the intercept.
    pub intercept_std_err: f64,
    /// Slope on surprise.
    pub slope: f64,
    /// Standard error of the slope.
    pub std_err: f64,
    /// t-statistic of the slope.
    pub t_stat: f64,
    /// Two-sided p-value of the slope.
    pub p_value: f64,
    /// Coefficient of determination.
    pub r_squared: f64,
    /// Number of observations.
    pub n: usize,
    /// Whether heteroskedasticity-robust (HC1) standard errors were used.
    pub robust: bool,
}

impl RegressionResult {
    /// Label of the last day cumulated, e.g. `"t+5"`.
    #[must_use]
    pub fn horizon_label(&self) -> String {
        offset_label(self.end_offset)
    }
}

/// A horizon whose regression could not be run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedHorizon {
    /// Horizon skipped.
    pub horizon: Horizon,
    /// Offset of the last trading day cumulated.
    pub end_offset: i32,
    /// Failure category.
    pub reason: ExclusionReason,
    /// Human-readable detail.
    pub detail: String,
}

impl SkippedHorizon {
    /// Label of the last day cumulated, e.g. `"t+5"`.
    #[must_use]
    pub fn horizon_label(&self) -> String {
        offset_label(self.end_offset)
    }
}

/// Cross-sectional distribution of CARs at one horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarSummary {
    /// Horizon summarized.
    pub horizon: Horizon,
    /// Offset of the last trading day cumulated.
    pub end_offset: i32,
    /// Number of events.
    pub n: usize,
    /// Mean CAR.
    pub mean_car: f64,
    /// Sample standard deviation of CARs.
    pub std_car: f64,
    /// One-sample t-statistic of the mean against zero.
    pub t_stat: f64,
    /// Two-sided p-value of the mean.
    pub p_value: f64,
    /// Mean CAR across positive surprises.
    pub mean_positive: Option<f64>,
    /// Mean CAR across negative surprises.
    pub mean_negative: Option<f64>,
}

impl CarSummary {
    /// Label of the last day cumulated, e.g. `"t+5"`.
    #[must_use]
    pub fn horizon_label(&self) -> String {
        offset_label(self.end_offset)
    }
}
