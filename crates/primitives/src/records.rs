//! Per-event records produced by the market model and abnormal-return engine.

use serde::{Deserialize, Serialize};

use crate::{Date, Horizon, Symbol, offset_label};

/// Market-model parameters fitted over one event's estimation window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketModelFit {
    /// Ticker symbol.
    pub symbol: Symbol,
    /// Intercept.
    pub alpha: f64,
    /// Sensitivity to the benchmark return.
    pub beta: f64,
    /// Standard deviation of the fit residuals.
    pub residual_std: f64,
    /// Number of observations used in the fit.
    pub n_obs: usize,
}

/// Abnormal return for a single trading day of an event window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbnormalReturnRecord {
    /// Ticker symbol.
    pub symbol: Symbol,
    /// Announcement date of the owning event.
    pub announcement_date: Date,
    /// Trading day.
    pub date: Date,
    /// Actual minus expected return.
    pub abnormal_return: f64,
}

/// Cumulative abnormal return at one horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarRecord {
    /// Ticker symbol.
    pub symbol: Symbol,
    /// Announcement date of the owning event.
    pub announcement_date: Date,
    /// Horizon the CAR was cumulated to.
    pub horizon: Horizon,
    /// Offset of the last trading day cumulated.
    pub end_offset: i32,
    /// Sum of abnormal returns through the horizon.
    pub car: f64,
}

impl CarRecord {
    /// Label of the last day cumulated, e.g. `"t+5"`.
    #[must_use]
    pub fn horizon_label(&self) -> String {
        offset_label(self.end_offset)
    }
}
