//! Study configuration.

use pead_primitives::{EstimationWindow, EventWindow, Horizon, Symbol};
use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Largest window length, gap or event offset accepted, in trading days.
pub const MAX_WINDOW_DAYS: usize = 10_000;

/// Configuration for the market-model estimator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketModelConfig {
    /// Minimum aligned estimation-window observations.
    pub min_observations: usize,
}

impl Default for MarketModelConfig {
    fn default() -> Self {
        Self { min_observations: 30 }
    }
}

/// Outlier handling applied to CARs before each horizon's regression.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "percentile", rename_all = "snake_case")]
pub enum OutlierPolicy {
    /// Regress every row.
    #[default]
    None,
    /// Drop rows whose CAR lies outside the `[p, 1 - p]` quantile band.
    Trim(f64),
    /// Clip CARs to the `[p, 1 - p]` quantile band.
    Winsorize(f64),
}

impl OutlierPolicy {
    const fn percentile(&self) -> Option<f64> {
        match self {
            Self::None => None,
            Self::Trim(p) | Self::Winsorize(p) => Some(*p),
        }
    }
}

/// Configuration for the cross-sectional regression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegressionConfig {
    /// Report HC1 heteroskedasticity-robust standard errors.
    pub robust: bool,
    /// Minimum pooled rows per horizon.
    pub min_observations: usize,
    /// Outlier handling.
    pub outliers: OutlierPolicy,
}

impl Default for RegressionConfig {
    fn default() -> Self {
        Self { robust: false, min_observations: 10, outliers: OutlierPolicy::None }
    }
}

/// Immutable configuration shared by every component of a study run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudyConfig {
    /// Benchmark index whose trading days define the calendar.
    pub benchmark: Symbol,
    /// Pre-event window used to fit the market model.
    pub estimation: EstimationWindow,
    /// Window over which abnormal returns are accumulated.
    pub event: EventWindow,
    /// CAR horizons, counted from the start of the event window.
    pub horizons: Vec<Horizon>,
    /// Market-model settings.
    pub market_model: MarketModelConfig,
    /// Regression settings.
    pub regression: RegressionConfig,
    /// Process stock-events on the rayon thread pool.
    pub parallel: bool,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            benchmark: Symbol::new("^GSPC"),
            estimation: EstimationWindow::default(),
            event: EventWindow::default(),
            horizons: [1, 2, 5, 10, 30].into_iter().map(Horizon::new).collect(),
            market_model: MarketModelConfig::default(),
            regression: RegressionConfig::default(),
            parallel: false,
        }
    }
}

impl StudyConfig {
    /// Check the configuration for internal consistency.
    ///
    /// # Errors
    /// Returns `ModelError::InvalidConfig` or `ModelError::HorizonOutOfRange`.
    pub fn validate(&self) -> Result<(), ModelError> {
        let extents = [
            ("estimation length", self.estimation.length),
            ("estimation gap", self.estimation.gap),
            ("event start offset", self.event.start_offset.unsigned_abs() as usize),
            ("event end offset", self.event.end_offset.unsigned_abs() as usize),
        ];
        if let Some((name, days)) = extents.iter().find(|(_, days)| *days > MAX_WINDOW_DAYS) {
            return Err(ModelError::InvalidConfig(format!(
                "{name} of {days} trading days exceeds {MAX_WINDOW_DAYS}"
            )));
        }
        if self.event.is_empty() {
            return Err(ModelError::InvalidConfig(format!(
                "event window [{}, {}] is empty",
                self.event.start_offset, self.event.end_offset
            )));
        }
        if !self.estimation.precedes(&self.event) {
            return Err(ModelError::InvalidConfig(format!(
                "estimation window ending at t{:+} overlaps event window starting at t{:+}",
                self.estimation.last_offset(),
                self.event.start_offset
            )));
        }
        if self.horizons.is_empty() {
            return Err(ModelError::InvalidConfig("no horizons configured".to_string()));
        }
        let window = self.event.len();
        if let Some(&horizon) = self.horizons.iter().find(|h| h.days() == 0 || h.days() > window) {
            return Err(ModelError::HorizonOutOfRange { horizon, window });
        }
        if self.market_model.min_observations < 3 {
            return Err(ModelError::InvalidConfig(
                "market model needs at least 3 observations".to_string(),
            ));
        }
        if self.estimation.length < self.market_model.min_observations {
            return Err(ModelError::InvalidConfig(format!(
                "estimation window of {} days is shorter than the {} observation minimum",
                self.estimation.length, self.market_model.min_observations
            )));
        }
        if self.regression.min_observations < 3 {
            return Err(ModelError::InvalidConfig(
                "regression needs at least 3 observations".to_string(),
            ));
        }
        if let Some(p) = self.regression.outliers.percentile() {
            if !(p > 0.0 && p < 0.5) {
                return Err(ModelError::InvalidConfig(format!(
                    "outlier percentile {p} must be in (0, 0.5)"
                )));
            }
        }
        Ok(())
    }
}
