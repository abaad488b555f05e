//! Event-study orchestration.
//!
//! Each stock-event runs surprise, market-model fit, abnormal returns and
//! cumulation independently. A failure excludes only that event and is
//! recorded in the report with its reason. Surviving events are pooled into
//! one regression table per horizon.

use chrono::Days;
use pead_primitives::{
    AbnormalReturnRecord, CarRecord, CarSummary, Date, EarningsEvent, EventKey, Exclusion,
    Horizon, MarketModelFit, RegressionInput, RegressionResult, RegressionTable, SkippedHorizon,
    Symbol,
};
use pead_traits::{NormalReturnEstimator, PriceProvider};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::{
    AbnormalReturnEngine, CrossSectionalRegressor, MarketModelEstimator, ModelError,
    StudyConfig, SurpriseCalculator, TradingCalendar, aligned_returns, summarize,
};

/// Extra calendar days fetched on each side to absorb holidays.
const CALENDAR_PAD_DAYS: i64 = 14;

/// Calendar days spanning `trading_days` trading days, with holiday padding.
const fn calendar_days(trading_days: i64) -> u64 {
    (trading_days.saturating_mul(7) / 5).saturating_add(CALENDAR_PAD_DAYS).unsigned_abs()
}

/// Everything computed for one surviving stock-event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventOutcome {
    /// Stock-event identity.
    pub key: EventKey,
    /// Earnings surprise in percent.
    pub surprise_pct: f64,
    /// Market model fitted over the estimation window.
    pub fit: MarketModelFit,
    /// Daily abnormal returns over the event window.
    pub abnormal_returns: Vec<AbnormalReturnRecord>,
    /// CARs at each configured horizon.
    pub cars: Vec<CarRecord>,
}

impl EventOutcome {
    /// CAR at `horizon`, if it was computed.
    #[must_use]
    pub fn car_at(&self, horizon: Horizon) -> Option<f64> {
        self.cars.iter().find(|c| c.horizon == horizon).map(|c| c.car)
    }
}

/// Output of a study run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudyReport {
    /// Surviving stock-events, in input order.
    pub outcomes: Vec<EventOutcome>,
    /// Excluded stock-events with reasons, in input order.
    pub exclusions: Vec<Exclusion>,
    /// Pooled regression input, one table per horizon.
    pub tables: Vec<RegressionTable>,
    /// Regressions that ran, in horizon order.
    pub regressions: Vec<RegressionResult>,
    /// Horizons whose regression could not be run.
    pub skipped: Vec<SkippedHorizon>,
    /// CAR distribution per horizon.
    pub summaries: Vec<CarSummary>,
}

impl StudyReport {
    /// Regression input table at `horizon`.
    #[must_use]
    pub fn table(&self, horizon: Horizon) -> Option<&RegressionTable> {
        self.tables.iter().find(|t| t.horizon == horizon)
    }

    /// Regression result at `horizon`.
    #[must_use]
    pub fn regression(&self, horizon: Horizon) -> Option<&RegressionResult> {
        self.regressions.iter().find(|r| r.horizon == horizon)
    }

    /// CAR summary at `horizon`.
    #[must_use]
    pub fn summary(&self, horizon: Horizon) -> Option<&CarSummary> {
        self.summaries.iter().find(|s| s.horizon == horizon)
    }

    /// Exclusion recorded for `key`.
    #[must_use]
    pub fn exclusion(&self, key: &EventKey) -> Option<&Exclusion> {
        self.exclusions
            .iter()
            .find(|e| e.symbol == key.symbol && e.announcement_date == key.announcement_date)
    }

    /// All daily abnormal returns, grouped by event.
    pub fn abnormal_returns(&self) -> impl Iterator<Item = &AbnormalReturnRecord> {
        self.outcomes.iter().flat_map(|o| o.abnormal_returns.iter())
    }

    /// All CAR records, grouped by event.
    pub fn cars(&self) -> impl Iterator<Item = &CarRecord> {
        self.outcomes.iter().flat_map(|o| o.cars.iter())
    }
}

/// Post-earnings-announcement drift event study.
#[derive(Debug, Clone)]
pub struct EventStudy {
    config: StudyConfig,
    surprise: SurpriseCalculator,
    estimator: MarketModelEstimator,
    engine: AbnormalReturnEngine,
    regressor: CrossSectionalRegressor,
}

impl EventStudy {
    /// Create a new study.
    ///
    /// # Errors
    /// Returns `ModelError::InvalidConfig` or `ModelError::HorizonOutOfRange`
    /// if the configuration is inconsistent.
    pub fn new(config: StudyConfig) -> Result<Self, ModelError> {
        config.validate()?;
        Ok(Self {
            surprise: SurpriseCalculator::new(),
            estimator: MarketModelEstimator::with_config(config.market_model.clone()),
            engine: AbnormalReturnEngine::with_window(config.event),
            regressor: CrossSectionalRegressor::with_config(config.regression.clone()),
            config,
        })
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &StudyConfig {
        &self.config
    }

    /// Calendar-date range of prices needed for an announcement on `date`.
    ///
    /// Covers the estimation window and the event window with holiday padding.
    ///
    /// # Errors
    /// Returns `ModelError::IncompleteWindow` if the range leaves the supported calendar.
    pub fn price_range(&self, date: Date) -> Result<(Date, Date), ModelError> {
        let back = (-self.config.estimation.first_offset())
            .max(1 - i64::from(self.config.event.start_offset))
            .max(0);
        let forward = i64::from(self.config.event.end_offset).max(0);

        let start = date.checked_sub_days(Days::new(calendar_days(back)));
        let end = date.checked_add_days(Days::new(calendar_days(forward)));
        match (start, end) {
            (Some(start), Some(end)) => Ok((start, end)),
            _ => Err(ModelError::IncompleteWindow(format!(
                "price range around {date} is outside the supported calendar"
            ))),
        }
    }

    /// Run one stock-event through surprise, fit, abnormal returns and cumulation.
    ///
    /// # Errors
    /// Returns the `ModelError` that excludes the event.
    pub fn process_event<P: PriceProvider + ?Sized>(
        &self,
        event: &EarningsEvent,
        prices: &P,
    ) -> Result<EventOutcome, ModelError> {
        let key = event.key();
        let surprise_pct = self.surprise.surprise(event)?;

        let (start, end) = self.price_range(event.announcement_date())?;
        let fetch = |symbol: &Symbol| {
            prices.prices(symbol, start, end).map_err(|e| {
                ModelError::IncompleteWindow(format!("no prices for {symbol}: {e}"))
            })
        };
        let market = fetch(&self.config.benchmark)?;
        let stock = fetch(event.symbol())?;

        let calendar = TradingCalendar::from_series(&market);
        let event_idx = calendar.locate_event(event.announcement_date()).ok_or_else(|| {
            ModelError::IncompleteWindow(format!(
                "{} has no trading day on or after {}",
                self.config.benchmark,
                event.announcement_date()
            ))
        })?;

        let estimation = calendar.estimation_span(event_idx, &self.config.estimation).ok_or(
            ModelError::InsufficientData {
                required: self.estimator.min_observations(),
                actual: 0,
            },
        )?;
        let (stock_returns, market_returns) = aligned_returns(&estimation, &stock, &market);
        let fit = self.estimator.fit(event.symbol(), &stock_returns, &market_returns)?;

        let span = calendar.event_span(event_idx, &self.config.event)?;
        let abnormal_returns = self.engine.abnormal_returns(&fit, &key, &span, &stock, &market)?;
        let cars = self.engine.cumulate(&abnormal_returns, &self.config.horizons)?;

        debug!(event = %key, surprise_pct, beta = fit.beta, "processed event");
        Ok(EventOutcome { key, surprise_pct, fit, abnormal_returns, cars })
    }

    /// Run the study over `events`.
    ///
    /// Failed events are excluded and recorded, never raised. With
    /// `parallel` set, events are processed on the rayon thread pool and
    /// results are collected in input order.
    pub fn run<P: PriceProvider + ?Sized>(&self, events: &[EarningsEvent], prices: &P) -> StudyReport {
        let results: Vec<Result<EventOutcome, ModelError>> = if self.config.parallel {
            events.par_iter().map(|event| self.process_event(event, prices)).collect()
        } else {
            events.iter().map(|event| self.process_event(event, prices)).collect()
        };

        let mut outcomes = Vec::with_capacity(events.len());
        let mut exclusions = Vec::new();
        for (event, result) in events.iter().zip(results) {
            match result {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    if e.is_event_scoped() {
                        warn!(
                            symbol = %event.symbol(),
                            date = %event.announcement_date(),
                            reason = %e.reason(),
                            "excluded event: {e}"
                        );
                    } else {
                        error!(symbol = %event.symbol(), "study misconfigured: {e}");
                    }
                    exclusions.push(Exclusion::new(event.key(), e.reason(), e.to_string()));
                }
            }
        }

        info!(
            events = events.len(),
            processed = outcomes.len(),
            excluded = exclusions.len(),
            "event processing complete"
        );
        self.aggregate(outcomes, exclusions)
    }

    /// Pool processed events into per-horizon tables, summaries and regressions.
    #[must_use]
    pub fn aggregate(&self, outcomes: Vec<EventOutcome>, exclusions: Vec<Exclusion>) -> StudyReport {
        let mut report = StudyReport { outcomes, exclusions, ..StudyReport::default() };

        for &horizon in &self.config.horizons {
            let rows = report
                .outcomes
                .iter()
                .filter_map(|o| {
                    o.car_at(horizon).map(|car| RegressionInput {
                        symbol: o.key.symbol.clone(),
                        announcement_date: o.key.announcement_date,
                        surprise_pct: o.surprise_pct,
                        car,
                    })
                })
                .collect();
            let end_offset = self.config.event.horizon_end(horizon);
            let table = RegressionTable::new(horizon, end_offset, rows);

            if let Some(summary) = summarize(&table) {
                report.summaries.push(summary);
            }
            match self.regressor.regress(&table) {
                Ok(result) => report.regressions.push(result),
                Err(e) => {
                    warn!(
                        horizon = %table.horizon_label(),
                        rows = table.len(),
                        reason = %e.reason(),
                        "skipped regression: {e}"
                    );
                    report.skipped.push(SkippedHorizon {
                        horizon,
                        end_offset: table.end_offset,
                        reason: e.reason(),
                        detail: e.to_string(),
                    });
                }
            }
            report.tables.push(table);
        }

        report
    }
}
