//! Benchmark trading calendar and window alignment.
//!
//! The benchmark's observation dates are the trading calendar. The event day
//! is the first trading day on or after the announcement, and window offsets
//! count trading days from it.

use ndarray::Array1;
use pead_primitives::{Date, EstimationWindow, EventWindow, PriceSeries, ReturnSeries, TradingSpan};

use crate::ModelError;

/// Ordered trading days taken from a benchmark series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradingCalendar {
    days: Vec<Date>,
}

impl TradingCalendar {
    /// Calendar made of every date the benchmark has a price for.
    #[must_use]
    pub fn from_series(benchmark: &PriceSeries) -> Self {
        Self { days: benchmark.dates().collect() }
    }

    /// Number of trading days.
    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Index of the event day: the first trading day on or after `announcement`.
    #[must_use]
    pub fn locate_event(&self, announcement: Date) -> Option<usize> {
        let idx = self.days.partition_point(|d| *d < announcement);
        (idx < self.days.len()).then_some(idx)
    }

    /// Trading days of the event window around `event_idx`.
    ///
    /// # Errors
    /// Returns `ModelError::IncompleteWindow` if the calendar does not cover the
    /// window and the day before it.
    pub fn event_span(&self, event_idx: usize, window: &EventWindow) -> Result<TradingSpan, ModelError> {
        let base = event_idx as i64 + i64::from(window.start_offset) - 1;
        let last = event_idx as i64 + i64::from(window.end_offset);

        if base < 0 {
            return Err(ModelError::IncompleteWindow(format!(
                "calendar starts after day t{:+}",
                window.start_offset - 1
            )));
        }
        if last >= self.days.len() as i64 {
            let through = self.days.last().map_or_else(|| "nothing".to_string(), Date::to_string);
            return Err(ModelError::IncompleteWindow(format!(
                "calendar runs through {through}, before day t{:+}",
                window.end_offset
            )));
        }

        let (base, last) = (base as usize, last as usize);
        Ok(TradingSpan { base: self.days[base], days: self.days[base + 1..=last].to_vec() })
    }

    /// Trading days of the estimation window before `event_idx`.
    ///
    /// The window is clipped to the available history, so it may be shorter
    /// than configured. Returns `None` when no estimation day has a prior
    /// trading day.
    #[must_use]
    pub fn estimation_span(&self, event_idx: usize, window: &EstimationWindow) -> Option<TradingSpan> {
        let last = event_idx as i64 + window.last_offset();
        if last < 1 || window.length == 0 {
            return None;
        }
        let first = (event_idx as i64 + window.first_offset()).max(1);
        let (first, last) = (first as usize, last as usize);
        Some(TradingSpan { base: self.days[first - 1], days: self.days[first..=last].to_vec() })
    }
}

/// Pairwise-aligned daily returns of `stock` and `market` over `span`.
///
/// Days on which either series lacks the day's price or the prior trading
/// day's price are dropped from both outputs.
#[must_use]
pub fn aligned_returns(
    span: &TradingSpan,
    stock: &PriceSeries,
    market: &PriceSeries,
) -> (ReturnSeries, ReturnSeries) {
    let mut dates = Vec::with_capacity(span.len());
    let mut stock_returns = Vec::with_capacity(span.len());
    let mut market_returns = Vec::with_capacity(span.len());

    for (prev, day) in span.pairs() {
        let prices = (stock.price_on(prev), stock.price_on(day), market.price_on(prev), market.price_on(day));
        if let (Some(s0), Some(s1), Some(m0), Some(m1)) = prices {
            dates.push(day);
            stock_returns.push(s1 / s0 - 1.0);
            market_returns.push(m1 / m0 - 1.0);
        }
    }

    (
        ReturnSeries::new(dates.clone(), Array1::from(stock_returns)),
        ReturnSeries::new(dates, Array1::from(market_returns)),
    )
}
