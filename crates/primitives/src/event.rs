//! Earnings announcement events.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Date, Symbol};

/// Identity of a stock-event: one ticker on one announcement date.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EventKey {
    /// Ticker symbol.
    pub symbol: Symbol,
    /// Announcement date.
    pub announcement_date: Date,
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.symbol, self.announcement_date)
    }
}

/// A single earnings announcement with reported and consensus EPS.
///
/// Events are immutable once created. The surprise is derived on demand and
/// never stored alongside the inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarningsEvent {
    symbol: Symbol,
    announcement_date: Date,
    actual_eps: f64,
    estimated_eps: f64,
}

impl EarningsEvent {
    /// Create a new earnings event.
    #[must_use]
    pub fn new(
        symbol: impl Into<Symbol>,
        announcement_date: Date,
        actual_eps: f64,
        estimated_eps: f64,
    ) -> Self {
        Self { symbol: symbol.into(), announcement_date, actual_eps, estimated_eps }
    }

    /// Ticker symbol.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Announcement date.
    #[must_use]
    pub const fn announcement_date(&self) -> Date {
        self.announcement_date
    }

    /// Reported EPS.
    #[must_use]
    pub const fn actual_eps(&self) -> f64 {
        self.actual_eps
    }

    /// Consensus EPS estimate.
    #[must_use]
    pub const fn estimated_eps(&self) -> f64 {
        self.estimated_eps
    }

    /// Identity of this stock-event.
    #[must_use]
    pub fn key(&self) -> EventKey {
        EventKey { symbol: self.symbol.clone(), announcement_date: self.announcement_date }
    }
}
