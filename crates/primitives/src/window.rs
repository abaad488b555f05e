//! Estimation and event window definitions.
//!
//! Offsets count trading days relative to the event day (day 0), which is the
//! first trading day on or after the announcement date.

use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

use crate::Date;

/// Window over which abnormal returns are accumulated, e.g. `[t+1, t+30]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventWindow {
    /// First trading-day offset (inclusive).
    pub start_offset: i32,
    /// Last trading-day offset (inclusive).
    pub end_offset: i32,
}

impl EventWindow {
    /// Create a new event window.
    #[must_use]
    pub const fn new(start_offset: i32, end_offset: i32) -> Self {
        Self { start_offset, end_offset }
    }

    /// Number of trading days in the window (zero when inverted).
    #[must_use]
    pub const fn len(&self) -> usize {
        if self.end_offset < self.start_offset {
            0
        } else {
            (self.end_offset - self.start_offset + 1) as usize
        }
    }

    /// Check if the window covers no trading days.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Offset of the last trading day cumulated at `horizon`.
    #[must_use]
    pub const fn horizon_end(&self, horizon: Horizon) -> i32 {
        self.start_offset + horizon.0 as i32 - 1
    }
}

/// Label of a trading-day offset relative to the event day: `"t-1"`, `"t+0"`, `"t+5"`.
#[must_use]
pub fn offset_label(offset: i32) -> String {
    format!("t{offset:+}")
}

impl Default for EventWindow {
    fn default() -> Self {
        Self::new(1, 30)
    }
}

/// Pre-event window used to fit the market model.
///
/// The window ends `gap + 1` trading days before the event day, so the default
/// gap of one keeps the day before the announcement out of the fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimationWindow {
    /// Number of trading days in the window.
    pub length: usize,
    /// Trading days skipped between the window and the event day.
    pub gap: usize,
}

impl EstimationWindow {
    /// Create a new estimation window.
    #[must_use]
    pub const fn new(length: usize, gap: usize) -> Self {
        Self { length, gap }
    }

    /// Offset of the last trading day in the window.
    #[must_use]
    pub const fn last_offset(&self) -> i64 {
        -(self.gap as i64) - 1
    }

    /// Offset of the first trading day in the window.
    #[must_use]
    pub const fn first_offset(&self) -> i64 {
        self.last_offset() - self.length as i64 + 1
    }

    /// Whether this window ends strictly before `event` starts.
    #[must_use]
    pub const fn precedes(&self, event: &EventWindow) -> bool {
        self.last_offset() < event.start_offset as i64
    }
}

impl Default for EstimationWindow {
    fn default() -> Self {
        Self::new(100, 1)
    }
}

/// CAR horizon: the number of event-window trading days cumulated.
///
/// A horizon is a day count, not an offset. The offset it ends on depends on
/// where the event window starts; see [`EventWindow::horizon_end`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into, Serialize, Deserialize,
)]
#[display("{_0}d")]
#[serde(transparent)]
pub struct Horizon(pub usize);

impl Horizon {
    /// Create a new horizon.
    #[must_use]
    pub const fn new(days: usize) -> Self {
        Self(days)
    }

    /// Number of trading days cumulated.
    #[must_use]
    pub const fn days(&self) -> usize {
        self.0
    }
}

/// Concrete trading days resolved for a window.
///
/// `base` is the trading day immediately before `days[0]`; its close anchors
/// the first daily return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradingSpan {
    /// Trading day preceding the first window day.
    pub base: Date,
    /// Window trading days in ascending order.
    pub days: Vec<Date>,
}

impl TradingSpan {
    /// Number of trading days in the span.
    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Iterate `(previous_day, day)` pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (Date, Date)> + '_ {
        std::iter::once(self.base).chain(self.days.iter().copied()).zip(self.days.iter().copied())
    }
}
