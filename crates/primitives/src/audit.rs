//! Exclusion audit trail.

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::{Date, EventKey, Symbol};

/// Category of failure that removed a stock-event from the study.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum ExclusionReason {
    /// Estimated EPS was zero.
    #[display("UndefinedSurpriseError")]
    UndefinedSurprise,
    /// Too few aligned estimation-window observations.
    #[display("InsufficientDataError")]
    InsufficientData,
    /// Stock and benchmark dates did not match one-to-one.
    #[display("MisalignedSeriesError")]
    MisalignedSeries,
    /// The market model could not be identified.
    #[display("DegenerateModelError")]
    DegenerateModel,
    /// Missing prices inside the event window.
    #[display("IncompleteWindowError")]
    IncompleteWindow,
    /// Too few pooled observations.
    #[display("InsufficientObservationsError")]
    InsufficientObservations,
}

/// A stock-event removed from the study, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exclusion {
    /// Ticker symbol.
    pub symbol: Symbol,
    /// Announcement date.
    pub announcement_date: Date,
    /// Failure category.
    pub reason: ExclusionReason,
    /// Human-readable detail.
    pub detail: String,
}

impl Exclusion {
    /// Create an exclusion for `key`.
    #[must_use]
    pub fn new(key: EventKey, reason: ExclusionReason, detail: impl Into<String>) -> Self {
        Self {
            symbol: key.symbol,
            announcement_date: key.announcement_date,
            reason,
            detail: detail.into(),
        }
    }
}
