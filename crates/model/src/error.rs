//! Error types for the event-study engine.

use pead_math::MathError;
use pead_primitives::{ExclusionReason, Horizon};

/// Errors that can occur while processing a stock-event or a horizon.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Estimated EPS is zero, so the surprise is undefined.
    #[error("undefined surprise: estimated EPS is zero (actual EPS {actual})")]
    UndefinedSurprise {
        /// Reported EPS.
        actual: f64,
    },

    /// Too few aligned observations in the estimation window.
    #[error("insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// Required number of observations.
        required: usize,
        /// Actual number of observations.
        actual: usize,
    },

    /// Stock and benchmark dates do not match one-to-one.
    #[error("misaligned series: {0}")]
    MisalignedSeries(String),

    /// The market model is not identified.
    #[error("degenerate model: {0}")]
    DegenerateModel(String),

    /// Prices are missing inside the event window.
    #[error("incomplete window: {0}")]
    IncompleteWindow(String),

    /// Too few pooled rows or distinct surprises for a regression.
    #[error(
        "insufficient observations: need {required} rows with 2 distinct surprises, got {actual} rows and {distinct} distinct"
    )]
    InsufficientObservations {
        /// Required number of rows.
        required: usize,
        /// Actual number of rows.
        actual: usize,
        /// Number of distinct surprise values.
        distinct: usize,
    },

    /// Horizon reaches past the end of the event window.
    #[error("horizon {horizon} exceeds event window of {window} days")]
    HorizonOutOfRange {
        /// Requested horizon.
        horizon: Horizon,
        /// Event window length.
        window: usize,
    },

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Math error.
    #[error("math error: {0}")]
    Math(#[from] MathError),
}

impl ModelError {
    /// Audit category recorded when this error excludes a stock-event.
    ///
    /// Numerical failures inside a fit are reported as degenerate models.
    #[must_use]
    pub const fn reason(&self) -> ExclusionReason {
        match self {
            Self::UndefinedSurprise { .. } => ExclusionReason::UndefinedSurprise,
            Self::InsufficientData { .. } => ExclusionReason::InsufficientData,
            Self::MisalignedSeries(_) => ExclusionReason::MisalignedSeries,
            Self::IncompleteWindow(_) | Self::HorizonOutOfRange { .. } => {
                ExclusionReason::IncompleteWindow
            }
            Self::InsufficientObservations { .. } => ExclusionReason::InsufficientObservations,
            Self::DegenerateModel(_) | Self::InvalidConfig(_) | Self::Math(_) => {
                ExclusionReason::DegenerateModel
            }
        }
    }

    /// Returns whether this error only affects a single stock-event or horizon.
    #[must_use]
    pub const fn is_event_scoped(&self) -> bool {
        !matches!(self, Self::InvalidConfig(_))
    }
}
