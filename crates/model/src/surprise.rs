//! Earnings surprise computation.

use pead_primitives::EarningsEvent;

use crate::ModelError;

/// Percentage earnings surprise `(actual - estimated) / |estimated| * 100`.
///
/// # Errors
/// Returns `ModelError::UndefinedSurprise` if the estimate is zero or either
/// input is not finite.
pub fn surprise_pct(actual: f64, estimated: f64) -> Result<f64, ModelError> {
    if estimated == 0.0 || !estimated.is_finite() || !actual.is_finite() {
        return Err(ModelError::UndefinedSurprise { actual });
    }
    Ok((actual - estimated) / estimated.abs() * 100.0)
}

/// Computes normalized surprises for earnings events.
#[derive(Debug, Clone, Copy, Default)]
pub struct SurpriseCalculator;

impl SurpriseCalculator {
    /// Create a new calculator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Surprise of `event` in percent.
    ///
    /// # Errors
    /// Returns `ModelError::UndefinedSurprise` if the event's estimate is zero.
    pub fn surprise(&self, event: &EarningsEvent) -> Result<f64, ModelError> {
        surprise_pct(event.actual_eps(), event.estimated_eps())
    }
}
