//! Errors raised by the regression and outlier routines.

/// Errors from least squares, covariance, inference and outlier handling.
#[derive(Debug, thiserror::Error)]
pub enum MathError {
    /// Outlier percentile outside the open interval (0, 0.5).
    #[error("invalid percentile: {0} (must be in (0, 0.5))")]
    InvalidPercentile(f64),

    /// Response and design matrix disagree on the number of rows.
    #[error("dimension mismatch: expected {expected} rows, got {actual}")]
    DimensionMismatch {
        /// Rows in the response.
        expected: usize,
        /// Rows in the design matrix.
        actual: usize,
    },

    /// Fewer observations than needed to leave residual degrees of freedom.
    #[error("underdetermined system: {observations} observations for {parameters} parameters")]
    Underdetermined {
        /// Number of observations.
        observations: usize,
        /// Number of parameters.
        parameters: usize,
    },

    /// Singular or malformed matrix.
    #[error("linear algebra error: {0}")]
    LinearAlgebra(String),

    /// No observations.
    #[error("empty data provided")]
    EmptyData,

    /// Non-finite input or an undefined statistic.
    #[error("numerical instability: {0}")]
    NumericalInstability(String),
}
