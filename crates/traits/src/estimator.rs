//! Normal-return model trait definitions.

use pead_primitives::{MarketModelFit, ReturnSeries, Symbol};

/// A fitted model of a stock's expected return given the benchmark return.
pub trait ExpectedReturn {
    /// Expected stock return on a day the benchmark returned `market_return`.
    fn expected_return(&self, market_return: f64) -> f64;

    /// Actual minus expected return.
    fn abnormal_return(&self, stock_return: f64, market_return: f64) -> f64 {
        stock_return - self.expected_return(market_return)
    }
}

impl ExpectedReturn for MarketModelFit {
    fn expected_return(&self, market_return: f64) -> f64 {
        self.alpha + self.beta * market_return
    }
}

/// Trait for estimating a normal-return model over an estimation window.
pub trait NormalReturnEstimator: Send + Sync {
    /// Configuration type for this estimator.
    type Config: Default + Clone + Send + Sync;

    /// Fitted model produced by the estimator.
    type Fit: ExpectedReturn;

    /// Error raised when the model cannot be fitted.
    type Error: std::error::Error;

    /// Create a new estimator with the given configuration.
    fn with_config(config: Self::Config) -> Self;

    /// Fit the model for `symbol`.
    ///
    /// # Arguments
    /// * `stock` - Stock returns over the estimation window
    /// * `market` - Benchmark returns on the same dates
    ///
    /// # Errors
    /// Returns `Self::Error` if the series are misaligned, too short, or
    /// do not identify the model.
    fn fit(
        &self,
        symbol: &Symbol,
        stock: &ReturnSeries,
        market: &ReturnSeries,
    ) -> Result<Self::Fit, Self::Error>;
}
