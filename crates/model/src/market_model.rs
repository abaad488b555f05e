//! Market-model estimation.

use ndarray::Array2;
use pead_math::{least_squares, sample_variance};
use pead_primitives::{MarketModelFit, ReturnSeries, Symbol};
use pead_traits::NormalReturnEstimator;
use tracing::debug;

use crate::{MarketModelConfig, ModelError};

/// Benchmark variance at or below this is treated as zero.
const MIN_MARKET_VARIANCE: f64 = 1e-20;

/// Fits `r_stock = alpha + beta * r_market + e` by OLS over the estimation window.
#[derive(Debug, Clone, Default)]
pub struct MarketModelEstimator {
    config: MarketModelConfig,
}

impl MarketModelEstimator {
    /// Create a new estimator with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MarketModelConfig::default())
    }

    /// Minimum number of aligned observations.
    #[must_use]
    pub const fn min_observations(&self) -> usize {
        self.config.min_observations
    }
}

fn check_alignment(stock: &ReturnSeries, market: &ReturnSeries) -> Result<(), ModelError> {
    if stock.len() != market.len() {
        return Err(ModelError::MisalignedSeries(format!(
            "stock has {} observations, benchmark has {}",
            stock.len(),
            market.len()
        )));
    }
    if let Some((i, (s, m))) =
        stock.dates.iter().zip(&market.dates).enumerate().find(|(_, (s, m))| s != m)
    {
        return Err(ModelError::MisalignedSeries(format!(
            "observation {i} is dated {s} for the stock and {m} for the benchmark"
        )));
    }
    if stock.dates.windows(2).any(|w| w[0] >= w[1]) {
        return Err(ModelError::MisalignedSeries("dates are not strictly increasing".to_string()));
    }
    Ok(())
}

impl NormalReturnEstimator for MarketModelEstimator {
    type Config = MarketModelConfig;
    type Fit = MarketModelFit;
    type Error = ModelError;

    fn with_config(config: Self::Config) -> Self {
        Self { config }
    }

    fn fit(
        &self,
        symbol: &Symbol,
        stock: &ReturnSeries,
        market: &ReturnSeries,
    ) -> Result<MarketModelFit, ModelError> {
        check_alignment(stock, market)?;

        let n = stock.len();
        if n < self.config.min_observations {
            return Err(ModelError::InsufficientData {
                required: self.config.min_observations,
                actual: n,
            });
        }

        let market_variance = sample_variance(&market.returns).unwrap_or(0.0);
        if market_variance <= MIN_MARKET_VARIANCE {
            return Err(ModelError::DegenerateModel(
                "benchmark returns have zero variance over the estimation window".to_string(),
            ));
        }

        let x = Array2::from_shape_fn((n, 2), |(i, j)| if j == 0 { 1.0 } else { market.returns[i] });
        let ols = least_squares(&stock.returns, &x)?;

        let fit = MarketModelFit {
            symbol: symbol.clone(),
            alpha: ols.coefficients[0],
            beta: ols.coefficients[1],
            residual_std: ols.residual_variance().sqrt(),
            n_obs: n,
        };
        debug!(
            symbol = %symbol,
            alpha = fit.alpha,
            beta = fit.beta,
            n_obs = n,
            "fitted market model"
        );
        Ok(fit)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::Array1;
    use pead_primitives::Date;

    use super::*;

    fn dates(n: usize) -> Vec<Date> {
        let start = Date::from_ymd_opt(2023, 1, 2).unwrap();
        (0..n).map(|i| start + chrono::Days::new(i as u64)).collect()
    }

    fn market_returns(n: usize) -> Array1<f64> {
        (0..n).map(|i| 0.001 * (((i * 7) % 11) as f64 - 5.0)).collect()
    }

    #[test]
    fn identical_series_gives_unit_beta() {
        let market = ReturnSeries::new(dates(60), market_returns(60));
        let stock = market.clone();

        let fit = MarketModelEstimator::new().fit(&Symbol::new("SPY"), &stock, &market).unwrap();

        assert_relative_eq!(fit.alpha, 0.0, epsilon = 1e-12);
        assert_relative_eq!(fit.beta, 1.0, epsilon = 1e-10);
        assert_relative_eq!(fit.residual_std, 0.0, epsilon = 1e-10);
        assert_eq!(fit.n_obs, 60);
    }

    #[test]
    fn recovers_known_parameters() {
        let m = market_returns(80);
        let noise: Array1<f64> = (0..80).map(|i| 0.0005 * if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let s = m.mapv(|r| 0.0002 + 1.5 * r) + &noise;

        let fit = MarketModelEstimator::new()
            .fit(
                &Symbol::new("NVDA"),
                &ReturnSeries::new(dates(80), s),
                &ReturnSeries::new(dates(80), m),
            )
            .unwrap();

        assert_relative_eq!(fit.beta, 1.5, epsilon = 0.05);
        assert_relative_eq!(fit.alpha, 0.0002, epsilon = 1e-4);
        assert!(fit.residual_std > 0.0);
    }

    #[test]
    fn too_few_observations() {
        let market = ReturnSeries::new(dates(20), market_returns(20));
        let err = MarketModelEstimator::new().fit(&Symbol::new("X"), &market, &market).unwrap_err();
        assert!(matches!(err, ModelError::InsufficientData { required: 30, actual: 20 }));
    }

    #[test]
    fn misaligned_dates() {
        let market = ReturnSeries::new(dates(40), market_returns(40));
        let mut shifted = dates(41);
        shifted.remove(0);
        let stock = ReturnSeries::new(shifted, market_returns(40));
        let err = MarketModelEstimator::new().fit(&Symbol::new("X"), &stock, &market).unwrap_err();
        assert!(matches!(err, ModelError::MisalignedSeries(_)));

        let short = ReturnSeries::new(dates(39), market_returns(39));
        let err = MarketModelEstimator::new().fit(&Symbol::new("X"), &short, &market).unwrap_err();
        assert!(matches!(err, ModelError::MisalignedSeries(_)));
    }

    #[test]
    fn flat_market_is_degenerate() {
        let market = ReturnSeries::new(dates(40), Array1::from_elem(40, 0.001));
        let stock = ReturnSeries::new(dates(40), market_returns(40));
        let err = MarketModelEstimator::new().fit(&Symbol::new("X"), &stock, &market).unwrap_err();
        assert!(matches!(err, ModelError::DegenerateModel(_)));
    }

    #[test]
    fn custom_minimum() {
        let estimator =
            MarketModelEstimator::with_config(MarketModelConfig { min_observations: 10 });
        assert_eq!(estimator.min_observations(), 10);
        let market = ReturnSeries::new(dates(12), market_returns(12));
        assert!(estimator.fit(&Symbol::new("X"), &market, &market).is_ok());
    }
}
