//! Cross-sectional regression of CARs on earnings surprise.

use ndarray::Array2;
use pead_math::{
    Winsorizer, classical_covariance, hc1_covariance, least_squares, student_t_p_value, trim_mask,
};
use pead_primitives::{RegressionResult, RegressionTable};
use tracing::debug;

use crate::{ModelError, OutlierPolicy, RegressionConfig};

/// The regression estimates two coefficients and needs at least one residual
/// degree of freedom.
const MIN_ROWS: usize = 3;

/// Runs `car = intercept + slope * surprise_pct + e` once per horizon.
#[derive(Debug, Clone, Default)]
pub struct CrossSectionalRegressor {
    config: RegressionConfig,
}

impl CrossSectionalRegressor {
    /// Create a new regressor with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new regressor with the given configuration.
    #[must_use]
    pub const fn with_config(config: RegressionConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &RegressionConfig {
        &self.config
    }

    /// Apply the configured outlier policy to the table's CARs.
    ///
    /// Trimming drops rows outside the quantile band; winsorizing clips their
    /// CARs. Row order is preserved either way.
    ///
    /// # Errors
    /// Returns `ModelError::Math` if the percentile is invalid.
    pub fn prepare(&self, table: &RegressionTable) -> Result<RegressionTable, ModelError> {
        let cars = table.cars();
        let rows = match self.config.outliers {
            OutlierPolicy::None => table.rows.clone(),
            OutlierPolicy::Trim(p) => {
                let keep = trim_mask(&cars, p)?;
                table.rows.iter().zip(keep).filter(|(_, k)| *k).map(|(r, _)| r.clone()).collect()
            }
            OutlierPolicy::Winsorize(p) => {
                let clipped = Winsorizer::new(p)?.apply(&cars)?;
                table
                    .rows
                    .iter()
                    .zip(clipped)
                    .map(|(r, car)| {
                        let mut row = r.clone();
                        row.car = car;
                        row
                    })
                    .collect()
            }
        };
        Ok(RegressionTable { horizon: table.horizon, end_offset: table.end_offset, rows })
    }

    /// Regress the horizon's CARs on surprise.
    ///
    /// # Errors
    /// Returns `ModelError::InsufficientObservations` if, after outlier
    /// handling, fewer rows than the configured minimum remain or fewer than
    /// two distinct surprise values exist.
    pub fn regress(&self, table: &RegressionTable) -> Result<RegressionResult, ModelError> {
        let table = self.prepare(table)?;
        let n = table.len();
        let required = self.config.min_observations.max(MIN_ROWS);

        let mut distinct: Vec<f64> = table.rows.iter().map(|r| r.surprise_pct).collect();
        distinct.sort_by(f64::total_cmp);
        distinct.dedup();
        let distinct = distinct.len();

        if n < required || distinct < 2 {
            return Err(ModelError::InsufficientObservations { required, actual: n, distinct });
        }

        let surprises = table.surprises();
        let x = Array2::from_shape_fn((n, 2), |(i, j)| if j == 0 { 1.0 } else { surprises[i] });
        let ols = least_squares(&table.cars(), &x)?;

        let covariance =
            if self.config.robust { hc1_covariance(&x, &ols)? } else { classical_covariance(&ols) };
        let intercept_std_err = covariance[[0, 0]].max(0.0).sqrt();
        let std_err = covariance[[1, 1]].max(0.0).sqrt();

        let slope = ols.coefficients[1];
        let t_stat = if std_err > 0.0 {
            slope / std_err
        } else if slope == 0.0 {
            0.0
        } else {
            f64::INFINITY.copysign(slope)
        };
        let p_value = student_t_p_value(t_stat, ols.dof)?;

        debug!(horizon = %table.horizon, n, slope, t_stat, p_value, "ran cross-sectional regression");

        Ok(RegressionResult {
            horizon: table.horizon,
            end_offset: table.end_offset,
            intercept: ols.coefficients[0],
            intercept_std_err,
            slope,
            std_err,
            t_stat,
            p_value,
            r_squared: ols.r_squared,
            n,
            robust: self.config.robust,
        })
    }
}
