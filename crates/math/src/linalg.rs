//! Ordinary least squares and coefficient covariance estimators.

use ndarray::{Array1, Array2, Axis};

use crate::MathError;

/// Pivots smaller than this are treated as zero.
const SINGULAR_TOLERANCE: f64 = 1e-14;

/// Result of an ordinary least squares fit.
#[derive(Debug, Clone)]
pub struct OlsResult {
    /// Estimated coefficients, one per design column.
    pub coefficients: Array1<f64>,
    /// Residuals `y - X b`.
    pub residuals: Array1<f64>,
    /// R-squared.
    pub r_squared: f64,
    /// `(X'X)^-1`.
    pub xtx_inv: Array2<f64>,
    /// Residual degrees of freedom `n - p`.
    pub dof: usize,
}

impl OlsResult {
    /// Sum of squared residuals.
    #[must_use]
    pub fn ssr(&self) -> f64 {
        self.residuals.iter().map(|r| r * r).sum()
    }

    /// Residual variance `SSR / (n - p)`.
    #[must_use]
    pub fn residual_variance(&self) -> f64 {
        self.ssr() / self.dof as f64
    }
}

/// Fit `y = X b + e` by ordinary least squares.
///
/// Solves the normal equations `b = (X'X)^-1 X'y`. The inverse is kept so that
/// coefficient covariances can be computed without refactoring the system.
///
/// # Arguments
/// * `y` - Response vector (n,)
/// * `x` - Design matrix (n x p), including any intercept column
///
/// # Errors
/// Returns error if dimensions mismatch, `n <= p`, or `X'X` is singular.
pub fn least_squares(y: &Array1<f64>, x: &Array2<f64>) -> Result<OlsResult, MathError> {
    let n = y.len();
    let p = x.ncols();

    if x.nrows() != n {
        return Err(MathError::DimensionMismatch { expected: n, actual: x.nrows() });
    }
    if n == 0 {
        return Err(MathError::EmptyData);
    }
    if n <= p {
        return Err(MathError::Underdetermined { observations: n, parameters: p });
    }
    if y.iter().chain(x.iter()).any(|v| !v.is_finite()) {
        return Err(MathError::NumericalInstability("non-finite input to least squares".into()));
    }

    let xtx = x.t().dot(x);
    let xty = x.t().dot(y);
    let xtx_inv = invert(&xtx)?;
    let coefficients = xtx_inv.dot(&xty);

    let fitted = x.dot(&coefficients);
    let residuals = y - &fitted;

    let y_mean = y.mean().unwrap_or(0.0);
    let ss_tot: f64 = y.iter().map(|yi| (yi - y_mean).powi(2)).sum();
    let ss_res: f64 = residuals.iter().map(|r| r.powi(2)).sum();
    let r_squared = if ss_tot > 0.0 { 1.0 - ss_res / ss_tot } else { 0.0 };

    Ok(OlsResult { coefficients, residuals, r_squared, xtx_inv, dof: n - p })
}

/// Homoskedastic coefficient covariance `s^2 (X'X)^-1`.
#[must_use]
pub fn classical_covariance(result: &OlsResult) -> Array2<f64> {
    &result.xtx_inv * result.residual_variance()
}

/// White heteroskedasticity-consistent covariance with the HC1 small-sample
/// correction: `n / (n - p) * (X'X)^-1 X' diag(e^2) X (X'X)^-1`.
///
/// # Errors
/// Returns error if `x` does not match the fitted residuals.
pub fn hc1_covariance(x: &Array2<f64>, result: &OlsResult) -> Result<Array2<f64>, MathError> {
    let n = result.residuals.len();
    if x.nrows() != n {
        return Err(MathError::DimensionMismatch { expected: n, actual: x.nrows() });
    }

    let squared = result.residuals.mapv(|e| e * e);
    let scaled = x * &squared.insert_axis(Axis(1));
    let meat = x.t().dot(&scaled);
    let sandwich = result.xtx_inv.dot(&meat).dot(&result.xtx_inv);

    Ok(sandwich * (n as f64 / result.dof as f64))
}

/// Invert a square matrix using Gauss-Jordan elimination with partial pivoting.
///
/// # Errors
/// Returns error if the matrix is empty, not square, or singular.
pub fn invert(a: &Array2<f64>) -> Result<Array2<f64>, MathError> {
    let n = a.nrows();
    if n == 0 {
        return Err(MathError::EmptyData);
    }
    if a.ncols() != n {
        return Err(MathError::LinearAlgebra("matrix must be square".to_string()));
    }

    // Augmented matrix [A | I]
    let mut aug = Array2::zeros((n, 2 * n));
    for i in 0..n {
        for j in 0..n {
            aug[[i, j]] = a[[i, j]];
        }
        aug[[i, n + i]] = 1.0;
    }

    for col in 0..n {
        let mut max_row = col;
        let mut max_val = aug[[col, col]].abs();
        for row in (col + 1)..n {
            if aug[[row, col]].abs() > max_val {
                max_val = aug[[row, col]].abs();
                max_row = row;
            }
        }

        if max_val < SINGULAR_TOLERANCE {
            return Err(MathError::LinearAlgebra(
                "matrix is singular or nearly singular".to_string(),
            ));
        }

        if max_row != col {
            for j in 0..2 * n {
                aug.swap([col, j], [max_row, j]);
            }
        }

        let pivot = aug[[col, col]];
        for j in 0..2 * n {
            aug[[col, j]] /= pivot;
        }

        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = aug[[row, col]];
            if factor != 0.0 {
                for j in 0..2 * n {
                    aug[[row, j]] -= factor * aug[[col, j]];
                }
            }
        }
    }

    let mut inv = Array2::zeros((n, n));
    for i in 0..n {
        for j in 0..n {
            inv[[i, j]] = aug[[i, n + j]];
        }
    }
    Ok(inv)
}
