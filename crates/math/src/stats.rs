//! Descriptive statistics and Student-t inference.

use ndarray::Array1;
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::MathError;

/// Arithmetic mean, `None` for empty input.
#[must_use]
pub fn mean(data: &Array1<f64>) -> Option<f64> {
    data.mean()
}

/// Unbiased sample variance, `None` with fewer than two observations.
#[must_use]
pub fn sample_variance(data: &Array1<f64>) -> Option<f64> {
    let n = data.len();
    if n < 2 {
        return None;
    }
    let m = data.mean()?;
    Some(data.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (n - 1) as f64)
}

/// Two-sided p-value of a t-statistic with `dof` degrees of freedom.
///
/// Infinite statistics map to a p-value of zero.
///
/// # Errors
/// Returns error if `dof` is zero or `t` is NaN.
pub fn student_t_p_value(t: f64, dof: usize) -> Result<f64, MathError> {
    if dof == 0 {
        return Err(MathError::NumericalInstability("zero degrees of freedom".to_string()));
    }
    if t.is_nan() {
        return Err(MathError::NumericalInstability("t-statistic is NaN".to_string()));
    }
    if t.is_infinite() {
        return Ok(0.0);
    }

    let dist = StudentsT::new(0.0, 1.0, dof as f64)
        .map_err(|e| MathError::NumericalInstability(e.to_string()))?;
    let p = 2.0 * (1.0 - dist.cdf(t.abs()));
    Ok(p.clamp(0.0, 1.0))
}
