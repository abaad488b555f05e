//! Quantile-based outlier handling.

use ndarray::Array1;

use crate::MathError;

fn check_percentile(percentile: f64) -> Result<(), MathError> {
    if percentile <= 0.0 || percentile >= 0.5 {
        return Err(MathError::InvalidPercentile(percentile));
    }
    Ok(())
}

fn sorted_finite(data: &Array1<f64>) -> Vec<f64> {
    let mut sorted: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Linearly interpolated quantile of the finite values in `data`.
///
/// Uses the `(n - 1) * q` positioning rule, so `q = 0` and `q = 1` return the
/// minimum and maximum.
#[must_use]
pub fn quantile(data: &Array1<f64>, q: f64) -> Option<f64> {
    let sorted = sorted_finite(data);
    sorted_quantile(&sorted, q)
}

fn sorted_quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let pos = (sorted.len() - 1) as f64 * q;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Quantile band `[q(percentile), q(1 - percentile)]` of the finite values.
fn band(data: &Array1<f64>, percentile: f64) -> Result<Option<(f64, f64)>, MathError> {
    check_percentile(percentile)?;
    let sorted = sorted_finite(data);
    Ok(sorted_quantile(&sorted, percentile).zip(sorted_quantile(&sorted, 1.0 - percentile)))
}

/// Mask of values lying inside the `[percentile, 1 - percentile]` quantile band.
///
/// Bounds are inclusive. Non-finite values are always outside the band.
///
/// # Errors
/// Returns `MathError::InvalidPercentile` if percentile is not in (0, 0.5).
pub fn trim_mask(data: &Array1<f64>, percentile: f64) -> Result<Vec<bool>, MathError> {
    let Some((lower, upper)) = band(data, percentile)? else {
        return Ok(vec![false; data.len()]);
    };
    Ok(data.iter().map(|x| x.is_finite() && (lower..=upper).contains(x)).collect())
}

/// Clip values to the quantile band used by [`trim_mask`].
///
/// NaN passes through unchanged; infinities are clipped like any other value.
///
/// # Arguments
/// * `data` - Input array
/// * `percentile` - Tail mass clipped on each side (e.g. 0.05 for 5th/95th)
///
/// # Errors
/// Returns `MathError::InvalidPercentile` if percentile is not in (0, 0.5).
pub fn winsorize(data: &Array1<f64>, percentile: f64) -> Result<Array1<f64>, MathError> {
    let Some((lower, upper)) = band(data, percentile)? else {
        return Ok(data.clone());
    };
    Ok(data.mapv(|x| if x.is_nan() { x } else { x.clamp(lower, upper) }))
}

/// Winsorizer with a validated percentile.
#[derive(Debug, Clone, Copy)]
pub struct Winsorizer {
    percentile: f64,
}

impl Winsorizer {
    /// Create a new winsorizer.
    ///
    /// # Errors
    /// Returns `MathError::InvalidPercentile` if percentile is not in (0, 0.5).
    pub fn new(percentile: f64) -> Result<Self, MathError> {
        check_percentile(percentile)?;
        Ok(Self { percentile })
    }

    /// Get the percentile.
    #[must_use]
    pub const fn percentile(&self) -> f64 {
        self.percentile
    }

    /// Clip `data` to this winsorizer's quantile band.
    ///
    /// # Errors
    /// Never fails for a winsorizer built by [`Self::new`].
    pub fn apply(&self, data: &Array1<f64>) -> Result<Array1<f64>, MathError> {
        winsorize(data, self.percentile)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;
    use rstest::rstest;

    use super::*;

    #[test]
    fn quantile_interpolates() {
        let data = array![4.0, 1.0, 3.0, 2.0, 5.0];
        assert_relative_eq!(quantile(&data, 0.5).unwrap(), 3.0);
        assert_relative_eq!(quantile(&data, 0.1).unwrap(), 1.4, epsilon = 1e-12);
        assert_relative_eq!(quantile(&data, 1.0).unwrap(), 5.0);
        assert!(quantile(&array![], 0.5).is_none());
    }

    #[test]
    fn trim_drops_tails() {
        let data: Array1<f64> = (1..=20).map(f64::from).collect();
        let mask = trim_mask(&data, 0.05).unwrap();
        // q05 = 1.95, q95 = 19.05
        assert!(!mask[0]);
        assert!(!mask[19]);
        assert_eq!(mask.iter().filter(|k| **k).count(), 18);
    }

    #[test]
    fn trim_excludes_nan() {
        let data = array![1.0, f64::NAN, 2.0, 3.0];
        let mask = trim_mask(&data, 0.1).unwrap();
        assert!(!mask[1]);
    }

    #[test]
    fn winsorize_clips_to_quantile_band() {
        let data = array![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 100.0];
        let result = winsorize(&data, 0.1).unwrap();

        // q10 = 1.9, q90 = 9 + 0.1 * 91
        assert_relative_eq!(result[0], 1.9, epsilon = 1e-12);
        assert_relative_eq!(result[9], 18.1, epsilon = 1e-12);
        assert_relative_eq!(result[4], 5.0);

        let mask = trim_mask(&data, 0.1).unwrap();
        let kept: Vec<f64> =
            data.iter().zip(&mask).filter(|(_, k)| **k).map(|(x, _)| *x).collect();
        assert!(kept.iter().all(|x| (1.9..=18.1).contains(x)));
    }

    #[rstest]
    #[case(0.0)]
    #[case(0.5)]
    #[case(0.6)]
    #[case(-0.1)]
    fn invalid_percentile_errors(#[case] pct: f64) {
        let data = array![1.0, 2.0, 3.0];
        assert!(winsorize(&data, pct).is_err());
        assert!(trim_mask(&data, pct).is_err());
        assert!(Winsorizer::new(pct).is_err());
    }

    #[test]
    fn winsorize_handles_nan() {
        let data = array![1.0, f64::NAN, 3.0, 4.0, 5.0];
        let result = winsorize(&data, 0.1).unwrap();
        assert!(result[1].is_nan());
    }

    #[test]
    fn winsorizer_apply() {
        let w = Winsorizer::new(0.1).unwrap();
        let data = array![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        assert_eq!(w.apply(&data).unwrap().len(), 10);
        assert_relative_eq!(w.percentile(), 0.1);
    }
}
