//! Per-horizon CAR summaries.

use ndarray::Array1;
use pead_math::{mean, sample_variance, student_t_p_value};
use pead_primitives::{CarSummary, RegressionTable};

fn mean_where(table: &RegressionTable, keep: impl Fn(f64) -> bool) -> Option<f64> {
    let cars: Array1<f64> =
        table.rows.iter().filter(|r| keep(r.surprise_pct)).map(|r| r.car).collect();
    mean(&cars)
}

/// Cross-sectional distribution of one horizon's CARs.
///
/// The t-statistic tests the mean CAR against zero with `n - 1` degrees of
/// freedom. Returns `None` with fewer than two rows.
#[must_use]
pub fn summarize(table: &RegressionTable) -> Option<CarSummary> {
    let cars = table.cars();
    let n = cars.len();
    let mean_car = mean(&cars)?;
    let std_car = sample_variance(&cars)?.sqrt();

    let t_stat = if std_car > 0.0 {
        mean_car / (std_car / (n as f64).sqrt())
    } else if mean_car == 0.0 {
        0.0
    } else {
        f64::INFINITY.copysign(mean_car)
    };
    let p_value = student_t_p_value(t_stat, n - 1).ok()?;

    Some(CarSummary {
        horizon: table.horizon,
        end_offset: table.end_offset,
        n,
        mean_car,
        std_car,
        t_stat,
        p_value,
        mean_positive: mean_where(table, |s| s > 0.0),
        mean_negative: mean_where(table, |s| s < 0.0),
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use pead_primitives::{Date, Horizon, RegressionInput, Symbol};

    use super::*;

    fn table(points: &[(f64, f64)]) -> RegressionTable {
        let rows = points
            .iter()
            .enumerate()
            .map(|(i, &(surprise_pct, car))| RegressionInput {
                symbol: Symbol::new(format!("S{i}")),
                announcement_date: Date::from_ymd_opt(2024, 7, 1).unwrap(),
                surprise_pct,
                car,
            })
            .collect();
        RegressionTable::new(Horizon::new(10), 10, rows)
    }

    #[test]
    fn summary_statistics() {
        let summary =
            summarize(&table(&[(5.0, 0.02), (-3.0, -0.01), (10.0, 0.04), (0.0, 0.01)])).unwrap();

        assert_eq!(summary.n, 4);
        assert_relative_eq!(summary.mean_car, 0.015, epsilon = 1e-12);
        let std = (0.0013_f64 / 3.0).sqrt();
        assert_relative_eq!(summary.std_car, std, epsilon = 1e-12);
        assert_relative_eq!(summary.t_stat, 0.015 / (std / 2.0), epsilon = 1e-9);
        assert!(summary.p_value > 0.0 && summary.p_value < 1.0);
        assert_relative_eq!(summary.mean_positive.unwrap(), 0.03, epsilon = 1e-12);
        assert_relative_eq!(summary.mean_negative.unwrap(), -0.01, epsilon = 1e-12);
    }

    #[test]
    fn one_sided_surprises_leave_other_mean_empty() {
        let summary = summarize(&table(&[(1.0, 0.01), (2.0, 0.03)])).unwrap();
        assert!(summary.mean_negative.is_none());
        assert!(summary.mean_positive.is_some());
    }

    #[test]
    fn single_row_has_no_summary() {
        assert!(summarize(&table(&[(1.0, 0.01)])).is_none());
        assert!(summarize(&table(&[])).is_none());
    }
}
