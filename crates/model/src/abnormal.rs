//! Abnormal returns and their cumulation into CARs.

use ndarray::Array1;
use pead_primitives::{
    AbnormalReturnRecord, CarRecord, Date, EventKey, EventWindow, Horizon, PriceSeries,
    TradingSpan,
};
use pead_traits::ExpectedReturn;

use crate::ModelError;

/// Running sum of abnormal returns: element `k` is the CAR through day `k + 1`.
#[must_use]
pub fn cumulative_abnormal_returns(records: &[AbnormalReturnRecord]) -> Array1<f64> {
    let mut total = 0.0;
    records
        .iter()
        .map(|r| {
            total += r.abnormal_return;
            total
        })
        .collect()
}

fn daily_return(series: &PriceSeries, prev: Date, day: Date) -> Result<f64, ModelError> {
    let missing = |date: Date| {
        ModelError::IncompleteWindow(format!("{} has no price on {date}", series.symbol()))
    };
    let p0 = series.price_on(prev).ok_or_else(|| missing(prev))?;
    let p1 = series.price_on(day).ok_or_else(|| missing(day))?;
    Ok(p1 / p0 - 1.0)
}

/// Applies a fitted normal-return model over an event window.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbnormalReturnEngine {
    window: EventWindow,
}

impl AbnormalReturnEngine {
    /// Create an engine for the default `[t+1, t+30]` window.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine whose CARs are labelled against `window`.
    #[must_use]
    pub const fn with_window(window: EventWindow) -> Self {
        Self { window }
    }

    /// Event window the engine cumulates over.
    #[must_use]
    pub const fn window(&self) -> &EventWindow {
        &self.window
    }

    /// Daily abnormal returns over `span`, in chronological order.
    ///
    /// Either every day of the window yields a record or none does: a single
    /// missing price fails the whole window. Missing days are never filled.
    ///
    /// # Errors
    /// Returns `ModelError::IncompleteWindow` if either series lacks a price on
    /// any window day or on the day before the window.
    pub fn abnormal_returns<M: ExpectedReturn>(
        &self,
        model: &M,
        key: &EventKey,
        span: &TradingSpan,
        stock: &PriceSeries,
        market: &PriceSeries,
    ) -> Result<Vec<AbnormalReturnRecord>, ModelError> {
        span.pairs()
            .map(|(prev, day)| {
                let stock_return = daily_return(stock, prev, day)?;
                let market_return = daily_return(market, prev, day)?;
                Ok(AbnormalReturnRecord {
                    symbol: key.symbol.clone(),
                    announcement_date: key.announcement_date,
                    date: day,
                    abnormal_return: model.abnormal_return(stock_return, market_return),
                })
            })
            .collect()
    }

    /// CARs at each horizon from one abnormal-return sequence.
    ///
    /// The running sum is computed once and read at every horizon. Each record
    /// carries the window offset of its last cumulated day.
    ///
    /// # Errors
    /// Returns `ModelError::HorizonOutOfRange` if a horizon is zero or longer
    /// than the sequence.
    pub fn cumulate(
        &self,
        records: &[AbnormalReturnRecord],
        horizons: &[Horizon],
    ) -> Result<Vec<CarRecord>, ModelError> {
        let window = records.len();
        let path = cumulative_abnormal_returns(records);

        horizons
            .iter()
            .map(|&horizon| {
                let days = horizon.days();
                if days == 0 || days > window {
                    return Err(ModelError::HorizonOutOfRange { horizon, window });
                }
                let first = &records[0];
                Ok(CarRecord {
                    symbol: first.symbol.clone(),
                    announcement_date: first.announcement_date,
                    horizon,
                    end_offset: self.window.horizon_end(horizon),
                    car: path[days - 1],
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use pead_primitives::{MarketModelFit, Symbol};
    use rstest::rstest;

    use super::*;

    fn day(i: u64) -> Date {
        Date::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i)
    }

    fn key() -> EventKey {
        EventKey { symbol: Symbol::new("AAPL"), announcement_date: day(0) }
    }

    fn unit_fit() -> MarketModelFit {
        MarketModelFit {
            symbol: Symbol::new("AAPL"),
            alpha: 0.0,
            beta: 1.0,
            residual_std: 0.0,
            n_obs: 60,
        }
    }

    fn prices(symbol: &str, returns: &[f64]) -> PriceSeries {
        let mut level = 100.0;
        let mut points = vec![(day(0), level)];
        for (i, r) in returns.iter().enumerate() {
            level *= 1.0 + r;
            points.push((day(i as u64 + 1), level));
        }
        PriceSeries::new(symbol, points)
    }

    fn span(n: u64) -> TradingSpan {
        TradingSpan { base: day(0), days: (1..=n).map(day).collect() }
    }

    fn records(values: &[f64]) -> Vec<AbnormalReturnRecord> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| AbnormalReturnRecord {
                symbol: Symbol::new("AAPL"),
                announcement_date: day(0),
                date: day(i as u64 + 1),
                abnormal_return: v,
            })
            .collect()
    }

    #[test]
    fn stock_tracking_market_has_no_abnormal_return() {
        let market_returns = [0.01, -0.02, 0.005, 0.0, 0.013];
        let market = prices("^GSPC", &market_returns);
        let stock = prices("AAPL", &market_returns);

        let ars = AbnormalReturnEngine::new()
            .abnormal_returns(&unit_fit(), &key(), &span(5), &stock, &market)
            .unwrap();
        assert_eq!(ars.len(), 5);
        for r in &ars {
            assert_relative_eq!(r.abnormal_return, 0.0, epsilon = 1e-12);
        }

        let horizons: Vec<Horizon> = (1..=5).map(Horizon::new).collect();
        for car in AbnormalReturnEngine::new().cumulate(&ars, &horizons).unwrap() {
            assert_relative_eq!(car.car, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn abnormal_returns_follow_model() {
        let market_returns = [0.01, -0.02, 0.005];
        let stock_returns = [0.03, -0.01, 0.0];
        let fit = MarketModelFit { alpha: 0.001, beta: 1.5, ..unit_fit() };

        let ars = AbnormalReturnEngine::new()
            .abnormal_returns(
                &fit,
                &key(),
                &span(3),
                &prices("AAPL", &stock_returns),
                &prices("^GSPC", &market_returns),
            )
            .unwrap();

        let dates: Vec<Date> = ars.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![day(1), day(2), day(3)]);
        assert_relative_eq!(ars[0].abnormal_return, 0.03 - 0.016, epsilon = 1e-12);
        assert_relative_eq!(ars[1].abnormal_return, -0.01 + 0.029, epsilon = 1e-12);
        assert_relative_eq!(ars[2].abnormal_return, -0.0085, epsilon = 1e-12);
    }

    #[test]
    fn missing_day_fails_whole_window() {
        let market = prices("^GSPC", &[0.01, 0.02, 0.03, 0.04]);
        let full = prices("AAPL", &[0.01, 0.02, 0.03, 0.04]);
        let gappy = PriceSeries::new(
            "AAPL",
            full.points().iter().copied().filter(|(d, _)| *d != day(3)),
        );

        let err = AbnormalReturnEngine::new()
            .abnormal_returns(&unit_fit(), &key(), &span(4), &gappy, &market)
            .unwrap_err();
        assert!(matches!(err, ModelError::IncompleteWindow(_)));
    }

    #[test]
    fn car_sums_through_horizon() {
        let ars = records(&[0.01, 0.0, -0.005, 0.02, 0.0]);
        let cars = AbnormalReturnEngine::new()
            .cumulate(&ars, &[Horizon::new(1), Horizon::new(3), Horizon::new(5)])
            .unwrap();

        assert_eq!(cars[2].horizon_label(), "t+5");
        assert_eq!(cars[2].end_offset, 5);
        assert_relative_eq!(cars[0].car, 0.01, epsilon = 1e-12);
        assert_relative_eq!(cars[1].car, 0.005, epsilon = 1e-12);
        assert_relative_eq!(cars[2].car, 0.025, epsilon = 1e-12);
    }

    #[test]
    fn cars_are_labelled_by_window_offset() {
        let ars = records(&[0.01, 0.0, -0.005, 0.02, 0.0]);
        let engine = AbnormalReturnEngine::with_window(EventWindow::new(-1, 3));
        let horizons = [Horizon::new(1), Horizon::new(2), Horizon::new(5)];
        let cars = engine.cumulate(&ars, &horizons).unwrap();

        let labels: Vec<String> = cars.iter().map(CarRecord::horizon_label).collect();
        assert_eq!(labels, vec!["t-1", "t+0", "t+3"]);
        assert_relative_eq!(cars[2].car, 0.025, epsilon = 1e-12);
    }

    #[rstest]
    #[case(1, 1)]
    #[case(2, 3)]
    #[case(4, 6)]
    #[case(0, 10)]
    fn car_is_additive(#[case] h: usize, #[case] k: usize) {
        let values = [0.004, -0.012, 0.02, 0.001, -0.003, 0.007, 0.0, 0.015, -0.009, 0.002];
        let ars = records(&values);
        let path = cumulative_abnormal_returns(&ars);

        let car_h = if h == 0 { 0.0 } else { path[h - 1] };
        let tail: f64 = values[h..h + k].iter().sum();
        assert_relative_eq!(path[h + k - 1], car_h + tail, epsilon = 1e-12);
    }

    #[test]
    fn horizon_past_window_rejected() {
        let ars = records(&[0.01, 0.02]);
        let err = AbnormalReturnEngine::new().cumulate(&ars, &[Horizon::new(3)]).unwrap_err();
        assert!(matches!(err, ModelError::HorizonOutOfRange { window: 2, .. }));
        assert!(AbnormalReturnEngine::new().cumulate(&[], &[Horizon::new(1)]).is_err());
    }
}
