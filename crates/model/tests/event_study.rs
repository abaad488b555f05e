//! End-to-end event-study scenarios on synthetic prices.
#![allow(missing_docs)]

use approx::assert_relative_eq;
use pead_model::{
    CrossSectionalRegressor, EventStudy, MarketModelConfig, PriceStore, RegressionConfig,
    StudyConfig,
};
use pead_primitives::{
    Date, EarningsEvent, EstimationWindow, EventWindow, ExclusionReason, Horizon, PriceSeries,
    RegressionInput, RegressionTable, Symbol,
};
use rand::{SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Normal};

const EVENT_DAY: usize = 80;
const ABNORMAL: [f64; 5] = [0.01, 0.0, -0.005, 0.02, 0.0];

fn weekdays(n: usize) -> Vec<Date> {
    let mut d = Date::from_ymd_opt(2024, 1, 1).unwrap();
    let mut out = Vec::with_capacity(n);
    while out.len() < n {
        if chrono::Datelike::weekday(&d).number_from_monday() <= 5 {
            out.push(d);
        }
        d = d.succ_opt().unwrap();
    }
    out
}

fn market_return(i: usize) -> f64 {
    0.001 * (((i * 7) % 11) as f64 - 5.0)
}

fn benchmark(days: &[Date]) -> PriceSeries {
    let mut level = 4000.0;
    let points = days.iter().enumerate().map(|(i, d)| {
        if i > 0 {
            level *= 1.0 + market_return(i);
        }
        (*d, level)
    });
    PriceSeries::new("^GSPC", points.collect::<Vec<_>>())
}

/// Stock with alpha 0 and beta 1 that earns `scale * ABNORMAL` over days t+1..t+5.
fn stock(symbol: &str, days: &[Date], scale: f64, skip: Option<usize>) -> PriceSeries {
    let mut level = 100.0;
    let mut points = Vec::with_capacity(days.len());
    for (i, d) in days.iter().enumerate() {
        if i > 0 {
            let abnormal = i
                .checked_sub(EVENT_DAY + 1)
                .and_then(|k| ABNORMAL.get(k))
                .map_or(0.0, |ar| scale * ar);
            level *= 1.0 + market_return(i) + abnormal;
        }
        if skip != Some(i) {
            points.push((*d, level));
        }
    }
    PriceSeries::new(symbol, points)
}

fn config() -> StudyConfig {
    StudyConfig {
        estimation: EstimationWindow::new(60, 1),
        event: EventWindow::new(1, 5),
        horizons: (1..=5).map(Horizon::new).collect(),
        market_model: MarketModelConfig { min_observations: 30 },
        regression: RegressionConfig { min_observations: 3, ..RegressionConfig::default() },
        ..StudyConfig::default()
    }
}

#[test]
fn three_event_drift_study() {
    let days = weekdays(100);
    let prices: PriceStore = [
        benchmark(&days),
        stock("AAA", &days, 1.0, None),
        stock("BBB", &days, 1.0, None),
        stock("CCC", &days, 1.0, None),
    ]
    .into_iter()
    .collect();
    let date = days[EVENT_DAY];
    let events = [
        EarningsEvent::new("AAA", date, 1.05, 1.00),
        EarningsEvent::new("BBB", date, 0.97, 1.00),
        EarningsEvent::new("CCC", date, 1.10, 1.00),
    ];

    let study = EventStudy::new(config()).unwrap();
    let report = study.run(&events, &prices);

    assert!(report.exclusions.is_empty());
    assert_eq!(report.outcomes.len(), 3);
    for outcome in &report.outcomes {
        assert_relative_eq!(outcome.fit.alpha, 0.0, epsilon = 1e-10);
        assert_relative_eq!(outcome.fit.beta, 1.0, epsilon = 1e-8);
        assert_eq!(outcome.fit.n_obs, 60);
        assert_eq!(outcome.abnormal_returns.len(), 5);
        for (record, expected) in outcome.abnormal_returns.iter().zip(ABNORMAL) {
            assert_relative_eq!(record.abnormal_return, expected, epsilon = 1e-9);
        }
        assert_relative_eq!(outcome.car_at(Horizon::new(5)).unwrap(), 0.025, epsilon = 1e-9);
        assert_relative_eq!(outcome.car_at(Horizon::new(3)).unwrap(), 0.005, epsilon = 1e-9);
    }

    let surprises: Vec<f64> =
        report.table(Horizon::new(5)).unwrap().rows.iter().map(|r| r.surprise_pct).collect();
    assert_eq!(surprises.len(), 3);
    assert_relative_eq!(surprises[0], 5.0, epsilon = 1e-9);
    assert_relative_eq!(surprises[1], -3.0, epsilon = 1e-9);
    assert_relative_eq!(surprises[2], 10.0, epsilon = 1e-9);

    let result = report.regression(Horizon::new(5)).unwrap();
    assert!(result.slope.is_finite() && result.intercept.is_finite());
    assert_relative_eq!(result.slope, 0.0, epsilon = 1e-9);
    assert_relative_eq!(result.intercept, 0.025, epsilon = 1e-9);
    assert_eq!(result.n, 3);

    let again = study.run(&events, &prices);
    assert_eq!(again.regression(Horizon::new(5)), Some(result));
}

#[test]
fn drift_slope_matches_closed_form() {
    let days = weekdays(100);
    let prices: PriceStore = [
        benchmark(&days),
        stock("AAA", &days, 1.0, None),
        stock("BBB", &days, -1.0, None),
        stock("CCC", &days, 2.0, None),
    ]
    .into_iter()
    .collect();
    let date = days[EVENT_DAY];
    let events = [
        EarningsEvent::new("AAA", date, 1.05, 1.00),
        EarningsEvent::new("BBB", date, 0.97, 1.00),
        EarningsEvent::new("CCC", date, 1.10, 1.00),
    ];

    let report = EventStudy::new(config()).unwrap().run(&events, &prices);
    let result = report.regression(Horizon::new(5)).unwrap();

    let xs = [5.0, -3.0, 10.0];
    let ys = [0.025, -0.025, 0.05];
    let x_mean = xs.iter().sum::<f64>() / 3.0;
    let y_mean = ys.iter().sum::<f64>() / 3.0;
    let sxy: f64 = xs.iter().zip(ys).map(|(x, y)| (x - x_mean) * (y - y_mean)).sum();
    let sxx: f64 = xs.iter().map(|x| (x - x_mean).powi(2)).sum();
    let slope = sxy / sxx;

    assert_relative_eq!(result.slope, slope, epsilon = 1e-8);
    assert_relative_eq!(result.intercept, y_mean - slope * x_mean, epsilon = 1e-8);
    assert!(result.slope > 0.0);
    assert!(result.p_value > 0.0 && result.p_value < 1.0);

    let summary = report.summary(Horizon::new(5)).unwrap();
    assert_eq!(summary.n, 3);
    assert_relative_eq!(summary.mean_car, y_mean, epsilon = 1e-9);
    assert_relative_eq!(summary.mean_negative.unwrap(), -0.025, epsilon = 1e-9);
}

#[test]
fn zero_estimate_is_excluded_everywhere() {
    let days = weekdays(100);
    let prices: PriceStore = [
        benchmark(&days),
        stock("AAA", &days, 1.0, None),
        stock("BBB", &days, 1.0, None),
        stock("CCC", &days, 1.0, None),
        stock("ZERO", &days, 1.0, None),
    ]
    .into_iter()
    .collect();
    let date = days[EVENT_DAY];
    let events = [
        EarningsEvent::new("AAA", date, 1.05, 1.00),
        EarningsEvent::new("ZERO", date, 0.12, 0.0),
        EarningsEvent::new("BBB", date, 0.97, 1.00),
        EarningsEvent::new("CCC", date, 1.10, 1.00),
    ];

    let report = EventStudy::new(config()).unwrap().run(&events, &prices);

    assert_eq!(report.exclusions.len(), 1);
    let exclusion = report.exclusion(&events[1].key()).unwrap();
    assert_eq!(exclusion.reason, ExclusionReason::UndefinedSurprise);
    assert_eq!(exclusion.reason.to_string(), "UndefinedSurpriseError");

    let zero = Symbol::new("ZERO");
    for table in &report.tables {
        assert_eq!(table.len(), 3);
        assert!(table.rows.iter().all(|r| r.symbol != zero));
    }
}

#[test]
fn missing_event_day_excludes_without_partial_records() {
    let days = weekdays(100);
    let prices: PriceStore = [
        benchmark(&days),
        stock("AAA", &days, 1.0, None),
        stock("GAP", &days, 1.0, Some(EVENT_DAY + 3)),
    ]
    .into_iter()
    .collect();
    let date = days[EVENT_DAY];
    let events =
        [EarningsEvent::new("AAA", date, 1.05, 1.00), EarningsEvent::new("GAP", date, 1.2, 1.0)];

    let report = EventStudy::new(config()).unwrap().run(&events, &prices);

    let exclusion = report.exclusion(&events[1].key()).unwrap();
    assert_eq!(exclusion.reason, ExclusionReason::IncompleteWindow);
    assert_eq!(exclusion.reason.to_string(), "IncompleteWindowError");
    let gap = Symbol::new("GAP");
    assert!(report.abnormal_returns().all(|r| r.symbol != gap));
    assert!(report.cars().all(|c| c.symbol != gap));
    assert_eq!(report.abnormal_returns().count(), 5);

    // One surviving event is too few to regress at any horizon.
    assert!(report.regressions.is_empty());
    assert_eq!(report.skipped.len(), 5);
    let skipped = &report.skipped[0];
    assert_eq!(skipped.reason, ExclusionReason::InsufficientObservations);
    assert_eq!(skipped.reason.to_string(), "InsufficientObservationsError");
    assert!(skipped.detail.contains("got 1"));
}

#[test]
fn parallel_run_matches_serial() {
    let days = weekdays(100);
    let symbols = ["A1", "A2", "A3", "A4", "A5", "A6", "A7", "A8"];
    let mut series = vec![benchmark(&days)];
    series.extend(symbols.iter().enumerate().map(|(i, s)| {
        let skip = (i == 5).then_some(EVENT_DAY + 2);
        stock(s, &days, i as f64 - 3.0, skip)
    }));
    let prices: PriceStore = series.into_iter().collect();
    let date = days[EVENT_DAY];
    let events: Vec<EarningsEvent> = symbols
        .iter()
        .enumerate()
        .map(|(i, s)| EarningsEvent::new(*s, date, 1.0 + 0.01 * (i * i) as f64, 1.0))
        .collect();

    let serial = EventStudy::new(config()).unwrap().run(&events, &prices);
    let parallel =
        EventStudy::new(StudyConfig { parallel: true, ..config() }).unwrap().run(&events, &prices);

    assert_eq!(serial, parallel);
    assert_eq!(serial.outcomes.len(), 7);
    assert_eq!(serial.exclusions.len(), 1);
    assert_eq!(serial.regressions.len(), 5);
}

#[test]
fn independent_noise_is_rarely_significant() {
    let mut rng = StdRng::seed_from_u64(20_240_101);
    let surprise = Normal::new(0.0, 8.0).unwrap();
    let car = Normal::new(0.0, 0.05).unwrap();
    let regressor = CrossSectionalRegressor::new();
    let date = Date::from_ymd_opt(2024, 4, 22).unwrap();

    let trials = 200;
    let mut rejections = 0;
    for _ in 0..trials {
        let rows = (0..50)
            .map(|i| RegressionInput {
                symbol: Symbol::new(format!("N{i:02}")),
                announcement_date: date,
                surprise_pct: surprise.sample(&mut rng),
                car: car.sample(&mut rng),
            })
            .collect();
        let result = regressor.regress(&RegressionTable::new(Horizon::new(5), 5, rows)).unwrap();
        if result.p_value < 0.05 {
            rejections += 1;
        }
    }

    assert!(f64::from(rejections) / f64::from(trials) < 0.15);
}
