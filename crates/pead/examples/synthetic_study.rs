//! Example: Event Study on a Synthetic Universe
//!
//! Simulates a benchmark and a universe of stocks whose post-announcement
//! returns drift in the direction of the earnings surprise, then runs the full
//! study:
//! 1. Market-model fit over each estimation window
//! 2. Abnormal and cumulative abnormal returns per event
//! 3. Cross-sectional regression of CAR on surprise per horizon
//!
//! Run with: `cargo run --example synthetic_study --features full`

use chrono::{Datelike, Days, NaiveDate};
use pead::{
    model::{EventStudy, OutlierPolicy, PriceStore, RegressionConfig, StudyConfig},
    primitives::{EarningsEvent, PriceSeries},
    utils::{exclusion_frame, regression_frame, summary_frame},
};
use rand::{SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Normal};

/// Trading days simulated.
const TRADING_DAYS: usize = 600;

/// Stocks in the universe.
const N_STOCKS: usize = 80;

/// Days between a stock's announcements.
const QUARTER: usize = 63;

/// Daily abnormal return per percentage point of surprise, over 30 days.
const DRIFT_PER_POINT: f64 = 0.0001;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = StdRng::seed_from_u64(42);
    let days = weekdays(NaiveDate::from_ymd_opt(2022, 1, 3).ok_or("bad start date")?);

    let market_noise = Normal::new(0.0004, 0.01)?;
    let market: Vec<f64> = (0..TRADING_DAYS).map(|_| market_noise.sample(&mut rng)).collect();

    let mut prices = PriceStore::new();
    prices.insert(series("^GSPC", &days, &market));

    let beta_dist = Normal::new(1.0, 0.3)?;
    let idio = Normal::new(0.0, 0.015)?;
    let surprise_dist = Normal::new(0.0, 6.0)?;
    let mut events = Vec::new();

    for s in 0..N_STOCKS {
        let symbol = format!("SYN{s:03}");
        let beta = beta_dist.sample(&mut rng);
        let mut returns: Vec<f64> =
            market.iter().map(|m| beta * m + idio.sample(&mut rng)).collect();

        // Stagger announcements so events do not share a day.
        let mut day = 150 + s % QUARTER;
        while day + 31 < TRADING_DAYS {
            let surprise = surprise_dist.sample(&mut rng);
            for r in &mut returns[day + 1..=day + 30] {
                *r += DRIFT_PER_POINT * surprise;
            }
            let estimated = 1.0;
            events.push(EarningsEvent::new(
                symbol.as_str(),
                days[day],
                estimated * (1.0 + surprise / 100.0),
                estimated,
            ));
            day += QUARTER;
        }
        prices.insert(series(&symbol, &days, &returns));
    }

    println!("Simulated {} events across {N_STOCKS} stocks\n", events.len());

    let config = StudyConfig {
        regression: RegressionConfig {
            robust: true,
            outliers: OutlierPolicy::Trim(0.05),
            ..RegressionConfig::default()
        },
        parallel: true,
        ..StudyConfig::default()
    };
    let report = EventStudy::new(config)?.run(&events, &prices);

    println!("CAR summary:\n{}\n", summary_frame(&report.summaries)?);
    println!("Regression of CAR on surprise:\n{}\n", regression_frame(&report.regressions)?);
    if !report.exclusions.is_empty() {
        println!("Exclusions:\n{}", exclusion_frame(&report.exclusions)?);
    }

    if let Some(result) = report.regressions.last() {
        println!(
            "Expected slope at {}: {:.4}, estimated: {:.4}",
            result.horizon_label(),
            DRIFT_PER_POINT * result.horizon.days() as f64,
            result.slope
        );
    }

    Ok(())
}

fn weekdays(start: NaiveDate) -> Vec<NaiveDate> {
    let mut out = Vec::with_capacity(TRADING_DAYS);
    let mut d = start;
    while out.len() < TRADING_DAYS {
        if d.weekday().number_from_monday() <= 5 {
            out.push(d);
        }
        d = d + Days::new(1);
    }
    out
}

fn series(symbol: &str, days: &[NaiveDate], returns: &[f64]) -> PriceSeries {
    let mut level = 100.0;
    let points: Vec<(NaiveDate, f64)> = days
        .iter()
        .zip(returns)
        .enumerate()
        .map(|(i, (d, r))| {
            if i > 0 {
                level *= 1.0 + r;
            }
            (*d, level)
        })
        .collect();
    PriceSeries::new(symbol, points)
}
