//! Post-earnings-announcement drift study CLI.
//!
//! Reads an earnings calendar, downloads adjusted closes from Yahoo Finance for
//! every symbol and the benchmark, runs the event study, prints the per-horizon
//! results and writes every output table as CSV.
//!
//! Usage: `pead --earnings events.csv [--benchmark ^GSPC] [--horizons 1,2,5,10,30]
//! [--robust] [--trim 0.05] [--config study.json] [--output output]`

use std::{collections::BTreeMap, fs, path::PathBuf, process};

use chrono::{DateTime, NaiveDate};
use clap::Parser;
use pead::{
    model::{EventStudy, OutlierPolicy, PriceStore, StudyConfig, StudyReport},
    primitives::{Date, EarningsEvent, Horizon, PriceSeries, Symbol},
    traits::EarningsProvider,
    utils::{EarningsFile, export_report},
};
use time::OffsetDateTime;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use yahoo_finance_api as yahoo;

#[derive(Debug, Parser)]
#[command(name = "pead")]
#[command(about = "Event study of post-earnings-announcement drift", long_about = None)]
#[command(version)]
struct Cli {
    /// Earnings calendar CSV with columns symbol,date,actual_eps,estimated_eps
    #[arg(long)]
    earnings: PathBuf,

    /// Only study these symbols (comma separated)
    #[arg(long, value_delimiter = ',')]
    symbols: Vec<String>,

    /// Benchmark index defining the trading calendar
    #[arg(long)]
    benchmark: Option<String>,

    /// CAR horizons in trading days (comma separated)
    #[arg(long, value_delimiter = ',')]
    horizons: Vec<usize>,

    /// Report HC1 heteroskedasticity-robust standard errors
    #[arg(long)]
    robust: bool,

    /// Drop CARs outside the [p, 1-p] quantile band before regressing
    #[arg(long, value_name = "P", conflicts_with = "winsorize")]
    trim: Option<f64>,

    /// Clip CARs to the [p, 1-p] quantile band before regressing
    #[arg(long, value_name = "P")]
    winsorize: Option<f64>,

    /// Process events on all cores
    #[arg(long)]
    parallel: bool,

    /// JSON study configuration; flags override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for the CSV tables
    #[arg(long, default_value = "output")]
    output: PathBuf,

    /// Log filter, overriding RUST_LOG
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    /// Study configuration from the optional JSON file with flag overrides.
    fn study_config(&self) -> Result<StudyConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
            None => StudyConfig::default(),
        };

        if let Some(benchmark) = &self.benchmark {
            config.benchmark = Symbol::new(benchmark.to_uppercase());
        }
        if !self.horizons.is_empty() {
            config.horizons = self.horizons.iter().copied().map(Horizon::new).collect();
        }
        if self.robust {
            config.regression.robust = true;
        }
        if let Some(p) = self.trim {
            config.regression.outliers = OutlierPolicy::Trim(p);
        }
        if let Some(p) = self.winsorize {
            config.regression.outliers = OutlierPolicy::Winsorize(p);
        }
        if self.parallel {
            config.parallel = true;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let study = EventStudy::new(cli.study_config()?)?;

    let calendar = EarningsFile::from_csv(&cli.earnings)?;
    let symbols: Vec<Symbol> = cli.symbols.iter().map(|s| Symbol::new(s.to_uppercase())).collect();
    let events = calendar.events(&symbols, NaiveDate::MIN, NaiveDate::MAX)?;
    if events.is_empty() {
        let path = cli.earnings.display();
        return Err(format!("no earnings events selected from {path}").into());
    }
    info!(events = events.len(), path = %cli.earnings.display(), "loaded earnings calendar");

    let prices = fetch_prices(&study, &events).await?;
    let report = study.run(&events, &prices);

    print_report(&report);
    let written = export_report(&report, &cli.output)?;
    println!("\nWrote {} tables to {}", written.len(), cli.output.display());
    Ok(())
}

/// Download every price series the study will read.
///
/// Each symbol is fetched once over the union of its events' price ranges; the
/// benchmark covers every event. A stock that fails to download is left out of
/// the store, so its events are excluded rather than aborting the run.
async fn fetch_prices(
    study: &EventStudy,
    events: &[EarningsEvent],
) -> Result<PriceStore, Box<dyn std::error::Error>> {
    let mut ranges: BTreeMap<Symbol, (Date, Date)> = BTreeMap::new();
    for event in events {
        let (start, end) = study.price_range(event.announcement_date())?;
        ranges
            .entry(event.symbol().clone())
            .and_modify(|(s, e)| {
                *s = (*s).min(start);
                *e = (*e).max(end);
            })
            .or_insert((start, end));
    }
    let first = ranges.values().map(|(s, _)| *s).min();
    let last = ranges.values().map(|(_, e)| *e).max();
    let (Some(first), Some(last)) = (first, last) else {
        return Ok(PriceStore::new());
    };

    let provider = yahoo::YahooConnector::new()?;
    let mut store = PriceStore::new();

    let benchmark = study.config().benchmark.clone();
    let series = download(&provider, &benchmark, first, last).await?;
    if series.is_empty() {
        return Err(format!("no benchmark prices for {benchmark}").into());
    }
    store.insert(series);

    print!("Fetching prices for {} symbols", ranges.len());
    for (i, (symbol, (start, end))) in ranges.iter().enumerate() {
        match download(&provider, symbol, *start, *end).await {
            Ok(series) if !series.is_empty() => store.insert(series),
            Ok(_) => warn!(symbol = %symbol, "no prices returned"),
            Err(e) => warn!(symbol = %symbol, error = %e, "price download failed"),
        }
        if (i + 1) % 10 == 0 {
            print!(".");
        }
    }
    println!(" done ({} series loaded)", store.len());

    Ok(store)
}

/// Adjusted closes for `symbol` between two calendar dates, clipped to today.
async fn download(
    provider: &yahoo::YahooConnector,
    symbol: &Symbol,
    start: Date,
    end: Date,
) -> Result<PriceSeries, Box<dyn std::error::Error>> {
    let now = OffsetDateTime::now_utc();
    let start = to_offset(start)?;
    let end = to_offset(end)?.min(now);

    let response = provider.get_quote_history(symbol.as_str(), start, end).await?;
    let points: Vec<(Date, f64)> = response
        .quotes()?
        .iter()
        .filter_map(|q| Some((DateTime::from_timestamp(q.timestamp, 0)?.date_naive(), q.adjclose)))
        .collect();
    let series = PriceSeries::try_new(symbol.clone(), points.iter().copied()).unwrap_or_else(|e| {
        warn!(symbol = %symbol, error = %e, "dropping unusable closes");
        PriceSeries::new(symbol.clone(), points)
    });
    Ok(series)
}

fn to_offset(date: Date) -> Result<OffsetDateTime, Box<dyn std::error::Error>> {
    let timestamp = date.and_hms_opt(0, 0, 0).ok_or("invalid date")?.and_utc().timestamp();
    Ok(OffsetDateTime::from_unix_timestamp(timestamp)?)
}

fn print_report(report: &StudyReport) {
    println!(
        "\n================================================================================"
    );
    println!("POST-EARNINGS-ANNOUNCEMENT DRIFT");
    println!(
        "================================================================================"
    );
    println!("Events studied: {}", report.outcomes.len());
    println!("Events excluded: {}", report.exclusions.len());

    println!("\nCAR SUMMARY:");
    println!(
        "{:<8} {:>6} {:>10} {:>10} {:>8} {:>8} {:>10} {:>10}",
        "Horizon", "N", "Mean CAR", "Std CAR", "t", "p", "Mean(+)", "Mean(-)"
    );
    println!(
        "{:-<8} {:-^6} {:-^10} {:-^10} {:-^8} {:-^8} {:-^10} {:-^10}",
        "", "", "", "", "", "", "", ""
    );
    for s in &report.summaries {
        println!(
            "{:<8} {:>6} {:>9.2}% {:>9.2}% {:>8.2} {:>8.3} {:>10} {:>10}",
            s.horizon_label(),
            s.n,
            s.mean_car * 100.0,
            s.std_car * 100.0,
            s.t_stat,
            s.p_value,
            percent(s.mean_positive),
            percent(s.mean_negative),
        );
    }

    println!("\nCAR ON SURPRISE REGRESSION:");
    println!(
        "{:<8} {:>6} {:>12} {:>12} {:>10} {:>8} {:>8} {:>6}",
        "Horizon", "N", "Intercept", "Slope", "Std Err", "t", "p", "R2"
    );
    println!(
        "{:-<8} {:-^6} {:-^12} {:-^12} {:-^10} {:-^8} {:-^8} {:-^6}",
        "", "", "", "", "", "", "", ""
    );
    for r in &report.regressions {
        println!(
            "{:<8} {:>6} {:>12.6} {:>12.6} {:>10.6} {:>8.2} {:>8.3} {:>6.3}{}",
            r.horizon_label(),
            r.n,
            r.intercept,
            r.slope,
            r.std_err,
            r.t_stat,
            r.p_value,
            r.r_squared,
            if r.robust { "  (HC1)" } else { "" },
        );
    }

    for skipped in &report.skipped {
        println!(
            "{:<8} skipped ({}): {}",
            skipped.horizon_label(),
            skipped.reason,
            skipped.detail
        );
    }
}

fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.2}%", v * 100.0))
}
