//! Price and return series definitions.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::{Date, Symbol};

/// Close that cannot enter a return calculation.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("invalid price {price} for {date}")]
pub struct InvalidPrice {
    /// Observation date.
    pub date: Date,
    /// Offending price.
    pub price: f64,
}

/// Ordered daily closing prices for a ticker or benchmark index.
///
/// Points are kept sorted by date. When a date appears more than once the
/// last observation wins. Non-finite and non-positive prices are treated as
/// missing and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    symbol: Symbol,
    points: Vec<(Date, f64)>,
}

impl PriceSeries {
    /// Create a new price series from unordered `(date, price)` pairs.
    #[must_use]
    pub fn new(symbol: impl Into<Symbol>, points: impl IntoIterator<Item = (Date, f64)>) -> Self {
        let mut points: Vec<(Date, f64)> =
            points.into_iter().filter(|(_, p)| p.is_finite() && *p > 0.0).collect();
        // Stable sort keeps insertion order among equal dates, so the last one survives.
        points.sort_by_key(|(d, _)| *d);
        let mut deduped: Vec<(Date, f64)> = Vec::with_capacity(points.len());
        for (date, price) in points {
            match deduped.last_mut() {
                Some(last) if last.0 == date => last.1 = price,
                _ => deduped.push((date, price)),
            }
        }
        Self { symbol: symbol.into(), points: deduped }
    }

    /// Create a price series, rejecting any non-finite or non-positive price.
    ///
    /// # Errors
    /// Returns the first `InvalidPrice` encountered.
    pub fn try_new(
        symbol: impl Into<Symbol>,
        points: impl IntoIterator<Item = (Date, f64)>,
    ) -> Result<Self, InvalidPrice> {
        let points: Vec<(Date, f64)> = points.into_iter().collect();
        if let Some(&(date, price)) = points.iter().find(|(_, p)| !p.is_finite() || *p <= 0.0) {
            return Err(InvalidPrice { date, price });
        }
        Ok(Self::new(symbol, points))
    }

    /// Ticker symbol.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Price observed on `date`, if any.
    #[must_use]
    pub fn price_on(&self, date: Date) -> Option<f64> {
        self.points.binary_search_by_key(&date, |(d, _)| *d).ok().map(|i| self.points[i].1)
    }

    /// Observation dates in ascending order.
    pub fn dates(&self) -> impl Iterator<Item = Date> + '_ {
        self.points.iter().map(|(d, _)| *d)
    }

    /// `(date, price)` pairs in ascending date order.
    #[must_use]
    pub fn points(&self) -> &[(Date, f64)] {
        &self.points
    }

    /// Earliest observation date.
    #[must_use]
    pub fn first_date(&self) -> Option<Date> {
        self.points.first().map(|(d, _)| *d)
    }

    /// Latest observation date.
    #[must_use]
    pub fn last_date(&self) -> Option<Date> {
        self.points.last().map(|(d, _)| *d)
    }

    /// Sub-series restricted to `start..=end`.
    #[must_use]
    pub fn between(&self, start: Date, end: Date) -> Self {
        let points =
            self.points.iter().filter(|(d, _)| *d >= start && *d <= end).copied().collect();
        Self { symbol: self.symbol.clone(), points }
    }
}

/// Daily simple returns keyed by date.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnSeries {
    /// Return dates in ascending order.
    pub dates: Vec<Date>,
    /// Return values.
    pub returns: Array1<f64>,
}

impl ReturnSeries {
    /// Create a new return series.
    #[must_use]
    pub fn new(dates: Vec<Date>, returns: Array1<f64>) -> Self {
        debug_assert_eq!(dates.len(), returns.len());
        Self { dates, returns }
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}
