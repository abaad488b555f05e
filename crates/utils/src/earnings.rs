//! Earnings calendar loaded from CSV.

use std::path::Path;

use chrono::NaiveDate;
use pead_primitives::{Date, EarningsEvent, Symbol};
use pead_traits::{EarningsProvider, ProviderError};
use polars::prelude::*;
use tracing::{debug, warn};

use crate::UtilsError;

const SYMBOL: &str = "symbol";
const DATE: &str = "date";
const ACTUAL: &str = "actual_eps";
const ESTIMATED: &str = "estimated_eps";

/// Earnings announcements read from a `symbol,date,actual_eps,estimated_eps` file.
///
/// Dates are `YYYY-MM-DD`. Rows with an empty cell are skipped, since an
/// announcement without both EPS figures cannot be studied. Events are held
/// sorted by symbol and date.
#[derive(Debug, Clone, Default)]
pub struct EarningsFile {
    events: Vec<EarningsEvent>,
}

fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, UtilsError> {
    df.column(name).map_err(|_| UtilsError::MissingColumn(name.to_string()))
}

fn parse_date(raw: &str, row: usize) -> Result<Date, UtilsError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| UtilsError::InvalidValue {
        column: DATE.to_string(),
        row,
        value: raw.to_string(),
    })
}

impl EarningsFile {
    /// Read a calendar from a CSV file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, a required column is missing,
    /// or a date does not parse.
    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self, UtilsError> {
        let path = path.as_ref();
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))?
            .finish()?;
        let file = Self::from_frame(&df)?;
        debug!(path = %path.display(), events = file.len(), "loaded earnings calendar");
        Ok(file)
    }

    /// Build a calendar from a frame with the four calendar columns.
    ///
    /// # Errors
    /// Returns error if a required column is missing or a date does not parse.
    pub fn from_frame(df: &DataFrame) -> Result<Self, UtilsError> {
        let symbols = column(df, SYMBOL)?.cast(&DataType::String)?;
        let dates = column(df, DATE)?.cast(&DataType::String)?;
        let actual = column(df, ACTUAL)?.cast(&DataType::Float64)?;
        let estimated = column(df, ESTIMATED)?.cast(&DataType::Float64)?;

        let rows = symbols
            .str()?
            .into_iter()
            .zip(dates.str()?.into_iter())
            .zip(actual.f64()?.into_iter())
            .zip(estimated.f64()?.into_iter());

        let mut events = Vec::with_capacity(df.height());
        let mut skipped = 0usize;
        for (row, (((symbol, date), actual), estimated)) in rows.enumerate() {
            let (Some(symbol), Some(date), Some(actual), Some(estimated)) =
                (symbol, date, actual, estimated)
            else {
                skipped += 1;
                continue;
            };
            let symbol = symbol.trim();
            if symbol.is_empty() {
                skipped += 1;
                continue;
            }
            events.push(EarningsEvent::new(symbol, parse_date(date, row)?, actual, estimated));
        }

        if skipped > 0 {
            warn!(skipped, "skipped earnings rows with missing fields");
        }
        Ok(Self::from_events(events))
    }

    /// Build a calendar from events already in memory.
    #[must_use]
    pub fn from_events(mut events: Vec<EarningsEvent>) -> Self {
        events.sort_by(|a, b| a.key().cmp(&b.key()));
        Self { events }
    }

    /// All events, sorted by symbol and date.
    #[must_use]
    pub fn all(&self) -> &[EarningsEvent] {
        &self.events
    }

    /// Number of events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Distinct symbols in the calendar, sorted.
    #[must_use]
    pub fn symbols(&self) -> Vec<Symbol> {
        let mut symbols: Vec<Symbol> = self.events.iter().map(|e| e.symbol().clone()).collect();
        symbols.dedup();
        symbols
    }
}

impl EarningsProvider for EarningsFile {
    fn events(
        &self,
        symbols: &[Symbol],
        start: Date,
        end: Date,
    ) -> Result<Vec<EarningsEvent>, ProviderError> {
        Ok(self
            .events
            .iter()
            .filter(|e| symbols.is_empty() || symbols.contains(e.symbol()))
            .filter(|e| (start..=end).contains(&e.announcement_date()))
            .cloned()
            .collect())
    }
}
