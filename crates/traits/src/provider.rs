//! Data provider trait definitions.
//!
//! Providers are resolved before the study runs; the engine itself performs no
//! I/O and only reads in-memory series through these traits.

use pead_primitives::{Date, EarningsEvent, PriceSeries, Symbol};

/// Errors raised by data providers.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The provider has no data for the symbol.
    #[error("unknown symbol: {0}")]
    UnknownSymbol(Symbol),

    /// The provider could not serve the request.
    #[error("data unavailable: {0}")]
    Unavailable(String),

    /// Source data could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Source of daily closing prices.
pub trait PriceProvider: Send + Sync {
    /// Prices for `symbol` between `start` and `end` inclusive.
    ///
    /// # Errors
    /// Returns `ProviderError` if the symbol is unknown or the data cannot be served.
    fn prices(&self, symbol: &Symbol, start: Date, end: Date) -> Result<PriceSeries, ProviderError>;
}

/// Source of earnings announcements.
pub trait EarningsProvider {
    /// Events for `symbols` announced between `start` and `end` inclusive.
    ///
    /// An empty `symbols` slice selects every symbol the provider knows.
    ///
    /// # Errors
    /// Returns `ProviderError` if the calendar cannot be served.
    fn events(
        &self,
        symbols: &[Symbol],
        start: Date,
        end: Date,
    ) -> Result<Vec<EarningsEvent>, ProviderError>;
}
