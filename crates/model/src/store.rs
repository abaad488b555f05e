//! In-memory price provider.

use std::collections::HashMap;

use pead_primitives::{Date, PriceSeries, Symbol};
use pead_traits::{PriceProvider, ProviderError};

/// Price series held in memory, keyed by symbol.
///
/// Callers download or load prices up front and hand the store to the study,
/// which then runs without I/O.
#[derive(Debug, Clone, Default)]
pub struct PriceStore {
    series: HashMap<Symbol, PriceSeries>,
}

impl PriceStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a series, replacing any previous series for the same symbol.
    pub fn insert(&mut self, series: PriceSeries) {
        self.series.insert(series.symbol().clone(), series);
    }

    /// Number of symbols held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Full series for `symbol`.
    #[must_use]
    pub fn get(&self, symbol: &Symbol) -> Option<&PriceSeries> {
        self.series.get(symbol)
    }
}

impl FromIterator<PriceSeries> for PriceStore {
    fn from_iter<I: IntoIterator<Item = PriceSeries>>(iter: I) -> Self {
        let mut store = Self::new();
        for series in iter {
            store.insert(series);
        }
        store
    }
}

impl PriceProvider for PriceStore {
    fn prices(&self, symbol: &Symbol, start: Date, end: Date) -> Result<PriceSeries, ProviderError> {
        self.get(symbol)
            .map(|series| series.between(start, end))
            .ok_or_else(|| ProviderError::UnknownSymbol(symbol.clone()))
    }
}
