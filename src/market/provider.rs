//! Spot rate providers

use std::collections::BTreeMap;

use super::data::{CurrencyPair, SpotQuote};
use crate::error::SpotRateError;

/// Source of current spot rates
///
/// Implementations may fail or time out. The forecast engine never calls a
/// provider itself; callers resolve a quote first (see [`super::QuoteResolver`])
/// and hand the rate to the generator.
pub trait SpotRateProvider {
    fn fetch(&self, pair: &CurrencyPair) -> Result<SpotQuote, SpotRateError>;
}

impl<P: SpotRateProvider + ?Sized> SpotRateProvider for &P {
    fn fetch(&self, pair: &CurrencyPair) -> Result<SpotQuote, SpotRateError> {
        (**self).fetch(pair)
    }
}

impl<P: SpotRateProvider + ?Sized> SpotRateProvider for Box<P> {
    fn fetch(&self, pair: &CurrencyPair) -> Result<SpotQuote, SpotRateError> {
        (**self).fetch(pair)
    }
}

/// In-memory quote table standing in for a live rates API
#[derive(Debug, Clone, Default)]
pub struct StaticSpotRateProvider {
    quotes: BTreeMap<CurrencyPair, SpotQuote>,
}

impl StaticSpotRateProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Naira cross rates shown on the dashboard
    pub fn dashboard_defaults() -> Self {
        let table = [
            ("USD", 1547.25, 0.12, 2_400_000.0),
            ("GBP", 1945.80, -0.08, 890_000.0),
            ("EUR", 1688.45, 0.05, 1_200_000.0),
            ("JPY", 10.34, 0.18, 650_000.0),
        ];

        let mut provider = Self::new();
        for (base, rate, change, volume) in table {
            if let Ok(pair) = CurrencyPair::new(base, "NGN") {
                provider.insert(pair, SpotQuote::new(rate, change, volume));
            }
        }
        provider
    }

    pub fn insert(&mut self, pair: CurrencyPair, quote: SpotQuote) {
        self.quotes.insert(pair, quote);
    }

    /// Pairs with a quote, in sorted order
    pub fn pairs(&self) -> impl Iterator<Item = &CurrencyPair> {
        self.quotes.keys()
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

impl SpotRateProvider for StaticSpotRateProvider {
    fn fetch(&self, pair: &CurrencyPair) -> Result<SpotQuote, SpotRateError> {
        self.quotes
            .get(pair)
            .copied()
            .ok_or_else(|| SpotRateError::UnknownPair(pair.to_string()))
    }
}
