//! Market inputs: currency pairs, spot quotes and their providers

mod data;
mod fallback;
mod provider;
pub mod loader;

pub use data::{CurrencyPair, ExchangeRateObservation, SpotQuote};
pub use fallback::{FallbackPolicy, QuoteResolver, QuoteSource, ResolvedQuote, DEFAULT_FALLBACK_QUOTE};
pub use provider::{SpotRateProvider, StaticSpotRateProvider};
pub use loader::{load_quotes, load_quotes_from_reader};
