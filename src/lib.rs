//! FX Forecast - synthetic exchange rate forecasts with confidence bands
//!
//! This library provides:
//! - Forecast path generation from a spot rate (bounded random walk with
//!   cyclical drift, confidence bands and decaying model confidence)
//! - Summary risk metrics (mean confidence, annualised volatility)
//! - Spot rate providers with an explicit stale-fallback policy
//! - Conversion previews and fixed stress scenarios
//! - Parallel batch runs and "last request wins" refresh sequencing

pub mod error;
pub mod market;
pub mod forecast;
pub mod conversion;
pub mod refresh;
pub mod scenario;

// Re-export commonly used types
pub use error::{ForecastError, SpotRateError};
pub use market::{CurrencyPair, ExchangeRateObservation, SpotQuote, SpotRateProvider, StaticSpotRateProvider};
pub use forecast::{
    ForecastConfig, ForecastMetrics, ForecastPathGenerator, ForecastPoint, ForecastRun,
    MetricsAggregator, RandomSource, RngSource,
};
pub use refresh::{RefreshOutcome, RefreshSequencer, RefreshTicket};
pub use scenario::{ForecastRequest, ForecastRunner};
