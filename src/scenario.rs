//! Forecast runner for batch generation
//!
//! Holds one configured generator and runs many requests against it. Each
//! request gets its own random source derived from the runner's base seed
//! and the request's position, so batch output does not depend on how rayon
//! schedules the work.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, SpotRateError};
use crate::forecast::{ForecastConfig, ForecastPathGenerator, ForecastRun, RngSource};
use crate::market::{CurrencyPair, QuoteResolver, SpotRateProvider};

/// One generation request: `(pair, current_rate, horizon_days)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRequest {
    pub pair: CurrencyPair,
    pub current_rate: f64,
    pub horizon_days: i64,
}

/// Pre-configured runner for reproducible batch forecasts
///
/// # Example
/// ```ignore
/// let runner = ForecastRunner::new(ForecastConfig::default(), 42);
///
/// for days in [7, 14, 30] {
///     let request = ForecastRequest { pair: pair.clone(), current_rate: 1547.25, horizon_days: days };
///     let run = runner.run(&request, 0)?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ForecastRunner {
    generator: ForecastPathGenerator,
    base_seed: u64,
}

impl ForecastRunner {
    pub fn new(config: ForecastConfig, base_seed: u64) -> Self {
        Self {
            generator: ForecastPathGenerator::new(config),
            base_seed,
        }
    }

    /// Create runner around an existing generator (e.g. one with a pinned date)
    pub fn with_generator(generator: ForecastPathGenerator, base_seed: u64) -> Self {
        Self { generator, base_seed }
    }

    pub fn generator(&self) -> &ForecastPathGenerator {
        &self.generator
    }

    /// Seed used for the request at `index`
    pub fn seed_for(&self, index: usize) -> u64 {
        // splitmix64 finalizer
        let mut z = self.base_seed.wrapping_add((index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Run a single request with the source for `index`
    pub fn run(&self, request: &ForecastRequest, index: usize) -> Result<ForecastRun, ForecastError> {
        let mut source = RngSource::seeded(self.seed_for(index));
        self.generator
            .run(&request.pair, request.current_rate, request.horizon_days, &mut source)
    }

    /// Run all requests in parallel; results keep request order
    pub fn run_batch(&self, requests: &[ForecastRequest]) -> Vec<Result<ForecastRun, ForecastError>> {
        log::info!("Running {} forecast requests", requests.len());
        requests
            .par_iter()
            .enumerate()
            .map(|(index, request)| self.run(request, index))
            .collect()
    }

    /// Every pair crossed with every horizon, spot taken from `resolver`
    ///
    /// Provider failures are handled by the resolver's fallback policy; under
    /// `FailClosed` the first failure aborts the whole request list.
    pub fn requests_for<P: SpotRateProvider>(
        resolver: &mut QuoteResolver<P>,
        pairs: &[CurrencyPair],
        horizons: &[i64],
    ) -> Result<Vec<ForecastRequest>, SpotRateError> {
        let mut requests = Vec::with_capacity(pairs.len() * horizons.len());
        for pair in pairs {
            let resolved = resolver.resolve(pair)?;
            for &horizon_days in horizons {
                requests.push(ForecastRequest {
                    pair: pair.clone(),
                    current_rate: resolved.quote.rate,
                    horizon_days,
                });
            }
        }
        Ok(requests)
    }
}

impl Default for ForecastRunner {
    fn default() -> Self {
        Self::new(ForecastConfig::default(), 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::{FallbackPolicy, StaticSpotRateProvider, DEFAULT_FALLBACK_QUOTE};
    use chrono::NaiveDate;

    fn runner() -> ForecastRunner {
        let generator = ForecastPathGenerator::default()
            .with_reference_date(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap());
        ForecastRunner::with_generator(generator, 42)
    }

    #[test]
    fn test_batch_matches_sequential() {
        let provider = StaticSpotRateProvider::dashboard_defaults();
        let pairs: Vec<_> = provider.pairs().cloned().collect();
        let mut resolver = QuoteResolver::new(&provider, FallbackPolicy::FailClosed);
        let requests = ForecastRunner::requests_for(&mut resolver, &pairs, &[7, 14, 30]).unwrap();
        assert_eq!(requests.len(), 12);

        let runner = runner();
        let parallel = runner.run_batch(&requests);
        for (index, (request, result)) in requests.iter().zip(&parallel).enumerate() {
            let sequential = runner.run(request, index).unwrap();
            let result = result.as_ref().unwrap();
            assert_eq!(result.points, sequential.points);
            assert_eq!(result.pair, request.pair);
        }
    }

    #[test]
    fn test_batch_reports_invalid_requests_individually() {
        let pair: CurrencyPair = "USD/NGN".parse().unwrap();
        let requests = vec![
            ForecastRequest { pair: pair.clone(), current_rate: 1547.25, horizon_days: 5 },
            ForecastRequest { pair: pair.clone(), current_rate: 1547.25, horizon_days: 0 },
            ForecastRequest { pair, current_rate: -1.0, horizon_days: 5 },
        ];

        let results = runner().run_batch(&requests);
        assert_eq!(results[0].as_ref().unwrap().points.len(), 5);
        assert_eq!(results[1].as_ref().unwrap_err(), &ForecastError::InvalidHorizon(0));
        assert_eq!(results[2].as_ref().unwrap_err(), &ForecastError::InvalidRate(-1.0));
    }

    #[test]
    fn test_seeds_differ_by_index() {
        let runner = runner();
        assert_ne!(runner.seed_for(0), runner.seed_for(1));
        assert_eq!(runner.seed_for(3), runner.seed_for(3));
    }

    #[test]
    fn test_unknown_pair_follows_fallback_policy() {
        let provider = StaticSpotRateProvider::dashboard_defaults();
        let pairs: Vec<CurrencyPair> = vec!["CHF/NGN".parse().unwrap(), "USD/NGN".parse().unwrap()];

        let mut resolver = QuoteResolver::new(&provider, FallbackPolicy::default());
        let requests = ForecastRunner::requests_for(&mut resolver, &pairs, &[14]).unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].current_rate, DEFAULT_FALLBACK_QUOTE.rate);
        assert_eq!(requests[1].current_rate, 1547.25);

        let mut resolver = QuoteResolver::new(&provider, FallbackPolicy::FailClosed);
        assert!(matches!(
            ForecastRunner::requests_for(&mut resolver, &pairs, &[14]),
            Err(SpotRateError::UnknownPair(ref p)) if p == "CHF/NGN"
        ));
    }
}
