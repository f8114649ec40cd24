//! Explicit policy for spot rate provider failures
//!
//! The dashboard favours availability over freshness: when the provider
//! fails, the last good quote for the pair (or a configured default) is
//! used instead of surfacing the error. That choice lives here as a
//! policy object rather than as scattered error-swallowing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::data::{CurrencyPair, SpotQuote};
use super::provider::SpotRateProvider;
use crate::error::SpotRateError;

/// Default substitute quote used by the dashboard
pub const DEFAULT_FALLBACK_QUOTE: SpotQuote = SpotQuote {
    rate: 1547.25,
    change_percent: 0.0,
    volume: 0.0,
};

/// What to do when the provider cannot supply a quote
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Propagate the provider error to the caller
    FailClosed,
    /// Substitute the last good quote for the pair, else `default`
    StaleOrDefault { default: SpotQuote },
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        FallbackPolicy::StaleOrDefault {
            default: DEFAULT_FALLBACK_QUOTE,
        }
    }
}

/// Where a resolved quote came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteSource {
    Live,
    Stale,
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedQuote {
    pub quote: SpotQuote,
    pub source: QuoteSource,
}

/// Provider + fallback policy + last-known-good cache
pub struct QuoteResolver<P> {
    provider: P,
    policy: FallbackPolicy,
    last_good: HashMap<CurrencyPair, SpotQuote>,
}

impl<P: SpotRateProvider> QuoteResolver<P> {
    pub fn new(provider: P, policy: FallbackPolicy) -> Self {
        Self {
            provider,
            policy,
            last_good: HashMap::new(),
        }
    }

    pub fn policy(&self) -> FallbackPolicy {
        self.policy
    }

    /// Last quote successfully fetched for `pair`
    pub fn last_good(&self, pair: &CurrencyPair) -> Option<SpotQuote> {
        self.last_good.get(pair).copied()
    }

    /// Fetch a quote, applying the fallback policy on failure
    ///
    /// A quote with a non-positive rate counts as a provider failure, so the
    /// generator is never handed an unusable rate by a live source.
    pub fn resolve(&mut self, pair: &CurrencyPair) -> Result<ResolvedQuote, SpotRateError> {
        let fetched = self.provider.fetch(pair).and_then(|quote| {
            if quote.is_valid() {
                Ok(quote)
            } else {
                Err(SpotRateError::Unavailable(format!(
                    "provider returned unusable rate {} for {}",
                    quote.rate, pair
                )))
            }
        });

        match fetched {
            Ok(quote) => {
                self.last_good.insert(pair.clone(), quote);
                Ok(ResolvedQuote { quote, source: QuoteSource::Live })
            }
            Err(err) => match self.policy {
                FallbackPolicy::FailClosed => Err(err),
                FallbackPolicy::StaleOrDefault { default } => {
                    if let Some(quote) = self.last_good.get(pair).copied() {
                        log::warn!("Spot fetch for {} failed ({}); using last good rate {}", pair, err, quote.rate);
                        Ok(ResolvedQuote { quote, source: QuoteSource::Stale })
                    } else {
                        log::warn!("Spot fetch for {} failed ({}); using default rate {}", pair, err, default.rate);
                        Ok(ResolvedQuote { quote: default, source: QuoteSource::Default })
                    }
                }
            },
        }
    }
}
