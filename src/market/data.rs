//! Currency pairs, observations and spot quotes

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ForecastError;

/// A `BASE/QUOTE` currency pair label, e.g. `USD/NGN`
///
/// Only used for labelling; generation never depends on the pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyPair {
    base: String,
    quote: String,
}

impl CurrencyPair {
    /// Build a pair from two ISO-4217 style codes (case-insensitive)
    pub fn new(base: &str, quote: &str) -> Result<Self, ForecastError> {
        let base = normalize_code(base)
            .ok_or_else(|| ForecastError::InvalidPair(format!("{}/{}", base, quote)))?;
        let quote = normalize_code(quote)
            .ok_or_else(|| ForecastError::InvalidPair(format!("{}/{}", base, quote)))?;
        Ok(Self { base, quote })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn quote(&self) -> &str {
        &self.quote
    }
}

fn normalize_code(code: &str) -> Option<String> {
    let code = code.trim();
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(code.to_ascii_uppercase())
    } else {
        None
    }
}

impl FromStr for CurrencyPair {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((base, quote)) => {
                Self::new(base, quote).map_err(|_| ForecastError::InvalidPair(s.to_string()))
            }
            None => Err(ForecastError::InvalidPair(s.to_string())),
        }
    }
}

impl TryFrom<String> for CurrencyPair {
    type Error = ForecastError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CurrencyPair> for String {
    fn from(pair: CurrencyPair) -> Self {
        pair.to_string()
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

/// One day's price point, observed or simulated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRateObservation {
    pub date: NaiveDate,
    pub rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

impl ExchangeRateObservation {
    pub fn new(date: NaiveDate, rate: f64) -> Self {
        Self {
            date,
            rate,
            high: None,
            low: None,
            volume: None,
        }
    }
}

/// Current spot rate as returned by a provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpotQuote {
    /// Spot exchange rate (quote units per base unit)
    pub rate: f64,

    /// Daily change in percent (0.12 = +0.12%)
    pub change_percent: f64,

    /// Traded volume
    pub volume: f64,
}

impl SpotQuote {
    pub fn new(rate: f64, change_percent: f64, volume: f64) -> Self {
        Self { rate, change_percent, volume }
    }

    /// A quote is usable as generator input only with a positive finite rate
    /// and a non-negative volume
    pub fn is_valid(&self) -> bool {
        self.rate.is_finite() && self.rate > 0.0 && self.volume.is_finite() && self.volume >= 0.0
    }
}
