//! Synthetic forecast path generation
//!
//! A bounded multiplicative random walk: each day the rate moves by a small
//! sinusoidal drift plus a uniform shock, and a confidence band of random
//! width is placed around it. Model confidence decays linearly with the
//! day index down to a floor.

use chrono::{Days, NaiveDate, Utc};

use super::config::ForecastConfig;
use super::metrics::MetricsAggregator;
use super::points::{ForecastPoint, ForecastRun};
use super::random::RandomSource;
use crate::error::{ForecastError, Result};
use crate::market::CurrencyPair;

/// Generates forecast paths from a starting rate
#[derive(Debug, Clone, Default)]
pub struct ForecastPathGenerator {
    config: ForecastConfig,
    /// Pinned "today"; the current UTC date when unset
    reference_date: Option<NaiveDate>,
}

impl ForecastPathGenerator {
    pub fn new(config: ForecastConfig) -> Self {
        Self {
            config,
            reference_date: None,
        }
    }

    /// Pin the reference date so dates are reproducible
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Date the first forecast point follows
    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date.unwrap_or_else(|| Utc::now().date_naive())
    }

    /// Generate `horizon_days` points starting the day after the reference date
    ///
    /// Each day consumes exactly four draws, in order: daily volatility,
    /// shock, band width, volume. Inputs are validated before any draw.
    pub fn generate<S: RandomSource + ?Sized>(
        &self,
        current_rate: f64,
        horizon_days: i64,
        source: &mut S,
    ) -> Result<Vec<ForecastPoint>> {
        self.generate_from(self.reference_date(), current_rate, horizon_days, source)
    }

    /// Same as [`Self::generate`] with an explicit reference date
    pub fn generate_from<S: RandomSource + ?Sized>(
        &self,
        reference_date: NaiveDate,
        current_rate: f64,
        horizon_days: i64,
        source: &mut S,
    ) -> Result<Vec<ForecastPoint>> {
        let days = validate_inputs(current_rate, horizon_days)?;
        self.config.validate()?;

        let cfg = &self.config;
        let mut points = Vec::with_capacity(days as usize);
        let mut rate = current_rate;

        for i in 1..=days {
            let day = i as f64;
            let trend = (day * cfg.trend_frequency).sin() * cfg.trend_amplitude;
            let daily_volatility = source.uniform(cfg.min_daily_volatility, cfg.max_daily_volatility);
            let shock = source.uniform(-0.5, 0.5) * daily_volatility;

            // Unrounded rate carries forward
            rate *= 1.0 + trend + shock;

            let band_width = rate * source.uniform(cfg.min_band_width, cfg.max_band_width);
            if !(rate + band_width).is_finite() {
                return Err(ForecastError::InvalidRate(current_rate));
            }
            let model_confidence = (cfg.initial_confidence - day * cfg.confidence_decay).max(cfg.confidence_floor);
            let volume = cfg.volume_base + source.uniform(0.0, cfg.volume_span);

            let date = reference_date
                .checked_add_days(Days::new(u64::from(i)))
                .ok_or(ForecastError::InvalidHorizon(horizon_days))?;

            let (rate_out, low_out, high_out) =
                round_band(rate, rate - band_width, rate + band_width, cfg.price_decimals);

            points.push(ForecastPoint {
                date,
                rate: rate_out,
                high: None,
                low: None,
                volume: Some(volume),
                confidence_low: low_out,
                confidence_high: high_out,
                model_confidence: round_to(model_confidence, 2),
            });
        }

        log::debug!(
            "Generated {} forecast points from {} (final {:.4})",
            points.len(),
            current_rate,
            rate
        );

        Ok(points)
    }

    /// Generate a path for `pair` and summarise it
    pub fn run<S: RandomSource + ?Sized>(
        &self,
        pair: &CurrencyPair,
        current_rate: f64,
        horizon_days: i64,
        source: &mut S,
    ) -> Result<ForecastRun> {
        let reference_date = self.reference_date();
        let points = self.generate_from(reference_date, current_rate, horizon_days, source)?;
        let metrics = MetricsAggregator::new().summarize(&points);

        Ok(ForecastRun {
            pair: pair.clone(),
            current_rate,
            horizon_days: points.len() as u32,
            reference_date,
            points,
            metrics,
        })
    }
}

/// Check the starting rate and horizon; returns the horizon as a day count
pub fn validate_inputs(current_rate: f64, horizon_days: i64) -> Result<u32> {
    if !current_rate.is_finite() || current_rate <= 0.0 {
        return Err(ForecastError::InvalidRate(current_rate));
    }
    if horizon_days < 1 {
        return Err(ForecastError::InvalidHorizon(horizon_days));
    }
    u32::try_from(horizon_days).map_err(|_| ForecastError::InvalidHorizon(horizon_days))
}

/// Round half away from zero to `decimals` places
///
/// Values too large to scale are returned unchanged; they carry no
/// fractional digits at that magnitude.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    let scaled = value * scale;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / scale
}

/// Round rate and band together, keeping full precision if the rate would
/// round to zero
fn round_band(rate: f64, low: f64, high: f64, decimals: u32) -> (f64, f64, f64) {
    let rounded = round_to(rate, decimals);
    if rounded > 0.0 {
        (rounded, round_to(low, decimals), round_to(high, decimals))
    } else {
        (rate, low, high)
    }
}
