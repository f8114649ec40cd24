//! Summary risk statistics over a forecast path

use serde::{Deserialize, Serialize};

use super::points::ForecastPoint;

/// Trading days per year used to annualise daily volatility
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Volatility reported when fewer than two points exist
pub const FALLBACK_VOLATILITY: f64 = 0.12;

/// Derived summaries of one forecast path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastMetrics {
    /// Mean model confidence, 0 for an empty path
    pub avg_confidence: f64,

    /// Annualised RMS of daily returns (mean return taken as zero)
    pub volatility: f64,

    /// Annualised sample standard deviation of daily returns.
    /// Kept separate from `volatility`; the two differ materially.
    pub centered_volatility: Option<f64>,

    pub final_rate: Option<f64>,
    pub final_confidence: Option<f64>,

    /// Upper band distance of the first point
    pub band_half_width: Option<f64>,
}

/// Stateless aggregator over forecast points
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsAggregator;

impl MetricsAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Compute all metrics for `points`
    pub fn summarize(&self, points: &[ForecastPoint]) -> ForecastMetrics {
        ForecastMetrics {
            avg_confidence: average_confidence(points),
            volatility: annualized_volatility(points),
            centered_volatility: centered_volatility(points),
            final_rate: points.last().map(|p| p.rate),
            final_confidence: points.last().map(|p| p.model_confidence),
            band_half_width: points.first().map(|p| p.band_half_width()),
        }
    }
}

/// Arithmetic mean of `model_confidence`; 0 when empty
pub fn average_confidence(points: &[ForecastPoint]) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    points.iter().map(|p| p.model_confidence).sum::<f64>() / points.len() as f64
}

/// Simple returns between consecutive points
pub fn daily_returns(points: &[ForecastPoint]) -> Vec<f64> {
    points
        .windows(2)
        .map(|w| (w[1].rate - w[0].rate) / w[0].rate)
        .collect()
}

/// `sqrt(sum(r^2) / (n - 1)) * sqrt(252)` over the path's own returns
///
/// This is an RMS, not a centred variance; the mean return is treated as
/// zero. Returns [`FALLBACK_VOLATILITY`] when `n < 2`.
pub fn annualized_volatility(points: &[ForecastPoint]) -> f64 {
    if points.len() < 2 {
        return FALLBACK_VOLATILITY;
    }
    let sum_sq: f64 = daily_returns(points).iter().map(|r| r * r).sum();
    (sum_sq / (points.len() - 1) as f64).sqrt() * TRADING_DAYS_PER_YEAR.sqrt()
}

/// Sample standard deviation of returns (mean subtracted), annualised
///
/// `None` when fewer than two returns exist.
pub fn centered_volatility(points: &[ForecastPoint]) -> Option<f64> {
    let returns = daily_returns(points);
    if returns.len() < 2 {
        return None;
    }
    let m = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / m;
    let var = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (m - 1.0);
    Some(var.sqrt() * TRADING_DAYS_PER_YEAR.sqrt())
}
