//! Forecast path generation and summary metrics

mod config;
mod engine;
mod points;
pub mod metrics;
pub mod random;

pub use config::ForecastConfig;
pub use engine::{ForecastPathGenerator, round_to, validate_inputs};
pub use points::{ForecastPoint, ForecastRun, write_points_csv};
pub use metrics::{ForecastMetrics, MetricsAggregator, FALLBACK_VOLATILITY, TRADING_DAYS_PER_YEAR};
pub use random::{RandomSource, RngSource, ScriptedSource};
