//! Error types for forecast generation and spot rate lookup

use thiserror::Error;

/// Validation failures raised before any computation proceeds
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ForecastError {
    /// Starting rate is zero, negative, or not finite
    #[error("invalid rate {0}: starting rate must be a positive, finite number")]
    InvalidRate(f64),

    /// Horizon is below one day
    #[error("invalid horizon {0}: forecast horizon must be at least 1 day")]
    InvalidHorizon(i64),

    /// Pair label is not of the form BASE/QUOTE
    #[error("invalid currency pair '{0}': expected BASE/QUOTE, e.g. USD/NGN")]
    InvalidPair(String),

    /// Conversion amount is negative or not finite
    #[error("invalid amount {0}: amount must be a non-negative, finite number")]
    InvalidAmount(f64),

    /// Generator configuration is inconsistent
    #[error("invalid forecast config: {0}")]
    Config(String),
}

/// Failures of a spot rate provider
#[derive(Debug, Error)]
pub enum SpotRateError {
    #[error("no spot quote available for {0}")]
    UnknownPair(String),

    #[error("spot rate provider unavailable: {0}")]
    Unavailable(String),

    #[error("failed to load spot quotes: {0}")]
    Load(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ForecastError>;
