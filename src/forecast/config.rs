//! Generator parameters

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ForecastError;

/// Tunable constants of the synthetic rate path
///
/// `Default` reproduces the dashboard model exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Amplitude of the cyclical drift term
    pub trend_amplitude: f64,

    /// Angular step of the drift term per forecast day
    pub trend_frequency: f64,

    /// Range the daily shock magnitude is drawn from
    pub min_daily_volatility: f64,
    pub max_daily_volatility: f64,

    /// Confidence band half-width as a fraction of the rate
    pub min_band_width: f64,
    pub max_band_width: f64,

    /// Model confidence before any decay
    pub initial_confidence: f64,

    /// Confidence lost per forecast day
    pub confidence_decay: f64,

    /// Confidence never drops below this
    pub confidence_floor: f64,

    /// Cosmetic volume: base + uniform(0, span)
    pub volume_base: f64,
    pub volume_span: f64,

    /// Decimal places for rates and bands (currency precision)
    pub price_decimals: u32,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            trend_amplitude: 0.002,
            trend_frequency: 0.1,
            min_daily_volatility: 0.008,
            max_daily_volatility: 0.020,
            min_band_width: 0.015,
            max_band_width: 0.025,
            initial_confidence: 0.95,
            confidence_decay: 0.01,
            confidence_floor: 0.75,
            volume_base: 1_500_000.0,
            volume_span: 1_000_000.0,
            price_decimals: 2,
        }
    }
}

impl ForecastConfig {
    /// Load a config from JSON; missing fields take their defaults
    pub fn from_json_path(path: &Path) -> Result<Self, ForecastError> {
        let file = File::open(path)
            .map_err(|e| ForecastError::Config(format!("{}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_reader(file)
            .map_err(|e| ForecastError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check ranges are ordered and non-negative
    pub fn validate(&self) -> Result<(), ForecastError> {
        let fields = [
            ("trend_amplitude", self.trend_amplitude),
            ("trend_frequency", self.trend_frequency),
            ("min_daily_volatility", self.min_daily_volatility),
            ("max_daily_volatility", self.max_daily_volatility),
            ("min_band_width", self.min_band_width),
            ("max_band_width", self.max_band_width),
            ("initial_confidence", self.initial_confidence),
            ("confidence_decay", self.confidence_decay),
            ("confidence_floor", self.confidence_floor),
            ("volume_base", self.volume_base),
            ("volume_span", self.volume_span),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ForecastError::Config(format!(
                    "{} must be non-negative and finite, got {}",
                    name, value
                )));
            }
        }

        if self.min_daily_volatility > self.max_daily_volatility {
            return Err(ForecastError::Config(format!(
                "daily volatility range is inverted: [{}, {}]",
                self.min_daily_volatility, self.max_daily_volatility
            )));
        }
        if self.min_band_width > self.max_band_width {
            return Err(ForecastError::Config(format!(
                "band width range is inverted: [{}, {}]",
                self.min_band_width, self.max_band_width
            )));
        }
        // shock is at most half the daily volatility either way
        if self.trend_amplitude + self.max_daily_volatility / 2.0 >= 1.0 {
            return Err(ForecastError::Config(
                "trend amplitude plus half the max daily volatility must stay below 1".to_string(),
            ));
        }
        if self.max_band_width >= 1.0 {
            return Err(ForecastError::Config(format!(
                "max_band_width must be below 1, got {}",
                self.max_band_width
            )));
        }
        if self.confidence_floor > self.initial_confidence || self.initial_confidence > 1.0 {
            return Err(ForecastError::Config(format!(
                "confidence must satisfy floor <= initial <= 1, got floor {} initial {}",
                self.confidence_floor, self.initial_confidence
            )));
        }
        if self.price_decimals > 8 {
            return Err(ForecastError::Config(format!(
                "price_decimals must be at most 8, got {}",
                self.price_decimals
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ForecastConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ForecastConfig =
            serde_json::from_str(r#"{ "confidence_floor": 0.6, "price_decimals": 4 }"#).unwrap();
        assert_eq!(config.confidence_floor, 0.6);
        assert_eq!(config.price_decimals, 4);
        assert_eq!(config.initial_confidence, 0.95);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_inverted_ranges_rejected() {
        let config = ForecastConfig {
            min_daily_volatility: 0.03,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ForecastError::Config(_))));

        let config = ForecastConfig {
            confidence_floor: 0.99,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ForecastError::Config(_))));

        let config = ForecastConfig {
            volume_span: -1.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ForecastError::Config(_))));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let path = Path::new("no/such/forecast_config.json");
        match ForecastConfig::from_json_path(path) {
            Err(ForecastError::Config(msg)) => assert!(msg.contains("forecast_config.json")),
            other => panic!("expected config error, got {:?}", other),
        }
    }
}
