//! Amount conversion at spot and forecast rates, plus fixed stress scenarios

use serde::{Deserialize, Serialize};

use crate::error::ForecastError;
use crate::forecast::ForecastRun;

/// Named multiplicative shock applied to the spot rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StressScenario {
    pub label: &'static str,
    pub description: &'static str,
    pub multiplier: f64,
}

/// Scenarios shown next to the converter
pub const STRESS_SCENARIOS: [StressScenario; 4] = [
    StressScenario { label: "Market Crash", description: "-8% shock", multiplier: 0.92 },
    StressScenario { label: "Bear Market", description: "-3% decline", multiplier: 0.97 },
    StressScenario { label: "Base Case", description: "Current rate", multiplier: 1.0 },
    StressScenario { label: "Bull Market", description: "+5% rally", multiplier: 1.05 },
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    pub amount: f64,
    pub spot_rate: f64,
    /// amount × spot
    pub spot_value: f64,
    /// amount × last forecast rate
    pub horizon_value: Option<f64>,
    /// Model confidence of the last forecast point
    pub horizon_confidence: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StressResult {
    pub scenario: StressScenario,
    pub rate: f64,
    pub value: f64,
}

fn check_amount(amount: f64) -> Result<(), ForecastError> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(())
    } else {
        Err(ForecastError::InvalidAmount(amount))
    }
}

fn check_rate(rate: f64) -> Result<(), ForecastError> {
    if rate.is_finite() && rate > 0.0 {
        Ok(())
    } else {
        Err(ForecastError::InvalidRate(rate))
    }
}

/// Convert `amount` of the base currency at spot and at the forecast horizon
pub fn convert(amount: f64, spot_rate: f64, run: Option<&ForecastRun>) -> Result<Conversion, ForecastError> {
    check_amount(amount)?;
    check_rate(spot_rate)?;

    let last = run.and_then(|r| r.final_point());
    Ok(Conversion {
        amount,
        spot_rate,
        spot_value: amount * spot_rate,
        horizon_value: last.map(|p| amount * p.rate),
        horizon_confidence: last.map(|p| p.model_confidence),
    })
}

/// Value `amount` under each of [`STRESS_SCENARIOS`]
pub fn stress_scenarios(amount: f64, spot_rate: f64) -> Result<Vec<StressResult>, ForecastError> {
    check_amount(amount)?;
    check_rate(spot_rate)?;

    Ok(STRESS_SCENARIOS
        .iter()
        .map(|&scenario| {
            let rate = spot_rate * scenario.multiplier;
            StressResult { scenario, rate, value: amount * rate }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::{ForecastPathGenerator, RngSource};
    use approx::assert_relative_eq;

    #[test]
    fn test_convert_without_forecast() {
        let c = convert(1000.0, 1547.25, None).unwrap();
        assert_relative_eq!(c.spot_value, 1_547_250.0);
        assert_eq!(c.horizon_value, None);
        assert_eq!(c.horizon_confidence, None);
    }

    #[test]
    fn test_convert_uses_final_forecast_point() {
        let pair = "USD/NGN".parse().unwrap();
        let mut source = RngSource::seeded(5);
        let run = ForecastPathGenerator::default()
            .run(&pair, 1547.25, 14, &mut source)
            .unwrap();
        let last = run.points.last().unwrap().clone();

        let c = convert(250.0, 1547.25, Some(&run)).unwrap();
        assert_relative_eq!(c.horizon_value.unwrap(), 250.0 * last.rate);
        assert_eq!(c.horizon_confidence, Some(last.model_confidence));
    }

    #[test]
    fn test_convert_rejects_bad_inputs() {
        assert_eq!(convert(-1.0, 1547.25, None), Err(ForecastError::InvalidAmount(-1.0)));
        assert_eq!(convert(10.0, 0.0, None), Err(ForecastError::InvalidRate(0.0)));
    }

    #[test]
    fn test_stress_scenarios() {
        let results = stress_scenarios(1000.0, 1500.0).unwrap();
        let rates: Vec<f64> = results.iter().map(|r| r.rate).collect();
        assert_relative_eq!(rates[0], 1380.0, epsilon = 1e-9);
        assert_relative_eq!(rates[1], 1455.0, epsilon = 1e-9);
        assert_relative_eq!(rates[2], 1500.0, epsilon = 1e-9);
        assert_relative_eq!(rates[3], 1575.0, epsilon = 1e-9);
        assert_relative_eq!(results[3].value, 1_575_000.0, epsilon = 1e-6);
        assert_eq!(results[0].scenario.label, "Market Crash");
    }
}
