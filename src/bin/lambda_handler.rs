//! AWS Lambda handler for forecast requests
//!
//! Accepts a JSON request naming a pair and horizon and returns the forecast
//! path, its metrics and a conversion preview. Validation failures come back
//! in the `error` field rather than as an invocation error.

use fx_forecast::conversion::{convert, stress_scenarios, Conversion, StressResult};
use fx_forecast::market::{FallbackPolicy, QuoteResolver, QuoteSource};
use fx_forecast::{CurrencyPair, ForecastPathGenerator, ForecastRun, RngSource, StaticSpotRateProvider};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::{Deserialize, Serialize};

/// Input for one forecast
#[derive(Debug, Deserialize)]
pub struct ForecastRequest {
    /// Currency pair (default: USD/NGN)
    #[serde(default = "default_pair")]
    pub pair: String,

    /// Horizon in days (default: 14)
    #[serde(default = "default_days")]
    pub days: i64,

    /// Spot override; looked up from the quote table when absent
    #[serde(default)]
    pub rate: Option<f64>,

    /// Seed for reproducible output
    #[serde(default)]
    pub seed: Option<u64>,

    /// Amount for the conversion preview (default: 1000)
    #[serde(default = "default_amount")]
    pub amount: f64,

    /// What to do when the quote lookup fails (default: stale or default quote)
    #[serde(default)]
    pub fallback: FallbackPolicy,
}

fn default_pair() -> String { "USD/NGN".to_string() }
fn default_days() -> i64 { 14 }
fn default_amount() -> f64 { 1000.0 }

/// Output of the forecast
#[derive(Debug, Serialize, Default)]
pub struct ForecastResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run: Option<ForecastRun>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spot_source: Option<QuoteSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversion: Option<Conversion>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub stress: Vec<StressResult>,
    pub execution_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn forecast(request: &ForecastRequest) -> anyhow::Result<ForecastResponse> {
    let pair: CurrencyPair = request.pair.parse()?;

    let provider = StaticSpotRateProvider::dashboard_defaults();
    let (spot, spot_source) = match request.rate {
        Some(rate) => (rate, None),
        None => {
            let resolved = QuoteResolver::new(&provider, request.fallback).resolve(&pair)?;
            (resolved.quote.rate, Some(resolved.source))
        }
    };

    let mut source = match request.seed {
        Some(seed) => RngSource::seeded(seed),
        None => RngSource::from_entropy(),
    };

    let run = ForecastPathGenerator::default().run(&pair, spot, request.days, &mut source)?;
    let conversion = convert(request.amount, spot, Some(&run))?;
    let stress = stress_scenarios(request.amount, spot)?;

    Ok(ForecastResponse {
        run: Some(run),
        spot_source,
        conversion: Some(conversion),
        stress,
        ..Default::default()
    })
}

/// Lambda handler function
async fn handler(event: LambdaEvent<ForecastRequest>) -> Result<ForecastResponse, Error> {
    let start = std::time::Instant::now();
    let request = event.payload;

    let mut response = forecast(&request).unwrap_or_else(|e| {
        log::warn!("Rejected forecast request {:?}: {}", request, e);
        ForecastResponse {
            error: Some(e.to_string()),
            ..Default::default()
        }
    });
    response.execution_time_ms = start.elapsed().as_millis() as u64;

    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
