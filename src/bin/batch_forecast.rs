//! Run forecasts for every quoted pair across several horizons
//!
//! Outputs one summary row per (pair, horizon) for comparison across pairs.

use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use serde::Serialize;

use fx_forecast::market::{load_quotes, FallbackPolicy, QuoteResolver};
use fx_forecast::{ForecastConfig, ForecastPathGenerator, ForecastRunner, StaticSpotRateProvider};

#[derive(Debug, Parser)]
#[command(name = "batch_forecast", about = "Batch FX forecasts for all quoted pairs")]
struct Args {
    /// Horizons in days, comma separated
    #[arg(long, value_delimiter = ',', default_value = "7,14,30")]
    horizons: Vec<i64>,

    /// Base seed; each request derives its own source from it
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Reference date (YYYY-MM-DD)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// CSV quote table (defaults to the built-in naira crosses)
    #[arg(long)]
    quotes: Option<PathBuf>,

    /// JSON generator config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Abort when a quote lookup fails instead of using a fallback rate
    #[arg(long)]
    fail_closed: bool,

    #[arg(long, default_value = "batch_forecast_output.csv")]
    output: PathBuf,
}

/// Summary row for one (pair, horizon)
#[derive(Debug, Serialize)]
struct SummaryRow {
    pair: String,
    spot: f64,
    horizon_days: u32,
    final_rate: Option<f64>,
    change_pct: Option<f64>,
    avg_confidence: f64,
    volatility: f64,
    centered_volatility: Option<f64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();

    let provider = match &args.quotes {
        Some(path) => load_quotes(path).with_context(|| format!("loading quotes from {}", path.display()))?,
        None => StaticSpotRateProvider::dashboard_defaults(),
    };
    let config = match &args.config {
        Some(path) => ForecastConfig::from_json_path(path)?,
        None => ForecastConfig::default(),
    };

    let mut generator = ForecastPathGenerator::new(config);
    if let Some(date) = args.date {
        generator = generator.with_reference_date(date);
    }
    let runner = ForecastRunner::with_generator(generator, args.seed);

    let pairs: Vec<_> = provider.pairs().cloned().collect();
    let policy = if args.fail_closed { FallbackPolicy::FailClosed } else { FallbackPolicy::default() };
    let mut resolver = QuoteResolver::new(&provider, policy);
    let requests = ForecastRunner::requests_for(&mut resolver, &pairs, &args.horizons)?;
    println!("Running {} forecasts ({} pairs x {} horizons)...", requests.len(), pairs.len(), args.horizons.len());

    let results = runner.run_batch(&requests);
    println!("Forecasts complete in {:?}", start.elapsed());

    let file = File::create(&args.output).with_context(|| format!("creating {}", args.output.display()))?;
    let mut writer = csv::Writer::from_writer(file);

    let mut failed = 0;
    for (request, result) in requests.iter().zip(results) {
        let run = match result {
            Ok(run) => run,
            Err(e) => {
                log::warn!("{} {}d failed: {}", request.pair, request.horizon_days, e);
                failed += 1;
                continue;
            }
        };
        let m = &run.metrics;
        writer.serialize(SummaryRow {
            pair: run.pair.to_string(),
            spot: run.current_rate,
            horizon_days: run.horizon_days,
            final_rate: m.final_rate,
            change_pct: m.final_rate.map(|r| (r / run.current_rate - 1.0) * 100.0),
            avg_confidence: m.avg_confidence,
            volatility: m.volatility,
            centered_volatility: m.centered_volatility,
        })?;
    }
    writer.flush()?;

    println!("Results written to: {}", args.output.display());
    if failed > 0 {
        println!("{} requests failed (see log)", failed);
    }
    println!("Total time: {:?}", start.elapsed());

    Ok(())
}
