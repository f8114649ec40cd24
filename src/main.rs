//! FX Forecast CLI
//!
//! Generates a synthetic forecast for one currency pair and prints the path,
//! risk metrics, conversion preview and stress scenarios.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;

use fx_forecast::conversion::{convert, stress_scenarios};
use fx_forecast::market::{load_quotes, FallbackPolicy, QuoteResolver, StaticSpotRateProvider};
use fx_forecast::{CurrencyPair, ForecastConfig, ForecastPathGenerator, RngSource};

#[derive(Debug, Parser)]
#[command(name = "fx_forecast", version, about = "Synthetic FX rate forecast")]
struct Args {
    /// Currency pair as BASE/QUOTE
    #[arg(long, default_value = "USD/NGN")]
    pair: CurrencyPair,

    /// Forecast horizon in days
    #[arg(long, default_value_t = 14, allow_negative_numbers = true)]
    days: i64,

    /// Override the spot rate instead of looking it up
    #[arg(long)]
    rate: Option<f64>,

    /// Seed for a reproducible forecast (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Reference date (YYYY-MM-DD); forecast starts the day after
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Base-currency amount for the conversion preview
    #[arg(long, default_value_t = 1000.0)]
    amount: f64,

    /// CSV quote table (pair,rate,change_percent,volume)
    #[arg(long)]
    quotes: Option<PathBuf>,

    /// JSON generator config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write forecast points to this CSV file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the full run as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ForecastConfig::from_json_path(path)?,
        None => ForecastConfig::default(),
    };

    let provider = match &args.quotes {
        Some(path) => load_quotes(path).with_context(|| format!("loading quotes from {}", path.display()))?,
        None => StaticSpotRateProvider::dashboard_defaults(),
    };

    let spot = match args.rate {
        Some(rate) => rate,
        None => {
            let mut resolver = QuoteResolver::new(&provider, FallbackPolicy::default());
            let resolved = resolver.resolve(&args.pair)?;
            log::info!("Spot {} = {} ({:?})", args.pair, resolved.quote.rate, resolved.source);
            resolved.quote.rate
        }
    };

    let mut generator = ForecastPathGenerator::new(config);
    if let Some(date) = args.date {
        generator = generator.with_reference_date(date);
    }

    let mut source = match args.seed {
        Some(seed) => RngSource::seeded(seed),
        None => RngSource::from_entropy(),
    };

    let run = generator
        .run(&args.pair, spot, args.days, &mut source)
        .with_context(|| format!("generating {}-day forecast for {}", args.days, args.pair))?;

    if let Some(path) = &args.output {
        run.write_csv_path(path)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&run)?);
        return Ok(());
    }

    println!("FX Forecast v{}", env!("CARGO_PKG_VERSION"));
    println!("======================\n");
    println!("Pair: {}  Spot: {:.4}  Horizon: {} days\n", run.pair, run.current_rate, run.horizon_days);

    println!("{:>10} {:>12} {:>12} {:>12} {:>6} {:>12}", "Date", "Rate", "Low", "High", "Conf", "Volume");
    println!("{}", "-".repeat(70));
    for p in &run.points {
        println!(
            "{:>10} {:>12.2} {:>12.2} {:>12.2} {:>5.0}% {:>12.0}",
            p.date,
            p.rate,
            p.confidence_low,
            p.confidence_high,
            p.model_confidence * 100.0,
            p.volume.unwrap_or(0.0),
        );
    }

    let m = &run.metrics;
    println!("\nMetrics:");
    println!("  Avg Model Confidence: {:.1}%", m.avg_confidence * 100.0);
    println!("  Forecast Volatility:  {:.1}% (annualized)", m.volatility * 100.0);
    if let Some(centered) = m.centered_volatility {
        println!("  Centered Volatility:  {:.1}%", centered * 100.0);
    }
    if let Some(width) = m.band_half_width {
        println!("  Confidence Band:      ±{:.2}", width);
    }

    let conversion = convert(args.amount, spot, Some(&run))?;
    println!("\nConversion ({} {}):", args.amount, run.pair.base());
    println!("  At spot:    {:.2} {}", conversion.spot_value, run.pair.quote());
    if let (Some(value), Some(conf)) = (conversion.horizon_value, conversion.horizon_confidence) {
        println!("  At horizon: {:.2} {} ({:.0}% confidence)", value, run.pair.quote(), conf * 100.0);
    }

    println!("\nStress Scenarios:");
    for s in stress_scenarios(args.amount, spot)? {
        println!("  {:<13} {:<13} rate {:>12.4}  value {:>16.2}", s.scenario.label, s.scenario.description, s.rate, s.value);
    }

    if let Some(path) = &args.output {
        println!("\nForecast written to: {}", path.display());
    }

    Ok(())
}
