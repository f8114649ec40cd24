//! Invariants of generated forecast paths across seeds, rates and horizons

use approx::assert_abs_diff_eq;
use chrono::{Days, NaiveDate};

use fx_forecast::forecast::ScriptedSource;
use fx_forecast::{
    ForecastError, ForecastPathGenerator, MetricsAggregator, RngSource, SpotRateProvider,
    StaticSpotRateProvider,
};

fn reference() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

fn generator() -> ForecastPathGenerator {
    ForecastPathGenerator::default().with_reference_date(reference())
}

const RATES: [f64; 5] = [1547.25, 1945.80, 1688.45, 10.34, 0.85];

#[test]
fn test_length_matches_horizon() {
    for days in [1, 2, 7, 14, 30, 90] {
        let mut source = RngSource::seeded(days as u64);
        let points = generator().generate(1547.25, days, &mut source).unwrap();
        assert_eq!(points.len(), days as usize);
    }
}

#[test]
fn test_dates_are_consecutive_from_tomorrow() {
    let mut source = RngSource::seeded(9);
    let points = generator().generate(1688.45, 30, &mut source).unwrap();

    assert_eq!(points[0].date, reference() + Days::new(1));
    for pair in points.windows(2) {
        assert_eq!(pair[1].date, pair[0].date + Days::new(1));
    }
}

#[test]
fn test_band_contains_rate() {
    for (seed, &rate) in RATES.iter().enumerate() {
        let mut source = RngSource::seeded(seed as u64 * 31 + 1);
        let points = generator().generate(rate, 30, &mut source).unwrap();
        for p in &points {
            assert!(p.rate > 0.0, "non-positive rate {}", p.rate);
            assert!(
                p.confidence_low <= p.rate && p.rate <= p.confidence_high,
                "band [{}, {}] excludes {}",
                p.confidence_low,
                p.confidence_high,
                p.rate
            );
        }
    }
}

#[test]
fn test_band_width_within_configured_range() {
    let mut source = RngSource::seeded(77);
    let points = generator().generate(1547.25, 30, &mut source).unwrap();
    for p in &points {
        let relative = p.band_half_width() / p.rate;
        // 2dp rounding on a ~1500 rate moves the ratio by well under 1e-4
        assert!(relative > 0.015 - 1e-4 && relative < 0.025 + 1e-4, "relative width {}", relative);
    }
}

#[test]
fn test_model_confidence_decays_to_floor() {
    let mut source = RngSource::seeded(5);
    let points = generator().generate(1547.25, 40, &mut source).unwrap();

    for (idx, p) in points.iter().enumerate() {
        let i = idx as f64 + 1.0;
        assert!(p.model_confidence >= 0.75);
        assert!(p.model_confidence <= 0.95);
        assert!(p.model_confidence <= (0.95 - (i - 1.0) * 0.01).max(0.75) + 1e-12);
    }
    for pair in points.windows(2) {
        assert!(pair[1].model_confidence <= pair[0].model_confidence);
    }
}

#[test]
fn test_daily_move_is_bounded() {
    // |trend| <= 0.002 and |shock| <= 0.01, so each day moves < 1.2% before rounding
    let mut source = RngSource::seeded(123);
    let points = generator().generate(1547.25, 60, &mut source).unwrap();

    let mut prev = 1547.25;
    for p in &points {
        let change = (p.rate - prev).abs() / prev;
        assert!(change < 0.0121, "daily change {} too large", change);
        prev = p.rate;
    }
}

#[test]
fn test_same_seed_same_path() {
    let a = generator().generate(1547.25, 14, &mut RngSource::seeded(2024)).unwrap();
    let b = generator().generate(1547.25, 14, &mut RngSource::seeded(2024)).unwrap();
    let c = generator().generate(1547.25, 14, &mut RngSource::seeded(2025)).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_scripted_stream_is_reproducible() {
    let script = vec![0.1, 0.9, 0.4, 0.6, 0.7, 0.2, 0.3, 0.8];
    let a = generator().generate(10.34, 6, &mut ScriptedSource::new(script.clone())).unwrap();
    let b = generator().generate(10.34, 6, &mut ScriptedSource::new(script)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_invalid_inputs() {
    let mut source = RngSource::seeded(1);
    let gen = generator();
    assert!(matches!(gen.generate(0.0, 14, &mut source), Err(ForecastError::InvalidRate(_))));
    assert!(matches!(gen.generate(-1547.25, 14, &mut source), Err(ForecastError::InvalidRate(_))));
    assert!(matches!(gen.generate(f64::INFINITY, 14, &mut source), Err(ForecastError::InvalidRate(_))));
    assert!(matches!(gen.generate(1547.25, 0, &mut source), Err(ForecastError::InvalidHorizon(0))));
    assert!(matches!(gen.generate(1547.25, -1, &mut source), Err(ForecastError::InvalidHorizon(-1))));
}

#[test]
fn test_metrics_over_generated_path() {
    let mut source = RngSource::seeded(8);
    let points = generator().generate(1547.25, 14, &mut source).unwrap();
    let metrics = MetricsAggregator::new().summarize(&points);

    let expected_avg = points.iter().map(|p| p.model_confidence).sum::<f64>() / 14.0;
    assert_abs_diff_eq!(metrics.avg_confidence, expected_avg, epsilon = 1e-12);
    // days 1..=14 decay from 0.94 to 0.81
    assert_abs_diff_eq!(metrics.avg_confidence, 0.875, epsilon = 1e-9);
    // daily shocks are at most 1%, so annualised RMS stays under 0.012 * sqrt(252)
    assert!(metrics.volatility > 0.0 && metrics.volatility < 0.012 * 252f64.sqrt());
    assert_eq!(metrics.final_rate, Some(points[13].rate));
}

#[test]
fn test_every_dashboard_pair_generates() {
    let provider = StaticSpotRateProvider::dashboard_defaults();
    let pairs: Vec<_> = provider.pairs().cloned().collect();
    for (i, pair) in pairs.iter().enumerate() {
        let quote = provider.fetch(pair).unwrap();
        let run = generator()
            .run(pair, quote.rate, 14, &mut RngSource::seeded(i as u64))
            .unwrap();
        assert_eq!(run.points.len(), 14);
        assert_eq!(&run.pair, pair);
    }
}
