//! Forecast output structures

use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::metrics::ForecastMetrics;
use crate::market::{CurrencyPair, ExchangeRateObservation};

/// One simulated future day
///
/// Carries the fields of an [`ExchangeRateObservation`] plus the confidence
/// band and model confidence. Within a generated sequence:
/// `confidence_low <= rate <= confidence_high`, `rate > 0`, and
/// `model_confidence` never increases from one point to the next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    pub confidence_low: f64,
    pub confidence_high: f64,
    pub model_confidence: f64,
}

impl ForecastPoint {
    /// The plain observation part of this point
    pub fn observation(&self) -> ExchangeRateObservation {
        ExchangeRateObservation {
            date: self.date,
            rate: self.rate,
            high: self.high,
            low: self.low,
            volume: self.volume,
        }
    }

    /// Distance from the rate to the upper band edge
    pub fn band_half_width(&self) -> f64 {
        self.confidence_high - self.rate
    }
}

/// Flat CSV row; `volume` is written empty when absent
#[derive(Debug, Serialize)]
struct CsvRecord<'a> {
    date: &'a NaiveDate,
    rate: f64,
    confidence_low: f64,
    confidence_high: f64,
    model_confidence: f64,
    volume: Option<f64>,
}

/// Write forecast points as CSV with a header row
pub fn write_points_csv<W: Write>(writer: W, points: &[ForecastPoint]) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for point in points {
        csv_writer.serialize(CsvRecord {
            date: &point.date,
            rate: point.rate,
            confidence_low: point.confidence_low,
            confidence_high: point.confidence_high,
            model_confidence: point.model_confidence,
            volume: point.volume,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Complete result of one forecast request
///
/// Created wholesale per request and replaced, never updated, on the next.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastRun {
    pub pair: CurrencyPair,
    pub current_rate: f64,
    pub horizon_days: u32,
    pub reference_date: NaiveDate,
    pub points: Vec<ForecastPoint>,
    pub metrics: ForecastMetrics,
}

impl ForecastRun {
    /// Last forecast point, if any
    pub fn final_point(&self) -> Option<&ForecastPoint> {
        self.points.last()
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        write_points_csv(writer, &self.points)
    }

    pub fn write_csv_path(&self, path: &Path) -> Result<(), csv::Error> {
        let file = std::fs::File::create(path)?;
        self.write_csv(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(day: u32, rate: f64) -> ForecastPoint {
        ForecastPoint {
            date: NaiveDate::from_ymd_opt(2026, 1, day).unwrap(),
            rate,
            high: None,
            low: None,
            volume: Some(2_000_000.5),
            confidence_low: rate - 1.0,
            confidence_high: rate + 1.5,
            model_confidence: 0.9,
        }
    }

    #[test]
    fn test_observation_view() {
        let p = point(3, 1550.0);
        let obs = p.observation();
        assert_eq!(obs.rate, 1550.0);
        assert_eq!(obs.date, p.date);
        assert_eq!(obs.volume, Some(2_000_000.5));
        assert_eq!(p.band_half_width(), 1.5);
    }

    #[test]
    fn test_csv_export() {
        let points = vec![point(1, 1550.0), point(2, 1551.25)];
        let mut buf = Vec::new();
        write_points_csv(&mut buf, &points).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "date,rate,confidence_low,confidence_high,model_confidence,volume");
        assert_eq!(lines[1], "2026-01-01,1550.0,1549.0,1551.5,0.9,2000000.5");
    }

    #[test]
    fn test_point_json_omits_absent_fields() {
        let json = serde_json::to_value(point(1, 10.0)).unwrap();
        assert_eq!(json["date"], "2026-01-01");
        assert!(json.get("high").is_none());
        assert!(json.get("volume").is_some());
    }
}
