//! Load spot quote tables from CSV
//!
//! Expected columns: `pair,rate,change_percent,volume`

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::data::{CurrencyPair, SpotQuote};
use super::provider::StaticSpotRateProvider;
use crate::error::SpotRateError;

/// Raw CSV row matching the quote table columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    pair: String,
    rate: f64,
    #[serde(default)]
    change_percent: f64,
    #[serde(default)]
    volume: f64,
}

impl CsvRow {
    fn into_entry(self, line: usize) -> Result<(CurrencyPair, SpotQuote), SpotRateError> {
        let pair: CurrencyPair = self
            .pair
            .parse()
            .map_err(|e| SpotRateError::Load(format!("row {}: {}", line, e)))?;

        let quote = SpotQuote::new(self.rate, self.change_percent, self.volume);
        if !quote.is_valid() {
            return Err(SpotRateError::Load(format!(
                "row {}: {} has non-positive rate {} or negative volume {}",
                line, pair, self.rate, self.volume
            )));
        }

        Ok((pair, quote))
    }
}

/// Load a quote table from any CSV reader
pub fn load_quotes_from_reader<R: Read>(reader: R) -> Result<StaticSpotRateProvider, SpotRateError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut provider = StaticSpotRateProvider::new();

    for (idx, result) in csv_reader.deserialize::<CsvRow>().enumerate() {
        let row = result?;
        // header is line 1
        let (pair, quote) = row.into_entry(idx + 2)?;
        provider.insert(pair, quote);
    }

    log::debug!("Loaded {} spot quotes", provider.len());
    Ok(provider)
}

/// Load a quote table from a CSV file
pub fn load_quotes(path: &Path) -> Result<StaticSpotRateProvider, SpotRateError> {
    let file = File::open(path)?;
    load_quotes_from_reader(file)
}
