//! Instrument catalog and ticker selection.
//!
//! Parses ticker lists from configuration and screens each selected
//! instrument for usable data before any computation runs.

use chrono::NaiveDate;
use std::collections::HashSet;

use crate::domain::error::{QuantdashError, SelectionError};
use crate::domain::series::PriceSeries;
use crate::ports::data_port::PriceDataPort;

pub const MIN_PRICE_OBSERVATIONS: usize = 2;

/// One selectable instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instrument {
    pub ticker: &'static str,
    pub name: &'static str,
}

/// The fixed set the dashboard selector offers: EUR/USD plus CAC 40 names.
pub const CATALOG: &[Instrument] = &[
    Instrument { ticker: "EURUSD=X", name: "Euro / US Dollar" },
    Instrument { ticker: "MC.PA", name: "LVMH" },
    Instrument { ticker: "TTE.PA", name: "TotalEnergies" },
    Instrument { ticker: "AIR.PA", name: "Airbus" },
    Instrument { ticker: "SAN.PA", name: "Sanofi" },
    Instrument { ticker: "OR.PA", name: "L'Oreal" },
    Instrument { ticker: "SU.PA", name: "Schneider Electric" },
    Instrument { ticker: "AI.PA", name: "Air Liquide" },
    Instrument { ticker: "BNP.PA", name: "BNP Paribas" },
    Instrument { ticker: "DG.PA", name: "Vinci" },
    Instrument { ticker: "BN.PA", name: "Danone" },
];

pub fn find_instrument(ticker: &str) -> Option<&'static Instrument> {
    CATALOG.iter().find(|i| i.ticker == ticker)
}

/// Parse a comma-separated ticker list: trimmed, uppercased, duplicates
/// and empty tokens rejected.
pub fn parse_tickers(input: &str) -> Result<Vec<String>, SelectionError> {
    let mut tickers = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(SelectionError::EmptyToken);
        }
        let ticker = trimmed.to_uppercase();
        if seen.contains(&ticker) {
            return Err(SelectionError::DuplicateTicker(ticker));
        }
        seen.insert(ticker.clone());
        tickers.push(ticker);
    }

    Ok(tickers)
}

/// Why a selected ticker was screened out.
#[derive(Debug, Clone)]
pub enum SkipReason {
    NoData,
    TooFewObservations { observations: usize },
}

#[derive(Debug, Clone)]
pub struct SkippedTicker {
    pub ticker: String,
    pub reason: SkipReason,
}

pub struct SelectionOutcome {
    /// Fetched series for every ticker that survived screening, in
    /// selection order.
    pub series: Vec<PriceSeries>,
    pub skipped: Vec<SkippedTicker>,
}

/// Fetch and screen each selected ticker, keeping those with usable data.
///
/// Tickers that fail to load or have fewer than `min_observations` points
/// are skipped with a reason for the caller to report; the whole selection
/// fails only when fewer than `min_assets` tickers survive.
pub fn validate_selection(
    data_port: &dyn PriceDataPort,
    tickers: &[String],
    start: NaiveDate,
    end: NaiveDate,
    min_observations: usize,
    min_assets: usize,
) -> Result<SelectionOutcome, QuantdashError> {
    let mut series = Vec::new();
    let mut skipped = Vec::new();

    for ticker in tickers {
        let prices = match data_port.fetch_series(ticker, start, end) {
            Ok(prices) => prices,
            Err(_) => {
                skipped.push(SkippedTicker {
                    ticker: ticker.clone(),
                    reason: SkipReason::NoData,
                });
                continue;
            }
        };

        if prices.is_empty() {
            skipped.push(SkippedTicker {
                ticker: ticker.clone(),
                reason: SkipReason::NoData,
            });
            continue;
        }

        if prices.len() < min_observations {
            skipped.push(SkippedTicker {
                ticker: ticker.clone(),
                reason: SkipReason::TooFewObservations {
                    observations: prices.len(),
                },
            });
            continue;
        }

        series.push(prices);
    }

    if series.len() < min_assets {
        return Err(QuantdashError::TooFewAssets {
            count: series.len(),
            minimum: min_assets,
        });
    }

    Ok(SelectionOutcome { series, skipped })
}
