#![allow(dead_code)]

use chrono::NaiveDate;
use quantdash::domain::error::QuantdashError;
use quantdash::domain::series::{PricePoint, PriceSeries};
use quantdash::ports::data_port::PriceDataPort;
use std::collections::HashMap;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A price series with one observation per day starting at `start`.
pub fn make_series(ticker: &str, start: NaiveDate, closes: &[f64]) -> PriceSeries {
    let points = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PricePoint {
            date: start + chrono::Duration::days(i as i64),
            close,
        })
        .collect();
    PriceSeries::new(ticker, points).unwrap()
}

pub struct MockPricePort {
    pub data: HashMap<String, PriceSeries>,
    pub errors: HashMap<String, String>,
}

impl MockPricePort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_series(mut self, series: PriceSeries) -> Self {
        self.data.insert(series.ticker.clone(), series);
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl PriceDataPort for MockPricePort {
    fn fetch_series(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, QuantdashError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(QuantdashError::DataFile {
                reason: reason.clone(),
            });
        }
        match self.data.get(ticker) {
            Some(series) => {
                let points = series
                    .points
                    .iter()
                    .filter(|p| p.date >= start && p.date <= end)
                    .copied()
                    .collect();
                PriceSeries::new(ticker, points)
            }
            None => Err(QuantdashError::NoData {
                ticker: ticker.to_string(),
            }),
        }
    }

    fn list_tickers(&self) -> Result<Vec<String>, QuantdashError> {
        let mut tickers: Vec<String> = self.data.keys().cloned().collect();
        tickers.sort();
        Ok(tickers)
    }

    fn data_range(
        &self,
        ticker: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, QuantdashError> {
        Ok(self.data.get(ticker).and_then(|series| {
            match (series.first_date(), series.last_date()) {
                (Some(first), Some(last)) => Some((first, last, series.len())),
                _ => None,
            }
        }))
    }
}
