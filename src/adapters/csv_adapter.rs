//! CSV price file adapter.
//!
//! Reads one `<TICKER>.csv` file per instrument from a base directory,
//! each holding `date,close` rows with ISO dates. Stands in for the
//! network-facing retrieval layer in development and tests.

use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

use crate::domain::error::QuantdashError;
use crate::domain::series::{PricePoint, PriceSeries};
use crate::ports::data_port::PriceDataPort;

pub struct CsvPriceAdapter {
    base_path: PathBuf,
}

impl CsvPriceAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, ticker: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", ticker))
    }

    fn read_points(&self, ticker: &str) -> Result<Vec<PricePoint>, QuantdashError> {
        let path = self.csv_path(ticker);
        if !path.exists() {
            return Err(QuantdashError::NoData {
                ticker: ticker.to_string(),
            });
        }
        let content = fs::read_to_string(&path).map_err(|e| QuantdashError::DataFile {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut points = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| QuantdashError::DataFile {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?;

            let date_str = record.get(0).ok_or_else(|| QuantdashError::DataFile {
                reason: format!("missing date column in {}", path.display()),
            })?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                QuantdashError::DataFile {
                    reason: format!("invalid date {date_str:?} in {}: {}", path.display(), e),
                }
            })?;

            let close: f64 = record
                .get(1)
                .ok_or_else(|| QuantdashError::DataFile {
                    reason: format!("missing close column in {}", path.display()),
                })?
                .parse()
                .map_err(|e| QuantdashError::DataFile {
                    reason: format!("invalid close value in {}: {}", path.display(), e),
                })?;

            points.push(PricePoint { date, close });
        }

        points.sort_by_key(|p| p.date);
        Ok(points)
    }
}

impl PriceDataPort for CsvPriceAdapter {
    fn fetch_series(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, QuantdashError> {
        let mut points = self.read_points(ticker)?;
        points.retain(|p| p.date >= start && p.date <= end);
        PriceSeries::new(ticker, points)
    }

    fn list_tickers(&self) -> Result<Vec<String>, QuantdashError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| QuantdashError::DataFile {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut tickers = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| QuantdashError::DataFile {
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if let Some(ticker) = name_str.strip_suffix(".csv") {
                tickers.push(ticker.to_string());
            }
        }

        tickers.sort();
        Ok(tickers)
    }

    fn data_range(
        &self,
        ticker: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, QuantdashError> {
        if !self.csv_path(ticker).exists() {
            return Ok(None);
        }
        let points = self.read_points(ticker)?;
        match (points.first(), points.last()) {
            (Some(first), Some(last)) => Ok(Some((first.date, last.date, points.len()))),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_data() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_path_buf();

        let csv_content = "date,close\n\
            2024-01-15,713.40\n\
            2024-01-16,720.10\n\
            2024-01-17,705.20\n";
        fs::write(path.join("MC.PA.csv"), csv_content).unwrap();

        // Deliberately unsorted rows; the adapter must sort on read.
        let unsorted = "date,close\n\
            2024-01-17,62.10\n\
            2024-01-15,61.05\n\
            2024-01-16,61.80\n";
        fs::write(path.join("TTE.PA.csv"), unsorted).unwrap();

        fs::write(path.join("EURUSD=X.csv"), "date,close\n2024-01-15,1.0875\n").unwrap();
        fs::write(path.join("notes.txt"), "not a data file").unwrap();

        (dir, path)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn fetch_series_returns_validated_data() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvPriceAdapter::new(path);

        let series = adapter
            .fetch_series("MC.PA", date(2024, 1, 15), date(2024, 1, 17))
            .unwrap();

        assert_eq!(series.ticker, "MC.PA");
        assert_eq!(series.len(), 3);
        assert_eq!(series.points[0].date, date(2024, 1, 15));
        assert!((series.points[0].close - 713.40).abs() < f64::EPSILON);
    }

    #[test]
    fn fetch_series_sorts_rows_by_date() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvPriceAdapter::new(path);

        let series = adapter
            .fetch_series("TTE.PA", date(2024, 1, 15), date(2024, 1, 17))
            .unwrap();

        assert_eq!(series.points[0].date, date(2024, 1, 15));
        assert_eq!(series.points[2].date, date(2024, 1, 17));
        assert!((series.points[2].close - 62.10).abs() < f64::EPSILON);
    }

    #[test]
    fn fetch_series_filters_by_date_range() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvPriceAdapter::new(path);

        let series = adapter
            .fetch_series("MC.PA", date(2024, 1, 16), date(2024, 1, 16))
            .unwrap();

        assert_eq!(series.len(), 1);
        assert_eq!(series.points[0].date, date(2024, 1, 16));
    }

    #[test]
    fn fetch_series_missing_file_is_no_data() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvPriceAdapter::new(path);

        let result = adapter.fetch_series("BNP.PA", date(2024, 1, 1), date(2024, 1, 31));
        assert!(matches!(
            result,
            Err(QuantdashError::NoData { ticker }) if ticker == "BNP.PA"
        ));
    }

    #[test]
    fn fetch_series_rejects_bad_close_value() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_path_buf();
        fs::write(path.join("BAD.csv"), "date,close\n2024-01-15,abc\n").unwrap();
        let adapter = CsvPriceAdapter::new(path);

        let result = adapter.fetch_series("BAD", date(2024, 1, 1), date(2024, 1, 31));
        assert!(matches!(result, Err(QuantdashError::DataFile { .. })));
    }

    #[test]
    fn fetch_series_rejects_non_positive_price() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_path_buf();
        fs::write(path.join("ZERO.csv"), "date,close\n2024-01-15,0.0\n").unwrap();
        let adapter = CsvPriceAdapter::new(path);

        let result = adapter.fetch_series("ZERO", date(2024, 1, 1), date(2024, 1, 31));
        assert!(matches!(
            result,
            Err(QuantdashError::NonPositivePrice { .. })
        ));
    }

    #[test]
    fn list_tickers_finds_csv_files_only() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvPriceAdapter::new(path);

        let tickers = adapter.list_tickers().unwrap();
        assert_eq!(tickers, vec!["EURUSD=X", "MC.PA", "TTE.PA"]);
    }

    #[test]
    fn data_range_reports_bounds_and_count() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvPriceAdapter::new(path);

        let range = adapter.data_range("MC.PA").unwrap();
        assert_eq!(range, Some((date(2024, 1, 15), date(2024, 1, 17), 3)));

        assert_eq!(adapter.data_range("BNP.PA").unwrap(), None);
    }

    #[test]
    fn load_prices_fetches_all_requested_tickers() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvPriceAdapter::new(path);

        let tickers = vec!["MC.PA".to_string(), "TTE.PA".to_string()];
        let prices = adapter
            .load_prices(&tickers, date(2024, 1, 1), date(2024, 1, 31))
            .unwrap();

        assert_eq!(prices.len(), 2);
        assert_eq!(prices["MC.PA"].len(), 3);
        assert_eq!(prices["TTE.PA"].len(), 3);
    }
}
