//! Price data access port trait.
//!
//! The engine never fetches prices itself; this is the seam the external
//! retrieval collaborator plugs into.

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::domain::error::QuantdashError;
use crate::domain::series::PriceSeries;

pub trait PriceDataPort {
    /// Daily closes for one ticker inside `[start, end]`, date-ordered.
    fn fetch_series(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, QuantdashError>;

    fn list_tickers(&self) -> Result<Vec<String>, QuantdashError>;

    /// First date, last date and observation count of stored data, or
    /// `None` when nothing is stored for the ticker.
    fn data_range(
        &self,
        ticker: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, QuantdashError>;

    /// Fetch every requested ticker. The default implementation loops over
    /// [`fetch_series`](Self::fetch_series); adapters with a cheaper bulk
    /// path may override it.
    fn load_prices(
        &self,
        tickers: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<HashMap<String, PriceSeries>, QuantdashError> {
        let mut prices = HashMap::with_capacity(tickers.len());
        for ticker in tickers {
            prices.insert(ticker.clone(), self.fetch_series(ticker, start, end)?);
        }
        Ok(prices)
    }
}
