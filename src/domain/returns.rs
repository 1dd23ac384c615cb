//! Period-over-period return calculation.

use super::error::QuantdashError;
use super::series::{PriceSeries, ReturnPoint, ReturnSeries};

/// `(price[t] / price[t-1]) - 1` for every consecutive pair of observations.
///
/// The first period has no prior value to compare against and is dropped,
/// so the result is one entry shorter than the input.
pub fn simple_returns(prices: &PriceSeries) -> Result<ReturnSeries, QuantdashError> {
    if prices.len() < 2 {
        return Err(QuantdashError::SeriesTooShort {
            ticker: prices.ticker.clone(),
            len: prices.len(),
            minimum: 2,
        });
    }
    if let Some(bad) = prices.points.iter().find(|p| p.close <= 0.0) {
        return Err(QuantdashError::NonPositivePrice {
            ticker: prices.ticker.clone(),
            date: bad.date,
            price: bad.close,
        });
    }

    let points = prices
        .points
        .windows(2)
        .map(|w| ReturnPoint {
            date: w[1].date,
            value: w[1].close / w[0].close - 1.0,
        })
        .collect();

    Ok(ReturnSeries {
        ticker: prices.ticker.clone(),
        points,
    })
}
