//! Weighted multi-asset aggregation.

use super::error::QuantdashError;
use super::series::{EquityCurve, ReturnPoint, ReturnSeries};
use super::weights::{WeightVector, MIN_PORTFOLIO_ASSETS};

/// Ticker label carried by the combined return series.
pub const PORTFOLIO_TICKER: &str = "PORTFOLIO";

#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioResult {
    pub returns: ReturnSeries,
    /// Compounded at base 1.0; rebasing to 100 is the caller's choice.
    pub equity: EquityCurve,
}

/// Weighted sum of aligned per-asset returns, compounded at base 1.0.
///
/// Every input series must share an identical date index; align beforehand
/// with [`align_series`](super::series::align_series). Each series is paired
/// with its weight by ticker.
pub fn aggregate(
    series: &[ReturnSeries],
    weights: &WeightVector,
) -> Result<PortfolioResult, QuantdashError> {
    if series.len() < MIN_PORTFOLIO_ASSETS {
        return Err(QuantdashError::TooFewAssets {
            count: series.len(),
            minimum: MIN_PORTFOLIO_ASSETS,
        });
    }
    if series.len() != weights.len() {
        return Err(QuantdashError::WeightCountMismatch {
            weights: weights.len(),
            assets: series.len(),
        });
    }

    let first = &series[0];
    for other in &series[1..] {
        let aligned = other.len() == first.len()
            && other
                .points
                .iter()
                .zip(&first.points)
                .all(|(a, b)| a.date == b.date);
        if !aligned {
            return Err(QuantdashError::MisalignedSeries {
                left: first.ticker.clone(),
                right: other.ticker.clone(),
            });
        }
    }

    let mut weighted = Vec::with_capacity(series.len());
    for s in series {
        let weight = weights
            .weight_for(&s.ticker)
            .ok_or_else(|| QuantdashError::UnweightedAsset {
                ticker: s.ticker.clone(),
            })?;
        weighted.push((weight, s));
    }

    let points: Vec<ReturnPoint> = (0..first.len())
        .map(|t| ReturnPoint {
            date: first.points[t].date,
            value: weighted.iter().map(|(w, s)| w * s.points[t].value).sum(),
        })
        .collect();

    let returns = ReturnSeries {
        ticker: PORTFOLIO_TICKER.to_string(),
        points,
    };
    let equity = EquityCurve::from_returns(1.0, &returns);

    Ok(PortfolioResult { returns, equity })
}
