//! Series rebasing to a fixed starting value.

use super::error::QuantdashError;
use super::series::{EquityCurve, EquityPoint, PriceSeries};

/// Rebase a price series so its first observation equals `base` exactly.
///
/// Every value is scaled by `base / first`; the first output value is
/// assigned, not recomputed, so it carries no rounding.
pub fn rebase_prices(prices: &PriceSeries, base: f64) -> Result<EquityCurve, QuantdashError> {
    if base <= 0.0 {
        return Err(QuantdashError::NonPositiveBase { base });
    }
    let first = prices.points.first().ok_or(QuantdashError::EmptySeries)?;

    let scale = base / first.close;
    let mut points: Vec<EquityPoint> = prices
        .points
        .iter()
        .map(|p| EquityPoint {
            date: p.date,
            equity: p.close * scale,
        })
        .collect();
    points[0].equity = base;

    Ok(EquityCurve { base, points })
}

/// Rebase an equity curve to a new base, preserving its shape.
pub fn rebase_curve(curve: &EquityCurve, base: f64) -> Result<EquityCurve, QuantdashError> {
    if base <= 0.0 {
        return Err(QuantdashError::NonPositiveBase { base });
    }
    let first = curve.points.first().ok_or(QuantdashError::EmptySeries)?;

    let scale = base / first.equity;
    let mut points: Vec<EquityPoint> = curve
        .points
        .iter()
        .map(|p| EquityPoint {
            date: p.date,
            equity: p.equity * scale,
        })
        .collect();
    points[0].equity = base;

    Ok(EquityCurve { base, points })
}
