//! Price, return and equity series — the core data model.

use chrono::NaiveDate;
use std::collections::BTreeSet;

use super::error::QuantdashError;

/// One daily closing-price observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// An ordered daily closing-price series for one instrument.
///
/// Construction enforces strictly increasing dates and strictly positive
/// prices, so a `PriceSeries` that exists is well formed.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    pub ticker: String,
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(
        ticker: impl Into<String>,
        points: Vec<PricePoint>,
    ) -> Result<Self, QuantdashError> {
        let ticker = ticker.into();
        for (i, point) in points.iter().enumerate() {
            if point.close <= 0.0 {
                return Err(QuantdashError::NonPositivePrice {
                    ticker,
                    date: point.date,
                    price: point.close,
                });
            }
            if i > 0 && point.date <= points[i - 1].date {
                return Err(QuantdashError::NonIncreasingDate {
                    ticker,
                    date: point.date,
                });
            }
        }
        Ok(Self { ticker, points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }
}

/// One period-over-period fractional return.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// An ordered fractional-return series, one entry shorter than its source
/// price series (the first period has no prior observation).
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnSeries {
    pub ticker: String,
    pub points: Vec<ReturnPoint>,
}

impl ReturnSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }
}

/// One point of a compounded value series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub equity: f64,
}

/// A value series anchored at a fixed base, never renormalized mid-series.
#[derive(Debug, Clone, PartialEq)]
pub struct EquityCurve {
    pub base: f64,
    pub points: Vec<EquityPoint>,
}

impl EquityCurve {
    /// Compound `(1 + r)` from `base`, emitting the leading base point at
    /// `start_date` followed by one point per return.
    pub fn compound(base: f64, start_date: NaiveDate, returns: &ReturnSeries) -> Self {
        let mut points = Vec::with_capacity(returns.len() + 1);
        points.push(EquityPoint {
            date: start_date,
            equity: base,
        });
        let mut equity = base;
        for point in &returns.points {
            equity *= 1.0 + point.value;
            points.push(EquityPoint {
                date: point.date,
                equity,
            });
        }
        Self { base, points }
    }

    /// Compound `(1 + r)` from `base`, one point per return. The base is
    /// recorded on the curve but not emitted as a point; drawdown seeds its
    /// running peak from it so both constructions report the same declines.
    pub fn from_returns(base: f64, returns: &ReturnSeries) -> Self {
        let mut points = Vec::with_capacity(returns.len());
        let mut equity = base;
        for point in &returns.points {
            equity *= 1.0 + point.value;
            points.push(EquityPoint {
                date: point.date,
                equity,
            });
        }
        Self { base, points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn final_equity(&self) -> Option<f64> {
        self.points.last().map(|p| p.equity)
    }
}

/// Restrict each series to the dates present in every series (row-wise drop
/// of dates missing from any instrument), preserving order.
pub fn align_series(series: &[PriceSeries]) -> Vec<PriceSeries> {
    let Some((first, rest)) = series.split_first() else {
        return Vec::new();
    };
    let mut common: BTreeSet<NaiveDate> = first.points.iter().map(|p| p.date).collect();
    for s in rest {
        let dates: BTreeSet<NaiveDate> = s.points.iter().map(|p| p.date).collect();
        common = common.intersection(&dates).copied().collect();
    }
    series
        .iter()
        .map(|s| PriceSeries {
            ticker: s.ticker.clone(),
            points: s
                .points
                .iter()
                .filter(|p| common.contains(&p.date))
                .copied()
                .collect(),
        })
        .collect()
}
