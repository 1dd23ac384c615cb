//! Risk statistics over return and equity series.

use super::error::{QuantdashError, StatError};
use super::series::{EquityCurve, ReturnSeries};

pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.01;

/// Whether ratio statistics are scaled to an annual basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetricPreset {
    #[default]
    Annualized,
    Raw,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsConfig {
    /// Annual risk-free rate, converted to a daily rate internally.
    pub risk_free_rate: f64,
    pub preset: MetricPreset,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            preset: MetricPreset::Annualized,
        }
    }
}

/// Scalar risk statistics for one return series, recomputed per request.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskReport {
    pub mean_return: f64,
    pub volatility: f64,
    /// `None` when excess returns have zero variance (flat series); every
    /// other statistic in the report still resolves.
    pub sharpe_ratio: Option<f64>,
    /// Most negative peak-to-trough decline; always <= 0.
    pub max_drawdown: f64,
}

impl RiskReport {
    pub fn compute(
        returns: &ReturnSeries,
        config: &MetricsConfig,
    ) -> Result<Self, QuantdashError> {
        if returns.len() < 2 {
            return Err(QuantdashError::SeriesTooShort {
                ticker: returns.ticker.clone(),
                len: returns.len(),
                minimum: 2,
            });
        }

        let equity = EquityCurve::from_returns(1.0, returns);
        Ok(Self {
            mean_return: mean_return(returns),
            volatility: volatility(returns, config.preset),
            sharpe_ratio: sharpe_ratio(returns, config).ok(),
            max_drawdown: max_drawdown(&equity),
        })
    }
}

/// Arithmetic mean of the series; 0.0 for an empty one.
pub fn mean_return(returns: &ReturnSeries) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    returns.values().sum::<f64>() / returns.len() as f64
}

/// Sample standard deviation, annualized by sqrt(252) under the
/// `Annualized` preset; 0.0 for fewer than two observations.
pub fn volatility(returns: &ReturnSeries, preset: MetricPreset) -> f64 {
    if returns.len() < 2 {
        return 0.0;
    }
    let stddev = sample_stddev(returns, mean_return(returns));
    match preset {
        MetricPreset::Annualized => stddev * TRADING_DAYS_PER_YEAR.sqrt(),
        MetricPreset::Raw => stddev,
    }
}

/// Sharpe ratio of excess returns over the daily risk-free rate.
///
/// Subtracting a constant daily rate leaves the standard deviation
/// unchanged, so the denominator is the return stddev itself. Undefined
/// for a flat series.
pub fn sharpe_ratio(
    returns: &ReturnSeries,
    config: &MetricsConfig,
) -> Result<f64, StatError> {
    if returns.len() < 2 {
        return Err(StatError::ZeroVariance);
    }
    let mean = mean_return(returns);
    let stddev = sample_stddev(returns, mean);
    if stddev == 0.0 {
        return Err(StatError::ZeroVariance);
    }

    let daily_rf = config.risk_free_rate / TRADING_DAYS_PER_YEAR;
    let ratio = (mean - daily_rf) / stddev;
    Ok(match config.preset {
        MetricPreset::Annualized => ratio * TRADING_DAYS_PER_YEAR.sqrt(),
        MetricPreset::Raw => ratio,
    })
}

/// Most negative drawdown from the running peak, which is seeded at the
/// curve base so a curve that never regains its base still reports the dip
/// below it. Always <= 0; exactly 0 for a non-decreasing curve.
pub fn max_drawdown(curve: &EquityCurve) -> f64 {
    let mut peak = curve.base;
    let mut max_dd = 0.0_f64;

    for point in &curve.points {
        if point.equity > peak {
            peak = point.equity;
        } else if peak > 0.0 {
            let dd = (point.equity - peak) / peak;
            if dd < max_dd {
                max_dd = dd;
            }
        }
    }

    max_dd
}

fn sample_stddev(returns: &ReturnSeries, mean: f64) -> f64 {
    let n = returns.len() as f64;
    let variance = returns.values().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}
