//! Strategy backtest: lagged signal application and equity compounding.

use super::error::QuantdashError;
use super::normalize::rebase_prices;
use super::returns::simple_returns;
use super::series::{EquityCurve, PriceSeries, ReturnPoint, ReturnSeries};
use super::signal::{compute_signal, Signal, StrategyKind};

/// Everything the single-asset path hands to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestResult {
    pub strategy: StrategyKind,
    /// Instrument prices rebased to the backtest base, for overlay.
    pub price_curve: EquityCurve,
    /// Strategy equity compounded from the same base.
    pub equity: EquityCurve,
    /// Realized strategy returns (lagged signal times instrument return).
    pub strategy_returns: ReturnSeries,
    pub signal: Signal,
}

/// Run `strategy` over `prices`, compounding from `base`.
///
/// Exposure during period `t` is the signal at `t - 1`: the decision made
/// at the close of one period determines exposure over the next, so the
/// strategy never sees the return it is trading. Warmup points and the
/// first period earn zero.
pub fn run_backtest(
    prices: &PriceSeries,
    strategy: StrategyKind,
    base: f64,
) -> Result<BacktestResult, QuantdashError> {
    let instrument_returns = simple_returns(prices)?;
    let signal = compute_signal(prices, strategy)?;
    let price_curve = rebase_prices(prices, base)?;

    // instrument_returns[i] covers the period ending at price index i + 1;
    // the deciding signal is the one observed at price index i.
    let points: Vec<ReturnPoint> = instrument_returns
        .points
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let decided = &signal.points[i];
            let exposed = decided.valid && decided.long;
            ReturnPoint {
                date: r.date,
                value: if exposed { r.value } else { 0.0 },
            }
        })
        .collect();
    let strategy_returns = ReturnSeries {
        ticker: prices.ticker.clone(),
        points,
    };

    let start = prices.points[0].date;
    let equity = EquityCurve::compound(base, start, &strategy_returns);

    Ok(BacktestResult {
        strategy,
        price_curve,
        equity,
        strategy_returns,
        signal,
    })
}
