//! Strategy signal generation.
//!
//! Strategies form a closed set dispatched through [`compute_signal`];
//! adding a variant extends the enum without touching the backtester.

use chrono::NaiveDate;
use std::fmt;

use super::error::QuantdashError;
use super::series::PriceSeries;

pub const MIN_MOMENTUM_WINDOW: usize = 2;
pub const MAX_MOMENTUM_WINDOW: usize = 30;

/// The supported strategy variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    BuyAndHold,
    Momentum { window: usize },
}

impl StrategyKind {
    /// Parse a strategy name as written in config files and CLI flags.
    pub fn parse(name: &str, momentum_window: usize) -> Result<Self, QuantdashError> {
        match name.to_lowercase().replace('_', "-").as_str() {
            "buy-and-hold" | "buyandhold" => Ok(StrategyKind::BuyAndHold),
            "momentum" => {
                let kind = StrategyKind::Momentum {
                    window: momentum_window,
                };
                kind.validate()?;
                Ok(kind)
            }
            _ => Err(QuantdashError::UnknownStrategy {
                name: name.to_string(),
            }),
        }
    }

    pub fn validate(&self) -> Result<(), QuantdashError> {
        if let StrategyKind::Momentum { window } = *self {
            if !(MIN_MOMENTUM_WINDOW..=MAX_MOMENTUM_WINDOW).contains(&window) {
                return Err(QuantdashError::WindowOutOfRange {
                    window,
                    min: MIN_MOMENTUM_WINDOW,
                    max: MAX_MOMENTUM_WINDOW,
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::BuyAndHold => write!(f, "buy-and-hold"),
            StrategyKind::Momentum { window } => write!(f, "momentum({})", window),
        }
    }
}

/// One signal observation. Points inside a lookback warmup are not valid
/// and carry no exposure decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalPoint {
    pub date: NaiveDate,
    pub valid: bool,
    pub long: bool,
}

/// A position signal aligned one-to-one with a price series.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    pub strategy: StrategyKind,
    pub points: Vec<SignalPoint>,
}

impl Signal {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Compute the position signal for `strategy` over `prices`.
///
/// BuyAndHold is long at every observation. Momentum(w) is long at `t` iff
/// the trailing `w`-period change is positive — a directional decision,
/// not a magnitude one; the first `w` points are warmup and invalid.
pub fn compute_signal(
    prices: &PriceSeries,
    strategy: StrategyKind,
) -> Result<Signal, QuantdashError> {
    strategy.validate()?;
    if prices.is_empty() {
        return Err(QuantdashError::EmptySeries);
    }

    let points = match strategy {
        StrategyKind::BuyAndHold => prices
            .points
            .iter()
            .map(|p| SignalPoint {
                date: p.date,
                valid: true,
                long: true,
            })
            .collect(),
        StrategyKind::Momentum { window } => prices
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let valid = i >= window;
                let long = valid && p.close / prices.points[i - window].close - 1.0 > 0.0;
                SignalPoint {
                    date: p.date,
                    valid,
                    long,
                }
            })
            .collect(),
    };

    Ok(Signal { strategy, points })
}
