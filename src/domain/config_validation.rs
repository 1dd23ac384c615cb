//! Configuration validation.
//!
//! Validates config fields before any computation runs, so a bad value
//! fails fast with a precise message instead of surfacing mid-request.

use chrono::NaiveDate;

use crate::domain::catalog::parse_tickers;
use crate::domain::error::QuantdashError;
use crate::domain::metrics::DEFAULT_RISK_FREE_RATE;
use crate::domain::signal::{StrategyKind, MAX_MOMENTUM_WINDOW, MIN_MOMENTUM_WINDOW};
use crate::domain::weights::parse_weights;
use crate::ports::config_port::ConfigPort;

pub fn validate_engine_config(config: &dyn ConfigPort) -> Result<(), QuantdashError> {
    validate_risk_free_rate(config)?;
    validate_dates(config)?;
    Ok(())
}

pub fn validate_single_asset_config(config: &dyn ConfigPort) -> Result<(), QuantdashError> {
    validate_strategy(config)?;
    Ok(())
}

pub fn validate_portfolio_config(config: &dyn ConfigPort) -> Result<(), QuantdashError> {
    validate_portfolio_selection(config)?;
    Ok(())
}

fn validate_risk_free_rate(config: &dyn ConfigPort) -> Result<(), QuantdashError> {
    let value = config.get_float("engine", "risk_free_rate", DEFAULT_RISK_FREE_RATE);
    if !(0.0..1.0).contains(&value) {
        return Err(QuantdashError::ConfigInvalid {
            section: "engine".to_string(),
            key: "risk_free_rate".to_string(),
            reason: "risk_free_rate must be between 0 and 1".to_string(),
        });
    }
    Ok(())
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), QuantdashError> {
    let start = parse_optional_date(config, "start")?;
    let end = parse_optional_date(config, "end")?;

    if let (Some(start), Some(end)) = (start, end) {
        if start >= end {
            return Err(QuantdashError::ConfigInvalid {
                section: "dates".to_string(),
                key: "start".to_string(),
                reason: "start must be before end".to_string(),
            });
        }
    }
    Ok(())
}

fn parse_optional_date(
    config: &dyn ConfigPort,
    key: &str,
) -> Result<Option<NaiveDate>, QuantdashError> {
    match config.get_string("dates", key) {
        None => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(|e| QuantdashError::ConfigInvalid {
                section: "dates".to_string(),
                key: key.to_string(),
                reason: format!("expected YYYY-MM-DD, got {raw:?}: {e}"),
            }),
    }
}

fn validate_strategy(config: &dyn ConfigPort) -> Result<(), QuantdashError> {
    let window = config.get_int("single_asset", "momentum_window", 10);
    if window < MIN_MOMENTUM_WINDOW as i64 || window > MAX_MOMENTUM_WINDOW as i64 {
        return Err(QuantdashError::ConfigInvalid {
            section: "single_asset".to_string(),
            key: "momentum_window".to_string(),
            reason: format!(
                "momentum_window must be between {MIN_MOMENTUM_WINDOW} and {MAX_MOMENTUM_WINDOW}"
            ),
        });
    }

    if let Some(name) = config.get_string("single_asset", "strategy") {
        StrategyKind::parse(&name, window as usize).map_err(|e| {
            QuantdashError::ConfigInvalid {
                section: "single_asset".to_string(),
                key: "strategy".to_string(),
                reason: e.to_string(),
            }
        })?;
    }
    Ok(())
}

fn validate_portfolio_selection(config: &dyn ConfigPort) -> Result<(), QuantdashError> {
    let Some(tickers_raw) = config.get_string("portfolio", "tickers") else {
        return Ok(());
    };

    let tickers = parse_tickers(&tickers_raw).map_err(|e| QuantdashError::ConfigInvalid {
        section: "portfolio".to_string(),
        key: "tickers".to_string(),
        reason: e.to_string(),
    })?;
    if tickers.len() < 2 {
        return Err(QuantdashError::ConfigInvalid {
            section: "portfolio".to_string(),
            key: "tickers".to_string(),
            reason: "a portfolio needs at least 2 tickers".to_string(),
        });
    }

    let Some(weights_raw) = config.get_string("portfolio", "weights") else {
        return Ok(());
    };
    let weights = parse_weights(&weights_raw)?;
    if weights.len() != tickers.len() {
        return Err(QuantdashError::ConfigInvalid {
            section: "portfolio".to_string(),
            key: "weights".to_string(),
            reason: format!(
                "{} weights supplied for {} tickers",
                weights.len(),
                tickers.len()
            ),
        });
    }
    if let Some(weight) = weights.iter().find(|w| !(0.0..=1.0).contains(*w)) {
        return Err(QuantdashError::ConfigInvalid {
            section: "portfolio".to_string(),
            key: "weights".to_string(),
            reason: format!("weight {weight} outside [0, 1]"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    fn config_from(content: &str) -> FileConfigAdapter {
        FileConfigAdapter::from_string(content).unwrap()
    }

    #[test]
    fn default_engine_config_is_valid() {
        let config = config_from("[engine]\n");
        assert!(validate_engine_config(&config).is_ok());
    }

    #[test]
    fn risk_free_rate_out_of_range_is_rejected() {
        let config = config_from("[engine]\nrisk_free_rate = 1.5\n");
        assert!(matches!(
            validate_engine_config(&config),
            Err(QuantdashError::ConfigInvalid { key, .. }) if key == "risk_free_rate"
        ));

        let config = config_from("[engine]\nrisk_free_rate = -0.01\n");
        assert!(validate_engine_config(&config).is_err());
    }

    #[test]
    fn date_order_is_enforced() {
        let config = config_from("[dates]\nstart = 2024-06-01\nend = 2024-01-01\n");
        assert!(matches!(
            validate_engine_config(&config),
            Err(QuantdashError::ConfigInvalid { section, .. }) if section == "dates"
        ));
    }

    #[test]
    fn malformed_date_is_rejected() {
        let config = config_from("[dates]\nstart = 01/06/2024\n");
        assert!(validate_engine_config(&config).is_err());
    }

    #[test]
    fn valid_strategy_config_passes() {
        let config = config_from("[single_asset]\nstrategy = momentum\nmomentum_window = 5\n");
        assert!(validate_single_asset_config(&config).is_ok());
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        let config = config_from("[single_asset]\nstrategy = arbitrage\n");
        assert!(matches!(
            validate_single_asset_config(&config),
            Err(QuantdashError::ConfigInvalid { key, .. }) if key == "strategy"
        ));
    }

    #[test]
    fn window_out_of_bounds_is_rejected() {
        let config = config_from("[single_asset]\nmomentum_window = 31\n");
        assert!(matches!(
            validate_single_asset_config(&config),
            Err(QuantdashError::ConfigInvalid { key, .. }) if key == "momentum_window"
        ));

        let config = config_from("[single_asset]\nmomentum_window = 1\n");
        assert!(validate_single_asset_config(&config).is_err());
    }

    #[test]
    fn portfolio_config_checks_counts() {
        let config = config_from(
            "[portfolio]\ntickers = MC.PA,TTE.PA,AIR.PA\nweights = 0.5,0.5\n",
        );
        assert!(matches!(
            validate_portfolio_config(&config),
            Err(QuantdashError::ConfigInvalid { key, .. }) if key == "weights"
        ));
    }

    #[test]
    fn portfolio_weight_above_one_is_rejected() {
        let config = config_from("[portfolio]\ntickers = MC.PA,TTE.PA\nweights = 1.2,0.3\n");
        assert!(validate_portfolio_config(&config).is_err());
    }

    #[test]
    fn portfolio_single_ticker_is_rejected() {
        let config = config_from("[portfolio]\ntickers = MC.PA\n");
        assert!(validate_portfolio_config(&config).is_err());
    }

    #[test]
    fn absent_portfolio_section_is_fine() {
        let config = config_from("[engine]\n");
        assert!(validate_portfolio_config(&config).is_ok());
    }
}
