//! CLI definition and dispatch.
//!
//! The CLI plays the role of the presentation collaborator: it wires the
//! config and data adapters to the domain, prints raw numeric results, and
//! maps error classes to distinct exit codes. Undefined statistics render
//! as "N/A" without aborting the request.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvPriceAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::backtest::run_backtest;
use crate::domain::catalog::{
    parse_tickers, validate_selection, SelectionOutcome, SkipReason, CATALOG,
    MIN_PRICE_OBSERVATIONS,
};
use crate::domain::config_validation::{
    validate_engine_config, validate_portfolio_config, validate_single_asset_config,
};
use crate::domain::correlation::{correlation_matrix, CorrelationMatrix};
use crate::domain::error::QuantdashError;
use crate::domain::metrics::{MetricPreset, MetricsConfig, RiskReport, DEFAULT_RISK_FREE_RATE};
use crate::domain::portfolio::aggregate;
use crate::domain::returns::simple_returns;
use crate::domain::series::{align_series, EquityCurve, PriceSeries, ReturnSeries};
use crate::domain::signal::StrategyKind;
use crate::domain::weights::{parse_weights, WeightVector};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::PriceDataPort;

const DEFAULT_SINGLE_ASSET_TICKER: &str = "EURUSD=X";
const OVERLAY_BASE: f64 = 100.0;

#[derive(Parser, Debug)]
#[command(name = "quantdash", about = "Strategy and portfolio analytics engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Backtest a strategy on one instrument
    SingleAsset {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        ticker: Option<String>,
        /// buy-and-hold or momentum
        #[arg(long)]
        strategy: Option<String>,
        /// Momentum lookback window in trading days
        #[arg(long)]
        window: Option<usize>,
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long)]
        end: Option<NaiveDate>,
        /// Report raw (non-annualized) volatility and Sharpe ratio
        #[arg(long)]
        raw: bool,
    },
    /// Analyze a weighted multi-asset portfolio
    Portfolio {
        #[arg(short, long)]
        config: PathBuf,
        /// Comma-separated tickers, e.g. MC.PA,TTE.PA,AIR.PA
        #[arg(long)]
        tickers: Option<String>,
        /// Comma-separated weights matching the tickers
        #[arg(long)]
        weights: Option<String>,
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long)]
        end: Option<NaiveDate>,
        #[arg(long)]
        raw: bool,
    },
    /// Pairwise return correlation for a set of instruments
    Correlation {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        tickers: Option<String>,
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long)]
        end: Option<NaiveDate>,
    },
    /// List the instrument catalog
    ListInstruments,
    /// Show stored data range for ticker(s)
    Info {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        ticker: Option<String>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::SingleAsset {
            config,
            ticker,
            strategy,
            window,
            start,
            end,
            raw,
        } => run_single_asset(
            &config,
            ticker.as_deref(),
            strategy.as_deref(),
            window,
            start,
            end,
            raw,
        ),
        Command::Portfolio {
            config,
            tickers,
            weights,
            start,
            end,
            raw,
        } => run_portfolio(
            &config,
            tickers.as_deref(),
            weights.as_deref(),
            start,
            end,
            raw,
        ),
        Command::Correlation {
            config,
            tickers,
            start,
            end,
        } => run_correlation(&config, tickers.as_deref(), start, end),
        Command::ListInstruments => {
            run_list_instruments();
            Ok(())
        }
        Command::Info { config, ticker } => run_info(&config, ticker.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(&err)
        }
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, QuantdashError> {
    FileConfigAdapter::from_file(path).map_err(|e| QuantdashError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

pub fn data_adapter(config: &dyn ConfigPort) -> Result<CsvPriceAdapter, QuantdashError> {
    let dir = config
        .get_string("data", "prices_dir")
        .ok_or_else(|| QuantdashError::ConfigMissing {
            section: "data".to_string(),
            key: "prices_dir".to_string(),
        })?;
    Ok(CsvPriceAdapter::new(PathBuf::from(dir)))
}

/// Strategy from CLI overrides falling back to `[single_asset]` config.
pub fn build_strategy(
    config: &dyn ConfigPort,
    name_override: Option<&str>,
    window_override: Option<usize>,
) -> Result<StrategyKind, QuantdashError> {
    let name = match name_override {
        Some(name) => name.to_string(),
        None => config
            .get_string("single_asset", "strategy")
            .unwrap_or_else(|| "buy-and-hold".to_string()),
    };
    let window = window_override
        .unwrap_or_else(|| config.get_int("single_asset", "momentum_window", 10).max(0) as usize);
    StrategyKind::parse(&name, window)
}

/// Metric preset and risk-free rate from config, with `--raw` overriding.
pub fn build_metrics_config(config: &dyn ConfigPort, raw: bool) -> MetricsConfig {
    let preset = if raw || !config.get_bool("engine", "annualized", true) {
        MetricPreset::Raw
    } else {
        MetricPreset::Annualized
    };
    MetricsConfig {
        risk_free_rate: config.get_float("engine", "risk_free_rate", DEFAULT_RISK_FREE_RATE),
        preset,
    }
}

/// Date range from CLI overrides falling back to `[dates]` config; an
/// unbounded side defaults to the widest representable range.
pub fn resolve_dates(
    config: &dyn ConfigPort,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> (NaiveDate, NaiveDate) {
    let start = start
        .or_else(|| config.get_date("dates", "start"))
        .unwrap_or(NaiveDate::MIN);
    let end = end
        .or_else(|| config.get_date("dates", "end"))
        .unwrap_or(NaiveDate::MAX);
    (start, end)
}

/// Ticker list from a CLI override falling back to `[portfolio]` config.
pub fn resolve_tickers(
    config: &dyn ConfigPort,
    tickers_override: Option<&str>,
) -> Result<Vec<String>, QuantdashError> {
    let raw = match tickers_override {
        Some(raw) => raw.to_string(),
        None => config.get_string("portfolio", "tickers").ok_or_else(|| {
            QuantdashError::ConfigMissing {
                section: "portfolio".to_string(),
                key: "tickers".to_string(),
            }
        })?,
    };
    Ok(parse_tickers(&raw)?)
}

/// Pair parsed weights with tickers, in ticker order.
pub fn build_weight_vector(
    tickers: &[String],
    weights_raw: &str,
) -> Result<WeightVector, QuantdashError> {
    let weights = parse_weights(weights_raw)?;
    if weights.len() != tickers.len() {
        return Err(QuantdashError::WeightCountMismatch {
            weights: weights.len(),
            assets: tickers.len(),
        });
    }
    WeightVector::new(tickers.iter().cloned().zip(weights).collect())
}

pub fn run_single_asset(
    config_path: &PathBuf,
    ticker_override: Option<&str>,
    strategy_override: Option<&str>,
    window_override: Option<usize>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    raw: bool,
) -> Result<(), QuantdashError> {
    let config = load_config(config_path)?;
    validate_engine_config(&config)?;
    validate_single_asset_config(&config)?;

    let strategy = build_strategy(&config, strategy_override, window_override)?;
    let ticker = match ticker_override {
        Some(ticker) => ticker.to_string(),
        None => config
            .get_string("single_asset", "ticker")
            .unwrap_or_else(|| DEFAULT_SINGLE_ASSET_TICKER.to_string()),
    };
    let (start, end) = resolve_dates(&config, start, end);

    let adapter = data_adapter(&config)?;
    let outcome = validate_selection(
        &adapter,
        &[ticker.clone()],
        start,
        end,
        MIN_PRICE_OBSERVATIONS,
        1,
    )?;
    report_skipped(&outcome);
    let prices = match outcome.series.into_iter().next() {
        Some(series) => series,
        None => return Err(QuantdashError::NoData { ticker }),
    };

    let metrics_config = build_metrics_config(&config, raw);
    let result = run_backtest(&prices, strategy, OVERLAY_BASE)?;
    let instrument_returns = simple_returns(&prices)?;
    let instrument_report = RiskReport::compute(&instrument_returns, &metrics_config)?;
    let strategy_report = RiskReport::compute(&result.strategy_returns, &metrics_config)?;

    println!(
        "{} under {} from {} to {} ({} observations)",
        prices.ticker,
        strategy,
        prices.points[0].date,
        prices.points[prices.len() - 1].date,
        prices.len()
    );
    println!();
    print_curve_endpoint("instrument (rebased)", &result.price_curve);
    print_curve_endpoint("strategy equity", &result.equity);
    println!();
    print_report("instrument", &instrument_report, metrics_config.preset);
    println!();
    print_report("strategy", &strategy_report, metrics_config.preset);

    Ok(())
}

pub fn run_portfolio(
    config_path: &PathBuf,
    tickers_override: Option<&str>,
    weights_override: Option<&str>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    raw: bool,
) -> Result<(), QuantdashError> {
    let config = load_config(config_path)?;
    validate_engine_config(&config)?;
    validate_portfolio_config(&config)?;

    let tickers = resolve_tickers(&config, tickers_override)?;
    let weights_raw = match weights_override {
        Some(weights) => weights.to_string(),
        None => config.get_string("portfolio", "weights").ok_or_else(|| {
            QuantdashError::ConfigMissing {
                section: "portfolio".to_string(),
                key: "weights".to_string(),
            }
        })?,
    };
    let weights = build_weight_vector(&tickers, &weights_raw)?;
    let (start, end) = resolve_dates(&config, start, end);

    let adapter = data_adapter(&config)?;
    let outcome = validate_selection(&adapter, &tickers, start, end, MIN_PRICE_OBSERVATIONS, 2)?;
    report_skipped(&outcome);

    let aligned = align_series(&outcome.series);
    let returns = asset_returns(&aligned)?;
    let result = aggregate(&returns, &weights)?;

    let metrics_config = build_metrics_config(&config, raw);
    let report = RiskReport::compute(&result.returns, &metrics_config)?;

    if weights.rescaled {
        eprintln!("note: weights did not sum to 1 and were rescaled");
    }
    println!("portfolio of {} from {} to {}", tickers.join(", "), start_label(&aligned), end_label(&aligned));
    for (ticker, weight) in &weights.entries {
        println!("  {:<10} {:>7.2}%", ticker, weight * 100.0);
    }
    println!();
    print_curve_endpoint("portfolio equity (base 1.0)", &result.equity);
    println!();
    print_report("portfolio", &report, metrics_config.preset);
    println!();

    match correlation_matrix(&returns) {
        Ok(matrix) => print_matrix(&matrix),
        Err(err) if err.is_undefined_statistic() => {
            println!("correlation: N/A ({err})");
        }
        Err(err) => return Err(err),
    }

    Ok(())
}

pub fn run_correlation(
    config_path: &PathBuf,
    tickers_override: Option<&str>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(), QuantdashError> {
    let config = load_config(config_path)?;
    validate_engine_config(&config)?;

    let tickers = resolve_tickers(&config, tickers_override)?;
    let (start, end) = resolve_dates(&config, start, end);

    let adapter = data_adapter(&config)?;
    let outcome = validate_selection(&adapter, &tickers, start, end, MIN_PRICE_OBSERVATIONS, 2)?;
    report_skipped(&outcome);

    let aligned = align_series(&outcome.series);
    let returns = asset_returns(&aligned)?;

    match correlation_matrix(&returns) {
        Ok(matrix) => print_matrix(&matrix),
        Err(err) if err.is_undefined_statistic() => {
            println!("correlation: N/A ({err})");
        }
        Err(err) => return Err(err),
    }

    Ok(())
}

pub fn run_list_instruments() {
    for instrument in CATALOG {
        println!("{:<10} {}", instrument.ticker, instrument.name);
    }
}

pub fn run_info(config_path: &PathBuf, ticker: Option<&str>) -> Result<(), QuantdashError> {
    let config = load_config(config_path)?;
    let adapter = data_adapter(&config)?;

    let tickers = match ticker {
        Some(ticker) => vec![ticker.to_string()],
        None => adapter.list_tickers()?,
    };

    for ticker in tickers {
        match adapter.data_range(&ticker)? {
            Some((first, last, count)) => {
                println!("{:<10} {} to {} ({} observations)", ticker, first, last, count)
            }
            None => println!("{:<10} no data", ticker),
        }
    }

    Ok(())
}

fn asset_returns(aligned: &[PriceSeries]) -> Result<Vec<ReturnSeries>, QuantdashError> {
    aligned.iter().map(simple_returns).collect()
}

fn report_skipped(outcome: &SelectionOutcome) {
    for skipped in &outcome.skipped {
        match &skipped.reason {
            SkipReason::NoData => {
                eprintln!("warning: skipping {} (no data)", skipped.ticker)
            }
            SkipReason::TooFewObservations { observations } => eprintln!(
                "warning: skipping {} (only {} observations)",
                skipped.ticker, observations
            ),
        }
    }
}

fn start_label(aligned: &[PriceSeries]) -> String {
    aligned
        .first()
        .and_then(|s| s.first_date())
        .map(|d| d.to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn end_label(aligned: &[PriceSeries]) -> String {
    aligned
        .first()
        .and_then(|s| s.last_date())
        .map(|d| d.to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn print_curve_endpoint(label: &str, curve: &EquityCurve) {
    if let Some(final_equity) = curve.final_equity() {
        println!("{:<28} {:>12.4}", label, final_equity);
    }
}

fn print_report(label: &str, report: &RiskReport, preset: MetricPreset) {
    let suffix = match preset {
        MetricPreset::Annualized => " (ann.)",
        MetricPreset::Raw => "",
    };
    println!("{label}");
    println!("  mean daily return     {:>10}", format_pct(report.mean_return));
    println!(
        "  volatility{:<10}  {:>10}",
        suffix,
        format_pct(report.volatility)
    );
    println!(
        "  sharpe ratio{:<8}  {:>10}",
        suffix,
        match report.sharpe_ratio {
            Some(sharpe) => format!("{:.2}", sharpe),
            None => "N/A".to_string(),
        }
    );
    println!("  max drawdown          {:>10}", format_pct(report.max_drawdown));
}

fn print_matrix(matrix: &CorrelationMatrix) {
    print!("{:<10}", "");
    for ticker in &matrix.tickers {
        print!(" {:>9}", ticker);
    }
    println!();
    for (i, ticker) in matrix.tickers.iter().enumerate() {
        print!("{:<10}", ticker);
        for value in &matrix.values[i] {
            print!(" {:>9.3}", value);
        }
        println!();
    }
}

fn format_pct(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}
