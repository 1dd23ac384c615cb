//! Domain error types.
//!
//! Two distinct classes: [`QuantdashError`] marks malformed or insufficient
//! input and aborts the whole request; [`StatError`] marks a statistic that
//! is mathematically undefined for well-formed input and aborts only that
//! statistic (callers render it as "N/A").

use chrono::NaiveDate;

/// A statistic that is undefined because the underlying variance is zero.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatError {
    #[error("return series has zero variance, statistic is undefined")]
    ZeroVariance,

    #[error("return series for {0} has zero variance, correlation is undefined")]
    ZeroVarianceAsset(String),
}

/// Errors raised while parsing a ticker selection list.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SelectionError {
    #[error("empty token in ticker list")]
    EmptyToken,

    #[error("duplicate ticker: {0}")]
    DuplicateTicker(String),
}

/// Top-level error type for quantdash.
#[derive(Debug, thiserror::Error)]
pub enum QuantdashError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data file error: {reason}")]
    DataFile { reason: String },

    #[error("no data for {ticker}")]
    NoData { ticker: String },

    #[error("empty series")]
    EmptySeries,

    #[error("series for {ticker} too short: {len} observations, need at least {minimum}")]
    SeriesTooShort {
        ticker: String,
        len: usize,
        minimum: usize,
    },

    #[error("non-positive price {price} for {ticker} on {date}")]
    NonPositivePrice {
        ticker: String,
        date: NaiveDate,
        price: f64,
    },

    #[error("dates for {ticker} not strictly increasing at {date}")]
    NonIncreasingDate { ticker: String, date: NaiveDate },

    #[error("rebase base must be positive, got {base}")]
    NonPositiveBase { base: f64 },

    #[error("momentum window {window} outside [{min}, {max}]")]
    WindowOutOfRange {
        window: usize,
        min: usize,
        max: usize,
    },

    #[error("unknown strategy: {name}")]
    UnknownStrategy { name: String },

    #[error("need at least {minimum} assets, got {count}")]
    TooFewAssets { count: usize, minimum: usize },

    #[error("negative weight {weight} for {ticker}")]
    NegativeWeight { ticker: String, weight: f64 },

    #[error("weights sum to zero")]
    ZeroWeightSum,

    #[error("{weights} weights supplied for {assets} assets")]
    WeightCountMismatch { weights: usize, assets: usize },

    #[error("no weight supplied for {ticker}")]
    UnweightedAsset { ticker: String },

    #[error("time index mismatch between {left} and {right}")]
    MisalignedSeries { left: String, right: String },

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Undefined(#[from] StatError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl QuantdashError {
    /// True when the error marks an undefined statistic rather than bad input.
    pub fn is_undefined_statistic(&self) -> bool {
        matches!(self, QuantdashError::Undefined(_))
    }
}

impl From<&QuantdashError> for std::process::ExitCode {
    fn from(err: &QuantdashError) -> Self {
        let code: u8 = match err {
            QuantdashError::Io(_) | QuantdashError::DataFile { .. } => 1,
            QuantdashError::ConfigParse { .. }
            | QuantdashError::ConfigMissing { .. }
            | QuantdashError::ConfigInvalid { .. } => 2,
            QuantdashError::NoData { .. } => 3,
            QuantdashError::Undefined(_) => 5,
            _ => 4,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undefined_statistic_is_distinguished() {
        let err = QuantdashError::from(StatError::ZeroVariance);
        assert!(err.is_undefined_statistic());

        let err = QuantdashError::EmptySeries;
        assert!(!err.is_undefined_statistic());
    }

    #[test]
    fn zero_variance_asset_names_the_ticker() {
        let err = StatError::ZeroVarianceAsset("MC.PA".to_string());
        assert!(err.to_string().contains("MC.PA"));
    }

    #[test]
    fn selection_error_converts() {
        let err = QuantdashError::from(SelectionError::DuplicateTicker("TTE.PA".to_string()));
        assert!(matches!(
            err,
            QuantdashError::Selection(SelectionError::DuplicateTicker(t)) if t == "TTE.PA"
        ));
    }
}
