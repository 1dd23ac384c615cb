//! Portfolio weight validation and normalization.

use super::error::QuantdashError;

pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;
pub const MIN_PORTFOLIO_ASSETS: usize = 2;

/// A per-asset capital allocation summing to 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightVector {
    pub entries: Vec<(String, f64)>,
    /// True when the raw input did not sum to 1.0 and had to be rescaled;
    /// the presentation layer uses this to inform the user.
    pub rescaled: bool,
}

impl WeightVector {
    /// Validate `raw` and rescale to unit sum when needed.
    ///
    /// Input already summing to 1.0 within [`WEIGHT_SUM_TOLERANCE`] passes
    /// through unchanged.
    pub fn new(raw: Vec<(String, f64)>) -> Result<Self, QuantdashError> {
        if raw.len() < MIN_PORTFOLIO_ASSETS {
            return Err(QuantdashError::TooFewAssets {
                count: raw.len(),
                minimum: MIN_PORTFOLIO_ASSETS,
            });
        }
        if let Some(entry) = raw.iter().find(|entry| entry.1 < 0.0) {
            return Err(QuantdashError::NegativeWeight {
                ticker: entry.0.clone(),
                weight: entry.1,
            });
        }
        let sum: f64 = raw.iter().map(|entry| entry.1).sum();
        if sum <= 0.0 {
            return Err(QuantdashError::ZeroWeightSum);
        }

        if (sum - 1.0).abs() <= WEIGHT_SUM_TOLERANCE {
            return Ok(Self {
                entries: raw,
                rescaled: false,
            });
        }
        let entries = raw.into_iter().map(|(t, w)| (t, w / sum)).collect();
        Ok(Self {
            entries,
            rescaled: true,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn weight_for(&self, ticker: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(t, _)| t == ticker)
            .map(|(_, w)| *w)
    }

    pub fn sum(&self) -> f64 {
        self.entries.iter().map(|entry| entry.1).sum()
    }
}

/// Parse a comma-separated weight list, e.g. `0.5, 0.3, 0.2`.
pub fn parse_weights(input: &str) -> Result<Vec<f64>, QuantdashError> {
    input
        .split(',')
        .map(|token| {
            let token = token.trim();
            token.parse::<f64>().map_err(|e| QuantdashError::ConfigInvalid {
                section: "portfolio".to_string(),
                key: "weights".to_string(),
                reason: format!("invalid weight {token:?}: {e}"),
            })
        })
        .collect()
}
