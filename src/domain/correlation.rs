//! Pairwise Pearson correlation across aligned return series.

use super::error::{QuantdashError, StatError};
use super::series::ReturnSeries;
use super::weights::MIN_PORTFOLIO_ASSETS;

/// A symmetric k-by-k correlation matrix with unit diagonal.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub tickers: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn dim(&self) -> usize {
        self.tickers.len()
    }

    /// Correlation between two assets by ticker; `None` for unknown tickers.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.tickers.iter().position(|t| t == a)?;
        let j = self.tickers.iter().position(|t| t == b)?;
        Some(self.values[i][j])
    }
}

/// Pearson correlation for every unordered pair of `series`.
///
/// Inputs must share an identical date index. Any asset with zero return
/// variance makes the matrix undefined ([`StatError::ZeroVarianceAsset`]).
pub fn correlation_matrix(series: &[ReturnSeries]) -> Result<CorrelationMatrix, QuantdashError> {
    if series.len() < MIN_PORTFOLIO_ASSETS {
        return Err(QuantdashError::TooFewAssets {
            count: series.len(),
            minimum: MIN_PORTFOLIO_ASSETS,
        });
    }

    let first = &series[0];
    if first.len() < 2 {
        return Err(QuantdashError::SeriesTooShort {
            ticker: first.ticker.clone(),
            len: first.len(),
            minimum: 2,
        });
    }
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

    let n = first.len() as f64;
    let mut centered: Vec<Vec<f64>> = Vec::with_capacity(series.len());
    let mut norms: Vec<f64> = Vec::with_capacity(series.len());
    for s in series {
        let mean = s.values().sum::<f64>() / n;
        let c: Vec<f64> = s.values().map(|v| v - mean).collect();
        let sum_sq: f64 = c.iter().map(|v| v * v).sum();
        if sum_sq == 0.0 {
            return Err(StatError::ZeroVarianceAsset(s.ticker.clone()).into());
        }
        norms.push(sum_sq.sqrt());
        centered.push(c);
    }

    let k = series.len();
    let mut values = vec![vec![0.0; k]; k];
    for i in 0..k {
        values[i][i] = 1.0;
        for j in (i + 1)..k {
            let dot: f64 = centered[i]
                .iter()
                .zip(&centered[j])
                .map(|(a, b)| a * b)
                .sum();
            let rho = dot / (norms[i] * norms[j]);
            values[i][j] = rho;
            values[j][i] = rho;
        }
    }

    Ok(CorrelationMatrix {
        tickers: series.iter().map(|s| s.ticker.clone()).collect(),
        values,
    })
}
