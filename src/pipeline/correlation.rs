//! Pearson correlation matrix over numeric survey columns

use polars::prelude::*;
use serde::Serialize;

use crate::error::DashboardError;
use crate::pipeline::stats::column_as_f64;

/// Square correlation matrix with labelled rows and columns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    /// `values[i][j]` is the correlation of `columns[i]` and `columns[j]`;
    /// `None` where it is undefined (constant or empty column)
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        self.values[i][j]
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Compute the correlation of every pair of the given columns.
///
/// Pairs are evaluated on rows where both values are present. A referenced
/// column that does not exist is an error.
pub fn correlation_matrix(
    df: &DataFrame,
    columns: &[String],
) -> Result<CorrelationMatrix, DashboardError> {
    let data: Vec<Vec<Option<f64>>> = columns
        .iter()
        .map(|name| column_as_f64(df, name))
        .collect::<Result<_, _>>()?;

    let n = columns.len();
    let mut values = vec![vec![None; n]; n];

    // Upper triangle, mirrored
    for i in 0..n {
        for j in i..n {
            let corr = pearson_correlation(&data[i], &data[j]);
            let corr = if i == j { corr.map(|_| 1.0) } else { corr };
            values[i][j] = corr;
            values[j][i] = corr;
        }
    }

    Ok(CorrelationMatrix {
        columns: columns.to_vec(),
        values,
    })
}

/// Pearson correlation using Welford's single-pass update.
///
/// Rows with a missing value in either column are skipped. Returns `None`
/// when fewer than two complete rows remain or either side has zero variance.
pub fn pearson_correlation(xs: &[Option<f64>], ys: &[Option<f64>]) -> Option<f64> {
    if xs.len() != ys.len() {
        return None;
    }

    let mut n = 0.0;
    let mut mean_x = 0.0;
    let mut mean_y = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    let mut cov_xy = 0.0;

    for (x, y) in xs.iter().zip(ys.iter()) {
        if let (Some(x), Some(y)) = (x, y) {
            if x.is_nan() || y.is_nan() {
                continue;
            }
            n += 1.0;
            let dx = x - mean_x;
            let dy = y - mean_y;
            mean_x += dx / n;
            mean_y += dy / n;
            var_x += dx * (x - mean_x);
            var_y += dy * (y - mean_y);
            cov_xy += dx * (y - mean_y);
        }
    }

    if n < 2.0 || var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    Some((cov_xy / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}
