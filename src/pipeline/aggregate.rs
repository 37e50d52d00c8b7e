//! Categorical aggregation over one-hot indicator columns

use polars::prelude::*;
use tracing::debug;

/// Number of categories shown per chart unless configured otherwise
pub const DEFAULT_TOP_N: usize = 10;

/// Count how many respondents picked each option of a multi-select question.
///
/// Selects the columns whose name starts with `prefix`, sums each one down
/// all rows (nulls and NaN ignored) and returns the `top_n` largest totals in
/// descending order. Equal totals keep the dataset's column order.
///
/// No matching column yields an empty result. Matching columns that are
/// neither numeric nor boolean are not indicators and are skipped.
pub fn top_counts(df: &DataFrame, prefix: &str, top_n: usize) -> Vec<(String, f64)> {
    if prefix.is_empty() || top_n == 0 {
        return Vec::new();
    }

    let mut counts: Vec<(String, f64)> = df
        .get_columns()
        .iter()
        .filter(|col| col.name().starts_with(prefix))
        .filter_map(|col| {
            let dtype = col.dtype();
            if !(dtype.is_primitive_numeric() || matches!(dtype, DataType::Boolean)) {
                debug!(column = %col.name(), %dtype, "skipping non-indicator column");
                return None;
            }
            let casted = col.cast(&DataType::Float64).ok()?;
            let total: f64 = casted
                .f64()
                .ok()?
                .iter()
                .flatten()
                .filter(|v| !v.is_nan())
                .sum();
            Some((col.name().to_string(), total))
        })
        .collect();

    // Vec::sort_by is stable
    counts.sort_by(|a, b| b.1.total_cmp(&a.1));
    counts.truncate(top_n);

    counts
}

/// Option label of an indicator column: the name without its group prefix
/// and joining underscore. Falls back to the full name.
pub fn strip_group_prefix<'n>(name: &'n str, prefix: &str) -> &'n str {
    name.strip_prefix(prefix)
        .map(|rest| rest.trim_start_matches('_'))
        .filter(|rest| !rest.is_empty())
        .unwrap_or(name)
}
