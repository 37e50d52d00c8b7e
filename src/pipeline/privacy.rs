//! Removal of personally identifying columns

use polars::prelude::*;
use tracing::debug;

/// Names of columns that contain any of the given markers (case-sensitive substring)
pub fn find_private_columns(df: &DataFrame, markers: &[String]) -> Vec<String> {
    df.get_column_names()
        .iter()
        .filter(|name| markers.iter().any(|m| !m.is_empty() && name.contains(m.as_str())))
        .map(|name| name.to_string())
        .collect()
}

/// Drop every private column, returning the filtered frame and the dropped names
pub fn drop_private_columns(df: &DataFrame, markers: &[String]) -> (DataFrame, Vec<String>) {
    let private = find_private_columns(df, markers);
    if private.is_empty() {
        return (df.clone(), private);
    }

    debug!(columns = ?private, "dropping private columns");
    let filtered = df.drop_many(private.iter().map(|s| s.as_str()));
    (filtered, private)
}
