//! Top-N rankings by a metric column.

use crate::error::Result;
use polars::prelude::*;
use tracing::debug;

/// A ranked slice of the dataset for one metric.
#[derive(Debug, Clone)]
pub struct Ranking {
    pub metric: String,
    pub rows: DataFrame,
}

/// Rows with the highest `metric`, projected onto `id_columns` plus the metric.
///
/// Returns `Ok(None)` when the dataset has no `metric` column. Identifier
/// columns that do not exist are left out of the projection. Rows are
/// sorted descending with nulls last; equal values keep their original order.
pub fn top_n(
    df: &DataFrame,
    metric: &str,
    id_columns: &[String],
    n: usize,
) -> Result<Option<DataFrame>> {
    if df.column(metric).is_err() {
        debug!("Skipping ranking: no '{}' column", metric);
        return Ok(None);
    }

    let mut projection: Vec<PlSmallStr> = id_columns
        .iter()
        .filter(|name| name.as_str() != metric && df.column(name).is_ok())
        .map(|name| name.as_str().into())
        .collect();
    projection.push(metric.into());

    let sorted = df.sort(
        [metric],
        SortMultipleOptions::default()
            .with_order_descending(true)
            .with_nulls_last(true)
            .with_maintain_order(true),
    )?;

    Ok(Some(sorted.select(projection)?.head(Some(n))))
}

/// Rank every metric in `metrics` that exists in the dataset.
pub fn rank_all(
    df: &DataFrame,
    metrics: &[String],
    id_columns: &[String],
    n: usize,
) -> Result<Vec<Ranking>> {
    let mut rankings = Vec::new();
    for metric in metrics {
        if let Some(rows) = top_n(df, metric, id_columns, n)? {
            rankings.push(Ranking {
                metric: metric.clone(),
                rows,
            });
        }
    }
    Ok(rankings)
}
