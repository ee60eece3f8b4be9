//! Per-column descriptive statistics.

use crate::analysis::statistics::{mean, quantile_sorted, sample_std, sorted};
use crate::types::ColumnDescription;
use crate::utils::is_numeric_dtype;
use anyhow::Result;
use polars::prelude::*;
use std::collections::HashMap;

/// Describe a single column.
///
/// Numeric columns get count, mean, std, min, quartiles and max. Every
/// other dtype is rendered as text and gets count, unique, top and freq.
pub(crate) fn describe_column(column: &Column) -> Result<ColumnDescription> {
    let name = column.name().to_string();
    let series = column.as_materialized_series();

    let mut description = ColumnDescription {
        name,
        count: 0,
        unique: None,
        top: None,
        freq: None,
        mean: None,
        std: None,
        min: None,
        q25: None,
        median: None,
        q75: None,
        max: None,
    };

    if is_numeric_dtype(series.dtype()) {
        let float_series = series.cast(&DataType::Float64)?;
        let values: Vec<f64> = float_series
            .f64()?
            .into_iter()
            .flatten()
            .filter(|v| !v.is_nan())
            .collect();

        description.count = values.len();
        if !values.is_empty() {
            let sorted = sorted(&values);
            description.mean = mean(&values);
            description.std = sample_std(&values);
            description.min = sorted.first().copied();
            description.q25 = Some(quantile_sorted(&sorted, 0.25));
            description.median = Some(quantile_sorted(&sorted, 0.5));
            description.q75 = Some(quantile_sorted(&sorted, 0.75));
            description.max = sorted.last().copied();
        }
    } else {
        let counts = count_text_values(series)?;
        description.count = counts.iter().map(|(_, c)| c).sum();
        if !counts.is_empty() {
            description.unique = Some(counts.len());
            if let Some((value, freq)) = most_frequent(&counts) {
                description.top = Some(value.clone());
                description.freq = Some(*freq);
            }
        }
    }

    Ok(description)
}

/// Count non-null values as text, in order of first appearance.
pub(crate) fn count_text_values(series: &Series) -> Result<Vec<(String, usize)>> {
    let str_series = series.drop_nulls().cast(&DataType::String)?;
    let str_chunked = str_series.str()?;

    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();
    for val in str_chunked.into_iter().flatten() {
        match positions.get(val) {
            Some(&idx) => counts[idx].1 += 1,
            None => {
                positions.insert(val.to_string(), counts.len());
                counts.push((val.to_string(), 1));
            }
        }
    }

    Ok(counts)
}

/// Highest count; the earliest value wins a tie.
fn most_frequent(counts: &[(String, usize)]) -> Option<&(String, usize)> {
    counts
        .iter()
        .reduce(|best, entry| if entry.1 > best.1 { entry } else { best })
}

/// The `limit` most frequent values, descending; ties keep first appearance.
pub(crate) fn top_values(mut counts: Vec<(String, usize)>, limit: usize) -> Vec<(String, usize)> {
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(limit);
    counts
}
