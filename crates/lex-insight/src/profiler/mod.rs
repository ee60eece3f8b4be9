//! Data profiling module for dataset overviews.
//!
//! This module provides the descriptive part of a report:
//! - Head and dtype listing
//! - Per-column descriptive statistics
//! - Missing value and duplicate row counts
//! - Value counts for categorical columns
//! - Skewness and histogram bins for numeric columns

mod describe;

use crate::analysis::statistics::{histogram, skewness};
use crate::types::{
    ColumnDescription, ColumnInfo, ColumnSkewness, DatasetInfo, Histogram, MissingCount,
    ValueCounts,
};
use crate::utils::{categorical_column_names, numeric_columns};
use anyhow::Result;
use polars::prelude::*;
use tracing::debug;

pub(crate) use describe::describe_column;
use describe::{count_text_values, top_values};

/// Data profiler for descriptive dataset summaries.
pub struct DataProfiler;

impl DataProfiler {
    /// First `n` rows of the dataset.
    pub fn head(df: &DataFrame, n: usize) -> DataFrame {
        df.head(Some(n))
    }

    /// Shape plus dtype and non-null count of every column.
    pub fn info(df: &DataFrame) -> DatasetInfo {
        let columns = df
            .get_columns()
            .iter()
            .map(|col| {
                let series = col.as_materialized_series();
                ColumnInfo {
                    name: col.name().to_string(),
                    dtype: format!("{}", series.dtype()),
                    non_null_count: series.len() - series.null_count(),
                }
            })
            .collect();

        DatasetInfo {
            rows: df.height(),
            columns,
        }
    }

    /// Descriptive statistics of every column, numeric or not.
    pub fn describe(df: &DataFrame) -> Result<Vec<ColumnDescription>> {
        df.get_columns().iter().map(describe_column).collect()
    }

    /// Null count of every column, in column order.
    pub fn missing_values(df: &DataFrame) -> Vec<MissingCount> {
        df.get_columns()
            .iter()
            .map(|col| MissingCount {
                name: col.name().to_string(),
                null_count: col.as_materialized_series().null_count(),
            })
            .collect()
    }

    /// Only the columns that have at least one null.
    pub fn columns_with_missing(df: &DataFrame) -> Vec<MissingCount> {
        Self::missing_values(df)
            .into_iter()
            .filter(|m| m.null_count > 0)
            .collect()
    }

    /// Number of rows that repeat an earlier row exactly.
    pub fn duplicate_rows(df: &DataFrame) -> Result<usize> {
        if df.height() == 0 {
            return Ok(0);
        }
        let unique = df.unique::<&str, &str>(None, UniqueKeepStrategy::First, None)?;
        Ok(df.height() - unique.height())
    }

    /// Most frequent values of each string/categorical column.
    pub fn value_counts(df: &DataFrame, limit: usize) -> Result<Vec<ValueCounts>> {
        categorical_column_names(df)
            .into_iter()
            .map(|name| {
                let col = df.column(&name)?;
                let counts = count_text_values(col.as_materialized_series())?;
                debug!("Column '{}' has {} distinct values", name, counts.len());
                Ok(ValueCounts {
                    column: name,
                    counts: top_values(counts, limit),
                })
            })
            .collect()
    }

    /// Sample skewness of every numeric column.
    pub fn skewness(df: &DataFrame) -> Result<Vec<ColumnSkewness>> {
        Ok(numeric_columns(df)?
            .into_iter()
            .map(|col| ColumnSkewness {
                skewness: skewness(&col.present()),
                name: col.name,
            })
            .collect())
    }

    /// Equal-width histogram of every numeric column with data.
    ///
    /// Columns with no non-missing value are skipped.
    pub fn histograms(df: &DataFrame, bins: usize) -> Result<Vec<Histogram>> {
        Ok(numeric_columns(df)?
            .iter()
            .filter_map(|col| histogram(&col.name, &col.present(), bins))
            .collect())
    }
}
