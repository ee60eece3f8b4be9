//! Outlier and correlation summaries over the numeric columns of a dataset.

use super::statistics::{pearson, tukey_stats};
use crate::config::{AnalysisConfig, validate_correlation_window};
use crate::error::{InsightError, Result, ResultExt};
use crate::types::{ColumnStats, CorrelationMatrix, CorrelationPair};
use crate::utils::numeric_columns;
use polars::prelude::*;
use tracing::{debug, info};

/// Computes Tukey outlier counts and strong correlation pairs.
///
/// Only numeric-typed columns take part; everything else is skipped
/// silently. Nothing is cached between calls.
///
/// # Example
///
/// ```rust,ignore
/// use lex_insight::SummaryAnalyzer;
///
/// let analyzer = SummaryAnalyzer::new();
/// for stats in analyzer.compute_outliers(&df)? {
///     println!("Outliers in {}: {}", stats.name, stats.outlier_count);
/// }
/// let pairs = analyzer.compute_strong_correlations(&df, 0.7, 1.0)?;
/// ```
#[derive(Debug, Clone)]
pub struct SummaryAnalyzer {
    outlier_multiplier: f64,
    correlation_low: f64,
    correlation_high: f64,
}

impl Default for SummaryAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SummaryAnalyzer {
    /// Analyzer with Tukey's 1.5 multiplier and the `(0.7, 1.0)` window.
    pub fn new() -> Self {
        Self {
            outlier_multiplier: 1.5,
            correlation_low: 0.7,
            correlation_high: 1.0,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            outlier_multiplier: config.outlier_multiplier,
            correlation_low: config.correlation_low,
            correlation_high: config.correlation_high,
        }
    }

    /// Count IQR outliers in every numeric column, in column order.
    ///
    /// A value is an outlier when strictly below `Q1 - k*IQR` or strictly
    /// above `Q3 + k*IQR`. Missing values are ignored.
    ///
    /// # Errors
    ///
    /// [`InsightError::InvalidInput`] when the dataset has zero rows, since
    /// quartiles are undefined there.
    pub fn compute_outliers(&self, df: &DataFrame) -> Result<Vec<ColumnStats>> {
        if df.height() == 0 {
            return Err(InsightError::InvalidInput(
                "cannot compute quartiles of a dataset with zero rows".to_string(),
            ));
        }

        let columns = numeric_columns(df).context("Reading numeric columns")?;
        let stats: Vec<ColumnStats> = columns
            .iter()
            .map(|col| {
                let stats = tukey_stats(&col.name, &col.present(), self.outlier_multiplier);
                debug!(
                    column = %stats.name,
                    q1 = stats.q1,
                    q3 = stats.q3,
                    outliers = stats.outlier_count,
                    "Computed Tukey fences"
                );
                stats
            })
            .collect();

        info!("Outlier scan covered {} numeric columns", stats.len());
        Ok(stats)
    }

    /// Full Pearson matrix over the numeric columns.
    pub fn correlation_matrix(&self, df: &DataFrame) -> Result<CorrelationMatrix> {
        let columns = numeric_columns(df).context("Reading numeric columns")?;
        let n = columns.len();

        let mut values = vec![vec![f64::NAN; n]; n];
        for i in 0..n {
            for j in i..n {
                let r = pearson(&columns[i].values, &columns[j].values);
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        Ok(CorrelationMatrix {
            columns: columns.into_iter().map(|c| c.name).collect(),
            values,
        })
    }

    /// Pairs of distinct numeric columns with `low < |r| < high`.
    ///
    /// Each unordered pair appears once, ordered by column position.
    /// Self-correlation never qualifies because the diagonal is skipped.
    pub fn compute_strong_correlations(
        &self,
        df: &DataFrame,
        low: f64,
        high: f64,
    ) -> Result<Vec<CorrelationPair>> {
        validate_correlation_window(low, high)?;

        let pairs = self.correlation_matrix(df)?.strong_pairs(low, high);
        info!(
            "Found {} strongly correlated pairs (|r| in ({}, {}))",
            pairs.len(),
            low,
            high
        );
        Ok(pairs)
    }

    /// [`compute_strong_correlations`](Self::compute_strong_correlations)
    /// with the analyzer's configured window.
    pub fn strong_correlations(&self, df: &DataFrame) -> Result<Vec<CorrelationPair>> {
        self.compute_strong_correlations(df, self.correlation_low, self.correlation_high)
    }

    pub fn correlation_window(&self) -> (f64, f64) {
        (self.correlation_low, self.correlation_high)
    }
}

static_assertions::assert_impl_all!(SummaryAnalyzer: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    fn outlier_count(stats: &[ColumnStats], name: &str) -> usize {
        stats
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.outlier_count)
            .unwrap()
    }

    // ==================== compute_outliers tests ====================

    #[test]
    fn test_single_outlier_scenario() {
        let df = df!["x" => [1.0f64, 2.0, 3.0, 4.0, 100.0]].unwrap();
        let stats = SummaryAnalyzer::new().compute_outliers(&df).unwrap();

        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].q1, 2.0);
        assert_eq!(stats[0].q3, 4.0);
        assert_eq!(stats[0].lower_bound, -1.0);
        assert_eq!(stats[0].upper_bound, 7.0);
        assert_eq!(stats[0].outlier_count, 1);
    }

    #[test]
    fn test_integer_columns_are_numeric() {
        let df = df!["x" => [1i64, 2, 3, 4, 100]].unwrap();
        let stats = SummaryAnalyzer::new().compute_outliers(&df).unwrap();
        assert_eq!(outlier_count(&stats, "x"), 1);
    }

    #[test]
    fn test_row_order_does_not_matter() {
        let a = df!["x" => [1.0f64, 2.0, 3.0, 4.0, 100.0, -50.0, 3.5]].unwrap();
        let b = df!["x" => [100.0f64, 3.5, -50.0, 4.0, 1.0, 3.0, 2.0]].unwrap();
        let analyzer = SummaryAnalyzer::new();

        assert_eq!(
            analyzer.compute_outliers(&a).unwrap(),
            analyzer.compute_outliers(&b).unwrap()
        );
    }

    #[test]
    fn test_constant_column_has_no_outliers() {
        let df = df!["k" => [3.0f64, 3.0, 3.0, 3.0]].unwrap();
        let stats = SummaryAnalyzer::new().compute_outliers(&df).unwrap();
        assert_eq!(outlier_count(&stats, "k"), 0);
    }

    #[test]
    fn test_categorical_columns_excluded_and_order_kept() {
        let df = df![
            "Team" => ["A", "B", "C", "D", "E"],
            "Goals" => [1i64, 2, 3, 4, 100],
            "Position" => ["GK", "DF", "DF", "MF", "FW"],
            "Assists" => [0i64, 1, 1, 2, 2],
        ]
        .unwrap();

        let stats = SummaryAnalyzer::new().compute_outliers(&df).unwrap();
        let names: Vec<&str> = stats.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Goals", "Assists"]);
    }

    #[test]
    fn test_boolean_and_date_columns_excluded() {
        let kickoff = Series::new("Kickoff".into(), [19000i32, 19007, 19014, 19021, 19028])
            .cast(&DataType::Date)
            .unwrap();
        let mut df = df![
            "Goals" => [1i64, 2, 3, 4, 100],
            "Starter" => [true, false, true, true, false],
            "Assists" => [0i64, 1, 1, 2, 2],
        ]
        .unwrap();
        df.with_column(kickoff).unwrap();

        let analyzer = SummaryAnalyzer::new();
        let stats = analyzer.compute_outliers(&df).unwrap();
        let names: Vec<&str> = stats.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Goals", "Assists"]);

        let matrix = analyzer.correlation_matrix(&df).unwrap();
        assert_eq!(matrix.columns, vec!["Goals".to_string(), "Assists".to_string()]);
    }

    #[test]
    fn test_nulls_are_ignored() {
        let df = df!["x" => [Some(1.0f64), None, Some(2.0), Some(3.0), Some(4.0), Some(100.0)]]
            .unwrap();
        let stats = SummaryAnalyzer::new().compute_outliers(&df).unwrap();
        assert_eq!(stats[0].q1, 2.0);
        assert_eq!(stats[0].outlier_count, 1);
    }

    #[test]
    fn test_zero_rows_is_invalid_input() {
        let df = df!["x" => Vec::<f64>::new()].unwrap();
        let err = SummaryAnalyzer::new().compute_outliers(&df).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_no_numeric_columns_is_empty() {
        let df = df!["Name" => ["a", "b"]].unwrap();
        let analyzer = SummaryAnalyzer::new();
        assert!(analyzer.compute_outliers(&df).unwrap().is_empty());
        assert!(analyzer.strong_correlations(&df).unwrap().is_empty());
    }

    #[test]
    fn test_custom_multiplier() {
        let config = AnalysisConfig::builder()
            .outlier_multiplier(50.0)
            .build()
            .unwrap();
        let df = df!["x" => [1.0f64, 2.0, 3.0, 4.0, 100.0]].unwrap();
        let stats = SummaryAnalyzer::from_config(&config)
            .compute_outliers(&df)
            .unwrap();
        assert_eq!(stats[0].outlier_count, 0);
    }

    // ==================== correlation tests ====================

    #[test]
    fn test_perfect_correlation_excluded() {
        let df = df![
            "a" => [1.0f64, 2.0, 3.0, 4.0, 5.0],
            "b" => [2.0f64, 4.0, 6.0, 8.0, 10.0],
        ]
        .unwrap();

        let pairs = SummaryAnalyzer::new()
            .compute_strong_correlations(&df, 0.7, 1.0)
            .unwrap();
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_weak_correlation_absent() {
        let df = df![
            "a" => [1.0f64, 2.0, 3.0, 4.0, 5.0],
            "c" => [2.0f64, 5.0, 1.0, 4.0, 3.0],
        ]
        .unwrap();

        let pairs = SummaryAnalyzer::new().strong_correlations(&df).unwrap();
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_strong_negative_correlation_reported_once() {
        let df = df![
            "a" => [1.0f64, 2.0, 3.0, 4.0, 5.0],
            "c" => [5.0f64, 3.0, 4.0, 1.0, 2.0],
        ]
        .unwrap();

        let pairs = SummaryAnalyzer::new().strong_correlations(&df).unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].left, "a");
        assert_eq!(pairs[0].right, "c");
        assert!((pairs[0].coefficient + 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_self_correlation_excluded_for_any_window() {
        let df = df![
            "a" => [1.0f64, 2.0, 3.0, 4.0, 5.0],
            "c" => [2.0f64, 5.0, 1.0, 4.0, 3.0],
        ]
        .unwrap();

        let pairs = SummaryAnalyzer::new()
            .compute_strong_correlations(&df, 0.0, 1.0)
            .unwrap();
        assert!(pairs.iter().all(|p| p.left != p.right));
        assert_eq!(pairs.len(), 1);
    }

    #[test]
    fn test_matrix_symmetric_with_unit_diagonal() {
        let df = df![
            "a" => [1.0f64, 2.0, 3.0, 4.0],
            "b" => [4.0f64, 1.0, 3.0, 2.0],
            "name" => ["w", "x", "y", "z"],
        ]
        .unwrap();

        let matrix = SummaryAnalyzer::new().correlation_matrix(&df).unwrap();
        assert_eq!(matrix.columns, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(matrix.get("a", "b"), matrix.get("b", "a"));
        assert!((matrix.get("a", "a").unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_window_rejected() {
        let df = df!["a" => [1.0f64, 2.0]].unwrap();
        let err = SummaryAnalyzer::new()
            .compute_strong_correlations(&df, 0.9, 0.5)
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIG");
    }
}
