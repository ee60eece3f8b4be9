//! Configuration types for dataset analysis.
//!
//! This module provides configuration options using the builder pattern.
//! The defaults reproduce the fixed constants of the standard report:
//! Tukey's 1.5 multiplier, the `(0.7, 1.0)` correlation window and an 80/20
//! split seeded with 42.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default metric columns ranked in the top performers section.
pub const DEFAULT_RANK_COLUMNS: [&str; 3] = ["Goals scored", "Assists", "Minutes played"];

/// Default identifier columns shown next to a ranked metric.
pub const DEFAULT_ID_COLUMNS: [&str; 2] = ["Name", "Team"];

/// Configuration for a full analysis run.
///
/// Use [`AnalysisConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use lex_insight::config::AnalysisConfig;
///
/// let config = AnalysisConfig::builder()
///     .correlation_window(0.8, 1.0)
///     .histogram_bins(10)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// IQR multiplier for the outlier fences.
    /// Default: 1.5
    pub outlier_multiplier: f64,

    /// Exclusive lower bound on |r| for a strong correlation.
    /// Default: 0.7
    pub correlation_low: f64,

    /// Exclusive upper bound on |r| for a strong correlation.
    /// Default: 1.0 (drops self-correlation)
    pub correlation_high: f64,

    /// Number of rows shown by `head`.
    /// Default: 5
    pub head_rows: usize,

    /// Number of rows kept per ranking.
    /// Default: 5
    pub top_n: usize,

    /// Number of values kept per categorical column in value counts.
    /// Default: 5
    pub value_counts_limit: usize,

    /// Number of equal-width histogram bins per numeric column.
    /// Default: 20
    pub histogram_bins: usize,

    /// Fraction of rows assigned to the test set (0.0 - 1.0, exclusive).
    /// Default: 0.2
    pub test_size: f64,

    /// Seed for the train/test shuffle.
    /// Default: 42
    pub random_seed: u64,

    /// Metric columns ranked in the top performers section.
    pub rank_columns: Vec<String>,

    /// Identifier columns projected next to each ranked metric.
    pub id_columns: Vec<String>,

    /// Output directory for emitted reports.
    /// Default: "output"
    pub output_dir: PathBuf,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            outlier_multiplier: 1.5,
            correlation_low: 0.7,
            correlation_high: 1.0,
            head_rows: 5,
            top_n: 5,
            value_counts_limit: 5,
            histogram_bins: 20,
            test_size: 0.2,
            random_seed: 42,
            rank_columns: DEFAULT_RANK_COLUMNS.iter().map(|s| s.to_string()).collect(),
            id_columns: DEFAULT_ID_COLUMNS.iter().map(|s| s.to_string()).collect(),
            output_dir: PathBuf::from("output"),
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !(self.outlier_multiplier.is_finite() && self.outlier_multiplier >= 0.0) {
            return Err(ConfigValidationError::InvalidMultiplier(
                self.outlier_multiplier,
            ));
        }

        validate_correlation_window(self.correlation_low, self.correlation_high)?;

        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(ConfigValidationError::InvalidTestSize(self.test_size));
        }

        if self.histogram_bins == 0 {
            return Err(ConfigValidationError::ZeroCount {
                field: "histogram_bins".to_string(),
            });
        }

        if self.top_n == 0 {
            return Err(ConfigValidationError::ZeroCount {
                field: "top_n".to_string(),
            });
        }

        Ok(())
    }
}

/// Check a `(low, high)` correlation window: both in `[0, 1]` and `low < high`.
pub fn validate_correlation_window(low: f64, high: f64) -> Result<(), ConfigValidationError> {
    for (field, value) in [("correlation_low", low), ("correlation_high", high)] {
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigValidationError::InvalidThreshold {
                field: field.to_string(),
                value,
            });
        }
    }

    if low >= high {
        return Err(ConfigValidationError::EmptyCorrelationWindow { low, high });
    }

    Ok(())
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid threshold for '{field}': {value} (must be between 0.0 and 1.0)")]
    InvalidThreshold { field: String, value: f64 },

    #[error("Empty correlation window: low {low} must be below high {high}")]
    EmptyCorrelationWindow { low: f64, high: f64 },

    #[error("Invalid outlier multiplier: {0} (must be a non-negative number)")]
    InvalidMultiplier(f64),

    #[error("Invalid test size: {0} (must be strictly between 0.0 and 1.0)")]
    InvalidTestSize(f64),

    #[error("'{field}' must be at least 1")]
    ZeroCount { field: String },
}

impl From<ConfigValidationError> for crate::error::InsightError {
    fn from(err: ConfigValidationError) -> Self {
        crate::error::InsightError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`AnalysisConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    outlier_multiplier: Option<f64>,
    correlation_low: Option<f64>,
    correlation_high: Option<f64>,
    head_rows: Option<usize>,
    top_n: Option<usize>,
    value_counts_limit: Option<usize>,
    histogram_bins: Option<usize>,
    test_size: Option<f64>,
    random_seed: Option<u64>,
    rank_columns: Option<Vec<String>>,
    id_columns: Option<Vec<String>>,
    output_dir: Option<PathBuf>,
}

impl AnalysisConfigBuilder {
    /// Set the IQR multiplier used for the outlier fences.
    pub fn outlier_multiplier(mut self, multiplier: f64) -> Self {
        self.outlier_multiplier = Some(multiplier);
        self
    }

    /// Set the exclusive `(low, high)` window on |r| for strong correlations.
    ///
    /// # Arguments
    /// * `low` - Lower bound, e.g. 0.7
    /// * `high` - Upper bound, e.g. 1.0 to drop perfect correlations
    pub fn correlation_window(mut self, low: f64, high: f64) -> Self {
        self.correlation_low = Some(low);
        self.correlation_high = Some(high);
        self
    }

    /// Set the number of rows shown by `head`.
    pub fn head_rows(mut self, n: usize) -> Self {
        self.head_rows = Some(n);
        self
    }

    /// Set the number of rows kept per ranking.
    pub fn top_n(mut self, n: usize) -> Self {
        self.top_n = Some(n);
        self
    }

    /// Set the number of values kept per categorical column.
    pub fn value_counts_limit(mut self, n: usize) -> Self {
        self.value_counts_limit = Some(n);
        self
    }

    /// Set the number of histogram bins.
    pub fn histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = Some(bins);
        self
    }

    /// Set the test fraction of the train/test split.
    pub fn test_size(mut self, fraction: f64) -> Self {
        self.test_size = Some(fraction);
        self
    }

    /// Set the seed of the train/test shuffle.
    pub fn random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Set the metric columns to rank.
    pub fn rank_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rank_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Set the identifier columns shown next to ranked metrics.
    pub fn id_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.id_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Set the output directory for emitted reports.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `AnalysisConfig` or an error if validation fails.
    pub fn build(self) -> Result<AnalysisConfig, ConfigValidationError> {
        let defaults = AnalysisConfig::default();
        let config = AnalysisConfig {
            outlier_multiplier: self
                .outlier_multiplier
                .unwrap_or(defaults.outlier_multiplier),
            correlation_low: self.correlation_low.unwrap_or(defaults.correlation_low),
            correlation_high: self.correlation_high.unwrap_or(defaults.correlation_high),
            head_rows: self.head_rows.unwrap_or(defaults.head_rows),
            top_n: self.top_n.unwrap_or(defaults.top_n),
            value_counts_limit: self
                .value_counts_limit
                .unwrap_or(defaults.value_counts_limit),
            histogram_bins: self.histogram_bins.unwrap_or(defaults.histogram_bins),
            test_size: self.test_size.unwrap_or(defaults.test_size),
            random_seed: self.random_seed.unwrap_or(defaults.random_seed),
            rank_columns: self.rank_columns.unwrap_or(defaults.rank_columns),
            id_columns: self.id_columns.unwrap_or(defaults.id_columns),
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
        };

        config.validate()?;
        Ok(config)
    }
}
