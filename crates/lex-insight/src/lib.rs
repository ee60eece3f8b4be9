//! Exploratory Statistics Library
//!
//! Descriptive analysis of tabular datasets built with Rust and Polars.
//!
//! # Overview
//!
//! This library provides:
//!
//! - **Outlier Counts**: Tukey's IQR rule applied to every numeric column
//! - **Strong Correlations**: Pearson pairs with |r| inside an open window
//! - **Profiling**: Head, dtypes, describe, missing values, duplicates and value counts
//! - **Distributions**: Skewness and equal-width histogram bins
//! - **Rankings**: Top-N rows by a metric column
//! - **Train/Test Split**: Seeded, reproducible row partition
//! - **Reports**: Everything above collected into one serializable report
//!
//! Only numeric-typed columns take part in the outlier and correlation
//! analysis. Text and categorical columns are skipped by dtype, never by name.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use lex_insight::{SummaryAnalyzer, AnalysisConfig, ReportGenerator};
//! use polars::prelude::*;
//!
//! let df = CsvReadOptions::default()
//!     .with_has_header(true)
//!     .try_into_reader_with_file_path(Some("players.csv".into()))?
//!     .finish()?;
//!
//! let analyzer = SummaryAnalyzer::new();
//! for stats in analyzer.compute_outliers(&df)? {
//!     println!("Outliers in {}: {}", stats.name, stats.outlier_count);
//! }
//!
//! for pair in analyzer.compute_strong_correlations(&df, 0.7, 1.0)? {
//!     println!("{} ~ {}: {:.3}", pair.left, pair.right, pair.coefficient);
//! }
//!
//! // Or everything at once
//! let report = ReportGenerator::build(&df, &AnalysisConfig::default(), "players.csv")?;
//! ```
//!
//! # Configuration
//!
//! Use [`AnalysisConfig`] to change thresholds and sizes:
//!
//! ```rust,ignore
//! use lex_insight::AnalysisConfig;
//!
//! let config = AnalysisConfig::builder()
//!     .outlier_multiplier(3.0)          // Far-out values only
//!     .correlation_window(0.8, 1.0)     // |r| in (0.8, 1.0)
//!     .histogram_bins(10)
//!     .test_size(0.25)
//!     .build()?;
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod profiler;
pub mod project;
pub mod rankings;
pub mod reporting;
pub mod split;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use analysis::SummaryAnalyzer;
pub use config::{AnalysisConfig, AnalysisConfigBuilder, ConfigValidationError};
pub use error::{InsightError, Result as InsightResult, ResultExt};
pub use profiler::DataProfiler;
pub use project::ProjectConfig;
pub use rankings::{Ranking, rank_all, top_n};
pub use reporting::{EdaReport, RankingSnapshot, ReportGenerator, TableSnapshot};
pub use split::{split_shape, train_test_split};
pub use types::{
    ColumnDescription, ColumnInfo, ColumnSkewness, ColumnStats, CorrelationMatrix,
    CorrelationPair, DatasetInfo, Histogram, MissingCount, SplitShape, StrongCorrelations,
    ValueCounts,
};
pub use utils::{DtypeCategory, NumericColumn, get_dtype_category, is_numeric_dtype, numeric_columns};
