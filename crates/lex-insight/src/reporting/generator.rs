use crate::analysis::SummaryAnalyzer;
use crate::config::AnalysisConfig;
use crate::profiler::DataProfiler;
use crate::rankings::rank_all;
use crate::split::split_shape;
use crate::types::{
    ColumnDescription, ColumnSkewness, ColumnStats, CorrelationMatrix, CorrelationPair,
    DatasetInfo, Histogram, MissingCount, SplitShape, StrongCorrelations, ValueCounts,
};
use anyhow::Result;
use chrono::Local;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};

// ============================================================================
// Report Types
// ============================================================================

/// Every result of an analysis run, ready for JSON output.
///
/// Use this for both JSON output (`--json`) and file writing (`--emit-report`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdaReport {
    // Metadata
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Path to the input file
    pub input_file: String,
    /// (rows, columns) of the dataset
    pub shape: (usize, usize),

    // Overview
    pub head: TableSnapshot,
    pub info: DatasetInfo,
    pub describe: Vec<ColumnDescription>,
    pub missing_values: Vec<MissingCount>,
    pub columns_with_missing: Vec<MissingCount>,
    pub duplicate_rows: usize,
    pub value_counts: Vec<ValueCounts>,

    // Numeric analysis
    pub correlation_matrix: CorrelationMatrix,
    /// Masked matrix of strong correlations
    pub strong_correlations: StrongCorrelations,
    /// The same strong correlations as a flat list of pairs
    pub strong_pairs: Vec<CorrelationPair>,
    pub skewness: Vec<ColumnSkewness>,
    pub outliers: Vec<ColumnStats>,
    pub histograms: Vec<Histogram>,

    // Rankings and split
    pub rankings: Vec<RankingSnapshot>,
    /// Absent when the dataset is too small for the configured test size
    pub split: Option<SplitShape>,
    /// Why the split could not be made
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_error: Option<String>,
}

/// A small table rendered as text cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableSnapshot {
    /// Render every cell of `df`; nulls become empty strings.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        let columns = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let mut rows = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            let mut row = Vec::with_capacity(df.width());
            for col in df.get_columns() {
                let cell = match col.get(i)? {
                    AnyValue::Null => String::new(),
                    AnyValue::String(s) => s.to_string(),
                    other => format!("{}", other),
                };
                row.push(cell);
            }
            rows.push(row);
        }

        Ok(Self { columns, rows })
    }
}

/// Top rows for one ranked metric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingSnapshot {
    pub metric: String,
    pub table: TableSnapshot,
}

// ============================================================================
// Report Generator
// ============================================================================

pub struct ReportGenerator {
    output_dir: PathBuf,
}

impl ReportGenerator {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    /// Run every analysis over `df` and collect the results.
    ///
    /// Fails on a zero-row dataset, since quartiles do not exist there. A
    /// split that cannot be made only leaves the split section empty.
    pub fn build(df: &DataFrame, config: &AnalysisConfig, input_file: &str) -> Result<EdaReport> {
        info!("Building report for {} ({:?})", input_file, df.shape());

        let analyzer = SummaryAnalyzer::from_config(config);
        let (low, high) = analyzer.correlation_window();

        let outliers = analyzer.compute_outliers(df)?;
        let correlation_matrix = analyzer.correlation_matrix(df)?;
        let strong_pairs = analyzer.compute_strong_correlations(df, low, high)?;
        let strong_correlations = correlation_matrix.strong(low, high);

        let rankings = rank_all(df, &config.rank_columns, &config.id_columns, config.top_n)?
            .into_iter()
            .map(|ranking| {
                Ok(RankingSnapshot {
                    table: TableSnapshot::from_dataframe(&ranking.rows)?,
                    metric: ranking.metric,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let (split, split_error) = match split_shape(df, config.test_size, config.random_seed) {
            Ok(shape) => (Some(shape), None),
            Err(e) => {
                warn!("Skipping train/test split: {}", e);
                (None, Some(e.to_string()))
            }
        };

        let report = EdaReport {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: input_file.to_string(),
            shape: df.shape(),
            head: TableSnapshot::from_dataframe(&DataProfiler::head(df, config.head_rows))?,
            info: DataProfiler::info(df),
            describe: DataProfiler::describe(df)?,
            missing_values: DataProfiler::missing_values(df),
            columns_with_missing: DataProfiler::columns_with_missing(df),
            duplicate_rows: DataProfiler::duplicate_rows(df)?,
            value_counts: DataProfiler::value_counts(df, config.value_counts_limit)?,
            correlation_matrix,
            strong_correlations,
            strong_pairs,
            skewness: DataProfiler::skewness(df)?,
            outliers,
            histograms: DataProfiler::histograms(df, config.histogram_bins)?,
            rankings,
            split,
            split_error,
        };

        info!(
            "Report ready: {} outlier columns, {} strong pairs",
            report.outliers.len(),
            report.strong_pairs.len()
        );
        Ok(report)
    }

    /// Write the report as pretty JSON to `<output_dir>/<stem>_report.json`.
    pub fn write_report_to_file(&self, report: &EdaReport, stem: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(format!("{}_report.json", stem));

        let mut file = File::create(&path)?;
        file.write_all(serde_json::to_string_pretty(report)?.as_bytes())?;

        info!("Report written to {}", path.display());
        Ok(path)
    }
}
