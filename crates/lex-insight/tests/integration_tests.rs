//! Integration tests for dataset analysis.
//!
//! These tests load a small player-statistics CSV and check the full set of
//! summaries against hand-computed values.

use lex_insight::{
    AnalysisConfig, DataProfiler, InsightError, ProjectConfig, ReportGenerator, SummaryAnalyzer,
    top_n, train_test_split,
};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use pretty_assertions::assert_eq;
use std::path::PathBuf;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_csv(filename: &str) -> DataFrame {
    let path = fixtures_path().join(filename);
    CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path))
        .expect("Failed to create CSV reader")
        .finish()
        .expect("Failed to read CSV file")
}

fn players() -> DataFrame {
    load_csv("player_stats.csv")
}

// ============================================================================
// Outlier Tests
// ============================================================================

#[test]
fn test_outlier_counts_per_numeric_column() {
    let stats = SummaryAnalyzer::new().compute_outliers(&players()).unwrap();

    let counts: Vec<(String, usize)> = stats
        .iter()
        .map(|s| (s.name.clone(), s.outlier_count))
        .collect();

    assert_eq!(
        counts,
        vec![
            ("Goals scored".to_string(), 0),
            ("Assists".to_string(), 1),
            ("Minutes played".to_string(), 1),
            ("Shots".to_string(), 0),
            ("Yellow cards".to_string(), 1),
        ]
    );
}

#[test]
fn test_outlier_fences_with_missing_value() {
    let stats = SummaryAnalyzer::new().compute_outliers(&players()).unwrap();
    let minutes = stats.iter().find(|s| s.name == "Minutes played").unwrap();

    // 11 non-null values: Q1 = 2400, Q3 = 2650
    assert_eq!(minutes.q1, 2400.0);
    assert_eq!(minutes.q3, 2650.0);
    assert_eq!(minutes.upper_bound, 3025.0);
}

#[test]
fn test_outliers_stable_under_row_shuffle() {
    let df = players();
    let (train, test) = train_test_split(&df, 0.5, 3).unwrap();
    let shuffled = train.vstack(&test).unwrap();

    let analyzer = SummaryAnalyzer::new();
    assert_eq!(
        analyzer.compute_outliers(&df).unwrap(),
        analyzer.compute_outliers(&shuffled).unwrap()
    );
}

#[test]
fn test_empty_dataset_is_invalid_input() {
    let df = players().head(Some(0));
    let err = SummaryAnalyzer::new().compute_outliers(&df).unwrap_err();
    assert!(matches!(err, InsightError::InvalidInput(_)));
}

// ============================================================================
// Correlation Tests
// ============================================================================

#[test]
fn test_goals_and_shots_strongly_correlated() {
    let pairs = SummaryAnalyzer::new()
        .compute_strong_correlations(&players(), 0.7, 1.0)
        .unwrap();

    let goals_shots = pairs
        .iter()
        .find(|p| p.left == "Goals scored" && p.right == "Shots")
        .expect("goals and shots should correlate");
    assert!(goals_shots.coefficient > 0.99 && goals_shots.coefficient < 1.0);
}

#[test]
fn test_pairs_respect_window_and_symmetry() {
    let pairs = SummaryAnalyzer::new()
        .compute_strong_correlations(&players(), 0.7, 1.0)
        .unwrap();

    for pair in &pairs {
        assert!(pair.left != pair.right);
        assert!(pair.coefficient.abs() > 0.7 && pair.coefficient.abs() < 1.0);
        assert!(
            !pairs
                .iter()
                .any(|other| other.left == pair.right && other.right == pair.left),
            "pair reported twice: {} / {}",
            pair.left,
            pair.right
        );
    }
}

#[test]
fn test_text_columns_never_correlated() {
    let matrix = SummaryAnalyzer::new().correlation_matrix(&players()).unwrap();
    assert!(!matrix.columns.contains(&"Name".to_string()));
    assert!(!matrix.columns.contains(&"Team".to_string()));
    assert_eq!(matrix.columns.len(), 5);
}

// ============================================================================
// Profile Tests
// ============================================================================

#[test]
fn test_profile_overview() {
    let df = players();

    assert_eq!(DataProfiler::duplicate_rows(&df).unwrap(), 1);

    let missing = DataProfiler::columns_with_missing(&df);
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].name, "Minutes played");
    assert_eq!(missing[0].null_count, 1);

    let counts = DataProfiler::value_counts(&df, 5).unwrap();
    let team = counts.iter().find(|v| v.column == "Team").unwrap();
    assert_eq!(team.counts[0], ("Barcelona".to_string(), 4));

    let position = counts.iter().find(|v| v.column == "Position").unwrap();
    assert_eq!(position.counts[0], ("Forward".to_string(), 8));
}

#[test]
fn test_describe_mixes_numeric_and_text() {
    let describe = DataProfiler::describe(&players()).unwrap();
    assert_eq!(describe.len(), 8);

    let goals = describe.iter().find(|d| d.name == "Goals scored").unwrap();
    assert_eq!(goals.count, 12);
    assert_eq!(goals.min, Some(0.0));
    assert_eq!(goals.max, Some(36.0));
    assert_eq!(goals.q25, Some(4.5));
    assert_eq!(goals.q75, Some(19.5));

    let team = describe.iter().find(|d| d.name == "Team").unwrap();
    assert_eq!(team.unique, Some(7));
    assert_eq!(team.top.as_deref(), Some("Barcelona"));
}

// ============================================================================
// Ranking and Split Tests
// ============================================================================

#[test]
fn test_top_scorers() {
    let ids = vec!["Name".to_string(), "Team".to_string()];
    let top = top_n(&players(), "Goals scored", &ids, 5).unwrap().unwrap();

    let goals: Vec<i64> = top
        .column("Goals scored")
        .unwrap()
        .as_materialized_series()
        .i64()
        .unwrap()
        .into_iter()
        .flatten()
        .collect();
    assert_eq!(goals, vec![36, 21, 21, 19, 15]);
}

#[test]
fn test_default_split() {
    let (train, test) = train_test_split(&players(), 0.2, 42).unwrap();
    assert_eq!(train.shape(), (9, 8));
    assert_eq!(test.shape(), (3, 8));
}

// ============================================================================
// Report Tests
// ============================================================================

#[test]
fn test_full_report() {
    let report =
        ReportGenerator::build(&players(), &AnalysisConfig::default(), "player_stats.csv")
            .unwrap();

    assert_eq!(report.shape, (12, 8));
    assert_eq!(report.head.rows.len(), 5);
    assert_eq!(report.rankings.len(), 3);
    assert_eq!(report.histograms.len(), 5);
    assert!(report.histograms.iter().all(|h| h.counts.len() == 20));
    assert!(!report.strong_correlations.is_empty());
    assert_eq!(report.split.map(|s| s.test.0), Some(3));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["duplicate_rows"], 1);
}

#[test]
fn test_project_fixture() {
    let config = ProjectConfig::from_path(fixtures_path().join("project.yml")).unwrap();
    assert_eq!(config.project_name(), "LaLiga Player Analysis");
    assert_eq!(
        config.docker_images(),
        "python:3.11-slim, jupyter/scipy-notebook"
    );
}
