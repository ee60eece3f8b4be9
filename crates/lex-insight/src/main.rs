//! CLI entry point for dataset analysis.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use lex_insight::{
    AnalysisConfig, EdaReport, InsightError, ProjectConfig, ReportGenerator, TableSnapshot,
};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info, warn};

#[derive(Parser, Debug)]
#[command(
    author = "Lex Machina Team",
    version,
    about = "Exploratory statistics for tabular datasets",
    long_about = "Descriptive statistics, IQR outlier counts and strong correlations \
                  for a CSV dataset.\n\n\
                  EXAMPLES:\n  \
                  # Full report for a player statistics file\n  \
                  lex-insight analyze -i datasets/laliga_player_stats.csv\n\n  \
                  # Stricter correlation window, JSON to stdout\n  \
                  lex-insight analyze -i data.csv --low 0.8 --json\n\n  \
                  # Print project metadata\n  \
                  lex-insight project -c config.yml"
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a CSV dataset
    Analyze(AnalyzeArgs),
    /// Print project name and Docker images from a YAML config
    Project {
        /// Path to the YAML project config
        #[arg(short, long, default_value = "config.yml")]
        config: PathBuf,
    },
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// Path to the CSV file to analyze
    #[arg(short, long)]
    input: String,

    /// Output directory for emitted reports
    #[arg(short, long, default_value = "output")]
    output: String,

    /// Exclusive lower bound on |r| for strong correlations
    #[arg(long, default_value = "0.7")]
    low: f64,

    /// Exclusive upper bound on |r| for strong correlations
    #[arg(long, default_value = "1.0")]
    high: f64,

    /// IQR multiplier for outlier fences
    #[arg(long, default_value = "1.5")]
    iqr_multiplier: f64,

    /// Rows per ranking
    #[arg(long, default_value = "5")]
    top_n: usize,

    /// Histogram bins per numeric column
    #[arg(long, default_value = "20")]
    bins: usize,

    /// Fraction of rows held out as the test set
    #[arg(long, default_value = "0.2")]
    test_size: f64,

    /// Seed for the train/test shuffle
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Metric columns to rank (repeatable)
    ///
    /// Defaults to "Goals scored", "Assists" and "Minutes played"
    #[arg(long = "rank")]
    rank_columns: Vec<String>,

    /// Output JSON to stdout instead of human-readable sections
    ///
    /// Disables all progress logs; only outputs the final JSON report.
    #[arg(long)]
    json: bool,

    /// Write a detailed JSON report to the output directory
    ///
    /// The report will be saved as <input_name>_report.json
    #[arg(short = 'r', long)]
    emit_report: bool,
}

/// Install the stderr subscriber. Nothing is installed in JSON mode, so
/// stdout carries only the report.
fn init_logging(level: &str, quiet: bool) {
    let default_level = if quiet { "warn" } else { level };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let json_output = matches!(&cli.command, Command::Analyze(args) if args.json);
    if !json_output {
        init_logging(&cli.log_level, cli.quiet);
    }

    let result = match &cli.command {
        Command::Project { config } => run_project(config),
        Command::Analyze(args) => run_analyze(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_failure(&e, json_output);
            ExitCode::from(exit_status(&e))
        }
    }
}

/// 2 when the caller's data or settings were rejected, 1 for everything else.
fn exit_status(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<InsightError>() {
        Some(e) if e.is_input_error() => 2,
        _ => 1,
    }
}

fn report_failure(err: &anyhow::Error, json_output: bool) {
    if json_output {
        if let Some(e) = err.downcast_ref::<InsightError>() {
            println!("{}", serde_json::json!({ "error": e }));
            return;
        }
        let message = format!("{:#}", err);
        println!("{}", serde_json::json!({ "error": { "code": "ERROR", "message": message } }));
    } else {
        eprintln!("Error: {:#}", err);
    }
}

fn run_project(path: &Path) -> Result<()> {
    let config = ProjectConfig::from_path(path)?;
    println!("Project Name: {}", config.project_name());
    println!("Docker Images: {}", config.docker_images());
    Ok(())
}

fn run_analyze(args: &AnalyzeArgs) -> Result<()> {
    if !Path::new(&args.input).exists() {
        return Err(
            InsightError::InvalidInput(format!("input file not found: {}", args.input)).into(),
        );
    }

    let mut builder = AnalysisConfig::builder()
        .outlier_multiplier(args.iqr_multiplier)
        .correlation_window(args.low, args.high)
        .top_n(args.top_n)
        .histogram_bins(args.bins)
        .test_size(args.test_size)
        .random_seed(args.seed)
        .output_dir(&args.output);
    if !args.rank_columns.is_empty() {
        builder = builder.rank_columns(args.rank_columns.iter().cloned());
    }
    let config = builder.build().map_err(InsightError::from)?;

    info!("Loading dataset from: {}", args.input);
    let data = load_csv_with_fallbacks(&args.input)?;
    info!("Dataset loaded successfully: {:?}", data.shape());

    let report = ReportGenerator::build(&data, &config, &args.input)?;

    if args.emit_report {
        let generator = ReportGenerator::new(config.output_dir.clone());
        let path = generator.write_report_to_file(&report, &extract_file_stem(&args.input))?;
        if !args.json {
            info!("Detailed report saved to {}", path.display());
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_human_readable_report(&config, &report);
    Ok(())
}

/// Print the report section by section.
///
/// Note: This function uses `println!` intentionally for user-facing CLI output.
/// Logging goes to stderr and may be filtered; these sections always show.
fn print_human_readable_report(config: &AnalysisConfig, report: &EdaReport) {
    println!("Head:");
    print_table(&report.head);

    println!("\nInfo:");
    println!("  Rows: {}", report.info.rows);
    println!("  {:<4} {:<30} {:>14}  Dtype", "#", "Column", "Non-Null Count");
    for (i, col) in report.info.columns.iter().enumerate() {
        println!(
            "  {:<4} {:<30} {:>14}  {}",
            i,
            truncate_str(&col.name, 30),
            col.non_null_count,
            col.dtype
        );
    }

    println!("\nDescribe:");
    for d in &report.describe {
        match (d.mean, d.unique) {
            (Some(mean), _) => println!(
                "  {:<30} count={} mean={:.4} std={} min={} 25%={} 50%={} 75%={} max={}",
                truncate_str(&d.name, 30),
                d.count,
                mean,
                fmt_opt(d.std),
                fmt_opt(d.min),
                fmt_opt(d.q25),
                fmt_opt(d.median),
                fmt_opt(d.q75),
                fmt_opt(d.max)
            ),
            (None, Some(unique)) => println!(
                "  {:<30} count={} unique={} top={} freq={}",
                truncate_str(&d.name, 30),
                d.count,
                unique,
                d.top.as_deref().unwrap_or(""),
                d.freq.unwrap_or(0)
            ),
            (None, None) => println!("  {:<30} count={}", truncate_str(&d.name, 30), d.count),
        }
    }

    println!("\nMissing values:");
    for m in &report.missing_values {
        println!("  {:<30} {}", truncate_str(&m.name, 30), m.null_count);
    }

    println!("\nDuplicate rows: {}", report.duplicate_rows);

    for vc in &report.value_counts {
        println!("\nValue counts for {}:", vc.column);
        for (value, count) in &vc.counts {
            println!("  {:<30} {}", truncate_str(value, 30), count);
        }
    }

    println!("\nTop {} performers:", config.top_n);
    for ranking in &report.rankings {
        println!("By {}:", ranking.metric.to_lowercase());
        print_table(&ranking.table);
    }

    println!("\nColumns with missing values:");
    if report.columns_with_missing.is_empty() {
        println!("No missing data detected.");
    } else {
        for m in &report.columns_with_missing {
            println!("  {:<30} {}", truncate_str(&m.name, 30), m.null_count);
        }
        println!("Columns with missing data may affect analysis. Consider imputing or dropping.");
    }

    println!(
        "\nStrong correlations (|corr| > {}):",
        config.correlation_low
    );
    print!("{}", report.strong_correlations);

    println!("\nDistribution skewness:");
    for s in &report.skewness {
        println!("  {:<30} {:.6}", truncate_str(&s.name, 30), s.skewness);
    }

    for stats in &report.outliers {
        println!("Outliers in {}: {}", stats.name, stats.outlier_count);
    }

    match (&report.split, &report.split_error) {
        (Some(split), _) => {
            println!("\nTrain set shape: {:?}", split.train);
            println!("Test set shape: {:?}", split.test);
        }
        (None, reason) => {
            println!(
                "\nTrain/test split skipped: {}",
                reason.as_deref().unwrap_or("not enough rows")
            );
        }
    }
}

/// Left-aligned columns sized to their widest cell.
fn print_table(table: &TableSnapshot) {
    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            table
                .rows
                .iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(name.chars().count()))
                .max()
                .unwrap_or(0)
                .min(30)
        })
        .collect();

    let render = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{:<w$}", truncate_str(cell, 30)))
            .collect::<Vec<_>>()
            .join("  ")
    };

    println!("  {}", render(table.columns.as_slice()));
    for row in &table.rows {
        println!("  {}", render(row.as_slice()));
    }
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "NaN".to_string(), |v| format!("{:.4}", v))
}

/// Truncate a string to a maximum length, adding "..." if truncated.
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

fn extract_file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("dataset")
        .to_string()
}

/// Parse the file as-is; if that fails, retry once with doubled quotes
/// collapsed and blank lines dropped.
fn load_csv_with_fallbacks(path: &str) -> Result<DataFrame> {
    let content = std::fs::read_to_string(path)?;
    let options = || {
        CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(100))
    };

    match options()
        .into_reader_with_file_handle(Cursor::new(content.clone()))
        .finish()
    {
        Ok(df) => Ok(df),
        Err(e) => {
            debug!("Parsing {} as-is failed: {}", path, e);
            warn!("Retrying {} with quote cleanup", path);
            let cleaned = clean_csv_content(&content);
            Ok(options()
                .into_reader_with_file_handle(Cursor::new(cleaned))
                .finish()?)
        }
    }
}

/// Collapse doubled quotes and drop blank lines.
fn clean_csv_content(content: &str) -> String {
    content
        .replace("\"\"", "\"")
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
