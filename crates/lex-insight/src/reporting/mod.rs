//! Report generation module.
//!
//! [`ReportGenerator::build`] runs every analysis over a dataset and
//! collects the results into one [`EdaReport`], which serves:
//! - JSON output to stdout (`--json` CLI flag)
//! - JSON file output (`--emit-report` CLI flag)
//! - Programmatic access in library mode
//!
//! # Example
//!
//! ```rust,ignore
//! use lex_insight::{AnalysisConfig, ReportGenerator};
//!
//! let config = AnalysisConfig::default();
//! let report = ReportGenerator::build(&df, &config, "data/players.csv")?;
//!
//! // Print as JSON
//! println!("{}", serde_json::to_string_pretty(&report)?);
//!
//! // Or write to file
//! let generator = ReportGenerator::new(config.output_dir.clone());
//! generator.write_report_to_file(&report, "players")?;
//! ```

mod generator;

pub use generator::{EdaReport, RankingSnapshot, ReportGenerator, TableSnapshot};
