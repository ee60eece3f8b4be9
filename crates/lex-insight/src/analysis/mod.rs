//! Summary analysis: Tukey outlier counts and strong correlations.
//!
//! Both operations look at numeric-typed columns only and are pure
//! functions of the data and the configured thresholds.

pub(crate) mod statistics;
mod summary;

pub use summary::SummaryAnalyzer;
