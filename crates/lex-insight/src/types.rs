use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Outlier Types
// ============================================================================

/// Tukey fence statistics of one numeric column.
///
/// `q1`/`q3` are NaN when the column has no non-missing values; the
/// outlier count is 0 in that case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    pub name: String,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub outlier_count: usize,
}

// ============================================================================
// Correlation Types
// ============================================================================

/// Two distinct numeric columns and their Pearson coefficient.
///
/// `left` always precedes `right` in the dataset's column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationPair {
    pub left: String,
    pub right: String,
    pub coefficient: f64,
}

/// Square Pearson correlation matrix over numeric columns.
///
/// Cells that cannot be computed (constant column, fewer than two
/// overlapping rows) hold NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Coefficient between two columns by name.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.values[i][j])
    }

    /// Upper-triangle pairs with `low < |r| < high`, row-major.
    pub fn strong_pairs(&self, low: f64, high: f64) -> Vec<CorrelationPair> {
        let mut pairs = Vec::new();
        for i in 0..self.columns.len() {
            for j in (i + 1)..self.columns.len() {
                let r = self.values[i][j];
                if in_window(r, low, high) {
                    pairs.push(CorrelationPair {
                        left: self.columns[i].clone(),
                        right: self.columns[j].clone(),
                        coefficient: r,
                    });
                }
            }
        }
        pairs
    }

    /// Masked view keeping only qualifying cells.
    ///
    /// Rows and columns without a single qualifying cell are dropped.
    pub fn strong(&self, low: f64, high: f64) -> StrongCorrelations {
        let keep: Vec<usize> = (0..self.columns.len())
            .filter(|&i| {
                self.values[i]
                    .iter()
                    .enumerate()
                    .any(|(j, &r)| i != j && in_window(r, low, high))
            })
            .collect();

        let values = keep
            .iter()
            .map(|&i| {
                keep.iter()
                    .map(|&j| {
                        let r = self.values[i][j];
                        (i != j && in_window(r, low, high)).then_some(r)
                    })
                    .collect()
            })
            .collect();

        StrongCorrelations {
            columns: keep.iter().map(|&i| self.columns[i].clone()).collect(),
            values,
        }
    }
}

/// Strict window test; NaN never qualifies.
#[inline]
pub(crate) fn in_window(r: f64, low: f64, high: f64) -> bool {
    let magnitude = r.abs();
    magnitude > low && magnitude < high
}

/// Pruned correlation matrix; `None` marks a masked cell.
///
/// The matrix stays symmetric, so the kept rows and columns are the same set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrongCorrelations {
    pub columns: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl StrongCorrelations {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl fmt::Display for StrongCorrelations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.columns.is_empty() {
            return writeln!(f, "(no strong correlations)");
        }

        let label_width = self.columns.iter().map(|c| c.len()).max().unwrap_or(0);
        let cell_width = self.columns.iter().map(|c| c.len()).max().unwrap_or(0).max(6);

        write!(f, "{:label_width$}", "")?;
        for col in &self.columns {
            write!(f, "  {:>cell_width$}", col)?;
        }
        writeln!(f)?;

        for (name, row) in self.columns.iter().zip(&self.values) {
            write!(f, "{:<label_width$}", name)?;
            for cell in row {
                match cell {
                    Some(r) => write!(f, "  {:>cell_width$.6}", r)?,
                    None => write!(f, "  {:>cell_width$}", "NaN")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// ============================================================================
// Profile Types
// ============================================================================

/// Dtype and completeness of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    pub dtype: String,
    pub non_null_count: usize,
}

/// Shape and per-column dtype listing of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub rows: usize,
    pub columns: Vec<ColumnInfo>,
}

/// Summary statistics of one column.
///
/// Numeric columns fill the moment/quantile fields, other columns fill
/// `unique`, `top` and `freq`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescription {
    pub name: String,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freq: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub std: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q25: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub median: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q75: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// Null count of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingCount {
    pub name: String,
    pub null_count: usize,
}

/// Most frequent values of one categorical column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueCounts {
    pub column: String,
    pub counts: Vec<(String, usize)>,
}

/// Skewness of one numeric column (NaN when fewer than three values).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSkewness {
    pub name: String,
    pub skewness: f64,
}

/// Equal-width histogram of one numeric column.
///
/// `edges` has `counts.len() + 1` entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub column: String,
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

// ============================================================================
// Split Types
// ============================================================================

/// Row/column counts of the two halves of a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitShape {
    pub train: (usize, usize),
    pub test: (usize, usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> CorrelationMatrix {
        CorrelationMatrix {
            columns: vec!["a".into(), "b".into(), "c".into()],
            values: vec![
                vec![1.0, 0.9, 0.1],
                vec![0.9, 1.0, -0.2],
                vec![0.1, -0.2, 1.0],
            ],
        }
    }

    #[test]
    fn test_strong_pairs_upper_triangle_only() {
        let pairs = matrix().strong_pairs(0.7, 1.0);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].left, "a");
        assert_eq!(pairs[0].right, "b");
    }

    #[test]
    fn test_strong_view_drops_empty_rows_and_columns() {
        let strong = matrix().strong(0.7, 1.0);
        assert_eq!(strong.columns, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(strong.values[0], vec![None, Some(0.9)]);
        assert_eq!(strong.values[1], vec![Some(0.9), None]);
    }

    #[test]
    fn test_nan_never_in_window() {
        assert!(!in_window(f64::NAN, 0.0, 1.0));
        assert!(!in_window(1.0, 0.7, 1.0));
        assert!(in_window(-0.8, 0.7, 1.0));
    }

    #[test]
    fn test_get_by_name() {
        let m = matrix();
        assert_eq!(m.get("b", "c"), Some(-0.2));
        assert_eq!(m.get("a", "zzz"), None);
    }

    #[test]
    fn test_display_empty() {
        let strong = matrix().strong(0.95, 1.0);
        assert!(strong.is_empty());
        assert!(strong.to_string().contains("no strong correlations"));
    }
}
