//! Numeric kernels shared by the analyzers.
//!
//! Conventions match the usual dataframe tooling so results line up with
//! reports produced elsewhere:
//! - quantiles use linear interpolation between order statistics (R-7),
//! - standard deviation is the sample (n - 1) estimate,
//! - skewness is the adjusted Fisher-Pearson coefficient,
//! - correlation is Pearson over pairwise-complete rows.

use crate::types::{ColumnStats, Histogram};

/// Sort a copy of `values` ascending. Callers pass NaN-free data.
pub(crate) fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// `q`-th quantile of pre-sorted data with linear interpolation.
///
/// Returns NaN for empty input.
pub(crate) fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    if n == 1 {
        return sorted[0];
    }

    let pos = (n - 1) as f64 * q;
    let lo = pos.floor() as usize;
    let frac = pos - pos.floor();

    if lo + 1 >= n {
        sorted[n - 1]
    } else {
        sorted[lo] + (sorted[lo + 1] - sorted[lo]) * frac
    }
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation; `None` below two values.
pub(crate) fn sample_std(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((ss / (n - 1) as f64).sqrt())
}

/// Adjusted Fisher-Pearson sample skewness.
///
/// NaN below three values, 0.0 for a constant column.
pub(crate) fn skewness(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 3 {
        return f64::NAN;
    }
    let Some(m) = mean(values) else {
        return f64::NAN;
    };

    let (m2, m3) = values.iter().fold((0.0, 0.0), |(s2, s3), v| {
        let d = v - m;
        (s2 + d * d, s3 + d * d * d)
    });

    // Relative tolerance on the squared deviations; rounding residue of a
    // constant column must not blow up the ratio below.
    let scale = values.iter().map(|v| v * v).sum::<f64>().max(f64::MIN_POSITIVE);
    if m2 <= scale * 1e-14 {
        return 0.0;
    }

    let n = n as f64;
    (n * (n - 1.0).sqrt() / (n - 2.0)) * (m3 / m2.powf(1.5))
}

/// Tukey fences and outlier count of one column.
///
/// `values` holds the non-missing observations in any order.
pub(crate) fn tukey_stats(name: &str, values: &[f64], multiplier: f64) -> ColumnStats {
    let sorted = sorted(values);
    let q1 = quantile_sorted(&sorted, 0.25);
    let q3 = quantile_sorted(&sorted, 0.75);
    let iqr = q3 - q1;
    let lower_bound = q1 - multiplier * iqr;
    let upper_bound = q3 + multiplier * iqr;

    // NaN bounds compare false, so an all-missing column counts zero.
    let outlier_count = values
        .iter()
        .filter(|&&v| v < lower_bound || v > upper_bound)
        .count();

    ColumnStats {
        name: name.to_string(),
        q1,
        q3,
        iqr,
        lower_bound,
        upper_bound,
        outlier_count,
    }
}

/// Pearson correlation over rows where both sides are present.
///
/// NaN when fewer than two such rows exist or either side is constant.
pub(crate) fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();

    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let (mut cov, mut ss_x, mut ss_y) = (0.0, 0.0, 0.0);
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        ss_x += dx * dx;
        ss_y += dy * dy;
    }

    let divisor = (ss_x * ss_y).sqrt();
    if divisor == 0.0 {
        return f64::NAN;
    }
    (cov / divisor).clamp(-1.0, 1.0)
}

/// Equal-width histogram over `[min, max]`; the last bin is closed.
///
/// Infinite values are skipped. A degenerate range is widened by 0.5 on
/// each side. Returns `None` for zero bins or no finite values.
pub(crate) fn histogram(column: &str, values: &[f64], bins: usize) -> Option<Histogram> {
    let values: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if values.is_empty() || bins == 0 {
        return None;
    }

    let mut lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bins as f64;
    let edges: Vec<f64> = (0..=bins)
        .map(|i| if i == bins { hi } else { lo + width * i as f64 })
        .collect();

    let mut counts = vec![0usize; bins];
    for &v in &values {
        let idx = (((v - lo) / (hi - lo)) * bins as f64).floor() as usize;
        counts[idx.min(bins - 1)] += 1;
    }

    Some(Histogram {
        column: column.to_string(),
        edges,
        counts,
    })
}
