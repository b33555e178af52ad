//! IQR outlier filtering.
//!
//! For each output variable, rows outside `[Q1 - k*IQR, Q3 + k*IQR]` are
//! dropped. A row survives only if every output variable is within its
//! bounds. Quantiles use linear interpolation between order statistics.

use pf_core::Result;
use pf_data::PanelTable;

/// Counts reported by one outlier-filter pass.
#[derive(Debug, Clone, Copy)]
pub struct OutlierReport {
    /// Rows before filtering.
    pub before: usize,
    /// Rows after filtering.
    pub after: usize,
    /// Rows removed (`before - after`).
    pub removed: usize,
}

/// Quantile with linear interpolation between order statistics.
///
/// `q` must be in `[0, 1]`; `values` must be non-empty.
pub fn quantile(values: &[f64], q: f64) -> f64 {
    debug_assert!(!values.is_empty());
    debug_assert!((0.0..=1.0).contains(&q));
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = pos - lo as f64;
        sorted[lo] + frac * (sorted[hi] - sorted[lo])
    }
}

/// Filter IQR outliers on the output variables.
///
/// Disabled filtering is a no-op: the input table is returned unchanged.
pub fn filter_outliers(
    table: &PanelTable,
    enabled: bool,
    iqr_threshold: f64,
    output_vars: &[String],
) -> Result<(PanelTable, OutlierReport)> {
    let before = table.n_rows();
    if !enabled {
        return Ok((table.clone(), OutlierReport { before, after: before, removed: 0 }));
    }

    let mut keep = vec![true; before];
    for var in output_vars {
        let values = table.column(var)?;
        if values.is_empty() {
            continue;
        }
        let q1 = quantile(values, 0.25);
        let q3 = quantile(values, 0.75);
        let iqr = q3 - q1;
        let lower = q1 - iqr_threshold * iqr;
        let upper = q3 + iqr_threshold * iqr;
        for (k, &v) in keep.iter_mut().zip(values) {
            *k = *k && (lower..=upper).contains(&v);
        }
    }

    let filtered = table.filter(&keep)?;
    let after = filtered.n_rows();
    let report = OutlierReport { before, after, removed: before - after };
    tracing::info!(
        removed = report.removed,
        before = report.before,
        after = report.after,
        "outlier filter"
    );
    Ok((filtered, report))
}
