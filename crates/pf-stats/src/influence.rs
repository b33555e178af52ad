//! Cook's-distance influence filtering.
//!
//! For each output variable an OLS model is fitted on the incoming data
//! and each row's Cook's distance is computed from that fit. Rows whose
//! distance exceeds `4 / n` for any output variable are dropped. The
//! cutoff and the distances come from the pre-removal data, and the models
//! are not refit after the drop.

use pf_core::Result;
use pf_data::PanelTable;

use crate::ols::{ols_fit, OlsFit};

/// Counts reported by one influence-filter pass.
#[derive(Debug, Clone, Copy)]
pub struct InfluenceReport {
    /// Rows before filtering.
    pub before: usize,
    /// Rows after filtering.
    pub after: usize,
    /// Rows removed (`before - after`).
    pub removed: usize,
    /// The `4 / n` cutoff applied, from the pre-filter row count.
    pub cutoff: f64,
}

/// Cook's distance per observation of a fitted model.
///
/// `D_i = r_i² / (k · s²) · h_ii / (1 - h_ii)²` with `k` the parameter
/// count (intercept included) and `s²` the residual variance.
pub fn cooks_distances(fit: &OlsFit) -> Vec<f64> {
    let k = (fit.n_predictors + 1) as f64;
    if fit.mse == 0.0 {
        // Exact fit: no observation moves the coefficients.
        return vec![0.0; fit.n_obs];
    }
    fit.residuals
        .iter()
        .zip(&fit.leverage)
        .map(|(&r, &h)| {
            let denom = 1.0 - h;
            if denom <= f64::EPSILON {
                f64::INFINITY
            } else {
                (r * r) / (k * fit.mse) * (h / (denom * denom))
            }
        })
        .collect()
}

/// Drop influential rows and return the fitted models.
///
/// Returns the refined table, one `(output_var, fit)` per output variable
/// in input order, and the pass report.
pub fn filter_influential(
    table: &PanelTable,
    output_vars: &[String],
    input_vars: &[String],
) -> Result<(PanelTable, Vec<(String, OlsFit)>, InfluenceReport)> {
    let before = table.n_rows();
    let cutoff = 4.0 / before as f64;

    let mut x_cols: Vec<&[f64]> = Vec::with_capacity(input_vars.len());
    for var in input_vars {
        x_cols.push(table.column(var)?);
    }

    let mut keep = vec![true; before];
    let mut models = Vec::with_capacity(output_vars.len());
    for var in output_vars {
        let y = table.column(var)?;
        let fit = ols_fit(&x_cols, y)?;
        let distances = cooks_distances(&fit);
        for (k, &d) in keep.iter_mut().zip(&distances) {
            *k = *k && d <= cutoff;
        }
        models.push((var.clone(), fit));
    }

    let filtered = table.filter(&keep)?;
    let after = filtered.n_rows();
    let report = InfluenceReport { before, after, removed: before - after, cutoff };
    tracing::info!(
        removed = report.removed,
        before = report.before,
        after = report.after,
        cutoff = report.cutoff,
        "influence filter"
    );
    Ok((filtered, models, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use nalgebra::{DMatrix, DVector};

    fn noisy_xy(n: usize) -> (Vec<f64>, Vec<f64>) {
        let x: Vec<f64> = (0..n).map(|i| i as f64 * 0.4).collect();
        let y: Vec<f64> = x
            .iter()
            .enumerate()
            .map(|(i, &xi)| 1.0 + 0.8 * xi + ((i * 37 % 11) as f64 - 5.0) * 0.1)
            .collect();
        (x, y)
    }

    /// Cook's distance via its definition: the coefficient shift from a
    /// leave-one-out refit, in the (X'X) metric, over k·s².
    fn cooks_by_refit(x: &[f64], y: &[f64]) -> Vec<f64> {
        let n = y.len();
        let full = ols_fit(&[x], y).unwrap();
        let k = 2.0;
        let xm = DMatrix::from_fn(n, 2, |i, j| if j == 0 { 1.0 } else { x[i] });
        let xtx = xm.transpose() * &xm;

        (0..n)
            .map(|drop| {
                let x_loo: Vec<f64> =
                    x.iter().enumerate().filter(|(i, _)| *i != drop).map(|(_, &v)| v).collect();
                let y_loo: Vec<f64> =
                    y.iter().enumerate().filter(|(i, _)| *i != drop).map(|(_, &v)| v).collect();
                let loo = ols_fit(&[&x_loo], &y_loo).unwrap();
                let delta = DVector::from_vec(vec![
                    full.coefficients[0] - loo.coefficients[0],
                    full.coefficients[1] - loo.coefficients[1],
                ]);
                (delta.transpose() * &xtx * &delta)[(0, 0)] / (k * full.mse)
            })
            .collect()
    }

    #[test]
    fn cooks_distance_matches_leave_one_out_definition() {
        let (x, y) = noisy_xy(12);
        let fit = ols_fit(&[&x], &y).unwrap();
        let formula = cooks_distances(&fit);
        let refit = cooks_by_refit(&x, &y);
        for (a, b) in formula.iter().zip(&refit) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-8);
        }
    }

    fn table_from(x: &[f64], y: &[f64]) -> PanelTable {
        let mut t = PanelTable::new(["x", "y"]);
        for (i, (&xi, &yi)) in x.iter().zip(y).enumerate() {
            t.push_row("norway", i as u32, "baseline", &[xi, yi]).unwrap();
        }
        t
    }

    #[test]
    fn cutoff_uses_prefilter_row_count() {
        let (x, y) = noisy_xy(25);
        let t = table_from(&x, &y);
        let (out, models, report) =
            filter_influential(&t, &["y".to_string()], &["x".to_string()]).unwrap();
        assert_abs_diff_eq!(report.cutoff, 4.0 / 25.0);
        assert!(out.n_rows() <= t.n_rows());
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].0, "y");
        assert_eq!(models[0].1.n_obs, 25);
    }

    #[test]
    fn corrupted_point_is_dropped() {
        let n = 20;
        let x: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let mut y: Vec<f64> = x.iter().map(|&v| 2.0 * v + 1.0).collect();
        // Small jitter so the fit is not exact, then one wrecked endpoint.
        for (i, v) in y.iter_mut().enumerate() {
            *v += ((i % 3) as f64 - 1.0) * 0.05;
        }
        y[n - 1] += 40.0;

        let t = table_from(&x, &y);
        let (out, _, report) =
            filter_influential(&t, &["y".to_string()], &["x".to_string()]).unwrap();
        assert!(report.removed >= 1);
        assert_eq!(out.n_rows(), report.after);
        // The wrecked endpoint is gone.
        assert!(!out.period().contains(&((n - 1) as u32)));
    }

    #[test]
    fn exact_fit_removes_nothing() {
        let x: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let y: Vec<f64> = x.iter().map(|&v| 2.0 * v + 1.0).collect();
        let t = table_from(&x, &y);
        let (out, _, report) =
            filter_influential(&t, &["y".to_string()], &["x".to_string()]).unwrap();
        assert_eq!(report.removed, 0);
        assert_eq!(out.n_rows(), 10);
    }
}
