//! Ordinary least squares with inference statistics.
//!
//! Solves the normal equations `(X'X) beta = X'y` with an intercept column,
//! then derives the statistics the summarizer and the influence filter
//! need: R², residual variance, coefficient standard errors and two-sided
//! t p-values, the overall F test, and the hat-matrix diagonal (leverage).

use nalgebra::{DMatrix, DVector};
use statrs::distribution::{ContinuousCDF, FisherSnedecor, StudentsT};

use pf_core::{Error, Result};

/// A fitted OLS model for one (group, output variable).
#[derive(Debug, Clone)]
pub struct OlsFit {
    /// Coefficients, intercept first, then one per predictor.
    pub coefficients: Vec<f64>,
    /// Standard errors, aligned with `coefficients`.
    pub std_errors: Vec<f64>,
    /// Two-sided t p-values, aligned with `coefficients`. Unclamped.
    pub t_pvalues: Vec<f64>,
    /// Coefficient of determination.
    pub r_squared: f64,
    /// Overall F statistic.
    pub f_statistic: f64,
    /// Overall F-test p-value. Unclamped.
    pub f_pvalue: f64,
    /// Observation count the model was fitted on.
    pub n_obs: usize,
    /// Number of predictors (excluding the intercept).
    pub n_predictors: usize,
    /// Residuals, one per observation.
    pub residuals: Vec<f64>,
    /// Hat-matrix diagonal, one per observation.
    pub leverage: Vec<f64>,
    /// Residual variance `RSS / (n - p - 1)`.
    pub mse: f64,
}

impl OlsFit {
    /// Fitted intercept.
    pub fn intercept(&self) -> f64 {
        self.coefficients[0]
    }

    /// Coefficient of the j-th predictor (0-based, intercept excluded).
    pub fn predictor_coef(&self, j: usize) -> f64 {
        self.coefficients[j + 1]
    }

    /// Two-sided p-value of the j-th predictor (0-based, intercept excluded).
    pub fn predictor_pvalue(&self, j: usize) -> f64 {
        self.t_pvalues[j + 1]
    }
}

fn validate_xy(x_cols: &[&[f64]], y: &[f64]) -> Result<()> {
    let n = y.len();
    if n == 0 {
        return Err(Error::Data("empty group: no observations to fit".to_string()));
    }
    if x_cols.is_empty() {
        return Err(Error::Data("X must have at least 1 predictor column".to_string()));
    }
    for (j, col) in x_cols.iter().enumerate() {
        if col.len() != n {
            return Err(Error::Data(format!(
                "predictor column {} has length {}, expected {}",
                j,
                col.len(),
                n
            )));
        }
        if col.iter().any(|v| !v.is_finite()) {
            return Err(Error::Data(format!("predictor column {} has non-finite values", j)));
        }
    }
    if y.iter().any(|v| !v.is_finite()) {
        return Err(Error::Data("y has non-finite values".to_string()));
    }
    Ok(())
}

/// Fit `y` on the given predictor columns plus an intercept.
pub fn ols_fit(x_cols: &[&[f64]], y: &[f64]) -> Result<OlsFit> {
    validate_xy(x_cols, y)?;

    let n = y.len();
    let p = x_cols.len();
    let d = p + 1;
    if n <= d {
        return Err(Error::Computation(format!(
            "not enough observations: n={} with {} parameters leaves no residual dof",
            n, d
        )));
    }
    let dof = (n - d) as f64;

    let x = DMatrix::from_fn(n, d, |i, j| if j == 0 { 1.0 } else { x_cols[j - 1][i] });
    let y_vec = DVector::from_column_slice(y);

    let xtx = x.transpose() * &x;
    let xtx_inv = xtx
        .try_inverse()
        .ok_or_else(|| Error::Computation("singular design matrix (X'X)".to_string()))?;
    let beta = &xtx_inv * (x.transpose() * &y_vec);

    let y_hat = &x * &beta;
    let resid = &y_vec - &y_hat;
    let rss: f64 = resid.iter().map(|r| r * r).sum();

    let y_mean = y.iter().sum::<f64>() / n as f64;
    let tss: f64 = y.iter().map(|v| (v - y_mean) * (v - y_mean)).sum();
    let r_squared = if tss > 0.0 { 1.0 - rss / tss } else { 0.0 };

    let mse = rss / dof;

    // Hat diagonal: h_ii = x_i' (X'X)^-1 x_i
    let half_hat = &x * &xtx_inv;
    let leverage: Vec<f64> = (0..n).map(|i| half_hat.row(i).dot(&x.row(i))).collect();

    let std_errors: Vec<f64> =
        (0..d).map(|j| (mse * xtx_inv[(j, j)]).max(0.0).sqrt()).collect();

    let t_dist = StudentsT::new(0.0, 1.0, dof)
        .map_err(|e| Error::Computation(format!("t distribution: {}", e)))?;
    let t_pvalues: Vec<f64> = beta
        .iter()
        .zip(&std_errors)
        .map(|(&b, &se)| {
            if se == 0.0 {
                // Degenerate residual variance: exact fit.
                if b.abs() < 1e-12 { 1.0 } else { 0.0 }
            } else {
                (2.0 * t_dist.sf((b / se).abs())).clamp(0.0, 1.0)
            }
        })
        .collect();

    let f_statistic = (r_squared / p as f64) / ((1.0 - r_squared) / dof);
    let f_pvalue = if f_statistic.is_finite() {
        let f_dist = FisherSnedecor::new(p as f64, dof)
            .map_err(|e| Error::Computation(format!("F distribution: {}", e)))?;
        f_dist.sf(f_statistic).clamp(0.0, 1.0)
    } else {
        // R² of exactly 1: the F statistic diverges.
        0.0
    };

    Ok(OlsFit {
        coefficients: beta.iter().copied().collect(),
        std_errors,
        t_pvalues,
        r_squared,
        f_statistic,
        f_pvalue,
        n_obs: n,
        n_predictors: p,
        residuals: resid.iter().copied().collect(),
        leverage,
        mse,
    })
}
