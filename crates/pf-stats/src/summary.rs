//! Flat regression summary records.

use pf_core::{CoefficientStat, Error, GroupKey, RegressionSummary, Result};

use crate::ols::OlsFit;

/// P-values at or below this are reported as exactly 0.0, so displays do
/// not carry tiny-float noise.
pub const P_VALUE_FLOOR: f64 = 1e-4;

fn clamp_pvalue(p: f64) -> f64 {
    if p <= P_VALUE_FLOOR {
        0.0
    } else {
        p
    }
}

/// Build one summary record per fitted model of a group.
///
/// `models` is the `(output_var, fit)` list from the influence filter;
/// `input_vars` must match the predictor set the models were fitted with.
pub fn summarize(
    group: &GroupKey,
    models: &[(String, OlsFit)],
    input_vars: &[String],
) -> Result<Vec<RegressionSummary>> {
    let mut out = Vec::with_capacity(models.len());
    for (output_var, fit) in models {
        if fit.n_predictors != input_vars.len() {
            return Err(Error::Computation(format!(
                "model for '{}' has {} predictors, config has {}",
                output_var,
                fit.n_predictors,
                input_vars.len()
            )));
        }
        let coefficients = input_vars
            .iter()
            .enumerate()
            .map(|(j, var)| CoefficientStat {
                input_var: var.clone(),
                coef: fit.predictor_coef(j),
                pvalue: clamp_pvalue(fit.predictor_pvalue(j)),
            })
            .collect();
        out.push(RegressionSummary {
            group: group.clone(),
            output_var: output_var.clone(),
            n_rows: fit.n_obs as u64,
            r_squared: fit.r_squared,
            prob_f_stat: clamp_pvalue(fit.f_pvalue),
            coefficients,
        });
    }
    Ok(out)
}
