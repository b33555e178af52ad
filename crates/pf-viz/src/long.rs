//! Long-form reshape of the summary table.
//!
//! Wide summary records unpivot into one `(keys, variable, value)` record
//! per metric. Negative R² values are clamped to 0 for plotting, and the
//! country label is title-cased for display.

use pf_core::RegressionSummary;
use serde::{Deserialize, Serialize};

/// One long-form metric value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LongRecord {
    /// Country (title-cased for display).
    pub country: String,
    /// Period index.
    pub period: u32,
    /// Scenario label.
    pub scenario: String,
    /// Outcome variable the model predicts.
    pub output_var: String,
    /// Metric name: `n_rows`, `r_squared`, `prob_f_stat`,
    /// `<var>_coef` or `<var>_pvalue`.
    pub variable: String,
    /// Metric value.
    pub value: f64,
}

fn titlecase(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Unpivot wide summary records into long form.
pub fn to_long(summaries: &[RegressionSummary]) -> Vec<LongRecord> {
    let mut out = Vec::with_capacity(summaries.len() * 4);
    for s in summaries {
        let country = titlecase(&s.group.country);
        let mut push = |variable: &str, value: f64| {
            out.push(LongRecord {
                country: country.clone(),
                period: s.group.period,
                scenario: s.group.scenario.clone(),
                output_var: s.output_var.clone(),
                variable: variable.to_string(),
                value,
            });
        };
        push("n_rows", s.n_rows as f64);
        push("r_squared", s.r_squared.max(0.0));
        push("prob_f_stat", s.prob_f_stat);
        for c in &s.coefficients {
            push(&format!("{}_coef", c.input_var), c.coef);
            push(&format!("{}_pvalue", c.input_var), c.pvalue);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_core::{CoefficientStat, GroupKey};

    fn summary(r_squared: f64) -> RegressionSummary {
        RegressionSummary {
            group: GroupKey {
                country: "new zealand".to_string(),
                period: 2,
                scenario: "baseline".to_string(),
            },
            output_var: "approval_index".to_string(),
            n_rows: 40,
            r_squared,
            prob_f_stat: 0.01,
            coefficients: vec![CoefficientStat {
                input_var: "inflation".to_string(),
                coef: -0.4,
                pvalue: 0.02,
            }],
        }
    }

    #[test]
    fn unpivots_all_metrics() {
        let long = to_long(&[summary(0.8)]);
        let vars: Vec<&str> = long.iter().map(|r| r.variable.as_str()).collect();
        assert_eq!(
            vars,
            vec!["n_rows", "r_squared", "prob_f_stat", "inflation_coef", "inflation_pvalue"]
        );
        assert!(long.iter().all(|r| r.output_var == "approval_index"));
    }

    #[test]
    fn negative_rsquared_clamped_to_zero() {
        let long = to_long(&[summary(-0.3)]);
        let r2 = long.iter().find(|r| r.variable == "r_squared").unwrap();
        assert_eq!(r2.value, 0.0);
    }

    #[test]
    fn country_is_titlecased() {
        let long = to_long(&[summary(0.5)]);
        assert_eq!(long[0].country, "New Zealand");
    }
}
