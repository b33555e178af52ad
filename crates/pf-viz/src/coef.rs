//! Coefficient bar-chart artifacts.

use serde::{Deserialize, Serialize};

use crate::long::LongRecord;

/// One predictor's coefficient over period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoefficientSeries {
    /// Predictor variable.
    pub input_var: String,
    /// Coefficient values aligned with the artifact's `periods`.
    /// NaN where a (period, predictor) combination is absent.
    pub values: Vec<f64>,
}

/// Plot-friendly artifact for one (country, scenario, output variable)
/// coefficient chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoefficientBarsArtifact {
    /// Country label (title-cased).
    pub country: String,
    /// Scenario label.
    pub scenario: String,
    /// Outcome variable this chart describes.
    pub output_var: String,
    /// Period values, ascending.
    pub periods: Vec<u32>,
    /// One series per predictor, in configured order.
    pub series: Vec<CoefficientSeries>,
}

/// Build one coefficient artifact per (country, scenario, output variable),
/// pairs in first-seen order, output variables in configured order.
pub fn coefficient_artifacts(
    records: &[LongRecord],
    input_vars: &[String],
    output_vars: &[String],
) -> Vec<CoefficientBarsArtifact> {
    let mut pairs: Vec<(String, String)> = Vec::new();
    for r in records {
        let key = (r.country.clone(), r.scenario.clone());
        if !pairs.contains(&key) {
            pairs.push(key);
        }
    }

    let mut out = Vec::new();
    for (country, scenario) in pairs {
        for output_var in output_vars {
            let mut periods: Vec<u32> = records
                .iter()
                .filter(|r| {
                    r.country == country && r.scenario == scenario && r.output_var == *output_var
                })
                .map(|r| r.period)
                .collect();
            periods.sort_unstable();
            periods.dedup();
            if periods.is_empty() {
                continue;
            }

            let series = input_vars
                .iter()
                .map(|var| {
                    let metric = format!("{}_coef", var);
                    let values = periods
                        .iter()
                        .map(|&period| {
                            records
                                .iter()
                                .find(|r| {
                                    r.country == country
                                        && r.scenario == scenario
                                        && r.output_var == *output_var
                                        && r.period == period
                                        && r.variable == metric
                                })
                                .map(|r| r.value)
                                .unwrap_or(f64::NAN)
                        })
                        .collect();
                    CoefficientSeries { input_var: var.clone(), values }
                })
                .collect();

            out.push(CoefficientBarsArtifact {
                country: country.clone(),
                scenario: scenario.clone(),
                output_var: output_var.clone(),
                periods,
                series,
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coef_record(period: u32, output_var: &str, metric: &str, value: f64) -> LongRecord {
        LongRecord {
            country: "Norway".to_string(),
            period,
            scenario: "baseline".to_string(),
            output_var: output_var.to_string(),
            variable: metric.to_string(),
            value,
        }
    }

    #[test]
    fn one_artifact_per_output_var() {
        let records = vec![
            coef_record(1, "approval_index", "inflation_coef", -0.4),
            coef_record(2, "approval_index", "inflation_coef", -0.5),
            coef_record(1, "budget_balance", "inflation_coef", 0.2),
        ];
        let input_vars = vec!["inflation".to_string()];
        let output_vars = vec!["approval_index".to_string(), "budget_balance".to_string()];
        let artifacts = coefficient_artifacts(&records, &input_vars, &output_vars);
        assert_eq!(artifacts.len(), 2);
        assert_eq!(artifacts[0].output_var, "approval_index");
        assert_eq!(artifacts[0].periods, vec![1, 2]);
        assert_eq!(artifacts[0].series[0].values, vec![-0.4, -0.5]);
        assert_eq!(artifacts[1].periods, vec![1]);
    }

    #[test]
    fn missing_combination_is_nan() {
        let records = vec![
            coef_record(1, "approval_index", "inflation_coef", -0.4),
            coef_record(2, "approval_index", "unemployment_coef", -1.0),
        ];
        let input_vars = vec!["inflation".to_string(), "unemployment".to_string()];
        let output_vars = vec!["approval_index".to_string()];
        let artifacts = coefficient_artifacts(&records, &input_vars, &output_vars);
        let inf = &artifacts[0].series[0];
        assert_eq!(inf.values[0], -0.4);
        assert!(inf.values[1].is_nan());
    }

    #[test]
    fn absent_output_var_yields_no_artifact() {
        let records = vec![coef_record(1, "approval_index", "inflation_coef", -0.4)];
        let input_vars = vec!["inflation".to_string()];
        let output_vars = vec!["budget_balance".to_string()];
        assert!(coefficient_artifacts(&records, &input_vars, &output_vars).is_empty());
    }
}
