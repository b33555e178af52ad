//! R² curve artifacts.

use serde::{Deserialize, Serialize};

use crate::long::LongRecord;

/// One output variable's R² over period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RSquaredSeries {
    /// Outcome variable.
    pub output_var: String,
    /// Period values, ascending.
    pub periods: Vec<u32>,
    /// R² values aligned with `periods`.
    pub values: Vec<f64>,
}

/// Plot-friendly artifact for one (country, scenario) R² chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RSquaredCurveArtifact {
    /// Country label (title-cased).
    pub country: String,
    /// Scenario label.
    pub scenario: String,
    /// One series per output variable, sorted by name.
    pub series: Vec<RSquaredSeries>,
}

/// Build one R² artifact per (country, scenario) pair, in first-seen order.
pub fn rsquared_artifacts(records: &[LongRecord]) -> Vec<RSquaredCurveArtifact> {
    let mut pairs: Vec<(String, String)> = Vec::new();
    for r in records {
        let key = (r.country.clone(), r.scenario.clone());
        if !pairs.contains(&key) {
            pairs.push(key);
        }
    }

    pairs
        .into_iter()
        .map(|(country, scenario)| {
            let mut series: Vec<RSquaredSeries> = Vec::new();
            for r in records {
                if r.country != country || r.scenario != scenario || r.variable != "r_squared" {
                    continue;
                }
                match series.iter_mut().find(|s| s.output_var == r.output_var) {
                    Some(s) => {
                        s.periods.push(r.period);
                        s.values.push(r.value);
                    }
                    None => series.push(RSquaredSeries {
                        output_var: r.output_var.clone(),
                        periods: vec![r.period],
                        values: vec![r.value],
                    }),
                }
            }
            series.sort_by(|a, b| a.output_var.cmp(&b.output_var));
            for s in &mut series {
                let mut order: Vec<usize> = (0..s.periods.len()).collect();
                order.sort_by_key(|&i| s.periods[i]);
                s.periods = order.iter().map(|&i| s.periods[i]).collect();
                s.values = order.iter().map(|&i| s.values[i]).collect();
            }
            RSquaredCurveArtifact { country, scenario, series }
        })
        .collect()
}
