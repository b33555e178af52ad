//! Common data types for panelfit

use std::fmt;

use serde::{Deserialize, Serialize};

/// One regression unit: a unique (country, period, scenario) triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupKey {
    /// Country identifier.
    pub country: String,
    /// Period index (e.g. year or quarter ordinal).
    pub period: u32,
    /// Scenario label the row was loaded under.
    pub scenario: String,
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.country, self.period, self.scenario)
    }
}

/// Per-predictor coefficient statistics for one fitted model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoefficientStat {
    /// Predictor variable name.
    pub input_var: String,
    /// Estimated coefficient.
    pub coef: f64,
    /// Two-sided t-test p-value, clamped to 0.0 when <= 1e-4.
    pub pvalue: f64,
}

/// Flattened regression result: one record per (group, output variable).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionSummary {
    /// Group this model was fitted for.
    pub group: GroupKey,
    /// Outcome variable the model predicts.
    pub output_var: String,
    /// Observation count the model was fitted on.
    pub n_rows: u64,
    /// Coefficient of determination.
    pub r_squared: f64,
    /// Overall F-test p-value, clamped to 0.0 when <= 1e-4.
    pub prob_f_stat: f64,
    /// Per-predictor statistics, in configured `input_var` order.
    pub coefficients: Vec<CoefficientStat>,
}

impl RegressionSummary {
    /// Look up the coefficient record for a predictor, if present.
    pub fn coefficient(&self, input_var: &str) -> Option<&CoefficientStat> {
        self.coefficients.iter().find(|c| c.input_var == input_var)
    }
}
