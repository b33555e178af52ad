//! Pipeline configuration.
//!
//! The configuration is read once from a TOML file and passed by reference
//! into each pipeline stage. There is no process-global config.

use std::path::Path;

use serde::Deserialize;

use crate::{Error, Result};

/// Top-level pipeline configuration (`config.toml`).
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Project name, used in log lines and chart headers.
    pub project_name: String,
    /// Predictor variables (regression inputs).
    pub input_var: Vec<String>,
    /// Outcome variables (one regression per group per outcome).
    pub output_var: Vec<String>,
    /// Scenario labels; one Parquet file per scenario is loaded.
    pub scenario: Vec<String>,
    /// Grouping key columns. Fixed to country/period/scenario.
    #[serde(default = "default_unique")]
    pub unique: Vec<String>,
    /// Outlier filter parameters.
    pub filter_param: FilterParams,
}

/// Outlier filter parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterParams {
    /// Whether IQR outlier filtering runs at all.
    pub filter_enable: bool,
    /// IQR multiplier `k`: bounds are `Q1 - k*IQR` and `Q3 + k*IQR`.
    pub iqr_threshold: f64,
}

fn default_unique() -> Vec<String> {
    vec!["country".to_string(), "period".to_string(), "scenario".to_string()]
}

impl PipelineConfig {
    /// Load and validate a configuration from a TOML file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.input_var.is_empty() {
            return Err(Error::Config("input_var must not be empty".to_string()));
        }
        if self.output_var.is_empty() {
            return Err(Error::Config("output_var must not be empty".to_string()));
        }
        if self.scenario.is_empty() {
            return Err(Error::Config("scenario must not be empty".to_string()));
        }
        if !(self.filter_param.iqr_threshold.is_finite() && self.filter_param.iqr_threshold > 0.0)
        {
            return Err(Error::Config(format!(
                "iqr_threshold must be finite and > 0, got {}",
                self.filter_param.iqr_threshold
            )));
        }
        for var in &self.input_var {
            if self.output_var.contains(var) {
                return Err(Error::Config(format!(
                    "variable '{}' appears in both input_var and output_var",
                    var
                )));
            }
        }
        if self.unique != default_unique() {
            return Err(Error::Config(format!(
                "unsupported grouping keys {:?}: only country/period/scenario grouping is implemented",
                self.unique
            )));
        }
        Ok(())
    }
}
