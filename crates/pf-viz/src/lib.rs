//! # pf-viz
//!
//! Visualization data artifacts for panelfit.
//!
//! This crate is intentionally dependency-light and focuses on emitting
//! plot-friendly structures (parallel arrays instead of nested objects).

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Coefficient bar-chart artifacts.
pub mod coef;
/// Long-form reshape of the summary table.
pub mod long;
/// R² curve artifacts.
pub mod rsquared;

pub use coef::{coefficient_artifacts, CoefficientBarsArtifact, CoefficientSeries};
pub use long::{to_long, LongRecord};
pub use rsquared::{rsquared_artifacts, RSquaredCurveArtifact, RSquaredSeries};
