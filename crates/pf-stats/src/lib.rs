//! # pf-stats
//!
//! The statistical core of panelfit: IQR outlier filtering, OLS fitting
//! with coefficient/F-test p-values, Cook's-distance influence filtering,
//! and regression summary records.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Cook's-distance influence filtering.
pub mod influence;
/// Ordinary least squares with inference statistics.
pub mod ols;
/// IQR outlier filtering.
pub mod outlier;
/// Flat regression summary records.
pub mod summary;

pub use influence::{filter_influential, InfluenceReport};
pub use ols::{ols_fit, OlsFit};
pub use outlier::{filter_outliers, OutlierReport};
pub use summary::summarize;
