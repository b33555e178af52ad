//! # pf-core
//!
//! Core types for panelfit: the shared error type, the TOML pipeline
//! configuration, and the result records the other crates exchange.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Pipeline configuration loaded from TOML.
pub mod config;
/// Error types.
pub mod error;
/// Shared data types (group keys, regression summaries).
pub mod types;

pub use config::{FilterParams, PipelineConfig};
pub use error::{Error, Result};
pub use types::{CoefficientStat, GroupKey, RegressionSummary};

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
