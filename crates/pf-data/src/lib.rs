//! # pf-data
//!
//! Columnar panel data for panelfit: the in-memory [`PanelTable`], group
//! enumeration, and Parquet read/write of per-scenario input files and
//! cached result tables.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Group enumeration and per-group slicing.
pub mod groups;
/// Parquet read/write of panel tables.
pub mod parquet;
/// Regression summary table cache (Parquet).
pub mod summary_io;
/// In-memory columnar panel table.
pub mod table;

pub use groups::{group_table, unique_groups};
pub use parquet::{load_scenarios, read_scenario, write_table};
pub use summary_io::{read_summaries, write_summaries};
pub use table::{Column, PanelTable};
