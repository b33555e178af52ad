//! In-memory columnar panel table.
//!
//! A [`PanelTable`] holds the three key columns (country, period, scenario)
//! plus an ordered set of named `f64` value columns. All mutation is
//! row-append or row-removal; filtering never adds rows.

use pf_core::{Error, GroupKey, Result};

/// One named value column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Values, one per row.
    pub values: Vec<f64>,
}

/// Columnar table of panel observations.
#[derive(Debug, Clone, Default)]
pub struct PanelTable {
    country: Vec<String>,
    period: Vec<u32>,
    scenario: Vec<String>,
    columns: Vec<Column>,
}

impl PanelTable {
    /// Create an empty table with the given value-column names.
    pub fn new<I, S>(value_columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            country: Vec::new(),
            period: Vec::new(),
            scenario: Vec::new(),
            columns: value_columns
                .into_iter()
                .map(|name| Column { name: name.into(), values: Vec::new() })
                .collect(),
        }
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.country.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.country.is_empty()
    }

    /// Value-column names, in order.
    pub fn value_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Country key column.
    pub fn country(&self) -> &[String] {
        &self.country
    }

    /// Period key column.
    pub fn period(&self) -> &[u32] {
        &self.period
    }

    /// Scenario key column.
    pub fn scenario(&self) -> &[String] {
        &self.scenario
    }

    /// Group key of one row.
    pub fn group_key(&self, row: usize) -> GroupKey {
        GroupKey {
            country: self.country[row].clone(),
            period: self.period[row],
            scenario: self.scenario[row].clone(),
        }
    }

    /// Append a row. `values` must match the value-column count and order.
    pub fn push_row(
        &mut self,
        country: &str,
        period: u32,
        scenario: &str,
        values: &[f64],
    ) -> Result<()> {
        if values.len() != self.columns.len() {
            return Err(Error::Data(format!(
                "row has {} values, table has {} value columns",
                values.len(),
                self.columns.len()
            )));
        }
        self.country.push(country.to_string());
        self.period.push(period);
        self.scenario.push(scenario.to_string());
        for (col, &v) in self.columns.iter_mut().zip(values) {
            col.values.push(v);
        }
        Ok(())
    }

    /// Look up a value column by name. Missing columns are a fatal data error.
    pub fn column(&self, name: &str) -> Result<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
            .ok_or_else(|| Error::Data(format!("missing column: {}", name)))
    }

    /// Keep only the rows where `keep` is true. `keep` must have one entry
    /// per row. Only removes rows, never adds.
    pub fn filter(&self, keep: &[bool]) -> Result<PanelTable> {
        if keep.len() != self.n_rows() {
            return Err(Error::Data(format!(
                "mask length {} != row count {}",
                keep.len(),
                self.n_rows()
            )));
        }
        let mut out = PanelTable::new(self.value_names());
        for i in 0..self.n_rows() {
            if keep[i] {
                out.country.push(self.country[i].clone());
                out.period.push(self.period[i]);
                out.scenario.push(self.scenario[i].clone());
                for (dst, src) in out.columns.iter_mut().zip(&self.columns) {
                    dst.values.push(src.values[i]);
                }
            }
        }
        Ok(out)
    }

    /// Concatenate tables. All tables must share the same value-column
    /// schema (names and order).
    pub fn concat(tables: Vec<PanelTable>) -> Result<PanelTable> {
        let mut iter = tables.into_iter();
        let mut out = match iter.next() {
            Some(t) => t,
            None => return Err(Error::Data("concat of zero tables".to_string())),
        };
        for t in iter {
            if t.value_names() != out.value_names() {
                return Err(Error::Data(format!(
                    "schema mismatch in concat: {:?} vs {:?}",
                    out.value_names(),
                    t.value_names()
                )));
            }
            out.country.extend(t.country);
            out.period.extend(t.period);
            out.scenario.extend(t.scenario);
            for (dst, src) in out.columns.iter_mut().zip(t.columns) {
                dst.values.extend(src.values);
            }
        }
        Ok(out)
    }
}
