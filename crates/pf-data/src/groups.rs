//! Group enumeration and per-group slicing.

use std::collections::HashSet;

use pf_core::{GroupKey, Result};

use crate::table::PanelTable;

/// Enumerate the unique (country, period, scenario) triples in the table,
/// in first-seen row order.
pub fn unique_groups(table: &PanelTable) -> Vec<GroupKey> {
    let mut seen: HashSet<GroupKey> = HashSet::new();
    let mut out = Vec::new();
    for i in 0..table.n_rows() {
        let key = table.group_key(i);
        if seen.insert(key.clone()) {
            out.push(key);
        }
    }
    out
}

/// Slice out the rows belonging to one group.
pub fn group_table(table: &PanelTable, key: &GroupKey) -> Result<PanelTable> {
    let keep: Vec<bool> = (0..table.n_rows())
        .map(|i| {
            table.country()[i] == key.country
                && table.period()[i] == key.period
                && table.scenario()[i] == key.scenario
        })
        .collect();
    table.filter(&keep)
}
