//! Row summaries for inspecting the labyrinth layer by layer.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::{
    errors::LabyrinthError,
    room::{Prime, Room, Row},
    row::RowBuilder,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RowScan {
    pub row: Row,
    /// Rooms of `row` entered by a door from the previous scanned row.
    pub marked: BTreeSet<Room>,
}

/// Rooms at layer `p` that have an incoming door from the previous prime.
pub fn reachable_from_previous(
    rows: &RowBuilder<'_>,
    p: Prime,
) -> Result<BTreeSet<Room>, LabyrinthError> {
    let table = rows.table();
    let idx = table.index_of(p).ok_or(LabyrinthError::UnknownPrime(p))?;
    if idx == 0 {
        return Ok(BTreeSet::new());
    }
    let previous = rows.build_row(table.primes()[idx - 1])?;
    Ok(previous.reachable_targets())
}

/// Builds every row in `[lo, hi]`, marking rooms entered from the row before
/// it in the range. The first row has no marks.
pub fn scan_range(
    rows: &RowBuilder<'_>,
    lo: u64,
    hi: u64,
) -> Result<Vec<RowScan>, LabyrinthError> {
    let mut scans = Vec::new();
    let mut marked = BTreeSet::new();
    for &p in rows.table().primes_in_range(lo, hi) {
        let row = rows.build_row(p)?;
        let reached = row.reachable_targets();
        scans.push(RowScan { row, marked });
        marked = reached;
    }
    Ok(scans)
}

/// One compact signature line per prime in `[lo, hi]`.
pub fn signatures(rows: &RowBuilder<'_>, lo: u64, hi: u64) -> Result<Vec<String>, LabyrinthError> {
    rows.table()
        .primes_in_range(lo, hi)
        .iter()
        .map(|&p| {
            let row = rows.build_row(p)?;
            Ok(row
                .signature()
                .unwrap_or_else(|| format!("{p}: no next prime found (table limit).")))
        })
        .collect()
}
